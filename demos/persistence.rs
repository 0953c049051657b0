//! Saving and restoring live state through length-prefixed frames.
//!
//! Run with: cargo run --example persistence

use object_notation::{
    read_framed_from, record, restore_from_notation, to_notation, write_framed_to, Error, Format,
};
use std::cell::RefCell;
use std::rc::Rc;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Default, PartialEq)]
struct Settings {
    volume: i32,
    muted: bool,
    recent: Vec<String>,
}

record! {
    Settings {
        required volume: i32,
        optional muted: bool,
        optional recent: Vec<String>,
    }
}

#[derive(Debug, Default)]
struct Node {
    label: String,
    next: Option<Rc<RefCell<Node>>>,
}

record! {
    Node {
        required label: String,
        optional next: Option<Rc<RefCell<Node>>>,
    }
}

fn main() -> Result<(), Error> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .try_init();

    let saved = Settings {
        volume: 7,
        muted: true,
        recent: vec!["intro.ogg".to_string(), "outro.ogg".to_string()],
    };

    // Two frames in one stream, one per notation.
    let mut stream = Vec::new();
    write_framed_to(&mut stream, &saved, Format::Toon)?;
    write_framed_to(&mut stream, &saved, Format::Json)?;
    println!("Stream holds {} bytes", stream.len());

    let mut reader = stream.as_slice();
    let first: Settings = read_framed_from(&mut reader, Format::Toon)?;
    let second: Settings = read_framed_from(&mut reader, Format::Json)?;
    assert_eq!(first, saved);
    assert_eq!(second, saved);
    println!("✓ Read back both frames");

    // Restore into an instance other code already holds.
    let mut live = Settings::default();
    let text = to_notation(&saved, Format::Toon)?;
    restore_from_notation(&mut live, &text, Format::Toon)?;
    println!("Restored live settings: {:?}", live);

    // A failed restore leaves the instance as it was.
    let before = live.volume;
    if let Err(err) = restore_from_notation(&mut live, "muted: false", Format::Toon) {
        println!("Restore rejected: {}", err);
    }
    assert_eq!(live.volume, before);

    // Cyclic graphs are refused.
    let node = Rc::new(RefCell::new(Node {
        label: "loop".to_string(),
        next: None,
    }));
    node.borrow_mut().next = Some(Rc::clone(&node));
    match to_notation(&node, Format::Json) {
        Ok(text) => println!("unexpected: {}", text),
        Err(err) => println!("Cycle rejected: {}", err),
    }
    node.borrow_mut().next = None;

    Ok(())
}
