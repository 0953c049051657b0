//! Typed records in both notations.
//!
//! Run with: cargo run --example records
//! Set RUST_LOG=object_notation=debug to see the codec's events.

use object_notation::{
    enumeration, from_notation, parse, record, render, to_notation, Error, Format, Value,
};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Default, PartialEq, Clone, Copy)]
enum Role {
    #[default]
    Member,
    Admin,
}

enumeration! { Role { Member, Admin } }

#[derive(Debug, Default, PartialEq)]
struct User {
    id: i64,
    name: String,
    role: Role,
    email: Option<String>,
}

record! {
    User {
        required id: i64,
        required name: String,
        required role: Role,
        optional email: Option<String>,
    }
}

#[derive(Debug, Default, PartialEq)]
struct Team {
    name: String,
    members: Vec<User>,
}

record! {
    Team {
        required name: String,
        required members: Vec<User>,
    }
}

fn main() -> Result<(), Error> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .try_init();

    let team = Team {
        name: "platform".to_string(),
        members: vec![
            User {
                id: 1,
                name: "Alice".to_string(),
                role: Role::Admin,
                email: Some("alice@example.com".to_string()),
            },
            User {
                id: 2,
                name: "Bob".to_string(),
                role: Role::Member,
                email: None,
            },
        ],
    };

    let toon = to_notation(&team, Format::Toon)?;
    println!("TOON:\n{}\n", toon);

    let json = to_notation(&team, Format::Json)?;
    println!("JSON:\n{}\n", json);

    let from_toon: Team = from_notation(&toon, Format::Toon)?;
    let from_json: Team = from_notation(&json, Format::Json)?;
    assert_eq!(from_toon, team);
    assert_eq!(from_json, team);
    println!("✓ Both notations decode to the same team");

    // Role names match case-insensitively on the way in.
    let loose: User = from_notation("id: 3\nname: \"Cy\"\nrole: \"ADMIN\"", Format::Toon)?;
    println!("Decoded role: {:?}", loose.role);

    // Untyped access to the same text.
    let value = parse(&toon, Format::Toon)?;
    let members = value.get("members").and_then(Value::as_sequence).map_or(0, Vec::len);
    println!("Members in untyped view: {}", members);
    println!("Untyped view as JSON: {}", render(&value, Format::Json)?);

    Ok(())
}
