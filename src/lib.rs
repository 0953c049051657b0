//! # object_notation
//!
//! Two interchangeable text notations for structured data, and the machinery
//! to move typed Rust records in and out of them.
//!
//! - **JSON**: the usual object/array/scalar grammar, written compactly.
//! - **TOON**: an indentation-based notation with a table form for lists of
//!   uniform records.
//!
//! Every conversion passes through [`Value`], an untyped tree whose mappings
//! keep insertion order and whose numbers remember whether they were integers
//! or floats.
//!
//! ## Typed records
//!
//! ```rust
//! use object_notation::{from_notation, record, to_notation, Format};
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct Person {
//!     name: String,
//!     age: i64,
//! }
//!
//! record! {
//!     Person {
//!         required name: String,
//!         required age: i64,
//!     }
//! }
//!
//! let people = vec![
//!     Person { name: "Al".into(), age: 30 },
//!     Person { name: "Bo".into(), age: 25 },
//! ];
//!
//! let toon = to_notation(&people, Format::Toon).unwrap();
//! assert_eq!(toon, "[2]{name,age}:\n  \"Al\", 30\n  \"Bo\", 25");
//!
//! let json = to_notation(&people, Format::Json).unwrap();
//! assert_eq!(json, r#"[{"name":"Al","age":30},{"name":"Bo","age":25}]"#);
//!
//! let back: Vec<Person> = from_notation(&toon, Format::Toon).unwrap();
//! assert_eq!(back, people);
//! ```
//!
//! ## Untyped values
//!
//! ```rust
//! use object_notation::{parse, render, value, Format, Value};
//!
//! let v = parse("id: 1\nratio: 1.0", Format::Toon).unwrap();
//! assert_eq!(v, value!({"id": 1, "ratio": 1.0}));
//! assert_eq!(render(&v, Format::Json).unwrap(), r#"{"id":1,"ratio":1.0}"#);
//! ```
//!
//! ## Persistence hand-off
//!
//! [`write_framed`] and [`read_framed`] wrap the text in a 4-byte big-endian
//! length prefix; [`restore_from_notation`] and [`apply_in_place`] load saved
//! state into an instance that already exists.
//!
//! ## Logging
//!
//! The capability functions emit `tracing` events at `debug` level. No
//! subscriber is installed by the crate.
//!
//! ## Safety
//!
//! - No `unsafe` code
//! - All state is local to one call, so every function is reentrant
//! - Errors are returned at the point of detection with nothing retried

#[macro_use]
mod macros;

pub mod binder;
pub mod de;
pub mod descriptor;
pub mod error;
pub mod frame;
pub mod grammar;
pub mod guard;
pub mod json;
pub mod map;
pub mod options;
pub mod ser;
pub mod value;

mod scalar;

pub use binder::{Notation, Record, Schema};
pub use descriptor::{
    CollectionKind, EnumDescriptor, FieldDescriptor, PrimitiveKind, RecordDescriptor,
    TypeDescriptor,
};
pub use error::{Error, Result};
pub use guard::CycleGuard;
pub use map::Mapping;
pub use options::{Format, Options};
pub use value::Value;

use std::any::type_name;
use std::io;

/// Encodes a typed instance as text.
///
/// # Examples
///
/// ```rust
/// use object_notation::{to_notation, Format};
///
/// assert_eq!(to_notation(&vec![1, 2], Format::Toon).unwrap(), "[1, 2]");
/// assert_eq!(to_notation(&vec![1, 2], Format::Json).unwrap(), "[1,2]");
/// ```
///
/// # Errors
///
/// Every failure is reported as [`Error::Construct`] wrapping the cause: a
/// [`Error::CircularReference`], an [`Error::TooDeep`] when the instance nests
/// past `max_depth` (text the decoder would refuse), an inaccessible field, or
/// a collection with no TOON layout.
pub fn to_notation<T: Notation>(instance: &T, format: Format) -> Result<String> {
    to_notation_with_options(instance, &Options::for_format(format))
}

/// Encodes a typed instance with explicit options.
pub fn to_notation_with_options<T: Notation>(instance: &T, options: &Options) -> Result<String> {
    let encoded = instance
        .to_value(&mut CycleGuard::with_max_depth(options.max_depth))
        .and_then(|value| render_with_options(&value, options));
    match encoded {
        Ok(text) => {
            tracing::debug!(
                format = %options.format,
                bytes = text.len(),
                type_name = type_name::<T>(),
                "encoded notation"
            );
            Ok(text)
        }
        Err(err) => {
            tracing::debug!(
                format = %options.format,
                type_name = type_name::<T>(),
                error = %err,
                "encode failed"
            );
            Err(Error::construct(err))
        }
    }
}

/// Decodes text into a typed instance.
///
/// # Examples
///
/// ```rust
/// use object_notation::{from_notation, Format};
///
/// let xs: Vec<i64> = from_notation("[1, 2, 3]", Format::Toon).unwrap();
/// assert_eq!(xs, vec![1, 2, 3]);
/// ```
///
/// # Errors
///
/// [`Error::Parse`] for malformed or empty text, [`Error::Coercion`] when the
/// parsed value does not fit `T`.
pub fn from_notation<T: Notation>(text: &str, format: Format) -> Result<T> {
    from_notation_with_options(text, &Options::for_format(format))
}

/// Decodes text into a typed instance with explicit options.
pub fn from_notation_with_options<T: Notation>(text: &str, options: &Options) -> Result<T> {
    let decoded = parse_with_options(text, options).and_then(|value| from_value::<T>(&value));
    match &decoded {
        Ok(_) => tracing::debug!(
            format = %options.format,
            bytes = text.len(),
            type_name = type_name::<T>(),
            "decoded notation"
        ),
        Err(err) => tracing::debug!(
            format = %options.format,
            type_name = type_name::<T>(),
            error = %err,
            "decode failed"
        ),
    }
    decoded
}

/// Reduces a typed instance to a [`Value`], rejecting cyclic instance graphs
/// and instances nesting past the default depth limit.
pub fn to_value<T: Notation>(instance: &T) -> Result<Value> {
    instance.to_value(&mut CycleGuard::with_max_depth(Options::default().max_depth))
}

/// Binds a [`Value`] to a typed instance.
pub fn from_value<T: Notation>(value: &Value) -> Result<T> {
    T::from_value(value)
}

/// Parses text in either notation into a [`Value`].
pub fn parse(text: &str, format: Format) -> Result<Value> {
    parse_with_options(text, &Options::for_format(format))
}

/// Parses text honoring `options.format`, depth limit and table-count rule.
pub fn parse_with_options(text: &str, options: &Options) -> Result<Value> {
    match options.format {
        Format::Json => json::parse_with_options(text, options),
        Format::Toon => de::parse_with_options(text, options),
    }
}

/// Writes a [`Value`] in either notation.
pub fn render(value: &Value, format: Format) -> Result<String> {
    render_with_options(value, &Options::for_format(format))
}

/// Writes a [`Value`] honoring `options.format` and JSON pretty printing.
///
/// Values nesting past `options.max_depth` fail with [`Error::TooDeep`].
pub fn render_with_options(value: &Value, options: &Options) -> Result<String> {
    if value.nests_deeper_than(options.max_depth) {
        return Err(Error::too_deep(options.max_depth));
    }
    match options.format {
        Format::Json => json::to_string_with_options(value, options),
        Format::Toon => ser::to_string(value),
    }
}

/// Overwrites every declared field of `target` with the one in `decoded`.
///
/// Fields are moved, not merged: a nested record in `target` is replaced
/// whole. Struct members the schema does not declare are left alone.
///
/// # Examples
///
/// ```rust
/// use object_notation::{apply_in_place, record};
///
/// #[derive(Default)]
/// struct Settings { volume: i64, muted: bool, session: u64 }
///
/// record! { Settings { required volume: i64, optional muted: bool } }
///
/// let mut live = Settings { volume: 3, muted: false, session: 99 };
/// apply_in_place(&mut live, Settings { volume: 7, muted: true, session: 0 });
/// assert_eq!((live.volume, live.muted, live.session), (7, true, 99));
/// ```
pub fn apply_in_place<T: Record>(target: &mut T, mut decoded: T) {
    T::schema().transfer(target, &mut decoded);
    tracing::debug!(
        type_name = type_name::<T>(),
        record = T::schema().name(),
        "applied decoded fields in place"
    );
}

/// Decodes `text` and applies it onto `target`. On error `target` is untouched.
pub fn restore_from_notation<T: Record>(target: &mut T, text: &str, format: Format) -> Result<()> {
    let decoded = from_notation::<T>(text, format)?;
    apply_in_place(target, decoded);
    Ok(())
}

/// Encodes an instance and wraps the text in a length-prefixed frame.
///
/// # Examples
///
/// ```rust
/// use object_notation::{read_framed, write_framed, Format};
///
/// let bytes = write_framed(&vec![true, false], Format::Json).unwrap();
/// assert_eq!(bytes, b"\x00\x00\x00\x0c[true,false]");
/// let back: Vec<bool> = read_framed(&bytes, Format::Json).unwrap();
/// assert_eq!(back, vec![true, false]);
/// ```
pub fn write_framed<T: Notation>(instance: &T, format: Format) -> Result<Vec<u8>> {
    let text = to_notation(instance, format)?;
    let bytes = frame::encode_frame(&text)?;
    tracing::debug!(format = %format, bytes = bytes.len(), "wrote frame");
    Ok(bytes)
}

/// Decodes a buffer holding exactly one frame.
///
/// # Errors
///
/// [`Error::Frame`] for a short buffer, a length running past the end,
/// trailing bytes or invalid UTF-8; otherwise as [`from_notation`].
pub fn read_framed<T: Notation>(bytes: &[u8], format: Format) -> Result<T> {
    let text = frame::decode_single(bytes).map_err(|err| {
        tracing::debug!(format = %format, bytes = bytes.len(), error = %err, "bad frame");
        err
    })?;
    from_notation(text, format)
}

/// Decodes one frame and applies it onto `target`.
pub fn read_framed_into<T: Record>(target: &mut T, bytes: &[u8], format: Format) -> Result<()> {
    let decoded = read_framed::<T>(bytes, format)?;
    apply_in_place(target, decoded);
    Ok(())
}

/// Writes one frame to a stream.
pub fn write_framed_to<W: io::Write, T: Notation>(
    writer: W,
    instance: &T,
    format: Format,
) -> Result<()> {
    let text = to_notation(instance, format)?;
    frame::write_frame(writer, &text)
}

/// Reads one frame from a stream, consuming exactly its bytes.
///
/// Frames announcing more than the default `max_frame_len` (16 MiB) fail with
/// [`Error::Frame`] before their payload is read.
pub fn read_framed_from<R: io::Read, T: Notation>(reader: R, format: Format) -> Result<T> {
    read_framed_from_with_options(reader, &Options::for_format(format))
}

/// Reads one frame from a stream with explicit options.
pub fn read_framed_from_with_options<R: io::Read, T: Notation>(
    reader: R,
    options: &Options,
) -> Result<T> {
    let text = frame::read_frame(reader, options.max_frame_len).map_err(|err| {
        tracing::debug!(format = %options.format, error = %err, "bad frame in stream");
        err
    })?;
    from_notation_with_options(&text, options)
}
