//! Error types for notation parsing, binding and encoding.
//!
//! Every failure the codec can report is a variant of [`Error`]. Errors are
//! returned at the point of detection and propagate unchanged to the caller;
//! nothing is retried and no partial result is produced.
//!
//! ## Error Categories
//!
//! - **Parse errors**: malformed input, with byte offset, line and column
//! - **Coercion errors**: a value does not fit the target descriptor, with the
//!   path to the offending element (`items[2].owner`)
//! - **Circular references**: an instance graph loops back on itself during encode
//! - **Construct errors**: any encode failure, as seen from the capability surface
//! - **Frame / I/O errors**: the length-prefixed framing layer
//!
//! ## Examples
//!
//! ```rust
//! use object_notation::{json, Error};
//!
//! let err = json::parse("[1, 2").unwrap_err();
//! assert!(matches!(err, Error::Parse { .. }));
//! assert!(err.to_string().contains("line 1"));
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors raised by the codec.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Malformed or unexpected token.
    #[error("Parse error at line {line}, column {column} (offset {position}): expected {expected}")]
    Parse {
        expected: String,
        position: usize,
        line: usize,
        column: usize,
    },

    /// The value's shape does not match the target descriptor.
    #[error("Coercion error at `{path}`: {message}")]
    Coercion { path: String, message: String },

    /// An instance was re-entered while it was still being encoded.
    #[error("Circular reference detected in `{type_name}`")]
    CircularReference { type_name: String },

    /// A TOON collection mixes element kinds and has no emittable form.
    #[error("Heterogeneous collection: {detail}")]
    Heterogeneous { detail: String },

    /// A field could not be read while encoding.
    #[error("Cannot access field `{field}`: {detail}")]
    FieldAccess { field: String, detail: String },

    /// An instance or value nests deeper than the configured limit.
    #[error("Nesting exceeds the limit of {limit} levels")]
    TooDeep { limit: usize },

    /// Encode failure as reported by the capability surface.
    #[error("Cannot construct notation: {0}")]
    Construct(Box<Error>),

    /// Malformed length-prefixed frame.
    #[error("Frame error: {0}")]
    Frame(String),

    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates a parse error at a known position.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use object_notation::Error;
    ///
    /// let err = Error::parse("':'", 12, 2, 5);
    /// assert!(err.to_string().contains("line 2, column 5"));
    /// ```
    pub fn parse(expected: &str, position: usize, line: usize, column: usize) -> Self {
        Error::Parse {
            expected: expected.to_string(),
            position,
            line,
            column,
        }
    }

    /// Creates a coercion error for the element currently being bound.
    ///
    /// The path starts empty and is filled in by [`Error::at_field`] and
    /// [`Error::at_index`] as the error unwinds through enclosing records and
    /// collections.
    pub fn coercion<T: fmt::Display>(message: T) -> Self {
        Error::Coercion {
            path: String::new(),
            message: message.to_string(),
        }
    }

    /// Creates a coercion error describing a kind mismatch.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use object_notation::Error;
    ///
    /// let err = Error::type_mismatch("int", "text");
    /// assert!(err.to_string().contains("expected int, found text"));
    /// ```
    pub fn type_mismatch(expected: &str, found: &str) -> Self {
        Error::coercion(format!("expected {}, found {}", expected, found))
    }

    pub fn circular_reference(type_name: &str) -> Self {
        Error::CircularReference {
            type_name: type_name.to_string(),
        }
    }

    pub fn too_deep(limit: usize) -> Self {
        Error::TooDeep { limit }
    }

    pub fn heterogeneous<T: fmt::Display>(detail: T) -> Self {
        Error::Heterogeneous {
            detail: detail.to_string(),
        }
    }

    pub fn field_access<T: fmt::Display>(field: &str, detail: T) -> Self {
        Error::FieldAccess {
            field: field.to_string(),
            detail: detail.to_string(),
        }
    }

    /// Wraps an encode failure for the capability surface.
    ///
    /// Already-wrapped errors are returned as they are, so nesting never goes
    /// deeper than one level.
    pub fn construct(source: Error) -> Self {
        match source {
            Error::Construct(_) => source,
            other => Error::Construct(Box::new(other)),
        }
    }

    pub fn frame<T: fmt::Display>(msg: T) -> Self {
        Error::Frame(msg.to_string())
    }

    /// Creates an I/O error for stream reading/writing failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Prepends a record field name to the path of a coercion or
    /// field-access error. Other errors pass through.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use object_notation::Error;
    ///
    /// let err = Error::coercion("missing").at_field("name").at_field("owner");
    /// assert!(err.to_string().contains("`owner.name`"));
    /// ```
    #[must_use]
    pub fn at_field(self, field: &str) -> Self {
        self.map_path(|path| {
            if path.is_empty() {
                field.to_string()
            } else if path.starts_with('[') {
                format!("{}{}", field, path)
            } else {
                format!("{}.{}", field, path)
            }
        })
    }

    /// Prepends a collection index to the path of a coercion or field-access
    /// error.
    #[must_use]
    pub fn at_index(self, index: usize) -> Self {
        self.map_path(|path| {
            if path.is_empty() || path.starts_with('[') {
                format!("[{}]{}", index, path)
            } else {
                format!("[{}].{}", index, path)
            }
        })
    }

    fn map_path(self, f: impl FnOnce(&str) -> String) -> Self {
        match self {
            Error::Coercion { path, message } => Error::Coercion {
                path: f(&path),
                message,
            },
            Error::FieldAccess { field, detail } => Error::FieldAccess {
                field: f(&field),
                detail,
            },
            other => other,
        }
    }

    /// Returns the wrapped error when this is a [`Error::Construct`], else itself.
    #[must_use]
    pub fn root_cause(&self) -> &Error {
        match self {
            Error::Construct(inner) => inner,
            other => other,
        }
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
