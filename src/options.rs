//! Configuration for encoding and decoding.
//!
//! This module provides:
//!
//! - [`Format`]: which notation a capability-surface call reads or writes
//! - [`Options`]: the full set of knobs, built with `with_*` methods
//!
//! ## Examples
//!
//! ```rust
//! use object_notation::{Format, Options};
//!
//! let options = Options::new()
//!     .with_format(Format::Json)
//!     .pretty()
//!     .with_indent(4);
//! assert_eq!(options.format, Format::Json);
//!
//! let lenient = Options::new().with_strict_table_count(false);
//! assert!(!lenient.strict_table_count);
//! ```

use crate::Error;
use std::fmt;
use std::str::FromStr;

/// The two interchangeable notations.
///
/// # Examples
///
/// ```rust
/// use object_notation::Format;
///
/// assert_eq!(Format::Json.content_type(), "application/json");
/// assert_eq!("TOON".parse::<Format>().unwrap(), Format::Toon);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Format {
    Json,
    #[default]
    Toon,
}

impl Format {
    /// Content type a transport would attach to text in this notation.
    #[must_use]
    pub const fn content_type(self) -> &'static str {
        match self {
            Format::Json => "application/json",
            Format::Toon => "application/toon",
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Format::Json => "json",
            Format::Toon => "toon",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Format {
    type Err = Error;

    /// Accepts the short names and the content types, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" | "application/json" => Ok(Format::Json),
            "toon" | "application/toon" => Ok(Format::Toon),
            other => Err(Error::custom(format!("unknown notation format `{}`", other))),
        }
    }
}

/// Options controlling the codecs.
///
/// TOON's two-space indent unit is part of its grammar and is not configurable;
/// `indent` and `pretty` affect JSON output only.
#[derive(Clone, Debug)]
pub struct Options {
    pub format: Format,
    pub indent: usize,
    pub pretty: bool,
    /// Reject TOON tables whose declared row count differs from the rows present.
    pub strict_table_count: bool,
    /// Deepest nesting either codec accepts, on encode and on decode.
    pub max_depth: usize,
    /// Largest row count a TOON table header may declare.
    pub max_table_rows: usize,
    /// Largest payload a frame read from a stream may announce.
    pub max_frame_len: usize,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            format: Format::default(),
            indent: 2,
            pretty: false,
            strict_table_count: true,
            max_depth: 128,
            max_table_rows: 1 << 20,
            max_frame_len: 16 << 20,
        }
    }
}

impl Options {
    /// Creates default options (TOON, strict table counts, depth limit 128).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use object_notation::{Format, Options};
    ///
    /// let options = Options::new();
    /// assert_eq!(options.format, Format::Toon);
    /// assert!(options.strict_table_count);
    /// assert_eq!(options.max_depth, 128);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Default options for one format.
    #[must_use]
    pub fn for_format(format: Format) -> Self {
        Options {
            format,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_format(mut self, format: Format) -> Self {
        self.format = format;
        self
    }

    /// Enables indented JSON output.
    #[must_use]
    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }

    /// Sets the JSON pretty-printing indent width.
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    #[must_use]
    pub fn with_strict_table_count(mut self, strict: bool) -> Self {
        self.strict_table_count = strict;
        self
    }

    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    #[must_use]
    pub fn with_max_frame_len(mut self, max_frame_len: usize) -> Self {
        self.max_frame_len = max_frame_len;
        self
    }

    #[must_use]
    pub fn with_max_table_rows(mut self, max_table_rows: usize) -> Self {
        self.max_table_rows = max_table_rows;
        self
    }
}

impl From<Format> for Options {
    fn from(format: Format) -> Self {
        Options::for_format(format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parsing() {
        assert_eq!("json".parse::<Format>().unwrap(), Format::Json);
        assert_eq!(" Application/TOON ".parse::<Format>().unwrap(), Format::Toon);
        assert!("yaml".parse::<Format>().is_err());
    }

    #[test]
    fn test_builder_chain() {
        let options = Options::for_format(Format::Json)
            .pretty()
            .with_indent(4)
            .with_max_depth(8)
            .with_max_table_rows(10)
            .with_strict_table_count(false);
        assert_eq!(options.format, Format::Json);
        assert!(options.pretty);
        assert_eq!(options.indent, 4);
        assert_eq!(options.max_depth, 8);
        assert_eq!(options.max_table_rows, 10);
        assert!(!options.strict_table_count);
    }
}
