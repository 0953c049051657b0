//! Grammar of both notations as implemented by this crate.
//!
//! This module has no code. It is the reference for anyone writing a second
//! implementation that must exchange text with this one: the same declared
//! field order and the same input structure produce byte-identical output.
//!
//! # Shared scalars
//!
//! | Kind | Syntax | Example |
//! |------|--------|---------|
//! | Null | `null` | `null` |
//! | Boolean | `true` / `false` | `true` |
//! | Integer | run of `-+0-9.eE` without `.`, `e`, `E` | `-42` |
//! | Float | same run containing `.`, `e` or `E` | `1.0`, `1e0`, `2.5E-3` |
//! | Text | double-quoted with escapes | `"a\"b"` |
//!
//! Keywords are case-sensitive. An integer outside the 64-bit signed range is
//! rejected rather than widened. Floats are always written with a `.` or an
//! exponent so they read back as floats; non-finite floats are written `null`.
//!
//! ## Escapes
//!
//! Read: `\n \r \t \b \f \" \\ \/` and `\uXXXX`, where a high surrogate must be
//! followed by a `\uXXXX` low surrogate. Any other escaped character stands for
//! itself (`\q` reads as `q`).
//!
//! Written: `\" \\ \n \r \t \b \f`, and `\u00xx` with lowercase hex for the
//! remaining control characters below `0x20`. Everything else is written as is.
//!
//! # JSON
//!
//! ```text
//! value   := ws (object | array | scalar) ws
//! object  := "{" ws (string ws ":" value ("," ws string ws ":" value)*)? ws "}"
//! array   := "[" (value ("," value)*)? ws "]"
//! ws      := any character <= U+0020
//! ```
//!
//! Output is compact: no whitespace is inserted. Object keys keep insertion
//! order; a repeated key keeps its first position and its last value.
//!
//! # TOON
//!
//! ```text
//! document   := object(0) | table(0) | inline
//! object(L)  := entry(L)+
//! entry(L)   := indent(L) key ":" ( SP inline
//!                                 | SP table(L)
//!                                 | NEWLINE object(L+1)? )
//! table(L)   := "[" count "]" "{" (key ("," key)*)? "}" ":" (NEWLINE indent(L+1) row)*
//! row        := inline ("," SP? inline)*
//! inline     := scalar
//!             | "[" (inline ("," SP? inline)*)? "]"
//!             | "{" (key ":" SP? inline ("," SP? key ":" SP? inline)*)? "}"
//! key        := identifier | quoted-string
//! identifier := [A-Za-z_][A-Za-z0-9_.]*
//! indent(L)  := 2*L spaces
//! ```
//!
//! ## Indentation
//!
//! - The unit is two spaces. An odd count, or a tab among the leading
//!   whitespace, is an error.
//! - Blank lines are ignored anywhere.
//! - A block ends at the first line that is less indented; that line belongs
//!   to an enclosing block. A line more indented than its block allows is an
//!   error.
//!
//! ## Objects
//!
//! ```text
//! name: "Ada"
//! address:
//!   city: "Oslo"
//!   zip: "0150"
//! flags: {}
//! ```
//!
//! `key:` with nothing after the colon opens a nested object. When no deeper
//! line follows, the value is an empty mapping. Empty mappings are written
//! `{}` inline.
//!
//! ## Tables
//!
//! A sequence of mappings that all have the same keys in the same order:
//!
//! ```text
//! people: [2]{name,age}:
//!   "Al", 30
//!   "Bo", 25
//! ```
//!
//! - Rows sit one level below the line holding the header.
//! - Every row has exactly one cell per column. Cells joined by `", "` on
//!   output; the space is optional on input.
//! - Nested mappings and sequences inside a cell use the inline forms.
//! - By default the declared count must equal the number of rows. With
//!   [`Options::with_strict_table_count(false)`](crate::Options::with_strict_table_count)
//!   the count is informational.
//! - A table with no columns has no row lines and stands for `count` empty
//!   mappings: `[3]{}:`.
//! - A count above [`Options::max_table_rows`](crate::Options::max_table_rows)
//!   is rejected where it is declared.
//!
//! ## Other sequences
//!
//! | Elements | Written as |
//! |----------|------------|
//! | none | `[]` |
//! | all scalars | `[1, "a", null]` |
//! | all sequences | `[[1, 2], [3]]` |
//! | anything else | rejected, see [`Error::Heterogeneous`](crate::Error::Heterogeneous) |
//!
//! ## Strings
//!
//! Text is always quoted in TOON. A bare word other than `true`, `false` or
//! `null` in value position is an error.
//!
//! # Framing
//!
//! ```text
//! frame := length:u32-big-endian  utf8-bytes[length]
//! ```
//!
//! The payload is the output of [`to_notation`](crate::to_notation) in the
//! chosen notation. Streams refuse a length above
//! [`Options::max_frame_len`](crate::Options::max_frame_len) before reading
//! the payload.
