//! JSON parsing and serialization.
//!
//! The parser is a hand-written recursive descent over a [`Cursor`]. It keeps
//! integers and floats apart (a token is a float iff it contains `.`, `e` or
//! `E`) and preserves key order through [`Mapping`].
//!
//! The serializer writes compact JSON with no inserted whitespace, or indented
//! JSON via [`to_string_pretty`].
//!
//! ```rust
//! use object_notation::{json, Value};
//!
//! let v = json::parse(r#"{"id": 1, "ratio": 1.0, "tags": ["a"]}"#).unwrap();
//! assert_eq!(v.get("id"), Some(&Value::Int(1)));
//! assert_eq!(v.get("ratio"), Some(&Value::Float(1.0)));
//! assert_eq!(json::to_string(&v).unwrap(), r#"{"id":1,"ratio":1.0,"tags":["a"]}"#);
//! ```

use crate::scalar::{self, Cursor};
use crate::{Mapping, Options, Result, Value};

/// Parses a complete JSON document.
///
/// Leading and trailing whitespace is allowed; anything else after the value
/// is an error.
pub fn parse(text: &str) -> Result<Value> {
    parse_with_options(text, &Options::default())
}

/// Parses a complete JSON document honoring `options.max_depth`.
pub fn parse_with_options(text: &str, options: &Options) -> Result<Value> {
    let mut parser = Parser::new(Cursor::new(text), options.max_depth);
    parser.skip_whitespace();
    if parser.cursor.at_end() {
        return Err(parser.cursor.error("JSON value"));
    }
    let value = parser.parse_value()?;
    parser.skip_whitespace();
    if !parser.cursor.at_end() {
        return Err(parser.cursor.error("end of input"));
    }
    Ok(value)
}

/// Parses one value starting at byte offset `*position` and advances the
/// offset past it. Text after the value is left for the caller.
///
/// # Examples
///
/// ```rust
/// use object_notation::{json, Value};
///
/// let text = "[1] [2.5]";
/// let mut position = 0;
/// assert_eq!(json::parse_at(text, &mut position).unwrap(), Value::Sequence(vec![Value::Int(1)]));
/// assert_eq!(position, 3);
/// assert_eq!(json::parse_at(text, &mut position).unwrap(), Value::Sequence(vec![Value::Float(2.5)]));
/// assert_eq!(position, text.len());
/// ```
pub fn parse_at(text: &str, position: &mut usize) -> Result<Value> {
    let mut parser = Parser::new(Cursor::at(text, *position)?, Options::default().max_depth);
    let value = parser.parse_value()?;
    *position = parser.cursor.position();
    Ok(value)
}

/// Serializes a value as compact JSON.
pub fn to_string(value: &Value) -> Result<String> {
    let mut out = String::with_capacity(128);
    write_compact(&mut out, value);
    Ok(out)
}

/// Serializes a value as indented JSON, `indent` spaces per level.
///
/// # Examples
///
/// ```rust
/// use object_notation::{json, value};
///
/// let text = json::to_string_pretty(&value!({"a": [1, 2]}), 2).unwrap();
/// assert_eq!(text, "{\n  \"a\": [\n    1,\n    2\n  ]\n}");
/// ```
pub fn to_string_pretty(value: &Value, indent: usize) -> Result<String> {
    let mut out = String::with_capacity(256);
    write_pretty(&mut out, value, indent, 0);
    Ok(out)
}

/// Serializes with the layout chosen by `options.pretty`.
pub fn to_string_with_options(value: &Value, options: &Options) -> Result<String> {
    if options.pretty {
        to_string_pretty(value, options.indent)
    } else {
        to_string(value)
    }
}

struct Parser<'a> {
    cursor: Cursor<'a>,
    depth: usize,
    max_depth: usize,
}

impl<'a> Parser<'a> {
    fn new(cursor: Cursor<'a>, max_depth: usize) -> Self {
        Parser {
            cursor,
            depth: 0,
            max_depth,
        }
    }

    /// Any character at or below space counts as whitespace.
    fn skip_whitespace(&mut self) {
        self.cursor.skip_while(|ch| ch <= ' ');
    }

    fn parse_value(&mut self) -> Result<Value> {
        self.skip_whitespace();
        match self.cursor.peek() {
            Some('{') => self.nested(Self::parse_object),
            Some('[') => self.nested(Self::parse_array),
            Some(_) => self.cursor.parse_scalar(),
            None => Err(self.cursor.error("JSON value")),
        }
    }

    fn nested(&mut self, parse: fn(&mut Self) -> Result<Value>) -> Result<Value> {
        if self.depth >= self.max_depth {
            return Err(self.cursor.error("shallower nesting"));
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    fn parse_object(&mut self) -> Result<Value> {
        self.cursor.expect('{')?;
        let mut map = Mapping::new();

        self.skip_whitespace();
        if self.cursor.eat('}') {
            return Ok(Value::Mapping(map));
        }

        loop {
            self.skip_whitespace();
            if self.cursor.peek() != Some('"') {
                return Err(self.cursor.error("quoted object key"));
            }
            let key = self.cursor.parse_quoted()?;
            self.skip_whitespace();
            self.cursor.expect(':')?;
            let value = self.parse_value()?;
            map.insert(key, value);

            self.skip_whitespace();
            if self.cursor.eat('}') {
                break;
            }
            if !self.cursor.eat(',') {
                return Err(self.cursor.error("',' or '}'"));
            }
        }

        Ok(Value::Mapping(map))
    }

    fn parse_array(&mut self) -> Result<Value> {
        self.cursor.expect('[')?;
        let mut items = Vec::new();

        self.skip_whitespace();
        if self.cursor.eat(']') {
            return Ok(Value::Sequence(items));
        }

        loop {
            items.push(self.parse_value()?);
            self.skip_whitespace();
            if self.cursor.eat(']') {
                break;
            }
            if !self.cursor.eat(',') {
                return Err(self.cursor.error("',' or ']'"));
            }
        }

        Ok(Value::Sequence(items))
    }
}

pub(crate) fn write_compact(out: &mut String, value: &Value) {
    match value {
        Value::Sequence(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_compact(out, item);
            }
            out.push(']');
        }
        Value::Mapping(map) => {
            out.push('{');
            for (i, (key, item)) in map.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                scalar::write_quoted(out, key);
                out.push(':');
                write_compact(out, item);
            }
            out.push('}');
        }
        scalar_value => scalar::write_scalar(out, scalar_value),
    }
}

fn write_pretty(out: &mut String, value: &Value, indent: usize, level: usize) {
    let pad = |out: &mut String, level: usize| out.push_str(&" ".repeat(level * indent));

    match value {
        Value::Sequence(items) if !items.is_empty() => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push('\n');
                pad(out, level + 1);
                write_pretty(out, item, indent, level + 1);
            }
            out.push('\n');
            pad(out, level);
            out.push(']');
        }
        Value::Mapping(map) if !map.is_empty() => {
            out.push('{');
            for (i, (key, item)) in map.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push('\n');
                pad(out, level + 1);
                scalar::write_quoted(out, key);
                out.push_str(": ");
                write_pretty(out, item, indent, level + 1);
            }
            out.push('\n');
            pad(out, level);
            out.push('}');
        }
        other => write_compact(out, other),
    }
}
