//! Lexical pieces shared by the JSON and TOON codecs.
//!
//! Both notations use the same quoted-string escapes, the same numeric-kind
//! rule and the same keywords, so the scanning lives here once:
//!
//! - [`Cursor`] walks a `&str` tracking byte offset, line and column
//! - `parse_quoted` / `parse_number` / `parse_keyword` read scalar tokens
//! - `write_quoted` / `write_float` are their inverses on the output side

use crate::{Error, Result, Value};

/// Byte cursor over an input string with line/column bookkeeping.
#[derive(Clone)]
pub(crate) struct Cursor<'a> {
    input: &'a str,
    position: usize,
    line: usize,
    column: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(input: &'a str) -> Self {
        Cursor {
            input,
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Starts a cursor at a byte offset, recomputing line and column.
    pub(crate) fn at(input: &'a str, position: usize) -> Result<Self> {
        if position > input.len() || !input.is_char_boundary(position) {
            return Err(Error::parse("a valid start position", position, 1, 1));
        }
        let prefix = &input[..position];
        let line = prefix.matches('\n').count() + 1;
        let line_start = prefix.rfind('\n').map_or(0, |i| i + 1);
        let column = prefix[line_start..].chars().count() + 1;
        Ok(Cursor {
            input,
            position,
            line,
            column,
        })
    }

    #[inline]
    pub(crate) fn position(&self) -> usize {
        self.position
    }

    #[inline]
    pub(crate) fn at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    #[inline]
    pub(crate) fn rest(&self) -> &'a str {
        &self.input[self.position..]
    }

    #[inline]
    pub(crate) fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    pub(crate) fn next_char(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    /// Consumes `ch` if it is next.
    pub(crate) fn eat(&mut self, ch: char) -> bool {
        if self.peek() == Some(ch) {
            self.next_char();
            true
        } else {
            false
        }
    }

    pub(crate) fn expect(&mut self, ch: char) -> Result<()> {
        if self.eat(ch) {
            Ok(())
        } else {
            Err(self.error(&format!("'{}'", ch)))
        }
    }

    /// Consumes at least `bytes` bytes, stopping on a char boundary.
    pub(crate) fn advance(&mut self, bytes: usize) {
        let target = self.position + bytes;
        while self.position < target && self.next_char().is_some() {}
    }

    pub(crate) fn skip_while(&mut self, pred: impl Fn(char) -> bool) {
        while let Some(ch) = self.peek() {
            if !pred(ch) {
                break;
            }
            self.next_char();
        }
    }

    /// Builds a parse error at the current position.
    pub(crate) fn error(&self, expected: &str) -> Error {
        Error::parse(expected, self.position, self.line, self.column)
    }

    /// Reads a double-quoted string, resolving escapes.
    ///
    /// Unknown escapes pass the escaped character through literally.
    pub(crate) fn parse_quoted(&mut self) -> Result<String> {
        self.expect('"')?;
        let mut result = String::new();

        loop {
            let ch = self
                .next_char()
                .ok_or_else(|| self.error("closing '\"' of string"))?;
            match ch {
                '"' => return Ok(result),
                '\\' => {
                    let escaped = self
                        .next_char()
                        .ok_or_else(|| self.error("escape sequence"))?;
                    match escaped {
                        'n' => result.push('\n'),
                        'r' => result.push('\r'),
                        't' => result.push('\t'),
                        'b' => result.push('\u{0008}'),
                        'f' => result.push('\u{000C}'),
                        'u' => result.push(self.parse_unicode_escape()?),
                        other => result.push(other),
                    }
                }
                other => result.push(other),
            }
        }
    }

    fn parse_hex4(&mut self) -> Result<u32> {
        let start = self.position;
        for _ in 0..4 {
            match self.peek() {
                Some(ch) if ch.is_ascii_hexdigit() => {
                    self.next_char();
                }
                _ => return Err(self.error("4 hex digits after \\u")),
            }
        }
        u32::from_str_radix(&self.input[start..self.position], 16)
            .map_err(|_| self.error("4 hex digits after \\u"))
    }

    fn parse_unicode_escape(&mut self) -> Result<char> {
        let first = self.parse_hex4()?;
        let code_point = match first {
            0xD800..=0xDBFF => {
                if !self.rest().starts_with("\\u") {
                    return Err(self.error("low surrogate after high surrogate"));
                }
                self.next_char();
                self.next_char();
                let low = self.parse_hex4()?;
                if !(0xDC00..=0xDFFF).contains(&low) {
                    return Err(self.error("low surrogate after high surrogate"));
                }
                0x10000 + ((first - 0xD800) << 10) + (low - 0xDC00)
            }
            0xDC00..=0xDFFF => return Err(self.error("high surrogate before low surrogate")),
            other => other,
        };
        char::from_u32(code_point).ok_or_else(|| self.error("valid unicode code point"))
    }

    /// Reads a number token. It is a float iff it contains `.`, `e` or `E`.
    pub(crate) fn parse_number(&mut self) -> Result<Value> {
        let start = self.position;
        let (line, column) = (self.line, self.column);
        self.skip_while(is_number_char);
        let token = &self.input[start..self.position];

        let invalid = || Error::parse("number", start, line, column);
        if token.is_empty() {
            return Err(invalid());
        }
        if token.contains(|c: char| matches!(c, '.' | 'e' | 'E')) {
            token.parse::<f64>().map(Value::Float).map_err(|_| invalid())
        } else {
            token
                .parse::<i64>()
                .map(Value::Int)
                .map_err(|_| Error::parse("integer within 64-bit range", start, line, column))
        }
    }

    /// Reads `true`, `false` or `null`.
    pub(crate) fn parse_keyword(&mut self) -> Result<Value> {
        let rest = self.rest();
        let (value, len) = if rest.starts_with("true") {
            (Value::Bool(true), 4)
        } else if rest.starts_with("false") {
            (Value::Bool(false), 5)
        } else if rest.starts_with("null") {
            (Value::Null, 4)
        } else {
            return Err(self.error("value"));
        };
        for _ in 0..len {
            self.next_char();
        }
        Ok(value)
    }

    /// Reads any scalar token: quoted string, number or keyword.
    pub(crate) fn parse_scalar(&mut self) -> Result<Value> {
        match self.peek() {
            Some('"') => self.parse_quoted().map(Value::Text),
            Some(ch) if ch == '-' || ch.is_ascii_digit() => self.parse_number(),
            Some('t') | Some('f') | Some('n') => self.parse_keyword(),
            _ => Err(self.error("value")),
        }
    }
}

#[inline]
fn is_number_char(ch: char) -> bool {
    matches!(ch, '0'..='9' | '-' | '+' | '.' | 'e' | 'E')
}

/// Writes `s` as a double-quoted, escaped string.
pub(crate) fn write_quoted(out: &mut String, s: &str) {
    out.push('"');
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{0008}' => out.push_str("\\b"),
            '\u{000C}' => out.push_str("\\f"),
            c if (c as u32) < 0x20 => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
}

/// Writes a float so that reading it back yields a float again.
///
/// Non-finite values have no notation and are written as `null`.
pub(crate) fn write_float(out: &mut String, f: f64) {
    if f.is_finite() {
        // Debug output is the shortest round-trip form and always keeps a
        // '.' or an exponent.
        out.push_str(&format!("{:?}", f));
    } else {
        out.push_str("null");
    }
}

/// Writes any scalar value; sequences and mappings are left to the caller.
pub(crate) fn write_scalar(out: &mut String, value: &Value) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Int(i) => out.push_str(&i.to_string()),
        Value::Float(f) => write_float(out, *f),
        Value::Text(s) => write_quoted(out, s),
        Value::Sequence(_) | Value::Mapping(_) => {}
    }
}
