//! TOON parsing.
//!
//! TOON is indentation sensitive: two spaces per level, with a line's level
//! being its leading spaces divided by two. A document is one of
//!
//! - an object: `key: value` lines at level 0,
//! - a table: a `[count]{col,...}:` header followed by one row per line at
//!   level 1,
//! - a single inline value (`42`, `"text"`, `[1, 2]`, `{a: 1}`).
//!
//! A key followed by a bare colon opens a nested object on the following,
//! deeper lines. A key followed by a table header owns the rows one level
//! below it.
//!
//! ```rust
//! use object_notation::{de, Value};
//!
//! let text = "team: \"core\"\nmembers: [2]{name,age}:\n  \"Al\", 30\n  \"Bo\", 25";
//! let v = de::parse(text).unwrap();
//! assert_eq!(v.pointer(&["team"]).and_then(Value::as_str), Some("core"));
//!
//! let members = v.get("members").and_then(Value::as_sequence).unwrap();
//! assert_eq!(members.len(), 2);
//! assert_eq!(members[1].get("age"), Some(&Value::Int(25)));
//! ```
//!
//! Every rejection is an [`Error::Parse`](crate::Error::Parse) carrying the
//! offset, line and column where the input stopped making sense.

use crate::scalar::Cursor;
use crate::{Mapping, Options, Result, Value};

/// Parses a complete TOON document with default options.
pub fn parse(text: &str) -> Result<Value> {
    parse_with_options(text, &Options::default())
}

/// Parses a complete TOON document.
///
/// `options.strict_table_count` decides whether a table's declared row count
/// must match the rows present; `options.max_depth` bounds nesting and
/// `options.max_table_rows` bounds the count a header may declare.
///
/// # Examples
///
/// ```rust
/// use object_notation::{de, Options};
///
/// let short = "[3]{x}:\n  1\n  2";
/// assert!(de::parse(short).is_err());
///
/// let lenient = Options::new().with_strict_table_count(false);
/// let v = de::parse_with_options(short, &lenient).unwrap();
/// assert_eq!(v.as_sequence().map(Vec::len), Some(2));
/// ```
pub fn parse_with_options(text: &str, options: &Options) -> Result<Value> {
    Parser::new(text, options).parse_document()
}

struct Parser<'a> {
    cursor: Cursor<'a>,
    strict_table_count: bool,
    max_depth: usize,
    max_table_rows: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn new(text: &'a str, options: &Options) -> Self {
        Parser {
            cursor: Cursor::new(text),
            strict_table_count: options.strict_table_count,
            max_depth: options.max_depth,
            max_table_rows: options.max_table_rows,
            depth: 0,
        }
    }

    fn parse_document(&mut self) -> Result<Value> {
        self.skip_blank_lines();
        match self.line_level()? {
            None => return Err(self.cursor.error("TOON value")),
            Some(0) => {}
            Some(_) => return Err(self.indentation_error()),
        }

        let value = if is_table_header(self.cursor.rest()) {
            self.parse_table(0)?
        } else if self.at_entry() {
            Value::Mapping(self.parse_object(0)?)
        } else {
            let value = self.parse_inline()?;
            self.end_line()?;
            value
        };

        self.skip_blank_lines();
        match self.line_level()? {
            None => Ok(value),
            Some(0) => Err(self.cursor.error("end of input")),
            Some(_) => Err(self.indentation_error()),
        }
    }

    // ---- lines and indentation ----

    /// Consumes lines holding nothing but spaces, tabs and carriage returns.
    fn skip_blank_lines(&mut self) {
        loop {
            let rest = self.cursor.rest();
            let (line, terminated) = match rest.find('\n') {
                Some(end) => (&rest[..end], true),
                None => (rest, false),
            };
            if !line.chars().all(|ch| matches!(ch, ' ' | '\t' | '\r')) {
                return;
            }
            if !terminated {
                self.cursor.advance(line.len());
                return;
            }
            self.cursor.advance(line.len() + 1);
        }
    }

    /// Level of the line starting at the cursor, or `None` at end of input.
    /// Nothing is consumed unless the indentation is invalid.
    fn line_level(&mut self) -> Result<Option<usize>> {
        if self.cursor.at_end() {
            return Ok(None);
        }
        let rest = self.cursor.rest();
        let spaces = rest.bytes().take_while(|b| *b == b' ').count();
        if rest[spaces..].starts_with('\t') {
            self.cursor.advance(spaces);
            return Err(self.cursor.error("spaces for indentation, found tab"));
        }
        if spaces % 2 != 0 {
            self.cursor.advance(spaces);
            return Err(self.cursor.error("indentation in multiples of two spaces"));
        }
        Ok(Some(spaces / 2))
    }

    fn consume_indent(&mut self, level: usize) {
        self.cursor.advance(level * 2);
    }

    fn indentation_error(&mut self) -> crate::Error {
        self.cursor.skip_while(|ch| ch == ' ');
        self.cursor.error("no unexpected indentation")
    }

    fn skip_spaces(&mut self) {
        self.cursor.skip_while(|ch| ch == ' ' || ch == '\t');
    }

    /// Requires the rest of the line to be blank and consumes its newline.
    fn end_line(&mut self) -> Result<()> {
        self.cursor.skip_while(|ch| matches!(ch, ' ' | '\t' | '\r'));
        if self.cursor.at_end() || self.cursor.eat('\n') {
            Ok(())
        } else {
            Err(self.cursor.error("end of line"))
        }
    }

    fn nested<R>(&mut self, parse: impl FnOnce(&mut Self) -> Result<R>) -> Result<R> {
        if self.depth >= self.max_depth {
            return Err(self.cursor.error("shallower nesting"));
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    // ---- objects ----

    /// Whether the text at the cursor (after indentation) reads `key:`.
    fn at_entry(&self) -> bool {
        let mut lookahead = self.cursor.clone();
        lookahead.skip_while(|ch| ch == ' ');
        if parse_key(&mut lookahead).is_err() {
            return false;
        }
        lookahead.skip_while(|ch| ch == ' ' || ch == '\t');
        lookahead.peek() == Some(':')
    }

    fn parse_object(&mut self, level: usize) -> Result<Mapping> {
        let mut map = Mapping::new();

        loop {
            self.skip_blank_lines();
            let Some(current) = self.line_level()? else {
                break;
            };
            if current < level {
                break;
            }
            if current > level {
                return Err(self.indentation_error());
            }
            self.consume_indent(level);

            let key = parse_key(&mut self.cursor)?;
            self.skip_spaces();
            self.cursor.expect(':')?;
            self.skip_spaces();

            let value = match self.cursor.peek() {
                None | Some('\n') | Some('\r') => {
                    self.end_line()?;
                    self.parse_nested_object(level)?
                }
                Some('[') if is_table_header(self.cursor.rest()) => self.parse_table(level)?,
                Some(_) => {
                    let value = self.parse_inline()?;
                    self.end_line()?;
                    value
                }
            };
            map.insert(key, value);
        }

        Ok(map)
    }

    /// Body of `key:` with nothing after the colon. No deeper line means an
    /// empty mapping.
    fn parse_nested_object(&mut self, level: usize) -> Result<Value> {
        self.skip_blank_lines();
        match self.line_level()? {
            Some(next) if next > level => self
                .nested(|p| p.parse_object(level + 1))
                .map(Value::Mapping),
            _ => Ok(Value::Mapping(Mapping::new())),
        }
    }

    // ---- tables ----

    /// Parses `[count]{cols}:` at the cursor and the rows at `level + 1`.
    fn parse_table(&mut self, level: usize) -> Result<Value> {
        let header = self.cursor.clone();
        self.cursor.expect('[')?;
        let count = self.parse_count()?;
        if count > self.max_table_rows {
            return Err(header.error(&format!("at most {} table rows", self.max_table_rows)));
        }
        self.cursor.expect(']')?;
        self.cursor.expect('{')?;
        let columns = self.parse_columns()?;
        self.cursor.expect(':')?;
        self.end_line()?;

        if columns.is_empty() {
            return Ok(Value::Sequence(vec![Value::Mapping(Mapping::new()); count]));
        }

        let rows = self.nested(|p| p.parse_rows(level + 1, &columns))?;
        if self.strict_table_count && rows.len() != count {
            return Err(header.error(&format!(
                "{} rows as declared by the table header, found {}",
                count,
                rows.len()
            )));
        }
        Ok(Value::Sequence(rows))
    }

    fn parse_count(&mut self) -> Result<usize> {
        let start = self.cursor.clone();
        self.cursor.skip_while(|ch| ch.is_ascii_digit());
        let digits = &start.rest()[..self.cursor.position() - start.position()];
        digits
            .parse::<usize>()
            .map_err(|_| start.error("row count"))
    }

    fn parse_columns(&mut self) -> Result<Vec<String>> {
        let mut columns = Vec::new();
        self.skip_spaces();
        if self.cursor.eat('}') {
            return Ok(columns);
        }
        loop {
            self.skip_spaces();
            columns.push(parse_key(&mut self.cursor)?);
            self.skip_spaces();
            if self.cursor.eat('}') {
                return Ok(columns);
            }
            if !self.cursor.eat(',') {
                return Err(self.cursor.error("',' or '}' in table header"));
            }
        }
    }

    fn parse_rows(&mut self, level: usize, columns: &[String]) -> Result<Vec<Value>> {
        let mut rows = Vec::new();

        loop {
            self.skip_blank_lines();
            let Some(current) = self.line_level()? else {
                break;
            };
            if current < level {
                break;
            }
            if current > level {
                return Err(self.indentation_error());
            }
            self.consume_indent(level);

            let row_start = self.cursor.clone();
            let cells = self.parse_row()?;
            if cells.len() != columns.len() {
                return Err(row_start.error(&format!(
                    "{} cells per row, found {}",
                    columns.len(),
                    cells.len()
                )));
            }
            rows.push(Value::Mapping(
                columns.iter().cloned().zip(cells).collect::<Mapping>(),
            ));
        }

        Ok(rows)
    }

    fn parse_row(&mut self) -> Result<Vec<Value>> {
        let mut cells = vec![self.parse_inline()?];
        loop {
            self.skip_spaces();
            if !self.cursor.eat(',') {
                break;
            }
            self.skip_spaces();
            cells.push(self.parse_inline()?);
        }
        self.end_line()?;
        Ok(cells)
    }

    // ---- inline values ----

    fn parse_inline(&mut self) -> Result<Value> {
        match self.cursor.peek() {
            Some('[') => self.nested(Self::parse_inline_list),
            Some('{') => self.nested(Self::parse_inline_mapping),
            Some(_) => self.cursor.parse_scalar(),
            None => Err(self.cursor.error("value")),
        }
    }

    fn parse_inline_list(&mut self) -> Result<Value> {
        self.cursor.expect('[')?;
        let mut items = Vec::new();
        self.skip_spaces();
        if self.cursor.eat(']') {
            return Ok(Value::Sequence(items));
        }
        loop {
            self.skip_spaces();
            items.push(self.parse_inline()?);
            self.skip_spaces();
            if self.cursor.eat(']') {
                return Ok(Value::Sequence(items));
            }
            if !self.cursor.eat(',') {
                return Err(self.cursor.error("',' or ']'"));
            }
        }
    }

    fn parse_inline_mapping(&mut self) -> Result<Value> {
        self.cursor.expect('{')?;
        let mut map = Mapping::new();
        self.skip_spaces();
        if self.cursor.eat('}') {
            return Ok(Value::Mapping(map));
        }
        loop {
            self.skip_spaces();
            let key = parse_key(&mut self.cursor)?;
            self.skip_spaces();
            self.cursor.expect(':')?;
            self.skip_spaces();
            let value = self.parse_inline()?;
            map.insert(key, value);
            self.skip_spaces();
            if self.cursor.eat('}') {
                return Ok(Value::Mapping(map));
            }
            if !self.cursor.eat(',') {
                return Err(self.cursor.error("',' or '}'"));
            }
        }
    }
}

/// A key is a quoted string or an identifier `[A-Za-z_][A-Za-z0-9_.]*`.
fn parse_key(cursor: &mut Cursor<'_>) -> Result<String> {
    match cursor.peek() {
        Some('"') => cursor.parse_quoted(),
        Some(ch) if ch.is_ascii_alphabetic() || ch == '_' => {
            let start = cursor.position();
            let rest = cursor.rest();
            cursor.skip_while(is_identifier_char);
            Ok(rest[..cursor.position() - start].to_string())
        }
        _ => Err(cursor.error("key")),
    }
}

pub(crate) fn is_identifier_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_' || ch == '.'
}

/// `[digits]{` at the start of `text`.
fn is_table_header(text: &str) -> bool {
    let Some(after_bracket) = text.strip_prefix('[') else {
        return false;
    };
    let digits = after_bracket.bytes().take_while(u8::is_ascii_digit).count();
    digits > 0 && after_bracket[digits..].starts_with("]{")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_flat_object() {
        let v = parse("name: \"Ada\"\nage: 36\nactive: true\nscore: 9.5\nnote: null").unwrap();
        assert_eq!(
            v,
            value!({"name": "Ada", "age": 36, "active": true, "score": 9.5, "note": null})
        );
    }

    #[test]
    fn test_nested_object_and_resume_at_parent() {
        let text = "outer:\n  inner:\n    x: 1\n  y: 2\nz: 3";
        let v = parse(text).unwrap();
        assert_eq!(v, value!({"outer": {"inner": {"x": 1}, "y": 2}, "z": 3}));
    }

    #[test]
    fn test_bare_colon_without_body_is_empty_mapping() {
        let v = parse("a:\nb: 1").unwrap();
        assert_eq!(v, value!({"a": {}, "b": 1}));
    }

    #[test]
    fn test_table_at_top_level() {
        let v = parse("[2]{name,age}:\n  \"Al\", 30\n  \"Bo\", 25").unwrap();
        assert_eq!(
            v,
            value!([{"name": "Al", "age": 30}, {"name": "Bo", "age": 25}])
        );
    }

    #[test]
    fn test_table_under_key_and_sibling_after() {
        let text = "rows: [1]{a,b}:\n  1, [2, 3]\nafter: \"x\"";
        let v = parse(text).unwrap();
        assert_eq!(v, value!({"rows": [{"a": 1, "b": [2, 3]}], "after": "x"}));
    }

    #[test]
    fn test_table_cells_without_space() {
        let v = parse("[1]{a,b}:\n  1,2").unwrap();
        assert_eq!(v, value!([{"a": 1, "b": 2}]));
    }

    #[test]
    fn test_zero_column_table() {
        let v = parse("items: [2]{}:\nnext: 1").unwrap();
        assert_eq!(v, value!({"items": [{}, {}], "next": 1}));
    }

    #[test]
    fn test_cell_count_mismatch() {
        let err = parse("[1]{a,b}:\n  1").unwrap_err();
        assert!(matches!(err, Error::Parse { line: 2, .. }));
    }

    #[test]
    fn test_strict_and_lenient_row_counts() {
        let text = "[1]{a}:\n  1\n  2";
        assert!(parse(text).is_err());
        let lenient = Options::new().with_strict_table_count(false);
        assert_eq!(
            parse_with_options(text, &lenient).unwrap(),
            value!([{"a": 1}, {"a": 2}])
        );
    }

    #[test]
    fn test_odd_indentation() {
        let err = parse("a:\n   b: 1").unwrap_err();
        match err {
            Error::Parse { line, column, .. } => assert_eq!((line, column), (2, 4)),
            other => panic!("unexpected {:?}", other),
        }
        assert!(parse(" a: 1").is_err());
    }

    #[test]
    fn test_tab_indentation() {
        assert!(parse("a:\n\tb: 1").is_err());
    }

    #[test]
    fn test_unexpected_deeper_line() {
        assert!(parse("a: 1\n  b: 2").is_err());
        assert!(parse("a:\n    b: 2").is_err());
    }

    #[test]
    fn test_inline_forms() {
        assert_eq!(parse("42").unwrap(), Value::Int(42));
        assert_eq!(parse("\"hi\"\n\n").unwrap(), Value::from("hi"));
        assert_eq!(parse("[]").unwrap(), Value::Sequence(vec![]));
        assert_eq!(parse("{}").unwrap(), Value::Mapping(Mapping::new()));
        assert_eq!(
            parse("[1, [2.0, \"x\"], {k: null}]").unwrap(),
            value!([1, [2.0, "x"], {"k": null}])
        );
    }

    #[test]
    fn test_quoted_keys() {
        let v = parse("\"first name\": \"Ada\"\n\"x\": {\"a b\": 1}").unwrap();
        assert_eq!(v, value!({"first name": "Ada", "x": {"a b": 1}}));
    }

    #[test]
    fn test_bare_words_rejected() {
        assert!(parse("name: Ada").is_err());
        assert!(parse("flag: TRUE").is_err());
    }

    #[test]
    fn test_blank_lines_and_crlf() {
        let v = parse("\r\na: 1\r\n\r\n  \nb: [1]{c}:\r\n  2\r\n").unwrap();
        assert_eq!(v, value!({"a": 1, "b": [{"c": 2}]}));
    }

    #[test]
    fn test_empty_input() {
        assert!(parse("").is_err());
        assert!(parse("  \n\n").is_err());
    }

    #[test]
    fn test_trailing_content_after_inline() {
        assert!(parse("[1, 2]\n3").is_err());
        assert!(parse("1 2").is_err());
    }

    #[test]
    fn test_depth_limit() {
        let options = Options::new().with_max_depth(2);
        assert!(parse_with_options("a:\n  b: [1]", &options).is_ok());
        assert!(parse_with_options("a:\n  b:\n    c: [1]", &options).is_err());
    }

    #[test]
    fn test_oversized_row_count() {
        let oversized = [
            "[18446744073709551615]{}:",
            "[1000000000000]{}:",
            "[99999999999999999999]{}:",
        ];
        for text in oversized {
            match parse(text).unwrap_err() {
                Error::Parse { line, .. } => assert_eq!(line, 1),
                other => panic!("unexpected {:?}", other),
            }
        }

        let options = Options::new().with_max_table_rows(3);
        assert_eq!(
            parse_with_options("[3]{}:", &options).unwrap(),
            value!([{}, {}, {}])
        );
        assert!(parse_with_options("[4]{}:", &options).is_err());
        assert!(parse_with_options("rows: [4]{x}:\n  1\n  2\n  3\n  4", &options).is_err());
    }
}
