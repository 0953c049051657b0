//! TOON serialization.
//!
//! Writes a [`Value`] in the layout [`de`](crate::de) reads back:
//!
//! - mappings become `key: value` lines, nesting one level (two spaces) per
//!   nested mapping,
//! - a sequence of mappings that all share the same keys becomes a table,
//! - a sequence of scalars, or of sequences, is written inline as `[a, b]`,
//! - anything else inside a sequence has no TOON layout and is rejected with
//!   [`Error::Heterogeneous`].
//!
//! ```rust
//! use object_notation::{ser, value};
//!
//! let v = value!([{"name": "Al", "age": 30}, {"name": "Bo", "age": 25}]);
//! assert_eq!(ser::to_string(&v).unwrap(), "[2]{name,age}:\n  \"Al\", 30\n  \"Bo\", 25");
//!
//! let v = value!({"id": 7, "tags": ["a", "b"], "owner": {"name": "Ada"}});
//! assert_eq!(
//!     ser::to_string(&v).unwrap(),
//!     "id: 7\ntags: [\"a\", \"b\"]\nowner:\n  name: \"Ada\""
//! );
//! ```

use crate::de::is_identifier_char;
use crate::scalar;
use crate::{Error, Mapping, Result, Value};

/// Serializes a value as TOON. Output never starts or ends with whitespace.
pub fn to_string(value: &Value) -> Result<String> {
    let mut serializer = Serializer::new();
    serializer.write_document(value)?;
    Ok(serializer.into_inner())
}

struct Serializer {
    output: String,
}

/// How a sequence is laid out.
enum Layout<'v> {
    Empty,
    Inline,
    /// Rows keyed like this first element.
    Table(&'v Mapping),
}

impl Serializer {
    fn new() -> Self {
        Serializer {
            output: String::with_capacity(256),
        }
    }

    fn into_inner(self) -> String {
        self.output.trim().to_string()
    }

    fn newline(&mut self, level: usize) {
        self.output.push('\n');
        for _ in 0..level {
            self.output.push_str("  ");
        }
    }

    fn write_document(&mut self, value: &Value) -> Result<()> {
        match value {
            Value::Mapping(map) if !map.is_empty() => self.write_entries(map, 0),
            Value::Sequence(items) => self.write_sequence(items, 0),
            other => {
                self.write_inline(other);
                Ok(())
            }
        }
    }

    fn write_entries(&mut self, map: &Mapping, level: usize) -> Result<()> {
        for (key, value) in map {
            self.newline(level);
            self.write_key(key);
            self.output.push(':');
            match value {
                Value::Mapping(inner) if !inner.is_empty() => self.write_entries(inner, level + 1)?,
                Value::Sequence(items) => {
                    self.output.push(' ');
                    self.write_sequence(items, level)?;
                }
                other => {
                    self.output.push(' ');
                    self.write_inline(other);
                }
            }
        }
        Ok(())
    }

    /// Writes a sequence owned by a line at `level`; table rows go one deeper.
    fn write_sequence(&mut self, items: &[Value], level: usize) -> Result<()> {
        match classify(items)? {
            Layout::Empty => self.output.push_str("[]"),
            Layout::Inline => self.write_inline_items(items),
            Layout::Table(first) => {
                self.output.push_str(&format!("[{}]{{", items.len()));
                for (i, column) in first.keys().enumerate() {
                    if i > 0 {
                        self.output.push(',');
                    }
                    self.write_key(column);
                }
                self.output.push_str("}:");
                if first.is_empty() {
                    return Ok(());
                }
                for row in items.iter().filter_map(Value::as_mapping) {
                    self.newline(level + 1);
                    for (i, cell) in row.values().enumerate() {
                        if i > 0 {
                            self.output.push_str(", ");
                        }
                        self.write_inline(cell);
                    }
                }
            }
        }
        Ok(())
    }

    /// Single-line form of any value.
    fn write_inline(&mut self, value: &Value) {
        match value {
            Value::Sequence(items) => self.write_inline_items(items),
            Value::Mapping(map) => {
                self.output.push('{');
                for (i, (key, item)) in map.iter().enumerate() {
                    if i > 0 {
                        self.output.push_str(", ");
                    }
                    self.write_key(key);
                    self.output.push_str(": ");
                    self.write_inline(item);
                }
                self.output.push('}');
            }
            scalar_value => scalar::write_scalar(&mut self.output, scalar_value),
        }
    }

    fn write_inline_items(&mut self, items: &[Value]) {
        self.output.push('[');
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.output.push_str(", ");
            }
            self.write_inline(item);
        }
        self.output.push(']');
    }

    fn write_key(&mut self, key: &str) {
        if is_bare_key(key) {
            self.output.push_str(key);
        } else {
            scalar::write_quoted(&mut self.output, key);
        }
    }
}

fn is_bare_key(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => chars.all(is_identifier_char),
        _ => false,
    }
}

fn classify(items: &[Value]) -> Result<Layout<'_>> {
    let Some(first) = items.first() else {
        return Ok(Layout::Empty);
    };

    match first {
        Value::Mapping(columns) => {
            for item in items {
                match item {
                    Value::Mapping(row) if row.same_keys(columns) => {}
                    Value::Mapping(_) => {
                        return Err(Error::heterogeneous(
                            "table rows must share the same keys in the same order",
                        ))
                    }
                    other => return Err(mixed(first, other)),
                }
            }
            Ok(Layout::Table(columns))
        }
        Value::Sequence(_) => match items.iter().find(|item| !item.is_sequence()) {
            Some(other) => Err(mixed(first, other)),
            None => Ok(Layout::Inline),
        },
        _ => match items.iter().find(|item| !item.is_scalar()) {
            Some(other) => Err(mixed(first, other)),
            None => Ok(Layout::Inline),
        },
    }
}

fn mixed(first: &Value, other: &Value) -> Error {
    Error::heterogeneous(format!(
        "sequence mixes {} and {} elements",
        first.kind_name(),
        other.kind_name()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::de;

    #[test]
    fn test_table_literal() {
        let v = value!([{"name": "Al", "age": 30}, {"name": "Bo", "age": 25}]);
        assert_eq!(
            to_string(&v).unwrap(),
            "[2]{name,age}:\n  \"Al\", 30\n  \"Bo\", 25"
        );
    }

    #[test]
    fn test_nested_table_rows_indent_below_key() {
        let v = value!({"team": {"people": [{"n": 1}, {"n": 2}]}});
        assert_eq!(
            to_string(&v).unwrap(),
            "team:\n  people: [2]{n}:\n    1\n    2"
        );
    }

    #[test]
    fn test_scalar_and_nested_lists() {
        let v = value!({"xs": [1, 2.5, "a", null, true], "grid": [[1, 2], [3]], "none": []});
        assert_eq!(
            to_string(&v).unwrap(),
            "xs: [1, 2.5, \"a\", null, true]\ngrid: [[1, 2], [3]]\nnone: []"
        );
    }

    #[test]
    fn test_inline_cells() {
        let v = value!([{"id": 1, "meta": {"k": "v"}, "tags": ["x"]}]);
        assert_eq!(
            to_string(&v).unwrap(),
            "[1]{id,meta,tags}:\n  1, {k: \"v\"}, [\"x\"]"
        );
    }

    #[test]
    fn test_heterogeneous_sequences() {
        for v in [
            value!([1, {"a": 1}]),
            value!([{"a": 1}, 2]),
            value!([[1], 2]),
            value!([{"a": 1}, {"b": 1}]),
            value!([{"a": 1, "b": 2}, {"b": 2, "a": 1}]),
        ] {
            assert!(matches!(to_string(&v), Err(Error::Heterogeneous { .. })));
        }
    }

    #[test]
    fn test_keys_quoted_when_needed() {
        let v = value!({"plain_key.v2": 1, "with space": 2, "": 3, "9lives": 4});
        assert_eq!(
            to_string(&v).unwrap(),
            "plain_key.v2: 1\n\"with space\": 2\n\"\": 3\n\"9lives\": 4"
        );
    }

    #[test]
    fn test_empty_and_scalar_documents() {
        assert_eq!(to_string(&value!({})).unwrap(), "{}");
        assert_eq!(to_string(&value!([])).unwrap(), "[]");
        assert_eq!(to_string(&value!(1.0)).unwrap(), "1.0");
        assert_eq!(to_string(&value!({"a": {}})).unwrap(), "a: {}");
    }

    #[test]
    fn test_zero_column_table() {
        let v = value!({"items": [{}, {}], "n": 1});
        let text = to_string(&v).unwrap();
        assert_eq!(text, "items: [2]{}:\nn: 1");
        assert_eq!(de::parse(&text).unwrap(), v);
    }

    #[test]
    fn test_round_trip_through_parser() {
        let v = value!({
            "name": "line\nbreak \"quoted\"",
            "nested": {"deeper": {"x": (-0.0005), "y": [1, [2, {"z": null}]]}},
            "rows": [{"a": 1, "b": "x"}, {"a": 2, "b": "y"}],
            "after": false
        });
        let text = to_string(&v).unwrap();
        assert_eq!(de::parse(&text).unwrap(), v);
    }
}
