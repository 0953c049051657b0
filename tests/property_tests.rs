//! Property-based tests for the round-trip guarantees of both notations.
//!
//! Generated trees stay shallow and floats stay finite; non-finite floats
//! have no notation and are written as `null`.

use object_notation::{from_notation, parse, record, render, to_notation, Format, Mapping, Value};
use proptest::prelude::*;

fn finite_float() -> impl Strategy<Value = f64> {
    prop_oneof![
        -1.0e12..1.0e12,
        prop::num::f64::NORMAL,
        Just(0.0),
        Just(-0.0),
    ]
}

fn key() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z_][a-z0-9_.]{0,8}",
        any::<String>(),
    ]
}

fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Int),
        finite_float().prop_map(Value::Float),
        any::<String>().prop_map(Value::Text),
    ]
}

fn mapping_of(inner: impl Strategy<Value = Value>) -> impl Strategy<Value = Value> {
    prop::collection::vec((key(), inner), 0..5)
        .prop_map(|entries| Value::Mapping(entries.into_iter().collect::<Mapping>()))
}

fn any_value() -> impl Strategy<Value = Value> {
    scalar().prop_recursive(4, 48, 5, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..5).prop_map(Value::Sequence),
            mapping_of(inner),
        ]
    })
}

/// A sequence of rows that all share the same columns.
fn table() -> impl Strategy<Value = Value> {
    (prop::collection::vec(key(), 0..4), 1..6usize).prop_flat_map(|(columns, rows)| {
        let mut unique: Vec<String> = Vec::new();
        for column in columns {
            if !unique.contains(&column) {
                unique.push(column);
            }
        }
        let width = unique.len();
        prop::collection::vec(prop::collection::vec(any_value(), width), rows).prop_map(
            move |cells| {
                Value::Sequence(
                    cells
                        .into_iter()
                        .map(|row| {
                            Value::Mapping(unique.iter().cloned().zip(row).collect::<Mapping>())
                        })
                        .collect(),
                )
            },
        )
    })
}

proptest! {
    #[test]
    fn prop_json_round_trip(v in any_value()) {
        let text = render(&v, Format::Json).unwrap();
        prop_assert_eq!(parse(&text, Format::Json).unwrap(), v);
    }

    #[test]
    fn prop_json_output_is_compact(v in any_value()) {
        let text = render(&v, Format::Json).unwrap();
        let reparsed = parse(&text, Format::Json).unwrap();
        prop_assert_eq!(render(&reparsed, Format::Json).unwrap(), text);
    }

    #[test]
    fn prop_toon_round_trip_when_representable(v in any_value()) {
        if let Ok(text) = render(&v, Format::Toon) {
            prop_assert_eq!(parse(&text, Format::Toon).unwrap(), v);
        }
    }

    #[test]
    fn prop_toon_tables_round_trip(rows in table()) {
        let text = render(&rows, Format::Toon).unwrap();
        prop_assert!(text.starts_with('['));
        prop_assert_eq!(parse(&text, Format::Toon).unwrap(), rows.clone());

        let mut wrapped = Mapping::new();
        wrapped.insert("rows", rows);
        let wrapped = Value::Mapping(wrapped);
        let text = render(&wrapped, Format::Toon).unwrap();
        prop_assert_eq!(parse(&text, Format::Toon).unwrap(), wrapped);
    }

    #[test]
    fn prop_numeric_kind_survives(i in any::<i64>(), f in finite_float()) {
        for format in [Format::Json, Format::Toon] {
            let text = render(&Value::Int(i), format).unwrap();
            prop_assert_eq!(parse(&text, format).unwrap(), Value::Int(i));
            let text = render(&Value::Float(f), format).unwrap();
            prop_assert!(parse(&text, format).unwrap().is_float());
        }
    }

    #[test]
    fn prop_reads_what_serde_json_writes(v in any_value()) {
        let text = serde_json::to_string(&v).unwrap();
        prop_assert_eq!(parse(&text, Format::Json).unwrap(), v);
    }

    #[test]
    fn prop_record_round_trip(
        people in prop::collection::vec(
            ("\\PC{0,12}", any::<i64>(), finite_float(), any::<bool>()),
            0..8,
        )
    ) {
        let people: Vec<Person> = people
            .into_iter()
            .map(|(name, id, score, active)| Person { name, id, score, active })
            .collect();
        for format in [Format::Json, Format::Toon] {
            let text = to_notation(&people, format).unwrap();
            prop_assert_eq!(from_notation::<Vec<Person>>(&text, format).unwrap(), people.clone());
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
struct Person {
    name: String,
    id: i64,
    score: f64,
    active: bool,
}

record! {
    Person {
        required name: String,
        required id: i64,
        required score: f64,
        required active: bool,
    }
}
