use object_notation::{
    enumeration, from_notation, from_value, record, to_notation, to_value, value, EnumDescriptor,
    Error, Format, Mapping, Notation, PrimitiveKind, Record, TypeDescriptor, Value,
};

#[test]
fn test_value_macro_primitives() {
    assert_eq!(value!(null), Value::Null);
    assert_eq!(value!(true), Value::Bool(true));
    assert_eq!(value!(false), Value::Bool(false));
    assert_eq!(value!(42), Value::Int(42));
    assert_eq!(value!(2.5), Value::Float(2.5));
    assert_eq!(value!("hello"), Value::Text("hello".to_string()));
}

#[test]
fn test_value_macro_arrays() {
    assert_eq!(value!([]), Value::Sequence(vec![]));
    assert_eq!(
        value!([1, "two", null]),
        Value::Sequence(vec![Value::Int(1), Value::from("two"), Value::Null])
    );
    assert_eq!(value!([1, 2,]), value!([1, 2]));
}

#[test]
fn test_value_macro_objects_keep_order() {
    let v = value!({"z": 1, "a": 2});
    let keys: Vec<_> = v.as_mapping().unwrap().keys().cloned().collect();
    assert_eq!(keys, vec!["z", "a"]);
    assert_eq!(value!({}), Value::Mapping(Mapping::new()));
}

#[test]
fn test_value_macro_with_variables() {
    let name = "Alice";
    let age = 30;
    let scores = vec![Value::Int(9), Value::Int(7)];
    let v = value!({"name": name, "age": age, "scores": scores, "nick": (None::<String>)});
    assert_eq!(
        render_json(&v),
        r#"{"name":"Alice","age":30,"scores":[9,7],"nick":null}"#
    );
}

fn render_json(v: &Value) -> String {
    object_notation::render(v, Format::Json).unwrap()
}

// ---- record! ----

#[derive(Debug, Default, PartialEq, Clone)]
struct Config {
    host: String,
    port: i32,
    ratio: f32,
    debug: bool,
    retries: Option<i64>,
    limits: [i64; 2],
}

record! {
    Config {
        required host: String,
        required port: i32,
        optional ratio: f32,
        optional debug: bool,
        optional retries: Option<i64>,
        optional limits: [i64; 2],
    }
}

#[test]
fn test_record_schema_declares_fields_in_order() {
    let schema = Config::schema();
    assert_eq!(schema.name(), "Config");

    let descriptor = schema.descriptor();
    let names: Vec<_> = descriptor.fields.iter().map(|f| f.name).collect();
    assert_eq!(names, vec!["host", "port", "ratio", "debug", "retries", "limits"]);

    let port = descriptor.field("port").unwrap();
    assert!(port.required);
    assert_eq!(port.descriptor(), TypeDescriptor::Primitive(PrimitiveKind::Int));

    let limits = descriptor.field("limits").unwrap();
    assert!(!limits.required);
    assert_eq!(limits.descriptor().type_name(), "long[2]");
}

#[test]
fn test_record_schema_is_shared() {
    assert!(std::ptr::eq(Config::schema(), Config::schema()));
}

#[test]
fn test_record_encoding() {
    let config = Config {
        host: "localhost".to_string(),
        port: 8080,
        ratio: 0.5,
        debug: true,
        retries: None,
        limits: [1, 10],
    };
    assert_eq!(
        to_value(&config).unwrap(),
        value!({
            "host": "localhost",
            "port": 8080,
            "ratio": 0.5,
            "debug": true,
            "retries": null,
            "limits": [1, 10]
        })
    );
    assert_eq!(
        to_notation(&config, Format::Toon).unwrap(),
        "host: \"localhost\"\nport: 8080\nratio: 0.5\ndebug: true\nretries: null\nlimits: [1, 10]"
    );
}

#[test]
fn test_record_decoding_defaults_and_errors() {
    let config: Config = from_value(&value!({"host": "h", "port": 1})).unwrap();
    assert_eq!(
        config,
        Config {
            host: "h".to_string(),
            port: 1,
            ..Config::default()
        }
    );

    let err = from_value::<Config>(&value!({"host": "h", "port": 1, "limits": [1]})).unwrap_err();
    match err {
        Error::Coercion { path, .. } => assert_eq!(path, "limits"),
        other => panic!("unexpected {:?}", other),
    }

    let err = from_notation::<Config>("port: 1", Format::Toon).unwrap_err();
    assert!(err.to_string().contains("`host`"));
}

// ---- enumeration! ----

#[derive(Debug, PartialEq, Clone, Copy)]
enum Level {
    Debug,
    Info,
    Warn,
}

enumeration! { Level { Debug, Info, Warn } }

#[test]
fn test_enumeration_descriptor() {
    assert_eq!(
        Level::descriptor(),
        TypeDescriptor::Enum(EnumDescriptor::new("Level", vec!["Debug", "Info", "Warn"]))
    );
}

#[test]
fn test_enumeration_round_trip() {
    let levels = vec![Level::Warn, Level::Debug];
    let json = to_notation(&levels, Format::Json).unwrap();
    assert_eq!(json, r#"["Warn","Debug"]"#);
    assert_eq!(from_notation::<Vec<Level>>(&json, Format::Json).unwrap(), levels);
}

#[test]
fn test_enumeration_case_insensitive() {
    for text in ["\"info\"", "\"INFO\"", "\"iNfO\""] {
        assert_eq!(from_notation::<Level>(text, Format::Toon).unwrap(), Level::Info);
    }
    assert!(from_notation::<Level>("\"verbose\"", Format::Toon).is_err());
    assert!(from_notation::<Level>("1", Format::Toon).is_err());
}
