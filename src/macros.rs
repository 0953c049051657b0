/// Builds a [`Value`](crate::Value) from JSON-like syntax.
///
/// Keys must be string literals. Any other expression goes through
/// `Value::from`.
///
/// ```rust
/// use object_notation::{value, Value};
///
/// let v = value!({"name": "Ada", "langs": ["en", "fr"], "age": 36, "note": null});
/// assert_eq!(v.get("age"), Some(&Value::Int(36)));
/// assert_eq!(value!([]), Value::Sequence(vec![]));
/// ```
#[macro_export]
macro_rules! value {
    (null) => {
        $crate::Value::Null
    };

    (true) => {
        $crate::Value::Bool(true)
    };

    (false) => {
        $crate::Value::Bool(false)
    };

    ([]) => {
        $crate::Value::Sequence(vec![])
    };

    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::Sequence(vec![$($crate::value!($elem)),*])
    };

    ({}) => {
        $crate::Value::Mapping($crate::Mapping::new())
    };

    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut mapping = $crate::Mapping::new();
        $(
            mapping.insert($key, $crate::value!($value));
        )*
        $crate::Value::Mapping(mapping)
    }};

    ($other:expr) => {
        $crate::Value::from($other)
    };
}

/// Declares the notation schema of an existing struct.
///
/// Each field is marked `required` or `optional` and listed in the order it
/// is written. The struct must implement `Default`; decoding starts from it,
/// so absent optional fields keep their default.
///
/// ```rust
/// use object_notation::{from_notation, record, to_notation, Format};
///
/// #[derive(Debug, Default, PartialEq)]
/// struct Person {
///     name: String,
///     age: Option<i64>,
/// }
///
/// record! {
///     Person {
///         required name: String,
///         optional age: Option<i64>,
///     }
/// }
///
/// let ada = Person { name: "Ada".into(), age: Some(36) };
/// let text = to_notation(&ada, Format::Json).unwrap();
/// assert_eq!(text, r#"{"name":"Ada","age":36}"#);
///
/// let back: Person = from_notation(r#"{"name":"Ada"}"#, Format::Json).unwrap();
/// assert_eq!(back, Person { name: "Ada".into(), age: None });
/// ```
#[macro_export]
macro_rules! record {
    ($record:ident { $($req:ident $field:ident : $ty:ty),* $(,)? }) => {
        impl $crate::Record for $record {
            fn schema() -> &'static $crate::Schema<Self> {
                static SCHEMA: ::std::sync::OnceLock<$crate::Schema<$record>> =
                    ::std::sync::OnceLock::new();
                SCHEMA.get_or_init(|| {
                    $crate::Schema::<$record>::new(stringify!($record))
                        $(
                            .field::<$ty>(
                                stringify!($field),
                                $crate::record!(@required $req),
                                |record| &record.$field,
                                |record| &mut record.$field,
                            )
                        )*
                })
            }
        }

        impl $crate::Notation for $record {
            fn descriptor() -> $crate::TypeDescriptor {
                $crate::TypeDescriptor::Record(
                    <Self as $crate::Record>::schema().descriptor(),
                )
            }

            fn to_value(&self, guard: &mut $crate::CycleGuard) -> $crate::Result<$crate::Value> {
                $crate::binder::record_to_value(self, guard)
            }

            fn from_value(value: &$crate::Value) -> $crate::Result<Self> {
                $crate::binder::record_from_value(value)
            }
        }
    };

    (@required required) => {
        true
    };

    (@required optional) => {
        false
    };
}

/// Declares the notation of an existing fieldless enum.
///
/// Variants encode as their name. Decoding matches names case-insensitively,
/// preferring an exact match.
///
/// ```rust
/// use object_notation::{enumeration, from_notation, Format};
///
/// #[derive(Debug, PartialEq)]
/// enum Color { Red, Green }
///
/// enumeration! { Color { Red, Green } }
///
/// let c: Color = from_notation("\"GREEN\"", Format::Json).unwrap();
/// assert_eq!(c, Color::Green);
/// assert!(from_notation::<Color>("\"purple\"", Format::Json).is_err());
/// ```
#[macro_export]
macro_rules! enumeration {
    ($enum:ident { $($variant:ident),* $(,)? }) => {
        impl $crate::Notation for $enum {
            fn descriptor() -> $crate::TypeDescriptor {
                $crate::TypeDescriptor::Enum($crate::enumeration!(@descriptor $enum { $($variant),* }))
            }

            fn to_value(&self, _guard: &mut $crate::CycleGuard) -> $crate::Result<$crate::Value> {
                let name = match self {
                    $($enum::$variant => stringify!($variant),)*
                };
                Ok($crate::Value::from(name))
            }

            fn from_value(value: &$crate::Value) -> $crate::Result<Self> {
                let descriptor = $crate::enumeration!(@descriptor $enum { $($variant),* });
                $crate::binder::enum_from_value(value, &descriptor, |name| match name {
                    $(stringify!($variant) => Some($enum::$variant),)*
                    _ => None,
                })
            }
        }
    };

    (@descriptor $enum:ident { $($variant:ident),* }) => {
        $crate::EnumDescriptor::new(stringify!($enum), vec![$(stringify!($variant)),*])
    };
}
