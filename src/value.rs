//! Untyped value representation shared by both notations.
//!
//! This module provides the [`Value`] enum: the format-agnostic tree every
//! parser produces and every serializer consumes. Values are ephemeral. They
//! are created by one parser call and consumed by one binder or serializer
//! call, and never shared across calls.
//!
//! ## Numeric kinds
//!
//! Integers and floats are distinct variants. Parsers decide the kind from the
//! token (`1` is [`Value::Int`], `1.0` and `1e0` are [`Value::Float`]) and
//! serializers write floats so the kind survives a round trip.
//!
//! ## Usage Patterns
//!
//! ```rust
//! use object_notation::{value, Value};
//! use std::convert::TryFrom;
//!
//! let v = value!({
//!     "name": "Alice",
//!     "age": 30,
//!     "tags": ["admin", "ops"]
//! });
//!
//! let obj = v.as_mapping().unwrap();
//! assert_eq!(obj.get("age").and_then(Value::as_i64), Some(30));
//! assert_eq!(i64::try_from(Value::from(42)).unwrap(), 42);
//! ```

use crate::Mapping;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Any value either notation can express.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Sequence(Vec<Value>),
    Mapping(Mapping),
}

impl Value {
    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    #[inline]
    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_int(&self) -> bool {
        matches!(self, Value::Int(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_float(&self) -> bool {
        matches!(self, Value::Float(_))
    }

    /// Returns `true` for either numeric kind.
    #[inline]
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, Value::Int(_) | Value::Float(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_text(&self) -> bool {
        matches!(self, Value::Text(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_sequence(&self) -> bool {
        matches!(self, Value::Sequence(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_mapping(&self) -> bool {
        matches!(self, Value::Mapping(_))
    }

    /// Returns `true` for values that carry no nested structure.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use object_notation::Value;
    ///
    /// assert!(Value::Null.is_scalar());
    /// assert!(Value::from("x").is_scalar());
    /// assert!(!Value::Sequence(vec![]).is_scalar());
    /// ```
    #[inline]
    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        !matches!(self, Value::Sequence(_) | Value::Mapping(_))
    }

    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// If the value is an integer, or a float with no fractional part that
    /// fits in `i64`, returns it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use object_notation::Value;
    ///
    /// assert_eq!(Value::Int(42).as_i64(), Some(42));
    /// assert_eq!(Value::Float(42.0).as_i64(), Some(42));
    /// assert_eq!(Value::Float(42.5).as_i64(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            Value::Float(f) => {
                if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64 {
                    Some(*f as i64)
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    /// If the value is numeric, returns it as `f64`.
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_sequence(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Sequence(items) => Some(items),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Value::Mapping(map) => Some(map),
            _ => None,
        }
    }

    /// Looks up a key when the value is a mapping.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_mapping().and_then(|map| map.get(key))
    }

    /// Follows a chain of keys through nested mappings.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use object_notation::value;
    ///
    /// let v = value!({"owner": {"address": {"city": "Oslo"}}});
    /// let city = v.pointer(&["owner", "address", "city"]);
    /// assert_eq!(city.and_then(|c| c.as_str()), Some("Oslo"));
    /// assert!(v.pointer(&["owner", "missing"]).is_none());
    /// ```
    #[must_use]
    pub fn pointer(&self, keys: &[&str]) -> Option<&Value> {
        keys.iter().try_fold(self, |current, key| current.get(key))
    }

    /// Whether containers nest more than `limit` levels, the outermost
    /// container counting as one. Stops looking once past the limit.
    ///
    /// ```rust
    /// use object_notation::value;
    ///
    /// let v = value!({"a": [1, {"b": 2}]});
    /// assert!(!v.nests_deeper_than(3));
    /// assert!(v.nests_deeper_than(2));
    /// assert!(!value!(7).nests_deeper_than(0));
    /// ```
    #[must_use]
    pub fn nests_deeper_than(&self, limit: usize) -> bool {
        match self {
            Value::Sequence(items) => {
                limit == 0 || items.iter().any(|item| item.nests_deeper_than(limit - 1))
            }
            Value::Mapping(map) => {
                limit == 0 || map.values().any(|item| item.nests_deeper_than(limit - 1))
            }
            _ => false,
        }
    }

    /// Short name of the variant, used in error messages.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Text(_) => "text",
            Value::Sequence(_) => "sequence",
            Value::Mapping(_) => "mapping",
        }
    }
}

impl fmt::Display for Value {
    /// Formats the value as compact JSON.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        crate::json::write_compact(&mut out, self);
        f.write_str(&out)
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(i) => serializer.serialize_i64(*i),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::Text(s) => serializer.serialize_str(s),
            Value::Sequence(items) => {
                use serde::ser::SerializeSeq;
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for element in items {
                    seq.serialize_element(element)?;
                }
                seq.end()
            }
            Value::Mapping(map) => {
                use serde::ser::SerializeMap;
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (k, v) in map.iter() {
                    out.serialize_entry(k, v)?;
                }
                out.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct ValueVisitor;

        impl<'de> Visitor<'de> for ValueVisitor {
            type Value = Value;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("any notation value")
            }

            fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E> {
                Ok(Value::Bool(value))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E> {
                Ok(Value::Int(value))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E> {
                match i64::try_from(value) {
                    Ok(i) => Ok(Value::Int(i)),
                    Err(_) => Ok(Value::Float(value as f64)),
                }
            }

            fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E> {
                Ok(Value::Float(value))
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E> {
                Ok(Value::Text(value.to_string()))
            }

            fn visit_string<E>(self, value: String) -> Result<Self::Value, E> {
                Ok(Value::Text(value))
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E> {
                Ok(Value::Null)
            }

            fn visit_none<E>(self) -> Result<Self::Value, E> {
                Ok(Value::Null)
            }

            fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                Deserialize::deserialize(deserializer)
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let mut vec = Vec::new();
                while let Some(elem) = seq.next_element()? {
                    vec.push(elem);
                }
                Ok(Value::Sequence(vec))
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                let mut values = Mapping::new();
                while let Some((key, value)) = map.next_entry::<String, Value>()? {
                    values.insert(key, value);
                }
                Ok(Value::Mapping(values))
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}

impl TryFrom<Value> for i64 {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        value
            .as_i64()
            .ok_or_else(|| crate::Error::type_mismatch("integer", value.kind_name()))
    }
}

impl TryFrom<Value> for f64 {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        value
            .as_f64()
            .ok_or_else(|| crate::Error::type_mismatch("number", value.kind_name()))
    }
}

impl TryFrom<Value> for bool {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        value
            .as_bool()
            .ok_or_else(|| crate::Error::type_mismatch("bool", value.kind_name()))
    }
}

impl TryFrom<Value> for String {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::Text(s) => Ok(s),
            other => Err(crate::Error::type_mismatch("text", other.kind_name())),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

macro_rules! from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::Int(i64::from(value))
                }
            }
        )*
    };
}

from_integer!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float(f64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::Sequence(value)
    }
}

impl From<Mapping> for Value {
    fn from(value: Mapping) -> Self {
        Value::Mapping(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}
