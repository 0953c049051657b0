//! Binding between untyped [`Value`]s and typed Rust instances.
//!
//! Two directions, both driven by declared shapes rather than reflection:
//!
//! - [`coerce`] normalizes a `Value` against a runtime [`TypeDescriptor`],
//!   producing another `Value` that has exactly the declared shape.
//! - [`Notation`] is implemented by Rust types that can be encoded and decoded.
//!   Records get theirs from a [`Schema`] of field accessors, usually written
//!   with the [`record!`](crate::record) macro.
//!
//! ```rust
//! use object_notation::{binder, value, PrimitiveKind, TypeDescriptor, Value};
//!
//! let ints = TypeDescriptor::list(TypeDescriptor::Primitive(PrimitiveKind::Int));
//! let v = binder::coerce(&value!([1, "2", 3.0]), &ints).unwrap();
//! assert_eq!(v, value!([1, 2, 3]));
//!
//! let err = binder::coerce(&value!([1, "x"]), &ints).unwrap_err();
//! assert!(err.to_string().contains("`[1]`"));
//! ```

use crate::descriptor::{CollectionKind, EnumDescriptor, PrimitiveKind, RecordDescriptor};
use crate::{scalar, CycleGuard, Error, FieldDescriptor, Mapping, Result, TypeDescriptor, Value};
use indexmap::IndexSet;
use std::cell::RefCell;
use std::collections::{BTreeSet, HashSet, VecDeque};
use std::hash::Hash;
use std::rc::Rc;
use std::sync::Arc;

/// A Rust type with a declared notation shape.
///
/// `to_value` is the traversal both serializers use; `from_value` binds a
/// parsed value back. Implementations that contain records or collections
/// must enter the [`CycleGuard`] while encoding their children.
pub trait Notation: Sized + 'static {
    /// The declared shape of this type.
    fn descriptor() -> TypeDescriptor;

    fn to_value(&self, guard: &mut CycleGuard) -> Result<Value>;

    fn from_value(value: &Value) -> Result<Self>;
}

// ---- descriptor-driven coercion ----

/// Normalizes `value` against `descriptor`.
///
/// `Null` is accepted for every descriptor and passed through. Errors are
/// [`Error::Coercion`] with the path to the failing element.
pub fn coerce(value: &Value, descriptor: &TypeDescriptor) -> Result<Value> {
    if value.is_null() {
        return Ok(Value::Null);
    }
    match descriptor {
        TypeDescriptor::Primitive(kind) => coerce_primitive(value, *kind),
        TypeDescriptor::Enum(e) => enum_variant(value, e).map(Value::from),
        TypeDescriptor::FixedArray { element, length } => {
            let items = expect_sequence(value, &descriptor.type_name())?;
            check_length(items.len(), *length)?;
            coerce_items(items, element).map(Value::Sequence)
        }
        TypeDescriptor::Collection { element, kind } => {
            let items = expect_sequence(value, &descriptor.type_name())?;
            let mut coerced = coerce_items(items, element)?;
            if *kind == CollectionKind::Set {
                let mut unique: Vec<Value> = Vec::with_capacity(coerced.len());
                for item in coerced.drain(..) {
                    if !unique.contains(&item) {
                        unique.push(item);
                    }
                }
                coerced = unique;
            }
            Ok(Value::Sequence(coerced))
        }
        TypeDescriptor::Record(record) => coerce_record(value, record),
        TypeDescriptor::Any => Ok(value.clone()),
    }
}

fn coerce_primitive(value: &Value, kind: PrimitiveKind) -> Result<Value> {
    Ok(match kind {
        PrimitiveKind::Int => Value::Int(i64::from(to_i32(value)?)),
        PrimitiveKind::Long => Value::Int(to_i64(value)?),
        PrimitiveKind::Float => Value::Float(f64::from(to_f32(value)?)),
        PrimitiveKind::Double => Value::Float(to_f64(value)?),
        PrimitiveKind::Bool => Value::Bool(to_bool(value)?),
        PrimitiveKind::String => Value::Text(to_text(value)?),
    })
}

fn coerce_items(items: &[Value], element: &TypeDescriptor) -> Result<Vec<Value>> {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| coerce(item, element).map_err(|e| e.at_index(i)))
        .collect()
}

fn coerce_record(value: &Value, record: &RecordDescriptor) -> Result<Value> {
    let map = expect_mapping(value, record.name)?;
    let mut out = Mapping::with_capacity(record.fields.len());
    for field in &record.fields {
        match map.get(field.name) {
            Some(item) => {
                let coerced = coerce(item, &field.descriptor()).map_err(|e| e.at_field(field.name))?;
                out.insert(field.name, coerced);
            }
            None if field.required => return Err(missing_field(record.name, field)),
            None => {}
        }
    }
    Ok(Value::Mapping(out))
}

fn expect_sequence<'v>(value: &'v Value, expected: &str) -> Result<&'v [Value]> {
    value
        .as_sequence()
        .map(Vec::as_slice)
        .ok_or_else(|| Error::type_mismatch(expected, value.kind_name()))
}

fn expect_mapping<'v>(value: &'v Value, record: &str) -> Result<&'v Mapping> {
    value
        .as_mapping()
        .ok_or_else(|| Error::type_mismatch(&format!("record {}", record), value.kind_name()))
}

fn check_length(found: usize, length: usize) -> Result<()> {
    if found == length {
        Ok(())
    } else {
        Err(Error::coercion(format!(
            "expected exactly {} elements, found {}",
            length, found
        )))
    }
}

fn missing_field(record: &str, field: &FieldDescriptor) -> Error {
    Error::coercion(format!("required field of {} is missing", record)).at_field(field.name)
}

// ---- scalar conversions ----

/// Largest magnitude at which every `f64` is an integer that fits in `i64`.
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

fn float_to_i64(f: f64) -> Result<i64> {
    if f.fract() == 0.0 && (-I64_BOUND..I64_BOUND).contains(&f) {
        Ok(f as i64)
    } else {
        Err(Error::coercion(format!("{} is not an integral 64-bit value", f)))
    }
}

fn to_i64(value: &Value) -> Result<i64> {
    match value {
        Value::Int(i) => Ok(*i),
        Value::Float(f) => float_to_i64(*f),
        Value::Text(s) => {
            let s = s.trim();
            match s.parse::<i64>() {
                Ok(i) => Ok(i),
                Err(_) => s
                    .parse::<f64>()
                    .map_err(|_| Error::coercion(format!("`{}` is not numeric", s)))
                    .and_then(float_to_i64),
            }
        }
        other => Err(Error::type_mismatch("long", other.kind_name())),
    }
}

fn to_i32(value: &Value) -> Result<i32> {
    let wide = match value {
        Value::Int(_) | Value::Float(_) | Value::Text(_) => to_i64(value)?,
        other => return Err(Error::type_mismatch("int", other.kind_name())),
    };
    i32::try_from(wide).map_err(|_| Error::coercion(format!("{} is out of 32-bit range", wide)))
}

/// Integers convert only when the double holds them exactly.
fn to_f64(value: &Value) -> Result<f64> {
    match value {
        Value::Int(i) => {
            let f = *i as f64;
            if f as i128 == i128::from(*i) {
                Ok(f)
            } else {
                Err(Error::coercion(format!("{} has no exact double representation", i)))
            }
        }
        Value::Float(f) => Ok(*f),
        Value::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| Error::coercion(format!("`{}` is not numeric", s))),
        other => Err(Error::type_mismatch("double", other.kind_name())),
    }
}

fn to_f32(value: &Value) -> Result<f32> {
    let wide = match value {
        Value::Int(_) | Value::Float(_) | Value::Text(_) => to_f64(value)?,
        other => return Err(Error::type_mismatch("float", other.kind_name())),
    };
    let narrow = wide as f32;
    if wide.is_finite() && !narrow.is_finite() {
        return Err(Error::coercion(format!("{} is out of 32-bit float range", wide)));
    }
    if value.is_int() && f64::from(narrow) != wide {
        return Err(Error::coercion(format!("{} has no exact float representation", wide)));
    }
    Ok(narrow)
}

fn to_bool(value: &Value) -> Result<bool> {
    match value {
        Value::Bool(b) => Ok(*b),
        Value::Text(s) if s.eq_ignore_ascii_case("true") => Ok(true),
        Value::Text(s) if s.eq_ignore_ascii_case("false") => Ok(false),
        Value::Text(s) => Err(Error::coercion(format!("`{}` is not a boolean", s))),
        other => Err(Error::type_mismatch("bool", other.kind_name())),
    }
}

/// Text as-is; other scalars as they would be written.
fn to_text(value: &Value) -> Result<String> {
    match value {
        Value::Text(s) => Ok(s.clone()),
        Value::Bool(_) | Value::Int(_) | Value::Float(_) => {
            let mut out = String::new();
            scalar::write_scalar(&mut out, value);
            Ok(out)
        }
        other => Err(Error::type_mismatch("string", other.kind_name())),
    }
}

fn enum_variant(value: &Value, e: &EnumDescriptor) -> Result<&'static str> {
    let text = value
        .as_str()
        .ok_or_else(|| Error::type_mismatch(&format!("enum {}", e.name), value.kind_name()))?;
    e.resolve(text)
        .ok_or_else(|| Error::coercion(format!("`{}` is not a variant of {}", text, e.name)))
}

/// Binds a value to a fieldless enum. `lookup` maps canonical variant names
/// to variants; used by [`enumeration!`](crate::enumeration).
pub fn enum_from_value<E>(
    value: &Value,
    descriptor: &EnumDescriptor,
    lookup: impl Fn(&str) -> Option<E>,
) -> Result<E> {
    let name = enum_variant(value, descriptor)?;
    lookup(name).ok_or_else(|| {
        Error::coercion(format!("`{}` is not a variant of {}", name, descriptor.name))
    })
}

// ---- Notation for std types ----

macro_rules! primitive_notation {
    ($($ty:ty => $kind:ident, $convert:expr;)*) => {
        $(
            impl Notation for $ty {
                fn descriptor() -> TypeDescriptor {
                    TypeDescriptor::Primitive(PrimitiveKind::$kind)
                }

                fn to_value(&self, _guard: &mut CycleGuard) -> Result<Value> {
                    Ok(Value::from(self.clone()))
                }

                fn from_value(value: &Value) -> Result<Self> {
                    $convert(value)
                }
            }
        )*
    };
}

primitive_notation! {
    bool => Bool, to_bool;
    i32 => Int, to_i32;
    i64 => Long, to_i64;
    f32 => Float, to_f32;
    f64 => Double, to_f64;
    String => String, to_text;
}

impl Notation for Value {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::Any
    }

    fn to_value(&self, _guard: &mut CycleGuard) -> Result<Value> {
        Ok(self.clone())
    }

    fn from_value(value: &Value) -> Result<Self> {
        Ok(value.clone())
    }
}

/// `None` is `Null`; the only type that accepts `Null`.
impl<T: Notation> Notation for Option<T> {
    fn descriptor() -> TypeDescriptor {
        T::descriptor()
    }

    fn to_value(&self, guard: &mut CycleGuard) -> Result<Value> {
        match self {
            Some(inner) => inner.to_value(guard),
            None => Ok(Value::Null),
        }
    }

    fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

macro_rules! pointer_notation {
    ($($ptr:ident),*) => {
        $(
            impl<T: Notation> Notation for $ptr<T> {
                fn descriptor() -> TypeDescriptor {
                    T::descriptor()
                }

                fn to_value(&self, guard: &mut CycleGuard) -> Result<Value> {
                    (**self).to_value(guard)
                }

                fn from_value(value: &Value) -> Result<Self> {
                    T::from_value(value).map($ptr::new)
                }
            }
        )*
    };
}

pointer_notation!(Box, Rc, Arc);

/// Shared mutable cell, typically `Rc<RefCell<T>>` in graphs that may loop.
impl<T: Notation> Notation for RefCell<T> {
    fn descriptor() -> TypeDescriptor {
        T::descriptor()
    }

    fn to_value(&self, guard: &mut CycleGuard) -> Result<Value> {
        let inner = self
            .try_borrow()
            .map_err(|e| Error::field_access("", e))?;
        inner.to_value(guard)
    }

    fn from_value(value: &Value) -> Result<Self> {
        T::from_value(value).map(RefCell::new)
    }
}

fn sequence_to_value<'a, C: 'static, T: Notation + 'a>(
    collection: &C,
    name: &str,
    items: impl Iterator<Item = &'a T>,
    guard: &mut CycleGuard,
) -> Result<Value> {
    guard.scope(collection, name, |guard| {
        items
            .enumerate()
            .map(|(i, item)| item.to_value(guard).map_err(|e| e.at_index(i)))
            .collect::<Result<Vec<_>>>()
            .map(Value::Sequence)
    })
}

fn sequence_from_value<T: Notation, C: FromIterator<T>>(value: &Value, name: &str) -> Result<C> {
    expect_sequence(value, name)?
        .iter()
        .enumerate()
        .map(|(i, item)| T::from_value(item).map_err(|e| e.at_index(i)))
        .collect()
}

macro_rules! collection_notation {
    ($($(#[$doc:meta])* $coll:ident [$($bounds:tt)*] => $kind:ident, $name:literal;)*) => {
        $(
            $(#[$doc])*
            impl<T: Notation $($bounds)*> Notation for $coll<T> {
                fn descriptor() -> TypeDescriptor {
                    TypeDescriptor::Collection {
                        element: Box::new(T::descriptor()),
                        kind: CollectionKind::$kind,
                    }
                }

                fn to_value(&self, guard: &mut CycleGuard) -> Result<Value> {
                    sequence_to_value(self, $name, self.iter(), guard)
                }

                fn from_value(value: &Value) -> Result<Self> {
                    sequence_from_value::<T, Self>(value, $name)
                }
            }
        )*
    };
}

collection_notation! {
    Vec [] => List, "list";
    VecDeque [] => List, "list";
    /// Elements are written in ascending order.
    BTreeSet [+ Ord] => Set, "set";
    /// Elements are written in the set's iteration order, which depends on the
    /// hasher's random seed: two equal sets may encode differently, even within
    /// one process. Use `BTreeSet` or `IndexSet` where the text must be stable.
    HashSet [+ Eq + Hash] => Set, "set";
    /// Elements are written in insertion order.
    IndexSet [+ Eq + Hash] => Set, "set";
}

impl<T: Notation, const N: usize> Notation for [T; N] {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::fixed_array(T::descriptor(), N)
    }

    fn to_value(&self, guard: &mut CycleGuard) -> Result<Value> {
        sequence_to_value(self, "array", self.iter(), guard)
    }

    fn from_value(value: &Value) -> Result<Self> {
        let name = format!("array of {}", N);
        check_length(expect_sequence(value, &name)?.len(), N)?;
        let items = sequence_from_value::<T, Vec<T>>(value, &name)?;
        items
            .try_into()
            .map_err(|_| Error::coercion(format!("expected exactly {} elements", N)))
    }
}

// ---- records ----

type Encode<T> = Box<dyn Fn(&T, &mut CycleGuard) -> Result<Value> + Send + Sync>;
type Decode<T> = Box<dyn Fn(&mut T, &Value) -> Result<()> + Send + Sync>;
type Transfer<T> = Box<dyn Fn(&mut T, &mut T) + Send + Sync>;

struct SchemaField<T> {
    descriptor: FieldDescriptor,
    encode: Encode<T>,
    decode: Decode<T>,
    transfer: Transfer<T>,
}

/// Declared fields of a record type `T`, in order, with their accessors.
///
/// ```rust
/// use object_notation::{binder, CycleGuard, Schema};
///
/// #[derive(Default)]
/// struct Point { x: i64, y: i64 }
///
/// let schema = Schema::<Point>::new("Point")
///     .field::<i64>("x", true, |p| &p.x, |p| &mut p.x)
///     .field::<i64>("y", true, |p| &p.y, |p| &mut p.y);
///
/// let v = schema.encode(&Point { x: 1, y: 2 }, &mut CycleGuard::new()).unwrap();
/// assert_eq!(v.to_string(), r#"{"x":1,"y":2}"#);
/// ```
pub struct Schema<T> {
    name: &'static str,
    fields: Vec<SchemaField<T>>,
}

impl<T: 'static> Schema<T> {
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Schema {
            name,
            fields: Vec::new(),
        }
    }

    /// Declares the next field. `get` and `get_mut` must reach the same place.
    #[must_use]
    pub fn field<F: Notation>(
        mut self,
        name: &'static str,
        required: bool,
        get: fn(&T) -> &F,
        get_mut: fn(&mut T) -> &mut F,
    ) -> Self {
        self.fields.push(SchemaField {
            descriptor: FieldDescriptor::new(name, required, F::descriptor),
            encode: Box::new(move |record, guard| get(record).to_value(guard)),
            decode: Box::new(move |record, value| {
                *get_mut(record) = F::from_value(value)?;
                Ok(())
            }),
            transfer: Box::new(move |target, source| {
                std::mem::swap(get_mut(target), get_mut(source));
            }),
        });
        self
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub fn descriptor(&self) -> RecordDescriptor {
        RecordDescriptor::new(self.name, self.fields.iter().map(|f| f.descriptor).collect())
    }

    /// Encodes `record` as a mapping in declared field order.
    pub fn encode(&self, record: &T, guard: &mut CycleGuard) -> Result<Value> {
        guard.scope(record, self.name, |guard| {
            let mut map = Mapping::with_capacity(self.fields.len());
            for field in &self.fields {
                let name = field.descriptor.name;
                let value = (field.encode)(record, guard).map_err(|e| e.at_field(name))?;
                map.insert(name, value);
            }
            Ok(Value::Mapping(map))
        })
    }

    /// Overwrites declared fields of `record` from a mapping.
    ///
    /// Absent optional fields keep their current value; undeclared keys are
    /// ignored.
    pub fn decode_into(&self, record: &mut T, value: &Value) -> Result<()> {
        let map = expect_mapping(value, self.name)?;
        for field in &self.fields {
            let name = field.descriptor.name;
            match map.get(name) {
                Some(item) => (field.decode)(record, item).map_err(|e| e.at_field(name))?,
                None if field.descriptor.required => {
                    return Err(missing_field(self.name, &field.descriptor))
                }
                None => {}
            }
        }
        Ok(())
    }

    /// Moves every declared field of `source` into `target`.
    pub fn transfer(&self, target: &mut T, source: &mut T) {
        for field in &self.fields {
            (field.transfer)(target, source);
        }
    }
}

/// A struct with a [`Schema`]. Generated by [`record!`](crate::record).
pub trait Record: Notation + Default {
    fn schema() -> &'static Schema<Self>;
}

/// [`Notation::to_value`] for records.
pub fn record_to_value<T: Record>(record: &T, guard: &mut CycleGuard) -> Result<Value> {
    T::schema().encode(record, guard)
}

/// [`Notation::from_value`] for records, starting from `T::default()`.
pub fn record_from_value<T: Record>(value: &Value) -> Result<T> {
    let mut record = T::default();
    T::schema().decode_into(&mut record, value)?;
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int() -> TypeDescriptor {
        TypeDescriptor::Primitive(PrimitiveKind::Int)
    }

    fn text() -> TypeDescriptor {
        TypeDescriptor::Primitive(PrimitiveKind::String)
    }

    #[test]
    fn test_null_passes_through() {
        assert_eq!(coerce(&Value::Null, &int()).unwrap(), Value::Null);
        assert_eq!(coerce(&Value::Null, &TypeDescriptor::list(int())).unwrap(), Value::Null);
    }

    #[test]
    fn test_numeric_coercion() {
        let double = TypeDescriptor::Primitive(PrimitiveKind::Double);
        assert_eq!(coerce(&Value::Int(3), &double).unwrap(), Value::Float(3.0));
        assert_eq!(coerce(&Value::Float(4.0), &int()).unwrap(), Value::Int(4));
        assert_eq!(coerce(&Value::from(" 12 "), &int()).unwrap(), Value::Int(12));
        assert!(coerce(&Value::Float(4.5), &int()).is_err());
        assert!(coerce(&Value::Int(i64::from(i32::MAX) + 1), &int()).is_err());
        let long = TypeDescriptor::Primitive(PrimitiveKind::Long);
        assert_eq!(
            coerce(&Value::Int(i64::from(i32::MAX) + 1), &long).unwrap(),
            Value::Int(2_147_483_648)
        );
        assert!(coerce(&Value::Float(1e19), &long).is_err());
    }

    #[test]
    fn test_float_narrowing_out_of_range() {
        let float = TypeDescriptor::Primitive(PrimitiveKind::Float);
        assert_eq!(coerce(&Value::Float(0.5), &float).unwrap(), Value::Float(0.5));
        assert_eq!(coerce(&Value::Int(-8), &float).unwrap(), Value::Float(-8.0));
        assert_eq!(
            coerce(&Value::Int(1 << 24), &float).unwrap(),
            Value::Float(16_777_216.0)
        );
        assert!(coerce(&Value::Int((1 << 24) + 1), &float).is_err());
        assert_eq!(
            coerce(&Value::Float(0.1), &float).unwrap(),
            Value::Float(f64::from(0.1_f32))
        );
        match coerce(&Value::Float(1e300), &float).unwrap_err() {
            Error::Coercion { message, .. } => assert!(message.contains("32-bit float range")),
            other => panic!("unexpected {:?}", other),
        }
        assert!(coerce(&Value::from("-1e39"), &float).is_err());
        assert!(f32::from_value(&Value::Float(f64::MAX)).is_err());
        assert_eq!(f32::from_value(&Value::Float(3.5)).unwrap(), 3.5_f32);
        assert!(f32::from_value(&Value::Float(f64::INFINITY))
            .unwrap()
            .is_infinite());
    }

    #[test]
    fn test_set_encode_order() {
        let sorted: BTreeSet<i64> = [3, 1, 2].into_iter().collect();
        assert_eq!(crate::to_value(&sorted).unwrap(), value!([1, 2, 3]));

        let inserted: IndexSet<i64> = [3, 1, 2].into_iter().collect();
        assert_eq!(crate::to_value(&inserted).unwrap(), value!([3, 1, 2]));

        // Hashed sets agree on membership only.
        let hashed: HashSet<i64> = [3, 1, 2].into_iter().collect();
        let encoded = crate::to_value(&hashed).unwrap();
        let mut items: Vec<i64> = encoded
            .as_sequence()
            .unwrap()
            .iter()
            .filter_map(Value::as_i64)
            .collect();
        items.sort_unstable();
        assert_eq!(items, vec![1, 2, 3]);
    }

    #[test]
    fn test_int_to_double_must_be_exact() {
        let double = TypeDescriptor::Primitive(PrimitiveKind::Double);
        let limit = 1_i64 << 53;
        assert_eq!(
            coerce(&Value::Int(limit), &double).unwrap(),
            Value::Float(9_007_199_254_740_992.0)
        );
        assert!(coerce(&Value::Int(limit + 1), &double).is_err());
        assert!(coerce(&Value::Int(i64::MAX), &double).is_err());
        assert_eq!(
            f64::from_value(&Value::Int(i64::MIN)).unwrap(),
            -9_223_372_036_854_775_808.0
        );
        assert!(f64::from_value(&Value::Int(-limit - 1)).is_err());
    }

    #[test]
    fn test_bool_and_string_coercion() {
        let boolean = TypeDescriptor::Primitive(PrimitiveKind::Bool);
        assert_eq!(coerce(&Value::from("TRUE"), &boolean).unwrap(), Value::Bool(true));
        assert!(coerce(&Value::Int(1), &boolean).is_err());
        assert_eq!(coerce(&Value::Float(2.0), &text()).unwrap(), Value::from("2.0"));
        assert_eq!(coerce(&Value::Bool(false), &text()).unwrap(), Value::from("false"));
        assert!(coerce(&value!([1]), &text()).is_err());
    }

    #[test]
    fn test_enum_coercion() {
        let color = TypeDescriptor::Enum(EnumDescriptor::new("Color", vec!["Red", "Green"]));
        for input in ["RED", "red", "Red"] {
            assert_eq!(coerce(&Value::from(input), &color).unwrap(), Value::from("Red"));
        }
        assert!(matches!(
            coerce(&Value::from("purple"), &color),
            Err(Error::Coercion { .. })
        ));
        assert!(coerce(&Value::Int(0), &color).is_err());
    }

    #[test]
    fn test_fixed_array_length() {
        let pair = TypeDescriptor::fixed_array(int(), 2);
        assert!(coerce(&value!([1, 2]), &pair).is_ok());
        assert!(coerce(&value!([1]), &pair).is_err());
        assert!(coerce(&value!([1, 2, 3]), &pair).is_err());
    }

    #[test]
    fn test_set_drops_duplicates() {
        let set = TypeDescriptor::set(int());
        assert_eq!(coerce(&value!([3, "3", 1, 3.0]), &set).unwrap(), value!([3, 1]));
    }

    #[test]
    fn test_record_coercion() {
        let person = TypeDescriptor::Record(RecordDescriptor::new(
            "Person",
            vec![
                FieldDescriptor::new("name", true, text),
                FieldDescriptor::new("age", false, int),
            ],
        ));
        let v = coerce(&value!({"extra": 1, "age": "41", "name": "Ada"}), &person).unwrap();
        assert_eq!(v.to_string(), r#"{"name":"Ada","age":41}"#);

        let v = coerce(&value!({"name": "Ada"}), &person).unwrap();
        assert_eq!(v.to_string(), r#"{"name":"Ada"}"#);

        match coerce(&value!({"age": 3}), &person).unwrap_err() {
            Error::Coercion { path, .. } => assert_eq!(path, "name"),
            other => panic!("unexpected {:?}", other),
        }
        assert!(coerce(&value!([1]), &person).is_err());
    }

    #[test]
    fn test_error_path_through_collections() {
        let people = TypeDescriptor::list(TypeDescriptor::Record(RecordDescriptor::new(
            "Person",
            vec![FieldDescriptor::new("age", true, int)],
        )));
        let err = coerce(&value!([{"age": 1}, {"age": "old"}]), &people).unwrap_err();
        match err {
            Error::Coercion { path, .. } => assert_eq!(path, "[1].age"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_any_returns_unchanged() {
        let v = value!({"k": [1, "x", null]});
        assert_eq!(coerce(&v, &TypeDescriptor::Any).unwrap(), v);
    }

    #[test]
    fn test_std_impls() {
        assert_eq!(i32::from_value(&Value::Int(5)).unwrap(), 5);
        assert!(i32::from_value(&Value::Null).is_err());
        assert_eq!(Option::<i32>::from_value(&Value::Null).unwrap(), None);
        assert_eq!(f32::from_value(&Value::Int(2)).unwrap(), 2.0);
        assert_eq!(
            Vec::<String>::from_value(&value!(["a", "b"])).unwrap(),
            vec!["a".to_string(), "b".to_string()]
        );
        assert_eq!(<[i64; 2]>::from_value(&value!([7, 8])).unwrap(), [7, 8]);
        assert!(<[i64; 2]>::from_value(&value!([7])).is_err());

        let set = BTreeSet::<i64>::from_value(&value!([2, 1, 2])).unwrap();
        assert_eq!(set.into_iter().collect::<Vec<_>>(), vec![1, 2]);

        let mut guard = CycleGuard::new();
        let v = Some(vec![1.5_f64]).to_value(&mut guard).unwrap();
        assert_eq!(v, value!([1.5]));
        assert_eq!(guard.depth(), 0);
    }

    #[test]
    fn test_refcell_already_borrowed() {
        let cell = RefCell::new(5_i64);
        let _writer = cell.borrow_mut();
        let err = cell.to_value(&mut CycleGuard::new()).unwrap_err();
        assert!(matches!(err, Error::FieldAccess { .. }));
    }
}
