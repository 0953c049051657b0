//! Caller-declared shapes of typed values.
//!
//! A [`TypeDescriptor`] tells the binder what a [`Value`](crate::Value) is
//! supposed to look like. Descriptors are plain data: build them by hand for
//! runtime schemas, or take the one a Rust type reports through
//! [`Notation::descriptor`](crate::Notation::descriptor).
//!
//! Record fields resolve their descriptor through a function pointer, so a
//! record that contains itself (a linked `Node`) is described without building
//! an infinite tree.
//!
//! ```rust
//! use object_notation::{FieldDescriptor, PrimitiveKind, RecordDescriptor, TypeDescriptor};
//!
//! fn name() -> TypeDescriptor { TypeDescriptor::Primitive(PrimitiveKind::String) }
//! fn age() -> TypeDescriptor { TypeDescriptor::Primitive(PrimitiveKind::Long) }
//!
//! let person = TypeDescriptor::Record(RecordDescriptor::new(
//!     "Person",
//!     vec![FieldDescriptor::new("name", true, name), FieldDescriptor::new("age", false, age)],
//! ));
//! assert_eq!(person.type_name(), "Person");
//! assert_eq!(TypeDescriptor::list(name()).type_name(), "list<string>");
//! ```

use std::fmt;

/// Scalar kinds a record field can hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    /// 32-bit signed integer.
    Int,
    /// 64-bit signed integer.
    Long,
    /// 32-bit float.
    Float,
    /// 64-bit float.
    Double,
    Bool,
    String,
}

impl PrimitiveKind {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            PrimitiveKind::Int => "int",
            PrimitiveKind::Long => "long",
            PrimitiveKind::Float => "float",
            PrimitiveKind::Double => "double",
            PrimitiveKind::Bool => "bool",
            PrimitiveKind::String => "string",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CollectionKind {
    List,
    /// Duplicates are dropped, first occurrence wins.
    Set,
}

/// A closed set of named variants.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnumDescriptor {
    pub name: &'static str,
    pub variants: Vec<&'static str>,
}

impl EnumDescriptor {
    #[must_use]
    pub fn new(name: &'static str, variants: Vec<&'static str>) -> Self {
        EnumDescriptor { name, variants }
    }

    /// Finds the canonical variant for `text`.
    ///
    /// An exact match wins; otherwise the first case-insensitive match.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use object_notation::EnumDescriptor;
    ///
    /// let color = EnumDescriptor::new("Color", vec!["Red", "Green"]);
    /// assert_eq!(color.resolve("RED"), Some("Red"));
    /// assert_eq!(color.resolve("purple"), None);
    /// ```
    #[must_use]
    pub fn resolve(&self, text: &str) -> Option<&'static str> {
        self.variants
            .iter()
            .find(|variant| **variant == text)
            .or_else(|| {
                self.variants
                    .iter()
                    .find(|variant| variant.eq_ignore_ascii_case(text))
            })
            .copied()
    }
}

/// One declared field of a record.
#[derive(Clone, Copy)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub required: bool,
    ty: fn() -> TypeDescriptor,
}

impl FieldDescriptor {
    #[must_use]
    pub const fn new(name: &'static str, required: bool, ty: fn() -> TypeDescriptor) -> Self {
        FieldDescriptor { name, required, ty }
    }

    /// Resolves the field's descriptor.
    #[must_use]
    pub fn descriptor(&self) -> TypeDescriptor {
        (self.ty)()
    }
}

impl fmt::Debug for FieldDescriptor {
    // The element descriptor is not expanded: it may refer back to the record.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .field("required", &self.required)
            .finish()
    }
}

impl PartialEq for FieldDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.required == other.required
    }
}

/// Ordered fields of a record type.
#[derive(Clone, Debug, PartialEq)]
pub struct RecordDescriptor {
    pub name: &'static str,
    pub fields: Vec<FieldDescriptor>,
}

impl RecordDescriptor {
    #[must_use]
    pub fn new(name: &'static str, fields: Vec<FieldDescriptor>) -> Self {
        RecordDescriptor { name, fields }
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|field| field.name == name)
    }
}

/// The shape a value is bound against.
#[derive(Clone, Debug, PartialEq)]
pub enum TypeDescriptor {
    Primitive(PrimitiveKind),
    Enum(EnumDescriptor),
    FixedArray {
        element: Box<TypeDescriptor>,
        length: usize,
    },
    Collection {
        element: Box<TypeDescriptor>,
        kind: CollectionKind,
    },
    Record(RecordDescriptor),
    /// Pass the value through unconverted.
    Any,
}

impl TypeDescriptor {
    #[must_use]
    pub fn list(element: TypeDescriptor) -> Self {
        TypeDescriptor::Collection {
            element: Box::new(element),
            kind: CollectionKind::List,
        }
    }

    #[must_use]
    pub fn set(element: TypeDescriptor) -> Self {
        TypeDescriptor::Collection {
            element: Box::new(element),
            kind: CollectionKind::Set,
        }
    }

    #[must_use]
    pub fn fixed_array(element: TypeDescriptor, length: usize) -> Self {
        TypeDescriptor::FixedArray {
            element: Box::new(element),
            length,
        }
    }

    /// Human-readable name used in error messages.
    #[must_use]
    pub fn type_name(&self) -> String {
        match self {
            TypeDescriptor::Primitive(kind) => kind.name().to_string(),
            TypeDescriptor::Enum(e) => e.name.to_string(),
            TypeDescriptor::FixedArray { element, length } => {
                format!("{}[{}]", element.type_name(), length)
            }
            TypeDescriptor::Collection { element, kind } => match kind {
                CollectionKind::List => format!("list<{}>", element.type_name()),
                CollectionKind::Set => format!("set<{}>", element.type_name()),
            },
            TypeDescriptor::Record(r) => r.name.to_string(),
            TypeDescriptor::Any => "any".to_string(),
        }
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.type_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node() -> TypeDescriptor {
        TypeDescriptor::Record(RecordDescriptor::new(
            "Node",
            vec![FieldDescriptor::new("next", false, node)],
        ))
    }

    #[test]
    fn test_self_referential_record() {
        let d = node();
        let TypeDescriptor::Record(record) = &d else {
            panic!("expected record");
        };
        let next = record.field("next").unwrap().descriptor();
        assert_eq!(next.type_name(), "Node");
        assert_eq!(next, d);
    }

    #[test]
    fn test_type_names() {
        let grid = TypeDescriptor::fixed_array(
            TypeDescriptor::set(TypeDescriptor::Primitive(PrimitiveKind::Int)),
            3,
        );
        assert_eq!(grid.type_name(), "set<int>[3]");
        assert_eq!(TypeDescriptor::Any.to_string(), "any");
    }

    #[test]
    fn test_enum_exact_match_wins() {
        let e = EnumDescriptor::new("Mode", vec!["ON", "on"]);
        assert_eq!(e.resolve("on"), Some("on"));
        assert_eq!(e.resolve("On"), Some("ON"));
    }
}
