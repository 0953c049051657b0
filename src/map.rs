//! Ordered map type for notation mappings.
//!
//! This module provides [`Mapping`], a wrapper around [`IndexMap`] that keeps
//! keys unique and preserves insertion order. Order is part of the contract:
//! both serializers emit keys in exactly the order they were inserted.
//!
//! Re-inserting an existing key overwrites its value in place without moving it.
//!
//! ## Examples
//!
//! ```rust
//! use object_notation::{Mapping, Value};
//!
//! let mut map = Mapping::new();
//! map.insert("name", Value::from("Alice"));
//! map.insert("age", Value::from(30));
//! map.insert("name", Value::from("Bob"));
//!
//! let keys: Vec<_> = map.keys().cloned().collect();
//! assert_eq!(keys, vec!["name", "age"]);
//! assert_eq!(map.get("name").and_then(|v| v.as_str()), Some("Bob"));
//! ```

use crate::Value;
use indexmap::IndexMap;

/// An ordered map of string keys to values.
///
/// Equality compares entries in order, so two mappings holding the same pairs
/// in a different order are not equal.
#[derive(Debug, Clone, Default)]
pub struct Mapping(IndexMap<String, Value>);

impl Mapping {
    /// Creates an empty `Mapping`.
    #[must_use]
    pub fn new() -> Self {
        Mapping(IndexMap::new())
    }

    /// Creates an empty `Mapping` with the specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Mapping(IndexMap::with_capacity(capacity))
    }

    /// Inserts a key-value pair into the map.
    ///
    /// If the map already contained this key, the value is replaced at its
    /// original position and the old value is returned.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use object_notation::{Mapping, Value};
    ///
    /// let mut map = Mapping::new();
    /// assert!(map.insert("key", Value::from(42)).is_none());
    /// assert!(map.insert("key", Value::from(43)).is_some());
    /// ```
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    /// Returns a reference to the value corresponding to the key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns a mutable reference to the value corresponding to the key.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.0.get_mut(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Removes a key, shifting later entries down so order is preserved.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.shift_remove(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the keys of the map, in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, Value> {
        self.0.keys()
    }

    /// Returns an iterator over the values of the map, in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, String, Value> {
        self.0.values()
    }

    /// Returns an iterator over the key-value pairs of the map, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Value> {
        self.0.iter()
    }

    /// Returns `true` when both maps hold the same keys in the same order.
    #[must_use]
    pub fn same_keys(&self, other: &Mapping) -> bool {
        self.len() == other.len() && self.keys().zip(other.keys()).all(|(a, b)| a == b)
    }
}

impl PartialEq for Mapping {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .zip(other.iter())
                .all(|((ka, va), (kb, vb))| ka == kb && va == vb)
    }
}

impl IntoIterator for Mapping {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Mapping {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Mapping {
    fn from_iter<T: IntoIterator<Item = (K, Value)>>(iter: T) -> Self {
        let mut map = Mapping::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}
