//! Ordered map type for PHP arrays.
//!
//! This module provides [`PhpMap`], a wrapper around [`IndexMap`] that keys
//! entries by [`PhpKey`] (integer or string, like a PHP array) and maintains
//! insertion order. Key order is part of the rendered output, so a hash map
//! with unspecified iteration order would make rendering non-deterministic.
//!
//! ## Examples
//!
//! ```rust
//! use serde_phparray::{PhpMap, PhpValue};
//!
//! let mut map = PhpMap::new();
//! map.insert("name", PhpValue::from("Alice"));
//! map.push(PhpValue::from("appended")); // lands under key 0
//!
//! assert_eq!(map.len(), 2);
//! assert_eq!(map.get("name").and_then(|v| v.as_str()), Some("Alice"));
//! ```

use crate::PhpValue;
use indexmap::IndexMap;
use serde::de::{Deserialize, Deserializer, Visitor};
use serde::ser::{Serialize, Serializer};
use std::fmt;

/// A PHP array key: a non-negative (or arbitrary) integer or a string.
///
/// PHP arrays accept both in the same array; the writer renders integer keys
/// bare (`0 => ...`) and string keys quoted (`'name' => ...`).
///
/// # Examples
///
/// ```rust
/// use serde_phparray::PhpKey;
///
/// assert_eq!(PhpKey::from(0), PhpKey::Int(0));
/// assert_eq!(PhpKey::from("name"), PhpKey::String("name".to_string()));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PhpKey {
    Int(i64),
    String(String),
}

impl PhpKey {
    /// Returns `true` if this is an integer key.
    #[inline]
    #[must_use]
    pub const fn is_int(&self) -> bool {
        matches!(self, PhpKey::Int(_))
    }

    /// If this is an integer key, returns it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            PhpKey::Int(i) => Some(*i),
            PhpKey::String(_) => None,
        }
    }

    /// If this is a string key, returns a reference to it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PhpKey::String(s) => Some(s),
            PhpKey::Int(_) => None,
        }
    }
}

impl fmt::Display for PhpKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhpKey::Int(i) => write!(f, "{}", i),
            PhpKey::String(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for PhpKey {
    fn from(value: i64) -> Self {
        PhpKey::Int(value)
    }
}

impl From<i32> for PhpKey {
    fn from(value: i32) -> Self {
        PhpKey::Int(value as i64)
    }
}

impl From<u32> for PhpKey {
    fn from(value: u32) -> Self {
        PhpKey::Int(value as i64)
    }
}

impl From<usize> for PhpKey {
    fn from(value: usize) -> Self {
        PhpKey::Int(value as i64)
    }
}

impl From<String> for PhpKey {
    fn from(value: String) -> Self {
        PhpKey::String(value)
    }
}

impl From<&str> for PhpKey {
    fn from(value: &str) -> Self {
        PhpKey::String(value.to_string())
    }
}

impl Serialize for PhpKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            PhpKey::Int(i) => serializer.serialize_i64(*i),
            PhpKey::String(s) => serializer.serialize_str(s),
        }
    }
}

impl<'de> Deserialize<'de> for PhpKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct PhpKeyVisitor;

        impl<'de> Visitor<'de> for PhpKeyVisitor {
            type Value = PhpKey;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("an integer or string array key")
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E> {
                Ok(PhpKey::Int(value))
            }

            fn visit_u64<E: serde::de::Error>(self, value: u64) -> Result<Self::Value, E> {
                i64::try_from(value)
                    .map(PhpKey::Int)
                    .map_err(|_| E::custom("integer key out of range"))
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E> {
                Ok(PhpKey::String(value.to_string()))
            }

            fn visit_string<E>(self, value: String) -> Result<Self::Value, E> {
                Ok(PhpKey::String(value))
            }
        }

        deserializer.deserialize_any(PhpKeyVisitor)
    }
}

/// An insertion-ordered map of [`PhpKey`]s to PHP values.
///
/// This is a thin wrapper around [`IndexMap`] that maintains insertion order,
/// which the writer preserves in its output.
///
/// # Examples
///
/// ```rust
/// use serde_phparray::{PhpMap, PhpValue};
///
/// let mut map = PhpMap::new();
/// map.insert("first", PhpValue::from(1));
/// map.insert("second", PhpValue::from(2));
///
/// // Iteration maintains insertion order
/// let keys: Vec<_> = map.keys().cloned().collect();
/// assert_eq!(keys, vec!["first".into(), "second".into()]);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PhpMap(IndexMap<PhpKey, PhpValue>);

impl PhpMap {
    /// Creates an empty `PhpMap`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_phparray::PhpMap;
    ///
    /// let map = PhpMap::new();
    /// assert!(map.is_empty());
    /// ```
    #[must_use]
    pub fn new() -> Self {
        PhpMap(IndexMap::new())
    }

    /// Creates an empty `PhpMap` with the specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        PhpMap(IndexMap::with_capacity(capacity))
    }

    /// Inserts a key-value pair into the map.
    ///
    /// If the map already contained this key, the old value is returned and
    /// the entry keeps its original position.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_phparray::{PhpMap, PhpValue};
    ///
    /// let mut map = PhpMap::new();
    /// assert!(map.insert("key", PhpValue::from(42)).is_none());
    /// assert!(map.insert("key", PhpValue::from(43)).is_some());
    /// ```
    pub fn insert<K: Into<PhpKey>>(&mut self, key: K, value: PhpValue) -> Option<PhpValue> {
        self.0.insert(key.into(), value)
    }

    /// Appends a value under the next free non-negative integer key,
    /// matching PHP's `$array[] = $value`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_phparray::{PhpKey, PhpMap, PhpValue};
    ///
    /// let mut map = PhpMap::new();
    /// map.push(PhpValue::from("a"));
    /// map.insert(5, PhpValue::from("b"));
    /// map.push(PhpValue::from("c"));
    ///
    /// let keys: Vec<_> = map.keys().cloned().collect();
    /// assert_eq!(keys, vec![PhpKey::Int(0), PhpKey::Int(5), PhpKey::Int(6)]);
    /// ```
    pub fn push(&mut self, value: PhpValue) {
        let next = self
            .0
            .keys()
            .filter_map(PhpKey::as_int)
            .filter(|i| *i >= 0)
            .max()
            .map_or(0, |max| max + 1);
        self.0.insert(PhpKey::Int(next), value);
    }

    /// Returns a reference to the value corresponding to the key.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_phparray::{PhpMap, PhpValue};
    ///
    /// let mut map = PhpMap::new();
    /// map.insert("key", PhpValue::from(42));
    /// assert_eq!(map.get("key").and_then(|v| v.as_i64()), Some(42));
    /// ```
    #[must_use]
    pub fn get<K: Into<PhpKey>>(&self, key: K) -> Option<&PhpValue> {
        self.0.get(&key.into())
    }

    /// Returns the number of entries in the map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the map contains no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns `true` if the keys are exactly `0, 1, .., len - 1` in order.
    ///
    /// Such a map corresponds to a PHP list. The writer still numbers every
    /// entry explicitly, but the serde bridge maps list-like arrays to
    /// sequences.
    #[must_use]
    pub fn is_list(&self) -> bool {
        self.0
            .keys()
            .enumerate()
            .all(|(i, key)| key.as_int() == Some(i as i64))
    }

    /// Returns an iterator over the keys of the map, in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, PhpKey, PhpValue> {
        self.0.keys()
    }

    /// Returns an iterator over the values of the map, in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, PhpKey, PhpValue> {
        self.0.values()
    }

    /// Returns an iterator over the key-value pairs of the map, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, PhpKey, PhpValue> {
        self.0.iter()
    }
}

impl IntoIterator for PhpMap {
    type Item = (PhpKey, PhpValue);
    type IntoIter = indexmap::map::IntoIter<PhpKey, PhpValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a PhpMap {
    type Item = (&'a PhpKey, &'a PhpValue);
    type IntoIter = indexmap::map::Iter<'a, PhpKey, PhpValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<K: Into<PhpKey>> FromIterator<(K, PhpValue)> for PhpMap {
    fn from_iter<T: IntoIterator<Item = (K, PhpValue)>>(iter: T) -> Self {
        PhpMap(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl FromIterator<PhpValue> for PhpMap {
    fn from_iter<T: IntoIterator<Item = PhpValue>>(iter: T) -> Self {
        PhpMap(
            iter.into_iter()
                .enumerate()
                .map(|(i, v)| (PhpKey::Int(i as i64), v))
                .collect(),
        )
    }
}
