//! Dynamic value representation for PHP config data.
//!
//! This module provides the [`PhpValue`] enum which represents any value the
//! writer can express as a PHP literal. It's the input to the renderer and
//! the output of the companion reader.
//!
//! ## Core Types
//!
//! - [`PhpValue`]: any renderable value (null, bool, int, float, string,
//!   array, class reference, object)
//! - [`PhpMap`]: insertion-ordered array backing the `Array` and `Object`
//!   variants
//!
//! ## Usage Patterns
//!
//! ### Creating Values
//!
//! ```rust
//! use serde_phparray::{php_array, PhpValue};
//!
//! // From primitives
//! let null = PhpValue::Null;
//! let boolean = PhpValue::from(true);
//! let number = PhpValue::from(42);
//! let text = PhpValue::from("hello");
//!
//! // Using the php_array! macro
//! let config = php_array!({
//!     "host": "localhost",
//!     "port": 5432
//! });
//! ```
//!
//! ### Type Checking and Extraction
//!
//! ```rust
//! use serde_phparray::PhpValue;
//!
//! let value = PhpValue::from(42);
//! assert!(value.is_int());
//! assert_eq!(value.as_i64(), Some(42));
//! assert_eq!(value.as_str(), None);
//! ```
//!
//! ### Converting from Rust Types
//!
//! ```rust
//! use serde_phparray::{to_value, PhpValue};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Endpoint { host: String, port: u16 }
//!
//! let endpoint = Endpoint { host: "db".to_string(), port: 5432 };
//! let value: PhpValue = to_value(&endpoint).unwrap();
//! assert!(value.is_array());
//! ```

use crate::{PhpKey, PhpMap};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A dynamically-typed representation of any value the writer can render.
///
/// The variants map one-to-one onto PHP literal forms:
///
/// | Variant | Rendered as |
/// |---|---|
/// | `Null` | `null` |
/// | `Bool` | `true` / `false` |
/// | `Int` | `123` |
/// | `Float` | `1.5` |
/// | `String` | `'text'` |
/// | `Array` | `array(...)` or `[...]` |
/// | `ClassRef` | `Fqn::class` |
/// | `Object` | `Fqn::__set_state(array(...))` |
///
/// # Examples
///
/// ```rust
/// use serde_phparray::{PhpMap, PhpValue};
///
/// let null = PhpValue::Null;
/// let num = PhpValue::Int(42);
/// let text = PhpValue::String("hello".to_string());
///
/// assert!(null.is_null());
/// assert!(num.is_int());
/// assert!(text.is_string());
/// ```
#[derive(Clone, Debug, PartialEq, Default)]
pub enum PhpValue {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Array(PhpMap),
    /// A `Fqn::class` constant. PHP evaluates this to the class name string,
    /// so the reader returns it as [`PhpValue::String`].
    ClassRef(String),
    /// An opaque record reconstructed via `Fqn::__set_state(array(...))`.
    /// Plain `(object)` casts use the class name `stdClass`.
    Object { class: String, properties: PhpMap },
}

impl PhpValue {
    /// The class name used for plain PHP objects.
    pub const STD_CLASS: &'static str = "stdClass";

    /// Creates an [`PhpValue::Object`] with class `stdClass`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_phparray::{PhpMap, PhpValue};
    ///
    /// let mut props = PhpMap::new();
    /// props.insert("foo", PhpValue::from("bar"));
    /// let obj = PhpValue::std_object(props);
    /// assert!(obj.is_object());
    /// ```
    #[must_use]
    pub fn std_object(properties: PhpMap) -> Self {
        PhpValue::Object {
            class: Self::STD_CLASS.to_string(),
            properties,
        }
    }

    /// Returns `true` if the value is null.
    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, PhpValue::Null)
    }

    /// Returns `true` if the value is a boolean.
    #[inline]
    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self, PhpValue::Bool(_))
    }

    /// Returns `true` if the value is an integer.
    #[inline]
    #[must_use]
    pub const fn is_int(&self) -> bool {
        matches!(self, PhpValue::Int(_))
    }

    /// Returns `true` if the value is a float.
    #[inline]
    #[must_use]
    pub const fn is_float(&self) -> bool {
        matches!(self, PhpValue::Float(_))
    }

    /// Returns `true` if the value is a string.
    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, PhpValue::String(_))
    }

    /// Returns `true` if the value is an array.
    #[inline]
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, PhpValue::Array(_))
    }

    /// Returns `true` if the value is a class reference.
    #[inline]
    #[must_use]
    pub const fn is_class_ref(&self) -> bool {
        matches!(self, PhpValue::ClassRef(_))
    }

    /// Returns `true` if the value is an object.
    #[inline]
    #[must_use]
    pub const fn is_object(&self) -> bool {
        matches!(self, PhpValue::Object { .. })
    }

    /// If the value is a boolean, returns it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PhpValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// If the value is an integer, returns it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            PhpValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// If the value is an integer or float, returns it as `f64`.
    /// Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            PhpValue::Int(i) => Some(*i as f64),
            PhpValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// If the value is a string, returns a reference to it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PhpValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// If the value is an array, returns a reference to it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_array(&self) -> Option<&PhpMap> {
        match self {
            PhpValue::Array(map) => Some(map),
            _ => None,
        }
    }

    /// If the value is an array, returns a mutable reference to it.
    /// Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_array_mut(&mut self) -> Option<&mut PhpMap> {
        match self {
            PhpValue::Array(map) => Some(map),
            _ => None,
        }
    }
}

impl fmt::Display for PhpValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhpValue::Null => write!(f, "null"),
            PhpValue::Bool(b) => write!(f, "{}", b),
            PhpValue::Int(i) => write!(f, "{}", i),
            PhpValue::Float(fl) => write!(f, "{}", fl),
            PhpValue::String(s) => write!(f, "'{}'", s),
            PhpValue::Array(map) => write!(f, "array({} entries)", map.len()),
            PhpValue::ClassRef(fqn) => write!(f, "{}::class", fqn),
            PhpValue::Object { class, properties } => {
                write!(f, "{}::__set_state({} properties)", class, properties.len())
            }
        }
    }
}

impl Serialize for PhpValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            PhpValue::Null => serializer.serialize_unit(),
            PhpValue::Bool(b) => serializer.serialize_bool(*b),
            PhpValue::Int(i) => serializer.serialize_i64(*i),
            PhpValue::Float(f) => serializer.serialize_f64(*f),
            PhpValue::String(s) => serializer.serialize_str(s),
            PhpValue::Array(map) => {
                if map.is_list() {
                    use serde::ser::SerializeSeq;
                    let mut seq = serializer.serialize_seq(Some(map.len()))?;
                    for value in map.values() {
                        seq.serialize_element(value)?;
                    }
                    seq.end()
                } else {
                    use serde::ser::SerializeMap;
                    let mut entries = serializer.serialize_map(Some(map.len()))?;
                    for (key, value) in map.iter() {
                        entries.serialize_entry(key, value)?;
                    }
                    entries.end()
                }
            }
            // A class constant evaluates to the class name string.
            PhpValue::ClassRef(fqn) => serializer.serialize_str(fqn),
            PhpValue::Object { properties, .. } => {
                use serde::ser::SerializeMap;
                let mut entries = serializer.serialize_map(Some(properties.len()))?;
                for (key, value) in properties.iter() {
                    entries.serialize_entry(key, value)?;
                }
                entries.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for PhpValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct PhpValueVisitor;

        impl<'de> Visitor<'de> for PhpValueVisitor {
            type Value = PhpValue;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("any PHP-representable value")
            }

            fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E> {
                Ok(PhpValue::Bool(value))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E> {
                Ok(PhpValue::Int(value))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E> {
                if value <= i64::MAX as u64 {
                    Ok(PhpValue::Int(value as i64))
                } else {
                    Ok(PhpValue::Float(value as f64))
                }
            }

            fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E> {
                Ok(PhpValue::Float(value))
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E> {
                Ok(PhpValue::String(value.to_string()))
            }

            fn visit_string<E>(self, value: String) -> Result<Self::Value, E> {
                Ok(PhpValue::String(value))
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E> {
                Ok(PhpValue::Null)
            }

            fn visit_none<E>(self) -> Result<Self::Value, E> {
                Ok(PhpValue::Null)
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
                let mut map = PhpMap::new();
                while let Some(elem) = seq.next_element()? {
                    map.push(elem);
                }
                Ok(PhpValue::Array(map))
            }

            fn visit_map<A>(self, mut entries: A) -> Result<Self::Value, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                let mut map = PhpMap::new();
                while let Some((key, value)) = entries.next_entry::<PhpKey, PhpValue>()? {
                    map.insert(key, value);
                }
                Ok(PhpValue::Array(map))
            }
        }

        deserializer.deserialize_any(PhpValueVisitor)
    }
}

// TryFrom implementations for extracting values from PhpValue
impl TryFrom<PhpValue> for i64 {
    type Error = crate::Error;

    fn try_from(value: PhpValue) -> crate::Result<Self> {
        match value {
            PhpValue::Int(i) => Ok(i),
            _ => Err(crate::Error::custom(format!(
                "expected integer, found {}",
                value
            ))),
        }
    }
}

impl TryFrom<PhpValue> for f64 {
    type Error = crate::Error;

    fn try_from(value: PhpValue) -> crate::Result<Self> {
        match value {
            PhpValue::Int(i) => Ok(i as f64),
            PhpValue::Float(f) => Ok(f),
            _ => Err(crate::Error::custom(format!(
                "expected number, found {}",
                value
            ))),
        }
    }
}

impl TryFrom<PhpValue> for bool {
    type Error = crate::Error;

    fn try_from(value: PhpValue) -> crate::Result<Self> {
        match value {
            PhpValue::Bool(b) => Ok(b),
            _ => Err(crate::Error::custom(format!(
                "expected bool, found {}",
                value
            ))),
        }
    }
}

impl TryFrom<PhpValue> for String {
    type Error = crate::Error;

    fn try_from(value: PhpValue) -> crate::Result<Self> {
        match value {
            PhpValue::String(s) => Ok(s),
            PhpValue::ClassRef(fqn) => Ok(fqn),
            _ => Err(crate::Error::custom(format!(
                "expected string, found {}",
                value
            ))),
        }
    }
}

// From implementations for creating PhpValue from primitives
impl From<bool> for PhpValue {
    fn from(value: bool) -> Self {
        PhpValue::Bool(value)
    }
}

impl From<i8> for PhpValue {
    fn from(value: i8) -> Self {
        PhpValue::Int(value as i64)
    }
}

impl From<i16> for PhpValue {
    fn from(value: i16) -> Self {
        PhpValue::Int(value as i64)
    }
}

impl From<i32> for PhpValue {
    fn from(value: i32) -> Self {
        PhpValue::Int(value as i64)
    }
}

impl From<i64> for PhpValue {
    fn from(value: i64) -> Self {
        PhpValue::Int(value)
    }
}

impl From<u8> for PhpValue {
    fn from(value: u8) -> Self {
        PhpValue::Int(value as i64)
    }
}

impl From<u16> for PhpValue {
    fn from(value: u16) -> Self {
        PhpValue::Int(value as i64)
    }
}

impl From<u32> for PhpValue {
    fn from(value: u32) -> Self {
        PhpValue::Int(value as i64)
    }
}

impl From<f32> for PhpValue {
    fn from(value: f32) -> Self {
        PhpValue::Float(value as f64)
    }
}

impl From<f64> for PhpValue {
    fn from(value: f64) -> Self {
        PhpValue::Float(value)
    }
}

impl From<String> for PhpValue {
    fn from(value: String) -> Self {
        PhpValue::String(value)
    }
}

impl From<&str> for PhpValue {
    fn from(value: &str) -> Self {
        PhpValue::String(value.to_string())
    }
}

impl From<PhpMap> for PhpValue {
    fn from(value: PhpMap) -> Self {
        PhpValue::Array(value)
    }
}

impl From<Vec<PhpValue>> for PhpValue {
    fn from(value: Vec<PhpValue>) -> Self {
        PhpValue::Array(value.into_iter().collect())
    }
}
