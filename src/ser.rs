//! PHP array rendering.
//!
//! This module provides [`Renderer`], which walks a [`PhpValue`] tree and
//! emits a complete PHP config file, and [`PhpValueSerializer`], a serde
//! `Serializer` that turns any `T: Serialize` into a [`PhpValue`] tree.
//!
//! ## Output format
//!
//! The rendered file evaluates back to the original structure when included
//! from PHP:
//!
//! ```text
//! <?php
//! return array(
//!     'test' => 'foo',
//!     'bar' => array(
//!         0 => 'baz',
//!         1 => 'foo',
//!     ),
//! );
//! ```
//!
//! Rendering is deterministic: the same value and options always produce
//! byte-identical output. Entries are indented four spaces per nesting
//! level, every entry line ends with `,`, and no line carries trailing
//! whitespace.
//!
//! ## Usage
//!
//! Most users should use the high-level functions in the crate root:
//!
//! ```rust
//! use serde_phparray::to_string;
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Data { x: i32, y: i32 }
//!
//! let php = to_string(&Data { x: 1, y: 2 }).unwrap();
//! assert_eq!(php, "<?php\nreturn array(\n    'x' => 1,\n    'y' => 2,\n);\n");
//! ```

use crate::options::is_valid_fqn;
use crate::{Error, PhpKey, PhpMap, PhpOptions, PhpValue, Result};
use serde::{ser, Serialize};

/// Maximum nesting depth the renderer will follow before giving up with
/// [`Error::DepthLimitExceeded`]. Owned trees cannot be cyclic, so this only
/// bounds pathologically deep input.
pub const MAX_DEPTH: usize = 128;

const INDENT: &str = "    ";

/// The PHP array renderer.
///
/// Converts a [`PhpValue`] tree into PHP source that reconstructs it.
/// Created via [`Renderer::new`] with the options to apply.
///
/// # Examples
///
/// ```rust
/// use serde_phparray::{PhpOptions, PhpValue, Renderer};
///
/// let php = Renderer::new(PhpOptions::new())
///     .render(&PhpValue::from("hello"))
///     .unwrap();
/// assert_eq!(php, "<?php\nreturn 'hello';\n");
/// ```
pub struct Renderer {
    out: String,
    options: PhpOptions,
}

impl Renderer {
    pub fn new(options: PhpOptions) -> Self {
        Renderer {
            out: String::with_capacity(256),
            options,
        }
    }

    /// Renders `value` as a complete PHP file and returns the source text.
    ///
    /// # Errors
    ///
    /// Returns an error for non-finite floats, object class names that are
    /// not valid identifiers, or nesting deeper than [`MAX_DEPTH`]. On error
    /// no partial output is returned.
    #[must_use = "this returns the result of the operation, errors must be handled"]
    pub fn render(mut self, value: &PhpValue) -> Result<String> {
        self.out.push_str("<?php\nreturn ");
        self.render_value(value, 0)?;
        self.out.push_str(";\n");
        Ok(self.out)
    }

    fn render_value(&mut self, value: &PhpValue, depth: usize) -> Result<()> {
        if depth > MAX_DEPTH {
            return Err(Error::DepthLimitExceeded { limit: MAX_DEPTH });
        }
        match value {
            PhpValue::Null => self.out.push_str("null"),
            PhpValue::Bool(b) => self.out.push_str(if *b { "true" } else { "false" }),
            PhpValue::Int(i) => self.out.push_str(&i.to_string()),
            PhpValue::Float(f) => self.push_float(*f)?,
            PhpValue::String(s) => self.push_string(s),
            PhpValue::Array(map) => self.render_array(map, depth)?,
            PhpValue::ClassRef(fqn) => self.push_class_ref(fqn),
            PhpValue::Object { class, properties } => {
                self.render_object(class, properties, depth)?;
            }
        }
        Ok(())
    }

    fn render_array(&mut self, map: &PhpMap, depth: usize) -> Result<()> {
        let (open, close) = if self.options.bracket_syntax {
            ("[", "]")
        } else {
            ("array(", ")")
        };

        if map.is_empty() {
            self.out.push_str(open);
            self.out.push_str(close);
            return Ok(());
        }

        self.out.push_str(open);
        self.out.push('\n');
        for (key, value) in map.iter() {
            self.push_indent(depth + 1);
            self.render_key(key);
            self.out.push_str(" => ");
            self.render_value(value, depth + 1)?;
            self.out.push_str(",\n");
        }
        self.push_indent(depth);
        self.out.push_str(close);
        Ok(())
    }

    fn render_object(&mut self, class: &str, properties: &PhpMap, depth: usize) -> Result<()> {
        if !is_valid_fqn(class) {
            return Err(Error::unsupported_value(&format!(
                "object class name `{}` is not a valid identifier",
                class
            )));
        }
        self.out.push_str(class);
        self.out.push_str("::__set_state(");
        self.render_array(properties, depth)?;
        self.out.push(')');
        Ok(())
    }

    fn render_key(&mut self, key: &PhpKey) {
        match key {
            PhpKey::Int(i) => self.out.push_str(&i.to_string()),
            PhpKey::String(s) => self.push_string(s),
        }
    }

    fn push_indent(&mut self, depth: usize) {
        for _ in 0..depth {
            self.out.push_str(INDENT);
        }
    }

    // Strings promote to `Fqn::class` when the options say so, otherwise
    // single-quoted with `\` and `'` escaped.
    fn push_string(&mut self, s: &str) {
        if self.options.is_class_name(s) {
            self.out.push_str(s);
            self.out.push_str("::class");
        } else {
            self.push_quoted(s);
        }
    }

    fn push_quoted(&mut self, s: &str) {
        self.out.push('\'');
        for ch in s.chars() {
            if ch == '\\' || ch == '\'' {
                self.out.push('\\');
            }
            self.out.push(ch);
        }
        self.out.push('\'');
    }

    // Explicit class references skip the registry, but an invalid identifier
    // falls back to an ordinary quoted string instead of failing the render.
    fn push_class_ref(&mut self, fqn: &str) {
        if is_valid_fqn(fqn) {
            self.out.push_str(fqn);
            self.out.push_str("::class");
        } else {
            self.push_quoted(fqn);
        }
    }

    fn push_float(&mut self, f: f64) -> Result<()> {
        if !f.is_finite() {
            return Err(Error::unsupported_value(&format!(
                "float `{}` has no round-trippable PHP literal",
                f
            )));
        }
        let repr = f.to_string();
        let is_float_literal = repr.contains('.') || repr.contains('e') || repr.contains('E');
        self.out.push_str(&repr);
        if !is_float_literal {
            // `2.0` displays as "2"; keep the decimal point so PHP reads a float.
            self.out.push_str(".0");
        }
        Ok(())
    }
}

pub(crate) fn to_php_value<T>(value: &T) -> Result<PhpValue>
where
    T: ?Sized + Serialize,
{
    value.serialize(PhpValueSerializer)
}

/// A serde `Serializer` whose output is a [`PhpValue`] tree.
///
/// Drives [`crate::to_value`]; use it directly only when you need to plug
/// into serde machinery yourself.
///
/// # Examples
///
/// ```rust
/// use serde::Serialize;
/// use serde_phparray::PhpValueSerializer;
///
/// let value = 42i32.serialize(PhpValueSerializer).unwrap();
/// assert_eq!(value.as_i64(), Some(42));
/// ```
pub struct PhpValueSerializer;

impl ser::Serializer for PhpValueSerializer {
    type Ok = PhpValue;
    type Error = Error;

    type SerializeSeq = SerializeArray;
    type SerializeTuple = SerializeArray;
    type SerializeTupleStruct = SerializeArray;
    type SerializeTupleVariant = SerializeTupleVariant;
    type SerializeMap = SerializeMap;
    type SerializeStruct = SerializeMap;
    type SerializeStructVariant = SerializeStructVariant;

    fn serialize_bool(self, v: bool) -> Result<PhpValue> {
        Ok(PhpValue::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<PhpValue> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i16(self, v: i16) -> Result<PhpValue> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i32(self, v: i32) -> Result<PhpValue> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i64(self, v: i64) -> Result<PhpValue> {
        Ok(PhpValue::Int(v))
    }

    fn serialize_u8(self, v: u8) -> Result<PhpValue> {
        self.serialize_u64(v as u64)
    }

    fn serialize_u16(self, v: u16) -> Result<PhpValue> {
        self.serialize_u64(v as u64)
    }

    fn serialize_u32(self, v: u32) -> Result<PhpValue> {
        self.serialize_u64(v as u64)
    }

    fn serialize_u64(self, v: u64) -> Result<PhpValue> {
        if v <= i64::MAX as u64 {
            Ok(PhpValue::Int(v as i64))
        } else {
            Ok(PhpValue::Float(v as f64))
        }
    }

    fn serialize_f32(self, v: f32) -> Result<PhpValue> {
        self.serialize_f64(v as f64)
    }

    fn serialize_f64(self, v: f64) -> Result<PhpValue> {
        Ok(PhpValue::Float(v))
    }

    fn serialize_char(self, v: char) -> Result<PhpValue> {
        Ok(PhpValue::String(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<PhpValue> {
        Ok(PhpValue::String(v.to_string()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<PhpValue> {
        Ok(PhpValue::Array(
            v.iter().map(|b| PhpValue::Int(*b as i64)).collect(),
        ))
    }

    fn serialize_none(self) -> Result<PhpValue> {
        Ok(PhpValue::Null)
    }

    fn serialize_some<T>(self, value: &T) -> Result<PhpValue>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<PhpValue> {
        Ok(PhpValue::Null)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<PhpValue> {
        Ok(PhpValue::Null)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<PhpValue> {
        Ok(PhpValue::String(variant.to_string()))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<PhpValue>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<PhpValue>
    where
        T: ?Sized + Serialize,
    {
        let mut map = PhpMap::new();
        map.insert(variant, to_php_value(value)?);
        Ok(PhpValue::Array(map))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<Self::SerializeSeq> {
        Ok(SerializeArray {
            map: PhpMap::with_capacity(len.unwrap_or(0)),
        })
    }

    fn serialize_tuple(self, len: usize) -> Result<Self::SerializeTuple> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Ok(SerializeTupleVariant {
            variant,
            map: PhpMap::with_capacity(len),
        })
    }

    fn serialize_map(self, len: Option<usize>) -> Result<Self::SerializeMap> {
        Ok(SerializeMap {
            map: PhpMap::with_capacity(len.unwrap_or(0)),
            next_key: None,
        })
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> Result<Self::SerializeStruct> {
        self.serialize_map(Some(len))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Ok(SerializeStructVariant {
            variant,
            map: PhpMap::with_capacity(len),
        })
    }
}

pub struct SerializeArray {
    map: PhpMap,
}

impl ser::SerializeSeq for SerializeArray {
    type Ok = PhpValue;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.map.push(to_php_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<PhpValue> {
        Ok(PhpValue::Array(self.map))
    }
}

impl ser::SerializeTuple for SerializeArray {
    type Ok = PhpValue;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<PhpValue> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleStruct for SerializeArray {
    type Ok = PhpValue;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<PhpValue> {
        ser::SerializeSeq::end(self)
    }
}

pub struct SerializeTupleVariant {
    variant: &'static str,
    map: PhpMap,
}

impl ser::SerializeTupleVariant for SerializeTupleVariant {
    type Ok = PhpValue;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.map.push(to_php_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<PhpValue> {
        let mut outer = PhpMap::new();
        outer.insert(self.variant, PhpValue::Array(self.map));
        Ok(PhpValue::Array(outer))
    }
}

pub struct SerializeMap {
    map: PhpMap,
    next_key: Option<PhpKey>,
}

impl ser::SerializeMap for SerializeMap {
    type Ok = PhpValue;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.next_key = Some(match to_php_value(key)? {
            PhpValue::Int(i) => PhpKey::Int(i),
            PhpValue::String(s) => PhpKey::String(s),
            PhpValue::ClassRef(fqn) => PhpKey::String(fqn),
            other => {
                return Err(Error::unsupported_value(&format!(
                    "array key must be an integer or string, found {}",
                    other
                )))
            }
        });
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        // serde guarantees serialize_key was called first
        let key = self
            .next_key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called before serialize_key"))?;
        self.map.insert(key, to_php_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<PhpValue> {
        Ok(PhpValue::Array(self.map))
    }
}

impl ser::SerializeStruct for SerializeMap {
    type Ok = PhpValue;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.map.insert(key, to_php_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<PhpValue> {
        Ok(PhpValue::Array(self.map))
    }
}

pub struct SerializeStructVariant {
    variant: &'static str,
    map: PhpMap,
}

impl ser::SerializeStructVariant for SerializeStructVariant {
    type Ok = PhpValue;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.map.insert(key, to_php_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<PhpValue> {
        let mut outer = PhpMap::new();
        outer.insert(self.variant, PhpValue::Array(self.map));
        Ok(PhpValue::Array(outer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::php_array;

    fn render_default(value: &PhpValue) -> String {
        Renderer::new(PhpOptions::new()).render(value).unwrap()
    }

    #[test]
    fn test_scalar_root() {
        assert_eq!(render_default(&PhpValue::Null), "<?php\nreturn null;\n");
        assert_eq!(render_default(&PhpValue::Bool(true)), "<?php\nreturn true;\n");
        assert_eq!(render_default(&PhpValue::Int(-3)), "<?php\nreturn -3;\n");
    }

    #[test]
    fn test_float_keeps_decimal_point() {
        assert_eq!(render_default(&PhpValue::Float(2.0)), "<?php\nreturn 2.0;\n");
        assert_eq!(render_default(&PhpValue::Float(1.5)), "<?php\nreturn 1.5;\n");
    }

    #[test]
    fn test_non_finite_float_is_rejected() {
        let result = Renderer::new(PhpOptions::new()).render(&PhpValue::Float(f64::NAN));
        assert!(matches!(result, Err(Error::UnsupportedValue(_))));
    }

    #[test]
    fn test_empty_array_inline() {
        assert_eq!(
            render_default(&php_array!({})),
            "<?php\nreturn array();\n"
        );
        let bracket = Renderer::new(PhpOptions::new().with_bracket_syntax(true))
            .render(&php_array!({}))
            .unwrap();
        assert_eq!(bracket, "<?php\nreturn [];\n");
    }

    #[test]
    fn test_escaping_single_pass() {
        // A backslash before a quote must not be escaped twice.
        let value = PhpValue::from("back\\slash and 'quote'");
        assert_eq!(
            render_default(&value),
            "<?php\nreturn 'back\\\\slash and \\'quote\\'';\n"
        );
    }

    #[test]
    fn test_class_ref_invalid_identifier_falls_back_to_string() {
        let value = php_array!({ "handler": (PhpValue::ClassRef("not a class".to_string())) });
        let php = render_default(&value);
        assert!(php.contains("'handler' => 'not a class',"));
    }

    #[test]
    fn test_object_depth_aware_indentation() {
        let value = php_array!({
            "object": (PhpValue::std_object(
                [("foo", PhpValue::from("bar"))].into_iter().collect()
            ))
        });
        let expected = "<?php\n\
                        return array(\n    \
                            'object' => stdClass::__set_state(array(\n        \
                                'foo' => 'bar',\n    \
                            )),\n\
                        );\n";
        assert_eq!(render_default(&value), expected);
    }

    #[test]
    fn test_object_invalid_class_errors() {
        let value = PhpValue::Object {
            class: "12Monkeys".to_string(),
            properties: PhpMap::new(),
        };
        let result = Renderer::new(PhpOptions::new()).render(&value);
        assert!(matches!(result, Err(Error::UnsupportedValue(_))));
    }

    #[test]
    fn test_depth_limit() {
        let mut value = PhpValue::Array(PhpMap::new());
        for _ in 0..(MAX_DEPTH + 1) {
            let mut map = PhpMap::new();
            map.push(value);
            value = PhpValue::Array(map);
        }
        let result = Renderer::new(PhpOptions::new()).render(&value);
        assert!(matches!(result, Err(Error::DepthLimitExceeded { .. })));
    }

    #[test]
    fn test_value_serializer_map_keys() {
        use std::collections::BTreeMap;

        let mut map = BTreeMap::new();
        map.insert(0i64, "zero");
        map.insert(1i64, "one");
        let value = to_php_value(&map).unwrap();
        let array = value.as_array().unwrap();
        assert!(array.is_list());

        let mut bad = BTreeMap::new();
        bad.insert(vec![1u8], "x");
        assert!(to_php_value(&bad).is_err());
    }

    #[test]
    fn test_value_serializer_enums() {
        use serde::Serialize;

        #[derive(Serialize)]
        enum Mode {
            Simple,
            Named { level: u8 },
        }

        assert_eq!(
            to_php_value(&Mode::Simple).unwrap(),
            PhpValue::String("Simple".to_string())
        );

        let named = to_php_value(&Mode::Named { level: 3 }).unwrap();
        let outer = named.as_array().unwrap();
        let inner = outer.get("Named").and_then(|v| v.as_array()).unwrap();
        assert_eq!(inner.get("level").and_then(|v| v.as_i64()), Some(3));
    }
}
