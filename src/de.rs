//! PHP array parsing.
//!
//! This module provides the [`Deserializer`], a recursive-descent parser for
//! the exact literal format the renderer emits (`<?php return <literal>;`).
//! It exists so generated config files can be read back and so round-trip
//! fidelity is testable without a PHP runtime.
//!
//! This is not a PHP parser. The accepted grammar is the renderer's output
//! grammar: `array(...)` / `[...]` literals, single-quoted strings, integer
//! and float literals, `true` / `false` / `null`, `Fqn::class` constants and
//! `Fqn::__set_state(array(...))` calls. Anything else is a syntax error
//! with line/column information.
//!
//! ## Usage
//!
//! Most users should use the high-level functions in the crate root:
//!
//! ```rust
//! use serde_phparray::from_str;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Data { x: i32, y: i32 }
//!
//! let php = "<?php\nreturn array(\n    'x' => 1,\n    'y' => 2,\n);\n";
//! let data: Data = from_str(php).unwrap();
//! assert_eq!(data, Data { x: 1, y: 2 });
//! ```

use crate::ser::MAX_DEPTH;
use crate::{Error, PhpKey, PhpMap, PhpValue, Result};
use serde::de::value::{MapAccessDeserializer, MapDeserializer, SeqDeserializer};
use serde::de::{self, IntoDeserializer, Visitor};
use serde::forward_to_deserialize_any;

/// Parser for generated PHP array source.
///
/// Created via [`Deserializer::from_str`]; [`parse_document`] returns the
/// evaluated [`PhpValue`] tree.
///
/// [`parse_document`]: Deserializer::parse_document
///
/// # Examples
///
/// ```rust
/// use serde_phparray::Deserializer;
///
/// let value = Deserializer::from_str("<?php\nreturn array();\n")
///     .parse_document()
///     .unwrap();
/// assert!(value.as_array().unwrap().is_empty());
/// ```
pub struct Deserializer<'de> {
    input: &'de str,
    position: usize,
    line: usize,
    column: usize,
}

impl<'de> Deserializer<'de> {
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(input: &'de str) -> Self {
        Deserializer {
            input,
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Parses a complete document: `<?php`, `return`, one literal, `;`.
    ///
    /// # Errors
    ///
    /// Returns a syntax error for any input the renderer could not have
    /// produced, including trailing content after the terminator.
    pub fn parse_document(&mut self) -> Result<PhpValue> {
        self.expect_exact("<?php")?;
        self.skip_whitespace();
        self.expect_keyword("return")?;
        self.skip_whitespace();
        let value = self.parse_value(0)?;
        self.skip_whitespace();
        self.expect_char(';')?;
        self.skip_whitespace();
        if !self.at_end() {
            return Err(self.syntax("trailing content after `;`"));
        }
        Ok(value)
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    fn next_char(&mut self) -> Option<char> {
        let ch = self.peek_char()?;
        self.position += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek_char(), Some(' ' | '\t' | '\r' | '\n')) {
            self.next_char();
        }
    }

    fn syntax(&self, msg: &str) -> Error {
        Error::syntax(self.line, self.column, msg)
    }

    fn eof(&self, expected: &str) -> Error {
        Error::unexpected_eof(self.line, self.column, expected)
    }

    fn expect_char(&mut self, expected: char) -> Result<()> {
        match self.peek_char() {
            Some(ch) if ch == expected => {
                self.next_char();
                Ok(())
            }
            Some(ch) => Err(self.syntax(&format!("expected `{}`, found `{}`", expected, ch))),
            None => Err(self.eof(&format!("`{}`", expected))),
        }
    }

    fn expect_exact(&mut self, expected: &str) -> Result<()> {
        for ch in expected.chars() {
            match self.next_char() {
                Some(c) if c == ch => {}
                Some(_) => {
                    return Err(self.syntax(&format!("expected `{}`", expected)));
                }
                None => return Err(self.eof(&format!("`{}`", expected))),
            }
        }
        Ok(())
    }

    fn expect_keyword(&mut self, keyword: &str) -> Result<()> {
        let word = self.parse_bareword()?;
        if word == keyword {
            Ok(())
        } else {
            Err(self.syntax(&format!("expected `{}`, found `{}`", keyword, word)))
        }
    }

    // Barewords cover keywords and fully-qualified class names, so the
    // namespace separator is part of the charset.
    fn parse_bareword(&mut self) -> Result<String> {
        let start = self.position;
        while let Some(ch) = self.peek_char() {
            if ch.is_ascii_alphanumeric() || ch == '_' || ch == '\\' {
                self.next_char();
            } else {
                break;
            }
        }
        if self.position == start {
            match self.peek_char() {
                Some(ch) => Err(self.syntax(&format!("unexpected character `{}`", ch))),
                None => Err(self.eof("a value")),
            }
        } else {
            Ok(self.input[start..self.position].to_string())
        }
    }

    fn parse_value(&mut self, depth: usize) -> Result<PhpValue> {
        if depth > MAX_DEPTH {
            return Err(Error::DepthLimitExceeded { limit: MAX_DEPTH });
        }
        self.skip_whitespace();
        match self.peek_char() {
            Some('\'') => self.parse_quoted_string().map(PhpValue::String),
            Some('[') => {
                self.next_char();
                self.parse_entries(depth, ']')
            }
            Some(ch) if ch == '-' || ch.is_ascii_digit() => self.parse_number(),
            Some(ch) if ch.is_ascii_alphabetic() || ch == '_' || ch == '\\' => {
                let word = self.parse_bareword()?;
                match word.as_str() {
                    "true" => Ok(PhpValue::Bool(true)),
                    "false" => Ok(PhpValue::Bool(false)),
                    "null" => Ok(PhpValue::Null),
                    "array" => {
                        self.skip_whitespace();
                        self.expect_char('(')?;
                        self.parse_entries(depth, ')')
                    }
                    _ => self.parse_class_member(word, depth),
                }
            }
            Some(ch) => Err(self.syntax(&format!("unexpected character `{}`", ch))),
            None => Err(self.eof("a value")),
        }
    }

    // `Fqn::class` or `Fqn::__set_state(array(...))`. A `::class` constant
    // evaluates to the class name string, matching PHP semantics.
    fn parse_class_member(&mut self, fqn: String, depth: usize) -> Result<PhpValue> {
        self.expect_exact("::")?;
        let member = self.parse_bareword()?;
        match member.as_str() {
            "class" => Ok(PhpValue::String(fqn)),
            "__set_state" => {
                self.skip_whitespace();
                self.expect_char('(')?;
                let inner = self.parse_value(depth + 1)?;
                let properties = match inner {
                    PhpValue::Array(map) => map,
                    _ => return Err(self.syntax("__set_state expects an array literal")),
                };
                self.skip_whitespace();
                self.expect_char(')')?;
                Ok(PhpValue::Object {
                    class: fqn,
                    properties,
                })
            }
            _ => Err(self.syntax(&format!("unsupported class member `{}`", member))),
        }
    }

    fn parse_entries(&mut self, depth: usize, close: char) -> Result<PhpValue> {
        let mut map = PhpMap::new();
        loop {
            self.skip_whitespace();
            if self.peek_char() == Some(close) {
                self.next_char();
                return Ok(PhpValue::Array(map));
            }

            let first = self.parse_value(depth + 1)?;
            self.skip_whitespace();
            if self.peek_char() == Some('=') {
                self.expect_exact("=>")?;
                let key = match first {
                    PhpValue::Int(i) => PhpKey::Int(i),
                    PhpValue::String(s) => PhpKey::String(s),
                    _ => return Err(self.syntax("array key must be an integer or string")),
                };
                let value = self.parse_value(depth + 1)?;
                map.insert(key, value);
            } else {
                map.push(first);
            }

            self.skip_whitespace();
            match self.peek_char() {
                Some(',') => {
                    self.next_char();
                }
                Some(ch) if ch == close => {}
                Some(ch) => {
                    return Err(
                        self.syntax(&format!("expected `,` or `{}`, found `{}`", close, ch))
                    )
                }
                None => return Err(self.eof(&format!("`,` or `{}`", close))),
            }
        }
    }

    // Single-quoted PHP string: only `\'` and `\\` are escapes, any other
    // backslash is literal.
    fn parse_quoted_string(&mut self) -> Result<String> {
        self.expect_char('\'')?;
        let mut result = String::new();
        loop {
            match self.next_char() {
                Some('\'') => return Ok(result),
                Some('\\') => match self.next_char() {
                    Some(ch @ ('\\' | '\'')) => result.push(ch),
                    Some(other) => {
                        result.push('\\');
                        result.push(other);
                    }
                    None => return Err(self.eof("closing `'`")),
                },
                Some(ch) => result.push(ch),
                None => return Err(self.eof("closing `'`")),
            }
        }
    }

    fn parse_number(&mut self) -> Result<PhpValue> {
        let start = self.position;
        if self.peek_char() == Some('-') {
            self.next_char();
        }
        while matches!(self.peek_char(), Some(ch) if ch.is_ascii_digit()) {
            self.next_char();
        }
        let mut is_float = false;
        if self.peek_char() == Some('.') {
            is_float = true;
            self.next_char();
            while matches!(self.peek_char(), Some(ch) if ch.is_ascii_digit()) {
                self.next_char();
            }
        }
        if matches!(self.peek_char(), Some('e' | 'E')) {
            is_float = true;
            self.next_char();
            if matches!(self.peek_char(), Some('+' | '-')) {
                self.next_char();
            }
            while matches!(self.peek_char(), Some(ch) if ch.is_ascii_digit()) {
                self.next_char();
            }
        }

        let repr = &self.input[start..self.position];
        if is_float {
            repr.parse::<f64>()
                .map(PhpValue::Float)
                .map_err(|_| self.syntax(&format!("invalid float literal `{}`", repr)))
        } else if let Ok(i) = repr.parse::<i64>() {
            Ok(PhpValue::Int(i))
        } else {
            // Integer literals beyond i64 overflow to float, as PHP does.
            repr.parse::<f64>()
                .map(PhpValue::Float)
                .map_err(|_| self.syntax(&format!("invalid integer literal `{}`", repr)))
        }
    }
}

impl<'de> IntoDeserializer<'de, Error> for PhpValue {
    type Deserializer = Self;

    fn into_deserializer(self) -> Self::Deserializer {
        self
    }
}

fn key_value(key: PhpKey) -> PhpValue {
    match key {
        PhpKey::Int(i) => PhpValue::Int(i),
        PhpKey::String(s) => PhpValue::String(s),
    }
}

impl<'de> de::Deserializer<'de> for PhpValue {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self {
            PhpValue::Null => visitor.visit_unit(),
            PhpValue::Bool(b) => visitor.visit_bool(b),
            PhpValue::Int(i) => visitor.visit_i64(i),
            PhpValue::Float(f) => visitor.visit_f64(f),
            PhpValue::String(s) | PhpValue::ClassRef(s) => visitor.visit_string(s),
            PhpValue::Array(map) => {
                if map.is_list() {
                    visitor.visit_seq(SeqDeserializer::new(map.into_iter().map(|(_, v)| v)))
                } else {
                    visitor.visit_map(MapDeserializer::new(
                        map.into_iter().map(|(k, v)| (key_value(k), v)),
                    ))
                }
            }
            PhpValue::Object { properties, .. } => visitor.visit_map(MapDeserializer::new(
                properties.into_iter().map(|(k, v)| (key_value(k), v)),
            )),
        }
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self {
            PhpValue::Null => visitor.visit_none(),
            other => visitor.visit_some(other),
        }
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self {
            // Unit variants are written as plain strings.
            PhpValue::String(s) | PhpValue::ClassRef(s) => {
                visitor.visit_enum(s.into_deserializer())
            }
            // Data-carrying variants are single-entry arrays.
            PhpValue::Array(map) if map.len() == 1 => {
                let entries = MapDeserializer::new(map.into_iter().map(|(k, v)| (key_value(k), v)));
                visitor.visit_enum(MapAccessDeserializer::new(entries))
            }
            other => Err(Error::custom(format!(
                "expected enum representation, found {}",
                other
            ))),
        }
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf unit unit_struct seq tuple tuple_struct map struct
        identifier ignored_any
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Result<PhpValue> {
        Deserializer::from_str(input).parse_document()
    }

    #[test]
    fn test_parse_scalars() {
        assert_eq!(parse("<?php\nreturn null;\n").unwrap(), PhpValue::Null);
        assert_eq!(parse("<?php\nreturn true;\n").unwrap(), PhpValue::Bool(true));
        assert_eq!(parse("<?php\nreturn -17;\n").unwrap(), PhpValue::Int(-17));
        assert_eq!(parse("<?php\nreturn 2.5;\n").unwrap(), PhpValue::Float(2.5));
        assert_eq!(
            parse("<?php\nreturn 'hi';\n").unwrap(),
            PhpValue::String("hi".to_string())
        );
    }

    #[test]
    fn test_parse_string_escapes() {
        assert_eq!(
            parse("<?php\nreturn 'don\\'t';\n").unwrap(),
            PhpValue::String("don't".to_string())
        );
        assert_eq!(
            parse("<?php\nreturn 'a\\\\b';\n").unwrap(),
            PhpValue::String("a\\b".to_string())
        );
        // Unknown escapes stay literal, PHP single-quote semantics.
        assert_eq!(
            parse("<?php\nreturn 'a\\nb';\n").unwrap(),
            PhpValue::String("a\\nb".to_string())
        );
    }

    #[test]
    fn test_parse_arrays_both_syntaxes() {
        let long = parse("<?php\nreturn array(\n    0 => 'a',\n    'k' => 1,\n);\n").unwrap();
        let short = parse("<?php\nreturn [\n    0 => 'a',\n    'k' => 1,\n];\n").unwrap();
        assert_eq!(long, short);

        let map = long.as_array().unwrap();
        assert_eq!(map.get(0).and_then(|v| v.as_str()), Some("a"));
        assert_eq!(map.get("k").and_then(|v| v.as_i64()), Some(1));
    }

    #[test]
    fn test_parse_positional_entries() {
        let value = parse("<?php\nreturn array('a', 'b',);\n").unwrap();
        let map = value.as_array().unwrap();
        assert!(map.is_list());
        assert_eq!(map.get(1).and_then(|v| v.as_str()), Some("b"));
    }

    #[test]
    fn test_parse_class_constant() {
        assert_eq!(
            parse("<?php\nreturn App\\Kernel::class;\n").unwrap(),
            PhpValue::String("App\\Kernel".to_string())
        );
    }

    #[test]
    fn test_parse_set_state() {
        let value =
            parse("<?php\nreturn stdClass::__set_state(array(\n    'foo' => 'bar',\n));\n")
                .unwrap();
        match value {
            PhpValue::Object { class, properties } => {
                assert_eq!(class, "stdClass");
                assert_eq!(properties.get("foo").and_then(|v| v.as_str()), Some("bar"));
            }
            other => panic!("expected object, got {}", other),
        }
    }

    #[test]
    fn test_error_positions() {
        let err = parse("<?php\nreturn array(\n    'a' => ,\n);\n").unwrap_err();
        match err {
            Error::Syntax { line, .. } => assert_eq!(line, 3),
            other => panic!("expected syntax error, got {}", other),
        }
    }

    #[test]
    fn test_trailing_content_rejected() {
        assert!(parse("<?php\nreturn 1;\necho 'x';\n").is_err());
    }

    #[test]
    fn test_unterminated_inputs() {
        assert!(matches!(
            parse("<?php\nreturn array("),
            Err(Error::UnexpectedEof { .. })
        ));
        assert!(matches!(
            parse("<?php\nreturn 'open"),
            Err(Error::UnexpectedEof { .. })
        ));
    }

    #[test]
    fn test_huge_integer_overflows_to_float() {
        let value = parse("<?php\nreturn 1000000000000000000000;\n").unwrap();
        assert_eq!(value, PhpValue::Float(1e21));
    }
}
