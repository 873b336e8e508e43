//! # serde_phparray
//!
//! A Serde-compatible writer (and companion reader) for PHP array
//! configuration files.
//!
//! ## What does it produce?
//!
//! PHP projects commonly keep configuration in files that `return` an array
//! literal. This crate renders an in-memory tree as exactly that kind of
//! file, deterministically and round-trippably:
//!
//! ```text
//! <?php
//! return array(
//!     'test' => 'foo',
//!     'bar' => array(
//!         0 => 'baz',
//!         1 => 'foo',
//!     ),
//!     'emptyArray' => array(),
//! );
//! ```
//!
//! ## Key Features
//!
//! - **Deterministic output**: identical input and options always produce
//!   byte-identical source, with stable key order and indentation
//! - **Both array syntaxes**: long `array(...)` or short `[...]` literals
//! - **Class name scalars**: registered class names render as `Fqn::class`
//!   constants instead of quoted strings
//! - **Serde compatible**: render any `#[derive(Serialize)]` type, read
//!   configs back into any `#[derive(Deserialize)]` type
//! - **Atomic file writes**: [`PhpArrayWriter::to_file`] never leaves a
//!   truncated config behind
//!
//! ## Quick Start
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! serde_phparray = "0.1"
//! serde = { version = "1.0", features = ["derive"] }
//! ```
//!
//! ### Basic rendering and reading
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use serde_phparray::{from_str, to_string};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Database {
//!     host: String,
//!     port: u16,
//!     replica: bool,
//! }
//!
//! let db = Database {
//!     host: "localhost".to_string(),
//!     port: 5432,
//!     replica: false,
//! };
//!
//! let php = to_string(&db).unwrap();
//! assert_eq!(
//!     php,
//!     "<?php\nreturn array(\n    'host' => 'localhost',\n    'port' => 5432,\n    'replica' => false,\n);\n"
//! );
//!
//! let db_back: Database = from_str(&php).unwrap();
//! assert_eq!(db, db_back);
//! ```
//!
//! ### Dynamic values with the php_array! macro
//!
//! ```rust
//! use serde_phparray::{php_array, PhpArrayWriter};
//!
//! let config = php_array!({
//!     "debug": true,
//!     "hosts": ["alpha", "beta"],
//! });
//!
//! let mut writer = PhpArrayWriter::new();
//! writer.set_use_bracket_array_syntax(true);
//! let php = writer.to_string(&config).unwrap();
//! assert!(php.starts_with("<?php\nreturn [\n"));
//! ```
//!
//! ### Class name scalars
//!
//! ```rust
//! use serde_phparray::{php_array, PhpArrayWriter};
//!
//! let mut writer = PhpArrayWriter::new();
//! writer
//!     .set_use_class_name_scalars(true)
//!     .register_class("App\\Http\\Kernel");
//!
//! let config = php_array!({ "App\\Http\\Kernel": "prod" });
//! let php = writer.to_string(&config).unwrap();
//! assert!(php.contains("App\\Http\\Kernel::class => 'prod',"));
//! ```
//!
//! ## Safety Guarantees
//!
//! - No `unsafe` code blocks
//! - Rendering either returns a complete, syntactically valid file or an
//!   error; never a partial literal
//! - Recursion is bounded ([`ser::MAX_DEPTH`]) for both rendering and
//!   parsing

pub mod de;
pub mod error;
pub mod macros;
pub mod map;
pub mod options;
pub mod ser;
pub mod value;
pub mod writer;

pub use de::Deserializer;
pub use error::{Error, Result};
pub use map::{PhpKey, PhpMap};
pub use options::{is_valid_fqn, PhpOptions};
pub use ser::{PhpValueSerializer, Renderer};
pub use value::PhpValue;
pub use writer::PhpArrayWriter;

use serde::{Deserialize, Serialize};
use std::io;

/// Serialize any `T: Serialize` to PHP array source with default options.
///
/// To render a [`PhpValue`] tree while preserving the `ClassRef` and
/// `Object` variants, use [`PhpArrayWriter`] or [`Renderer`] instead: this
/// function goes through serde, which flattens both to plain values.
///
/// # Examples
///
/// ```rust
/// use serde_phparray::to_string;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let php = to_string(&Point { x: 1, y: 2 }).unwrap();
/// assert_eq!(php, "<?php\nreturn array(\n    'x' => 1,\n    'y' => 2,\n);\n");
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be serialized (e.g. a map with
/// non-scalar keys) or rendered (e.g. non-finite floats).
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, PhpOptions::default())
}

/// Serialize any `T: Serialize` to PHP array source with custom options.
///
/// # Examples
///
/// ```rust
/// use serde_phparray::{to_string_with_options, PhpOptions};
///
/// let hosts = vec!["alpha", "beta"];
/// let options = PhpOptions::new().with_bracket_syntax(true);
/// let php = to_string_with_options(&hosts, options).unwrap();
/// assert_eq!(php, "<?php\nreturn [\n    0 => 'alpha',\n    1 => 'beta',\n];\n");
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be serialized or rendered.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options<T>(value: &T, options: PhpOptions) -> Result<String>
where
    T: ?Sized + Serialize,
{
    let tree = to_value(value)?;
    Renderer::new(options).render(&tree)
}

/// Convert any `T: Serialize` to a [`PhpValue`].
///
/// Useful for building or inspecting config trees programmatically before
/// rendering them.
///
/// # Examples
///
/// ```rust
/// use serde_phparray::{to_value, PhpValue};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let value: PhpValue = to_value(&Point { x: 1, y: 2 }).unwrap();
/// assert!(value.is_array());
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be serialized.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_value<T>(value: &T) -> Result<PhpValue>
where
    T: ?Sized + Serialize,
{
    value.serialize(PhpValueSerializer)
}

/// Serialize any `T: Serialize` to a writer as PHP array source.
///
/// # Examples
///
/// ```rust
/// use serde_phparray::to_writer;
///
/// let mut buffer = Vec::new();
/// to_writer(&mut buffer, &vec![1, 2, 3]).unwrap();
/// assert!(buffer.starts_with(b"<?php\n"));
/// ```
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    to_writer_with_options(writer, value, PhpOptions::default())
}

/// Serialize any `T: Serialize` to a writer with custom options.
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer_with_options<W, T>(mut writer: W, value: &T, options: PhpOptions) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    let rendered = to_string_with_options(value, options)?;
    writer
        .write_all(rendered.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}

/// Deserialize an instance of type `T` from generated PHP array source.
///
/// # Examples
///
/// ```rust
/// use serde_phparray::from_str;
/// use serde::Deserialize;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let php = "<?php\nreturn array(\n    'x' => 1,\n    'y' => 2,\n);\n";
/// let point: Point = from_str(php).unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns an error if the input is not in the writer's output grammar or
/// cannot be deserialized to type `T`. Syntax errors include line and
/// column information.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<'a, T>(s: &'a str) -> Result<T>
where
    T: Deserialize<'a>,
{
    let value = from_str_value(s)?;
    T::deserialize(value)
}

/// Parse generated PHP array source into a [`PhpValue`] tree.
///
/// Unlike [`from_str`], this preserves the `Object` variant for
/// `__set_state` literals, so it is the exact inverse of rendering.
///
/// # Examples
///
/// ```rust
/// use serde_phparray::from_str_value;
///
/// let value = from_str_value("<?php\nreturn array(\n    0 => 'baz',\n);\n").unwrap();
/// let map = value.as_array().unwrap();
/// assert_eq!(map.get(0).and_then(|v| v.as_str()), Some("baz"));
/// ```
///
/// # Errors
///
/// Returns a syntax error for input outside the writer's output grammar.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str_value(s: &str) -> Result<PhpValue> {
    Deserializer::from_str(s).parse_document()
}

/// Deserialize an instance of type `T` from bytes of PHP array source.
///
/// # Errors
///
/// Returns an error if the bytes are not valid UTF-8, not in the writer's
/// output grammar, or cannot be deserialized to type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice<'a, T>(v: &'a [u8]) -> Result<T>
where
    T: Deserialize<'a>,
{
    let s = std::str::from_utf8(v).map_err(|e| Error::custom(e.to_string()))?;
    from_str(s)
}

/// Deserialize an instance of type `T` from an I/O stream of PHP array
/// source.
///
/// # Errors
///
/// Returns an error if reading from the reader fails, the input is not in
/// the writer's output grammar, or the data cannot be deserialized to
/// type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R, T>(mut reader: R) -> Result<T>
where
    R: io::Read,
    T: for<'de> Deserialize<'de>,
{
    let mut string = String::new();
    reader
        .read_to_string(&mut string)
        .map_err(|e| Error::io(&e.to_string()))?;
    from_str(&string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::php_array;
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Database {
        host: String,
        port: u16,
        replica: bool,
        tags: Vec<String>,
    }

    #[test]
    fn test_serialize_deserialize_struct() {
        let db = Database {
            host: "localhost".to_string(),
            port: 5432,
            replica: false,
            tags: vec!["primary".to_string(), "eu".to_string()],
        };

        let php = to_string(&db).unwrap();
        let db_back: Database = from_str(&php).unwrap();
        assert_eq!(db, db_back);
    }

    #[test]
    fn test_to_value() {
        let db = Database {
            host: "localhost".to_string(),
            port: 5432,
            replica: true,
            tags: vec![],
        };

        let value = to_value(&db).unwrap();
        let map = value.as_array().unwrap();
        assert_eq!(map.get("port").and_then(|v| v.as_i64()), Some(5432));
        assert_eq!(map.get("replica").and_then(|v| v.as_bool()), Some(true));
    }

    #[test]
    fn test_determinism() {
        let config = php_array!({
            "a": [1, 2, 3],
            "b": { "nested": null }
        });
        let first = PhpArrayWriter::new().to_string(&config).unwrap();
        let second = PhpArrayWriter::new().to_string(&config).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_to_writer() {
        let mut buffer = Vec::new();
        to_writer(&mut buffer, &vec![1, 2]).unwrap();
        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "<?php\nreturn array(\n    0 => 1,\n    1 => 2,\n);\n"
        );
    }

    #[test]
    fn test_from_slice_and_reader() {
        let php = b"<?php\nreturn array(\n    0 => 1,\n    1 => 2,\n);\n";
        let nums: Vec<i32> = from_slice(php).unwrap();
        assert_eq!(nums, vec![1, 2]);

        let cursor = std::io::Cursor::new(php.to_vec());
        let nums: Vec<i32> = from_reader(cursor).unwrap();
        assert_eq!(nums, vec![1, 2]);
    }

    #[test]
    fn test_option_roundtrip() {
        let some: Option<i32> = Some(7);
        let none: Option<i32> = None;

        let php = to_string(&some).unwrap();
        assert_eq!(from_str::<Option<i32>>(&php).unwrap(), some);

        let php = to_string(&none).unwrap();
        assert_eq!(php, "<?php\nreturn null;\n");
        assert_eq!(from_str::<Option<i32>>(&php).unwrap(), none);
    }

    #[test]
    fn test_enum_roundtrip() {
        #[derive(Serialize, Deserialize, Debug, PartialEq)]
        enum Mode {
            Simple,
            Tagged(u8),
            Named { level: u8 },
        }

        for mode in [Mode::Simple, Mode::Tagged(2), Mode::Named { level: 3 }] {
            let php = to_string(&mode).unwrap();
            let back: Mode = from_str(&php).unwrap();
            assert_eq!(mode, back);
        }
    }
}
