//! Error types for PHP array rendering and parsing.
//!
//! ## Error Categories
//!
//! - **Rendering errors**: values with no PHP literal representation, or
//!   trees nested beyond the depth limit
//! - **Syntax errors**: invalid input to the reader, with line/column
//!   information
//! - **I/O errors**: file writing failures from [`PhpArrayWriter::to_file`]
//!
//! [`PhpArrayWriter::to_file`]: crate::PhpArrayWriter::to_file
//!
//! ## Examples
//!
//! ```rust
//! use serde_phparray::{from_str_value, Error};
//!
//! let result = from_str_value("<?php\nreturn array(");
//! assert!(result.is_err());
//!
//! if let Err(err) = result {
//!     eprintln!("Parse error: {}", err);
//!     // Error messages include line and column numbers
//! }
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors that can occur while rendering or parsing
/// PHP array source.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// IO error during writing
    #[error("IO error: {0}")]
    Io(String),

    /// Syntax error while parsing generated source
    #[error("syntax error at line {line}, column {col}: {msg}")]
    Syntax { line: usize, col: usize, msg: String },

    /// Input ended in the middle of a construct
    #[error("unexpected end of input at line {line}, column {col}: expected {expected}")]
    UnexpectedEof {
        line: usize,
        col: usize,
        expected: String,
    },

    /// Value has no PHP literal representation
    #[error("unsupported value: {0}")]
    UnsupportedValue(String),

    /// Tree nested deeper than the renderer's recursion bound
    #[error("nesting depth exceeds the limit of {limit} levels")]
    DepthLimitExceeded { limit: usize },

    /// Generic message, used by the serde bridge
    #[error("{0}")]
    Message(String),
}

impl Error {
    /// Creates a syntax error with line and column information.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_phparray::Error;
    ///
    /// let err = Error::syntax(10, 5, "unexpected token");
    /// assert!(err.to_string().contains("line 10"));
    /// ```
    pub fn syntax(line: usize, col: usize, msg: &str) -> Self {
        Error::Syntax {
            line,
            col,
            msg: msg.to_string(),
        }
    }

    /// Creates an unexpected end-of-input error.
    pub fn unexpected_eof(line: usize, col: usize, expected: &str) -> Self {
        Error::UnexpectedEof {
            line,
            col,
            expected: expected.to_string(),
        }
    }

    /// Creates an unsupported value error for values that cannot be written
    /// as a PHP literal.
    pub fn unsupported_value(msg: &str) -> Self {
        Error::UnsupportedValue(msg.to_string())
    }

    /// Creates an I/O error for file writing failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Creates a custom error with a display message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_phparray::Error;
    ///
    /// let err = Error::custom("something went wrong");
    /// assert!(err.to_string().contains("something went wrong"));
    /// ```
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
