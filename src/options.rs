//! Configuration options for PHP array rendering.
//!
//! This module provides [`PhpOptions`], which controls:
//!
//! - the array literal syntax (`array(...)` vs the short `[...]` form)
//! - whether string keys and values that name a known class are written as
//!   `Fqn::class` constants instead of quoted strings
//!
//! ## Examples
//!
//! ```rust
//! use serde_phparray::{to_string_with_options, PhpOptions};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Data { x: i32, y: i32 }
//!
//! let data = Data { x: 1, y: 2 };
//!
//! // Short array syntax
//! let options = PhpOptions::new().with_bracket_syntax(true);
//! let php = to_string_with_options(&data, options).unwrap();
//! assert!(php.starts_with("<?php\nreturn [\n"));
//! ```
//!
//! ## Class name scalars
//!
//! PHP checks `class_exists` before promoting a string to a `::class`
//! constant. There is no ambient class table here, so known classes are
//! registered explicitly:
//!
//! ```rust
//! use serde_phparray::PhpOptions;
//!
//! let options = PhpOptions::new()
//!     .with_class_name_scalars(true)
//!     .with_known_class("App\\Kernel");
//! assert!(options.is_class_name("App\\Kernel"));
//! assert!(!options.is_class_name("App\\Unknown"));
//! ```

use indexmap::IndexSet;

/// Configuration options for PHP array rendering.
///
/// # Examples
///
/// ```rust
/// use serde_phparray::PhpOptions;
///
/// // Default long-form syntax, no class name scalars
/// let options = PhpOptions::new();
///
/// // Custom configuration
/// let options = PhpOptions::new()
///     .with_bracket_syntax(true)
///     .with_class_name_scalars(true)
///     .with_known_class("App\\Kernel");
/// ```
#[derive(Clone, Debug, Default)]
pub struct PhpOptions {
    /// Emit `[...]` instead of `array(...)`.
    pub bracket_syntax: bool,
    /// Promote registered class name strings to `::class` constants.
    pub class_name_scalars: bool,
    /// Fully-qualified names eligible for `::class` promotion.
    pub known_classes: IndexSet<String>,
}

impl PhpOptions {
    /// Creates default options (long `array(...)` syntax, class name scalars off).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_phparray::PhpOptions;
    ///
    /// let options = PhpOptions::new();
    /// assert!(!options.bracket_syntax);
    /// assert!(!options.class_name_scalars);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects between short `[...]` and long `array(...)` literal syntax.
    #[must_use]
    pub fn with_bracket_syntax(mut self, enabled: bool) -> Self {
        self.bracket_syntax = enabled;
        self
    }

    /// Enables or disables `::class` promotion for registered class names.
    ///
    /// Promotion also requires the string to be registered via
    /// [`with_known_class`](Self::with_known_class) and to be a
    /// syntactically valid fully-qualified name.
    #[must_use]
    pub fn with_class_name_scalars(mut self, enabled: bool) -> Self {
        self.class_name_scalars = enabled;
        self
    }

    /// Registers a fully-qualified class name for `::class` promotion.
    #[must_use]
    pub fn with_known_class<S: Into<String>>(mut self, fqn: S) -> Self {
        self.known_classes.insert(fqn.into());
        self
    }

    /// Registers several fully-qualified class names at once.
    #[must_use]
    pub fn with_known_classes<I, S>(mut self, fqns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.known_classes.extend(fqns.into_iter().map(Into::into));
        self
    }

    /// Returns `true` if `s` should be written as `s::class`.
    ///
    /// Requires class name scalars to be enabled, the name to be registered,
    /// and the name to be a syntactically valid FQN. A registered name that
    /// fails the syntax check silently stays a quoted string.
    #[must_use]
    pub fn is_class_name(&self, s: &str) -> bool {
        self.class_name_scalars && self.known_classes.contains(s) && is_valid_fqn(s)
    }
}

/// Checks whether `s` is a syntactically valid PHP fully-qualified class
/// name: backslash-separated segments, each starting with a letter or
/// underscore, with an optional leading backslash.
///
/// # Examples
///
/// ```rust
/// use serde_phparray::is_valid_fqn;
///
/// assert!(is_valid_fqn("Kernel"));
/// assert!(is_valid_fqn("App\\Http\\Kernel"));
/// assert!(is_valid_fqn("\\App\\Kernel"));
/// assert!(!is_valid_fqn(""));
/// assert!(!is_valid_fqn("App\\2ndKernel"));
/// assert!(!is_valid_fqn("App\\"));
/// ```
#[must_use]
pub fn is_valid_fqn(s: &str) -> bool {
    let s = s.strip_prefix('\\').unwrap_or(s);
    if s.is_empty() {
        return false;
    }
    s.split('\\').all(|segment| {
        let mut chars = segment.chars();
        match chars.next() {
            Some(c) if c.is_ascii_alphabetic() || c == '_' => {
                chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
            }
            _ => false,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_fqns() {
        assert!(is_valid_fqn("stdClass"));
        assert!(is_valid_fqn("_private"));
        assert!(is_valid_fqn("Zend\\Config\\Writer\\PhpArray"));
        assert!(is_valid_fqn("\\Fully\\Qualified"));
    }

    #[test]
    fn test_invalid_fqns() {
        assert!(!is_valid_fqn(""));
        assert!(!is_valid_fqn("\\"));
        assert!(!is_valid_fqn("9Lives"));
        assert!(!is_valid_fqn("has space"));
        assert!(!is_valid_fqn("Trailing\\"));
        assert!(!is_valid_fqn("Double\\\\Separator"));
        assert!(!is_valid_fqn("dash-ed"));
    }

    #[test]
    fn test_is_class_name_requires_all_three_gates() {
        let base = PhpOptions::new().with_known_class("App\\Kernel");
        // flag off
        assert!(!base.is_class_name("App\\Kernel"));

        let on = base.clone().with_class_name_scalars(true);
        assert!(on.is_class_name("App\\Kernel"));
        // not registered
        assert!(!on.is_class_name("App\\Other"));

        // registered but syntactically invalid
        let bad = PhpOptions::new()
            .with_class_name_scalars(true)
            .with_known_class("not a class");
        assert!(!bad.is_class_name("not a class"));
    }
}
