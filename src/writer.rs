//! The PHP array config writer.
//!
//! [`PhpArrayWriter`] is the stateful front door for callers that configure
//! a writer once and reuse it: toggles are fluent setters that return the
//! writer for chaining, and [`to_file`](PhpArrayWriter::to_file) persists
//! the rendered source atomically.
//!
//! ## Examples
//!
//! ```rust
//! use serde_phparray::{php_array, PhpArrayWriter};
//!
//! let mut writer = PhpArrayWriter::new();
//! writer
//!     .set_use_bracket_array_syntax(true)
//!     .set_use_class_name_scalars(false);
//!
//! let config = php_array!({ "debug": true });
//! let php = writer.to_string(&config).unwrap();
//! assert_eq!(php, "<?php\nreturn [\n    'debug' => true,\n];\n");
//! ```

use crate::{Error, PhpOptions, PhpValue, Renderer, Result};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Writer for PHP array config files.
///
/// Holds a [`PhpOptions`] and renders [`PhpValue`] trees with it. All
/// setters return `&mut Self` so calls can be chained.
#[derive(Clone, Debug, Default)]
pub struct PhpArrayWriter {
    options: PhpOptions,
}

impl PhpArrayWriter {
    /// Creates a writer with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a writer from existing options.
    #[must_use]
    pub fn with_options(options: PhpOptions) -> Self {
        PhpArrayWriter { options }
    }

    /// Selects between short `[...]` and long `array(...)` literal syntax.
    pub fn set_use_bracket_array_syntax(&mut self, enabled: bool) -> &mut Self {
        self.options.bracket_syntax = enabled;
        self
    }

    /// Enables or disables `::class` promotion for registered class names.
    pub fn set_use_class_name_scalars(&mut self, enabled: bool) -> &mut Self {
        self.options.class_name_scalars = enabled;
        self
    }

    /// Registers a fully-qualified class name for `::class` promotion.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_phparray::{php_array, PhpArrayWriter};
    ///
    /// let mut writer = PhpArrayWriter::new();
    /// writer
    ///     .set_use_class_name_scalars(true)
    ///     .register_class("App\\Kernel");
    ///
    /// let config = php_array!({ "App\\Kernel": "prod" });
    /// let php = writer.to_string(&config).unwrap();
    /// assert!(php.contains("App\\Kernel::class => 'prod',"));
    /// ```
    pub fn register_class<S: Into<String>>(&mut self, fqn: S) -> &mut Self {
        self.options.known_classes.insert(fqn.into());
        self
    }

    /// Returns the writer's current options.
    #[must_use]
    pub fn options(&self) -> &PhpOptions {
        &self.options
    }

    /// Renders `value` as PHP source with this writer's options.
    ///
    /// # Errors
    ///
    /// See [`Renderer::render`].
    #[allow(clippy::inherent_to_string)]
    #[must_use = "this returns the result of the operation, errors must be handled"]
    pub fn to_string(&self, value: &PhpValue) -> Result<String> {
        Renderer::new(self.options.clone()).render(value)
    }

    /// Renders `value` and writes it to `path` atomically.
    ///
    /// The source is written to a temporary file in the target's directory
    /// and renamed into place, so a crash or rendering error never leaves a
    /// truncated config behind.
    ///
    /// # Errors
    ///
    /// Rendering errors as in [`Renderer::render`]; filesystem failures are
    /// reported as [`Error::Io`].
    #[must_use = "this returns the result of the operation, errors must be handled"]
    pub fn to_file<P: AsRef<Path>>(&self, path: P, value: &PhpValue) -> Result<()> {
        let rendered = self.to_string(value)?;
        let path = path.as_ref();
        // A bare filename has an empty parent; the temp file must live on
        // the same filesystem as the target for the rename to be atomic.
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut temp = NamedTempFile::new_in(dir).map_err(|e| Error::io(&e.to_string()))?;
        temp.write_all(rendered.as_bytes())
            .map_err(|e| Error::io(&e.to_string()))?;
        temp.persist(path).map_err(|e| Error::io(&e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::php_array;

    #[test]
    fn test_fluent_setters_chain() {
        let mut writer = PhpArrayWriter::new();
        writer
            .set_use_bracket_array_syntax(true)
            .set_use_class_name_scalars(true)
            .register_class("App\\Kernel");

        assert!(writer.options().bracket_syntax);
        assert!(writer.options().is_class_name("App\\Kernel"));
    }

    #[test]
    fn test_to_file_writes_rendered_source() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.php");

        let writer = PhpArrayWriter::new();
        let config = php_array!({ "debug": true });
        writer.to_file(&path, &config).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, writer.to_string(&config).unwrap());
    }

    #[test]
    fn test_to_file_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.php");
        std::fs::write(&path, "stale").unwrap();

        let writer = PhpArrayWriter::new();
        writer.to_file(&path, &php_array!({})).unwrap();

        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "<?php\nreturn array();\n"
        );
    }

    #[test]
    fn test_render_error_leaves_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.php");

        let writer = PhpArrayWriter::new();
        let bad = php_array!({ "x": (PhpValue::Float(f64::INFINITY)) });
        assert!(writer.to_file(&path, &bad).is_err());
        assert!(!path.exists());
    }
}
