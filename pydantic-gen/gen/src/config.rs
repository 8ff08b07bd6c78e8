//! Generator options.
//!
//! Options can be built in code with the `with_*` setters or loaded from a
//! TOML file. Every key is optional:
//!
//! ```toml
//! base_module = "pydantic"
//! base_class = "BaseModel"
//! indent = 4
//! formatter = "black"            # "builtin" | "black" | "ruff"
//! # formatter = { command = ["yapf"] }
//! python = "/usr/bin/python3"
//! fallback_dir = "schemas"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::errors::GeneratorError;
use crate::validation::{identifier_problem, is_identifier};

/// Which formatter runs over the rendered module.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatterKind {
    /// In-process layout normalizer.
    #[default]
    Builtin,
    /// `black -q -`
    Black,
    /// `ruff format -`
    Ruff,
    /// Arbitrary program reading source on stdin and writing it to stdout.
    Command(Vec<String>),
}

/// Options controlling code generation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorOptions {
    /// Module the base class is imported from.
    pub base_module: String,
    /// Base class every generated model inherits from.
    pub base_class: String,
    /// Spaces per indentation level.
    pub indent: usize,
    pub formatter: FormatterKind,
    /// Interpreter used for runtime loading; discovered on PATH when unset.
    pub python: Option<PathBuf>,
    /// Directory searched when a schema path does not exist.
    pub fallback_dir: Option<PathBuf>,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            base_module: "pydantic".to_string(),
            base_class: "BaseModel".to_string(),
            indent: 4,
            formatter: FormatterKind::default(),
            python: None,
            fallback_dir: None,
        }
    }
}

impl GeneratorOptions {
    /// Parses options from TOML text and validates them.
    ///
    /// ## Errors
    ///
    /// Returns `GeneratorError::ConfigError` for unknown keys, wrong value
    /// types, or values rejected by [`GeneratorOptions::validate`].
    pub fn from_toml_str(text: &str) -> Result<Self, GeneratorError> {
        let options: Self =
            toml::from_str(text).map_err(|e| GeneratorError::ConfigError(e.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    /// Reads and parses an options file.
    pub fn from_toml_file(path: &Path) -> Result<Self, GeneratorError> {
        let text = fs::read_to_string(path).map_err(|source| GeneratorError::ReadError {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn with_base_module(mut self, module: impl Into<String>) -> Self {
        self.base_module = module.into();
        self
    }

    pub fn with_base_class(mut self, class: impl Into<String>) -> Self {
        self.base_class = class.into();
        self
    }

    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    pub fn with_formatter(mut self, formatter: FormatterKind) -> Self {
        self.formatter = formatter;
        self
    }

    pub fn with_python(mut self, python: impl Into<PathBuf>) -> Self {
        self.python = Some(python.into());
        self
    }

    pub fn with_fallback_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.fallback_dir = Some(dir.into());
        self
    }

    /// Checks that the options can produce valid Python.
    pub fn validate(&self) -> Result<(), GeneratorError> {
        if self.base_module.is_empty() || !self.base_module.split('.').all(is_identifier) {
            return Err(GeneratorError::ConfigError(format!(
                "base_module '{}' is not a dotted Python module path",
                self.base_module
            )));
        }

        if let Some(reason) = identifier_problem(&self.base_class) {
            return Err(GeneratorError::ConfigError(format!("base_class: {reason}")));
        }

        if !(1..=8).contains(&self.indent) {
            return Err(GeneratorError::ConfigError(format!(
                "indent must be between 1 and 8, got {}",
                self.indent
            )));
        }

        if let FormatterKind::Command(argv) = &self.formatter
            && argv.first().is_none_or(|program| program.trim().is_empty())
        {
            return Err(GeneratorError::ConfigError(
                "formatter command must name a program".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let options = GeneratorOptions::default();
        assert!(options.validate().is_ok());
        assert_eq!(options.base_module, "pydantic");
        assert_eq!(options.base_class, "BaseModel");
        assert_eq!(options.indent, 4);
        assert_eq!(options.formatter, FormatterKind::Builtin);
    }

    #[test]
    fn empty_toml_gives_defaults() {
        let options = GeneratorOptions::from_toml_str("").unwrap();
        assert_eq!(options, GeneratorOptions::default());
    }

    #[test]
    fn toml_overrides_selected_keys() {
        let options = GeneratorOptions::from_toml_str(
            r#"
base_class = "Schema"
base_module = "app.models.base"
formatter = "ruff"
python = "/opt/python/bin/python3"
"#,
        )
        .unwrap();

        assert_eq!(options.base_class, "Schema");
        assert_eq!(options.base_module, "app.models.base");
        assert_eq!(options.formatter, FormatterKind::Ruff);
        assert_eq!(options.python, Some(PathBuf::from("/opt/python/bin/python3")));
        assert_eq!(options.indent, 4);
    }

    #[test]
    fn toml_accepts_custom_formatter_command() {
        let options =
            GeneratorOptions::from_toml_str("formatter = { command = [\"yapf\", \"-\"] }").unwrap();
        assert_eq!(
            options.formatter,
            FormatterKind::Command(vec!["yapf".to_string(), "-".to_string()])
        );
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = GeneratorOptions::from_toml_str("colour = \"blue\"").unwrap_err();
        assert!(matches!(err, GeneratorError::ConfigError(_)));
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(GeneratorOptions::default().with_indent(0).validate().is_err());
        assert!(GeneratorOptions::default().with_indent(12).validate().is_err());
        assert!(
            GeneratorOptions::default()
                .with_base_class("Base Model")
                .validate()
                .is_err()
        );
        assert!(
            GeneratorOptions::default()
                .with_base_module("pydantic..v1")
                .validate()
                .is_err()
        );
        assert!(
            GeneratorOptions::default()
                .with_formatter(FormatterKind::Command(vec![]))
                .validate()
                .is_err()
        );
    }

    #[test]
    fn missing_options_file_is_a_read_error() {
        let err = GeneratorOptions::from_toml_file(Path::new("/nonexistent/pydantic-gen.toml"))
            .unwrap_err();
        assert!(matches!(err, GeneratorError::ReadError { .. }));
    }
}
