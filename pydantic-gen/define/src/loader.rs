//! Schema loading from files, YAML text, or pre-parsed values.
//!
//! All three entry points funnel into the same shape conversion, so the
//! same logical content always produces an identical [`SchemaDocument`].
//!
//! ## Path Resolution
//!
//! A path that is not a file is retried once as `<fallback_dir>/<file name>`
//! before failing with [`SchemaError::NotFound`]. The default fallback
//! directory is the `schemas/` directory shipped with this crate.

use std::fs;
use std::path::{Path, PathBuf};

use serde_yaml::Value;
use tracing::debug;

use crate::document::{SchemaDocument, document_from_value};
use crate::error::{Result, SchemaError};

/// Directory of bundled schemas used as the fallback location.
pub const DEFAULT_FALLBACK_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/schemas");

/// Loads schema documents, resolving missing paths against a fallback
/// directory.
#[derive(Debug, Clone)]
pub struct SchemaLoader {
    fallback_dir: PathBuf,
}

impl Default for SchemaLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaLoader {
    pub fn new() -> Self {
        Self {
            fallback_dir: PathBuf::from(DEFAULT_FALLBACK_DIR),
        }
    }

    /// Replaces the fallback directory.
    pub fn with_fallback_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.fallback_dir = dir.into();
        self
    }

    pub fn fallback_dir(&self) -> &Path {
        &self.fallback_dir
    }

    /// Resolves `path` to an existing file.
    ///
    /// ## Errors
    ///
    /// Returns [`SchemaError::NotFound`] if neither `path` nor the fallback
    /// candidate is a file.
    pub fn resolve(&self, path: &Path) -> Result<PathBuf> {
        if path.is_file() {
            return Ok(path.to_path_buf());
        }

        let fallback = match path.file_name() {
            Some(name) => self.fallback_dir.join(name),
            None => self.fallback_dir.clone(),
        };
        let already_in_fallback = path.parent() == Some(self.fallback_dir.as_path());

        if !already_in_fallback && fallback.is_file() {
            debug!(
                requested = %path.display(),
                resolved = %fallback.display(),
                "Schema not found at requested path, falling back"
            );
            return Ok(fallback);
        }

        Err(SchemaError::NotFound {
            path: path.to_path_buf(),
            fallback,
        })
    }

    /// Loads a document from a YAML file.
    pub fn load_path(&self, path: impl AsRef<Path>) -> Result<SchemaDocument> {
        let resolved = self.resolve(path.as_ref())?;
        let text = fs::read_to_string(&resolved).map_err(|source| SchemaError::Read {
            path: resolved.clone(),
            source,
        })?;
        debug!(path = %resolved.display(), bytes = text.len(), "Read schema file");
        self.load_str(&text)
    }

    /// Parses YAML text and loads the resulting value.
    pub fn load_str(&self, yaml: &str) -> Result<SchemaDocument> {
        let value: Value = serde_yaml::from_str(yaml)?;
        self.load_value(&value)
    }

    /// Loads an already-parsed value without touching the filesystem.
    pub fn load_value(&self, value: &Value) -> Result<SchemaDocument> {
        let doc = document_from_value(value)?;
        debug!(records = doc.records.len(), "Loaded schema document");
        Ok(doc)
    }
}

impl SchemaDocument {
    /// Loads a document from a file using the default fallback directory.
    ///
    /// ## Examples
    ///
    /// ```
    /// use pydantic_gen_define::SchemaDocument;
    ///
    /// // Not in the working directory; resolved against the bundled schemas.
    /// let doc = SchemaDocument::from_path("example.yml").unwrap();
    /// assert_eq!(doc.records[0].name, "GeneratedSchema1");
    /// ```
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        SchemaLoader::default().load_path(path)
    }

    /// Loads a document from YAML text.
    ///
    /// ## Examples
    ///
    /// ```
    /// use pydantic_gen_define::SchemaDocument;
    ///
    /// let doc = SchemaDocument::from_yaml_str(
    ///     "schemas:\n  - name: Item\n    props:\n      - name: id\n        type: int\n",
    /// )
    /// .unwrap();
    /// assert_eq!(doc.records[0].fields[0].type_tag, "int");
    /// ```
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        SchemaLoader::default().load_str(yaml)
    }

    /// Loads a document from a pre-parsed YAML value.
    pub fn from_value(value: &Value) -> Result<Self> {
        SchemaLoader::default().load_value(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use tracing_test::traced_test;

    const SIMPLE: &str = "schemas:\n  - name: Item\n    props:\n      - name: id\n        type: int\n";

    #[test]
    fn existing_path_is_used_directly() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("item.yml");
        fs::write(&path, SIMPLE).unwrap();

        let loader = SchemaLoader::new();
        assert_eq!(loader.resolve(&path).unwrap(), path);
        assert_eq!(loader.load_path(&path).unwrap().records[0].name, "Item");
    }

    #[test]
    #[traced_test]
    fn missing_path_falls_back_by_file_name() {
        let fallback = TempDir::new().unwrap();
        fs::write(fallback.path().join("item.yml"), SIMPLE).unwrap();

        let loader = SchemaLoader::new().with_fallback_dir(fallback.path());
        let resolved = loader.resolve(Path::new("nowhere/item.yml")).unwrap();

        assert_eq!(resolved, fallback.path().join("item.yml"));
        assert!(logs_contain("falling back"));
    }

    #[test]
    fn missing_everywhere_is_not_found() {
        let fallback = TempDir::new().unwrap();
        let loader = SchemaLoader::new().with_fallback_dir(fallback.path());

        let err = loader.load_path("foobar.yml").unwrap_err();
        match err {
            SchemaError::NotFound { path, fallback: tried } => {
                assert_eq!(path, PathBuf::from("foobar.yml"));
                assert_eq!(tried, fallback.path().join("foobar.yml"));
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn path_inside_fallback_dir_is_not_retried() {
        let fallback = TempDir::new().unwrap();
        let loader = SchemaLoader::new().with_fallback_dir(fallback.path());
        let missing = fallback.path().join("absent.yml");

        let err = loader.resolve(&missing).unwrap_err();
        assert!(matches!(err, SchemaError::NotFound { .. }));
    }

    #[test]
    fn bundled_example_resolves_through_default_fallback() {
        let doc = SchemaDocument::from_path("example.yml").unwrap();
        let names: Vec<_> = doc.records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["GeneratedSchema1", "GeneratedSchema2"]);
    }

    #[test]
    fn invalid_yaml_is_a_parse_error() {
        let err = SchemaDocument::from_yaml_str("schemas: [unclosed").unwrap_err();
        assert!(matches!(err, SchemaError::Parse(_)));
    }

    #[test]
    fn three_entry_points_agree() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("example.yml");
        let text = fs::read_to_string(Path::new(DEFAULT_FALLBACK_DIR).join("example.yml")).unwrap();
        fs::write(&path, &text).unwrap();

        let from_path = SchemaDocument::from_path(&path).unwrap();
        let from_str = SchemaDocument::from_yaml_str(&text).unwrap();
        let value: Value = serde_yaml::from_str(&text).unwrap();
        let from_value = SchemaDocument::from_value(&value).unwrap();

        assert_eq!(from_path, from_str);
        assert_eq!(from_str, from_value);
    }
}
