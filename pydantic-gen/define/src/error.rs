//! Error types for schema loading.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading a schema document.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// The schema file exists neither at the given path nor in the
    /// fallback directory.
    #[error("Schema file not found: '{}' (also tried '{}')", path.display(), fallback.display())]
    NotFound {
        /// The path as given by the caller.
        path: PathBuf,
        /// The fallback location that was checked.
        fallback: PathBuf,
    },

    /// The schema file exists but could not be read.
    #[error("Failed to read schema file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The input is not valid YAML.
    #[error("Failed to parse schema YAML: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// The input parsed, but does not have the expected shape.
    ///
    /// `location` is a dotted path into the document such as
    /// `schemas[1].props[3].type`.
    #[error("Malformed schema at '{location}': {reason}")]
    Malformed { location: String, reason: String },
}

impl SchemaError {
    /// Builds a [`SchemaError::Malformed`] from a location and a reason.
    pub fn malformed(location: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Malformed {
            location: location.into(),
            reason: reason.into(),
        }
    }
}

/// Convenience Result type for schema loading.
pub type Result<T> = std::result::Result<T, SchemaError>;
