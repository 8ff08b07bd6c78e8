//! Generated module output.
//!
//! A [`GeneratedModule`] is the complete, formatted result of one
//! generation run. From there it can be printed, written to disk, or
//! imported into a Python interpreter to check that it executes.
//!
//! ## Safety Guarantees
//!
//! - **Complete or nothing**: a `GeneratedModule` only exists once rendering
//!   and formatting have both succeeded
//! - **Atomic writes**: uses temp file + rename so readers never observe a
//!   partially written module

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::errors::GeneratorError;
use crate::runtime::{LoadedModule, PythonRuntime};

/// Formatted Python source for one schema document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedModule {
    code: String,
}

impl GeneratedModule {
    pub(crate) fn new(code: String) -> Self {
        Self { code }
    }

    /// The generated source text.
    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn into_code(self) -> String {
        self.code
    }

    /// Writes the module to `path` and returns the path written.
    ///
    /// ## Errors
    ///
    /// Returns `GeneratorError::WriteError` if the file or its parent
    /// directories cannot be written.
    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<PathBuf, GeneratorError> {
        let path = path.as_ref();
        write_atomic(path, &self.code)?;
        info!(path = %path.display(), bytes = self.code.len(), "Wrote generated module");
        Ok(path.to_path_buf())
    }

    /// Imports the module into `runtime` under `module_name`.
    ///
    /// ## Errors
    ///
    /// Returns `GeneratorError::ExecutionFailed` if Python cannot import the
    /// generated source.
    pub fn load(
        &self,
        runtime: &PythonRuntime,
        module_name: &str,
    ) -> Result<LoadedModule, GeneratorError> {
        runtime.load(&self.code, module_name)
    }
}

impl fmt::Display for GeneratedModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code)
    }
}

/// Writes content to a file atomically using temp file + rename.
///
/// This pattern ensures that:
/// - The file is never left in a partially-written state
/// - Other processes see either the old or new content, never a mix
///
/// ## Errors
///
/// Returns `GeneratorError::WriteError` if:
/// - Parent directories cannot be created
/// - The temp file cannot be written
/// - The rename operation fails
pub fn write_atomic(path: &Path, content: &str) -> Result<(), GeneratorError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| GeneratorError::WriteError {
            path: parent.display().to_string(),
            source: e,
        })?;
    }

    let temp_path = path.with_extension("tmp");
    fs::write(&temp_path, content).map_err(|e| GeneratorError::WriteError {
        path: temp_path.display().to_string(),
        source: e,
    })?;

    fs::rename(&temp_path, path).map_err(|e| GeneratorError::WriteError {
        path: path.display().to_string(),
        source: e,
    })?;

    Ok(())
}
