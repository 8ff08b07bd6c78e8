//! Importing generated modules into a Python interpreter.
//!
//! Generated code is never evaluated in-process. Instead the module is
//! written into a private temporary directory and imported by a child
//! interpreter with that directory on `PYTHONPATH`. A successful import
//! yields a [`LoadedModule`] which keeps the directory alive so further
//! snippets can run against the module.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;
use tracing::{debug, info};

use crate::config::GeneratorOptions;
use crate::errors::GeneratorError;
use crate::validation::identifier_problem;

/// Interpreter names searched on `PATH`, in order.
const INTERPRETER_CANDIDATES: &[&str] = &["python3", "python"];

/// A Python interpreter used to import generated modules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PythonRuntime {
    interpreter: PathBuf,
}

impl PythonRuntime {
    /// Finds `python3`, then `python`, on the `PATH`.
    ///
    /// ## Errors
    ///
    /// Returns `GeneratorError::InterpreterNotFound` when neither exists.
    pub fn discover() -> Result<Self, GeneratorError> {
        for candidate in INTERPRETER_CANDIDATES {
            if let Ok(path) = which::which(candidate) {
                debug!(interpreter = %path.display(), "Found Python interpreter");
                return Ok(Self { interpreter: path });
            }
        }

        Err(GeneratorError::InterpreterNotFound {
            tried: INTERPRETER_CANDIDATES.join(", "),
        })
    }

    /// Uses `interpreter` as given, without checking that it exists.
    pub fn with_interpreter(interpreter: impl Into<PathBuf>) -> Self {
        Self {
            interpreter: interpreter.into(),
        }
    }

    /// The configured interpreter when `options.python` is set, otherwise
    /// [`PythonRuntime::discover`].
    pub fn from_options(options: &GeneratorOptions) -> Result<Self, GeneratorError> {
        match &options.python {
            Some(path) => Ok(Self::with_interpreter(path)),
            None => Self::discover(),
        }
    }

    pub fn interpreter(&self) -> &Path {
        &self.interpreter
    }

    /// Imports `code` as the module `module_name`.
    ///
    /// `module_name` may be dotted (`models.user`), in which case the
    /// intermediate packages are created as empty `__init__.py` files.
    ///
    /// ## Errors
    ///
    /// - `GeneratorError::InvalidModuleName` if any segment of the name is not
    ///   an importable identifier
    /// - `GeneratorError::WriteError` if the module cannot be staged
    /// - `GeneratorError::ExecutionFailed` if the interpreter cannot be
    ///   started or the import raises
    pub fn load(&self, code: &str, module_name: &str) -> Result<LoadedModule, GeneratorError> {
        validate_module_name(module_name)?;

        let dir = TempDir::new().map_err(|source| GeneratorError::WriteError {
            path: std::env::temp_dir().display().to_string(),
            source,
        })?;
        let source_path = stage_module(dir.path(), module_name, code)?;
        debug!(module = module_name, path = %source_path.display(), "Staged generated module");

        let module = LoadedModule {
            name: module_name.to_string(),
            source_path,
            dir,
            interpreter: self.interpreter.clone(),
        };
        module.run(&format!("import {module_name}"))?;

        info!(module = module_name, interpreter = %self.interpreter.display(), "Loaded generated module");
        Ok(module)
    }
}

/// A generated module that imported successfully.
///
/// Dropping it removes the staged source.
#[derive(Debug)]
pub struct LoadedModule {
    name: String,
    source_path: PathBuf,
    dir: TempDir,
    interpreter: PathBuf,
}

impl LoadedModule {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Where the module source was staged.
    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    /// Runs `snippet` with the module importable and returns its stdout.
    ///
    /// ## Errors
    ///
    /// Returns `GeneratorError::ExecutionFailed` with the interpreter's stderr
    /// when the snippet raises or the interpreter cannot be started.
    pub fn run(&self, snippet: &str) -> Result<String, GeneratorError> {
        let output = Command::new(&self.interpreter)
            .arg("-c")
            .arg(snippet)
            .env("PYTHONPATH", self.python_path())
            .env("PYTHONDONTWRITEBYTECODE", "1")
            .output()
            .map_err(|e| GeneratorError::ExecutionFailed {
                module: self.name.clone(),
                stderr: format!("could not start {}: {e}", self.interpreter.display()),
            })?;

        self.check(output)
    }

    fn check(&self, output: Output) -> Result<String, GeneratorError> {
        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).into_owned())
        } else {
            Err(GeneratorError::ExecutionFailed {
                module: self.name.clone(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })
        }
    }

    /// The staging directory followed by any inherited `PYTHONPATH`.
    fn python_path(&self) -> OsString {
        let mut paths = vec![self.dir.path().to_path_buf()];
        if let Some(existing) = std::env::var_os("PYTHONPATH") {
            paths.extend(std::env::split_paths(&existing));
        }
        std::env::join_paths(paths).unwrap_or_else(|_| self.dir.path().as_os_str().to_owned())
    }
}

fn validate_module_name(name: &str) -> Result<(), GeneratorError> {
    for segment in name.split('.') {
        if let Some(reason) = identifier_problem(segment) {
            return Err(GeneratorError::InvalidModuleName {
                name: name.to_string(),
                reason,
            });
        }
    }
    Ok(())
}

/// Writes `code` to the file for `module_name` under `root`, creating
/// package directories for dotted names.
fn stage_module(root: &Path, module_name: &str, code: &str) -> Result<PathBuf, GeneratorError> {
    let segments: Vec<&str> = module_name.split('.').collect();
    let (file_stem, packages) = match segments.split_last() {
        Some((last, rest)) => (*last, rest),
        None => (module_name, &[][..]),
    };

    let mut dir = root.to_path_buf();
    for package in packages {
        dir.push(package);
        fs::create_dir_all(&dir).map_err(|source| GeneratorError::WriteError {
            path: dir.display().to_string(),
            source,
        })?;
        let init = dir.join("__init__.py");
        fs::write(&init, "").map_err(|source| GeneratorError::WriteError {
            path: init.display().to_string(),
            source,
        })?;
    }

    let source_path = dir.join(format!("{file_stem}.py"));
    fs::write(&source_path, code).map_err(|source| GeneratorError::WriteError {
        path: source_path.display().to_string(),
        source,
    })?;
    Ok(source_path)
}
