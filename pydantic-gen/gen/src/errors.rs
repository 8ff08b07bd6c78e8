//! Error types for the pydantic generator.

use std::process::ExitStatus;

use pydantic_gen_define::SchemaError;
use thiserror::Error;

/// Errors that can occur during code generation.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// Failed to load or validate the schema document
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// The formatter rejected the generated source
    #[error("Formatting failed: {0}")]
    Format(#[from] FormatError),

    /// Failed to write output file
    #[error("Failed to write output file '{path}': {source}")]
    WriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to read an input file other than the schema (e.g. options)
    #[error("Failed to read '{path}': {source}")]
    ReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// No usable Python interpreter was found.
    #[error("No Python interpreter found (tried: {tried})")]
    InterpreterNotFound { tried: String },

    /// The requested module name cannot be imported by Python.
    #[error("Invalid module name '{name}': {reason}")]
    InvalidModuleName { name: String, reason: String },

    /// The generated code failed to import in the Python runtime.
    ///
    /// `stderr` carries the interpreter's traceback.
    #[error("Generated code failed to execute as module '{module}': {stderr}")]
    ExecutionFailed { module: String, stderr: String },
}

/// Errors raised by a [`Formatter`](crate::format::Formatter).
#[derive(Debug, Error)]
pub enum FormatError {
    /// The source is not structurally valid Python.
    #[error("Invalid source at line {line}: {message}")]
    InvalidSource { line: usize, message: String },

    /// The external formatter program is not on the PATH.
    #[error("Formatter program '{0}' not found in PATH")]
    ProgramNotFound(String),

    /// The external formatter could not be started or fed.
    #[error("Failed to run formatter '{program}': {source}")]
    Io {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The external formatter exited unsuccessfully.
    #[error("Formatter '{program}' failed ({status}): {stderr}")]
    Command {
        program: String,
        status: ExitStatus,
        stderr: String,
    },

    /// The external formatter wrote something that is not UTF-8.
    #[error("Formatter '{program}' produced non-UTF-8 output")]
    InvalidOutput { program: String },
}
