//! Pydantic model generator library.
//!
//! This crate turns YAML schema documents loaded by `pydantic-gen-define`
//! into Python modules of pydantic model classes. For every record the
//! generated module contains:
//!
//! - A class inheriting from the configured base model (`BaseModel`)
//! - One annotated attribute per field, in input order, with an optional
//!   default value
//! - A nested `class Config:` block when the record carries config entries
//!
//! ## Modules
//!
//! - [`codegen`] - Rendering of fields, records and the module header
//! - [`validation`] - Name and collision checks run before rendering
//! - [`format`] - Layout normalisation and external formatters
//! - [`generator`] - The validate → render → format pipeline
//! - [`output`] - The generated module, atomic writes
//! - [`runtime`] - Importing generated modules into a Python interpreter
//! - [`config`] - Generator options
//! - [`errors`] - Error types for the generator
//!
//! ## Example Usage
//!
//! ```no_run
//! use pydantic_gen::ModelGenerator;
//!
//! let generator = ModelGenerator::default();
//! let module = generator.generate_from_path("example.yml").unwrap();
//!
//! module.to_file("generated/models.py").unwrap();
//! println!("{module}");
//! ```
//!
//! ## Generated Code Structure
//!
//! For a schema with records `Owner` and `Pet`:
//!
//! ```text
//! from pydantic import BaseModel
//! from typing import *
//! import datetime as dt
//!
//!
//! class Owner(BaseModel):
//!     id: int
//!
//!
//! class Pet(BaseModel):
//!     name: str = "rex"
//!     born: dt.date = "2020-04-20"
//!     owner: Optional[Owner]
//!
//!     class Config:
//!         orm_mode = True
//! ```

pub mod codegen;
pub mod config;
pub mod errors;
pub mod format;
pub mod generator;
pub mod output;
pub mod runtime;
pub mod validation;

#[cfg(test)]
pub(crate) mod test_utils;

pub use config::{FormatterKind, GeneratorOptions};
pub use errors::{FormatError, GeneratorError};
pub use generator::ModelGenerator;
pub use output::GeneratedModule;
pub use runtime::{LoadedModule, PythonRuntime};
