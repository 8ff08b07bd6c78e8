//! Code generation for pydantic model modules.
//!
//! This module turns a [`SchemaDocument`](pydantic_gen_define::SchemaDocument)
//! into Python source text. Each submodule handles one level of the tree
//! walk:
//!
//! - [`types`] - Resolves type tags, qualifying temporal/uuid names
//! - [`literal`] - Renders YAML values as Python literals
//! - [`field`] - One `name: type = default` line
//! - [`record`] - One model class with its optional `Config` block
//! - [`module`] - Header imports plus every record
//! - [`imports`] - The per-run auxiliary import set
//!
//! ## Code Generation Flow
//!
//! 1. [`render_module`] creates an empty [`ImportSet`]
//! 2. Each record is rendered via [`render_record`], which renders each
//!    field via [`render_field`]; field types needing an import register it
//! 3. The header is rendered last from the now-complete import set
//!
//! The output is unformatted; see [`crate::format`] for the formatting pass
//! and [`crate::generator`] for the full pipeline.

pub mod field;
pub mod imports;
pub mod literal;
pub mod module;
pub mod record;
pub mod types;

pub use field::{default_clause, render_field};
pub use imports::ImportSet;
pub use module::render_module;
pub use record::render_record;
pub use types::resolve_type;
