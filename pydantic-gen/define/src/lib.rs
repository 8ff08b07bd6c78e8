//! Schema definition types for pydantic-gen.
//!
//! This crate provides the input side of code generation: a typed model of
//! a schema document and a loader that builds it from a YAML file, YAML
//! text, or an already-parsed [`serde_yaml::Value`].
//!
//! ## Input Format
//!
//! ```yaml
//! schemas:
//!   - name: User
//!     props:
//!       - name: id
//!         type: int
//!       - name: created
//!         type: datetime
//!         default: "2020-04-20 09:30"
//!       - name: nickname
//!         type: str
//!         optional: true
//!     config:
//!       - orm_mode: true
//! ```
//!
//! ## Core Types
//!
//! - [`SchemaDocument`] - Ordered list of record definitions
//! - [`RecordDef`] - One generated model class
//! - [`FieldDef`] - One field, with its type tag, optionality and default
//! - [`DefaultValue`] - Explicit unset/present default
//! - [`ConfigEntry`] - One class-level configuration assignment
//! - [`PrimitiveType`] - Recognized short type tags
//! - [`SchemaLoader`] - Path resolution with a fallback directory

mod document;
mod error;
mod loader;
mod types;

pub use document::{ConfigEntry, DefaultValue, FieldDef, RecordDef, SchemaDocument};
pub use error::{Result, SchemaError};
pub use loader::{DEFAULT_FALLBACK_DIR, SchemaLoader};
pub use types::{DATETIME_IMPORT, PrimitiveType, UUID_IMPORT};

// Re-exported so callers can build documents from values without a direct
// serde_yaml dependency.
pub use serde_yaml::Value;
