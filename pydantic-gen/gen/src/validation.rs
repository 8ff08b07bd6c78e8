//! Pre-generation validation for schema documents.
//!
//! The loader only checks shape. This module checks the things that would
//! otherwise surface as broken generated code: names that are not Python
//! identifiers and names that collide.
//!
//! ## Validation Checks
//!
//! - **Empty document**: at least one record must be defined
//! - **Identifiers**: record names, field names and config keys must be
//!   valid Python identifiers and not keywords
//! - **Collisions**: record names are unique per document; field names and
//!   config keys are unique per record
//! - **Types**: type tags must not be empty
//!
//! ## Examples
//!
//! ```
//! use pydantic_gen::validation::validate_document;
//! use pydantic_gen_define::{FieldDef, RecordDef, SchemaDocument};
//!
//! let doc = SchemaDocument::new(vec![
//!     RecordDef::new("User").with_field(FieldDef::new("id", "int")),
//! ]);
//! assert!(validate_document(&doc).is_ok());
//!
//! let clash = SchemaDocument::new(vec![RecordDef::new("User"), RecordDef::new("User")]);
//! assert!(validate_document(&clash).is_err());
//! ```

use std::collections::HashMap;

use pydantic_gen_define::{SchemaDocument, SchemaError};

/// Python reserved words. Soft keywords (`match`, `case`, `type`) are valid
/// identifiers and are not listed.
const PYTHON_KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global",
    "if", "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return",
    "try", "while", "with", "yield",
];

/// Returns true if `name` is lexically a Python identifier.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first == '_' || first.is_alphabetic() => {
            chars.all(|c| c == '_' || c.is_alphanumeric())
        }
        _ => false,
    }
}

/// Returns true if `name` is a Python reserved word.
pub fn is_keyword(name: &str) -> bool {
    PYTHON_KEYWORDS.contains(&name)
}

/// Explains why `name` cannot be used as a Python name, if it can't.
pub fn identifier_problem(name: &str) -> Option<String> {
    if name.is_empty() {
        Some("name must not be empty".to_string())
    } else if !is_identifier(name) {
        Some(format!("'{name}' is not a valid Python identifier"))
    } else if is_keyword(name) {
        Some(format!("'{name}' is a reserved Python keyword"))
    } else {
        None
    }
}

/// Validates a schema document before code generation.
///
/// ## Errors
///
/// Returns [`SchemaError::Malformed`] pointing at the first offending
/// record, field or config entry.
pub fn validate_document(doc: &SchemaDocument) -> Result<(), SchemaError> {
    if doc.records.is_empty() {
        return Err(SchemaError::malformed(
            "schemas",
            "document defines no records",
        ));
    }

    let mut record_names: HashMap<&str, usize> = HashMap::new();

    for (i, record) in doc.records.iter().enumerate() {
        let location = format!("schemas[{i}]");

        check_name(&record.name, &format!("{location}.name"))?;
        if let Some(first) = record_names.insert(record.name.as_str(), i) {
            return Err(SchemaError::malformed(
                format!("{location}.name"),
                format!(
                    "duplicate record name '{}' (first defined at schemas[{first}])",
                    record.name
                ),
            ));
        }

        let mut field_names: HashMap<&str, usize> = HashMap::new();
        for (j, field) in record.fields.iter().enumerate() {
            let field_location = format!("{location}.props[{j}]");

            check_name(&field.name, &format!("{field_location}.name"))?;
            if let Some(first) = field_names.insert(field.name.as_str(), j) {
                return Err(SchemaError::malformed(
                    format!("{field_location}.name"),
                    format!(
                        "duplicate field name '{}' in record '{}' (first defined at props[{first}])",
                        field.name, record.name
                    ),
                ));
            }

            if field.type_tag.trim().is_empty() {
                return Err(SchemaError::malformed(
                    format!("{field_location}.type"),
                    "type must not be empty",
                ));
            }
        }

        let mut config_keys: HashMap<&str, usize> = HashMap::new();
        for (k, entry) in record.config.iter().enumerate() {
            let config_location = format!("{location}.config[{k}]");

            check_name(&entry.key, &config_location)?;
            if let Some(first) = config_keys.insert(entry.key.as_str(), k) {
                return Err(SchemaError::malformed(
                    config_location,
                    format!(
                        "duplicate config key '{}' in record '{}' (first defined at config[{first}])",
                        entry.key, record.name
                    ),
                ));
            }
        }
    }

    Ok(())
}

fn check_name(name: &str, location: &str) -> Result<(), SchemaError> {
    match identifier_problem(name) {
        Some(reason) => Err(SchemaError::malformed(location, reason)),
        None => Ok(()),
    }
}
