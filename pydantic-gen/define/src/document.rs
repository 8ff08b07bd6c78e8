//! The schema document model.
//!
//! A [`SchemaDocument`] is an ordered list of [`RecordDef`]s, each of which
//! becomes one generated model class. Documents are built fresh for every
//! generation run and never mutated afterwards.
//!
//! The shape checks in this module turn a parsed YAML value into the typed
//! model and report [`SchemaError::Malformed`] with a dotted location
//! (`schemas[1].props[3].type`) when something is missing or has the wrong
//! kind.

use serde_yaml::{Mapping, Value};

use crate::error::{Result, SchemaError};

/// The top-level parsed input: an ordered sequence of record definitions.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SchemaDocument {
    pub records: Vec<RecordDef>,
}

impl SchemaDocument {
    /// Creates a document from already-built records.
    pub fn new(records: Vec<RecordDef>) -> Self {
        Self { records }
    }
}

/// One generated model type.
///
/// ## Examples
///
/// ```
/// use pydantic_gen_define::{FieldDef, RecordDef};
///
/// let record = RecordDef::new("User")
///     .with_field(FieldDef::new("id", "int"))
///     .with_field(FieldDef::new("email", "str").optional())
///     .with_config("orm_mode", true);
///
/// assert_eq!(record.fields.len(), 2);
/// assert_eq!(record.config[0].key, "orm_mode");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RecordDef {
    /// Used verbatim as the generated class name.
    pub name: String,
    pub fields: Vec<FieldDef>,
    /// Class-level configuration entries, in document order.
    pub config: Vec<ConfigEntry>,
}

impl RecordDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            config: Vec::new(),
        }
    }

    pub fn with_field(mut self, field: FieldDef) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_config(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.config.push(ConfigEntry {
            key: key.into(),
            value: value.into(),
        });
        self
    }
}

/// One field of a record.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDef {
    pub name: String,
    /// Either a recognized primitive tag or a verbatim type expression.
    pub type_tag: String,
    pub optional: bool,
    pub default: DefaultValue,
}

impl FieldDef {
    /// Creates a required field with no default.
    pub fn new(name: impl Into<String>, type_tag: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_tag: type_tag.into(),
            optional: false,
            default: DefaultValue::Unset,
        }
    }

    /// Marks the field as optional.
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = DefaultValue::Present(value.into());
        self
    }
}

/// Whether a field declares a default.
///
/// Only the absence of the `default` key yields [`DefaultValue::Unset`].
/// Falsy literals such as `0`, `false`, `""` and `null` are all present.
///
/// ## Examples
///
/// ```
/// use pydantic_gen_define::DefaultValue;
///
/// let zero = DefaultValue::Present(0.into());
/// assert!(zero.is_set());
/// assert!(!DefaultValue::Unset.is_set());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DefaultValue {
    #[default]
    Unset,
    Present(Value),
}

impl DefaultValue {
    pub fn is_set(&self) -> bool {
        matches!(self, Self::Present(_))
    }

    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Self::Unset => None,
            Self::Present(value) => Some(value),
        }
    }
}

/// A single class-level configuration assignment.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigEntry {
    pub key: String,
    pub value: Value,
}

/// Converts a parsed YAML value into a typed document.
pub(crate) fn document_from_value(value: &Value) -> Result<SchemaDocument> {
    let root = expect_mapping(value, "<root>")?;
    let schemas = root
        .get("schemas")
        .ok_or_else(|| SchemaError::malformed("<root>", "missing required key 'schemas'"))?;
    let schemas = schemas.as_sequence().ok_or_else(|| {
        SchemaError::malformed(
            "schemas",
            format!("expected a sequence of records, found {}", kind(schemas)),
        )
    })?;

    let records = schemas
        .iter()
        .enumerate()
        .map(|(i, record)| record_from_value(record, &format!("schemas[{i}]")))
        .collect::<Result<Vec<_>>>()?;

    Ok(SchemaDocument { records })
}

fn record_from_value(value: &Value, location: &str) -> Result<RecordDef> {
    let map = expect_mapping(value, location)?;
    let name = required_str(map, "name", location)?;

    let props_location = format!("{location}.props");
    let props = map
        .get("props")
        .ok_or_else(|| SchemaError::malformed(location, "missing required key 'props'"))?;
    let props = props.as_sequence().ok_or_else(|| {
        SchemaError::malformed(
            &props_location,
            format!("expected a sequence of fields, found {}", kind(props)),
        )
    })?;

    let fields = props
        .iter()
        .enumerate()
        .map(|(i, prop)| field_from_value(prop, &format!("{props_location}[{i}]")))
        .collect::<Result<Vec<_>>>()?;

    let config = match map.get("config") {
        None | Some(Value::Null) => Vec::new(),
        Some(config) => config_from_value(config, &format!("{location}.config"))?,
    };

    Ok(RecordDef {
        name,
        fields,
        config,
    })
}

fn field_from_value(value: &Value, location: &str) -> Result<FieldDef> {
    let map = expect_mapping(value, location)?;
    let name = required_str(map, "name", location)?;
    let type_tag = required_str(map, "type", location)?;

    let optional = match map.get("optional") {
        None | Some(Value::Null) => false,
        Some(Value::Bool(flag)) => *flag,
        Some(other) => {
            return Err(SchemaError::malformed(
                format!("{location}.optional"),
                format!("expected a boolean, found {}", kind(other)),
            ));
        }
    };

    let default = map
        .get("default")
        .cloned()
        .map_or(DefaultValue::Unset, DefaultValue::Present);

    Ok(FieldDef {
        name,
        type_tag,
        optional,
        default,
    })
}

/// Accepts either the canonical sequence of single-key mappings or a plain
/// mapping; both keep document order.
fn config_from_value(value: &Value, location: &str) -> Result<Vec<ConfigEntry>> {
    match value {
        Value::Sequence(items) => items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let item_location = format!("{location}[{i}]");
                let map = expect_mapping(item, &item_location)?;
                let mut pairs = map.iter();
                match (pairs.next(), pairs.next()) {
                    (Some((key, value)), None) => config_entry(key, value, &item_location),
                    _ => Err(SchemaError::malformed(
                        item_location,
                        format!("expected exactly one key/value pair, found {}", map.len()),
                    )),
                }
            })
            .collect(),
        Value::Mapping(map) => map
            .iter()
            .map(|(key, value)| config_entry(key, value, location))
            .collect(),
        other => Err(SchemaError::malformed(
            location,
            format!(
                "expected a sequence of single-key mappings, found {}",
                kind(other)
            ),
        )),
    }
}

fn config_entry(key: &Value, value: &Value, location: &str) -> Result<ConfigEntry> {
    let key = key.as_str().ok_or_else(|| {
        SchemaError::malformed(
            location,
            format!("config keys must be strings, found {}", kind(key)),
        )
    })?;
    Ok(ConfigEntry {
        key: key.to_string(),
        value: value.clone(),
    })
}

fn expect_mapping<'a>(value: &'a Value, location: &str) -> Result<&'a Mapping> {
    value.as_mapping().ok_or_else(|| {
        SchemaError::malformed(location, format!("expected a mapping, found {}", kind(value)))
    })
}

fn required_str(map: &Mapping, key: &str, location: &str) -> Result<String> {
    match map.get(key) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(SchemaError::malformed(
            format!("{location}.{key}"),
            format!("expected a string, found {}", kind(other)),
        )),
        None => Err(SchemaError::malformed(
            location,
            format!("missing required key '{key}'"),
        )),
    }
}

/// Human-readable name of a YAML value's kind, for error messages.
fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
