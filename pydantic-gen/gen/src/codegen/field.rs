//! Field declaration rendering.

use pydantic_gen_define::{FieldDef, PrimitiveType, Value};

use super::ImportSet;
use super::literal::{python_str, quote_string};
use super::types::resolve_type;

/// Renders one field declaration line (without indentation).
///
/// Steps, in order:
///
/// 1. The default clause is chosen from the *unresolved* tag: `str`, `date`,
///    `datetime` and `time` get a quoted default, everything else gets the
///    literal's `str()` form.
/// 2. The type is resolved, qualifying temporal/uuid names and registering
///    their imports.
/// 3. Optional fields are wrapped in `Optional[...]`.
///
/// ## Examples
///
/// ```
/// use pydantic_gen::codegen::{ImportSet, render_field};
/// use pydantic_gen_define::FieldDef;
///
/// let mut imports = ImportSet::new();
///
/// let text = FieldDef::new("text", "str").with_default("default_string");
/// assert_eq!(render_field(&text, &mut imports), "text: str = \"default_string\"");
///
/// let created = FieldDef::new("created", "date").optional().with_default("2020-04-20");
/// assert_eq!(
///     render_field(&created, &mut imports),
///     "created: Optional[dt.date] = \"2020-04-20\""
/// );
/// assert_eq!(imports.render(), "import datetime as dt");
/// ```
pub fn render_field(field: &FieldDef, imports: &mut ImportSet) -> String {
    let default = default_clause(field);
    let resolved = resolve_type(&field.type_tag, imports);

    let type_expr = if field.optional {
        format!("Optional[{resolved}]")
    } else {
        resolved
    };

    format!("{}: {}{}", field.name, type_expr, default)
}

/// The ` = <value>` suffix, or an empty string when no default is set.
///
/// A null default is ` = None` whatever the type.
pub fn default_clause(field: &FieldDef) -> String {
    let Some(value) = field.default.as_value() else {
        return String::new();
    };

    if value.is_null() {
        return " = None".to_string();
    }

    let quoted = PrimitiveType::from_tag(&field.type_tag).is_some_and(|ty| ty.quotes_default());

    if quoted {
        format!(" = {}", quote_string(&python_str(value)))
    } else {
        format!(" = {}", unquoted_literal(value))
    }
}

/// An empty pass-through string would leave a dangling `=`; it is the
/// empty string literal instead.
fn unquoted_literal(value: &Value) -> String {
    match value {
        Value::String(s) if s.trim().is_empty() => quote_string(s),
        other => python_str(other),
    }
}
