//! Record (model class) rendering.

use pydantic_gen_define::{ConfigEntry, RecordDef};

use super::ImportSet;
use super::field::render_field;
use super::literal::python_str;
use crate::config::GeneratorOptions;

/// Renders one record as a model class.
///
/// Fields appear in input order. When config entries exist they follow in a
/// nested `class Config:` block separated from the fields by a blank line.
/// A record with neither fields nor config gets a `pass` body.
///
/// ## Examples
///
/// ```
/// use pydantic_gen::GeneratorOptions;
/// use pydantic_gen::codegen::{ImportSet, render_record};
/// use pydantic_gen_define::{FieldDef, RecordDef};
///
/// let record = RecordDef::new("User")
///     .with_field(FieldDef::new("id", "int"))
///     .with_config("orm_mode", true);
///
/// let code = render_record(&record, &GeneratorOptions::default(), &mut ImportSet::new());
/// assert_eq!(
///     code,
///     "class User(BaseModel):\n    id: int\n\n    class Config:\n        orm_mode = True"
/// );
/// ```
pub fn render_record(
    record: &RecordDef,
    options: &GeneratorOptions,
    imports: &mut ImportSet,
) -> String {
    let pad = " ".repeat(options.indent);

    let mut body: Vec<String> = record
        .fields
        .iter()
        .map(|field| format!("{pad}{}", render_field(field, imports)))
        .collect();

    if let Some(config) = render_config(&record.config, &pad) {
        if !body.is_empty() {
            body.push(String::new());
        }
        body.push(config);
    }

    if body.is_empty() {
        body.push(format!("{pad}pass"));
    }

    format!(
        "class {}({}):\n{}",
        record.name,
        options.base_class,
        body.join("\n")
    )
}

/// The nested configuration block, or `None` when there are no entries.
fn render_config(entries: &[ConfigEntry], pad: &str) -> Option<String> {
    if entries.is_empty() {
        return None;
    }

    let mut lines = vec![format!("{pad}class Config:")];
    lines.extend(
        entries
            .iter()
            .map(|entry| format!("{pad}{pad}{} = {}", entry.key, python_str(&entry.value))),
    );
    Some(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pydantic_gen_define::FieldDef;

    fn render(record: &RecordDef) -> String {
        render_record(record, &GeneratorOptions::default(), &mut ImportSet::new())
    }

    #[test]
    fn fields_render_in_input_order() {
        let record = RecordDef::new("Ordered")
            .with_field(FieldDef::new("zeta", "int"))
            .with_field(FieldDef::new("alpha", "str"))
            .with_field(FieldDef::new("mid", "float"));

        assert_eq!(
            render(&record),
            "class Ordered(BaseModel):\n    zeta: int\n    alpha: str\n    mid: float"
        );
    }

    #[test]
    fn no_config_means_no_block_and_no_trailing_blank() {
        let record = RecordDef::new("Plain").with_field(FieldDef::new("id", "int"));
        let code = render(&record);

        assert!(!code.contains("class Config"));
        assert!(!code.ends_with('\n'));
        assert_eq!(code, "class Plain(BaseModel):\n    id: int");
    }

    #[test]
    fn config_entries_keep_their_order() {
        let record = RecordDef::new("Configured")
            .with_field(FieldDef::new("id", "int"))
            .with_config("orm_mode", true)
            .with_config("anystr_strip_whitespace", true)
            .with_config("max_anystr_length", 10);

        assert_eq!(
            render(&record),
            "class Configured(BaseModel):\n    id: int\n\n    class Config:\n        orm_mode = True\n        anystr_strip_whitespace = True\n        max_anystr_length = 10"
        );
    }

    #[test]
    fn config_only_record_has_no_leading_blank() {
        let record = RecordDef::new("OnlyConfig").with_config("extra", "'forbid'");
        assert_eq!(
            render(&record),
            "class OnlyConfig(BaseModel):\n    class Config:\n        extra = 'forbid'"
        );
    }

    #[test]
    fn empty_record_gets_pass_body() {
        assert_eq!(render(&RecordDef::new("Empty")), "class Empty(BaseModel):\n    pass");
    }

    #[test]
    fn indent_and_base_class_follow_options() {
        let options = GeneratorOptions::default()
            .with_indent(2)
            .with_base_class("Schema");
        let record = RecordDef::new("Small")
            .with_field(FieldDef::new("id", "int"))
            .with_config("frozen", true);

        let code = render_record(&record, &options, &mut ImportSet::new());
        assert_eq!(
            code,
            "class Small(Schema):\n  id: int\n\n  class Config:\n    frozen = True"
        );
    }

    #[test]
    fn imports_accumulate_across_fields() {
        let record = RecordDef::new("Temporal")
            .with_field(FieldDef::new("when", "datetime"))
            .with_field(FieldDef::new("key", "uuid"))
            .with_field(FieldDef::new("day", "date"));

        let mut imports = ImportSet::new();
        render_record(&record, &GeneratorOptions::default(), &mut imports);
        assert_eq!(imports.render(), "import datetime as dt\nimport uuid");
    }
}
