//! Module assembly: header plus every record.

use pydantic_gen_define::SchemaDocument;
use tracing::debug;

use super::ImportSet;
use super::record::render_record;
use crate::config::GeneratorOptions;

/// Separator between top-level blocks: two blank lines.
const BLOCK_SEPARATOR: &str = "\n\n\n";

/// Renders a complete, unformatted module for `doc`.
///
/// A fresh [`ImportSet`] is created for every call, filled while the
/// records are rendered, and consumed by the header. Nothing carries over
/// between calls.
///
/// ## Examples
///
/// ```
/// use pydantic_gen::GeneratorOptions;
/// use pydantic_gen::codegen::render_module;
/// use pydantic_gen_define::{FieldDef, RecordDef, SchemaDocument};
///
/// let doc = SchemaDocument::new(vec![
///     RecordDef::new("Event").with_field(FieldDef::new("at", "datetime")),
/// ]);
///
/// let code = render_module(&doc, &GeneratorOptions::default());
/// assert_eq!(
///     code,
///     "from pydantic import BaseModel\nfrom typing import *\nimport datetime as dt\n\n\n\
///      class Event(BaseModel):\n    at: dt.datetime\n"
/// );
/// ```
pub fn render_module(doc: &SchemaDocument, options: &GeneratorOptions) -> String {
    let mut imports = ImportSet::new();

    let records: Vec<String> = doc
        .records
        .iter()
        .map(|record| render_record(record, options, &mut imports))
        .collect();

    debug!(
        records = records.len(),
        imports = imports.len(),
        "Rendered module body"
    );

    let header = render_header(options, &imports);

    let mut code = if records.is_empty() {
        header
    } else {
        [header, records.join(BLOCK_SEPARATOR)].join(BLOCK_SEPARATOR)
    };
    code.push('\n');
    code
}

/// Base-model and typing imports followed by the sorted auxiliary imports.
fn render_header(options: &GeneratorOptions, imports: &ImportSet) -> String {
    let mut lines = vec![
        format!(
            "from {} import {}",
            options.base_module, options.base_class
        ),
        "from typing import *".to_string(),
    ];
    if !imports.is_empty() {
        lines.push(imports.render());
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::example_document;
    use pydantic_gen_define::{FieldDef, RecordDef};

    #[test]
    fn header_without_auxiliary_imports() {
        let doc = SchemaDocument::new(vec![
            RecordDef::new("A").with_field(FieldDef::new("id", "int")),
        ]);
        assert_eq!(
            render_module(&doc, &GeneratorOptions::default()),
            "from pydantic import BaseModel\nfrom typing import *\n\n\nclass A(BaseModel):\n    id: int\n"
        );
    }

    #[test]
    fn records_are_separated_by_two_blank_lines() {
        let doc = SchemaDocument::new(vec![
            RecordDef::new("A").with_field(FieldDef::new("id", "int")),
            RecordDef::new("B").with_field(FieldDef::new("a", "A")),
        ]);
        let code = render_module(&doc, &GeneratorOptions::default());
        assert!(code.contains("    id: int\n\n\nclass B(BaseModel):\n    a: A\n"));
    }

    #[test]
    fn imports_are_sorted_regardless_of_field_order() {
        let forward = SchemaDocument::new(vec![
            RecordDef::new("A")
                .with_field(FieldDef::new("key", "uuid"))
                .with_field(FieldDef::new("day", "date"))
                .with_field(FieldDef::new("at", "time"))
                .with_field(FieldDef::new("when", "datetime")),
        ]);
        let backward = SchemaDocument::new(vec![
            RecordDef::new("A")
                .with_field(FieldDef::new("when", "datetime"))
                .with_field(FieldDef::new("at", "time"))
                .with_field(FieldDef::new("day", "date"))
                .with_field(FieldDef::new("key", "uuid")),
        ]);

        let options = GeneratorOptions::default();
        for doc in [&forward, &backward] {
            let code = render_module(doc, &options);
            assert!(code.starts_with(
                "from pydantic import BaseModel\nfrom typing import *\nimport datetime as dt\nimport uuid\n\n\n"
            ));
            assert_eq!(code.matches("import datetime as dt").count(), 1);
            assert_eq!(code.matches("import uuid").count(), 1);
        }
    }

    #[test]
    fn imports_do_not_leak_between_runs() {
        let options = GeneratorOptions::default();
        let temporal = SchemaDocument::new(vec![
            RecordDef::new("A").with_field(FieldDef::new("day", "date")),
        ]);
        let plain = SchemaDocument::new(vec![
            RecordDef::new("B").with_field(FieldDef::new("id", "int")),
        ]);

        let first = render_module(&temporal, &options);
        let second = render_module(&plain, &options);

        assert!(first.contains("import datetime as dt"));
        assert!(!second.contains("import datetime as dt"));
    }

    #[test]
    fn custom_base_model_import() {
        let options = GeneratorOptions::default()
            .with_base_module("pydantic.v1")
            .with_base_class("BaseModel");
        let code = render_module(&example_document(), &options);
        assert!(code.starts_with("from pydantic.v1 import BaseModel\n"));
    }

    #[test]
    fn rendering_is_deterministic() {
        let options = GeneratorOptions::default();
        let doc = example_document();
        assert_eq!(render_module(&doc, &options), render_module(&doc, &options));
    }
}
