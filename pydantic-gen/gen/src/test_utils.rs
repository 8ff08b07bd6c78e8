//! Shared fixtures for pydantic-gen unit tests.

use pydantic_gen_define::{FieldDef, RecordDef, SchemaDocument, Value};

/// Builds the bundled `example.yml` document in code.
///
/// Kept in sync with `define/schemas/example.yml`; the generator tests
/// check that both produce the same module.
pub fn example_document() -> SchemaDocument {
    let numbers: Value = serde_yaml::from_str("[1, 2, 3]").expect("static YAML parses");

    SchemaDocument::new(vec![
        RecordDef::new("GeneratedSchema1").with_field(FieldDef::new("id", "int")),
        RecordDef::new("GeneratedSchema2")
            .with_field(FieldDef::new("id", "int"))
            .with_field(FieldDef::new("colors", "List[str]").optional())
            .with_field(FieldDef::new("numbers", "List[int]").with_default(numbers))
            .with_field(FieldDef::new("text", "str").with_default("default_string"))
            .with_field(FieldDef::new("date", "date").with_default("2020-04-20"))
            .with_field(FieldDef::new("dt_", "datetime").with_default("2020-04-20 09:30"))
            .with_field(FieldDef::new("time", "time").with_default("09:30"))
            .with_field(FieldDef::new("other_schema", "GeneratedSchema1"))
            .with_config("orm_mode", true),
    ])
}

/// The module the example document must produce.
pub const EXAMPLE_OUTPUT: &str = r#"from pydantic import BaseModel
from typing import *
import datetime as dt


class GeneratedSchema1(BaseModel):
    id: int


class GeneratedSchema2(BaseModel):
    id: int
    colors: Optional[List[str]]
    numbers: List[int] = [1, 2, 3]
    text: str = "default_string"
    date: dt.date = "2020-04-20"
    dt_: dt.datetime = "2020-04-20 09:30"
    time: dt.time = "09:30"
    other_schema: GeneratedSchema1

    class Config:
        orm_mode = True
"#;
