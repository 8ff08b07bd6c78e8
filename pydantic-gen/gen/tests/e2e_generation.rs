//! End-to-end tests: load a schema, generate a module, and check the result.
//!
//! The expected module lives in `tests/fixtures/example_output.py`. Tests that
//! import the generated code need a Python interpreter with pydantic and
//! return early when none is available.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

use pydantic_gen::{GeneratorError, ModelGenerator, PythonRuntime};
use pydantic_gen_define::{SchemaError, SchemaLoader, Value};

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn expected_output() -> String {
    fs::read_to_string(fixture("example_output.py")).expect("fixture exists")
}

fn example_yaml() -> String {
    fs::read_to_string(fixture("example.yml")).expect("fixture exists")
}

/// An interpreter that can `import pydantic`, if one is installed.
fn pydantic_runtime() -> Option<PythonRuntime> {
    let runtime = PythonRuntime::discover().ok()?;
    let status = Command::new(runtime.interpreter())
        .args(["-c", "import pydantic"])
        .output()
        .ok()?
        .status;
    status.success().then_some(runtime)
}

#[test]
fn example_schema_generates_expected_module() {
    let module = ModelGenerator::default()
        .generate_from_path(fixture("example.yml"))
        .unwrap();

    assert_eq!(module.code(), expected_output());
}

#[test]
fn all_entry_points_agree() {
    let generator = ModelGenerator::default();
    let yaml = example_yaml();
    let value: Value = serde_yaml::from_str(&yaml).unwrap();

    let from_path = generator.generate_from_path(fixture("example.yml")).unwrap();
    let from_str = generator.generate_from_str(&yaml).unwrap();
    let from_value = generator.generate_from_value(&value).unwrap();

    assert_eq!(from_path, from_str);
    assert_eq!(from_str, from_value);
}

#[test]
fn to_file_writes_exact_module() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let target = temp_dir.path().join("out/_result.py");

    let module = ModelGenerator::default()
        .generate_from_str(&example_yaml())
        .unwrap();
    let written = module.to_file(&target).unwrap();

    assert!(written.is_file());
    assert_eq!(fs::read_to_string(&written).unwrap(), expected_output());
}

#[test]
fn fresh_generators_are_deterministic() {
    let yaml = example_yaml();
    let first = ModelGenerator::default().generate_from_str(&yaml).unwrap();
    let second = ModelGenerator::default().generate_from_str(&yaml).unwrap();
    assert_eq!(first.code(), second.code());
}

#[test]
fn import_lines_are_sorted_regardless_of_field_order() {
    let yaml = r#"
schemas:
  - name: Event
    props:
      - name: key
        type: uuid
      - name: seen
        type: List[date]
      - name: at
        type: datetime
"#;
    let module = ModelGenerator::default().generate_from_str(yaml).unwrap();

    assert!(module.code().starts_with(
        "from pydantic import BaseModel\nfrom typing import *\nimport datetime as dt\nimport uuid\n\n\n"
    ));
    assert!(module.code().contains("    key: uuid.UUID\n"));
    assert!(module.code().contains("    seen: List[dt.date]\n"));
    assert!(module.code().contains("    at: dt.datetime\n"));
}

#[test]
fn falsy_defaults_are_kept() {
    let yaml = r#"
schemas:
  - name: Counters
    props:
      - name: count
        type: int
        default: 0
      - name: enabled
        type: bool
        default: false
      - name: label
        type: str
        default: ""
"#;
    let module = ModelGenerator::default().generate_from_str(yaml).unwrap();

    assert!(module.code().contains("    count: int = 0\n"));
    assert!(module.code().contains("    enabled: bool = False\n"));
    assert!(module.code().contains("    label: str = \"\"\n"));
}

#[test]
fn null_defaults_render_none_for_quoted_types() {
    let yaml = r#"
schemas:
  - name: Person
    props:
      - name: nick
        type: str
        optional: true
        default: null
      - name: born
        type: date
        optional: true
        default: ~
"#;
    let module = ModelGenerator::default().generate_from_str(yaml).unwrap();

    assert!(module.code().contains("    nick: Optional[str] = None\n"));
    assert!(module.code().contains("    born: Optional[dt.date] = None\n"));
}

#[test]
fn missing_schema_is_not_found() {
    let temp_dir = TempDir::new().unwrap();
    let generator =
        ModelGenerator::default().with_loader(SchemaLoader::new().with_fallback_dir(temp_dir.path()));

    let err = generator.generate_from_path("foobar.yml").unwrap_err();
    assert!(matches!(
        err,
        GeneratorError::Schema(SchemaError::NotFound { .. })
    ));
}

#[test]
fn malformed_schema_reports_location() {
    let yaml = "schemas:\n  - name: Broken\n    props:\n      - name: id\n        type: 5\n";
    let err = ModelGenerator::default().generate_from_str(yaml).unwrap_err();

    match err {
        GeneratorError::Schema(SchemaError::Malformed { location, .. }) => {
            assert_eq!(location, "schemas[0].props[0].type");
        }
        other => panic!("expected Malformed, got {other:?}"),
    }
}

#[test]
fn generated_module_imports_and_instantiates() {
    let Some(runtime) = pydantic_runtime() else {
        return;
    };
    let module = ModelGenerator::default()
        .generate_from_path(fixture("example.yml"))
        .unwrap();

    let loaded = module.load(&runtime, "generated_output").unwrap();
    let stdout = loaded
        .run("from generated_output import GeneratedSchema1; print(GeneratedSchema1(id=1).id)")
        .unwrap();

    assert_eq!(stdout.trim(), "1");
}
