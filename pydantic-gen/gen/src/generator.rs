//! The generation pipeline: validate, render, format.

use std::fmt;
use std::path::Path;

use pydantic_gen_define::{SchemaDocument, SchemaLoader, Value};
use tracing::{debug, instrument};

use crate::codegen::render_module;
use crate::config::GeneratorOptions;
use crate::errors::GeneratorError;
use crate::format::{Formatter, formatter_for};
use crate::output::GeneratedModule;
use crate::validation::validate_document;

/// Turns schema documents into formatted pydantic modules.
///
/// A generator holds no per-run state. Every call builds its imports from
/// scratch, so one instance can be reused across documents and threads.
///
/// ## Examples
///
/// ```
/// use pydantic_gen::ModelGenerator;
///
/// let yaml = "schemas:\n  - name: Point\n    props:\n      - name: x\n        type: float\n";
/// let module = ModelGenerator::default().generate_from_str(yaml).unwrap();
///
/// assert!(module.code().contains("class Point(BaseModel):\n    x: float\n"));
/// ```
pub struct ModelGenerator {
    options: GeneratorOptions,
    loader: SchemaLoader,
    formatter: Box<dyn Formatter>,
}

impl fmt::Debug for ModelGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelGenerator")
            .field("options", &self.options)
            .field("loader", &self.loader)
            .finish_non_exhaustive()
    }
}

impl Default for ModelGenerator {
    fn default() -> Self {
        Self {
            options: GeneratorOptions::default(),
            loader: SchemaLoader::default(),
            formatter: formatter_for(&Default::default()),
        }
    }
}

impl ModelGenerator {
    /// Creates a generator from validated options.
    ///
    /// ## Errors
    ///
    /// Returns `GeneratorError::ConfigError` if the options are invalid.
    pub fn new(options: GeneratorOptions) -> Result<Self, GeneratorError> {
        options.validate()?;

        let loader = match &options.fallback_dir {
            Some(dir) => SchemaLoader::default().with_fallback_dir(dir),
            None => SchemaLoader::default(),
        };
        let formatter = formatter_for(&options.formatter);

        Ok(Self {
            options,
            loader,
            formatter,
        })
    }

    pub fn with_loader(mut self, loader: SchemaLoader) -> Self {
        self.loader = loader;
        self
    }

    /// Replaces the formatter chosen by the options.
    pub fn with_formatter(mut self, formatter: impl Formatter + 'static) -> Self {
        self.formatter = Box::new(formatter);
        self
    }

    pub fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    /// Generates a module for an already-loaded document.
    ///
    /// ## Errors
    ///
    /// - `GeneratorError::Schema` if the document fails validation
    /// - `GeneratorError::Format` if the formatter rejects the source
    #[instrument(skip_all, fields(records = doc.records.len()))]
    pub fn generate(&self, doc: &SchemaDocument) -> Result<GeneratedModule, GeneratorError> {
        validate_document(doc)?;

        let raw = render_module(doc, &self.options);
        let code = self.formatter.format(&raw)?;
        debug!(bytes = code.len(), "Formatted generated module");

        Ok(GeneratedModule::new(code))
    }

    /// Loads the schema at `path` (with fallback) and generates its module.
    pub fn generate_from_path(
        &self,
        path: impl AsRef<Path>,
    ) -> Result<GeneratedModule, GeneratorError> {
        let doc = self.loader.load_path(path)?;
        self.generate(&doc)
    }

    /// Parses YAML text and generates its module.
    pub fn generate_from_str(&self, yaml: &str) -> Result<GeneratedModule, GeneratorError> {
        let doc = self.loader.load_str(yaml)?;
        self.generate(&doc)
    }

    /// Generates from an already-parsed YAML value.
    pub fn generate_from_value(&self, value: &Value) -> Result<GeneratedModule, GeneratorError> {
        let doc = self.loader.load_value(value)?;
        self.generate(&doc)
    }
}
