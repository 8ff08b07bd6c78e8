//! Auxiliary import accumulation.

use std::collections::BTreeSet;

use tracing::trace;

/// Import lines required by resolved field types.
///
/// One set is created per generation run and threaded through field and
/// record rendering by `&mut`. Lines are kept sorted so the rendered header
/// does not depend on which field registered an import first.
///
/// ## Examples
///
/// ```
/// use pydantic_gen::codegen::ImportSet;
///
/// let mut imports = ImportSet::new();
/// imports.register("import uuid");
/// imports.register("import datetime as dt");
/// imports.register("import uuid");
///
/// assert_eq!(imports.len(), 2);
/// assert_eq!(imports.render(), "import datetime as dt\nimport uuid");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSet {
    lines: BTreeSet<String>,
}

impl ImportSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an import line. Returns `false` if it was already present.
    pub fn register(&mut self, line: &str) -> bool {
        let added = self.lines.insert(line.to_string());
        if added {
            trace!(import = line, "Registered auxiliary import");
        }
        added
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Iterates the lines in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    /// Sorted, newline-joined lines; empty when nothing was registered.
    pub fn render(&self) -> String {
        self.iter().collect::<Vec<_>>().join("\n")
    }
}
