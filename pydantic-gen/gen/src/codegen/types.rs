//! Type expression resolution.
//!
//! A type tag is either a bare primitive (`int`, `date`), a reference to
//! another generated model (`GeneratedSchema1`), or a typing expression that
//! wraps either (`List[date]`, `Dict[str, uuid]`). Bare `date`, `datetime`,
//! `time` and `uuid` identifiers are qualified (`dt.date`, `uuid.UUID`) and
//! register the import they need; everything else is copied verbatim.

use pydantic_gen_define::PrimitiveType;

use super::ImportSet;

/// Resolves a type tag into the Python type expression to emit.
///
/// Identifiers already qualified with a module (`datetime.date`) and text
/// inside string literals (`Literal["date"]`) are left alone.
///
/// ## Examples
///
/// ```
/// use pydantic_gen::codegen::{ImportSet, resolve_type};
///
/// let mut imports = ImportSet::new();
/// assert_eq!(resolve_type("int", &mut imports), "int");
/// assert!(imports.is_empty());
///
/// assert_eq!(resolve_type("List[date]", &mut imports), "List[dt.date]");
/// assert_eq!(resolve_type("uuid", &mut imports), "uuid.UUID");
/// assert_eq!(imports.render(), "import datetime as dt\nimport uuid");
/// ```
pub fn resolve_type(type_tag: &str, imports: &mut ImportSet) -> String {
    let mut out = String::with_capacity(type_tag.len());
    let mut rest = type_tag;
    let mut before: Option<char> = None;

    while let Some(c) = rest.chars().next() {
        if is_ident_char(c) {
            let end = rest.find(|c: char| !is_ident_char(c)).unwrap_or(rest.len());
            let token = &rest[..end];
            let after = rest[end..].chars().next();

            if before == Some('.') || after == Some('.') {
                out.push_str(token);
            } else {
                out.push_str(&qualify(token, imports));
            }

            before = token.chars().last();
            rest = &rest[end..];
        } else if c == '"' || c == '\'' {
            let end = rest[1..].find(c).map_or(rest.len(), |i| i + 2);
            out.push_str(&rest[..end]);
            before = Some(c);
            rest = &rest[end..];
        } else {
            out.push(c);
            before = Some(c);
            rest = &rest[c.len_utf8()..];
        }
    }

    out
}

fn qualify(token: &str, imports: &mut ImportSet) -> String {
    let Some(ty) = PrimitiveType::from_tag(token) else {
        return token.to_string();
    };

    match ty.required_import() {
        Some(import) => {
            imports.register(import);
            ty.python_type().to_string()
        }
        None => token.to_string(),
    }
}

fn is_ident_char(c: char) -> bool {
    c == '_' || c.is_alphanumeric()
}
