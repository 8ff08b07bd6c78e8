//! Python literal rendering for YAML values.
//!
//! Defaults and config values arrive as parsed YAML. They are written into
//! the generated module following Python's `str()` conventions: a
//! top-level string is emitted as-is (it is taken to already be source
//! text), while strings nested inside sequences or mappings take their
//! `repr()` form (single quotes unless the text contains one).

use pydantic_gen_define::Value;
use serde_yaml::Number;

/// Renders a value the way Python's `str()` would.
///
/// ## Examples
///
/// ```
/// use pydantic_gen::codegen::literal::python_str;
/// use pydantic_gen_define::Value;
///
/// assert_eq!(python_str(&Value::Bool(true)), "True");
/// assert_eq!(python_str(&Value::Null), "None");
/// assert_eq!(python_str(&Value::from("Field(...)")), "Field(...)");
///
/// let numbers: Value = serde_yaml::from_str("[1, 2, 3]").unwrap();
/// assert_eq!(python_str(&numbers), "[1, 2, 3]");
/// ```
pub fn python_str(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Tagged(tagged) => python_str(&tagged.value),
        other => python_repr(other),
    }
}

/// Renders a value as Python's `repr()` would.
pub fn python_repr(value: &Value) -> String {
    match value {
        Value::Null => "None".to_string(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::Number(n) => number(n),
        Value::String(s) => repr_string(s),
        Value::Sequence(items) => {
            let items: Vec<_> = items.iter().map(python_repr).collect();
            format!("[{}]", items.join(", "))
        }
        Value::Mapping(map) => {
            let pairs: Vec<_> = map
                .iter()
                .map(|(k, v)| format!("{}: {}", python_repr(k), python_repr(v)))
                .collect();
            format!("{{{}}}", pairs.join(", "))
        }
        Value::Tagged(tagged) => python_repr(&tagged.value),
    }
}

/// Python's `repr()` of a string: single-quoted, switching to double quotes
/// when the text contains a single quote but no double quote.
pub fn repr_string(text: &str) -> String {
    let quote = if text.contains('\'') && !text.contains('"') {
        '"'
    } else {
        '\''
    };
    escape_with(text, quote)
}

/// Wraps `text` in double quotes, escaping what a Python string literal
/// cannot contain verbatim.
pub fn quote_string(text: &str) -> String {
    escape_with(text, '"')
}

fn escape_with(text: &str, quote: char) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push(quote);
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\x{:02x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

fn number(n: &Number) -> String {
    if n.is_f64()
        && let Some(f) = n.as_f64()
    {
        if f.is_nan() {
            return "float(\"nan\")".to_string();
        }
        if f.is_infinite() {
            return if f > 0.0 {
                "float(\"inf\")".to_string()
            } else {
                "-float(\"inf\")".to_string()
            };
        }
    }
    n.to_string()
}
