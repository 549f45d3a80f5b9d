//! Literal and identifier formatting.
//!
//! Shared by the chain DSL and the default clause renderers so both emit the
//! same quoting for strings, lists and maps.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::borrow::Cow;

/// Identifiers that can be emitted without backticks
static PLAIN_IDENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap());

/// Backtick-escape an identifier (variable, label, type or property key) when it is not plain
pub fn escape_identifier(name: &str) -> Cow<'_, str> {
    if PLAIN_IDENT_RE.is_match(name) {
        Cow::Borrowed(name)
    } else {
        Cow::Owned(format!("`{}`", name.replace('`', "``")))
    }
}

/// Render a JSON value as a Cypher literal
///
/// Strings are double-quoted with JSON escapes, lists and maps recurse.
pub fn format_literal(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(_) => value.to_string(),
        Value::Array(items) => format!(
            "[{}]",
            items.iter().map(format_literal).collect::<Vec<_>>().join(", ")
        ),
        Value::Object(map) => format!(
            "{{{}}}",
            map.iter()
                .map(|(k, v)| format!("{}: {}", escape_identifier(k), format_literal(v)))
                .collect::<Vec<_>>()
                .join(", ")
        ),
    }
}

/// Render a regular-expression operand as `/pattern/`
pub fn format_regex(pattern: &str) -> String {
    format!("/{}/", pattern.replace('/', "\\/"))
}

/// Short description of a JSON value's shape for error messages
pub fn describe_shape(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a map",
    }
}
