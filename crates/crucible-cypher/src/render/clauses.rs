//! Default clause renderers.
//!
//! Structured arguments are maps from variable name to a per-kind value:
//!
//! | Renderer | Kinds | Map value → body |
//! |---|---|---|
//! | [`PatternClause`] | MATCH, OPTIONAL MATCH, CREATE, CREATE UNIQUE, MERGE | `"L"` → `(k:L)`, `["A","B"]` → `(k:A:B)`, `{..}` → `(k {..})`, `null` → `(k)` |
//! | [`FilterClause`] | WHERE | `{p: v}` → `k.p = v`, `null` → `IS NULL`, list → `IN [..]` |
//! | [`ProjectionClause`] | RETURN, WITH, DELETE, REMOVE, ORDER BY | `"p"` → `k.p`, `["a","b"]` → `k.a, k.b`, `null` → `k`, ORDER BY `{p: "desc"}` → `k.p DESC` |
//! | [`StartClause`] | START | `3` → `k = node(3)`, `[1,2]` → `k = node(1, 2)`, `"text"` → `k = text` |
//! | [`AssignClause`] | SET | `{p: v}` → `k.p = v`, `"L"` → `k:L` |
//! | [`UnwindClause`] | UNWIND | `v` → `v AS k` |
//! | [`UsingClause`] | USING | `"L(p)"` → `INDEX k:L(p)` |
//! | [`CountClause`] | LIMIT, SKIP | number literal |
//!
//! Raw text is accepted everywhere and emitted unchanged.

use super::ClauseRenderer;
use crate::builder::ClauseArg;
use crate::error::{CypherError, Result};
use crate::kind::ClauseKind;
use crate::literal::{describe_shape, escape_identifier, format_literal};
use serde_json::{Map, Value};
use std::sync::Arc;

/// Default renderer for `kind`
pub fn default_renderer(kind: ClauseKind) -> Arc<dyn ClauseRenderer> {
    match kind {
        ClauseKind::Match
        | ClauseKind::OptionalMatch
        | ClauseKind::Create
        | ClauseKind::CreateUnique
        | ClauseKind::Merge => Arc::new(PatternClause::new(kind)),
        ClauseKind::Where => Arc::new(FilterClause),
        ClauseKind::Return
        | ClauseKind::With
        | ClauseKind::Delete
        | ClauseKind::Remove
        | ClauseKind::Order => Arc::new(ProjectionClause::new(kind)),
        ClauseKind::Start => Arc::new(StartClause),
        ClauseKind::Set => Arc::new(AssignClause),
        ClauseKind::Unwind => Arc::new(UnwindClause),
        ClauseKind::Using => Arc::new(UsingClause),
        ClauseKind::Limit | ClauseKind::Skip => Arc::new(CountClause::new(kind)),
    }
}

// ============================================================================
// Shared helpers
// ============================================================================

fn raw_body(kind: ClauseKind, text: &str) -> Result<String> {
    if text.trim().is_empty() {
        return Err(CypherError::unsupported_argument(kind, "empty text"));
    }
    Ok(text.to_string())
}

fn entry_error(kind: ClauseKind, key: &str, value: &Value) -> CypherError {
    CypherError::unsupported_argument(kind, format!("{} for '{}'", describe_shape(value), key))
}

/// Render every map entry with `entry` and join the results
fn map_body(
    kind: ClauseKind,
    map: &Map<String, Value>,
    separator: &str,
    entry: impl Fn(&str, &Value) -> Result<String>,
) -> Result<String> {
    if map.is_empty() {
        return Err(CypherError::unsupported_argument(kind, "an empty map"));
    }
    let parts = map
        .iter()
        .map(|(key, value)| entry(key, value))
        .collect::<Result<Vec<_>>>()?;
    Ok(parts.join(separator))
}

/// List entries as strings, or None when any entry is not a string
fn string_list(items: &[Value]) -> Option<Vec<&str>> {
    items.iter().map(Value::as_str).collect()
}

fn labels(list: &[&str]) -> String {
    list.iter()
        .map(|l| format!(":{}", escape_identifier(l)))
        .collect()
}

fn property(var: &str, name: &str) -> String {
    format!("{}.{}", escape_identifier(var), escape_identifier(name))
}

// ============================================================================
// Pattern clauses
// ============================================================================

/// Node patterns for MATCH-like kinds
#[derive(Debug, Clone, Copy)]
pub struct PatternClause {
    kind: ClauseKind,
}

impl PatternClause {
    pub fn new(kind: ClauseKind) -> Self {
        Self { kind }
    }

    fn entry(&self, key: &str, value: &Value) -> Result<String> {
        let var = escape_identifier(key);
        match value {
            Value::Null => Ok(format!("({})", var)),
            Value::String(label) => Ok(format!("({}{})", var, labels(&[label.as_str()]))),
            Value::Array(items) => string_list(items)
                .map(|list| format!("({}{})", var, labels(&list)))
                .ok_or_else(|| entry_error(self.kind, key, value)),
            Value::Object(props) if props.is_empty() => Ok(format!("({})", var)),
            Value::Object(_) => Ok(format!("({} {})", var, format_literal(value))),
            _ => Err(entry_error(self.kind, key, value)),
        }
    }
}

impl ClauseRenderer for PatternClause {
    fn name(&self) -> &str {
        "pattern"
    }

    fn kind(&self) -> ClauseKind {
        self.kind
    }

    fn body(&self, arg: &ClauseArg) -> Result<String> {
        match arg {
            ClauseArg::Raw(text) => raw_body(self.kind, text),
            ClauseArg::Symbol(name) => Ok(format!("({})", escape_identifier(name))),
            ClauseArg::Map(map) => map_body(self.kind, map, ", ", |k, v| self.entry(k, v)),
            ClauseArg::Literal(value) => Err(CypherError::unsupported_argument(
                self.kind,
                describe_shape(value),
            )),
        }
    }
}

// ============================================================================
// Filter clauses
// ============================================================================

/// Equality conditions for WHERE
#[derive(Debug, Clone, Copy)]
pub struct FilterClause;

impl FilterClause {
    fn condition(lhs: String, value: &Value) -> String {
        match value {
            Value::Null => format!("{} IS NULL", lhs),
            Value::Array(_) => format!("{} IN {}", lhs, format_literal(value)),
            _ => format!("{} = {}", lhs, format_literal(value)),
        }
    }

    fn entry(key: &str, value: &Value) -> String {
        match value {
            Value::Object(props) if !props.is_empty() => props
                .iter()
                .map(|(name, v)| Self::condition(property(key, name), v))
                .collect::<Vec<_>>()
                .join(" AND "),
            _ => Self::condition(escape_identifier(key).into_owned(), value),
        }
    }
}

impl ClauseRenderer for FilterClause {
    fn name(&self) -> &str {
        "filter"
    }

    fn kind(&self) -> ClauseKind {
        ClauseKind::Where
    }

    fn body(&self, arg: &ClauseArg) -> Result<String> {
        match arg {
            ClauseArg::Raw(text) => raw_body(ClauseKind::Where, text),
            ClauseArg::Symbol(name) => Ok(escape_identifier(name).into_owned()),
            ClauseArg::Map(map) => {
                map_body(ClauseKind::Where, map, " AND ", |k, v| Ok(Self::entry(k, v)))
            }
            ClauseArg::Literal(value) => Err(CypherError::unsupported_argument(
                ClauseKind::Where,
                describe_shape(value),
            )),
        }
    }

    /// Several WHERE clauses are parenthesized before joining
    fn render(&self, bodies: &[&str]) -> String {
        match bodies {
            [single] => format!("WHERE {}", single),
            _ => format!(
                "WHERE {}",
                bodies
                    .iter()
                    .map(|b| format!("({})", b))
                    .collect::<Vec<_>>()
                    .join(ClauseKind::Where.clause_join())
            ),
        }
    }
}

// ============================================================================
// Projection clauses
// ============================================================================

/// Item lists for RETURN, WITH, DELETE, REMOVE and ORDER BY
#[derive(Debug, Clone, Copy)]
pub struct ProjectionClause {
    kind: ClauseKind,
}

impl ProjectionClause {
    pub fn new(kind: ClauseKind) -> Self {
        Self { kind }
    }

    fn sort_key(&self, key: &str, name: &str, direction: &Value) -> Result<String> {
        let item = property(key, name);
        match direction.as_str().map(str::to_ascii_lowercase).as_deref() {
            Some("asc") => Ok(item),
            Some("desc") => Ok(format!("{} DESC", item)),
            _ => Err(CypherError::unsupported_argument(
                self.kind,
                format!("sort direction {} for '{}.{}'", format_literal(direction), key, name),
            )),
        }
    }

    fn entry(&self, key: &str, value: &Value) -> Result<String> {
        match value {
            Value::Null => Ok(escape_identifier(key).into_owned()),
            Value::String(name) => Ok(property(key, name)),
            Value::Array(items) => string_list(items)
                .map(|names| {
                    names
                        .iter()
                        .map(|name| property(key, name))
                        .collect::<Vec<_>>()
                        .join(", ")
                })
                .ok_or_else(|| entry_error(self.kind, key, value)),
            Value::Object(keys) if self.kind == ClauseKind::Order && !keys.is_empty() => {
                let items = keys
                    .iter()
                    .map(|(name, direction)| self.sort_key(key, name, direction))
                    .collect::<Result<Vec<_>>>()?;
                Ok(items.join(", "))
            }
            _ => Err(entry_error(self.kind, key, value)),
        }
    }
}

impl ClauseRenderer for ProjectionClause {
    fn name(&self) -> &str {
        "projection"
    }

    fn kind(&self) -> ClauseKind {
        self.kind
    }

    fn body(&self, arg: &ClauseArg) -> Result<String> {
        match arg {
            ClauseArg::Raw(text) => raw_body(self.kind, text),
            ClauseArg::Symbol(name) => Ok(escape_identifier(name).into_owned()),
            ClauseArg::Map(map) => map_body(self.kind, map, ", ", |k, v| self.entry(k, v)),
            ClauseArg::Literal(value) => Err(CypherError::unsupported_argument(
                self.kind,
                describe_shape(value),
            )),
        }
    }
}

// ============================================================================
// START
// ============================================================================

/// Start points by node id or raw source text
#[derive(Debug, Clone, Copy)]
pub struct StartClause;

impl StartClause {
    fn entry(key: &str, value: &Value) -> Result<String> {
        let var = escape_identifier(key);
        let ids = match value {
            Value::Number(n) => n.as_u64().map(|id| vec![id]),
            Value::Array(items) => items.iter().map(Value::as_u64).collect(),
            Value::String(source) => return Ok(format!("{} = {}", var, source)),
            _ => None,
        };
        let ids = ids.ok_or_else(|| entry_error(ClauseKind::Start, key, value))?;
        let ids = ids
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        Ok(format!("{} = node({})", var, ids))
    }
}

impl ClauseRenderer for StartClause {
    fn name(&self) -> &str {
        "start"
    }

    fn kind(&self) -> ClauseKind {
        ClauseKind::Start
    }

    fn body(&self, arg: &ClauseArg) -> Result<String> {
        match arg {
            ClauseArg::Raw(text) => raw_body(ClauseKind::Start, text),
            ClauseArg::Map(map) => map_body(ClauseKind::Start, map, ", ", Self::entry),
            ClauseArg::Symbol(_) => Err(CypherError::unsupported_argument(
                ClauseKind::Start,
                "a bare symbol",
            )),
            ClauseArg::Literal(value) => Err(CypherError::unsupported_argument(
                ClauseKind::Start,
                describe_shape(value),
            )),
        }
    }
}

// ============================================================================
// SET
// ============================================================================

/// Property assignments and labels for SET
#[derive(Debug, Clone, Copy)]
pub struct AssignClause;

impl AssignClause {
    fn entry(key: &str, value: &Value) -> Result<String> {
        match value {
            Value::Object(props) if !props.is_empty() => Ok(props
                .iter()
                .map(|(name, v)| format!("{} = {}", property(key, name), format_literal(v)))
                .collect::<Vec<_>>()
                .join(", ")),
            Value::String(label) => Ok(format!("{}{}", escape_identifier(key), labels(&[label.as_str()]))),
            Value::Array(items) => string_list(items)
                .map(|list| format!("{}{}", escape_identifier(key), labels(&list)))
                .ok_or_else(|| entry_error(ClauseKind::Set, key, value)),
            _ => Err(entry_error(ClauseKind::Set, key, value)),
        }
    }
}

impl ClauseRenderer for AssignClause {
    fn name(&self) -> &str {
        "assign"
    }

    fn kind(&self) -> ClauseKind {
        ClauseKind::Set
    }

    fn body(&self, arg: &ClauseArg) -> Result<String> {
        match arg {
            ClauseArg::Raw(text) => raw_body(ClauseKind::Set, text),
            ClauseArg::Map(map) => map_body(ClauseKind::Set, map, ", ", Self::entry),
            ClauseArg::Symbol(_) => Err(CypherError::unsupported_argument(
                ClauseKind::Set,
                "a bare symbol",
            )),
            ClauseArg::Literal(value) => Err(CypherError::unsupported_argument(
                ClauseKind::Set,
                describe_shape(value),
            )),
        }
    }
}

// ============================================================================
// UNWIND / USING
// ============================================================================

/// `<list> AS k`
#[derive(Debug, Clone, Copy)]
pub struct UnwindClause;

impl ClauseRenderer for UnwindClause {
    fn name(&self) -> &str {
        "unwind"
    }

    fn kind(&self) -> ClauseKind {
        ClauseKind::Unwind
    }

    fn body(&self, arg: &ClauseArg) -> Result<String> {
        match arg {
            ClauseArg::Raw(text) => raw_body(ClauseKind::Unwind, text),
            ClauseArg::Map(map) => map_body(ClauseKind::Unwind, map, " UNWIND ", |k, v| {
                Ok(format!("{} AS {}", format_literal(v), escape_identifier(k)))
            }),
            ClauseArg::Symbol(_) => Err(CypherError::unsupported_argument(
                ClauseKind::Unwind,
                "a bare symbol",
            )),
            ClauseArg::Literal(value) => Err(CypherError::unsupported_argument(
                ClauseKind::Unwind,
                describe_shape(value),
            )),
        }
    }
}

/// Index hints: `INDEX k:Label(prop)`
#[derive(Debug, Clone, Copy)]
pub struct UsingClause;

impl ClauseRenderer for UsingClause {
    fn name(&self) -> &str {
        "using"
    }

    fn kind(&self) -> ClauseKind {
        ClauseKind::Using
    }

    fn body(&self, arg: &ClauseArg) -> Result<String> {
        match arg {
            ClauseArg::Raw(text) => raw_body(ClauseKind::Using, text),
            ClauseArg::Map(map) => map_body(ClauseKind::Using, map, " USING ", |k, v| match v {
                Value::String(index) => Ok(format!("INDEX {}:{}", escape_identifier(k), index)),
                _ => Err(entry_error(ClauseKind::Using, k, v)),
            }),
            ClauseArg::Symbol(_) => Err(CypherError::unsupported_argument(
                ClauseKind::Using,
                "a bare symbol",
            )),
            ClauseArg::Literal(value) => Err(CypherError::unsupported_argument(
                ClauseKind::Using,
                describe_shape(value),
            )),
        }
    }
}

// ============================================================================
// LIMIT / SKIP
// ============================================================================

/// Non-negative counts for LIMIT and SKIP
#[derive(Debug, Clone, Copy)]
pub struct CountClause {
    kind: ClauseKind,
}

impl CountClause {
    pub fn new(kind: ClauseKind) -> Self {
        Self { kind }
    }
}

impl ClauseRenderer for CountClause {
    fn name(&self) -> &str {
        "count"
    }

    fn kind(&self) -> ClauseKind {
        self.kind
    }

    fn body(&self, arg: &ClauseArg) -> Result<String> {
        match arg {
            ClauseArg::Raw(text) => raw_body(self.kind, text),
            ClauseArg::Literal(Value::Number(n)) if n.is_u64() => Ok(n.to_string()),
            ClauseArg::Literal(value) => Err(CypherError::unsupported_argument(
                self.kind,
                format!("{} {}", describe_shape(value), format_literal(value)),
            )),
            ClauseArg::Symbol(_) => Err(CypherError::unsupported_argument(
                self.kind,
                "a bare symbol",
            )),
            ClauseArg::Map(_) => Err(CypherError::unsupported_argument(self.kind, "a map")),
        }
    }
}
