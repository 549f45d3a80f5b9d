//! Clause arguments and rendered clause bodies.

use crate::kind::ClauseKind;
use serde_json::{Map, Value};

/// Argument shapes accepted by clause builder methods
///
/// JSON values convert by shape: objects become [`ClauseArg::Map`] (key =
/// variable), strings become [`ClauseArg::Raw`], everything else is a
/// [`ClauseArg::Literal`].
#[derive(Debug, Clone, PartialEq)]
pub enum ClauseArg {
    /// Text emitted unchanged
    Raw(String),
    /// Bare variable reference
    Symbol(String),
    /// Variable name to per-kind value
    Map(Map<String, Value>),
    /// Plain literal value
    Literal(Value),
}

impl ClauseArg {
    /// Symbolic reference to a variable
    pub fn sym(name: impl Into<String>) -> Self {
        ClauseArg::Symbol(name.into())
    }

    /// Raw text argument
    pub fn raw(text: impl Into<String>) -> Self {
        ClauseArg::Raw(text.into())
    }
}

impl From<&str> for ClauseArg {
    fn from(text: &str) -> Self {
        ClauseArg::Raw(text.to_string())
    }
}

impl From<String> for ClauseArg {
    fn from(text: String) -> Self {
        ClauseArg::Raw(text)
    }
}

impl From<Map<String, Value>> for ClauseArg {
    fn from(map: Map<String, Value>) -> Self {
        ClauseArg::Map(map)
    }
}

impl From<Value> for ClauseArg {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => ClauseArg::Map(map),
            Value::String(text) => ClauseArg::Raw(text),
            other => ClauseArg::Literal(other),
        }
    }
}

impl From<u64> for ClauseArg {
    fn from(n: u64) -> Self {
        ClauseArg::Literal(Value::from(n))
    }
}

impl From<i64> for ClauseArg {
    fn from(n: i64) -> Self {
        ClauseArg::Literal(Value::from(n))
    }
}

impl From<i32> for ClauseArg {
    fn from(n: i32) -> Self {
        ClauseArg::Literal(Value::from(n))
    }
}

/// One clause: its kind and the body text its renderer produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    kind: ClauseKind,
    body: String,
}

impl Clause {
    pub fn new(kind: ClauseKind, body: impl Into<String>) -> Self {
        Self {
            kind,
            body: body.into(),
        }
    }

    pub fn kind(&self) -> ClauseKind {
        self.kind
    }

    /// Text following the keyword
    pub fn body(&self) -> &str {
        &self.body
    }
}
