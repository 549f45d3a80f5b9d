//! Query rendering configuration

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Options applied when a [`Query`](crate::Query) is rendered
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// Parser version to request from the server.
    ///
    /// When set, rendered text is prefixed with `CYPHER <parser> `.
    pub parser: Option<String>,
}

impl QueryConfig {
    /// Parse a config from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Read and parse a TOML config file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        debug!(path = %path.display(), parser = ?config.parser, "loaded query config");
        Ok(config)
    }

    /// Config requesting a specific parser version
    pub fn with_parser(parser: impl Into<String>) -> Self {
        Self {
            parser: Some(parser.into()),
        }
    }

    /// Directive prepended to rendered text, if any
    pub(crate) fn prefix(&self) -> Option<String> {
        self.parser
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .map(|p| format!("CYPHER {} ", p.trim()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CypherError;

    #[test]
    fn test_default_has_no_prefix() {
        let config = QueryConfig::default();
        assert_eq!(config.parser, None);
        assert_eq!(config.prefix(), None);
    }

    #[test]
    fn test_deserialize_parser() {
        let config = QueryConfig::from_toml_str(r#"parser = "1.9""#).unwrap();
        assert_eq!(config.parser.as_deref(), Some("1.9"));
        assert_eq!(config.prefix().as_deref(), Some("CYPHER 1.9 "));
    }

    #[test]
    fn test_deserialize_empty() {
        let config = QueryConfig::from_toml_str("").unwrap();
        assert_eq!(config, QueryConfig::default());
    }

    #[test]
    fn test_blank_parser_is_ignored() {
        assert_eq!(QueryConfig::with_parser("  ").prefix(), None);
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = QueryConfig::from_toml_str("parser = ").unwrap_err();
        assert!(matches!(err, CypherError::Config(_)));
        assert!(!err.is_misuse());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = QueryConfig::from_file("/nonexistent/crucible-cypher.toml").unwrap_err();
        assert!(matches!(err, CypherError::Io(_)));
    }
}
