//! Error types for query construction.
//!
//! Every variant except the configuration ones describes caller misuse that is
//! detected at the call that introduced it. The one exception is a chain DSL
//! pattern left ending in a relationship, which is reported when rendering.

use crate::kind::ClauseKind;
use thiserror::Error;

/// Errors raised while building a query
#[derive(Debug, Error)]
pub enum CypherError {
    /// A clause was given an argument shape its renderer does not understand
    #[error("{kind} does not accept {shape}")]
    UnsupportedArgument {
        /// Clause the argument was passed to
        kind: ClauseKind,
        /// Description of the rejected shape
        shape: String,
    },

    /// A relationship spec could not be interpreted
    #[error("Unsupported relationship spec: {shape}")]
    UnsupportedRelationship {
        /// Description of the rejected shape
        shape: String,
    },

    /// Index lookup on a property that has no index
    #[error("No index declared for property '{key}'")]
    NotIndexed {
        /// Property key that was looked up
        key: String,
    },

    /// A variable name is already bound to a different variable
    #[error("Variable name '{name}' is already in use")]
    DuplicateVariable {
        /// The conflicting name
        name: String,
    },

    /// A handle that was not issued by this construction context
    #[error("Unknown handle: {handle}")]
    UnknownHandle {
        /// Debug rendering of the handle
        handle: String,
    },

    /// A pattern segment was extended after it stopped being the chain tail
    #[error("Segment {segment} is no longer the tail of its pattern chain")]
    ChainAlreadyExtended {
        /// Index of the superseded segment
        segment: usize,
    },

    /// A relationship left open where a node is required
    #[error("Relationship must be closed with a node before continuing or rendering the pattern")]
    DanglingRelationship,

    /// Configuration file could not be parsed
    #[error("Config parse error: {0}")]
    Config(#[from] toml::de::Error),

    /// Configuration file could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Specialized Result type for query construction
pub type Result<T> = std::result::Result<T, CypherError>;

impl CypherError {
    /// Create an unsupported argument error
    pub fn unsupported_argument(kind: ClauseKind, shape: impl Into<String>) -> Self {
        Self::UnsupportedArgument {
            kind,
            shape: shape.into(),
        }
    }

    /// Create an unsupported relationship error
    pub fn unsupported_relationship(shape: impl Into<String>) -> Self {
        Self::UnsupportedRelationship {
            shape: shape.into(),
        }
    }

    /// Create an unknown handle error
    pub fn unknown_handle(handle: impl std::fmt::Debug) -> Self {
        Self::UnknownHandle {
            handle: format!("{:?}", handle),
        }
    }

    /// Check if this error is caller misuse at construction time
    pub fn is_misuse(&self) -> bool {
        !matches!(self, Self::Config(_) | Self::Io(_))
    }
}
