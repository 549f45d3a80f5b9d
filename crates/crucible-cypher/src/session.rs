//! Execution seam.
//!
//! Rendering is the end of this crate's responsibility. A [`Session`] receives
//! the finished text and parameters and owns everything after that.

use serde_json::{Map, Value};

/// Executes rendered Cypher against a database
pub trait Session {
    /// Whatever the session returns for a query
    type Output;
    /// Session-specific failure
    type Error: std::error::Error;

    /// Run a rendered query with its parameters
    fn run(&self, cypher: &str, params: &Map<String, Value>) -> Result<Self::Output, Self::Error>;
}
