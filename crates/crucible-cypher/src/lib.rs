//! # Crucible Cypher
//!
//! Programmatic construction of Cypher query text.
//!
//! Two independent builders are provided:
//!
//! - [`dsl::CypherDsl`]: a single-owner chain DSL. Start points, pattern
//!   chains, filter trees and projections register fragments in an
//!   [`dsl::ExpressionRegistry`]; output is grouped by kind in first-use order.
//! - [`Query`]: a copy-on-write clause builder. Clauses accumulate in a
//!   persistent log, split into partitions at breaks, and render in a fixed
//!   clause precedence within each partition.
//!
//! ## Quick Start
//!
//! ```rust
//! use crucible_cypher::{ClauseArg, Query};
//! use serde_json::json;
//!
//! let q = Query::new()
//!     .match_(json!({"n": "Person"}))?
//!     .where_(json!({"n": {"age": 30}}))?
//!     .return_(ClauseArg::sym("n"))?;
//!
//! assert_eq!(q.to_cypher(), "MATCH (n:Person) WHERE n.age = 30 RETURN n");
//! # Ok::<(), crucible_cypher::CypherError>(())
//! ```
//!
//! Executing a query is left to a [`Session`] implementation.

#![warn(clippy::all)]

pub mod builder;
pub mod config;
pub mod dsl;
pub mod error;
pub mod kind;
pub mod literal;
pub mod render;
pub mod session;

pub use builder::{BuildOptions, Clause, ClauseArg, Query, UnionOptions};
pub use config::QueryConfig;
pub use dsl::CypherDsl;
pub use error::{CypherError, Result};
pub use kind::ClauseKind;
pub use render::{ClauseRenderer, ClauseRendererRegistry, ClauseRendererRegistryBuilder};
pub use session::Session;
