//! Copy-on-write clause builder.
//!
//! Every method returns a new [`Query`] that shares its ancestor's clause log,
//! so one base query can be extended in several directions:
//!
//! ```rust
//! use crucible_cypher::Query;
//! use serde_json::json;
//!
//! let base = Query::new().match_(json!({"n": "Person"}))?;
//! let adults = base.where_(json!({"n": {"age": 30}}))?;
//! let names = base.return_(json!({"n": "name"}))?;
//!
//! assert_eq!(adults.to_cypher(), "MATCH (n:Person) WHERE n.age = 30");
//! assert_eq!(names.to_cypher(), "MATCH (n:Person) RETURN n.name");
//! # Ok::<(), crucible_cypher::CypherError>(())
//! ```
//!
//! Rendering splits the log into partitions at breaks and orders clause kinds
//! within each partition by [`ClauseKind::PRECEDENCE`], independent of call
//! order.

mod clause;
mod log;

pub use clause::{Clause, ClauseArg};
pub use log::{ClauseLog, LogEntry};

use crate::config::QueryConfig;
use crate::error::Result;
use crate::kind::ClauseKind;
use crate::render::ClauseRendererRegistry;
use crate::session::Session;
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Options for [`Query::build_deeper_query`]
#[derive(Debug, Clone, Copy, Default)]
pub struct BuildOptions {
    /// Close the current partition before adding the clause
    pub break_before: bool,
}

/// Options for [`Query::union`]
#[derive(Debug, Clone, Copy, Default)]
pub struct UnionOptions {
    /// Keep duplicate rows (`UNION ALL`)
    pub all: bool,
}

/// Immutable clause builder
#[derive(Debug, Clone, Default)]
pub struct Query {
    log: ClauseLog,
    renderers: Arc<ClauseRendererRegistry>,
    config: Arc<QueryConfig>,
    params: Arc<Map<String, Value>>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `config` for rendering
    pub fn with_config(mut self, config: QueryConfig) -> Self {
        self.config = Arc::new(config);
        self
    }

    /// Request a specific parser version (`CYPHER <parser> ` prefix)
    pub fn with_parser(self, parser: impl Into<String>) -> Self {
        self.with_config(QueryConfig::with_parser(parser))
    }

    /// Use a custom set of clause renderers for clauses added from now on
    pub fn with_renderers(mut self, renderers: Arc<ClauseRendererRegistry>) -> Self {
        self.renderers = renderers;
        self
    }

    pub fn config(&self) -> &QueryConfig {
        &self.config
    }

    pub fn log(&self) -> &ClauseLog {
        &self.log
    }

    fn with_log(&self, log: ClauseLog) -> Self {
        Self {
            log,
            renderers: Arc::clone(&self.renderers),
            config: Arc::clone(&self.config),
            params: Arc::clone(&self.params),
        }
    }

    /// Add one clause of `kind` built from `arg`
    ///
    /// WITH always opens a new partition.
    pub fn build_deeper_query(
        &self,
        kind: ClauseKind,
        arg: impl Into<ClauseArg>,
        options: BuildOptions,
    ) -> Result<Self> {
        let arg = arg.into();
        let body = self.renderers.get(kind).body(&arg).map_err(|e| {
            debug!(%kind, %e, "rejected clause argument");
            e
        })?;

        let mut log = self.log.clone();
        if options.break_before || kind.starts_partition() {
            debug!(%kind, entries = log.len(), "opening new partition");
            log = log.push(LogEntry::Break);
        }
        Ok(self.with_log(log.push(LogEntry::Clause(Clause::new(kind, body)))))
    }

    fn add(&self, kind: ClauseKind, arg: impl Into<ClauseArg>) -> Result<Self> {
        self.build_deeper_query(kind, arg, BuildOptions::default())
    }

    /// Close the current partition
    pub fn break_(&self) -> Self {
        debug!(entries = self.log.len(), "explicit break");
        self.with_log(self.log.push(LogEntry::Break))
    }

    pub fn start(&self, arg: impl Into<ClauseArg>) -> Result<Self> {
        self.add(ClauseKind::Start, arg)
    }

    pub fn match_(&self, arg: impl Into<ClauseArg>) -> Result<Self> {
        self.add(ClauseKind::Match, arg)
    }

    pub fn optional_match(&self, arg: impl Into<ClauseArg>) -> Result<Self> {
        self.add(ClauseKind::OptionalMatch, arg)
    }

    pub fn where_(&self, arg: impl Into<ClauseArg>) -> Result<Self> {
        self.add(ClauseKind::Where, arg)
    }

    pub fn return_(&self, arg: impl Into<ClauseArg>) -> Result<Self> {
        self.add(ClauseKind::Return, arg)
    }

    pub fn with(&self, arg: impl Into<ClauseArg>) -> Result<Self> {
        self.add(ClauseKind::With, arg)
    }

    pub fn create(&self, arg: impl Into<ClauseArg>) -> Result<Self> {
        self.add(ClauseKind::Create, arg)
    }

    pub fn create_unique(&self, arg: impl Into<ClauseArg>) -> Result<Self> {
        self.add(ClauseKind::CreateUnique, arg)
    }

    pub fn merge(&self, arg: impl Into<ClauseArg>) -> Result<Self> {
        self.add(ClauseKind::Merge, arg)
    }

    pub fn using(&self, arg: impl Into<ClauseArg>) -> Result<Self> {
        self.add(ClauseKind::Using, arg)
    }

    pub fn set(&self, arg: impl Into<ClauseArg>) -> Result<Self> {
        self.add(ClauseKind::Set, arg)
    }

    pub fn remove(&self, arg: impl Into<ClauseArg>) -> Result<Self> {
        self.add(ClauseKind::Remove, arg)
    }

    pub fn unwind(&self, arg: impl Into<ClauseArg>) -> Result<Self> {
        self.add(ClauseKind::Unwind, arg)
    }

    pub fn delete(&self, arg: impl Into<ClauseArg>) -> Result<Self> {
        self.add(ClauseKind::Delete, arg)
    }

    pub fn order(&self, arg: impl Into<ClauseArg>) -> Result<Self> {
        self.add(ClauseKind::Order, arg)
    }

    pub fn limit(&self, arg: impl Into<ClauseArg>) -> Result<Self> {
        self.add(ClauseKind::Limit, arg)
    }

    pub fn skip(&self, arg: impl Into<ClauseArg>) -> Result<Self> {
        self.add(ClauseKind::Skip, arg)
    }

    // ------------------------------------------------------------------------
    // Parameters
    // ------------------------------------------------------------------------

    /// Bind one query parameter
    pub fn param(&self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let mut query = self.clone();
        Arc::make_mut(&mut query.params).insert(key.into(), value.into());
        query
    }

    /// Bind several query parameters; later keys overwrite earlier ones
    pub fn params(&self, params: Map<String, Value>) -> Self {
        let mut query = self.clone();
        Arc::make_mut(&mut query.params).extend(params);
        query
    }

    pub fn parameters(&self) -> &Map<String, Value> {
        &self.params
    }

    // ------------------------------------------------------------------------
    // Rendering
    // ------------------------------------------------------------------------

    fn render_partition(&self, clauses: &[&Clause]) -> String {
        ClauseKind::PRECEDENCE
            .iter()
            .filter_map(|kind| {
                let bodies: Vec<&str> = clauses
                    .iter()
                    .filter(|c| c.kind() == *kind)
                    .map(|c| c.body())
                    .collect();
                (!bodies.is_empty()).then(|| self.renderers.get(*kind).render(&bodies))
            })
            .collect::<Vec<_>>()
            .join(" ")
            .trim()
            .to_string()
    }

    /// Render the query text; repeatable and side-effect free
    pub fn to_cypher(&self) -> String {
        let body = self.render_body();
        match self.config.prefix() {
            Some(prefix) if !body.is_empty() => format!("{}{}", prefix, body),
            _ => body,
        }
    }

    fn render_body(&self) -> String {
        let partitions = self.log.partitions();
        let body = partitions
            .iter()
            .map(|clauses| self.render_partition(clauses))
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        debug!(partitions = partitions.len(), len = body.len(), "rendered query");
        body
    }

    /// `<self> UNION <other>`, or `UNION ALL` when requested
    ///
    /// The parser directive covers the whole statement, so it is emitted once
    /// in front: this query's if set, otherwise `other`'s.
    pub fn union(&self, other: &Query, options: UnionOptions) -> String {
        let keyword = if options.all { "UNION ALL" } else { "UNION" };
        let prefix = self
            .config
            .prefix()
            .or_else(|| other.config.prefix())
            .unwrap_or_default();
        format!(
            "{}{} {} {}",
            prefix,
            self.render_body(),
            keyword,
            other.render_body()
        )
    }

    /// Hand the rendered text and parameters to a session
    pub fn execute<S: Session>(&self, session: &S) -> std::result::Result<S::Output, S::Error> {
        session.run(&self.to_cypher(), &self.params)
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_cypher())
    }
}
