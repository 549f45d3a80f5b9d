//! Per-kind clause renderers.
//!
//! A [`ClauseRenderer`] turns one builder argument into a clause body when the
//! clause is added, and joins the bodies of its kind under a single keyword
//! when a partition is rendered. [`ClauseRendererRegistry`] holds exactly one
//! renderer per [`ClauseKind`]; the defaults live in [`clauses`].

pub mod clauses;

use crate::builder::ClauseArg;
use crate::error::Result;
use crate::kind::ClauseKind;
use std::fmt;
use std::sync::Arc;

/// Formatting rules of one clause kind
pub trait ClauseRenderer: Send + Sync {
    /// Unique name for this renderer
    fn name(&self) -> &str;

    /// Kind this renderer serves
    fn kind(&self) -> ClauseKind;

    /// Body text for one argument.
    ///
    /// Called when the clause is added, so unsupported shapes fail at the
    /// builder call that introduced them.
    fn body(&self, arg: &ClauseArg) -> Result<String>;

    /// Text of every clause of this kind in one partition.
    ///
    /// `bodies` is never empty. Default: keyword followed by the bodies joined
    /// with [`ClauseKind::clause_join`]; only the last body for
    /// [`ClauseKind::last_wins`] kinds.
    fn render(&self, bodies: &[&str]) -> String {
        let kind = self.kind();
        let joined = match bodies.last() {
            Some(last) if kind.last_wins() => last.to_string(),
            _ => bodies.join(kind.clause_join()),
        };
        format!("{} {}", kind.keyword(), joined)
    }
}

/// One renderer per clause kind
#[derive(Clone)]
pub struct ClauseRendererRegistry {
    /// Indexed by `ClauseKind as usize`
    renderers: Vec<Arc<dyn ClauseRenderer>>,
}

impl Default for ClauseRendererRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ClauseRendererRegistry {
    /// Registry with the default renderer for every kind
    pub fn new() -> Self {
        Self {
            renderers: ClauseKind::ALL
                .iter()
                .map(|kind| clauses::default_renderer(*kind))
                .collect(),
        }
    }

    /// Replace the renderer for the kind it serves
    pub fn register(&mut self, renderer: Arc<dyn ClauseRenderer>) {
        let kind = renderer.kind();
        self.renderers[kind as usize] = renderer;
    }

    /// Renderer for `kind`
    pub fn get(&self, kind: ClauseKind) -> &dyn ClauseRenderer {
        self.renderers[kind as usize].as_ref()
    }

    /// Renderer names in [`ClauseKind::ALL`] order
    pub fn renderer_names(&self) -> Vec<&str> {
        self.renderers.iter().map(|r| r.name()).collect()
    }
}

impl fmt::Debug for ClauseRendererRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.renderer_names()).finish()
    }
}

/// Builder for ergonomic registry construction
pub struct ClauseRendererRegistryBuilder {
    registry: ClauseRendererRegistry,
}

impl Default for ClauseRendererRegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClauseRendererRegistryBuilder {
    pub fn new() -> Self {
        Self {
            registry: ClauseRendererRegistry::new(),
        }
    }

    /// Override the renderer of one kind
    pub fn with_renderer(mut self, renderer: impl ClauseRenderer + 'static) -> Self {
        self.registry.register(Arc::new(renderer));
        self
    }

    /// Build the registry
    pub fn build(self) -> ClauseRendererRegistry {
        self.registry
    }
}
