//! Expression registry.
//!
//! Ordered list of fragment handles tagged with their clause kind. Fragments of
//! one kind always form a single contiguous run; the position of a run is fixed
//! by its first member.

use crate::kind::ClauseKind;
use tracing::trace;

/// Handle of a fragment owned by a [`CypherDsl`](super::CypherDsl)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FragmentId(pub(crate) usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Entry {
    id: FragmentId,
    kind: ClauseKind,
}

/// Ordered, kind-grouped registry of fragments
#[derive(Debug, Clone, Default)]
pub struct ExpressionRegistry {
    entries: Vec<Entry>,
}

impl ExpressionRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert right after the last fragment of the same kind, or append
    ///
    /// Returns the position the fragment landed at.
    pub fn insert_grouped(&mut self, id: FragmentId, kind: ClauseKind) -> usize {
        let position = self
            .entries
            .iter()
            .rposition(|e| e.kind == kind)
            .map_or(self.entries.len(), |last| last + 1);
        self.entries.insert(position, Entry { id, kind });
        trace!(?id, %kind, position, "registered fragment");
        position
    }

    /// Remove a fragment, keeping the relative order of the rest
    ///
    /// Returns false when the fragment was not registered.
    pub fn remove(&mut self, id: FragmentId) -> bool {
        match self.entries.iter().position(|e| e.id == id) {
            Some(index) => {
                self.entries.remove(index);
                trace!(?id, "removed fragment");
                true
            }
            None => false,
        }
    }

    /// Whether the fragment is currently registered
    pub fn contains(&self, id: FragmentId) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered fragments in output order
    pub fn iter(&self) -> impl Iterator<Item = (FragmentId, ClauseKind)> + '_ {
        self.entries.iter().map(|e| (e.id, e.kind))
    }

    /// Contiguous runs of same-kind fragments in output order
    pub fn runs(&self) -> Vec<(ClauseKind, Vec<FragmentId>)> {
        let mut runs: Vec<(ClauseKind, Vec<FragmentId>)> = Vec::new();
        for entry in &self.entries {
            match runs.last_mut() {
                Some((kind, ids)) if *kind == entry.kind => ids.push(entry.id),
                _ => runs.push((entry.kind, vec![entry.id])),
            }
        }
        runs
    }
}
