//! Persistent clause log.
//!
//! A cons list of entries, newest first. Pushing allocates one node that
//! points at the previous head, so every [`Query`](super::Query) derived from
//! a common ancestor shares the ancestor's entries and none can observe the
//! others' additions.

use super::clause::Clause;
use std::fmt;
use std::sync::Arc;

/// Clause or partition boundary
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogEntry {
    Clause(Clause),
    Break,
}

struct LogNode {
    entry: LogEntry,
    prev: Option<Arc<LogNode>>,
}

/// Immutable, structurally shared sequence of log entries
#[derive(Clone, Default)]
pub struct ClauseLog {
    head: Option<Arc<LogNode>>,
    len: usize,
}

impl ClauseLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// New log with `entry` appended; `self` is unchanged
    pub fn push(&self, entry: LogEntry) -> Self {
        Self {
            head: Some(Arc::new(LogNode {
                entry,
                prev: self.head.clone(),
            })),
            len: self.len + 1,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Most recent entry
    pub fn last(&self) -> Option<&LogEntry> {
        self.head.as_deref().map(|node| &node.entry)
    }

    /// Entries oldest first
    pub fn entries(&self) -> Vec<&LogEntry> {
        let mut entries = Vec::with_capacity(self.len);
        let mut current = self.head.as_deref();
        while let Some(node) = current {
            entries.push(&node.entry);
            current = node.prev.as_deref();
        }
        entries.reverse();
        entries
    }

    /// Clauses between breaks, oldest partition first; empty partitions dropped
    pub fn partitions(&self) -> Vec<Vec<&Clause>> {
        let mut partitions = Vec::new();
        let mut current = Vec::new();
        for entry in self.entries() {
            match entry {
                LogEntry::Clause(clause) => current.push(clause),
                LogEntry::Break if current.is_empty() => {}
                LogEntry::Break => partitions.push(std::mem::take(&mut current)),
            }
        }
        if !current.is_empty() {
            partitions.push(current);
        }
        partitions
    }
}

impl Drop for ClauseLog {
    // Unlink uniquely owned nodes one at a time so long logs do not recurse
    fn drop(&mut self) {
        let mut next = self.head.take();
        while let Some(node) = next {
            match Arc::try_unwrap(node) {
                Ok(mut node) => next = node.prev.take(),
                Err(_) => break,
            }
        }
    }
}

impl fmt::Debug for ClauseLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.entries()).finish()
    }
}
