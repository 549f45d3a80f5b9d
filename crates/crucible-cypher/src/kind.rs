//! Clause kinds shared by the chain DSL and the clause builder.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The statement categories a query fragment or clause can belong to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClauseKind {
    Start,
    Match,
    Where,
    Return,
    With,
    Create,
    Set,
    Remove,
    Unwind,
    Delete,
    Order,
    Limit,
    Skip,
    Using,
    OptionalMatch,
    CreateUnique,
    Merge,
}

impl ClauseKind {
    /// Every kind, in declaration order
    pub const ALL: [ClauseKind; 17] = [
        ClauseKind::Start,
        ClauseKind::Match,
        ClauseKind::Where,
        ClauseKind::Return,
        ClauseKind::With,
        ClauseKind::Create,
        ClauseKind::Set,
        ClauseKind::Remove,
        ClauseKind::Unwind,
        ClauseKind::Delete,
        ClauseKind::Order,
        ClauseKind::Limit,
        ClauseKind::Skip,
        ClauseKind::Using,
        ClauseKind::OptionalMatch,
        ClauseKind::CreateUnique,
        ClauseKind::Merge,
    ];

    /// Order in which the clause builder emits kinds within one partition
    pub const PRECEDENCE: [ClauseKind; 17] = [
        ClauseKind::With,
        ClauseKind::Create,
        ClauseKind::CreateUnique,
        ClauseKind::Merge,
        ClauseKind::Start,
        ClauseKind::Match,
        ClauseKind::OptionalMatch,
        ClauseKind::Using,
        ClauseKind::Where,
        ClauseKind::Set,
        ClauseKind::Remove,
        ClauseKind::Unwind,
        ClauseKind::Delete,
        ClauseKind::Return,
        ClauseKind::Order,
        ClauseKind::Limit,
        ClauseKind::Skip,
    ];

    /// Keyword that opens a run of this kind
    pub fn keyword(self) -> &'static str {
        match self {
            ClauseKind::Start => "START",
            ClauseKind::Match => "MATCH",
            ClauseKind::Where => "WHERE",
            ClauseKind::Return => "RETURN",
            ClauseKind::With => "WITH",
            ClauseKind::Create => "CREATE",
            ClauseKind::Set => "SET",
            ClauseKind::Remove => "REMOVE",
            ClauseKind::Unwind => "UNWIND",
            ClauseKind::Delete => "DELETE",
            ClauseKind::Order => "ORDER BY",
            ClauseKind::Limit => "LIMIT",
            ClauseKind::Skip => "SKIP",
            ClauseKind::Using => "USING",
            ClauseKind::OptionalMatch => "OPTIONAL MATCH",
            ClauseKind::CreateUnique => "CREATE UNIQUE",
            ClauseKind::Merge => "MERGE",
        }
    }

    /// Separator between adjacent DSL fragments of this kind
    pub fn fragment_separator(self) -> &'static str {
        match self {
            ClauseKind::Where => " ",
            _ => ",",
        }
    }

    /// Separator between clauses of this kind in one builder partition
    pub fn clause_join(self) -> &'static str {
        match self {
            ClauseKind::Where => " AND ",
            ClauseKind::Merge => " MERGE ",
            ClauseKind::Unwind => " UNWIND ",
            ClauseKind::Using => " USING ",
            _ => ", ",
        }
    }

    /// Whether a clause of this kind always opens a new partition
    pub fn starts_partition(self) -> bool {
        matches!(self, ClauseKind::With)
    }

    /// Whether only the most recent clause of this kind is rendered
    pub fn last_wins(self) -> bool {
        matches!(self, ClauseKind::Limit | ClauseKind::Skip)
    }

    /// Position in [`ClauseKind::PRECEDENCE`]
    pub fn precedence(self) -> usize {
        Self::PRECEDENCE
            .iter()
            .position(|k| *k == self)
            .unwrap_or(Self::PRECEDENCE.len())
    }
}

impl fmt::Display for ClauseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}
