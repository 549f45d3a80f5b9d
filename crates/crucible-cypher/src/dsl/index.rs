//! Index resolution for START lookups.
//!
//! The DSL never inspects domain models directly. It asks an [`IndexResolver`]
//! which index category serves a property and what that index is called.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Kind of lookup index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexCategory {
    Exact,
    Fulltext,
}

impl IndexCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            IndexCategory::Exact => "exact",
            IndexCategory::Fulltext => "fulltext",
        }
    }
}

/// Index metadata of one index-bearing type
pub trait IndexResolver {
    /// Name of this type's index for `category`
    fn index_name(&self, category: IndexCategory) -> String;

    /// Category of the index serving `key`, or None when the key is not indexed
    fn index_category(&self, key: &str) -> Option<IndexCategory>;
}

/// In-memory index declarations for a type
///
/// Index names follow the `<Type>_<category>` convention, e.g. `Person_exact`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IndexSchema {
    pub type_name: String,
    #[serde(default)]
    pub keys: HashMap<String, IndexCategory>,
}

impl IndexSchema {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            keys: HashMap::new(),
        }
    }

    /// Declare an index on `key`
    pub fn with_index(mut self, key: impl Into<String>, category: IndexCategory) -> Self {
        self.keys.insert(key.into(), category);
        self
    }
}

impl IndexResolver for IndexSchema {
    fn index_name(&self, category: IndexCategory) -> String {
        format!("{}_{}", self.type_name, category.as_str())
    }

    fn index_category(&self, key: &str) -> Option<IndexCategory> {
        self.keys.get(key).copied()
    }
}
