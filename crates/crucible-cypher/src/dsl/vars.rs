//! Variable bindings for the chain DSL.

use crate::error::{CypherError, Result};
use crate::literal::escape_identifier;
use std::borrow::Cow;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Construction context that issued a handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub(crate) struct ContextId(usize);

impl ContextId {
    /// Fresh id; zero is left to arenas built with `Default`
    pub(crate) fn next() -> Self {
        static NEXT: AtomicUsize = AtomicUsize::new(1);
        ContextId(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Handle of a variable bound in a [`CypherDsl`](super::CypherDsl)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VarId(pub(crate) usize, pub(crate) ContextId);

/// What a variable is bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarKind {
    Node,
    Relationship,
    Path,
}

#[derive(Debug, Clone)]
struct Variable {
    name: String,
    kind: VarKind,
}

/// Canonical variable list, used for naming and duplicate detection
#[derive(Debug, Clone, Default)]
pub(crate) struct Variables {
    owner: ContextId,
    list: Vec<Variable>,
}

impl Variables {
    pub(crate) fn new(owner: ContextId) -> Self {
        Self {
            owner,
            list: Vec::new(),
        }
    }

    /// Bind `name`, reusing an existing binding of the same kind
    pub(crate) fn bind(&mut self, name: &str, kind: VarKind) -> Result<VarId> {
        match self.find(name) {
            Some(id) if self.list[id.0].kind == kind => Ok(id),
            Some(_) => Err(CypherError::DuplicateVariable {
                name: name.to_string(),
            }),
            None => Ok(self.push(name.to_string(), kind)),
        }
    }

    /// Bind the first free `<prefix><k>` name
    pub(crate) fn auto(&mut self, prefix: &str, kind: VarKind) -> VarId {
        let mut counter = 0;
        loop {
            let name = format!("{}{}", prefix, counter);
            if self.find(&name).is_none() {
                return self.push(name, kind);
            }
            counter += 1;
        }
    }

    /// Rename a variable; the new name must not belong to another variable
    pub(crate) fn rename(&mut self, id: VarId, name: &str) -> Result<()> {
        self.check(id)?;
        match self.find(name) {
            Some(other) if other != id => Err(CypherError::DuplicateVariable {
                name: name.to_string(),
            }),
            _ => {
                self.list[id.0].name = name.to_string();
                Ok(())
            }
        }
    }

    fn owns(&self, id: VarId) -> bool {
        id.1 == self.owner && id.0 < self.list.len()
    }

    pub(crate) fn check(&self, id: VarId) -> Result<()> {
        if self.owns(id) {
            Ok(())
        } else {
            Err(CypherError::unknown_handle(id))
        }
    }

    /// Name of a checked handle
    pub(crate) fn name(&self, id: VarId) -> &str {
        self.list.get(id.0).map_or("", |v| v.name.as_str())
    }

    /// Name as it appears in query text, backticked when needed
    pub(crate) fn render(&self, id: VarId) -> Cow<'_, str> {
        escape_identifier(self.name(id))
    }

    pub(crate) fn kind(&self, id: VarId) -> Option<VarKind> {
        if !self.owns(id) {
            return None;
        }
        self.list.get(id.0).map(|v| v.kind)
    }

    pub(crate) fn find(&self, name: &str) -> Option<VarId> {
        self.list
            .iter()
            .position(|v| v.name == name)
            .map(|index| VarId(index, self.owner))
    }

    fn push(&mut self, name: String, kind: VarKind) -> VarId {
        self.list.push(Variable { name, kind });
        VarId(self.list.len() - 1, self.owner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_reuses_same_kind() {
        let mut vars = Variables::default();
        let a = vars.bind("x", VarKind::Node).unwrap();
        let b = vars.bind("x", VarKind::Node).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_bind_rejects_other_kind() {
        let mut vars = Variables::default();
        vars.bind("r", VarKind::Node).unwrap();
        let err = vars.bind("r", VarKind::Relationship).unwrap_err();
        assert!(matches!(err, CypherError::DuplicateVariable { .. }));
    }

    #[test]
    fn test_auto_names_skip_taken() {
        let mut vars = Variables::default();
        vars.bind("n1", VarKind::Node).unwrap();
        let first = vars.auto("n", VarKind::Node);
        let second = vars.auto("n", VarKind::Node);
        assert_eq!(vars.name(first), "n0");
        assert_eq!(vars.name(second), "n2");
    }

    #[test]
    fn test_auto_starts_at_zero() {
        let mut vars = Variables::default();
        let id = vars.auto("n", VarKind::Node);
        assert_eq!(vars.name(id), "n0");
        let path = vars.auto("p", VarKind::Path);
        assert_eq!(vars.name(path), "p0");
    }

    #[test]
    fn test_rename_conflict() {
        let mut vars = Variables::default();
        let a = vars.bind("a", VarKind::Node).unwrap();
        vars.bind("b", VarKind::Node).unwrap();
        assert!(vars.rename(a, "b").is_err());
        vars.rename(a, "me").unwrap();
        assert_eq!(vars.name(a), "me");
        assert_eq!(vars.find("a"), None);
    }

    #[test]
    fn test_handle_from_other_owner_rejected() {
        let mut mine = Variables::new(ContextId::next());
        let mut theirs = Variables::new(ContextId::next());
        mine.bind("mine", VarKind::Node).unwrap();
        let foreign = theirs.bind("secret", VarKind::Node).unwrap();

        assert_eq!(foreign.0, 0);
        assert!(matches!(
            mine.check(foreign),
            Err(CypherError::UnknownHandle { .. })
        ));
        assert_eq!(mine.kind(foreign), None);
    }

    #[test]
    fn test_render_escapes_names() {
        let mut vars = Variables::default();
        let plain = vars.bind("n", VarKind::Node).unwrap();
        let spaced = vars.bind("my var", VarKind::Node).unwrap();
        assert_eq!(vars.render(plain), "n");
        assert_eq!(vars.render(spaced), "`my var`");
        assert_eq!(vars.name(spaced), "my var");
    }
}
