//! Pattern chains.
//!
//! A chain is a doubly linked run of segments stored in an arena and addressed
//! by [`SegmentId`]. Only the current tail of a chain is registered as a MATCH
//! fragment; earlier segments are reached by walking `prev` from the tail.
//!
//! Segment text:
//! - node hop: `-->(x)`, `<--(x)`, `--(x)`
//! - entering a relationship: `-[r]` or `<-[r]`
//! - leaving a relationship: `->(x)` or `-(x)`
//!
//! The head segment additionally emits its left node, e.g. `(n0)-->(x)`.

use super::registry::FragmentId;
use super::vars::{ContextId, VarId, Variables};
use crate::error::{CypherError, Result};
use crate::literal::{describe_shape, escape_identifier};
use serde_json::Value;

/// Handle of a pattern segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SegmentId(pub(crate) usize, pub(crate) ContextId);

/// Traversal direction of a hop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    Outgoing,
    Incoming,
    #[default]
    Both,
}

/// Path function wrapped around a whole chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathAlgorithm {
    ShortestPath,
    AllShortestPaths,
}

impl PathAlgorithm {
    pub fn function_name(self) -> &'static str {
        match self {
            PathAlgorithm::ShortestPath => "shortestPath",
            PathAlgorithm::AllShortestPaths => "allShortestPaths",
        }
    }
}

/// Variable-length bounds of a relationship: `*`, `*2`, `*1..3`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hops {
    pub min: Option<u32>,
    pub max: Option<u32>,
}

impl Hops {
    /// Lower bound must not exceed the upper bound
    pub(crate) fn validate(&self) -> Result<()> {
        match (self.min, self.max) {
            (Some(min), Some(max)) if min > max => Err(CypherError::unsupported_relationship(
                format!("hop bounds {}..{}", min, max),
            )),
            _ => Ok(()),
        }
    }

    fn render(&self) -> String {
        match (self.min, self.max) {
            (None, None) => "*".to_string(),
            (Some(min), Some(max)) if min == max => format!("*{}", min),
            (Some(min), Some(max)) => format!("*{}..{}", min, max),
            (Some(min), None) => format!("*{}..", min),
            (None, Some(max)) => format!("*..{}", max),
        }
    }
}

/// Relationship reference rendered inside brackets
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RelSpec {
    var: Option<String>,
    types: Vec<String>,
    hops: Option<Hops>,
    raw: Option<String>,
}

impl RelSpec {
    /// Anonymous relationship of any type: `[]`
    pub fn any() -> Self {
        Self::default()
    }

    /// Relationship bound to a variable: `[r]`
    pub fn var(name: impl Into<String>) -> Self {
        Self {
            var: Some(name.into()),
            ..Self::default()
        }
    }

    /// Relationship of one type: `[:KNOWS]`
    pub fn of_type(rel_type: impl Into<String>) -> Self {
        Self {
            types: vec![rel_type.into()],
            ..Self::default()
        }
    }

    /// Text emitted between the brackets unchanged
    pub fn raw(text: impl Into<String>) -> Self {
        Self {
            raw: Some(text.into()),
            ..Self::default()
        }
    }

    /// Bind the relationship to a variable
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.var = Some(name.into());
        self
    }

    /// Add an alternative relationship type
    pub fn with_type(mut self, rel_type: impl Into<String>) -> Self {
        self.types.push(rel_type.into());
        self
    }

    /// Variable-length bounds; `None` leaves a side open
    pub fn hops(mut self, min: Option<u32>, max: Option<u32>) -> Self {
        self.hops = Some(Hops { min, max });
        self
    }

    pub fn var_name(&self) -> Option<&str> {
        self.var.as_deref()
    }

    pub(crate) fn validate(&self) -> Result<()> {
        self.hops.as_ref().map_or(Ok(()), Hops::validate)
    }

    /// Bracketed text, with `var` substituted for the bound name
    fn render(&self, var: Option<&str>) -> String {
        if let Some(raw) = &self.raw {
            return format!("[{}]", raw);
        }
        let mut inner = var.unwrap_or_default().to_string();
        if !self.types.is_empty() {
            inner.push(':');
            inner.push_str(
                &self
                    .types
                    .iter()
                    .map(|t| escape_identifier(t).into_owned())
                    .collect::<Vec<_>>()
                    .join("|"),
            );
        }
        if let Some(hops) = &self.hops {
            inner.push_str(&hops.render());
        }
        format!("[{}]", inner)
    }
}

impl TryFrom<&Value> for RelSpec {
    type Error = CypherError;

    /// Strings are raw text; maps take `var`, `type`, `types`, `min`, `max`
    fn try_from(value: &Value) -> Result<Self> {
        let map = match value {
            Value::String(raw) => return Ok(RelSpec::raw(raw.clone())),
            Value::Object(map) => map,
            other => {
                return Err(CypherError::unsupported_relationship(describe_shape(other)));
            }
        };

        let mut spec = RelSpec::any();
        let mut min = None;
        let mut max = None;
        for (key, entry) in map {
            match (key.as_str(), entry) {
                ("var", Value::String(name)) => spec.var = Some(name.clone()),
                ("type", Value::String(t)) => spec.types.push(t.clone()),
                ("types", Value::Array(types)) => {
                    for t in types {
                        match t {
                            Value::String(t) => spec.types.push(t.clone()),
                            other => {
                                return Err(CypherError::unsupported_relationship(format!(
                                    "types entry {}",
                                    describe_shape(other)
                                )))
                            }
                        }
                    }
                }
                ("min", Value::Number(n)) => min = Some(hop_bound(n)?),
                ("max", Value::Number(n)) => max = Some(hop_bound(n)?),
                (key, other) => {
                    return Err(CypherError::unsupported_relationship(format!(
                        "key '{}' with {}",
                        key,
                        describe_shape(other)
                    )))
                }
            }
        }
        if min.is_some() || max.is_some() {
            spec.hops = Some(Hops { min, max });
        }
        spec.validate()?;
        Ok(spec)
    }
}

fn hop_bound(n: &serde_json::Number) -> Result<u32> {
    n.as_u64()
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(|| CypherError::unsupported_relationship(format!("hop bound {}", n)))
}

/// Node position in a pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NodeRef {
    Var(VarId),
    Anonymous,
}

impl NodeRef {
    fn render(&self, vars: &Variables) -> String {
        match self {
            NodeRef::Var(id) => format!("({})", vars.render(*id)),
            NodeRef::Anonymous => "()".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) enum SegmentKind {
    NodeHop { direction: Direction, node: NodeRef },
    EnterRel { direction: Direction, var: Option<VarId>, spec: RelSpec },
    ExitRel { direction: Direction, node: NodeRef },
}

impl SegmentKind {
    fn render(&self, vars: &Variables) -> String {
        match self {
            SegmentKind::NodeHop { direction, node } => {
                let connector = match direction {
                    Direction::Outgoing => "-->",
                    Direction::Incoming => "<--",
                    Direction::Both => "--",
                };
                format!("{}{}", connector, node.render(vars))
            }
            SegmentKind::EnterRel { direction, var, spec } => {
                let connector = match direction {
                    Direction::Incoming => "<-",
                    Direction::Outgoing | Direction::Both => "-",
                };
                let name = var.map(|id| vars.render(id));
                format!("{}{}", connector, spec.render(name.as_deref()))
            }
            SegmentKind::ExitRel { direction, node } => {
                let connector = match direction {
                    Direction::Outgoing => "->",
                    Direction::Incoming | Direction::Both => "-",
                };
                format!("{}{}", connector, node.render(vars))
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct PathBinding {
    pub(crate) var: VarId,
    pub(crate) algorithm: Option<PathAlgorithm>,
}

#[derive(Debug, Clone)]
pub(crate) struct Segment {
    /// Left node; only set on the chain head
    head: Option<NodeRef>,
    kind: SegmentKind,
    prev: Option<SegmentId>,
    next: Option<SegmentId>,
    /// Registry fragment while this segment is the tail
    fragment: Option<FragmentId>,
    /// Path variable; only set on the chain head
    path: Option<PathBinding>,
}

impl Segment {
    pub(crate) fn is_tail(&self) -> bool {
        self.next.is_none()
    }

    pub(crate) fn opens_relationship(&self) -> bool {
        matches!(self.kind, SegmentKind::EnterRel { .. })
    }
}

/// Arena of every segment created by one construction context
#[derive(Debug, Clone, Default)]
pub(crate) struct ChainArena {
    owner: ContextId,
    segments: Vec<Segment>,
}

impl ChainArena {
    pub(crate) fn new(owner: ContextId) -> Self {
        Self {
            owner,
            segments: Vec::new(),
        }
    }

    pub(crate) fn get(&self, id: SegmentId) -> Result<&Segment> {
        self.segments
            .get(id.0)
            .filter(|_| id.1 == self.owner)
            .ok_or_else(|| CypherError::unknown_handle(id))
    }

    /// Append a segment after `prev` (or as a new head when `prev` is None)
    pub(crate) fn push(
        &mut self,
        head: Option<NodeRef>,
        kind: SegmentKind,
        prev: Option<SegmentId>,
    ) -> SegmentId {
        let id = SegmentId(self.segments.len(), self.owner);
        self.segments.push(Segment {
            head,
            kind,
            prev,
            next: None,
            fragment: None,
            path: None,
        });
        if let Some(prev) = prev {
            self.segments[prev.0].next = Some(id);
        }
        id
    }

    pub(crate) fn set_fragment(&mut self, id: SegmentId, fragment: FragmentId) {
        self.segments[id.0].fragment = Some(fragment);
    }

    pub(crate) fn take_fragment(&mut self, id: SegmentId) -> Option<FragmentId> {
        self.segments.get_mut(id.0).and_then(|s| s.fragment.take())
    }

    /// Walk `prev` until the head
    pub(crate) fn head_of(&self, id: SegmentId) -> Result<SegmentId> {
        let mut current = id;
        while let Some(prev) = self.get(current)?.prev {
            current = prev;
        }
        Ok(current)
    }

    pub(crate) fn path(&self, head: SegmentId) -> Option<PathBinding> {
        self.segments.get(head.0).and_then(|s| s.path)
    }

    pub(crate) fn set_path(&mut self, head: SegmentId, binding: PathBinding) {
        self.segments[head.0].path = Some(binding);
    }

    /// Segment ids from the head, following `next`
    pub(crate) fn walk(&self, any: SegmentId) -> Vec<SegmentId> {
        let mut ids = Vec::new();
        let mut current = self.head_of(any).ok();
        while let Some(id) = current {
            ids.push(id);
            current = self.segments[id.0].next;
        }
        ids
    }

    /// Full pattern text of the chain containing `any`
    pub(crate) fn render(&self, any: SegmentId, vars: &Variables) -> String {
        let ids = self.walk(any);
        let mut text = String::new();
        for id in &ids {
            let segment = &self.segments[id.0];
            if let Some(head) = &segment.head {
                text.push_str(&head.render(vars));
            }
            text.push_str(&segment.kind.render(vars));
        }

        match ids.first().and_then(|head| self.path(*head)) {
            Some(PathBinding {
                var,
                algorithm: Some(algorithm),
            }) => format!(
                "{} = {}({})",
                vars.render(var),
                algorithm.function_name(),
                text
            ),
            Some(PathBinding {
                var,
                algorithm: None,
            }) => format!("{} = {}", vars.render(var), text),
            None => text,
        }
    }
}
