//! Chain DSL.
//!
//! [`CypherDsl`] is a single-owner construction context. Every call creates or
//! links fragments and registers them in an [`ExpressionRegistry`]; the final
//! text groups fragments by kind in the order each kind was first used.
//!
//! ```rust
//! use crucible_cypher::dsl::CypherDsl;
//!
//! let mut q = CypherDsl::new();
//! let n0 = q.node(3);
//! let x = q.var("x")?;
//! q.outgoing_to(n0, x)?;
//! q.ret(x)?;
//! assert_eq!(q.to_cypher()?, "START n0=node(3) MATCH (n0)-->(x) RETURN x");
//! # Ok::<(), crucible_cypher::CypherError>(())
//! ```
//!
//! Unlike the clause builder, this model mutates one registry in place and is
//! not meant to be extended from more than one place at a time. Handles carry
//! the identity of the context that issued them and are rejected elsewhere.

mod chain;
mod expr;
mod index;
mod registry;
mod vars;

pub use chain::{Direction, Hops, PathAlgorithm, RelSpec, SegmentId};
pub use expr::{Comparison, ExprId, Operand, Operator, Property};
pub use index::{IndexCategory, IndexResolver, IndexSchema};
pub use registry::{ExpressionRegistry, FragmentId};
pub use vars::{VarId, VarKind};

use crate::error::{CypherError, Result};
use crate::kind::ClauseKind;
use crate::literal::{escape_identifier, format_literal};
use crate::session::Session;
use chain::{ChainArena, NodeRef, PathBinding, SegmentKind};
use expr::{BoolExpr, ExprArena};
use vars::ContextId;
use serde_json::{Map, Value};
use tracing::{debug, trace};
use vars::Variables;

// ============================================================================
// Operands
// ============================================================================

/// Right-hand side of a chain step
#[derive(Debug, Clone, PartialEq)]
pub enum Target {
    /// Already bound variable
    Var(VarId),
    /// Node variable bound by name
    Name(String),
    /// Node id; binds a new START node
    Id(u64),
    /// Unnamed node: `()`
    Anonymous,
    /// Relationship step
    Rel(RelSpec),
}

impl From<VarId> for Target {
    fn from(id: VarId) -> Self {
        Target::Var(id)
    }
}

impl From<&str> for Target {
    fn from(name: &str) -> Self {
        Target::Name(name.to_string())
    }
}

impl From<String> for Target {
    fn from(name: String) -> Self {
        Target::Name(name)
    }
}

impl From<u64> for Target {
    fn from(id: u64) -> Self {
        Target::Id(id)
    }
}

impl From<RelSpec> for Target {
    fn from(spec: RelSpec) -> Self {
        Target::Rel(spec)
    }
}

/// Left-hand side of a chain step
#[derive(Debug, Clone, PartialEq)]
pub enum Anchor {
    /// Start a new chain at a node
    Node(Target),
    /// Extend the chain ending at this segment
    Segment(SegmentId),
}

impl From<SegmentId> for Anchor {
    fn from(id: SegmentId) -> Self {
        Anchor::Segment(id)
    }
}

impl From<VarId> for Anchor {
    fn from(id: VarId) -> Self {
        Anchor::Node(Target::Var(id))
    }
}

impl From<&str> for Anchor {
    fn from(name: &str) -> Self {
        Anchor::Node(Target::from(name))
    }
}

impl From<u64> for Anchor {
    fn from(id: u64) -> Self {
        Anchor::Node(Target::Id(id))
    }
}

impl From<Target> for Anchor {
    fn from(target: Target) -> Self {
        Anchor::Node(target)
    }
}

/// Item of a RETURN, WITH, DELETE or ORDER BY fragment
#[derive(Debug, Clone, PartialEq)]
pub enum Projection {
    Var(VarId),
    Property(Property),
    /// `count(*)` or `count(var)`
    Count(Option<VarId>),
    Raw(String),
}

impl From<VarId> for Projection {
    fn from(id: VarId) -> Self {
        Projection::Var(id)
    }
}

impl From<Property> for Projection {
    fn from(p: Property) -> Self {
        Projection::Property(p)
    }
}

impl From<&str> for Projection {
    fn from(text: &str) -> Self {
        Projection::Raw(text.to_string())
    }
}

/// Sort direction for ORDER BY
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

// ============================================================================
// Fragments
// ============================================================================

#[derive(Debug, Clone)]
enum StartSource {
    Nodes(Vec<u64>),
    Relationships(Vec<u64>),
    Lookup {
        index: String,
        key: String,
        value: Value,
    },
    IndexQuery {
        index: String,
        query: String,
    },
}

impl StartSource {
    fn render(&self) -> String {
        let ids = |ids: &[u64]| {
            ids.iter()
                .map(|id| id.to_string())
                .collect::<Vec<_>>()
                .join(",")
        };
        match self {
            StartSource::Nodes(list) => format!("node({})", ids(list)),
            StartSource::Relationships(list) => format!("relationship({})", ids(list)),
            StartSource::Lookup { index, key, value } => format!(
                "node:{}({}={})",
                escape_identifier(index),
                escape_identifier(key),
                format_literal(value)
            ),
            StartSource::IndexQuery { index, query } => format!(
                "node:{}({})",
                escape_identifier(index),
                format_literal(&Value::String(query.clone()))
            ),
        }
    }
}

#[derive(Debug, Clone)]
enum Fragment {
    Start {
        var: VarId,
        source: StartSource,
    },
    Pattern(SegmentId),
    Filter(ExprId),
    Item {
        kind: ClauseKind,
        item: Projection,
        order: Option<SortOrder>,
    },
    Count {
        kind: ClauseKind,
        value: u64,
    },
    Raw {
        kind: ClauseKind,
        text: String,
    },
}

impl Fragment {
    fn kind(&self) -> ClauseKind {
        match self {
            Fragment::Start { .. } => ClauseKind::Start,
            Fragment::Pattern(_) => ClauseKind::Match,
            Fragment::Filter(_) => ClauseKind::Where,
            Fragment::Item { kind, .. } | Fragment::Count { kind, .. } | Fragment::Raw { kind, .. } => {
                *kind
            }
        }
    }
}

// ============================================================================
// Construction context
// ============================================================================

/// Single-owner builder for the chain DSL
#[derive(Debug, Clone)]
pub struct CypherDsl {
    registry: ExpressionRegistry,
    fragments: Vec<Fragment>,
    vars: Variables,
    chains: ChainArena,
    exprs: ExprArena,
}

impl Default for CypherDsl {
    fn default() -> Self {
        let owner = ContextId::next();
        Self {
            registry: ExpressionRegistry::default(),
            fragments: Vec::new(),
            vars: Variables::new(owner),
            chains: ChainArena::new(owner),
            exprs: ExprArena::new(owner),
        }
    }
}

impl CypherDsl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry in output order
    pub fn registry(&self) -> &ExpressionRegistry {
        &self.registry
    }

    fn push_fragment(&mut self, fragment: Fragment) -> FragmentId {
        let kind = fragment.kind();
        let id = FragmentId(self.fragments.len());
        self.fragments.push(fragment);
        self.registry.insert_grouped(id, kind);
        id
    }

    // ------------------------------------------------------------------------
    // Variables and start points
    // ------------------------------------------------------------------------

    /// Bind (or reuse) a node variable by name
    pub fn var(&mut self, name: &str) -> Result<VarId> {
        self.vars.bind(name, VarKind::Node)
    }

    /// Variable currently bound to `name`, of any kind
    pub fn find(&self, name: &str) -> Option<VarId> {
        self.vars.find(name)
    }

    /// Current name of a variable
    pub fn name_of(&self, var: VarId) -> Result<&str> {
        self.vars.check(var)?;
        Ok(self.vars.name(var))
    }

    /// Kind of a variable
    pub fn kind_of(&self, var: VarId) -> Result<VarKind> {
        self.vars
            .kind(var)
            .ok_or_else(|| CypherError::unknown_handle(var))
    }

    /// Rename a variable; every reference renders the new name
    pub fn alias(&mut self, var: VarId, name: &str) -> Result<()> {
        self.vars.rename(var, name).map_err(|e| {
            debug!(%e, "rename rejected");
            e
        })
    }

    fn start(&mut self, prefix: &str, kind: VarKind, source: StartSource) -> VarId {
        let var = self.vars.auto(prefix, kind);
        self.push_fragment(Fragment::Start { var, source });
        var
    }

    /// `n<k>=node(id)`
    pub fn node(&mut self, id: u64) -> VarId {
        self.start("n", VarKind::Node, StartSource::Nodes(vec![id]))
    }

    /// `n<k>=node(a,b,..)`
    pub fn nodes(&mut self, ids: &[u64]) -> VarId {
        self.start("n", VarKind::Node, StartSource::Nodes(ids.to_vec()))
    }

    /// `r<k>=relationship(id)`
    pub fn relationship(&mut self, id: u64) -> VarId {
        self.start(
            "r",
            VarKind::Relationship,
            StartSource::Relationships(vec![id]),
        )
    }

    /// `n<k>=node:<index>(key="value")` using the index that serves `key`
    pub fn lookup(
        &mut self,
        resolver: &dyn IndexResolver,
        key: &str,
        value: impl Into<Value>,
    ) -> Result<VarId> {
        let category = resolver.index_category(key).ok_or_else(|| {
            debug!(key, "lookup on non-indexed property");
            CypherError::NotIndexed {
                key: key.to_string(),
            }
        })?;
        let source = StartSource::Lookup {
            index: resolver.index_name(category),
            key: key.to_string(),
            value: value.into(),
        };
        Ok(self.start("n", VarKind::Node, source))
    }

    /// `n<k>=node:<index>("query")` against the index of `category`
    pub fn query_index(
        &mut self,
        resolver: &dyn IndexResolver,
        query: &str,
        category: IndexCategory,
    ) -> VarId {
        let source = StartSource::IndexQuery {
            index: resolver.index_name(category),
            query: query.to_string(),
        };
        self.start("n", VarKind::Node, source)
    }

    /// Fails without binding anything when `target` cannot name a node
    fn check_node(&self, target: &Target) -> Result<()> {
        match target {
            Target::Var(id) => self.vars.check(*id),
            Target::Name(name) => match self.vars.find(name) {
                Some(id) if self.vars.kind(id) != Some(VarKind::Node) => {
                    Err(CypherError::DuplicateVariable { name: name.clone() })
                }
                _ => Ok(()),
            },
            Target::Id(_) | Target::Anonymous => Ok(()),
            Target::Rel(spec) => Err(CypherError::unsupported_relationship(format!(
                "{:?} where a node is expected",
                spec
            ))),
        }
    }

    fn check_rel_name(&self, left: &Anchor, name: &str) -> Result<()> {
        let names_left_node = matches!(left, Anchor::Node(Target::Name(n)) if n == name);
        let bound_elsewhere = self
            .vars
            .find(name)
            .is_some_and(|id| self.vars.kind(id) != Some(VarKind::Relationship));
        if names_left_node || bound_elsewhere {
            return Err(CypherError::DuplicateVariable {
                name: name.to_string(),
            });
        }
        Ok(())
    }

    fn resolve_node(&mut self, target: Target) -> Result<NodeRef> {
        match target {
            Target::Var(id) => {
                self.vars.check(id)?;
                Ok(NodeRef::Var(id))
            }
            Target::Name(name) => self.var(&name).map(NodeRef::Var),
            Target::Id(id) => Ok(NodeRef::Var(self.node(id))),
            Target::Anonymous => Ok(NodeRef::Anonymous),
            Target::Rel(spec) => Err(CypherError::unsupported_relationship(format!(
                "{:?} where a node is expected",
                spec
            ))),
        }
    }

    // ------------------------------------------------------------------------
    // Pattern chains
    // ------------------------------------------------------------------------

    /// Direction-agnostic step: `--(x)` or `-[r]`
    pub fn relate_to(
        &mut self,
        left: impl Into<Anchor>,
        right: impl Into<Target>,
    ) -> Result<SegmentId> {
        self.link(left.into(), right.into(), Direction::Both)
    }

    /// Outgoing step: `-->(x)`, `-[r]` or (closing a relationship) `->(x)`
    pub fn outgoing_to(
        &mut self,
        left: impl Into<Anchor>,
        right: impl Into<Target>,
    ) -> Result<SegmentId> {
        self.link(left.into(), right.into(), Direction::Outgoing)
    }

    /// Incoming step: `<--(x)`, `<-[r]` or (closing a relationship) `-(x)`
    pub fn incoming_from(
        &mut self,
        left: impl Into<Anchor>,
        right: impl Into<Target>,
    ) -> Result<SegmentId> {
        self.link(left.into(), right.into(), Direction::Incoming)
    }

    fn link(&mut self, left: Anchor, right: Target, direction: Direction) -> Result<SegmentId> {
        // Both sides are validated before anything is bound or registered
        let open_rel = match &left {
            Anchor::Segment(id) => {
                let segment = self.chains.get(*id)?;
                if !segment.is_tail() {
                    debug!(segment = id.0, "extending a superseded segment");
                    return Err(CypherError::ChainAlreadyExtended { segment: id.0 });
                }
                segment.opens_relationship()
            }
            Anchor::Node(target) => {
                self.check_node(target)?;
                false
            }
        };
        match &right {
            Target::Rel(_) if open_rel => return Err(CypherError::DanglingRelationship),
            Target::Rel(spec) => {
                spec.validate()?;
                if let Some(name) = spec.var_name() {
                    self.check_rel_name(&left, name)?;
                }
            }
            node => self.check_node(node)?,
        }

        // The relationship name is bound first so an auto-named START node skips it
        let rel_var = match &right {
            Target::Rel(spec) => spec
                .var_name()
                .map(|name| self.vars.bind(name, VarKind::Relationship))
                .transpose()?,
            _ => None,
        };
        let (prev, head) = match left {
            Anchor::Segment(id) => (Some(id), None),
            Anchor::Node(target) => (None, Some(self.resolve_node(target)?)),
        };

        let kind = match right {
            Target::Rel(spec) => SegmentKind::EnterRel {
                direction,
                var: rel_var,
                spec,
            },
            node => {
                let node = self.resolve_node(node)?;
                if open_rel {
                    SegmentKind::ExitRel { direction, node }
                } else {
                    SegmentKind::NodeHop { direction, node }
                }
            }
        };

        let id = self.chains.push(head, kind, prev);
        let fragment = self.push_fragment(Fragment::Pattern(id));
        self.chains.set_fragment(id, fragment);
        // The superseded tail becomes an internal link
        if let Some(old) = prev.and_then(|p| self.chains.take_fragment(p)) {
            self.registry.remove(old);
        }
        trace!(segment = id.0, ?direction, "extended pattern chain");
        Ok(id)
    }

    fn bind_path(&mut self, tail: SegmentId, algorithm: Option<PathAlgorithm>) -> Result<VarId> {
        let head = self.chains.head_of(tail)?;
        let var = match self.chains.path(head) {
            Some(binding) => binding.var,
            None => self.vars.auto("p", VarKind::Path),
        };
        self.chains.set_path(head, PathBinding { var, algorithm });
        Ok(var)
    }

    /// Bind the whole chain to a path variable: `p0 = (..)`
    pub fn path(&mut self, tail: SegmentId) -> Result<VarId> {
        self.bind_path(tail, None)
    }

    /// `p0 = shortestPath(..)`
    pub fn shortest_path(&mut self, tail: SegmentId) -> Result<VarId> {
        self.bind_path(tail, Some(PathAlgorithm::ShortestPath))
    }

    /// `p0 = allShortestPaths(..)`
    pub fn all_shortest_paths(&mut self, tail: SegmentId) -> Result<VarId> {
        self.bind_path(tail, Some(PathAlgorithm::AllShortestPaths))
    }

    // ------------------------------------------------------------------------
    // Filters
    // ------------------------------------------------------------------------

    /// `var.name` reference
    pub fn prop(&self, var: VarId, name: &str) -> Result<Property> {
        self.vars.check(var)?;
        Ok(Property {
            var,
            name: name.to_string(),
        })
    }

    fn check_operand(&self, operand: &Operand) -> Result<()> {
        match operand {
            Operand::Property(p) => self.vars.check(p.var),
            Operand::Expr(id) => self.exprs.get(*id).map(|_| ()),
            Operand::Literal(_) | Operand::Regex(_) => Ok(()),
        }
    }

    /// Register `node` as a WHERE fragment and drop the fragments of `absorbed`
    fn register_expr(&mut self, node: BoolExpr, absorbed: &[ExprId]) -> ExprId {
        let id = self.exprs.push(node);
        let fragment = self.push_fragment(Fragment::Filter(id));
        self.exprs.set_fragment(id, fragment);
        for child in absorbed {
            if let Some(old) = self.exprs.take_fragment(*child) {
                self.registry.remove(old);
            }
        }
        id
    }

    fn expr_children(node: &BoolExpr) -> Vec<ExprId> {
        node.operands()
            .iter()
            .filter_map(|o| match o {
                Operand::Expr(id) => Some(*id),
                _ => None,
            })
            .collect()
    }

    /// `(lhs <op> rhs)` registered as a filter
    pub fn compare(
        &mut self,
        lhs: impl Into<Operand>,
        op: Comparison,
        rhs: impl Into<Operand>,
    ) -> Result<ExprId> {
        let (lhs, rhs) = (lhs.into(), rhs.into());
        self.check_operand(&lhs)?;
        self.check_operand(&rhs)?;
        let node = BoolExpr::compare(lhs, op, rhs);
        let absorbed = Self::expr_children(&node);
        Ok(self.register_expr(node, &absorbed))
    }

    pub fn eq(&mut self, lhs: impl Into<Operand>, rhs: impl Into<Operand>) -> Result<ExprId> {
        self.compare(lhs, Comparison::Eq, rhs)
    }

    pub fn ne(&mut self, lhs: impl Into<Operand>, rhs: impl Into<Operand>) -> Result<ExprId> {
        self.compare(lhs, Comparison::Ne, rhs)
    }

    pub fn lt(&mut self, lhs: impl Into<Operand>, rhs: impl Into<Operand>) -> Result<ExprId> {
        self.compare(lhs, Comparison::Lt, rhs)
    }

    pub fn le(&mut self, lhs: impl Into<Operand>, rhs: impl Into<Operand>) -> Result<ExprId> {
        self.compare(lhs, Comparison::Le, rhs)
    }

    pub fn gt(&mut self, lhs: impl Into<Operand>, rhs: impl Into<Operand>) -> Result<ExprId> {
        self.compare(lhs, Comparison::Gt, rhs)
    }

    pub fn ge(&mut self, lhs: impl Into<Operand>, rhs: impl Into<Operand>) -> Result<ExprId> {
        self.compare(lhs, Comparison::Ge, rhs)
    }

    /// `(lhs =~ /pattern/)`
    pub fn matches(&mut self, lhs: impl Into<Operand>, pattern: &str) -> Result<ExprId> {
        self.compare(lhs, Comparison::RegexMatch, Operand::regex(pattern))
    }

    fn combine(&mut self, left: ExprId, op: Operator, right: ExprId) -> Result<ExprId> {
        self.exprs.get(left)?;
        self.exprs.get(right)?;
        let node = BoolExpr::new(left.into(), op, right.into());
        Ok(self.register_expr(node, &[left, right]))
    }

    /// `(left and right)`; both operands stop being top-level filters
    pub fn and(&mut self, left: ExprId, right: ExprId) -> Result<ExprId> {
        self.combine(left, Operator::And, right)
    }

    /// `(left or right)`; both operands stop being top-level filters
    pub fn or(&mut self, left: ExprId, right: ExprId) -> Result<ExprId> {
        self.combine(left, Operator::Or, right)
    }

    /// New node with the negation flipped; `expr` itself is left unchanged
    pub fn not(&mut self, expr: ExprId) -> Result<ExprId> {
        let node = self.exprs.get(expr)?.negate();
        Ok(self.register_expr(node, &[expr]))
    }

    // ------------------------------------------------------------------------
    // Projections
    // ------------------------------------------------------------------------

    fn check_projection(&self, item: &Projection) -> Result<()> {
        match item {
            Projection::Var(id) | Projection::Count(Some(id)) => self.vars.check(*id),
            Projection::Property(p) => self.vars.check(p.var),
            Projection::Count(None) | Projection::Raw(_) => Ok(()),
        }
    }

    fn push_item(
        &mut self,
        kind: ClauseKind,
        item: Projection,
        order: Option<SortOrder>,
    ) -> Result<FragmentId> {
        self.check_projection(&item)?;
        Ok(self.push_fragment(Fragment::Item { kind, item, order }))
    }

    pub fn ret(&mut self, item: impl Into<Projection>) -> Result<FragmentId> {
        self.push_item(ClauseKind::Return, item.into(), None)
    }

    pub fn with(&mut self, item: impl Into<Projection>) -> Result<FragmentId> {
        self.push_item(ClauseKind::With, item.into(), None)
    }

    pub fn delete(&mut self, item: impl Into<Projection>) -> Result<FragmentId> {
        self.push_item(ClauseKind::Delete, item.into(), None)
    }

    pub fn order_by(&mut self, item: impl Into<Projection>, order: SortOrder) -> Result<FragmentId> {
        self.push_item(ClauseKind::Order, item.into(), Some(order))
    }

    fn set_count(&mut self, kind: ClauseKind, value: u64) -> FragmentId {
        let existing = self
            .registry
            .iter()
            .find(|(_, k)| *k == kind)
            .map(|(id, _)| id);
        match existing {
            Some(id) => {
                self.fragments[id.0] = Fragment::Count { kind, value };
                id
            }
            None => self.push_fragment(Fragment::Count { kind, value }),
        }
    }

    /// `SKIP n`; a later call replaces the value
    pub fn skip(&mut self, value: u64) -> FragmentId {
        self.set_count(ClauseKind::Skip, value)
    }

    /// `LIMIT n`; a later call replaces the value
    pub fn limit(&mut self, value: u64) -> FragmentId {
        self.set_count(ClauseKind::Limit, value)
    }

    /// Free text registered under any kind
    pub fn raw(&mut self, kind: ClauseKind, text: impl Into<String>) -> FragmentId {
        self.push_fragment(Fragment::Raw {
            kind,
            text: text.into(),
        })
    }

    // ------------------------------------------------------------------------
    // Rendering
    // ------------------------------------------------------------------------

    fn render_projection(&self, item: &Projection) -> String {
        match item {
            Projection::Var(id) => self.vars.render(*id).into_owned(),
            Projection::Property(p) => p.render(&self.vars),
            Projection::Count(None) => "count(*)".to_string(),
            Projection::Count(Some(id)) => format!("count({})", self.vars.render(*id)),
            Projection::Raw(text) => text.clone(),
        }
    }

    fn render_fragment(&self, id: FragmentId) -> String {
        match &self.fragments[id.0] {
            Fragment::Start { var, source } => {
                format!("{}={}", self.vars.render(*var), source.render())
            }
            Fragment::Pattern(segment) => self.chains.render(*segment, &self.vars),
            Fragment::Filter(expr) => self.exprs.render(*expr, &self.vars),
            Fragment::Item { item, order, .. } => {
                let text = self.render_projection(item);
                match order {
                    Some(SortOrder::Desc) => format!("{} DESC", text),
                    _ => text,
                }
            }
            Fragment::Count { value, .. } => value.to_string(),
            Fragment::Raw { text, .. } => text.clone(),
        }
    }

    /// Every registered chain must end on a node
    fn check_closed(&self) -> Result<()> {
        for (id, _) in self.registry.iter() {
            if let Fragment::Pattern(segment) = &self.fragments[id.0] {
                if self.chains.get(*segment)?.opens_relationship() {
                    debug!(segment = segment.0, "pattern ends inside a relationship");
                    return Err(CypherError::DanglingRelationship);
                }
            }
        }
        Ok(())
    }

    /// Render every registered fragment, one keyword per run of a kind
    ///
    /// Fails with [`CypherError::DanglingRelationship`] while a chain still
    /// ends in an unclosed relationship.
    pub fn to_cypher(&self) -> Result<String> {
        self.check_closed()?;
        Ok(self
            .registry
            .runs()
            .into_iter()
            .map(|(kind, ids)| {
                let body = ids
                    .iter()
                    .map(|id| self.render_fragment(*id))
                    .collect::<Vec<_>>()
                    .join(kind.fragment_separator());
                format!("{} {}", kind.keyword(), body)
            })
            .collect::<Vec<_>>()
            .join(" "))
    }

    /// Hand the rendered text to a session
    pub fn execute<S>(&self, session: &S) -> std::result::Result<S::Output, S::Error>
    where
        S: Session,
        S::Error: From<CypherError>,
    {
        let cypher = self.to_cypher()?;
        debug!(len = cypher.len(), "executing chain query");
        session.run(&cypher, &Map::new())
    }
}
