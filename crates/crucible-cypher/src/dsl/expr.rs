//! Property references and boolean filter trees.
//!
//! Nodes are immutable once pushed into the arena. Negation produces a new node
//! that shares the children of the original, so a sub-expression can appear in
//! several trees. Every node renders fully parenthesized.

use super::registry::FragmentId;
use super::vars::{ContextId, VarId, Variables};
use crate::error::{CypherError, Result};
use crate::literal::{escape_identifier, format_literal, format_regex};
use serde_json::Value;

/// Handle of a boolean expression node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExprId(pub(crate) usize, pub(crate) ContextId);

/// `variable.property` reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    pub(crate) var: VarId,
    pub(crate) name: String,
}

impl Property {
    pub fn var(&self) -> VarId {
        self.var
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn render(&self, vars: &Variables) -> String {
        format!("{}.{}", vars.render(self.var), escape_identifier(&self.name))
    }
}

/// Comparison between two operands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Lt,
    Le,
    Eq,
    Ne,
    Ge,
    Gt,
    RegexMatch,
}

/// Operator of a tree node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Compare(Comparison),
    And,
    Or,
}

impl Operator {
    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Compare(Comparison::Lt) => "<",
            Operator::Compare(Comparison::Le) => "<=",
            Operator::Compare(Comparison::Eq) => "=",
            Operator::Compare(Comparison::Ne) => "<>",
            Operator::Compare(Comparison::Ge) => ">=",
            Operator::Compare(Comparison::Gt) => ">",
            Operator::Compare(Comparison::RegexMatch) => "=~",
            Operator::And => "and",
            Operator::Or => "or",
        }
    }
}

/// Leaf or subtree of a boolean expression
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Property(Property),
    Literal(Value),
    /// Regular expression, rendered as `/pattern/`
    Regex(String),
    Expr(ExprId),
}

impl Operand {
    pub fn regex(pattern: impl Into<String>) -> Self {
        Operand::Regex(pattern.into())
    }

    fn is_regex(&self) -> bool {
        matches!(self, Operand::Regex(_))
    }
}

impl From<Property> for Operand {
    fn from(p: Property) -> Self {
        Operand::Property(p)
    }
}

impl From<ExprId> for Operand {
    fn from(id: ExprId) -> Self {
        Operand::Expr(id)
    }
}

impl From<Value> for Operand {
    fn from(v: Value) -> Self {
        Operand::Literal(v)
    }
}

impl From<&str> for Operand {
    fn from(s: &str) -> Self {
        Operand::Literal(Value::String(s.to_string()))
    }
}

impl From<String> for Operand {
    fn from(s: String) -> Self {
        Operand::Literal(Value::String(s))
    }
}

impl From<i64> for Operand {
    fn from(n: i64) -> Self {
        Operand::Literal(Value::from(n))
    }
}

impl From<i32> for Operand {
    fn from(n: i32) -> Self {
        Operand::Literal(Value::from(n))
    }
}

impl From<f64> for Operand {
    fn from(n: f64) -> Self {
        Operand::Literal(Value::from(n))
    }
}

impl From<bool> for Operand {
    fn from(b: bool) -> Self {
        Operand::Literal(Value::Bool(b))
    }
}

#[derive(Debug, Clone)]
pub(crate) struct BoolExpr {
    left: Operand,
    op: Operator,
    right: Operand,
    negated: bool,
    /// Registry fragment while this node is a top-level filter
    fragment: Option<FragmentId>,
}

impl BoolExpr {
    /// Comparison node; a regex operand forces `=~`
    pub(crate) fn compare(left: Operand, op: Comparison, right: Operand) -> Self {
        let op = if left.is_regex() || right.is_regex() {
            Comparison::RegexMatch
        } else {
            op
        };
        Self::new(left, Operator::Compare(op), right)
    }

    pub(crate) fn new(left: Operand, op: Operator, right: Operand) -> Self {
        Self {
            left,
            op,
            right,
            negated: false,
            fragment: None,
        }
    }

    /// Copy sharing the same children with the negation flipped
    pub(crate) fn negate(&self) -> Self {
        Self {
            left: self.left.clone(),
            op: self.op,
            right: self.right.clone(),
            negated: !self.negated,
            fragment: None,
        }
    }

    pub(crate) fn operands(&self) -> [&Operand; 2] {
        [&self.left, &self.right]
    }
}

/// Arena of expression nodes
#[derive(Debug, Clone, Default)]
pub(crate) struct ExprArena {
    owner: ContextId,
    nodes: Vec<BoolExpr>,
}

impl ExprArena {
    pub(crate) fn new(owner: ContextId) -> Self {
        Self {
            owner,
            nodes: Vec::new(),
        }
    }

    pub(crate) fn get(&self, id: ExprId) -> Result<&BoolExpr> {
        self.nodes
            .get(id.0)
            .filter(|_| id.1 == self.owner)
            .ok_or_else(|| CypherError::unknown_handle(id))
    }

    pub(crate) fn push(&mut self, node: BoolExpr) -> ExprId {
        self.nodes.push(node);
        ExprId(self.nodes.len() - 1, self.owner)
    }

    pub(crate) fn set_fragment(&mut self, id: ExprId, fragment: FragmentId) {
        self.nodes[id.0].fragment = Some(fragment);
    }

    pub(crate) fn take_fragment(&mut self, id: ExprId) -> Option<FragmentId> {
        self.nodes.get_mut(id.0).and_then(|n| n.fragment.take())
    }

    pub(crate) fn render(&self, id: ExprId, vars: &Variables) -> String {
        let Some(node) = self.nodes.get(id.0) else {
            return String::new();
        };
        let body = format!(
            "({} {} {})",
            self.render_operand(&node.left, vars),
            node.op.symbol(),
            self.render_operand(&node.right, vars)
        );
        if node.negated {
            format!("not {}", body)
        } else {
            body
        }
    }

    fn render_operand(&self, operand: &Operand, vars: &Variables) -> String {
        match operand {
            Operand::Property(p) => p.render(vars),
            Operand::Literal(v) => format_literal(v),
            Operand::Regex(pattern) => format_regex(pattern),
            Operand::Expr(id) => self.render(*id, vars),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsl::vars::VarKind;
    use serde_json::json;

    fn setup() -> (Variables, VarId) {
        let mut vars = Variables::default();
        let n = vars.bind("n", VarKind::Node).unwrap();
        (vars, n)
    }

    fn prop(var: VarId, name: &str) -> Operand {
        Operand::Property(Property {
            var,
            name: name.to_string(),
        })
    }

    #[test]
    fn test_comparison_is_parenthesized() {
        let (vars, n) = setup();
        let mut arena = ExprArena::default();
        let id = arena.push(BoolExpr::compare(prop(n, "age"), Comparison::Gt, 30.into()));
        assert_eq!(arena.render(id, &vars), "(n.age > 30)");
    }

    #[test]
    fn test_string_literal_quoted_property_bare() {
        let (vars, n) = setup();
        let mut arena = ExprArena::default();
        let id = arena.push(BoolExpr::compare(
            prop(n, "name"),
            Comparison::Eq,
            "Bob".into(),
        ));
        assert_eq!(arena.render(id, &vars), "(n.name = \"Bob\")");
    }

    #[test]
    fn test_regex_forces_match_operator() {
        let (vars, n) = setup();
        let mut arena = ExprArena::default();
        let id = arena.push(BoolExpr::compare(
            prop(n, "name"),
            Comparison::Eq,
            Operand::regex("bo.*"),
        ));
        assert_eq!(arena.render(id, &vars), "(n.name =~ /bo.*/)");
    }

    #[test]
    fn test_nested_and_or() {
        let (vars, n) = setup();
        let mut arena = ExprArena::default();
        let a = arena.push(BoolExpr::compare(prop(n, "a"), Comparison::Lt, 1.into()));
        let b = arena.push(BoolExpr::compare(prop(n, "b"), Comparison::Gt, 2.into()));
        let c = arena.push(BoolExpr::compare(
            prop(n, "c"),
            Comparison::Eq,
            json!(null).into(),
        ));
        let and = arena.push(BoolExpr::new(a.into(), Operator::And, b.into()));
        let or = arena.push(BoolExpr::new(c.into(), Operator::Or, and.into()));

        assert_eq!(
            arena.render(or, &vars),
            "((n.c = null) or ((n.a < 1) and (n.b > 2)))"
        );
    }

    #[test]
    fn test_negate_leaves_original_untouched() {
        let (vars, n) = setup();
        let mut arena = ExprArena::default();
        let a = arena.push(BoolExpr::compare(prop(n, "a"), Comparison::Le, 5.into()));
        let negated = arena.get(a).unwrap().negate();
        let not_a = arena.push(negated);

        assert_eq!(arena.render(a, &vars), "(n.a <= 5)");
        assert_eq!(arena.render(not_a, &vars), "not (n.a <= 5)");
    }

    #[test]
    fn test_node_from_other_arena_rejected() {
        let (_, n) = setup();
        let mut mine = ExprArena::new(ContextId::next());
        let mut theirs = ExprArena::new(ContextId::next());
        mine.push(BoolExpr::compare(prop(n, "a"), Comparison::Eq, 1.into()));
        let foreign = theirs.push(BoolExpr::compare(prop(n, "b"), Comparison::Eq, 2.into()));

        assert_eq!(foreign.0, 0);
        assert!(matches!(
            mine.get(foreign),
            Err(CypherError::UnknownHandle { .. })
        ));
    }

    #[test]
    fn test_operator_symbols() {
        assert_eq!(Operator::Compare(Comparison::Ne).symbol(), "<>");
        assert_eq!(Operator::Compare(Comparison::Ge).symbol(), ">=");
        assert_eq!(Operator::And.symbol(), "and");
    }
}
