//! End-to-end scenarios for the chain DSL.

use crucible_cypher::dsl::{
    CypherDsl, Direction, IndexCategory, IndexSchema, Projection, RelSpec, SortOrder, Target,
};
use crucible_cypher::{ClauseKind, CypherError};
use insta::assert_snapshot;
use serde_json::json;
use test_case::test_case;

// ============================================================================
// Reference scenarios
// ============================================================================

#[test]
fn test_start_node_outgoing_hop_return() {
    let mut q = CypherDsl::new();
    let n0 = q.node(3);
    let x = q.var("x").unwrap();
    q.outgoing_to(n0, x).unwrap();
    q.ret(x).unwrap();

    assert_eq!(q.to_cypher().unwrap(), "START n0=node(3) MATCH (n0)-->(x) RETURN x");
}

#[test]
fn test_start_node_outgoing_relationship_return() {
    let mut q = CypherDsl::new();
    let n0 = q.node(3);
    let rel = q.outgoing_to(n0, RelSpec::var("r")).unwrap();
    q.outgoing_to(rel, "x").unwrap();
    let r = q.find("r").unwrap();
    q.ret(r).unwrap();

    assert_eq!(q.to_cypher().unwrap(), "START n0=node(3) MATCH (n0)-[r]->(x) RETURN r");
}

// ============================================================================
// Chains
// ============================================================================

#[test_case(Direction::Outgoing, "MATCH (a)-->(b)" ; "outgoing")]
#[test_case(Direction::Incoming, "MATCH (a)<--(b)" ; "incoming")]
#[test_case(Direction::Both, "MATCH (a)--(b)" ; "both")]
fn test_node_hop_connector(direction: Direction, expected: &str) {
    let mut q = CypherDsl::new();
    match direction {
        Direction::Outgoing => q.outgoing_to("a", "b"),
        Direction::Incoming => q.incoming_from("a", "b"),
        Direction::Both => q.relate_to("a", "b"),
    }
    .unwrap();
    assert_eq!(q.to_cypher().unwrap(), expected);
}

#[test_case(Direction::Outgoing, "MATCH (a)-[:KNOWS]->(b)" ; "outgoing")]
#[test_case(Direction::Incoming, "MATCH (a)<-[:KNOWS]-(b)" ; "incoming")]
#[test_case(Direction::Both, "MATCH (a)-[:KNOWS]-(b)" ; "both")]
fn test_relationship_connector(direction: Direction, expected: &str) {
    let mut q = CypherDsl::new();
    let spec = RelSpec::of_type("KNOWS");
    let rel = match direction {
        Direction::Outgoing => q.outgoing_to("a", spec),
        Direction::Incoming => q.incoming_from("a", spec),
        Direction::Both => q.relate_to("a", spec),
    }
    .unwrap();
    match direction {
        Direction::Outgoing => q.outgoing_to(rel, "b"),
        Direction::Incoming => q.incoming_from(rel, "b"),
        Direction::Both => q.relate_to(rel, "b"),
    }
    .unwrap();
    assert_eq!(q.to_cypher().unwrap(), expected);
}

#[test]
fn test_long_chain_walks_every_segment_once() {
    let mut q = CypherDsl::new();
    let a = q.node(1);
    let s1 = q.outgoing_to(a, RelSpec::of_type("KNOWS").hops(Some(1), Some(3))).unwrap();
    let s2 = q.outgoing_to(s1, "friend").unwrap();
    let s3 = q.incoming_from(s2, RelSpec::raw("w?:WORKS_AT")).unwrap();
    let s4 = q.incoming_from(s3, Target::Anonymous).unwrap();
    q.relate_to(s4, "c").unwrap();
    q.ret("c").unwrap();

    assert_snapshot!(
        q.to_cypher().unwrap(),
        @"START n0=node(1) MATCH (n0)-[:KNOWS*1..3]->(friend)<-[w?:WORKS_AT]-()--(c) RETURN c"
    );
    assert_eq!(q.registry().len(), 3);
}

#[test]
fn test_relationship_spec_from_json() {
    let mut q = CypherDsl::new();
    let spec = RelSpec::try_from(&json!({"var": "r", "types": ["KNOWS", "LIKES"], "min": 2}))
        .unwrap();
    let rel = q.outgoing_to("a", spec).unwrap();
    q.outgoing_to(rel, "b").unwrap();
    assert_eq!(q.to_cypher().unwrap(), "MATCH (a)-[r:KNOWS|LIKES*2..]->(b)");

    let err = RelSpec::try_from(&json!([1, 2])).unwrap_err();
    assert!(matches!(err, CypherError::UnsupportedRelationship { .. }));
}

#[test]
fn test_shortest_path_wraps_chain() {
    let mut q = CypherDsl::new();
    let a = q.node(1);
    let b = q.node(2);
    let rel = q.relate_to(a, RelSpec::any().hops(None, Some(15))).unwrap();
    let tail = q.relate_to(rel, b).unwrap();
    let p = q.shortest_path(tail).unwrap();
    q.ret(p).unwrap();

    assert_snapshot!(
        q.to_cypher().unwrap(),
        @"START n0=node(1),n1=node(2) MATCH p0 = shortestPath((n0)-[*..15]-(n1)) RETURN p0"
    );
}

// ============================================================================
// Filters
// ============================================================================

#[test]
fn test_boolean_tree_is_fully_parenthesized() {
    let mut q = CypherDsl::new();
    let n = q.var("n").unwrap();
    q.outgoing_to(n, "m").unwrap();
    let a = q.prop(n, "a").unwrap();
    let b = q.prop(n, "b").unwrap();
    let lt = q.lt(a, 1).unwrap();
    let gt = q.gt(b, 2).unwrap();
    let both = q.and(lt, gt).unwrap();
    let name = q.prop(n, "name").unwrap();
    let regex = q.matches(name, "(?i)an.*").unwrap();
    let any = q.or(regex, both).unwrap();
    q.not(any).unwrap();
    q.ret(n).unwrap();

    assert_snapshot!(
        q.to_cypher().unwrap(),
        @r#"MATCH (n)-->(m) WHERE not ((n.name =~ /(?i)an.*/) or ((n.a < 1) and (n.b > 2))) RETURN n"#
    );
}

#[test]
fn test_filter_keeps_first_seen_position() {
    let mut q = CypherDsl::new();
    let n = q.node(7);
    let age = q.prop(n, "age").unwrap();
    let first = q.ge(age.clone(), 18).unwrap();
    q.ret(n).unwrap();
    q.outgoing_to(n, "x").unwrap();
    let second = q.le(age, 65).unwrap();
    q.and(first, second).unwrap();

    assert_eq!(
        q.to_cypher().unwrap(),
        "START n0=node(7) WHERE ((n0.age >= 18) and (n0.age <= 65)) RETURN n0 MATCH (n0)-->(x)"
    );
}

// ============================================================================
// Index lookups and projections
// ============================================================================

#[test]
fn test_index_lookup_and_query() {
    let schema: IndexSchema = toml::from_str(
        r#"
type_name = "Person"

[keys]
email = "exact"
"#,
    )
    .unwrap();

    let mut q = CypherDsl::new();
    let by_email = q.lookup(&schema, "email", "ann@example.com").unwrap();
    let by_text = q.query_index(&schema, "name:ann*", IndexCategory::Fulltext);
    q.ret(by_email).unwrap();
    q.ret(by_text).unwrap();

    assert_snapshot!(
        q.to_cypher().unwrap(),
        @r#"START n0=node:Person_exact(email="ann@example.com"),n1=node:Person_fulltext("name:ann*") RETURN n0,n1"#
    );

    assert!(matches!(
        q.lookup(&schema, "age", 40),
        Err(CypherError::NotIndexed { .. })
    ));
}

#[test]
fn test_projections_and_paging() {
    let mut q = CypherDsl::new();
    let n = q.var("n").unwrap();
    let m = q.var("m").unwrap();
    q.outgoing_to(n, m).unwrap();
    q.with(n).unwrap();
    q.with(Projection::Count(Some(m))).unwrap();
    q.raw(ClauseKind::Return, "n, count(m) AS friends");
    let name = q.prop(n, "name").unwrap();
    q.order_by(name, SortOrder::Asc).unwrap();
    q.skip(10);
    q.limit(5);

    assert_snapshot!(
        q.to_cypher().unwrap(),
        @"MATCH (n)-->(m) WITH n,count(m) RETURN n, count(m) AS friends ORDER BY n.name SKIP 10 LIMIT 5"
    );
}

#[test]
fn test_rendering_is_repeatable() {
    let mut q = CypherDsl::new();
    let n = q.node(1);
    q.outgoing_to(n, "x").unwrap();
    q.ret("x").unwrap();
    let first = q.to_cypher().unwrap();
    let second = q.to_cypher().unwrap();
    assert_eq!(first, second);
}
