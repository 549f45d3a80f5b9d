//! End-to-end scenarios for the clause builder.

use crucible_cypher::{
    BuildOptions, ClauseArg, ClauseKind, CypherError, Query, QueryConfig, UnionOptions,
};
use insta::assert_snapshot;
use serde_json::json;
use test_case::test_case;

// ============================================================================
// Reference scenarios
// ============================================================================

#[test]
fn test_match_label_filter_property() {
    let q = Query::new()
        .match_(json!({"n": "Person"}))
        .unwrap()
        .where_(json!({"n": {"age": 30}}))
        .unwrap();

    assert_eq!(q.to_cypher(), "MATCH (n:Person) WHERE n.age = 30");
}

#[test]
fn test_break_renders_independent_partitions() {
    let q = Query::new()
        .match_(json!({"q": "Person"}))
        .unwrap()
        .match_("r:Car")
        .unwrap()
        .break_()
        .match_("(p: Person)-->q")
        .unwrap();

    assert_eq!(
        q.to_cypher(),
        "MATCH (q:Person), r:Car MATCH (p: Person)-->q"
    );
}

#[test]
fn test_union_of_two_builders() {
    let people = Query::new().match_(json!({"n": "Person"})).unwrap();
    let young = Query::new()
        .match_(json!({"o": "Person"}))
        .unwrap()
        .where_(json!({"o": {"age": 10}}))
        .unwrap();

    assert_eq!(
        people.union(&young, UnionOptions::default()),
        "MATCH (n:Person) UNION MATCH (o:Person) WHERE o.age = 10"
    );
    assert_eq!(
        people.union(&young, UnionOptions { all: true }),
        "MATCH (n:Person) UNION ALL MATCH (o:Person) WHERE o.age = 10"
    );
}

// ============================================================================
// Full precedence list
// ============================================================================

#[test]
fn test_every_kind_in_precedence_order() {
    let q = Query::new()
        .skip(5u64)
        .unwrap()
        .limit(10u64)
        .unwrap()
        .order(json!({"n": {"name": "desc"}}))
        .unwrap()
        .return_(json!({"n": null}))
        .unwrap()
        .delete(json!({"old": null}))
        .unwrap()
        .unwind(json!({"tag": ["a", "b"]}))
        .unwrap()
        .remove(json!({"n": "tmp"}))
        .unwrap()
        .set(json!({"n": {"seen": true}}))
        .unwrap()
        .where_(json!({"n": {"age": [30, 40]}}))
        .unwrap()
        .using(json!({"n": "Person(name)"}))
        .unwrap()
        .optional_match("(n)-[:OWNS]->(c)")
        .unwrap()
        .match_(json!({"n": "Person"}))
        .unwrap()
        .start(json!({"old": 12}))
        .unwrap()
        .merge(json!({"t": {"name": "x"}}))
        .unwrap()
        .create_unique("(n)-[:TAGGED]->(t)")
        .unwrap()
        .create(json!({"m": ["Marker", "Temp"]}))
        .unwrap();

    assert_snapshot!(
        q.to_cypher(),
        @r#"CREATE (m:Marker:Temp) CREATE UNIQUE (n)-[:TAGGED]->(t) MERGE (t {name: "x"}) START old = node(12) MATCH (n:Person) OPTIONAL MATCH (n)-[:OWNS]->(c) USING INDEX n:Person(name) WHERE n.age IN [30, 40] SET n.seen = true REMOVE n.tmp UNWIND ["a", "b"] AS tag DELETE old RETURN n ORDER BY n.name DESC LIMIT 10 SKIP 5"#
    );
}

#[test]
fn test_with_pipelines_partitions() {
    let q = Query::new()
        .match_("(n:Person)-[:KNOWS]->(f)")
        .unwrap()
        .return_(json!({"f": "name"}))
        .unwrap()
        .with("n, count(f) AS friends")
        .unwrap()
        .where_("friends > 3")
        .unwrap()
        .return_(json!({"n": "name"}))
        .unwrap();

    assert_snapshot!(
        q.to_cypher(),
        @"MATCH (n:Person)-[:KNOWS]->(f) RETURN f.name WITH n, count(f) AS friends WHERE friends > 3 RETURN n.name"
    );
}

#[test]
fn test_merge_and_unwind_repeat_keywords() {
    let q = Query::new()
        .unwind(json!({"x": [1, 2]}))
        .unwrap()
        .unwind(json!({"y": [3]}))
        .unwrap()
        .merge(json!({"a": "A"}))
        .unwrap()
        .merge(json!({"b": "B"}))
        .unwrap();

    assert_eq!(
        q.to_cypher(),
        "MERGE (a:A) MERGE (b:B) UNWIND [1, 2] AS x UNWIND [3] AS y"
    );
}

// ============================================================================
// Errors
// ============================================================================

#[test_case(ClauseKind::Match, json!(42) ; "match with number")]
#[test_case(ClauseKind::Start, json!({"n": "x", "m": true}) ; "start with boolean")]
#[test_case(ClauseKind::Limit, json!({"n": 1}) ; "limit with map")]
#[test_case(ClauseKind::Return, json!({"n": 1}) ; "return with number")]
#[test_case(ClauseKind::Using, json!({"n": null}) ; "using with null")]
fn test_unsupported_argument_fails_fast(kind: ClauseKind, arg: serde_json::Value) {
    let err = Query::new()
        .build_deeper_query(kind, arg, BuildOptions::default())
        .unwrap_err();
    assert!(err.is_misuse());
    assert!(matches!(err, CypherError::UnsupportedArgument { kind: k, .. } if k == kind));
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn test_parser_directive_from_toml() {
    let config = QueryConfig::from_toml_str(r#"parser = "2.3""#).unwrap();
    let q = Query::new()
        .with_config(config)
        .start(json!({"n": [1, 2]}))
        .unwrap()
        .return_(ClauseArg::sym("n"))
        .unwrap();

    assert_eq!(q.to_cypher(), "CYPHER 2.3 START n = node(1, 2) RETURN n");
}

#[test]
fn test_derived_queries_keep_config_and_params() {
    let base = Query::new().with_parser("1.9").param("limit", 3);
    let derived = base
        .match_(ClauseArg::sym("n"))
        .unwrap()
        .limit("$limit")
        .unwrap();

    assert_eq!(derived.to_cypher(), "CYPHER 1.9 MATCH (n) LIMIT $limit");
    assert_eq!(derived.parameters()["limit"], json!(3));
    assert_eq!(base.to_cypher(), "");
}
