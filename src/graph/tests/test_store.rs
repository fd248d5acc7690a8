use crate::db::schema::create_schema;
use crate::graph::store::SocialGraph;
use rusqlite::Connection;
use std::collections::HashSet;

/// Graph with alice–carol (weight 2) and bob–dave (weight 1).
fn seeded_graph() -> SocialGraph {
    let conn = Connection::open_in_memory().unwrap();
    create_schema(&conn).unwrap();
    conn.execute_batch(
        r#"
INSERT INTO NODES (ID, PERSON_ID) VALUES (1, 'alice'), (2, 'bob'), (3, 'carol'), (4, 'dave');
INSERT INTO EDGES ("FROM", "TO", WEIGHT) VALUES (1, 3, 2), (2, 4, 1);
"#,
    )
    .unwrap();
    SocialGraph::from_connection(conn)
}

// ========== lookup_node ==========

#[test]
fn test_lookup_node_found() {
    let graph = seeded_graph();
    assert_eq!(graph.lookup_node("alice").unwrap(), Some(1));
    assert_eq!(graph.lookup_node("dave").unwrap(), Some(4));
}

#[test]
fn test_lookup_node_not_found() {
    let graph = seeded_graph();
    assert_eq!(graph.lookup_node("nobody").unwrap(), None);
}

// ========== neighbors ==========

/// The edge relation is stored directionally but queried symmetrically:
/// both endpoints see each other.
#[test]
fn test_neighbors_union_of_both_directions() {
    let graph = seeded_graph();
    assert_eq!(graph.neighbors(1).unwrap(), vec![3]);
    assert_eq!(graph.neighbors(3).unwrap(), vec![1]);
}

#[test]
fn test_neighbors_of_isolated_id() {
    let graph = seeded_graph();
    assert!(graph.neighbors(99).unwrap().is_empty());
}

// ========== resolve_public_ids ==========

/// One bulk call maps every requested internal id that exists.
#[test]
fn test_resolve_public_ids_bulk() {
    let graph = seeded_graph();
    let map = graph.resolve_public_ids(&[1, 3, 4]).unwrap();

    assert_eq!(map.len(), 3);
    assert_eq!(map[&1], "alice");
    assert_eq!(map[&3], "carol");
    assert_eq!(map[&4], "dave");
}

#[test]
fn test_resolve_public_ids_skips_unknown() {
    let graph = seeded_graph();
    let map = graph.resolve_public_ids(&[2, 99]).unwrap();

    assert_eq!(map.len(), 1);
    assert_eq!(map[&2], "bob");
}

#[test]
fn test_resolve_public_ids_empty_set() {
    let graph = seeded_graph();
    assert!(graph.resolve_public_ids(&[]).unwrap().is_empty());
}

// ========== edges_induced ==========

/// Only edges with both endpoints inside the set are returned.
#[test]
fn test_edges_induced_requires_both_endpoints() {
    let graph = seeded_graph();

    let edges: HashSet<_> = graph
        .edges_induced(&[1, 2, 3, 4])
        .unwrap()
        .into_iter()
        .collect();
    assert_eq!(edges, HashSet::from([(1, 3, 2), (2, 4, 1)]));

    // alice without carol: the alice–carol edge has one endpoint outside
    let partial = graph.edges_induced(&[1, 2, 4]).unwrap();
    assert_eq!(partial, vec![(2, 4, 1)]);
}

#[test]
fn test_edges_induced_empty_set() {
    let graph = seeded_graph();
    assert!(graph.edges_induced(&[]).unwrap().is_empty());
}

/// The id-set construct must take any cardinality, not a bounded list.
#[test]
fn test_edges_induced_large_id_set() {
    let graph = seeded_graph();
    let ids: Vec<i64> = (1..=2000).collect();

    let edges: HashSet<_> = graph.edges_induced(&ids).unwrap().into_iter().collect();
    assert_eq!(edges, HashSet::from([(1, 3, 2), (2, 4, 1)]));
}

// ========== counts ==========

#[test]
fn test_counts() {
    let graph = seeded_graph();
    assert_eq!(graph.node_count().unwrap(), 4);
    assert_eq!(graph.edge_count().unwrap(), 2);
}
