use crate::graph::model::{common_ids, unique_ids, Edge, Node, SocialNetwork};

// ========== unique_ids ==========

/// Dedup keeps the first occurrence of each id, in first-seen order.
#[test]
fn test_unique_ids_first_seen_order() {
    assert_eq!(unique_ids(&[3, 1, 3, 2, 1, 3]), vec![3, 1, 2]);
}

/// Applying the dedup twice equals applying it once.
#[test]
fn test_unique_ids_idempotent() {
    let once = unique_ids(&[5, 4, 5, 4, 6]);
    let twice = unique_ids(&once);
    assert_eq!(once, twice);
}

#[test]
fn test_unique_ids_empty() {
    assert!(unique_ids(&[]).is_empty());
}

// ========== common_ids ==========

/// Intersection keeps the left operand's order.
#[test]
fn test_common_ids_preserves_left_order() {
    assert_eq!(common_ids(&[4, 2, 7, 1], &[1, 7, 9]), vec![7, 1]);
}

#[test]
fn test_common_ids_disjoint_sets() {
    assert!(common_ids(&[1, 2], &[3, 4]).is_empty());
}

#[test]
fn test_common_ids_with_empty_side() {
    assert!(common_ids(&[], &[1, 2]).is_empty());
    assert!(common_ids(&[1, 2], &[]).is_empty());
}

// ========== serialization ==========

/// Nodes expose only their public id; internal ids never leak.
#[test]
fn test_node_serializes_public_id_only() {
    let node = Node {
        internal_id: 42,
        public_id: "alice".to_string(),
    };
    let json = serde_json::to_value(&node).unwrap();
    assert_eq!(json, serde_json::json!({ "id": "alice" }));
}

/// Edges expose public endpoints and weight.
#[test]
fn test_edge_serializes_public_endpoints() {
    let edge = Edge {
        from_internal_id: 1,
        to_internal_id: 3,
        from: "alice".to_string(),
        to: "carol".to_string(),
        weight: 2,
    };
    let json = serde_json::to_value(&edge).unwrap();
    assert_eq!(
        json,
        serde_json::json!({ "from": "alice", "to": "carol", "weight": 2 })
    );
}

/// The default network is the explicitly empty graph document.
#[test]
fn test_default_network_is_empty_document() {
    let json = serde_json::to_string(&SocialNetwork::default()).unwrap();
    assert_eq!(json, r#"{"nodes":[],"edges":[]}"#);
}
