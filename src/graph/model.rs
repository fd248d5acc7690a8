//! Value objects returned by graph queries.
//!
//! These are snapshots: a `Node` or `Edge` handed to a caller carries its
//! own data and no reference back into the store, so callers never observe
//! a partial write. Serialization matches the original response document:
//! nodes expose only their public id, edges their public endpoints and
//! weight.

use serde::Serialize;
use std::collections::HashSet;

/// A person in the graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
    #[serde(skip)]
    pub internal_id: i64,
    #[serde(rename = "id")]
    pub public_id: String,
}

/// A weighted, unordered collaboration between two people.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Edge {
    #[serde(skip)]
    pub from_internal_id: i64,
    #[serde(skip)]
    pub to_internal_id: i64,
    pub from: String,
    pub to: String,
    pub weight: i64,
}

/// The induced subgraph answering one query; rebuilt per request, never
/// persisted. `Default` is the explicitly empty graph document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SocialNetwork {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

/// Deduplicates internal ids, keeping the first occurrence of each and
/// preserving first-seen order. Idempotent.
pub fn unique_ids(ids: &[i64]) -> Vec<i64> {
    let mut seen = HashSet::new();
    ids.iter()
        .copied()
        .filter(|id| seen.insert(*id))
        .collect()
}

/// Ids of `a`, in order, that also occur in `b`.
pub fn common_ids(a: &[i64], b: &[i64]) -> Vec<i64> {
    let b: HashSet<i64> = b.iter().copied().collect();
    a.iter().copied().filter(|id| b.contains(id)).collect()
}
