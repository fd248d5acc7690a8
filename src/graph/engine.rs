//! Multi-seed neighborhood expansion.
//!
//! Given the seed public ids from a request and a set operator, computes
//! the induced subgraph to return: resolve the seeds, expand or combine
//! their neighborhoods, deduplicate, then materialize nodes and edges with
//! two bulk store calls.

use crate::graph::model::{common_ids, unique_ids, Edge, Node, SocialNetwork};
use crate::graph::store::SocialGraph;
use thiserror::Error;

/// How the per-seed neighborhoods combine into the result node set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOperator {
    /// `OR`: union of every seed's self-plus-neighbors set.
    Union,
    /// `AND`: intersection of the seeds' self-plus-neighbors sets.
    Intersection,
    /// `ONLY`: exactly the resolved seed set, unexpanded.
    Identity,
}

impl SetOperator {
    /// Parses the request operator. The empty string selects the default
    /// (`OR`); unknown text is `None` and gets rejected by the API layer.
    pub fn parse(op: &str) -> Option<Self> {
        match op {
            "" | "OR" => Some(SetOperator::Union),
            "AND" => Some(SetOperator::Intersection),
            "ONLY" => Some(SetOperator::Identity),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum QueryError {
    /// An intersection over zero resolved seeds is undefined; the request
    /// is invalid rather than an empty result.
    #[error("intersection requires at least one resolvable seed")]
    EmptySeedSet,
    #[error(transparent)]
    Store(#[from] rusqlite::Error),
}

/// Computes the induced subgraph for `seeds` combined under `op`.
///
/// Seed public ids that do not resolve to a node are dropped silently;
/// they are not an error. The result node set is deduplicated by internal
/// id in first-seen order before the bulk id resolution and induced-edge
/// fetch.
pub fn expand_neighborhood(
    graph: &SocialGraph,
    seeds: &[String],
    op: SetOperator,
) -> Result<SocialNetwork, QueryError> {
    let mut resolved = Vec::new();
    for seed in seeds {
        if let Some(id) = graph.lookup_node(seed)? {
            resolved.push(id);
        }
    }

    let expanded = match op {
        SetOperator::Union => {
            let mut ids = Vec::new();
            for &seed in &resolved {
                ids.push(seed);
                ids.extend(graph.neighbors(seed)?);
            }
            ids
        }
        SetOperator::Intersection => {
            let (&first, rest) = resolved.split_first().ok_or(QueryError::EmptySeedSet)?;
            let mut ids = self_and_neighbors(graph, first)?;
            for &seed in rest {
                ids = common_ids(&ids, &self_and_neighbors(graph, seed)?);
            }
            ids
        }
        SetOperator::Identity => resolved,
    };

    let ids = unique_ids(&expanded);
    let public_ids = graph.resolve_public_ids(&ids)?;

    let nodes = ids
        .iter()
        .filter_map(|id| {
            public_ids.get(id).map(|public_id| Node {
                internal_id: *id,
                public_id: public_id.clone(),
            })
        })
        .collect();

    let edges = graph
        .edges_induced(&ids)?
        .into_iter()
        .map(|(from, to, weight)| Edge {
            from_internal_id: from,
            to_internal_id: to,
            from: public_ids.get(&from).cloned().unwrap_or_default(),
            to: public_ids.get(&to).cloned().unwrap_or_default(),
            weight,
        })
        .collect();

    Ok(SocialNetwork { nodes, edges })
}

fn self_and_neighbors(graph: &SocialGraph, seed: i64) -> Result<Vec<i64>, QueryError> {
    let mut ids = graph.neighbors(seed)?;
    ids.push(seed);
    Ok(ids)
}
