//! HTTP handlers for the query API.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use crate::graph::engine::{expand_neighborhood, QueryError, SetOperator};
use crate::graph::model::SocialNetwork;
use crate::graph::store::SocialGraph;
use crate::utilities::parse_seed_list;

/// Query parameters of `GET /graph`.
#[derive(Deserialize)]
pub struct GraphParams {
    /// Comma-separated public ids of the seed nodes.
    node: Option<String>,
    /// `OR` (default), `AND` or `ONLY`.
    op: Option<String>,
}

/// Handler for neighborhood queries.
///
/// No `node` parameter (or one holding no ids) answers with the explicitly
/// empty graph document. Unknown operators and an `AND` over zero
/// resolvable seeds are client errors; store failures are server errors.
/// Both come back as a structured `{"error": ...}` body, never a silently
/// empty graph.
pub async fn graph_handler(
    State(graph): State<Arc<SocialGraph>>,
    Query(params): Query<GraphParams>,
) -> impl IntoResponse {
    let op_text = params.op.as_deref().unwrap_or("");
    let op = match SetOperator::parse(op_text) {
        Some(op) => op,
        None => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": format!("unknown operator: {}", op_text) })),
            )
                .into_response();
        }
    };

    let seeds = params
        .node
        .as_deref()
        .map(parse_seed_list)
        .unwrap_or_default();
    if seeds.is_empty() {
        return Json(SocialNetwork::default()).into_response();
    }

    match expand_neighborhood(&graph, &seeds, op) {
        Ok(network) => Json(network).into_response(),
        Err(e) => {
            let status = match e {
                QueryError::EmptySeedSet => StatusCode::BAD_REQUEST,
                QueryError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            };
            (status, Json(json!({ "error": e.to_string() }))).into_response()
        }
    }
}

/// Handler for graph size and liveness.
pub async fn status_handler(State(graph): State<Arc<SocialGraph>>) -> impl IntoResponse {
    match graph.node_count().and_then(|nodes| {
        let edges = graph.edge_count()?;
        Ok((nodes, edges))
    }) {
        Ok((nodes, edges)) => Json(json!({
            "status": "healthy",
            "nodes": nodes,
            "edges": edges,
        }))
        .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": e.to_string() })),
        )
            .into_response(),
    }
}
