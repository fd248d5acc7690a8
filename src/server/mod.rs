//! HTTP query API.
//!
//! One read-only surface over an already-built graph: `/graph` answers
//! neighborhood-expansion queries, `/status` reports graph size. Every
//! response carries permissive CORS headers and a far-future `Expires`
//! (the graph only changes when a build job rewrites the database).

pub mod handler;

use crate::graph::store::SocialGraph;
use crate::logger;
use axum::http::{header, HeaderValue};
use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::set_header::SetResponseHeaderLayer;

/// Far enough out that clients cache responses for the graph's lifetime.
const FAR_FUTURE_EXPIRES: &str = "Thu, 05 Apr 2063 12:00:00 GMT";

/// Builds the application router around an explicitly passed store handle.
pub fn router(graph: Arc<SocialGraph>) -> Router {
    Router::new()
        .route("/graph", get(handler::graph_handler))
        .route("/status", get(handler::status_handler))
        .layer(CorsLayer::permissive())
        .layer(SetResponseHeaderLayer::overriding(
            header::EXPIRES,
            HeaderValue::from_static(FAR_FUTURE_EXPIRES),
        ))
        .with_state(graph)
}

/// HTTP server serving the neighborhood query API.
pub struct HttpServer {
    graph: Arc<SocialGraph>,
    port: u16,
}

impl HttpServer {
    pub fn new(graph: Arc<SocialGraph>, port: u16) -> Self {
        Self { graph, port }
    }

    /// Binds and serves until the process ends.
    pub async fn start(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let app = router(Arc::clone(&self.graph));

        let addr = format!("0.0.0.0:{}", self.port);
        let listener = tokio::net::TcpListener::bind(&addr).await?;

        logger::info(&format!("Query API listening on {}", addr));

        axum::serve(listener, app).await?;

        Ok(())
    }
}
