//! Axum router setup for the Etymograph server

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;

use crate::{
    handlers::{get_graph, get_word, health_check, list_words},
    ServerState,
};

/// Create the axum router with all routes
pub fn create_router(state: Arc<ServerState>) -> Router {
    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/words", get(list_words))
        .route("/api/words/:term", get(get_word))
        .route("/api/words/:term/graph", get(get_graph))
        // the site is served from another origin
        .layer(CorsLayer::permissive())
        .with_state(state)
}
