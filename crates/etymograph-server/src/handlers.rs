//! REST API handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use etymograph_core::{Projection, ViewState, Word, project_with};
use etymograph_fetch::normalize_term;
use serde::Serialize;

use crate::ServerState;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Lookup response: the view, or a miss with suggestions.
#[derive(Debug, Serialize)]
pub struct LookupResponse {
    #[serde(flatten)]
    pub state: ViewState,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct WordListEntry {
    pub word: String,
    pub language: String,
}

fn upstream_error(term: &str, e: impl std::fmt::Display) -> Response {
    tracing::error!("Lookup of '{}' failed: {}", term, e);
    (
        StatusCode::BAD_GATEWAY,
        Json(ErrorResponse {
            error: format!("could not fetch '{}'", term),
        }),
    )
        .into_response()
}

async fn lookup(state: &ServerState, raw: &str) -> Result<Option<Word>, Response> {
    let term = normalize_term(raw);
    if term.is_empty() {
        return Ok(None);
    }
    state
        .fetcher
        .fetch_root(&term)
        .await
        .map_err(|e| upstream_error(&term, e))
}

/// Flattened list, timeline and graph for one word. A miss is a 200 with
/// `"status": "not_found"`.
pub async fn get_word(State(state): State<Arc<ServerState>>, Path(raw): Path<String>) -> Response {
    let record = match lookup(&state, &raw).await {
        Ok(record) => record,
        Err(response) => return response,
    };

    let query = normalize_term(&raw);
    let suggestions = if record.is_none() {
        state.suggestions(&query)
    } else {
        Vec::new()
    };
    let response = LookupResponse {
        state: ViewState::from_lookup(&query, record, &state.layout),
        suggestions,
    };
    Json(response).into_response()
}

/// Just the diagram.
pub async fn get_graph(State(state): State<Arc<ServerState>>, Path(raw): Path<String>) -> Response {
    match lookup(&state, &raw).await {
        Ok(Some(record)) => {
            let projection: Projection = project_with(&record, &state.layout);
            Json(projection).into_response()
        }
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("no record for '{}'", normalize_term(&raw)),
            }),
        )
            .into_response(),
        Err(response) => response,
    }
}

/// Words in the local record tree.
pub async fn list_words(State(state): State<Arc<ServerState>>) -> impl IntoResponse {
    let words: Vec<WordListEntry> = state
        .index
        .as_ref()
        .map(|index| {
            index
                .entries()
                .iter()
                .map(|e| WordListEntry {
                    word: e.word.clone(),
                    language: e.language.clone(),
                })
                .collect()
        })
        .unwrap_or_default();
    Json(words)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    let health = HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };
    Json(health)
}
