//! Request handlers, one per upstream endpoint.
//!
//! Required query parameters are checked before any upstream call;
//! upstream or extraction failures map to 500, missing parameters to
//! 400 with the service's Spanish error message.

use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use crate::state::AppState;
use dle_extractor::Result;

/// Query parameters for word-based endpoints (`/search`, `/anagram`).
#[derive(Debug, Deserialize)]
pub struct WordParams {
    pub w: Option<String>,
}

/// Query parameters for `/keys`.
#[derive(Debug, Deserialize)]
pub struct KeyParams {
    pub q: Option<String>,
}

/// Query parameters for `/fetch`.
#[derive(Debug, Deserialize)]
pub struct FetchParams {
    pub id: Option<String>,
    /// Spanish and English spellings are both accepted.
    pub conjugaciones: Option<String>,
    pub conjugations: Option<String>,
}

impl FetchParams {
    /// Whether conjugation extraction was requested.
    fn include_conjugations(&self) -> bool {
        self.conjugaciones.as_deref() == Some("true")
            || self.conjugations.as_deref() == Some("true")
    }
}

/// GET /health
pub async fn health() -> &'static str {
    "OK"
}

/// GET /wotd
pub async fn wotd(State(state): State<AppState>) -> Response {
    respond(state.client.word_of_the_day().await)
}

/// GET /random
pub async fn random(State(state): State<AppState>) -> Response {
    respond(state.client.random_word().await)
}

/// GET /search?w=palabra
pub async fn search(State(state): State<AppState>, Query(params): Query<WordParams>) -> Response {
    let Some(word) = params.w.filter(|w| !w.is_empty()) else {
        return missing_param("w");
    };
    respond(state.client.search(&word).await)
}

/// GET /fetch?id=...&conjugaciones=true
pub async fn fetch(State(state): State<AppState>, Query(params): Query<FetchParams>) -> Response {
    let include_conjugations = params.include_conjugations();
    let Some(id) = params.id.filter(|id| !id.is_empty()) else {
        return missing_param("id");
    };
    respond(state.client.fetch_word(&id, include_conjugations).await)
}

/// GET /keys?q=prefijo
pub async fn keys(State(state): State<AppState>, Query(params): Query<KeyParams>) -> Response {
    let Some(query) = params.q.filter(|q| !q.is_empty()) else {
        return missing_param("q");
    };
    respond(state.client.key_query(&query).await)
}

/// GET /anagram?w=palabra
pub async fn anagram(State(state): State<AppState>, Query(params): Query<WordParams>) -> Response {
    let Some(word) = params.w.filter(|w| !w.is_empty()) else {
        return missing_param("w");
    };
    respond(state.client.anagram(&word).await)
}

/// Map an upstream result to an HTTP response.
///
/// Every success body is JSON by the time it leaves the extractor
/// (articles are serialized, JSONP envelopes stripped).
fn respond(result: Result<String>) -> Response {
    match result {
        Ok(body) => (
            [(header::CONTENT_TYPE, "application/json; charset=utf-8")],
            body,
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "upstream request failed");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

/// 400 response for a missing required query parameter.
fn missing_param(name: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        format!("Falta el parámetro '{name}'"),
    )
        .into_response()
}
