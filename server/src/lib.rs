use anyhow::{Context, Result};
use axum::{extract::{Path, Query, State}, http::{HeaderValue, StatusCode}, routing::get, Json, Router};
use search_core::tokenizer::{keyword, load_noise_words};
use search_core::{KeywordIndex, NoiseWords, Occurrence, QueryEngine};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

#[derive(Deserialize)]
pub struct SearchParams {
    pub kw1: String,
    #[serde(default)]
    pub kw2: String,
}

#[derive(Serialize)]
pub struct SearchResponse {
    pub kw1: String,
    pub kw2: String,
    pub took_s: f64,
    pub total_hits: usize,
    pub results: Vec<String>,
}

#[derive(Serialize)]
pub struct KeywordResponse {
    pub keyword: String,
    pub occurrences: Vec<Occurrence>,
}

#[derive(Serialize)]
pub struct StatsResponse {
    pub num_documents: usize,
    pub num_keywords: usize,
}

/// Read-only after startup, so handlers share it without locking.
#[derive(Clone)]
pub struct AppState {
    pub index: Arc<KeywordIndex>,
    pub noise: Arc<NoiseWords>,
}

pub fn build_app(docs_manifest: &str, noise_file: &str) -> Result<Router> {
    // Build the whole index up front; any unreadable input stops startup
    let noise = load_noise_words(noise_file)?;
    let documents = search_core::load_manifest(docs_manifest)?;
    let index = KeywordIndex::build(documents, &noise)
        .with_context(|| format!("building index from {docs_manifest}"))?;
    tracing::info!(num_docs = index.num_documents(), num_keywords = index.num_keywords(), "index ready");
    Ok(build_router(index, noise))
}

pub fn build_router(index: KeywordIndex, noise: NoiseWords) -> Router {
    let state = AppState { index: Arc::new(index), noise: Arc::new(noise) };

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/search", get(search_handler))
        .route("/keyword/:keyword", get(keyword_handler))
        .route("/stats", get(stats_handler))
        .with_state(state)
        .layer(cors_from_env())
        .layer(TraceLayer::new_for_http())
}

/// Origins from `CORS_ALLOW_ORIGIN` (comma separated); any origin when the
/// variable is unset or lists nothing parseable.
fn cors_from_env() -> CorsLayer {
    let origins: Vec<HeaderValue> = std::env::var("CORS_ALLOW_ORIGIN")
        .map(|val| val.split(',').filter_map(|s| s.trim().parse().ok()).collect())
        .unwrap_or_default();
    let allow = if origins.is_empty() { AllowOrigin::any() } else { AllowOrigin::list(origins) };
    CorsLayer::new().allow_origin(allow).allow_methods(Any).allow_headers(Any)
}

pub async fn search_handler(State(state): State<AppState>, Query(params): Query<SearchParams>) -> Json<SearchResponse> {
    let start = std::time::Instant::now();
    let results = QueryEngine::new(&state.index, &state.noise)
        .search(&params.kw1, &params.kw2)
        .unwrap_or_default();
    let elapsed = start.elapsed();
    Json(SearchResponse {
        kw1: params.kw1,
        kw2: params.kw2,
        took_s: elapsed.as_secs_f64(),
        total_hits: results.len(),
        results,
    })
}

pub async fn keyword_handler(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> Result<Json<KeywordResponse>, (StatusCode, Json<serde_json::Value>)> {
    let not_found = || (StatusCode::NOT_FOUND, Json(serde_json::json!({ "error": "keyword not indexed" })));
    let kw = keyword(&raw, &state.noise).ok_or_else(not_found)?;
    let list = state.index.get(&kw).ok_or_else(not_found)?;
    Ok(Json(KeywordResponse { keyword: kw, occurrences: list.as_slice().to_vec() }))
}

pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse { num_documents: state.index.num_documents(), num_keywords: state.index.num_keywords() })
}
