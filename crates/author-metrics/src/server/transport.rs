//! HTTP transport.
//!
//! Routes requests to the resolver and aggregator over the shared, read-only
//! dataset snapshot. Handlers do no I/O; every request is an in-memory scan.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::{Value, json};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::analysis;
use crate::dataset::DatasetStore;
use crate::error::{AnalysisError, AnalysisResult};
use crate::formatters;
use crate::models::{AnalyzeQuery, GenerateAnalysisRequest, ResponseFormat, SearchRequest};
use crate::resolver;

/// Shared state for HTTP handlers.
pub struct HttpState {
    pub store: Arc<DatasetStore>,
}

/// Create the HTTP router.
pub fn create_router(store: Arc<DatasetStore>, cors_origins: &[String]) -> Router {
    let state = Arc::new(HttpState { store });

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .route("/search_author", post(search_author))
        .route("/analyze_author", post(analyze_author))
        .route("/api/generate_analysis", post(generate_analysis))
        .layer(cors_layer(cors_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// CORS for the configured front-end origins, with credentials.
///
/// Credentials rule out wildcard methods and headers, so both mirror the request.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
}

impl IntoResponse for AnalysisError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Ambiguous { .. } | Self::DataUnavailable { .. } => StatusCode::BAD_REQUEST,
        };
        tracing::info!(status = status.as_u16(), error = %self, "Request failed");
        (status, Json(json!({ "detail": formatters::error_detail(&self) }))).into_response()
    }
}

async fn root() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "author-metrics",
        "message": "Author metrics analysis API",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "author-metrics",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

async fn readiness_check(State(state): State<Arc<HttpState>>) -> impl IntoResponse {
    let rows: BTreeMap<String, usize> =
        state.store.iter().map(|d| (d.year().to_string(), d.len())).collect();
    Json(json!({
        "status": "ready",
        "service": "author-metrics",
        "version": env!("CARGO_PKG_VERSION"),
        "years": state.store.years(),
        "rows": rows
    }))
}

async fn search_author(
    State(state): State<Arc<HttpState>>,
    Json(request): Json<SearchRequest>,
) -> AnalysisResult<Json<Value>> {
    let outcome = resolver::search_author(&state.store, &request)?;
    Ok(Json(formatters::search_response(&outcome)))
}

async fn analyze_author(
    State(state): State<Arc<HttpState>>,
    Query(query): Query<AnalyzeQuery>,
) -> AnalysisResult<Json<Value>> {
    tracing::info!(
        first_name = %query.first_name,
        last_name = %query.last_name,
        country = ?query.country,
        "analyze_author"
    );
    query.validate()?;

    let record = resolver::find_latest(
        &state.store,
        &query.first_name,
        &query.last_name,
        query.country.as_deref().filter(|c| !c.trim().is_empty()),
    )?;
    Ok(Json(formatters::author_profile(record)))
}

async fn generate_analysis(
    State(state): State<Arc<HttpState>>,
    Json(request): Json<GenerateAnalysisRequest>,
) -> AnalysisResult<Response> {
    let report = analysis::generate_analysis(&state.store, &request)?;

    Ok(match request.response_format {
        ResponseFormat::Json => Json(report).into_response(),
        ResponseFormat::Markdown => (
            [(header::CONTENT_TYPE, "text/markdown; charset=utf-8")],
            formatters::format_report_markdown(&report),
        )
            .into_response(),
    })
}
