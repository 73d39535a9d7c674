//! HTTP endpoint tests driven through the router with `tower::ServiceExt::oneshot`.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum::Router;
use author_metrics::server::transport::create_router;
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::ServiceExt;

const ORIGIN: &str = "http://localhost:5173";

fn app() -> (TempDir, Router) {
    let (dir, store) = common::standard_store();
    (dir, create_router(store, &[ORIGIN.to_string()]))
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn post_empty(uri: &str) -> Request<Body> {
    Request::post(uri).body(Body::empty()).unwrap()
}

// =============================================================================
// Service endpoints
// =============================================================================

#[tokio::test]
async fn test_root_and_health() {
    let (_dir, app) = app();

    let (status, body) = send(app.clone(), Request::get("/").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Author metrics analysis API");

    let (status, body) = send(app, Request::get("/health").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_ready_lists_loaded_years() {
    let (_dir, app) = app();

    let (status, body) = send(app, Request::get("/ready").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["years"], json!([2020, 2021, 2022, 2023]));
    assert_eq!(body["rows"]["2023"], 4);
}

#[tokio::test]
async fn test_cors_allows_configured_origin() {
    let (_dir, app) = app();

    let request = Request::get("/health").header(header::ORIGIN, ORIGIN).body(Body::empty()).unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], ORIGIN);
    assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");

    let request = Request::get("/health")
        .header(header::ORIGIN, "http://evil.example")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert!(response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
}

// =============================================================================
// POST /search_author
// =============================================================================

#[tokio::test]
async fn test_search_exact_returns_profile() {
    let (_dir, app) = app();

    let body = json!({"first_name": "Jane", "last_name": "Doe", "country": "china"});
    let (status, body) = send(app, post_json("/search_author", &body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["type"], "exact");
    assert_eq!(body["author"]["name"], "Jane Doe");
    assert_eq!(body["metrics"]["Papers (1960-2023)"], 50);
    assert_eq!(body["analysis_data"]["np6023"], 50);
}

#[tokio::test]
async fn test_search_ambiguous_and_not_found() {
    let (_dir, app) = app();

    let (status, body) = send(app.clone(), post_json("/search_author", &json!({"last_name": "smith"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["type"], "ambiguous");
    assert_eq!(body["options"].as_array().unwrap().len(), 2);

    let (status, body) = send(app, post_json("/search_author", &json!({"country": "chn"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"type": "not_found"}));
}

// =============================================================================
// POST /analyze_author
// =============================================================================

#[tokio::test]
async fn test_analyze_author_profile() {
    let (_dir, app) = app();

    let (status, body) =
        send(app, post_empty("/analyze_author?first_name=Jane&last_name=Doe&country=cn")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["author"]["cntry"], "chn");
    assert_eq!(body["author"]["institution"], "tsinghua university");
}

#[tokio::test]
async fn test_analyze_author_errors() {
    let (_dir, app) = app();

    let (status, body) =
        send(app.clone(), post_empty("/analyze_author?first_name=Janet&last_name=Doe")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"]["error"], "Author not found");
    assert_eq!(body["detail"]["suggestions"].as_array().unwrap().len(), 2);

    let (status, body) =
        send(app.clone(), post_empty("/analyze_author?first_name=John&last_name=Smith")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"]["year"], 2023);

    let (status, body) = send(app, post_empty("/analyze_author?first_name=&last_name=Smith")).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"]["field"], "first_name");
}

// =============================================================================
// POST /api/generate_analysis
// =============================================================================

#[tokio::test]
async fn test_generate_analysis_json() {
    let (_dir, app) = app();

    let body = json!({"first_name": "Jane", "last_name": "Doe", "cntry": "china", "years": [2020, 2023]});
    let (status, body) = send(app, post_json("/api/generate_analysis", &body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["author"]["inst_name"], "Unknown");
    assert_eq!(body["analysis"]["2020"]["summary"], "No data available for this year.");
    assert_eq!(body["analysis"]["2023"]["average_publications_per_year"], 2.08);
    assert!(body["analysis"].get("2021").is_none());
}

#[tokio::test]
async fn test_generate_analysis_markdown() {
    let (_dir, app) = app();

    let body = json!({"first_name": "Jane", "last_name": "Doe", "cntry": "chn", "response_format": "markdown"});
    let response = app.oneshot(post_json("/api/generate_analysis", &body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers()[header::CONTENT_TYPE].to_str().unwrap().starts_with("text/markdown"));
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(text.starts_with("# Author Impact Analysis: Jane Doe"));
    assert!(text.contains("| 2020 | - | - | - | - | - | - |"));
}

#[tokio::test]
async fn test_generate_analysis_error_statuses() {
    let (_dir, app) = app();

    let cases = [
        (json!({"first_name": "John", "last_name": "Smith", "cntry": "aus"}), StatusCode::BAD_REQUEST, "Multiple matching authors"),
        (json!({"first_name": "Jane", "last_name": "Doe", "cntry": "chn", "years": [2019]}), StatusCode::BAD_REQUEST, "Data unavailable"),
        (json!({"first_name": "Nobody", "last_name": "Here", "cntry": "chn"}), StatusCode::NOT_FOUND, "Author not found"),
        (json!({"first_name": " ", "last_name": "Doe", "cntry": "chn"}), StatusCode::UNPROCESSABLE_ENTITY, "Invalid request"),
    ];

    for (body, expected_status, expected_error) in cases {
        let (status, response) = send(app.clone(), post_json("/api/generate_analysis", &body)).await;
        assert_eq!(status, expected_status, "{body}");
        assert_eq!(response["detail"]["error"], expected_error, "{body}");
    }
}

#[tokio::test]
async fn test_generate_analysis_missing_fields_are_validation_errors() {
    let (_dir, app) = app();

    let (status, body) =
        send(app.clone(), post_json("/api/generate_analysis", &json!({"first_name": "Jane"}))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"]["error"], "Invalid request");
    assert_eq!(body["detail"]["field"], "last_name");

    let body = json!({"first_name": "Jane", "last_name": "Doe"});
    let (status, body) = send(app, post_json("/api/generate_analysis", &body)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"]["field"], "cntry");
}

#[tokio::test]
async fn test_analyze_author_missing_name_is_validation_error() {
    let (_dir, app) = app();

    let (status, body) = send(app.clone(), post_empty("/analyze_author?first_name=Jane")).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"]["error"], "Invalid request");
    assert_eq!(body["detail"]["field"], "last_name");

    let (status, body) = send(app, post_empty("/analyze_author")).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"]["field"], "first_name");
}

#[tokio::test]
async fn test_generate_analysis_ambiguous_year_returns_no_report() {
    let dir = TempDir::new().unwrap();
    common::write_tables(dir.path(), &common::late_namesake_tables());
    let store = std::sync::Arc::new(
        author_metrics::DatasetStore::load(&author_metrics::Config::for_testing(dir.path())).unwrap(),
    );
    let app = create_router(store, &[ORIGIN.to_string()]);

    let body = json!({"first_name": "Ann", "last_name": "Lee", "cntry": "aus"});
    let (status, body) = send(app, post_json("/api/generate_analysis", &body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"]["error"], "Multiple matching authors");
    assert_eq!(body["detail"]["year"], 2023);
    assert_eq!(body["detail"]["suggestions"].as_array().unwrap().len(), 2);
    assert!(body.get("analysis").is_none());
}
