//! HTTP-level tests for the Folio query service.
//!
//! Requests go through the full router (fallback, panic recovery, tracing,
//! timeout) via `tower::ServiceExt::oneshot`; no socket is opened.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test --package folio-server --test api
//! ```

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use folio_config::{CacheConfig, CacheWindow};
use folio_core::{Catalog, Project};
use folio_server::{app, with_layers, AppState};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tower::ServiceExt;

fn catalog() -> Arc<Catalog> {
    Arc::new(Catalog::from_projects(vec![
        Project::new("Alpha One", ["Rust", "CLI"])
            .with_description("A command line tool")
            .with_links("https://alpha.example.com", "https://github.com/example/alpha"),
        Project::new("Beta", ["React", "Web"]).with_description("A web front end"),
        Project::new("Gamma Ray", ["Rust", "Web"]).with_description("Rendering in the browser"),
        Project::new("Delta", ["Go"]).with_description("Background worker"),
    ]))
}

fn test_app() -> Router {
    app(AppState::new(catalog()))
}

async fn get_path(app: Router, uri: &str) -> Response {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn cache_header(response: &Response) -> &str {
    response
        .headers()
        .get(header::CACHE_CONTROL)
        .unwrap()
        .to_str()
        .unwrap()
}

fn names(body: &Value) -> Vec<String> {
    body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap().to_string())
        .collect()
}

// ============================================================================
// GET /api/projects
// ============================================================================

#[tokio::test]
async fn test_list_defaults() {
    let response = get_path(test_app(), "/api/projects").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        cache_header(&response),
        "public, s-maxage=60, stale-while-revalidate=300"
    );

    let body = json_body(response).await;
    assert_eq!(names(&body), vec!["Alpha One", "Beta", "Gamma Ray", "Delta"]);
    assert_eq!(
        body["meta"],
        json!({
            "page": 1,
            "limit": 6,
            "total": 4,
            "totalPages": 1,
            "hasNextPage": false,
            "hasPrevPage": false
        })
    );
}

#[tokio::test]
async fn test_list_page_two() {
    let response = get_path(test_app(), "/api/projects?page=2&limit=1").await;
    let body = json_body(response).await;

    assert_eq!(names(&body), vec!["Beta"]);
    assert_eq!(body["meta"]["totalPages"], 4);
    assert_eq!(body["meta"]["hasNextPage"], true);
    assert_eq!(body["meta"]["hasPrevPage"], true);
}

#[tokio::test]
async fn test_list_search_and_category() {
    let response = get_path(test_app(), "/api/projects?search=web&category=rust").await;
    let body = json_body(response).await;

    // "web" matches Beta (tag + description) and Gamma Ray (tag); only Gamma Ray is Rust
    assert_eq!(names(&body), vec!["Gamma Ray"]);
    assert_eq!(body["meta"]["total"], 1);
}

#[tokio::test]
async fn test_list_search_is_url_decoded() {
    let response = get_path(test_app(), "/api/projects?search=command%20line").await;
    let body = json_body(response).await;

    assert_eq!(names(&body), vec!["Alpha One"]);
}

#[tokio::test]
async fn test_list_page_past_end_is_empty() {
    let response = get_path(test_app(), "/api/projects?page=9").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["data"], json!([]));
    assert_eq!(body["meta"]["total"], 4);
    assert_eq!(body["meta"]["hasNextPage"], false);
    assert_eq!(body["meta"]["hasPrevPage"], true);
}

#[tokio::test]
async fn test_list_empty_params_use_defaults() {
    let response = get_path(test_app(), "/api/projects?page=&limit=&search=&category=").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["meta"]["page"], 1);
    assert_eq!(body["meta"]["limit"], 6);
}

#[tokio::test]
async fn test_list_invalid_pagination() {
    for uri in [
        "/api/projects?page=0",
        "/api/projects?limit=0",
        "/api/projects?limit=101",
        "/api/projects?page=-2",
        "/api/projects?page=two",
    ] {
        let response = get_path(test_app(), uri).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
        assert!(response.headers().get(header::CACHE_CONTROL).is_none());
        assert_eq!(
            json_body(response).await,
            json!({"error": "Invalid pagination parameters"})
        );
    }
}

#[tokio::test]
async fn test_list_repeated_param_uses_first() {
    let response = get_path(test_app(), "/api/projects?page=2&limit=1&page=1").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(names(&body), vec!["Beta"]);
    assert_eq!(body["meta"]["page"], 2);
}

#[tokio::test]
async fn test_list_is_idempotent() {
    let first = json_body(get_path(test_app(), "/api/projects?search=a&limit=2").await).await;
    let second = json_body(get_path(test_app(), "/api/projects?search=a&limit=2").await).await;
    assert_eq!(first, second);
}

// ============================================================================
// GET /api/projects/categories
// ============================================================================

#[tokio::test]
async fn test_categories() {
    let response = get_path(test_app(), "/api/projects/categories").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        cache_header(&response),
        "public, s-maxage=300, stale-while-revalidate=600"
    );
    assert_eq!(
        json_body(response).await,
        json!({"data": ["CLI", "Go", "React", "Rust", "Web"]})
    );
}

#[tokio::test]
async fn test_categories_empty_catalog() {
    let app = app(AppState::new(Arc::new(Catalog::default())));
    let response = get_path(app, "/api/projects/categories").await;

    assert_eq!(json_body(response).await, json!({"data": []}));
}

// ============================================================================
// GET /api/projects/{slug}
// ============================================================================

#[tokio::test]
async fn test_get_project_by_slug() {
    let response = get_path(test_app(), "/api/projects/alpha-one").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        cache_header(&response),
        "public, s-maxage=3600, stale-while-revalidate=86400"
    );

    let body = json_body(response).await;
    assert_eq!(body["data"]["name"], "Alpha One");
    assert_eq!(body["data"]["category"], json!(["Rust", "CLI"]));
    assert_eq!(body["data"]["github"], "https://github.com/example/alpha");
}

#[tokio::test]
async fn test_get_project_slug_is_case_insensitive() {
    let response = get_path(test_app(), "/api/projects/GAMMA-RAY").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["data"]["name"], "Gamma Ray");
}

#[tokio::test]
async fn test_get_project_not_found() {
    let response = get_path(test_app(), "/api/projects/epsilon").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        json_body(response).await,
        json!({"error": "Project not found"})
    );
}

#[tokio::test]
async fn test_get_project_missing_slug() {
    for uri in ["/api/projects/", "/api/projects/%20"] {
        let response = get_path(test_app(), uri).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(
            json_body(response).await,
            json!({"error": "Project slug is required"})
        );
    }
}

#[tokio::test]
async fn test_get_project_undecodable_slug() {
    let response = get_path(test_app(), "/api/projects/%FF").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/json"
    );
    assert_eq!(
        json_body(response).await,
        json!({"error": "Invalid project slug"})
    );
}

// ============================================================================
// Configuration and Middleware
// ============================================================================

#[tokio::test]
async fn test_custom_cache_windows() {
    let mut state = AppState::new(catalog());
    state.cache = CacheConfig {
        list: CacheWindow::new(5, 10),
        ..CacheConfig::default()
    };

    let response = get_path(app(state), "/api/projects").await;
    assert_eq!(
        cache_header(&response),
        "public, s-maxage=5, stale-while-revalidate=10"
    );
}

#[tokio::test]
async fn test_health() {
    let response = get_path(test_app(), "/health").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_unknown_route_is_json_404() {
    let response = get_path(test_app(), "/api/unknown").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = json_body(response).await;
    assert!(body["error"].as_str().unwrap().contains("/api/unknown"));
}

#[tokio::test]
async fn test_panic_becomes_internal_error() {
    async fn boom() -> &'static str {
        panic!("catalog exploded")
    }

    let router = folio_server::routes::routes().route("/boom", get(boom));
    let app = with_layers(router, AppState::new(catalog()));

    let response = get_path(app, "/boom").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        json_body(response).await,
        json!({"error": "Internal server error"})
    );
}

#[tokio::test]
async fn test_timeout_returns_service_unavailable() {
    let router = folio_server::routes::routes().route(
        "/slow",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            "done"
        }),
    );
    let state = AppState::new(catalog()).with_timeout(Duration::from_millis(50));
    let app = with_layers(router, state);

    let response = get_path(app, "/slow").await;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(
        json_body(response).await,
        json!({"error": "Request timed out"})
    );
}
