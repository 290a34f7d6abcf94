#![allow(dead_code)]

use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use organizer_core::generation::GenerationService;
use organizer_core::orchestrator::ScriptOrchestrator;
use organizer_core::rules::RuleSet;
use organizer_core::session::Session;
use organizer_core::testing::MockGenerationService;
use tower::ServiceExt;

use organizer_api::config::{GeminiConfig, ServerConfig};
use organizer_api::router::build_app_router;
use organizer_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: IpAddr::V4(Ipv4Addr::LOCALHOST),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        seed_default_categories: false,
        gemini: GeminiConfig {
            api_key: "test-key".to_string(),
            model: "gemini-test".to_string(),
            base_url: "http://127.0.0.1:9".to_string(),
        },
    }
}

/// Router plus the mock generation service behind it.
pub struct TestApp {
    pub router: Router,
    pub service: Arc<MockGenerationService>,
}

/// Build the full application router with all middleware layers, starting
/// from `rules` and answering generation calls from a mock service.
pub fn build_test_app(rules: RuleSet) -> TestApp {
    let service = Arc::new(MockGenerationService::new());
    let router = build_router_with_service(rules, service.clone());

    TestApp { router, service }
}

/// Build the full application router around an arbitrary generation service.
pub fn build_router_with_service(rules: RuleSet, service: Arc<dyn GenerationService>) -> Router {
    let config = test_config();
    let orchestrator = ScriptOrchestrator::new(service);
    let state = AppState::new(config.clone(), Session::new(rules), orchestrator);
    build_app_router(state, &config).unwrap()
}

/// Test app with an empty rule set.
pub fn empty_app() -> TestApp {
    build_test_app(RuleSet::new())
}

/// Test app seeded with the built-in categories.
pub fn default_app() -> TestApp {
    build_test_app(RuleSet::with_defaults())
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: &Router, uri: &str, body: serde_json::Value) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_empty(app: &Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn delete(app: &Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Collect a response body as UTF-8 text.
pub async fn body_text(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}
