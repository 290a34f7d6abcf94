pub mod categories;
pub mod generation;
pub mod health;

use std::time::Duration;

use axum::http::StatusCode;
use axum::Router;
use tower_http::timeout::TimeoutLayer;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /categories                     list, add
/// /categories/{name}              remove (idempotent)
///
/// /generation                     current generation status
/// /generation/script              latest script as organize_files.py
///
/// /generate                       run a generation (no request timeout)
/// ```
///
/// `request_timeout` applies to every route except `/generate`, which runs
/// until the generation service answers.
pub fn api_routes(request_timeout: Duration) -> Router<AppState> {
    Router::new()
        // Category rules (in-memory session).
        .nest("/categories", categories::router())
        // Generation status and script download.
        .nest("/generation", generation::status_router())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        // Generation trigger, merged after the timeout layer.
        .merge(generation::trigger_router())
}
