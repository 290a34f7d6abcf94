//! Route definitions for script generation.
//!
//! Two routers are provided:
//! - `status_router()` for read-only routes mounted at `/generation`
//! - `trigger_router()` for the `/generate` trigger

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::generation;
use crate::state::AppState;

/// Read-only generation routes mounted at `/generation`.
///
/// ```text
/// GET    /                  -> get_generation_status
/// GET    /script            -> download_script
/// ```
pub fn status_router() -> Router<AppState> {
    Router::new()
        .route("/", get(generation::get_generation_status))
        .route("/script", get(generation::download_script))
}

/// Generation trigger.
///
/// ```text
/// POST   /generate          -> generate_script
/// ```
pub fn trigger_router() -> Router<AppState> {
    Router::new().route("/generate", post(generation::generate_script))
}
