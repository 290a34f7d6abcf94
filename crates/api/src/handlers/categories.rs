//! Handlers for category rule management.
//!
//! Categories live only in the in-memory session. Adding normalizes the raw
//! form input; removing is idempotent.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// API request types
// ---------------------------------------------------------------------------

/// Extensions as typed into the form (`"jpg, png"`) or as a JSON list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RawExtensions {
    Text(String),
    List(Vec<String>),
}

impl RawExtensions {
    /// Comma-joined form accepted by the normalizer.
    pub fn to_raw(&self) -> String {
        match self {
            RawExtensions::Text(text) => text.clone(),
            RawExtensions::List(items) => items.join(","),
        }
    }
}

/// Request body for adding a category.
#[derive(Debug, Deserialize)]
pub struct CreateCategoryRequest {
    pub name: String,
    pub extensions: RawExtensions,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/categories
///
/// List the current categories in insertion order.
pub async fn list_categories(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let session = state.session.lock().await;

    Ok(Json(DataResponse {
        data: session.rules().clone(),
    }))
}

/// POST /api/v1/categories
///
/// Normalize and append a category. Empty names or extension lists are
/// rejected with 400, duplicate names (case-insensitive) with 409.
pub async fn create_category(
    State(state): State<AppState>,
    Json(input): Json<CreateCategoryRequest>,
) -> AppResult<impl IntoResponse> {
    let raw_extensions = input.extensions.to_raw();
    let mut session = state.session.lock().await;

    let rule = session
        .add_category(&input.name, &raw_extensions)
        .inspect_err(|e| tracing::debug!(name = %input.name, error = %e, "Category rejected"))?;

    tracing::info!(
        name = %rule.name(),
        extensions = ?rule.extensions(),
        total = session.rules().len(),
        "Category added",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: rule })))
}

/// DELETE /api/v1/categories/{name}
///
/// Remove the category with exactly this name. Removing an unknown name
/// is a no-op and still answers 204.
pub async fn delete_category(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<impl IntoResponse> {
    let removed = state.session.lock().await.remove_category(&name);

    tracing::info!(name = %name, removed, "Category delete requested");

    Ok(StatusCode::NO_CONTENT)
}
