//! Handlers for script generation.
//!
//! Only one generation can be pending at a time. The external call runs in
//! its own task so it always completes and records its outcome, even when
//! the HTTP client disconnects first.

use axum::extract::State;
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::IntoResponse;
use axum::Json;
use organizer_core::error::CoreError;
use organizer_core::generation::{GenerationStatus, SCRIPT_FILENAME};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/generate
///
/// Generate a script for the current categories and wait for the result.
/// Answers with the `succeeded` status on success; 400 when there are no
/// categories, 409 while another generation is pending, 502 when the
/// generation service fails.
pub async fn generate_script(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let (generation_id, request) = state.session.lock().await.begin_generation()?;

    tracing::info!(
        generation_id = %generation_id,
        categories = request.categories.len(),
        "Generation started",
    );

    let session = state.session.clone();
    let orchestrator = state.orchestrator.clone();
    let task = tokio::spawn(async move {
        let outcome = orchestrator.generate(&request).await;
        let failure = outcome.as_ref().err().map(ToString::to_string);

        let mut session = session.lock().await;
        session.finish_generation(generation_id, outcome);
        (session.status().clone(), failure)
    });

    let (status, failure) = match task.await {
        Ok(done) => done,
        Err(e) => {
            // The task panicked before recording its outcome.
            state.session.lock().await.finish_generation(
                generation_id,
                Err(CoreError::GenerationFailed(e.to_string())),
            );
            return Err(AppError::InternalError(format!("Generation task failed: {e}")));
        }
    };

    match status {
        GenerationStatus::Succeeded { .. } => {
            tracing::info!(generation_id = %generation_id, "Generation succeeded");
            Ok(Json(DataResponse { data: status }))
        }
        GenerationStatus::Failed { .. } => Err(AppError::Core(CoreError::GenerationFailed(
            failure.unwrap_or_default(),
        ))),
        other => Err(AppError::InternalError(format!(
            "Generation {generation_id} finished in unexpected state {other:?}"
        ))),
    }
}

/// GET /api/v1/generation
///
/// Current generation status: `idle`, `pending`, `succeeded` (with the
/// script) or `failed` (with the user-facing message).
pub async fn get_generation_status(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let session = state.session.lock().await;

    Ok(Json(DataResponse {
        data: session.status().clone(),
    }))
}

/// GET /api/v1/generation/script
///
/// The latest generated script as a downloadable Python file.
pub async fn download_script(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let session = state.session.lock().await;

    let script = session
        .script()
        .ok_or_else(|| CoreError::NotFound {
            entity: "Script",
            name: SCRIPT_FILENAME.to_string(),
        })?
        .to_string();

    Ok((
        [
            (CONTENT_TYPE, "text/x-python; charset=utf-8".to_string()),
            (
                CONTENT_DISPOSITION,
                format!("attachment; filename=\"{SCRIPT_FILENAME}\""),
            ),
        ],
        script,
    ))
}
