use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use organizer_core::error::CoreError;
use organizer_core::generation::{GENERATION_FAILED_MESSAGE, NO_CATEGORIES_MESSAGE};
use organizer_core::rules::RuleError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `organizer_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<RuleError> for AppError {
    fn from(err: RuleError) -> Self {
        AppError::Core(CoreError::InvalidRule(err))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::InvalidRule(rule @ RuleError::DuplicateName(_)) => {
                    (StatusCode::CONFLICT, "CONFLICT", rule.to_string())
                }
                CoreError::InvalidRule(rule) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", rule.to_string())
                }
                CoreError::NotFound { entity, name } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} '{name}' not found"),
                ),
                CoreError::NoCategories => (
                    StatusCode::BAD_REQUEST,
                    "NO_CATEGORIES",
                    NO_CATEGORIES_MESSAGE.to_string(),
                ),
                CoreError::GenerationInProgress => (
                    StatusCode::CONFLICT,
                    "GENERATION_IN_PROGRESS",
                    core.to_string(),
                ),
                // The cause is logged where the failure is detected.
                CoreError::GenerationFailed(_) => (
                    StatusCode::BAD_GATEWAY,
                    "GENERATION_FAILED",
                    GENERATION_FAILED_MESSAGE.to_string(),
                ),
            },

            // --- HTTP-specific errors ---
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}
