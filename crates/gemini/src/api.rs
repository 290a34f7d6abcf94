//! REST client for the Gemini `generateContent` endpoint.
//!
//! Wraps a single model behind [`reqwest`] and implements
//! [`GenerationService`] so the orchestrator can ask it for scripts.

use async_trait::async_trait;
use organizer_core::generation::{GenerationRequest, GenerationService, GenerationServiceError};
use organizer_core::prompt::{build_prompt, SYSTEM_INSTRUCTION};

use crate::wire::{strip_code_fence, GenerateContentRequest, GenerateContentResponse};

/// Default public API host.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Header carrying the API key.
const API_KEY_HEADER: &str = "x-goog-api-key";

/// HTTP client for one Gemini model.
pub struct GeminiClient {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
}

/// Errors from the Gemini REST API layer.
#[derive(Debug, thiserror::Error)]
pub enum GeminiApiError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Gemini returned a non-2xx status code.
    #[error("Gemini API error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// A 2xx response without any candidate text (blocked prompt, empty
    /// completion, ...).
    #[error("Gemini returned no text (finish reason: {finish_reason})")]
    EmptyResponse { finish_reason: String },
}

impl From<GeminiApiError> for GenerationServiceError {
    fn from(err: GeminiApiError) -> Self {
        match err {
            // A body that fails to decode surfaces as a reqwest decode error.
            GeminiApiError::Request(e) if e.is_decode() => Self::Malformed(e.to_string()),
            GeminiApiError::Request(e) => Self::Request(e.to_string()),
            GeminiApiError::ApiError { status, body } => Self::Api { status, body },
            e @ GeminiApiError::EmptyResponse { .. } => Self::Malformed(e.to_string()),
        }
    }
}

impl GeminiClient {
    /// Create a client for `model` at `base_url`, e.g.
    /// `https://generativelanguage.googleapis.com`.
    pub fn new(base_url: String, model: String, api_key: String) -> Self {
        Self::with_client(reqwest::Client::new(), base_url, model, api_key)
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(
        client: reqwest::Client,
        base_url: String,
        model: String,
        api_key: String,
    ) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
            api_key,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Full `generateContent` URL for the configured model.
    pub fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }

    /// Send one prompt and return the text of the first candidate.
    ///
    /// No timeout is applied; the call runs until the transport reports
    /// success or failure.
    pub async fn generate_text(
        &self,
        system_instruction: &str,
        prompt: &str,
    ) -> Result<String, GeminiApiError> {
        let body = GenerateContentRequest::new(system_instruction, prompt);

        tracing::debug!(model = %self.model, prompt_len = prompt.len(), "Calling Gemini");

        let response = self
            .client
            .post(self.endpoint())
            .header(API_KEY_HEADER, &self.api_key)
            .json(&body)
            .send()
            .await?;

        let response = Self::ensure_success(response).await?;
        let parsed = response.json::<GenerateContentResponse>().await?;

        parsed.text().ok_or_else(|| GeminiApiError::EmptyResponse {
            finish_reason: parsed.finish_reason().unwrap_or("none").to_string(),
        })
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or a [`GeminiApiError::ApiError`]
    /// containing the status and body text on failure.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, GeminiApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(GeminiApiError::ApiError {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl GenerationService for GeminiClient {
    async fn generate_script(
        &self,
        request: &GenerationRequest,
    ) -> Result<String, GenerationServiceError> {
        let prompt = build_prompt(request);
        let text = self.generate_text(SYSTEM_INSTRUCTION, &prompt).await?;
        Ok(strip_code_fence(&text).to_string())
    }
}
