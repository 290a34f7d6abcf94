//! Generation request, service seam and status.
//!
//! The external text-generation API is reached through the
//! [`GenerationService`] trait so the orchestrator and HTTP layer can be
//! exercised without network access.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::rules::{CategoryRule, RuleSet};

/// All timestamps are UTC.
pub type Timestamp = DateTime<Utc>;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Shown when generation is triggered with no categories.
pub const NO_CATEGORIES_MESSAGE: &str = "Please add at least one category to generate a script.";

/// Shown when the generation service fails for any reason.
pub const GENERATION_FAILED_MESSAGE: &str =
    "Failed to generate script. Please check your API key and try again.";

/// File name the generated script is offered under.
pub const SCRIPT_FILENAME: &str = "organize_files.py";

// ---------------------------------------------------------------------------
// GenerationRequest
// ---------------------------------------------------------------------------

/// Read-only snapshot of the rule set taken when generation starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationRequest {
    pub categories: Vec<CategoryRule>,
}

impl GenerationRequest {
    /// Snapshot `rules` in iteration order.
    pub fn from_rules(rules: &RuleSet) -> Self {
        Self {
            categories: rules.list().to_vec(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

// ---------------------------------------------------------------------------
// GenerationService
// ---------------------------------------------------------------------------

/// Failure reported by a [`GenerationService`].
#[derive(Debug, thiserror::Error)]
pub enum GenerationServiceError {
    /// The request never produced a response (network, DNS, TLS, ...).
    #[error("Request failed: {0}")]
    Request(String),

    /// The service answered with a non-success status.
    #[error("Generation service error ({status}): {body}")]
    Api { status: u16, body: String },

    /// The service answered but the body held no usable script text.
    #[error("Malformed response: {0}")]
    Malformed(String),
}

/// External service that turns category rules into script source text.
#[async_trait]
pub trait GenerationService: Send + Sync {
    /// Produce script text for `request`. Called exactly once per
    /// generation; implementations must not retry on their own.
    async fn generate_script(
        &self,
        request: &GenerationRequest,
    ) -> Result<String, GenerationServiceError>;
}

// ---------------------------------------------------------------------------
// GenerationStatus
// ---------------------------------------------------------------------------

/// Lifecycle of the most recent generation, as rendered by the UI.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GenerationStatus {
    /// Nothing generated yet in this session.
    #[default]
    Idle,
    Pending {
        id: Uuid,
        started_at: Timestamp,
    },
    Succeeded {
        id: Uuid,
        script: String,
        filename: &'static str,
        completed_at: Timestamp,
    },
    Failed {
        id: Uuid,
        message: String,
        completed_at: Timestamp,
    },
}

impl GenerationStatus {
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending { .. })
    }

    /// Id of the generation this status belongs to, if any.
    pub fn id(&self) -> Option<Uuid> {
        match self {
            Self::Idle => None,
            Self::Pending { id, .. } | Self::Succeeded { id, .. } | Self::Failed { id, .. } => {
                Some(*id)
            }
        }
    }

    /// The generated script, when the last generation succeeded.
    pub fn script(&self) -> Option<&str> {
        match self {
            Self::Succeeded { script, .. } => Some(script),
            _ => None,
        }
    }
}
