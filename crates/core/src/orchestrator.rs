//! Script request orchestrator.
//!
//! Turns a rule set into exactly one call to the external
//! [`GenerationService`] and classifies the outcome.

use std::sync::Arc;

use crate::error::CoreError;
use crate::generation::{GenerationRequest, GenerationService};
use crate::rules::RuleSet;

/// Sends generation requests to the configured service.
///
/// Cheap to clone; the service is shared behind an `Arc`.
#[derive(Clone)]
pub struct ScriptOrchestrator {
    service: Arc<dyn GenerationService>,
}

impl ScriptOrchestrator {
    pub fn new(service: Arc<dyn GenerationService>) -> Self {
        Self { service }
    }

    /// Snapshot `rules` and generate a script for it.
    pub async fn generate_for(&self, rules: &RuleSet) -> Result<String, CoreError> {
        self.generate(&GenerationRequest::from_rules(rules)).await
    }

    /// Generate a script for `request`.
    ///
    /// Fails with [`CoreError::NoCategories`] before contacting the service
    /// when the request is empty. Service failures become
    /// [`CoreError::GenerationFailed`] and are not retried. The returned
    /// text is passed through untouched.
    pub async fn generate(&self, request: &GenerationRequest) -> Result<String, CoreError> {
        if request.is_empty() {
            return Err(CoreError::NoCategories);
        }

        tracing::info!(
            categories = request.categories.len(),
            "Requesting script generation"
        );

        match self.service.generate_script(request).await {
            Ok(script) => {
                tracing::info!(script_len = script.len(), "Script generated");
                Ok(script)
            }
            Err(e) => {
                tracing::error!(error = %e, "Script generation failed");
                Err(CoreError::GenerationFailed(e.to_string()))
            }
        }
    }
}
