//! Per-process session state: the rule set and the generation status.
//!
//! A [`Session`] has a single owner. Callers that share it across tasks wrap
//! it in a mutex and must not hold the lock while a generation is in flight;
//! [`Session::begin_generation`] and [`Session::finish_generation`] bracket
//! the external call instead.

use chrono::Utc;
use uuid::Uuid;

use crate::error::CoreError;
use crate::generation::{
    GenerationRequest, GenerationStatus, GENERATION_FAILED_MESSAGE, NO_CATEGORIES_MESSAGE,
    SCRIPT_FILENAME,
};
use crate::rules::{normalize_rule, CategoryRule, RuleError, RuleSet};

#[derive(Debug, Clone, Default)]
pub struct Session {
    rules: RuleSet,
    status: GenerationStatus,
}

impl Session {
    pub fn new(rules: RuleSet) -> Self {
        Self {
            rules,
            status: GenerationStatus::Idle,
        }
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn status(&self) -> &GenerationStatus {
        &self.status
    }

    /// The latest successfully generated script.
    pub fn script(&self) -> Option<&str> {
        self.status.script()
    }

    /// Normalize raw input and append the resulting rule.
    pub fn add_category(
        &mut self,
        raw_name: &str,
        raw_extensions: &str,
    ) -> Result<CategoryRule, RuleError> {
        let rule = normalize_rule(&self.rules, raw_name, raw_extensions)?;
        self.rules.add(rule.clone());
        Ok(rule)
    }

    /// Remove a category by exact name. Returns whether anything was removed.
    pub fn remove_category(&mut self, name: &str) -> bool {
        self.rules.remove(name)
    }

    /// Start a generation.
    ///
    /// Clears any previous result, marks the session pending and returns
    /// the generation id with a snapshot of the rules. Fails with
    /// [`CoreError::GenerationInProgress`] while another generation is
    /// pending and with [`CoreError::NoCategories`] when there are no rules;
    /// neither failure changes the status.
    pub fn begin_generation(&mut self) -> Result<(Uuid, GenerationRequest), CoreError> {
        if self.status.is_pending() {
            return Err(CoreError::GenerationInProgress);
        }
        if self.rules.is_empty() {
            return Err(CoreError::NoCategories);
        }

        let id = Uuid::new_v4();
        self.status = GenerationStatus::Pending {
            id,
            started_at: Utc::now(),
        };
        Ok((id, GenerationRequest::from_rules(&self.rules)))
    }

    /// Record the outcome of generation `id`.
    ///
    /// Outcomes for anything other than the currently pending generation
    /// are discarded.
    pub fn finish_generation(&mut self, id: Uuid, outcome: Result<String, CoreError>) {
        if !self.status.is_pending() || self.status.id() != Some(id) {
            tracing::warn!(generation_id = %id, "Discarding outcome of stale generation");
            return;
        }

        let completed_at = Utc::now();
        self.status = match outcome {
            Ok(script) => GenerationStatus::Succeeded {
                id,
                script,
                filename: SCRIPT_FILENAME,
                completed_at,
            },
            Err(e) => {
                let message = match e {
                    CoreError::NoCategories => NO_CATEGORIES_MESSAGE,
                    _ => GENERATION_FAILED_MESSAGE,
                };
                GenerationStatus::Failed {
                    id,
                    message: message.to_string(),
                    completed_at,
                }
            }
        };
    }
}
