use crate::rules::RuleError;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Raw category input failed normalization.
    #[error(transparent)]
    InvalidRule(#[from] RuleError),

    #[error("Entity not found: {entity} '{name}'")]
    NotFound { entity: &'static str, name: String },

    /// Generation was requested with an empty rule set.
    #[error("No categories configured")]
    NoCategories,

    #[error("A script generation is already in progress")]
    GenerationInProgress,

    /// The external generation service failed. Carries the underlying
    /// cause for diagnostics; it is never shown to the user verbatim.
    #[error("Script generation failed: {0}")]
    GenerationFailed(String),
}
