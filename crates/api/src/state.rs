use std::sync::Arc;

use organizer_core::orchestrator::ScriptOrchestrator;
use organizer_core::session::Session;
use tokio::sync::Mutex;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// The single in-memory session: category rules plus generation status.
    /// Never held across the external generation call.
    pub session: Arc<Mutex<Session>>,
    /// Sends rule sets to the generation service.
    pub orchestrator: ScriptOrchestrator,
}

impl AppState {
    pub fn new(config: ServerConfig, session: Session, orchestrator: ScriptOrchestrator) -> Self {
        Self {
            config: Arc::new(config),
            session: Arc::new(Mutex::new(session)),
            orchestrator,
        }
    }
}
