use std::sync::Arc;

use async_trait::async_trait;
use chat_session::{Answerer, SessionRegistry};
use contextor::{EngineSettings, Orchestrator};

/// Read-only engine status shown in the sidebar.
#[async_trait]
pub trait StatusSource: Send + Sync {
    async fn index_ready(&self) -> bool;
    async fn last_index_error(&self) -> Option<String>;
    fn settings(&self) -> EngineSettings;
}

#[async_trait]
impl StatusSource for Orchestrator {
    async fn index_ready(&self) -> bool {
        Orchestrator::index_ready(self).await
    }

    async fn last_index_error(&self) -> Option<String> {
        Orchestrator::last_index_error(self).await
    }

    fn settings(&self) -> EngineSettings {
        Orchestrator::settings(self).clone()
    }
}

/// Shared state for all HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    /// Answers questions; the orchestrator in production.
    pub answerer: Arc<dyn Answerer>,
    pub status: Arc<dyn StatusSource>,
    pub sessions: Arc<SessionRegistry>,
}

impl AppState {
    /// State backed by one orchestrator, which both answers and reports status.
    pub fn from_orchestrator(orchestrator: Orchestrator) -> Self {
        let orchestrator = Arc::new(orchestrator);
        Self {
            answerer: orchestrator.clone(),
            status: orchestrator,
            sessions: Arc::new(SessionRegistry::new()),
        }
    }

    pub fn new(answerer: Arc<dyn Answerer>, status: Arc<dyn StatusSource>) -> Self {
        Self {
            answerer,
            status,
            sessions: Arc::new(SessionRegistry::new()),
        }
    }
}
