use std::sync::Arc;
use std::time::{Instant, SystemTime};

use tokio::sync::RwLock;

use crate::core::Session;
use crate::services::gemini::GeminiClient;

/// Shared application state. The session is the single mutable value;
/// it is owned here for the lifetime of the process and only touched
/// through its transition methods.
#[derive(Clone)]
pub struct AppState {
    started_at: Instant,
    started_at_system: SystemTime,
    gemini: Arc<GeminiClient>,
    session: Arc<RwLock<Session>>,
}

impl AppState {
    pub fn new(gemini: GeminiClient) -> Self {
        Self {
            started_at: Instant::now(),
            started_at_system: SystemTime::now(),
            gemini: Arc::new(gemini),
            session: Arc::new(RwLock::new(Session::new())),
        }
    }

    pub fn from_env() -> Self {
        Self::new(GeminiClient::from_env())
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }

    pub fn started_at_system(&self) -> SystemTime {
        self.started_at_system
    }

    pub fn gemini(&self) -> Arc<GeminiClient> {
        Arc::clone(&self.gemini)
    }

    pub fn session(&self) -> Arc<RwLock<Session>> {
        Arc::clone(&self.session)
    }
}
