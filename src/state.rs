use crate::config::AppConfig;
use crate::services::ai::LlmProvider;
use crate::services::booking::BookingOperations;
use crate::services::session::{SessionLocks, SessionStore};

pub struct AppState {
    pub config: AppConfig,
    pub llm: Box<dyn LlmProvider>,
    pub bookings: Box<dyn BookingOperations>,
    pub sessions: Box<dyn SessionStore>,
    pub session_locks: SessionLocks,
}
