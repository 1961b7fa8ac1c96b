use std::sync::Arc;

use sqlx::PgPool;

use crate::llm_client::AiGateway;
use crate::quiz::store::QuizStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Gemini in production, a scripted gateway in tests.
    pub gateway: Arc<dyn AiGateway>,
    /// Active quiz per session. Redis-backed when `REDIS_URL` is set.
    pub quiz_store: Arc<dyn QuizStore>,
    /// Lifetime of the session cookie and of the quiz stored for it.
    pub session_ttl_secs: u64,
}
