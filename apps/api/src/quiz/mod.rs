// Practice quizzes: prompt → Gemini → parse/validate → session store → score.
// All AI calls go through llm_client::AiGateway.

pub mod generator;
pub mod handlers;
pub mod models;
pub mod parser;
pub mod prompts;
pub mod scorer;
pub mod store;

use thiserror::Error;

use crate::llm_client::GatewayError;
use crate::quiz::store::StoreError;

/// Failures of the quiz flow. Each maps to a distinct response at the request boundary.
#[derive(Debug, Error)]
pub enum QuizError {
    #[error("quiz generation failed: {0}")]
    GenerationTransport(#[from] GatewayError),

    #[error("generated quiz is malformed: {0}")]
    MalformedQuiz(String),

    #[error("no active quiz for this session")]
    NoActiveQuiz,

    #[error("quiz store error: {0}")]
    Store(#[from] StoreError),
}
