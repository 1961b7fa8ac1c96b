use axum::{
    extract::rejection::{FormRejection, JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::quiz::QuizError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid request body: {message}")]
    InvalidBody { status: StatusCode, message: String },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Quiz(#[from] QuizError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::InvalidBody { status, message } => (*status, "INVALID_BODY", message.clone()),
            AppError::Database(e) => {
                tracing::error!("Database error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "A database error occurred".to_string(),
                )
            }
            AppError::Quiz(QuizError::GenerationTransport(e)) => {
                tracing::error!("Error generating quiz: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "GENERATION_FAILED",
                    "Error generating quiz. Please try again.".to_string(),
                )
            }
            AppError::Quiz(QuizError::MalformedQuiz(reason)) => {
                tracing::error!("Generated quiz rejected: {reason}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "MALFORMED_QUIZ",
                    "The generated quiz could not be used. Please try again.".to_string(),
                )
            }
            AppError::Quiz(QuizError::NoActiveQuiz) => (
                StatusCode::BAD_REQUEST,
                "NO_ACTIVE_QUIZ",
                "Quiz not found in session.".to_string(),
            ),
            AppError::Quiz(QuizError::Store(e)) => {
                tracing::error!("Quiz store error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "STORE_ERROR",
                    "A session storage error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": message,
            "code": code
        }));

        (status, body).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidBody {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<FormRejection> for AppError {
    fn from(rejection: FormRejection) -> Self {
        AppError::InvalidBody {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}
