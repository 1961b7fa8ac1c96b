//! Axum route handlers for practice quizzes.

use axum::{extract::State, response::Html, Form, Json};
use axum_extra::extract::{cookie::CookieJar, WithRejection};
use serde::Deserialize;

use crate::errors::AppError;
use crate::quiz::generator::generate_quiz;
use crate::quiz::models::{QuizView, ScoreResult, SubmittedAnswers};
use crate::quiz::scorer::score_session;
use crate::quiz::QuizError;
use crate::session::{current_session, ensure_session};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct PracticeRequest {
    pub topic: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitQuizRequest {
    #[serde(default)]
    pub user_answers: SubmittedAnswers,
}

const PRACTICE_FORM: &str = r#"<!DOCTYPE html>
<html>
<head><title>Practice Quiz</title></head>
<body>
  <h1>Practice Quiz</h1>
  <form method="post" action="/practice">
    <label for="topic">Topic</label>
    <input id="topic" name="topic" type="text" required>
    <button type="submit">Generate quiz</button>
  </form>
</body>
</html>"#;

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /practice
pub async fn handle_practice_form() -> Html<&'static str> {
    Html(PRACTICE_FORM)
}

/// POST /practice
///
/// Generates a quiz for the topic and makes it the session's active quiz.
/// Correct answers are kept server-side.
pub async fn handle_generate_quiz(
    State(state): State<AppState>,
    jar: CookieJar,
    WithRejection(Form(request), _): WithRejection<Form<PracticeRequest>, AppError>,
) -> Result<(CookieJar, Json<QuizView>), AppError> {
    if request.topic.trim().is_empty() {
        return Err(AppError::Validation("topic cannot be empty".to_string()));
    }

    let (jar, session_id) = ensure_session(jar, state.session_ttl_secs);
    let quiz = generate_quiz(
        state.gateway.as_ref(),
        state.quiz_store.as_ref(),
        &session_id,
        &request.topic,
    )
    .await?;

    Ok((jar, Json(QuizView::from(&quiz))))
}

/// POST /submit-quiz
///
/// Scores `userAnswers` against the session's active quiz.
pub async fn handle_submit_quiz(
    State(state): State<AppState>,
    jar: CookieJar,
    WithRejection(Json(request), _): WithRejection<Json<SubmitQuizRequest>, AppError>,
) -> Result<Json<ScoreResult>, AppError> {
    let session_id = current_session(&jar).ok_or_else(|| {
        tracing::warn!("Quiz submitted without a session");
        QuizError::NoActiveQuiz
    })?;

    let result = score_session(
        state.quiz_store.as_ref(),
        &session_id,
        &request.user_answers,
    )
    .await?;

    Ok(Json(result))
}
