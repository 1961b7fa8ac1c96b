//! Quiz Scorer — exact-match comparison of submitted answers against the stored quiz.
//!
//! Comparison is case-sensitive with no trimming. A missing answer is simply wrong.
//! Keys past the last question are ignored. No partial credit, no weighting.

use tracing::info;

use crate::quiz::models::{QuestionResult, Quiz, ScoreResult, SubmittedAnswers};
use crate::quiz::store::QuizStore;
use crate::quiz::QuizError;

pub fn score(quiz: &Quiz, submitted: &SubmittedAnswers) -> ScoreResult {
    let results: Vec<QuestionResult> = quiz
        .questions
        .iter()
        .enumerate()
        .map(|(i, question)| {
            let user_answer = submitted.for_question(i);
            QuestionResult {
                question: question.text.clone(),
                user_answer: user_answer.map(str::to_string),
                correct_answer: question.correct_answer.clone(),
                is_correct: user_answer == Some(question.correct_answer.as_str()),
            }
        })
        .collect();

    ScoreResult {
        correct_count: results.iter().filter(|r| r.is_correct).count(),
        total_questions: quiz.questions.len(),
        results,
    }
}

/// Scores against the session's active quiz. The quiz stays in place afterwards.
pub async fn score_session(
    store: &dyn QuizStore,
    session_id: &str,
    submitted: &SubmittedAnswers,
) -> Result<ScoreResult, QuizError> {
    let quiz = store
        .get(session_id)
        .await?
        .ok_or(QuizError::NoActiveQuiz)?;

    let result = score(&quiz, submitted);
    info!(
        "Scored quiz {:?}: {}/{}",
        quiz.title, result.correct_count, result.total_questions
    );
    Ok(result)
}
