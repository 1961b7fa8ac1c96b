//! Quiz Parser — the trust boundary for Gemini output.
//!
//! Text from the gateway is untrusted. It is parsed strictly into `Quiz` and then
//! checked for the shape the prompt asked for. Anything else is `MalformedQuiz`;
//! a partially-built quiz never escapes this module.

use std::collections::HashSet;

use crate::quiz::models::Quiz;
use crate::quiz::prompts::OPTIONS_PER_QUESTION;
use crate::quiz::QuizError;

/// Parses raw gateway text into a validated `Quiz`.
pub fn parse_quiz(raw_text: &str) -> Result<Quiz, QuizError> {
    let text = strip_json_fences(raw_text);

    let quiz: Quiz = serde_json::from_str(text)
        .map_err(|e| QuizError::MalformedQuiz(format!("not a quiz document: {e}")))?;

    validate_quiz(&quiz)?;
    Ok(quiz)
}

/// Post-parse checks: at least one question, exactly four distinct options each,
/// and the correct answer among them.
pub fn validate_quiz(quiz: &Quiz) -> Result<(), QuizError> {
    if quiz.questions.is_empty() {
        return Err(QuizError::MalformedQuiz(
            "quiz contains no questions".to_string(),
        ));
    }

    for (i, question) in quiz.questions.iter().enumerate() {
        if question.options.len() != OPTIONS_PER_QUESTION {
            return Err(QuizError::MalformedQuiz(format!(
                "question {i} has {} options, expected {OPTIONS_PER_QUESTION}",
                question.options.len()
            )));
        }

        let distinct: HashSet<&str> = question.options.iter().map(String::as_str).collect();
        if distinct.len() != question.options.len() {
            return Err(QuizError::MalformedQuiz(format!(
                "question {i} has duplicate options"
            )));
        }

        if !distinct.contains(question.correct_answer.as_str()) {
            return Err(QuizError::MalformedQuiz(format!(
                "question {i} correct answer {:?} is not one of its options",
                question.correct_answer
            )));
        }
    }

    Ok(())
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}
