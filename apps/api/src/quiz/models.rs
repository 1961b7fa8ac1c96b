use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A generated quiz. Question order defines display order and answer keys (`q0`, `q1`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quiz {
    pub title: String,
    pub questions: Vec<Question>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    #[serde(rename = "question")]
    pub text: String,
    pub options: Vec<String>,
    pub correct_answer: String,
}

/// Answers keyed by question position. Unanswered questions have no entry.
///
/// Non-string values (`null`, numbers, ...) are dropped on the way in, so the
/// question scores as unanswered instead of failing the whole submission.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "HashMap<String, Value>")]
pub struct SubmittedAnswers(pub HashMap<String, String>);

impl From<HashMap<String, Value>> for SubmittedAnswers {
    fn from(raw: HashMap<String, Value>) -> Self {
        Self(
            raw.into_iter()
                .filter_map(|(key, value)| match value {
                    Value::String(answer) => Some((key, answer)),
                    _ => None,
                })
                .collect(),
        )
    }
}

impl SubmittedAnswers {
    pub fn answer_key(index: usize) -> String {
        format!("q{index}")
    }

    pub fn for_question(&self, index: usize) -> Option<&str> {
        self.0.get(&Self::answer_key(index)).map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for SubmittedAnswers {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResult {
    pub correct_count: usize,
    pub total_questions: usize,
    pub results: Vec<QuestionResult>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionResult {
    pub question: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_answer: Option<String>,
    pub correct_answer: String,
    pub is_correct: bool,
}

/// What the browser sees of a quiz: the correct answers stay on the server.
#[derive(Debug, Clone, Serialize)]
pub struct QuizView {
    pub title: String,
    pub questions: Vec<QuestionView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuestionView {
    pub key: String,
    pub question: String,
    pub options: Vec<String>,
}

impl From<&Quiz> for QuizView {
    fn from(quiz: &Quiz) -> Self {
        Self {
            title: quiz.title.clone(),
            questions: quiz
                .questions
                .iter()
                .enumerate()
                .map(|(i, q)| QuestionView {
                    key: SubmittedAnswers::answer_key(i),
                    question: q.text.clone(),
                    options: q.options.clone(),
                })
                .collect(),
        }
    }
}
