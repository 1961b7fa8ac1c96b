//! Quiz Generation — orchestrates the practice quiz pipeline.
//!
//! Flow: next_generation ticket → build prompt → gateway → parse/validate →
//!       store for the session → return quiz.
//!
//! One gateway call per request, no retries. Transport failures and unusable
//! content surface as different `QuizError` variants.

use tracing::{info, warn};

use crate::llm_client::AiGateway;
use crate::quiz::models::Quiz;
use crate::quiz::parser::parse_quiz;
use crate::quiz::prompts::QUIZ_PROMPT_TEMPLATE;
use crate::quiz::store::{PutOutcome, QuizStore};
use crate::quiz::QuizError;

/// Builds the quiz prompt for a topic. The topic is inserted verbatim.
pub fn build_quiz_prompt(topic: &str) -> String {
    QUIZ_PROMPT_TEMPLATE.replace("{topic}", topic)
}

/// Sends the quiz prompt to the gateway and returns its text unmodified.
pub async fn generate_raw(gateway: &dyn AiGateway, topic: &str) -> Result<String, QuizError> {
    let prompt = build_quiz_prompt(topic);
    Ok(gateway.generate_content(&prompt).await?)
}

/// Runs the full pipeline and makes the result the session's active quiz.
///
/// If a newer generation for the same session finished first, this quiz is
/// discarded and the stored one is returned so the user sees what they will be
/// scored against.
pub async fn generate_quiz(
    gateway: &dyn AiGateway,
    store: &dyn QuizStore,
    session_id: &str,
    topic: &str,
) -> Result<Quiz, QuizError> {
    let generation = store.next_generation().await?;
    info!("Generating quiz on {topic:?} (generation {generation})");

    let raw = generate_raw(gateway, topic).await?;

    let quiz = parse_quiz(&raw).map_err(|e| {
        warn!(
            "Gateway returned unusable quiz for {topic:?}: {e}; starts with {:?}",
            raw.chars().take(80).collect::<String>()
        );
        e
    })?;

    match store.put(session_id, generation, &quiz).await? {
        PutOutcome::Stored => {
            info!(
                "Stored quiz {:?} with {} questions (generation {generation})",
                quiz.title,
                quiz.questions.len()
            );
            Ok(quiz)
        }
        PutOutcome::Stale => {
            warn!("Discarding stale quiz generation {generation}; a newer quiz is active");
            store.get(session_id).await?.ok_or(QuizError::NoActiveQuiz)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::llm_client::GatewayError;
    use crate::quiz::store::InMemoryQuizStore;

    /// Returns a canned reply and records the prompts it was sent.
    struct ScriptedGateway {
        reply: Result<String, u16>,
        prompts: Mutex<Vec<String>>,
    }

    impl ScriptedGateway {
        fn replying(text: &str) -> Self {
            Self {
                reply: Ok(text.to_string()),
                prompts: Mutex::new(Vec::new()),
            }
        }

        fn failing(status: u16) -> Self {
            Self {
                reply: Err(status),
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl AiGateway for ScriptedGateway {
        async fn generate_content(&self, prompt: &str) -> Result<String, GatewayError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(status) => Err(GatewayError::Api {
                    status: *status,
                    message: "unavailable".to_string(),
                }),
            }
        }
    }

    const GEARS_QUIZ: &str = r#"{
        "title": "MCQ Quiz on Gears",
        "questions": [
            {
                "question": "Which gear transmits motion between intersecting shafts?",
                "options": ["Spur", "Bevel", "Worm", "Rack"],
                "correctAnswer": "Bevel"
            }
        ]
    }"#;

    #[test]
    fn test_prompt_embeds_topic_and_shape() {
        let prompt = build_quiz_prompt("Fluid Mechanics");
        assert!(prompt.contains("topic of Fluid Mechanics in the context of Engineering"));
        assert!(prompt.contains("\"title\": \"MCQ Quiz on Fluid Mechanics\""));
        assert!(prompt.contains("10 questions"));
        assert!(prompt.contains("\"correctAnswer\""));
        assert!(!prompt.contains("{topic}"));
    }

    #[tokio::test]
    async fn test_generate_raw_returns_gateway_text_unmodified() {
        let gateway = ScriptedGateway::replying("```json\n{}\n```");
        let raw = generate_raw(&gateway, "Gears").await.unwrap();
        assert_eq!(raw, "```json\n{}\n```");
        assert_eq!(gateway.prompts.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_generate_quiz_stores_for_session() {
        let gateway = ScriptedGateway::replying(GEARS_QUIZ);
        let store = InMemoryQuizStore::new(std::time::Duration::from_secs(60));

        let quiz = generate_quiz(&gateway, &store, "s1", "Gears").await.unwrap();
        assert_eq!(quiz.title, "MCQ Quiz on Gears");
        assert_eq!(store.get("s1").await.unwrap(), Some(quiz));
        assert!(store.get("s2").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_transport_failure_is_not_retried() {
        let gateway = ScriptedGateway::failing(503);
        let store = InMemoryQuizStore::new(std::time::Duration::from_secs(60));

        let err = generate_quiz(&gateway, &store, "s1", "Gears")
            .await
            .unwrap_err();
        assert!(matches!(err, QuizError::GenerationTransport(_)));
        assert_eq!(gateway.prompts.lock().unwrap().len(), 1);
        assert!(store.get("s1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_malformed_content_leaves_previous_quiz() {
        let store = InMemoryQuizStore::new(std::time::Duration::from_secs(60));
        generate_quiz(&ScriptedGateway::replying(GEARS_QUIZ), &store, "s1", "Gears")
            .await
            .unwrap();

        let err = generate_quiz(
            &ScriptedGateway::replying("I cannot help with that."),
            &store,
            "s1",
            "Cams",
        )
        .await
        .unwrap_err();
        assert!(matches!(err, QuizError::MalformedQuiz(_)));
        assert_eq!(
            store.get("s1").await.unwrap().unwrap().title,
            "MCQ Quiz on Gears"
        );
    }

    #[tokio::test]
    async fn test_stale_generation_returns_active_quiz() {
        let store = InMemoryQuizStore::new(std::time::Duration::from_secs(60));
        // Simulate a newer request finishing before this one.
        let newer = store.next_generation().await.unwrap() + 100;
        let mut active: Quiz = serde_json::from_str(GEARS_QUIZ).unwrap();
        active.title = "Newer".to_string();
        store.put("s1", newer, &active).await.unwrap();

        let quiz = generate_quiz(&ScriptedGateway::replying(GEARS_QUIZ), &store, "s1", "Gears")
            .await
            .unwrap();
        assert_eq!(quiz.title, "Newer");
    }
}
