//! Quiz Session Store — the one active quiz per session.
//!
//! Every generation takes a ticket from `next_generation()` before calling the
//! gateway. `put` refuses a quiz whose ticket is older than the one already stored,
//! so a slow request cannot clobber a newer quiz for the same session.
//!
//! `AppState` holds an `Arc<dyn QuizStore>`: Redis when `REDIS_URL` is set,
//! in-process memory otherwise.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use redis::AsyncCommands;
use thiserror::Error;
use tokio::sync::RwLock;
use tokio::time::Instant;

use crate::quiz::models::Quiz;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result of a `put`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PutOutcome {
    Stored,
    /// A newer generation is already stored; the quiz was discarded.
    Stale,
}

#[async_trait]
pub trait QuizStore: Send + Sync {
    /// Issues a monotonically increasing generation ticket.
    async fn next_generation(&self) -> Result<u64, StoreError>;

    /// Stores `quiz` for the session unless a newer generation is already there.
    async fn put(
        &self,
        session_id: &str,
        generation: u64,
        quiz: &Quiz,
    ) -> Result<PutOutcome, StoreError>;

    async fn get(&self, session_id: &str) -> Result<Option<Quiz>, StoreError>;
}

// ────────────────────────────────────────────────────────────────────────────
// In-memory store
// ────────────────────────────────────────────────────────────────────────────

struct StoredQuiz {
    generation: u64,
    quiz: Quiz,
    expires_at: Instant,
}

/// Process-local store. Entries expire `ttl` after their last write, matching the
/// session cookie; expired entries read as absent and are pruned on writes.
pub struct InMemoryQuizStore {
    ttl: Duration,
    generation: AtomicU64,
    sessions: RwLock<HashMap<String, StoredQuiz>>,
}

impl InMemoryQuizStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            generation: AtomicU64::new(0),
            sessions: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl QuizStore for InMemoryQuizStore {
    async fn next_generation(&self) -> Result<u64, StoreError> {
        Ok(self.generation.fetch_add(1, Ordering::SeqCst) + 1)
    }

    async fn put(
        &self,
        session_id: &str,
        generation: u64,
        quiz: &Quiz,
    ) -> Result<PutOutcome, StoreError> {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;
        sessions.retain(|_, stored| stored.expires_at > now);

        if let Some(current) = sessions.get(session_id) {
            if current.generation > generation {
                return Ok(PutOutcome::Stale);
            }
        }
        sessions.insert(
            session_id.to_string(),
            StoredQuiz {
                generation,
                quiz: quiz.clone(),
                expires_at: now + self.ttl,
            },
        );
        Ok(PutOutcome::Stored)
    }

    async fn get(&self, session_id: &str) -> Result<Option<Quiz>, StoreError> {
        let now = Instant::now();
        let sessions = self.sessions.read().await;
        Ok(sessions
            .get(session_id)
            .filter(|stored| stored.expires_at > now)
            .map(|stored| stored.quiz.clone()))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Redis store
// ────────────────────────────────────────────────────────────────────────────

const GENERATION_KEY: &str = "placement:quiz:generation";

/// Compare-and-set on the session hash; the TTL is refreshed on every write.
const PUT_SCRIPT: &str = r#"
local current = redis.call('HGET', KEYS[1], 'generation')
if current and tonumber(current) > tonumber(ARGV[1]) then
    return 0
end
redis.call('HSET', KEYS[1], 'generation', ARGV[1], 'quiz', ARGV[2])
redis.call('EXPIRE', KEYS[1], ARGV[3])
return 1
"#;

/// Redis-backed store shared by every API process. Keys expire with the session.
pub struct RedisQuizStore {
    client: redis::Client,
    ttl_secs: u64,
    put_script: redis::Script,
}

impl RedisQuizStore {
    pub fn new(client: redis::Client, ttl_secs: u64) -> Self {
        Self {
            client,
            ttl_secs,
            put_script: redis::Script::new(PUT_SCRIPT),
        }
    }

    async fn connection(&self) -> Result<redis::aio::MultiplexedConnection, StoreError> {
        Ok(self.client.get_multiplexed_async_connection().await?)
    }
}

fn session_key(session_id: &str) -> String {
    format!("placement:quiz:session:{session_id}")
}

#[async_trait]
impl QuizStore for RedisQuizStore {
    async fn next_generation(&self) -> Result<u64, StoreError> {
        let mut conn = self.connection().await?;
        let generation: u64 = conn.incr(GENERATION_KEY, 1u64).await?;
        Ok(generation)
    }

    async fn put(
        &self,
        session_id: &str,
        generation: u64,
        quiz: &Quiz,
    ) -> Result<PutOutcome, StoreError> {
        let payload = serde_json::to_string(quiz)?;
        let mut conn = self.connection().await?;
        let stored: i32 = self
            .put_script
            .key(session_key(session_id))
            .arg(generation)
            .arg(payload)
            .arg(self.ttl_secs)
            .invoke_async(&mut conn)
            .await?;

        Ok(if stored == 1 {
            PutOutcome::Stored
        } else {
            PutOutcome::Stale
        })
    }

    async fn get(&self, session_id: &str) -> Result<Option<Quiz>, StoreError> {
        let mut conn = self.connection().await?;
        let payload: Option<String> = conn.hget(session_key(session_id), "quiz").await?;
        payload
            .map(|p| serde_json::from_str(&p).map_err(StoreError::from))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::models::Question;

    const TTL: Duration = Duration::from_secs(60);

    fn quiz(title: &str) -> Quiz {
        Quiz {
            title: title.to_string(),
            questions: vec![Question {
                text: "Q".to_string(),
                options: vec!["a".into(), "b".into(), "c".into(), "d".into()],
                correct_answer: "a".to_string(),
            }],
        }
    }

    #[tokio::test]
    async fn test_get_absent_session_is_none() {
        let store = InMemoryQuizStore::new(TTL);
        assert!(store.get("nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_generations_increase() {
        let store = InMemoryQuizStore::new(TTL);
        let first = store.next_generation().await.unwrap();
        let second = store.next_generation().await.unwrap();
        assert!(second > first);
    }

    #[tokio::test]
    async fn test_newer_generation_overwrites() {
        let store = InMemoryQuizStore::new(TTL);
        let g1 = store.next_generation().await.unwrap();
        let g2 = store.next_generation().await.unwrap();

        assert_eq!(store.put("s", g1, &quiz("old")).await.unwrap(), PutOutcome::Stored);
        assert_eq!(store.put("s", g2, &quiz("new")).await.unwrap(), PutOutcome::Stored);
        assert_eq!(store.get("s").await.unwrap().unwrap().title, "new");
    }

    #[tokio::test]
    async fn test_late_completion_of_older_generation_is_discarded() {
        let store = InMemoryQuizStore::new(TTL);
        let slow = store.next_generation().await.unwrap();
        let fast = store.next_generation().await.unwrap();

        assert_eq!(store.put("s", fast, &quiz("fast")).await.unwrap(), PutOutcome::Stored);
        assert_eq!(store.put("s", slow, &quiz("slow")).await.unwrap(), PutOutcome::Stale);
        assert_eq!(store.get("s").await.unwrap().unwrap().title, "fast");
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let store = InMemoryQuizStore::new(TTL);
        let g1 = store.next_generation().await.unwrap();
        let g2 = store.next_generation().await.unwrap();

        store.put("alice", g2, &quiz("alice quiz")).await.unwrap();
        // An older ticket is still fine for a different session.
        assert_eq!(
            store.put("bob", g1, &quiz("bob quiz")).await.unwrap(),
            PutOutcome::Stored
        );
        assert_eq!(store.get("alice").await.unwrap().unwrap().title, "alice quiz");
        assert_eq!(store.get("bob").await.unwrap().unwrap().title, "bob quiz");
    }

    #[tokio::test(start_paused = true)]
    async fn test_quiz_expires_with_session() {
        let store = InMemoryQuizStore::new(TTL);
        let generation = store.next_generation().await.unwrap();
        store.put("s", generation, &quiz("q")).await.unwrap();

        tokio::time::advance(TTL - Duration::from_secs(1)).await;
        assert!(store.get("s").await.unwrap().is_some());

        tokio::time::advance(Duration::from_secs(2)).await;
        assert!(store.get("s").await.unwrap().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_expired_sessions_pruned_on_write() {
        let store = InMemoryQuizStore::new(TTL);
        let g1 = store.next_generation().await.unwrap();
        store.put("old", g1, &quiz("old")).await.unwrap();

        tokio::time::advance(TTL + Duration::from_secs(1)).await;
        let g2 = store.next_generation().await.unwrap();
        store.put("new", g2, &quiz("new")).await.unwrap();

        let sessions = store.sessions.read().await;
        assert!(!sessions.contains_key("old"));
        assert!(sessions.contains_key("new"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_expired_entry_does_not_block_older_ticket() {
        let store = InMemoryQuizStore::new(TTL);
        let older = store.next_generation().await.unwrap();
        let newer = store.next_generation().await.unwrap();
        store.put("s", newer, &quiz("newer")).await.unwrap();

        tokio::time::advance(TTL + Duration::from_secs(1)).await;
        assert_eq!(
            store.put("s", older, &quiz("older")).await.unwrap(),
            PutOutcome::Stored
        );
    }

    #[test]
    fn test_session_key_is_namespaced() {
        assert_eq!(session_key("abc"), "placement:quiz:session:abc");
    }
}
