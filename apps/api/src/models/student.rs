use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StudentProfileRow {
    pub id: Uuid,
    pub username: String,
    pub name: Option<String>,
    pub course: Option<String>,
    pub year: Option<i32>,
    pub cgpa: Option<f64>,
    pub backlog: Option<i32>,
    /// Link to the student's resume.
    pub resume: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
