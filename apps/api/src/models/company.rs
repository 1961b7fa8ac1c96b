use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A company posting recorded by a placement coordinator.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CompanyRow {
    pub id: Uuid,
    pub name: String,
    /// Location the company is based in.
    pub base: String,
    /// Minimum CGPA required to apply.
    pub cgpa: f64,
    pub role: String,
    pub created_at: DateTime<Utc>,
}
