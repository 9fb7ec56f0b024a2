use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Represents a single album in the database.
#[derive(Debug, FromRow, Clone, PartialEq, Eq)]
pub struct Album {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub owner_id: i32,
}
