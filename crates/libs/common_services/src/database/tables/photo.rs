use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Represents a single photo in the database.
#[derive(Debug, FromRow, Clone, PartialEq, Eq)]
pub struct Photo {
    pub id: i32,
    pub title: String,
    pub description: String,
    /// Relative path of the image file inside the media folder.
    pub image: String,
    pub uploaded_at: DateTime<Utc>,
    pub album_id: i32,
    pub owner_id: i32,
}

/// Column values for a photo insert.
#[derive(Debug, Clone)]
pub struct NewPhoto {
    pub title: String,
    pub description: String,
    pub image: String,
    pub album_id: i32,
    pub owner_id: i32,
}

/// Column changes for a photo update. `None` leaves the column untouched.
#[derive(Debug, Default, Clone)]
pub struct PhotoChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub album_id: Option<i32>,
}

/// One row of the `photo_tag` join, carrying the tag columns.
#[derive(Debug, FromRow, Clone, PartialEq, Eq)]
pub struct PhotoTagRow {
    pub photo_id: i32,
    pub tag_id: i32,
    pub name: String,
}
