use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Represents a user in the application.
#[derive(Debug, FromRow, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    /// Relative path of the profile image inside the media folder.
    pub profile_image: Option<String>,
    pub bio: String,
    pub date_joined: DateTime<Utc>,
}

/// Represents a user record from db, including the password hash.
#[derive(Debug, FromRow)]
pub struct UserWithPassword {
    pub id: i32,
    pub username: String,
    pub password: String,
}

/// Fields a user may change on their own profile. `None` leaves the column untouched.
#[derive(Debug, Default, Clone)]
pub struct ProfileChanges {
    pub username: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<String>,
}
