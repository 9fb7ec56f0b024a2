use crate::api::photos::interfaces::PhotoResponse;
use crate::api::users::interfaces::UserResponse;
use crate::api::validation::{trim_text, validate_not_blank};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Album fields accepted on create and update. Unknown fields such as `owner` are ignored.
#[derive(Deserialize, Debug, Default, Clone, Validate, ToSchema)]
pub struct AlbumPayload {
    #[validate(
        length(max = 200, message = "Ensure this field has no more than 200 characters."),
        custom(function = "validate_not_blank")
    )]
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl AlbumPayload {
    #[must_use]
    pub fn trimmed(mut self) -> Self {
        trim_text(&mut self.title);
        trim_text(&mut self.description);
        self
    }
}

/// An album with its owner and photos embedded.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct AlbumResponse {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub owner: UserResponse,
    pub photos: Vec<PhotoResponse>,
}
