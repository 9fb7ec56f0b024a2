use crate::api::validation::{validate_optional_email, validate_username};
use crate::database::app_user::User;
use crate::media::MediaStorage;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Public representation of a user. The password hash is never part of it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct UserResponse {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    /// Absolute url of the profile image.
    pub profile_image: Option<String>,
    pub bio: String,
    pub date_joined: DateTime<Utc>,
}

impl UserResponse {
    #[must_use]
    pub fn from_user(user: &User, media: &MediaStorage) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            profile_image: user.profile_image.as_deref().map(|p| media.url_for(p)),
            bio: user.bio.clone(),
            date_joined: user.date_joined,
        }
    }
}

/// Partial profile update. Omitted fields are left unchanged.
#[derive(Deserialize, Debug, Default, Validate, ToSchema)]
pub struct UpdateProfile {
    #[validate(
        length(min = 1, max = 150, message = "Ensure this field has between 1 and 150 characters."),
        custom(function = "validate_username")
    )]
    pub username: Option<String>,
    #[validate(
        length(max = 254, message = "Ensure this field has no more than 254 characters."),
        custom(function = "validate_optional_email")
    )]
    pub email: Option<String>,
    #[validate(length(max = 150, message = "Ensure this field has no more than 150 characters."))]
    pub first_name: Option<String>,
    #[validate(length(max = 150, message = "Ensure this field has no more than 150 characters."))]
    pub last_name: Option<String>,
    #[validate(length(max = 500, message = "Ensure this field has no more than 500 characters."))]
    pub bio: Option<String>,
}
