use crate::api::users::interfaces::UserResponse;
use crate::api::validation::{trim_text, validate_not_blank};
use crate::database::tag::Tag;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// A photo with its owner and tags embedded.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct PhotoResponse {
    pub id: i32,
    pub title: String,
    pub description: String,
    /// Absolute url of the image file.
    pub image: String,
    pub uploaded_at: DateTime<Utc>,
    /// Id of the album the photo belongs to.
    pub album: i32,
    pub owner: UserResponse,
    pub tags: Vec<Tag>,
}

/// An uploaded image file, read fully into memory.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub bytes: Vec<u8>,
}

/// Photo fields sent on create and update, from a multipart form or a JSON body.
/// Unknown fields such as `owner` are ignored.
#[derive(Deserialize, Debug, Default, Clone, Validate, ToSchema)]
pub struct PhotoWrite {
    #[validate(
        length(max = 200, message = "Ensure this field has no more than 200 characters."),
        custom(function = "validate_not_blank")
    )]
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub album: Option<i32>,
    /// Write-only. When present the photo's tags are replaced by these.
    #[serde(default)]
    pub tag_ids: Option<Vec<i32>>,
}

impl PhotoWrite {
    /// The payload with `title` and `description` trimmed.
    #[must_use]
    pub fn trimmed(mut self) -> Self {
        trim_text(&mut self.title);
        trim_text(&mut self.description);
        self
    }
}

/// Multipart body accepted by photo create and update, for the OpenAPI document.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct PhotoUploadForm {
    pub title: String,
    pub description: Option<String>,
    pub album: i32,
    pub tag_ids: Option<Vec<i32>>,
    #[schema(value_type = String, format = Binary)]
    pub image: Vec<u8>,
}

#[derive(Deserialize, Debug, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchByTagsParams {
    /// Tag names; repeat the key to search for several.
    #[serde(default)]
    pub tags: Vec<String>,
}
