use crate::api::validation::{trim_text, validate_not_blank};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Deserialize, Debug, Default, Clone, Validate, ToSchema)]
pub struct TagPayload {
    #[validate(
        length(max = 50, message = "Ensure this field has no more than 50 characters."),
        custom(function = "validate_not_blank")
    )]
    #[serde(default)]
    pub name: Option<String>,
}

impl TagPayload {
    /// The payload with its name trimmed.
    #[must_use]
    pub fn trimmed(mut self) -> Self {
        trim_text(&mut self.name);
        self
    }
}
