use crate::api::users::interfaces::UserResponse;
use crate::api::validation::{validate_optional_email, validate_username};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Represents the data required to register a new user.
#[derive(Deserialize, Debug, Default, Validate, ToSchema)]
pub struct RegisterUser {
    #[validate(
        length(min = 1, max = 150, message = "Ensure this field has between 1 and 150 characters."),
        custom(function = "validate_username")
    )]
    #[serde(default)]
    pub username: Option<String>,
    #[validate(
        length(max = 254, message = "Ensure this field has no more than 254 characters."),
        custom(function = "validate_optional_email")
    )]
    #[serde(default)]
    pub email: Option<String>,
    #[validate(length(min = 8, message = "Ensure this field has at least 8 characters."))]
    #[serde(default)]
    #[schema(value_type = String, format = "password", example = "my-secret-password")]
    pub password: Option<String>,
    #[validate(length(max = 150, message = "Ensure this field has no more than 150 characters."))]
    #[serde(default)]
    pub first_name: Option<String>,
    #[validate(length(max = 150, message = "Ensure this field has no more than 150 characters."))]
    #[serde(default)]
    pub last_name: Option<String>,
    #[validate(length(max = 500, message = "Ensure this field has no more than 500 characters."))]
    #[serde(default)]
    pub bio: Option<String>,
}

/// Represents the data required to obtain a token pair.
#[derive(Deserialize, Debug, Default, ToSchema)]
pub struct LoginUser {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    #[schema(value_type = String, format = "password", example = "my-secret-password")]
    pub password: Option<String>,
}

/// Represents the payload for a refresh token request.
#[derive(Deserialize, Debug, Default, ToSchema)]
pub struct RefreshTokenPayload {
    #[serde(default)]
    pub refresh: Option<String>,
}

/// Represents a pair of access and refresh tokens.
#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct Tokens {
    pub access: String,
    pub refresh: String,
    /// Expiry of the access token, in unix seconds.
    pub expiry: u64,
}

/// Response to a successful registration.
#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct RegisterResponse {
    pub user: UserResponse,
    #[serde(flatten)]
    pub tokens: Tokens,
}

/// Represents the claims contained within a JWT.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, ToSchema)]
pub struct AuthClaims {
    /// User id.
    pub sub: i32,
    pub exp: i64,
}
