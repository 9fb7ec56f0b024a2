//! HTTP handlers for registration and token issuance.

use crate::api_state::ApiContext;
use crate::json_body::JsonBody;
use axum::{Json, extract::State, http::StatusCode};
use common_services::api::auth::error::AuthError;
use common_services::api::auth::interfaces::{
    LoginUser, RefreshTokenPayload, RegisterResponse, RegisterUser, Tokens,
};
use common_services::api::auth::service::{obtain_tokens, refresh_tokens, register_user};
use common_services::api::validation::FieldErrors;
use tracing::instrument;

/// Registers a new user and returns them together with a token pair.
///
/// # Errors
///
/// Returns `AuthError::Validation` when a field is invalid or the username is taken.
#[utoipa::path(
    post,
    path = "/users",
    tag = "Auth",
    request_body = RegisterUser,
    responses(
        (status = 201, description = "User created successfully", body = RegisterResponse),
        (status = 400, description = "Invalid fields", body = FieldErrors),
    )
)]
#[instrument(skip(context, payload), err(Debug))]
pub async fn register(
    State(context): State<ApiContext>,
    JsonBody(payload): JsonBody<RegisterUser>,
) -> Result<(StatusCode, Json<RegisterResponse>), AuthError> {
    let response = register_user(&context.pool, &context.settings, &context.media, payload).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Exchanges a username and password for a token pair.
#[utoipa::path(
    post,
    path = "/token",
    tag = "Auth",
    request_body = LoginUser,
    responses(
        (status = 200, description = "Login successful", body = Tokens),
        (status = 400, description = "Missing fields", body = FieldErrors),
        (status = 401, description = "Invalid credentials"),
    )
)]
#[instrument(skip(context, payload), err(Debug))]
pub async fn obtain_token(
    State(context): State<ApiContext>,
    JsonBody(payload): JsonBody<LoginUser>,
) -> Result<Json<Tokens>, AuthError> {
    Ok(Json(
        obtain_tokens(&context.pool, &context.settings, &payload).await?,
    ))
}

/// Rotates a refresh token: the presented token is consumed and a new pair returned.
#[utoipa::path(
    post,
    path = "/token/refresh",
    tag = "Auth",
    request_body = RefreshTokenPayload,
    responses(
        (status = 200, description = "Session refreshed successfully", body = Tokens),
        (status = 401, description = "Invalid or expired refresh token"),
    )
)]
#[instrument(skip(context, payload), err(Debug))]
pub async fn refresh_token(
    State(context): State<ApiContext>,
    JsonBody(payload): JsonBody<RefreshTokenPayload>,
) -> Result<Json<Tokens>, AuthError> {
    Ok(Json(
        refresh_tokens(&context.pool, &context.settings, payload.refresh.as_deref()).await?,
    ))
}
