use crate::api_state::ApiContext;
use crate::json_body::JsonBody;
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use common_services::api::users::error::UserError;
use common_services::api::users::interfaces::{UpdateProfile, UserResponse};
use common_services::api::users::service::{
    delete_account, get_user, list_users, set_profile_image, update_profile,
};
use common_services::api::validation::{FieldErrors, REQUIRED};
use common_services::database::app_user::User;
use tracing::instrument;

/// Get the authenticated user's profile.
#[utoipa::path(
    get,
    path = "/users/me",
    tag = "Users",
    responses(
        (status = 200, description = "Current user data", body = UserResponse),
        (status = 401, description = "Authentication required"),
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_me(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
) -> Json<UserResponse> {
    Json(UserResponse::from_user(&user, &context.media))
}

/// Update the authenticated user's profile. Omitted fields stay unchanged.
#[utoipa::path(
    put,
    path = "/users/update_profile",
    tag = "Users",
    request_body = UpdateProfile,
    responses(
        (status = 200, description = "Updated user", body = UserResponse),
        (status = 400, description = "Invalid fields", body = FieldErrors),
    ),
    security(("bearer_auth" = []))
)]
#[instrument(skip(context, user, payload), err(Debug))]
pub async fn update_profile_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
    JsonBody(payload): JsonBody<UpdateProfile>,
) -> Result<Json<UserResponse>, UserError> {
    let updated = update_profile(&context.pool, &context.media, &user, payload).await?;
    Ok(Json(updated))
}

/// List all users.
#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    responses(
        (status = 200, description = "All users", body = Vec<UserResponse>),
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_users_handler(
    State(context): State<ApiContext>,
) -> Result<Json<Vec<UserResponse>>, UserError> {
    Ok(Json(list_users(&context.pool, &context.media).await?))
}

/// Get a user by id.
#[utoipa::path(
    get,
    path = "/users/{user_id}",
    tag = "Users",
    params(("user_id" = i32, Path, description = "User id")),
    responses(
        (status = 200, description = "The user", body = UserResponse),
        (status = 404, description = "No such user"),
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_user_handler(
    State(context): State<ApiContext>,
    Path(user_id): Path<i32>,
) -> Result<Json<UserResponse>, UserError> {
    Ok(Json(get_user(&context.pool, &context.media, user_id).await?))
}

/// Replace the authenticated user's profile image with the uploaded `image` field.
#[utoipa::path(
    put,
    path = "/users/profile_image",
    tag = "Users",
    request_body(content_type = "multipart/form-data", description = "Form with an `image` file field"),
    responses(
        (status = 200, description = "Updated user", body = UserResponse),
        (status = 400, description = "Missing or invalid image", body = FieldErrors),
    ),
    security(("bearer_auth" = []))
)]
#[instrument(skip(context, user, multipart))]
pub async fn upload_profile_image(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
    mut multipart: Multipart,
) -> Result<Json<UserResponse>, Response> {
    let mut image = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(IntoResponse::into_response)?
    {
        if field.name() == Some("image") {
            image = Some(field.bytes().await.map_err(IntoResponse::into_response)?);
        }
    }
    let Some(image) = image else {
        return Err(FieldErrors::single("image", REQUIRED).into_response());
    };

    let updated = set_profile_image(&context.pool, &context.media, &user, &image)
        .await
        .map_err(IntoResponse::into_response)?;
    Ok(Json(updated))
}

/// Delete the authenticated user's account with all of their albums and photos.
#[utoipa::path(
    delete,
    path = "/users/me",
    tag = "Users",
    responses(
        (status = 204, description = "Account deleted"),
    ),
    security(("bearer_auth" = []))
)]
#[instrument(skip(context, user), err(Debug))]
pub async fn delete_me(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
) -> Result<StatusCode, UserError> {
    delete_account(&context.pool, &context.media, &user).await?;
    Ok(StatusCode::NO_CONTENT)
}
