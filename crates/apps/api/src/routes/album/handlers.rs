use crate::api_state::ApiContext;
use crate::json_body::JsonBody;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use common_services::api::album::error::AlbumError;
use common_services::api::album::interfaces::{AlbumPayload, AlbumResponse};
use common_services::api::album::service::{
    create_album, delete_album, get_album, list_albums, update_album,
};
use common_services::api::validation::{FieldErrors, WriteMode};
use common_services::database::app_user::User;
use tracing::instrument;

/// List the current user's albums, each with its photos.
#[utoipa::path(
    get,
    path = "/albums",
    tag = "Album",
    responses(
        (status = 200, description = "The user's albums.", body = Vec<AlbumResponse>),
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_albums_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
) -> Result<Json<Vec<AlbumResponse>>, AlbumError> {
    Ok(Json(list_albums(&context.pool, &context.media, user.id).await?))
}

/// Create a new album. The current user becomes its owner.
#[utoipa::path(
    post,
    path = "/albums",
    tag = "Album",
    request_body = AlbumPayload,
    responses(
        (status = 201, description = "Album created successfully.", body = AlbumResponse),
        (status = 400, description = "Invalid fields.", body = FieldErrors),
    ),
    security(("bearer_auth" = []))
)]
#[instrument(skip(context, user), err(Debug))]
pub async fn create_album_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
    JsonBody(payload): JsonBody<AlbumPayload>,
) -> Result<(StatusCode, Json<AlbumResponse>), AlbumError> {
    let album = create_album(&context.pool, &context.media, user.id, payload).await?;
    Ok((StatusCode::CREATED, Json(album)))
}

/// Get one of the current user's albums.
#[utoipa::path(
    get,
    path = "/albums/{album_id}",
    tag = "Album",
    params(("album_id" = i32, Path, description = "The album id.")),
    responses(
        (status = 200, description = "The album.", body = AlbumResponse),
        (status = 404, description = "Album not found."),
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_album_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
    Path(album_id): Path<i32>,
) -> Result<Json<AlbumResponse>, AlbumError> {
    Ok(Json(
        get_album(&context.pool, &context.media, user.id, album_id).await?,
    ))
}

/// Replace an album's fields. `title` is required.
#[utoipa::path(
    put,
    path = "/albums/{album_id}",
    tag = "Album",
    params(("album_id" = i32, Path, description = "The album id.")),
    request_body = AlbumPayload,
    responses(
        (status = 200, description = "The updated album.", body = AlbumResponse),
        (status = 400, description = "Invalid fields.", body = FieldErrors),
        (status = 404, description = "Album not found."),
    ),
    security(("bearer_auth" = []))
)]
#[instrument(skip(context, user), err(Debug))]
pub async fn replace_album_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
    Path(album_id): Path<i32>,
    JsonBody(payload): JsonBody<AlbumPayload>,
) -> Result<Json<AlbumResponse>, AlbumError> {
    let album = update_album(
        &context.pool,
        &context.media,
        user.id,
        album_id,
        payload,
        WriteMode::Replace,
    )
    .await?;
    Ok(Json(album))
}

/// Update some of an album's fields.
#[utoipa::path(
    patch,
    path = "/albums/{album_id}",
    tag = "Album",
    params(("album_id" = i32, Path, description = "The album id.")),
    request_body = AlbumPayload,
    responses(
        (status = 200, description = "The updated album.", body = AlbumResponse),
        (status = 400, description = "Invalid fields.", body = FieldErrors),
        (status = 404, description = "Album not found."),
    ),
    security(("bearer_auth" = []))
)]
#[instrument(skip(context, user), err(Debug))]
pub async fn patch_album_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
    Path(album_id): Path<i32>,
    JsonBody(payload): JsonBody<AlbumPayload>,
) -> Result<Json<AlbumResponse>, AlbumError> {
    let album = update_album(
        &context.pool,
        &context.media,
        user.id,
        album_id,
        payload,
        WriteMode::Partial,
    )
    .await?;
    Ok(Json(album))
}

/// Delete an album together with its photos.
#[utoipa::path(
    delete,
    path = "/albums/{album_id}",
    tag = "Album",
    params(("album_id" = i32, Path, description = "The album id.")),
    responses(
        (status = 204, description = "Album deleted."),
        (status = 404, description = "Album not found."),
    ),
    security(("bearer_auth" = []))
)]
#[instrument(skip(context, user), err(Debug))]
pub async fn delete_album_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
    Path(album_id): Path<i32>,
) -> Result<StatusCode, AlbumError> {
    delete_album(&context.pool, &context.media, user.id, album_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
