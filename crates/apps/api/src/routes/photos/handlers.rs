use crate::api_state::ApiContext;
use crate::photos::form::PhotoForm;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use axum_extra::extract::Query;
use common_services::api::photos::error::PhotosError;
use common_services::api::photos::interfaces::{
    PhotoResponse, PhotoUploadForm, PhotoWrite, SearchByTagsParams,
};
use common_services::api::photos::service::{
    create_photo, delete_photo, get_photo, list_photos, search_by_tags, update_photo,
};
use common_services::api::validation::{FieldErrors, WriteMode};
use common_services::database::app_user::User;
use tracing::instrument;

/// List the current user's photos.
#[utoipa::path(
    get,
    path = "/photos",
    tag = "Photos",
    responses(
        (status = 200, description = "The user's photos.", body = Vec<PhotoResponse>),
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_photos_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
) -> Result<Json<Vec<PhotoResponse>>, PhotosError> {
    Ok(Json(list_photos(&context.pool, &context.media, user.id).await?))
}

/// Upload a photo into one of the current user's albums.
///
/// `tag_ids` may be repeated; ids that don't match a tag are ignored.
#[utoipa::path(
    post,
    path = "/photos",
    tag = "Photos",
    request_body(content = PhotoUploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Photo created.", body = PhotoResponse),
        (status = 400, description = "Invalid fields.", body = FieldErrors),
    ),
    security(("bearer_auth" = []))
)]
#[instrument(skip(context, user, form), err(Debug))]
pub async fn create_photo_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
    form: PhotoForm,
) -> Result<(StatusCode, Json<PhotoResponse>), PhotosError> {
    let photo = create_photo(
        &context.pool,
        &context.media,
        user.id,
        form.fields,
        form.image,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(photo)))
}

/// Get one of the current user's photos.
#[utoipa::path(
    get,
    path = "/photos/{photo_id}",
    tag = "Photos",
    params(("photo_id" = i32, Path, description = "The photo id.")),
    responses(
        (status = 200, description = "The photo.", body = PhotoResponse),
        (status = 404, description = "Photo not found."),
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_photo_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
    Path(photo_id): Path<i32>,
) -> Result<Json<PhotoResponse>, PhotosError> {
    Ok(Json(
        get_photo(&context.pool, &context.media, user.id, photo_id).await?,
    ))
}

/// Replace a photo. Requires `title`, `album` and `image`.
#[utoipa::path(
    put,
    path = "/photos/{photo_id}",
    tag = "Photos",
    params(("photo_id" = i32, Path, description = "The photo id.")),
    request_body(content = PhotoUploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "The updated photo.", body = PhotoResponse),
        (status = 400, description = "Invalid fields.", body = FieldErrors),
        (status = 404, description = "Photo not found."),
    ),
    security(("bearer_auth" = []))
)]
#[instrument(skip(context, user, form), err(Debug))]
pub async fn replace_photo_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
    Path(photo_id): Path<i32>,
    form: PhotoForm,
) -> Result<Json<PhotoResponse>, PhotosError> {
    let photo = update_photo(
        &context.pool,
        &context.media,
        user.id,
        photo_id,
        form.fields,
        form.image,
        WriteMode::Replace,
    )
    .await?;
    Ok(Json(photo))
}

/// Update some of a photo's fields, as a multipart form or a JSON body.
/// A present `tag_ids` replaces the photo's tags.
#[utoipa::path(
    patch,
    path = "/photos/{photo_id}",
    tag = "Photos",
    params(("photo_id" = i32, Path, description = "The photo id.")),
    request_body(content = PhotoWrite),
    responses(
        (status = 200, description = "The updated photo.", body = PhotoResponse),
        (status = 400, description = "Invalid fields.", body = FieldErrors),
        (status = 404, description = "Photo not found."),
    ),
    security(("bearer_auth" = []))
)]
#[instrument(skip(context, user, form), err(Debug))]
pub async fn patch_photo_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
    Path(photo_id): Path<i32>,
    form: PhotoForm,
) -> Result<Json<PhotoResponse>, PhotosError> {
    let photo = update_photo(
        &context.pool,
        &context.media,
        user.id,
        photo_id,
        form.fields,
        form.image,
        WriteMode::Partial,
    )
    .await?;
    Ok(Json(photo))
}

/// Delete a photo and its image file.
#[utoipa::path(
    delete,
    path = "/photos/{photo_id}",
    tag = "Photos",
    params(("photo_id" = i32, Path, description = "The photo id.")),
    responses(
        (status = 204, description = "Photo deleted."),
        (status = 404, description = "Photo not found."),
    ),
    security(("bearer_auth" = []))
)]
#[instrument(skip(context, user), err(Debug))]
pub async fn delete_photo_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
    Path(photo_id): Path<i32>,
) -> Result<StatusCode, PhotosError> {
    delete_photo(&context.pool, &context.media, user.id, photo_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Photos tagged with any of the given tag names, each listed once.
///
/// Searches every user's photos unless owner scoped search is configured.
#[utoipa::path(
    get,
    path = "/photos/search_by_tags",
    tag = "Photos",
    params(SearchByTagsParams),
    responses(
        (status = 200, description = "Matching photos.", body = Vec<PhotoResponse>),
    ),
    security(("bearer_auth" = []))
)]
#[instrument(skip(context, user), err(Debug))]
pub async fn search_by_tags_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
    Query(params): Query<SearchByTagsParams>,
) -> Result<Json<Vec<PhotoResponse>>, PhotosError> {
    let owner_scope = context
        .settings
        .constants
        .search
        .owner_scoped_tag_search
        .then_some(user.id);
    let photos = search_by_tags(&context.pool, &context.media, &params.tags, owner_scope).await?;
    Ok(Json(photos))
}
