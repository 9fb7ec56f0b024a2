use crate::api_state::ApiContext;
use crate::json_body::JsonBody;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use common_services::api::tags::error::TagError;
use common_services::api::tags::interfaces::TagPayload;
use common_services::api::tags::service::{
    create_tag, delete_tag, get_tag, list_tags, update_tag,
};
use common_services::api::validation::{FieldErrors, WriteMode};
use common_services::database::tag::Tag;
use tracing::instrument;

#[utoipa::path(
    get,
    path = "/tags",
    tag = "Tags",
    responses((status = 200, description = "All tags.", body = Vec<Tag>)),
    security(("bearer_auth" = []))
)]
pub async fn list_tags_handler(
    State(context): State<ApiContext>,
) -> Result<Json<Vec<Tag>>, TagError> {
    Ok(Json(list_tags(&context.pool).await?))
}

/// Create a tag. Names are unique.
#[utoipa::path(
    post,
    path = "/tags",
    tag = "Tags",
    request_body = TagPayload,
    responses(
        (status = 201, description = "Tag created.", body = Tag),
        (status = 400, description = "Invalid or duplicate name.", body = FieldErrors),
    ),
    security(("bearer_auth" = []))
)]
#[instrument(skip(context), err(Debug))]
pub async fn create_tag_handler(
    State(context): State<ApiContext>,
    JsonBody(payload): JsonBody<TagPayload>,
) -> Result<(StatusCode, Json<Tag>), TagError> {
    let tag = create_tag(&context.pool, payload).await?;
    Ok((StatusCode::CREATED, Json(tag)))
}

#[utoipa::path(
    get,
    path = "/tags/{tag_id}",
    tag = "Tags",
    params(("tag_id" = i32, Path, description = "The tag id.")),
    responses(
        (status = 200, description = "The tag.", body = Tag),
        (status = 404, description = "Tag not found."),
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_tag_handler(
    State(context): State<ApiContext>,
    Path(tag_id): Path<i32>,
) -> Result<Json<Tag>, TagError> {
    Ok(Json(get_tag(&context.pool, tag_id).await?))
}

#[utoipa::path(
    put,
    path = "/tags/{tag_id}",
    tag = "Tags",
    params(("tag_id" = i32, Path, description = "The tag id.")),
    request_body = TagPayload,
    responses(
        (status = 200, description = "The renamed tag.", body = Tag),
        (status = 400, description = "Invalid or duplicate name.", body = FieldErrors),
        (status = 404, description = "Tag not found."),
    ),
    security(("bearer_auth" = []))
)]
#[instrument(skip(context), err(Debug))]
pub async fn replace_tag_handler(
    State(context): State<ApiContext>,
    Path(tag_id): Path<i32>,
    JsonBody(payload): JsonBody<TagPayload>,
) -> Result<Json<Tag>, TagError> {
    Ok(Json(
        update_tag(&context.pool, tag_id, payload, WriteMode::Replace).await?,
    ))
}

#[utoipa::path(
    patch,
    path = "/tags/{tag_id}",
    tag = "Tags",
    params(("tag_id" = i32, Path, description = "The tag id.")),
    request_body = TagPayload,
    responses(
        (status = 200, description = "The tag.", body = Tag),
        (status = 400, description = "Invalid or duplicate name.", body = FieldErrors),
        (status = 404, description = "Tag not found."),
    ),
    security(("bearer_auth" = []))
)]
#[instrument(skip(context), err(Debug))]
pub async fn patch_tag_handler(
    State(context): State<ApiContext>,
    Path(tag_id): Path<i32>,
    JsonBody(payload): JsonBody<TagPayload>,
) -> Result<Json<Tag>, TagError> {
    Ok(Json(
        update_tag(&context.pool, tag_id, payload, WriteMode::Partial).await?,
    ))
}

/// Delete a tag. Photos keep existing, they just lose the tag.
#[utoipa::path(
    delete,
    path = "/tags/{tag_id}",
    tag = "Tags",
    params(("tag_id" = i32, Path, description = "The tag id.")),
    responses(
        (status = 204, description = "Tag deleted."),
        (status = 404, description = "Tag not found."),
    ),
    security(("bearer_auth" = []))
)]
#[instrument(skip(context), err(Debug))]
pub async fn delete_tag_handler(
    State(context): State<ApiContext>,
    Path(tag_id): Path<i32>,
) -> Result<StatusCode, TagError> {
    delete_tag(&context.pool, tag_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
