use crate::api::album::error::AlbumError;
use crate::api::album::interfaces::{AlbumPayload, AlbumResponse};
use crate::api::representation::{expand_album, expand_albums};
use crate::api::validation::{FieldErrors, WriteMode};
use crate::database::album::Album;
use crate::database::album_store::AlbumStore;
use crate::database::photo_store::PhotoStore;
use crate::media::MediaStorage;
use sqlx::PgPool;
use tracing::{debug, instrument};
use validator::Validate;

fn validate_payload(payload: &AlbumPayload, mode: WriteMode) -> Result<(), FieldErrors> {
    let mut errors = payload
        .validate()
        .err()
        .map(FieldErrors::from)
        .unwrap_or_default();
    if mode.requires_all() {
        errors.require("title", payload.title.as_ref());
    }
    errors.into_result()
}

async fn to_response(
    pool: &PgPool,
    media: &MediaStorage,
    album: Album,
) -> Result<AlbumResponse, AlbumError> {
    let id = album.id;
    expand_album(pool, media, album)
        .await?
        .ok_or(AlbumError::NotFound(id))
}

/// Lists the caller's albums with their photos.
pub async fn list_albums(
    pool: &PgPool,
    media: &MediaStorage,
    owner_id: i32,
) -> Result<Vec<AlbumResponse>, AlbumError> {
    let albums = AlbumStore::list_by_owner(pool, owner_id).await?;
    Ok(expand_albums(pool, media, albums).await?)
}

/// Fetches one of the caller's albums.
///
/// # Errors
///
/// * `AlbumError::NotFound` when the album doesn't exist or belongs to someone else.
pub async fn get_album(
    pool: &PgPool,
    media: &MediaStorage,
    owner_id: i32,
    album_id: i32,
) -> Result<AlbumResponse, AlbumError> {
    let album = AlbumStore::find_owned(pool, album_id, owner_id)
        .await?
        .ok_or(AlbumError::NotFound(album_id))?;
    to_response(pool, media, album).await
}

/// Creates an album owned by the caller.
#[instrument(skip(pool, media, payload))]
pub async fn create_album(
    pool: &PgPool,
    media: &MediaStorage,
    owner_id: i32,
    payload: AlbumPayload,
) -> Result<AlbumResponse, AlbumError> {
    let payload = payload.trimmed();
    validate_payload(&payload, WriteMode::Replace)?;

    let album = AlbumStore::create(
        pool,
        owner_id,
        payload.title.as_deref().unwrap_or_default(),
        payload.description.as_deref().unwrap_or_default(),
    )
    .await?;
    debug!("Created album {}", album.id);

    to_response(pool, media, album).await
}

/// Updates one of the caller's albums.
///
/// # Errors
///
/// * `AlbumError::NotFound` when the album doesn't exist or belongs to someone else.
/// * `AlbumError::Validation` when a field is invalid, or `title` is missing on a full update.
#[instrument(skip(pool, media, payload))]
pub async fn update_album(
    pool: &PgPool,
    media: &MediaStorage,
    owner_id: i32,
    album_id: i32,
    payload: AlbumPayload,
    mode: WriteMode,
) -> Result<AlbumResponse, AlbumError> {
    if AlbumStore::find_owned(pool, album_id, owner_id).await?.is_none() {
        return Err(AlbumError::NotFound(album_id));
    }
    let payload = payload.trimmed();
    validate_payload(&payload, mode)?;

    let album = AlbumStore::update(
        pool,
        album_id,
        owner_id,
        payload.title.as_deref(),
        payload.description.as_deref(),
    )
    .await?
    .ok_or(AlbumError::NotFound(album_id))?;

    to_response(pool, media, album).await
}

/// Deletes one of the caller's albums and, through the cascade, its photos.
#[instrument(skip(pool, media))]
pub async fn delete_album(
    pool: &PgPool,
    media: &MediaStorage,
    owner_id: i32,
    album_id: i32,
) -> Result<(), AlbumError> {
    let mut tx = pool.begin().await?;
    let images = PhotoStore::list_images_by_album(&mut *tx, album_id).await?;
    if !AlbumStore::delete_owned(&mut *tx, album_id, owner_id).await? {
        return Err(AlbumError::NotFound(album_id));
    }
    tx.commit().await?;

    media.remove_all(&images).await;
    Ok(())
}
