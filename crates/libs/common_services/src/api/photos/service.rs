use crate::api::photos::error::PhotosError;
use crate::api::photos::interfaces::{PhotoResponse, PhotoWrite, UploadedImage};
use crate::api::representation::{expand_photo, expand_photos};
use crate::api::validation::{FieldErrors, REQUIRED, WriteMode};
use crate::database::album_store::AlbumStore;
use crate::database::photo::{NewPhoto, Photo, PhotoChanges};
use crate::database::photo_store::PhotoStore;
use crate::media::{MediaKind, MediaStorage};
use sqlx::PgPool;
use tracing::{debug, instrument};
use validator::Validate;

fn album_does_not_exist(album_id: i32) -> String {
    format!("Invalid pk \"{album_id}\" - object does not exist.")
}

/// Field checks that don't need the database.
fn validate_fields(
    payload: &PhotoWrite,
    image: Option<&UploadedImage>,
    mode: WriteMode,
) -> FieldErrors {
    let mut errors = payload
        .validate()
        .err()
        .map(FieldErrors::from)
        .unwrap_or_default();
    if mode.requires_all() {
        errors.require("title", payload.title.as_ref());
        errors.require("album", payload.album.as_ref());
        errors.require("image", image);
    }
    if image.is_some_and(|i| i.bytes.is_empty()) {
        errors.add("image", "The submitted file is empty.");
    }
    errors
}

/// Validates the payload, including that the target album belongs to the caller.
async fn validate_write(
    pool: &PgPool,
    owner_id: i32,
    payload: &PhotoWrite,
    image: Option<&UploadedImage>,
    mode: WriteMode,
) -> Result<(), PhotosError> {
    let mut errors = validate_fields(payload, image, mode);
    if let Some(album_id) = payload.album
        && AlbumStore::find_owned(pool, album_id, owner_id)
            .await?
            .is_none()
    {
        errors.add("album", album_does_not_exist(album_id));
    }
    Ok(errors.into_result()?)
}

async fn to_response(
    pool: &PgPool,
    media: &MediaStorage,
    photo: Photo,
) -> Result<PhotoResponse, PhotosError> {
    let id = photo.id;
    expand_photo(pool, media, photo)
        .await?
        .ok_or(PhotosError::NotFound(id))
}

/// Lists the caller's photos.
pub async fn list_photos(
    pool: &PgPool,
    media: &MediaStorage,
    owner_id: i32,
) -> Result<Vec<PhotoResponse>, PhotosError> {
    let photos = PhotoStore::list_by_owner(pool, owner_id).await?;
    Ok(expand_photos(pool, media, photos).await?)
}

/// Fetches one of the caller's photos.
///
/// # Errors
///
/// * `PhotosError::NotFound` when the photo doesn't exist or belongs to someone else.
pub async fn get_photo(
    pool: &PgPool,
    media: &MediaStorage,
    owner_id: i32,
    photo_id: i32,
) -> Result<PhotoResponse, PhotosError> {
    let photo = PhotoStore::find_owned(pool, photo_id, owner_id)
        .await?
        .ok_or(PhotosError::NotFound(photo_id))?;
    to_response(pool, media, photo).await
}

/// Stores the uploaded image and creates a photo owned by the caller.
/// Tag ids that don't match an existing tag are dropped.
///
/// # Errors
///
/// * `PhotosError::Validation` for missing or invalid fields, an album the caller doesn't own,
///   or an upload that isn't a supported image.
#[instrument(skip(pool, media, payload, image))]
pub async fn create_photo(
    pool: &PgPool,
    media: &MediaStorage,
    owner_id: i32,
    payload: PhotoWrite,
    image: Option<UploadedImage>,
) -> Result<PhotoResponse, PhotosError> {
    let payload = payload.trimmed();
    validate_write(pool, owner_id, &payload, image.as_ref(), WriteMode::Replace).await?;
    let (Some(album_id), Some(image)) = (payload.album, image) else {
        return Err(FieldErrors::single("image", REQUIRED).into());
    };

    let relative_path = media.save_image(MediaKind::Photo, &image.bytes).await?;
    let new_photo = NewPhoto {
        title: payload.title.unwrap_or_default(),
        description: payload.description.unwrap_or_default(),
        image: relative_path.clone(),
        album_id,
        owner_id,
    };

    let photo = match insert_with_tags(pool, &new_photo, payload.tag_ids.as_deref()).await {
        Ok(photo) => photo,
        Err(e) => {
            media.remove(&relative_path).await;
            return Err(e);
        }
    };
    debug!("Created photo {} in album {}", photo.id, album_id);

    to_response(pool, media, photo).await
}

async fn insert_with_tags(
    pool: &PgPool,
    new_photo: &NewPhoto,
    tag_ids: Option<&[i32]>,
) -> Result<Photo, PhotosError> {
    let mut tx = pool.begin().await?;
    let photo = PhotoStore::create(&mut *tx, new_photo).await?;
    if let Some(tag_ids) = tag_ids
        && !tag_ids.is_empty()
    {
        PhotoStore::add_tags(&mut *tx, photo.id, tag_ids).await?;
    }
    tx.commit().await?;
    Ok(photo)
}

/// Updates one of the caller's photos.
/// A present `tag_ids` replaces the photo's tags, an absent one leaves them alone.
/// A new image replaces the stored file.
///
/// # Errors
///
/// * `PhotosError::NotFound` when the photo doesn't exist or belongs to someone else.
/// * `PhotosError::Validation` as for [`create_photo`], with required fields only enforced
///   on a full update.
#[instrument(skip(pool, media, payload, image))]
pub async fn update_photo(
    pool: &PgPool,
    media: &MediaStorage,
    owner_id: i32,
    photo_id: i32,
    payload: PhotoWrite,
    image: Option<UploadedImage>,
    mode: WriteMode,
) -> Result<PhotoResponse, PhotosError> {
    let existing = PhotoStore::find_owned(pool, photo_id, owner_id)
        .await?
        .ok_or(PhotosError::NotFound(photo_id))?;
    let payload = payload.trimmed();
    validate_write(pool, owner_id, &payload, image.as_ref(), mode).await?;

    let new_image = match &image {
        Some(image) => Some(media.save_image(MediaKind::Photo, &image.bytes).await?),
        None => None,
    };
    let changes = PhotoChanges {
        title: payload.title,
        description: payload.description,
        image: new_image.clone(),
        album_id: payload.album,
    };

    let updated =
        match update_with_tags(pool, photo_id, owner_id, &changes, payload.tag_ids.as_deref())
            .await
        {
            Ok(updated) => updated,
            Err(e) => {
                if let Some(path) = &new_image {
                    media.remove(path).await;
                }
                return Err(e);
            }
        };

    if new_image.is_some() {
        media.remove(&existing.image).await;
    }

    to_response(pool, media, updated).await
}

async fn update_with_tags(
    pool: &PgPool,
    photo_id: i32,
    owner_id: i32,
    changes: &PhotoChanges,
    tag_ids: Option<&[i32]>,
) -> Result<Photo, PhotosError> {
    let mut tx = pool.begin().await?;
    let photo = PhotoStore::update(&mut *tx, photo_id, owner_id, changes)
        .await?
        .ok_or(PhotosError::NotFound(photo_id))?;
    if let Some(tag_ids) = tag_ids {
        PhotoStore::clear_tags(&mut *tx, photo_id).await?;
        if !tag_ids.is_empty() {
            PhotoStore::add_tags(&mut *tx, photo_id, tag_ids).await?;
        }
    }
    tx.commit().await?;
    Ok(photo)
}

/// Deletes one of the caller's photos and its stored file.
#[instrument(skip(pool, media))]
pub async fn delete_photo(
    pool: &PgPool,
    media: &MediaStorage,
    owner_id: i32,
    photo_id: i32,
) -> Result<(), PhotosError> {
    let removed = PhotoStore::delete_owned(pool, photo_id, owner_id)
        .await?
        .ok_or(PhotosError::NotFound(photo_id))?;
    media.remove(&removed.image).await;
    Ok(())
}

/// Photos carrying any of the given tag names, each listed once.
/// With `owner_id` set only that user's photos are searched, otherwise all photos are.
#[instrument(skip(pool, media))]
pub async fn search_by_tags(
    pool: &PgPool,
    media: &MediaStorage,
    tags: &[String],
    owner_id: Option<i32>,
) -> Result<Vec<PhotoResponse>, PhotosError> {
    if tags.is_empty() {
        return Ok(Vec::new());
    }
    let photos = PhotoStore::search_by_tag_names(pool, tags, owner_id).await?;
    Ok(expand_photos(pool, media, photos).await?)
}
