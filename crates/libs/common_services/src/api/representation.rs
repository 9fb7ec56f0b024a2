//! Builds the nested JSON representations of albums and photos.
//!
//! Rows are loaded per level with one query each (albums, photos, tag links, owners) and
//! stitched together in memory, so the query count does not grow with the result size.

use crate::api::album::interfaces::AlbumResponse;
use crate::api::photos::interfaces::PhotoResponse;
use crate::api::users::interfaces::UserResponse;
use crate::database::DbError;
use crate::database::album::Album;
use crate::database::photo::{Photo, PhotoTagRow};
use crate::database::photo_store::PhotoStore;
use crate::database::tag::Tag;
use crate::database::user_store::UserStore;
use crate::media::MediaStorage;
use sqlx::PgPool;
use std::collections::{BTreeSet, HashMap};
use tracing::warn;

pub type OwnerMap = HashMap<i32, UserResponse>;

/// Loads the users with the given ids, keyed by id.
pub async fn load_owners(
    pool: &PgPool,
    media: &MediaStorage,
    user_ids: impl IntoIterator<Item = i32>,
) -> Result<OwnerMap, DbError> {
    let ids: Vec<i32> = user_ids.into_iter().collect::<BTreeSet<_>>().into_iter().collect();
    if ids.is_empty() {
        return Ok(OwnerMap::new());
    }
    let users = UserStore::list_by_ids(pool, &ids).await?;
    Ok(users
        .iter()
        .map(|u| (u.id, UserResponse::from_user(u, media)))
        .collect())
}

/// Embeds owners and tags into photo rows. Input order is kept.
#[must_use]
pub fn assemble_photos(
    photos: Vec<Photo>,
    tag_rows: Vec<PhotoTagRow>,
    owners: &OwnerMap,
    media: &MediaStorage,
) -> Vec<PhotoResponse> {
    let mut tags_by_photo: HashMap<i32, Vec<Tag>> = HashMap::new();
    for row in tag_rows {
        tags_by_photo.entry(row.photo_id).or_default().push(Tag {
            id: row.tag_id,
            name: row.name,
        });
    }
    for tags in tags_by_photo.values_mut() {
        tags.sort_by_key(|t| t.id);
    }

    photos
        .into_iter()
        .filter_map(|photo| {
            let Some(owner) = owners.get(&photo.owner_id) else {
                warn!("Owner {} of photo {} not loaded", photo.owner_id, photo.id);
                return None;
            };
            Some(PhotoResponse {
                id: photo.id,
                image: media.url_for(&photo.image),
                title: photo.title,
                description: photo.description,
                uploaded_at: photo.uploaded_at,
                album: photo.album_id,
                owner: owner.clone(),
                tags: tags_by_photo.remove(&photo.id).unwrap_or_default(),
            })
        })
        .collect()
}

/// Embeds owners and already assembled photos into album rows. Input order is kept.
#[must_use]
pub fn assemble_albums(
    albums: Vec<Album>,
    photos: Vec<PhotoResponse>,
    owners: &OwnerMap,
) -> Vec<AlbumResponse> {
    let mut photos_by_album: HashMap<i32, Vec<PhotoResponse>> = HashMap::new();
    for photo in photos {
        photos_by_album.entry(photo.album).or_default().push(photo);
    }

    albums
        .into_iter()
        .filter_map(|album| {
            let Some(owner) = owners.get(&album.owner_id) else {
                warn!("Owner {} of album {} not loaded", album.owner_id, album.id);
                return None;
            };
            Some(AlbumResponse {
                id: album.id,
                title: album.title,
                description: album.description,
                created_at: album.created_at,
                updated_at: album.updated_at,
                owner: owner.clone(),
                photos: photos_by_album.remove(&album.id).unwrap_or_default(),
            })
        })
        .collect()
}

/// Loads tags and owners for `photos` and returns their nested representation.
pub async fn expand_photos(
    pool: &PgPool,
    media: &MediaStorage,
    photos: Vec<Photo>,
) -> Result<Vec<PhotoResponse>, DbError> {
    if photos.is_empty() {
        return Ok(Vec::new());
    }
    let photo_ids: Vec<i32> = photos.iter().map(|p| p.id).collect();
    let tag_rows = PhotoStore::list_tags_for_photos(pool, &photo_ids).await?;
    let owners = load_owners(pool, media, photos.iter().map(|p| p.owner_id)).await?;

    Ok(assemble_photos(photos, tag_rows, &owners, media))
}

pub async fn expand_photo(
    pool: &PgPool,
    media: &MediaStorage,
    photo: Photo,
) -> Result<Option<PhotoResponse>, DbError> {
    Ok(expand_photos(pool, media, vec![photo]).await?.pop())
}

/// Loads photos, their tags, and every owner involved, then nests them into `albums`.
pub async fn expand_albums(
    pool: &PgPool,
    media: &MediaStorage,
    albums: Vec<Album>,
) -> Result<Vec<AlbumResponse>, DbError> {
    if albums.is_empty() {
        return Ok(Vec::new());
    }
    let album_ids: Vec<i32> = albums.iter().map(|a| a.id).collect();
    let photos = PhotoStore::list_by_album_ids(pool, &album_ids).await?;
    let photo_ids: Vec<i32> = photos.iter().map(|p| p.id).collect();
    let tag_rows = if photo_ids.is_empty() {
        Vec::new()
    } else {
        PhotoStore::list_tags_for_photos(pool, &photo_ids).await?
    };

    let owner_ids = albums
        .iter()
        .map(|a| a.owner_id)
        .chain(photos.iter().map(|p| p.owner_id))
        .collect::<Vec<_>>();
    let owners = load_owners(pool, media, owner_ids).await?;

    let photos = assemble_photos(photos, tag_rows, &owners, media);
    Ok(assemble_albums(albums, photos, &owners))
}

pub async fn expand_album(
    pool: &PgPool,
    media: &MediaStorage,
    album: Album,
) -> Result<Option<AlbumResponse>, DbError> {
    Ok(expand_albums(pool, media, vec![album]).await?.pop())
}
