use crate::api::users::error::UserError;
use crate::api::users::interfaces::{UpdateProfile, UserResponse};
use crate::api::validation::FieldErrors;
use crate::database::DbError;
use crate::database::app_user::{ProfileChanges, User};
use crate::database::photo_store::PhotoStore;
use crate::database::user_store::UserStore;
use crate::media::{MediaKind, MediaStorage};
use sqlx::PgPool;
use tracing::{info, instrument};
use validator::Validate;

pub const USERNAME_TAKEN: &str = "A user with that username already exists.";

/// Lists every user.
pub async fn list_users(pool: &PgPool, media: &MediaStorage) -> Result<Vec<UserResponse>, UserError> {
    let users = UserStore::list_users(pool).await?;
    Ok(users
        .iter()
        .map(|u| UserResponse::from_user(u, media))
        .collect())
}

/// Retrieves a user by id.
///
/// # Errors
///
/// * `UserError::NotFound` when no user has this id.
pub async fn get_user(
    pool: &PgPool,
    media: &MediaStorage,
    user_id: i32,
) -> Result<UserResponse, UserError> {
    let user = UserStore::find_by_id(pool, user_id)
        .await?
        .ok_or(UserError::NotFound(user_id))?;
    Ok(UserResponse::from_user(&user, media))
}

/// Applies a partial profile update to `user`.
///
/// # Errors
///
/// * `UserError::Validation` when a field is invalid or the new username is taken.
#[instrument(skip(pool, media, payload), fields(user_id = user.id))]
pub async fn update_profile(
    pool: &PgPool,
    media: &MediaStorage,
    user: &User,
    payload: UpdateProfile,
) -> Result<UserResponse, UserError> {
    payload.validate().map_err(FieldErrors::from)?;

    if let Some(username) = &payload.username
        && UserStore::username_taken(pool, username, Some(user.id)).await?
    {
        return Err(FieldErrors::single("username", USERNAME_TAKEN).into());
    }

    let changes = ProfileChanges {
        username: payload.username,
        email: payload.email,
        first_name: payload.first_name,
        last_name: payload.last_name,
        bio: payload.bio,
    };
    let updated = match UserStore::update_profile(pool, user.id, &changes).await {
        Ok(updated) => updated,
        Err(DbError::UniqueViolation(_)) => {
            return Err(FieldErrors::single("username", USERNAME_TAKEN).into());
        }
        Err(e) => return Err(e.into()),
    };

    Ok(UserResponse::from_user(&updated, media))
}

/// Stores a new profile image for `user` and removes the previous file.
///
/// # Errors
///
/// * `UserError::Validation` when the upload is not a supported image.
#[instrument(skip(pool, media, bytes), fields(user_id = user.id, size = bytes.len()))]
pub async fn set_profile_image(
    pool: &PgPool,
    media: &MediaStorage,
    user: &User,
    bytes: &[u8],
) -> Result<UserResponse, UserError> {
    let relative_path = media.save_image(MediaKind::ProfileImage, bytes).await?;

    let updated = match UserStore::set_profile_image(pool, user.id, &relative_path).await {
        Ok(updated) => updated,
        Err(e) => {
            media.remove(&relative_path).await;
            return Err(e.into());
        }
    };

    if let Some(previous) = &user.profile_image {
        media.remove(previous).await;
    }

    Ok(UserResponse::from_user(&updated, media))
}

/// Deletes `user` together with their albums, photos and stored files.
#[instrument(skip(pool, media), fields(user_id = user.id))]
pub async fn delete_account(
    pool: &PgPool,
    media: &MediaStorage,
    user: &User,
) -> Result<(), UserError> {
    let mut files = PhotoStore::list_images_by_owner(pool, user.id).await?;
    if let Some(profile_image) = &user.profile_image {
        files.push(profile_image.clone());
    }

    UserStore::delete(pool, user.id).await?;
    info!("Deleted user {} and {} stored files", user.username, files.len());

    media.remove_all(&files).await;
    Ok(())
}
