use crate::database::DbError;
use crate::database::app_user::{ProfileChanges, User, UserWithPassword};
use sqlx::postgres::PgQueryResult;
use sqlx::{Executor, Postgres};

pub struct UserStore;

impl UserStore {
    //================================================================================
    // Core User Management (CRUD)
    //================================================================================

    /// Creates a new user.
    pub async fn create(
        executor: impl Executor<'_, Database = Postgres>,
        username: &str,
        email: &str,
        hashed_password: &str,
        first_name: &str,
        last_name: &str,
        bio: &str,
    ) -> Result<User, DbError> {
        Ok(sqlx::query_as::<_, User>(
            r"
            INSERT INTO app_user (username, email, password, first_name, last_name, bio)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING
                id,
                username,
                email,
                first_name,
                last_name,
                profile_image,
                bio,
                date_joined
            ",
        )
        .bind(username)
        .bind(email)
        .bind(hashed_password)
        .bind(first_name)
        .bind(last_name)
        .bind(bio)
        .fetch_one(executor)
        .await?)
    }

    /// Updates a user's profile fields.
    ///
    /// Pass `None` for fields that should remain unchanged.
    pub async fn update_profile(
        executor: impl Executor<'_, Database = Postgres>,
        user_id: i32,
        changes: &ProfileChanges,
    ) -> Result<User, DbError> {
        Ok(sqlx::query_as::<_, User>(
            r"
            UPDATE app_user
            SET
                username = COALESCE($1, username),
                email = COALESCE($2, email),
                first_name = COALESCE($3, first_name),
                last_name = COALESCE($4, last_name),
                bio = COALESCE($5, bio)
            WHERE id = $6
            RETURNING
                id,
                username,
                email,
                first_name,
                last_name,
                profile_image,
                bio,
                date_joined
            ",
        )
        .bind(changes.username.as_deref())
        .bind(changes.email.as_deref())
        .bind(changes.first_name.as_deref())
        .bind(changes.last_name.as_deref())
        .bind(changes.bio.as_deref())
        .bind(user_id)
        .fetch_one(executor)
        .await?)
    }

    /// Points the user's profile image at a stored file.
    pub async fn set_profile_image(
        executor: impl Executor<'_, Database = Postgres>,
        user_id: i32,
        profile_image: &str,
    ) -> Result<User, DbError> {
        Ok(sqlx::query_as::<_, User>(
            r"
            UPDATE app_user
            SET profile_image = $1
            WHERE id = $2
            RETURNING
                id,
                username,
                email,
                first_name,
                last_name,
                profile_image,
                bio,
                date_joined
            ",
        )
        .bind(profile_image)
        .bind(user_id)
        .fetch_one(executor)
        .await?)
    }

    /// Deletes a user by ID. Albums, photos and refresh tokens cascade.
    pub async fn delete(
        executor: impl Executor<'_, Database = Postgres>,
        user_id: i32,
    ) -> Result<PgQueryResult, DbError> {
        Ok(sqlx::query("DELETE FROM app_user WHERE id = $1")
            .bind(user_id)
            .execute(executor)
            .await?)
    }

    //================================================================================
    // Find / Get Methods
    //================================================================================

    pub async fn find_by_id(
        executor: impl Executor<'_, Database = Postgres>,
        user_id: i32,
    ) -> Result<Option<User>, DbError> {
        Ok(sqlx::query_as::<_, User>(
            r"
            SELECT
                id,
                username,
                email,
                first_name,
                last_name,
                profile_image,
                bio,
                date_joined
            FROM app_user
            WHERE id = $1
            ",
        )
        .bind(user_id)
        .fetch_optional(executor)
        .await?)
    }

    pub async fn find_by_username_with_password(
        executor: impl Executor<'_, Database = Postgres>,
        username: &str,
    ) -> Result<Option<UserWithPassword>, DbError> {
        Ok(sqlx::query_as::<_, UserWithPassword>(
            "SELECT id, username, password FROM app_user WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(executor)
        .await?)
    }

    /// Whether `username` belongs to any user other than `except_user_id`.
    pub async fn username_taken(
        executor: impl Executor<'_, Database = Postgres>,
        username: &str,
        except_user_id: Option<i32>,
    ) -> Result<bool, DbError> {
        Ok(sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(
                SELECT 1 FROM app_user
                WHERE username = $1 AND ($2::INT IS NULL OR id <> $2)
            )
            ",
        )
        .bind(username)
        .bind(except_user_id)
        .fetch_one(executor)
        .await?)
    }

    //================================================================================
    // Listing
    //================================================================================

    pub async fn list_users(
        executor: impl Executor<'_, Database = Postgres>,
    ) -> Result<Vec<User>, DbError> {
        Ok(sqlx::query_as::<_, User>(
            r"
            SELECT
                id,
                username,
                email,
                first_name,
                last_name,
                profile_image,
                bio,
                date_joined
            FROM app_user
            ORDER BY id
            ",
        )
        .fetch_all(executor)
        .await?)
    }

    /// Fetches every user whose id is in `user_ids`. Unknown ids are skipped.
    pub async fn list_by_ids(
        executor: impl Executor<'_, Database = Postgres>,
        user_ids: &[i32],
    ) -> Result<Vec<User>, DbError> {
        Ok(sqlx::query_as::<_, User>(
            r"
            SELECT
                id,
                username,
                email,
                first_name,
                last_name,
                profile_image,
                bio,
                date_joined
            FROM app_user
            WHERE id = ANY($1)
            ORDER BY id
            ",
        )
        .bind(user_ids)
        .fetch_all(executor)
        .await?)
    }
}
