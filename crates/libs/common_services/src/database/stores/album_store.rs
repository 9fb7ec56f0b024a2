use crate::database::DbError;
use crate::database::album::Album;
use sqlx::{Executor, Postgres};

pub struct AlbumStore;

impl AlbumStore {
    /// Creates a new album owned by `owner_id`.
    pub async fn create(
        executor: impl Executor<'_, Database = Postgres>,
        owner_id: i32,
        title: &str,
        description: &str,
    ) -> Result<Album, DbError> {
        Ok(sqlx::query_as::<_, Album>(
            r"
            INSERT INTO album (owner_id, title, description)
            VALUES ($1, $2, $3)
            RETURNING *
            ",
        )
        .bind(owner_id)
        .bind(title)
        .bind(description)
        .fetch_one(executor)
        .await?)
    }

    /// Updates the details of an album, if `owner_id` owns it.
    /// Returns `None` when no such album exists for that owner.
    pub async fn update(
        executor: impl Executor<'_, Database = Postgres>,
        album_id: i32,
        owner_id: i32,
        title: Option<&str>,
        description: Option<&str>,
    ) -> Result<Option<Album>, DbError> {
        Ok(sqlx::query_as::<_, Album>(
            r"
            UPDATE album
            SET
                title = COALESCE($1, title),
                description = COALESCE($2, description),
                updated_at = now()
            WHERE id = $3 AND owner_id = $4
            RETURNING *
            ",
        )
        .bind(title)
        .bind(description)
        .bind(album_id)
        .bind(owner_id)
        .fetch_optional(executor)
        .await?)
    }

    /// Retrieves a single album by its ID, restricted to albums owned by `owner_id`.
    pub async fn find_owned(
        executor: impl Executor<'_, Database = Postgres>,
        album_id: i32,
        owner_id: i32,
    ) -> Result<Option<Album>, DbError> {
        Ok(
            sqlx::query_as::<_, Album>("SELECT * FROM album WHERE id = $1 AND owner_id = $2")
                .bind(album_id)
                .bind(owner_id)
                .fetch_optional(executor)
                .await?,
        )
    }

    /// Retrieves all albums owned by a user.
    pub async fn list_by_owner(
        executor: impl Executor<'_, Database = Postgres>,
        owner_id: i32,
    ) -> Result<Vec<Album>, DbError> {
        Ok(
            sqlx::query_as::<_, Album>("SELECT * FROM album WHERE owner_id = $1 ORDER BY id")
                .bind(owner_id)
                .fetch_all(executor)
                .await?,
        )
    }

    /// Deletes an album owned by `owner_id`. Its photos cascade.
    /// Returns whether a row was removed.
    pub async fn delete_owned(
        executor: impl Executor<'_, Database = Postgres>,
        album_id: i32,
        owner_id: i32,
    ) -> Result<bool, DbError> {
        let result = sqlx::query("DELETE FROM album WHERE id = $1 AND owner_id = $2")
            .bind(album_id)
            .bind(owner_id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
