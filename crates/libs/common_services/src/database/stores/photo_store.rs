use crate::database::DbError;
use crate::database::photo::{NewPhoto, Photo, PhotoChanges, PhotoTagRow};
use sqlx::{Executor, Postgres};

pub struct PhotoStore;

impl PhotoStore {
    //================================================================================
    // Core Photo Management
    //================================================================================

    pub async fn create(
        executor: impl Executor<'_, Database = Postgres>,
        photo: &NewPhoto,
    ) -> Result<Photo, DbError> {
        Ok(sqlx::query_as::<_, Photo>(
            r"
            INSERT INTO photo (title, description, image, album_id, owner_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            ",
        )
        .bind(&photo.title)
        .bind(&photo.description)
        .bind(&photo.image)
        .bind(photo.album_id)
        .bind(photo.owner_id)
        .fetch_one(executor)
        .await?)
    }

    /// Updates a photo owned by `owner_id`. Returns `None` when no such photo exists for that owner.
    pub async fn update(
        executor: impl Executor<'_, Database = Postgres>,
        photo_id: i32,
        owner_id: i32,
        changes: &PhotoChanges,
    ) -> Result<Option<Photo>, DbError> {
        Ok(sqlx::query_as::<_, Photo>(
            r"
            UPDATE photo
            SET
                title = COALESCE($1, title),
                description = COALESCE($2, description),
                image = COALESCE($3, image),
                album_id = COALESCE($4, album_id)
            WHERE id = $5 AND owner_id = $6
            RETURNING *
            ",
        )
        .bind(changes.title.as_deref())
        .bind(changes.description.as_deref())
        .bind(changes.image.as_deref())
        .bind(changes.album_id)
        .bind(photo_id)
        .bind(owner_id)
        .fetch_optional(executor)
        .await?)
    }

    /// Deletes a photo owned by `owner_id`, returning the removed row.
    pub async fn delete_owned(
        executor: impl Executor<'_, Database = Postgres>,
        photo_id: i32,
        owner_id: i32,
    ) -> Result<Option<Photo>, DbError> {
        Ok(sqlx::query_as::<_, Photo>(
            "DELETE FROM photo WHERE id = $1 AND owner_id = $2 RETURNING *",
        )
        .bind(photo_id)
        .bind(owner_id)
        .fetch_optional(executor)
        .await?)
    }

    //================================================================================
    // Find / List
    //================================================================================

    pub async fn find_owned(
        executor: impl Executor<'_, Database = Postgres>,
        photo_id: i32,
        owner_id: i32,
    ) -> Result<Option<Photo>, DbError> {
        Ok(
            sqlx::query_as::<_, Photo>("SELECT * FROM photo WHERE id = $1 AND owner_id = $2")
                .bind(photo_id)
                .bind(owner_id)
                .fetch_optional(executor)
                .await?,
        )
    }

    pub async fn list_by_owner(
        executor: impl Executor<'_, Database = Postgres>,
        owner_id: i32,
    ) -> Result<Vec<Photo>, DbError> {
        Ok(
            sqlx::query_as::<_, Photo>("SELECT * FROM photo WHERE owner_id = $1 ORDER BY id")
                .bind(owner_id)
                .fetch_all(executor)
                .await?,
        )
    }

    pub async fn list_by_album_ids(
        executor: impl Executor<'_, Database = Postgres>,
        album_ids: &[i32],
    ) -> Result<Vec<Photo>, DbError> {
        Ok(sqlx::query_as::<_, Photo>(
            "SELECT * FROM photo WHERE album_id = ANY($1) ORDER BY id",
        )
        .bind(album_ids)
        .fetch_all(executor)
        .await?)
    }

    /// Image paths of every photo in an album. Used to clean up files after a cascade delete.
    pub async fn list_images_by_album(
        executor: impl Executor<'_, Database = Postgres>,
        album_id: i32,
    ) -> Result<Vec<String>, DbError> {
        Ok(
            sqlx::query_scalar::<_, String>("SELECT image FROM photo WHERE album_id = $1")
                .bind(album_id)
                .fetch_all(executor)
                .await?,
        )
    }

    /// Image paths of every photo owned by a user.
    pub async fn list_images_by_owner(
        executor: impl Executor<'_, Database = Postgres>,
        owner_id: i32,
    ) -> Result<Vec<String>, DbError> {
        Ok(
            sqlx::query_scalar::<_, String>("SELECT image FROM photo WHERE owner_id = $1")
                .bind(owner_id)
                .fetch_all(executor)
                .await?,
        )
    }

    /// Photos carrying at least one tag whose name is in `tag_names`.
    /// Each photo appears once, however many of its tags match.
    /// With `owner_id` set, only that user's photos are searched.
    pub async fn search_by_tag_names(
        executor: impl Executor<'_, Database = Postgres>,
        tag_names: &[String],
        owner_id: Option<i32>,
    ) -> Result<Vec<Photo>, DbError> {
        Ok(sqlx::query_as::<_, Photo>(
            r"
            SELECT p.*
            FROM photo p
            WHERE EXISTS (
                SELECT 1
                FROM photo_tag pt
                JOIN tag t ON t.id = pt.tag_id
                WHERE pt.photo_id = p.id AND t.name = ANY($1)
            )
            AND ($2::INT IS NULL OR p.owner_id = $2)
            ORDER BY p.id
            ",
        )
        .bind(tag_names)
        .bind(owner_id)
        .fetch_all(executor)
        .await?)
    }

    //================================================================================
    // Photo Tag Management
    //================================================================================

    /// Removes every tag from a photo.
    pub async fn clear_tags(
        executor: impl Executor<'_, Database = Postgres>,
        photo_id: i32,
    ) -> Result<(), DbError> {
        sqlx::query("DELETE FROM photo_tag WHERE photo_id = $1")
            .bind(photo_id)
            .execute(executor)
            .await?;
        Ok(())
    }

    /// Attaches the given tags to a photo.
    /// Ids that don't match an existing tag are skipped, as are tags already attached.
    pub async fn add_tags(
        executor: impl Executor<'_, Database = Postgres>,
        photo_id: i32,
        tag_ids: &[i32],
    ) -> Result<u64, DbError> {
        let result = sqlx::query(
            r"
            INSERT INTO photo_tag (photo_id, tag_id)
            SELECT $1, t.id
            FROM tag t
            WHERE t.id = ANY($2)
            ON CONFLICT (photo_id, tag_id) DO NOTHING
            ",
        )
        .bind(photo_id)
        .bind(tag_ids)
        .execute(executor)
        .await?;
        Ok(result.rows_affected())
    }

    /// Tags attached to any of the given photos, ordered by photo then tag id.
    pub async fn list_tags_for_photos(
        executor: impl Executor<'_, Database = Postgres>,
        photo_ids: &[i32],
    ) -> Result<Vec<PhotoTagRow>, DbError> {
        Ok(sqlx::query_as::<_, PhotoTagRow>(
            r"
            SELECT pt.photo_id, t.id AS tag_id, t.name
            FROM photo_tag pt
            JOIN tag t ON t.id = pt.tag_id
            WHERE pt.photo_id = ANY($1)
            ORDER BY pt.photo_id, t.id
            ",
        )
        .bind(photo_ids)
        .fetch_all(executor)
        .await?)
    }
}
