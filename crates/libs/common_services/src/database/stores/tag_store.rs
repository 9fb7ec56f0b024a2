use crate::database::DbError;
use crate::database::tag::Tag;
use sqlx::{Executor, Postgres};

pub struct TagStore;

impl TagStore {
    /// Creates a tag. A duplicate name fails with `DbError::UniqueViolation`.
    pub async fn create(
        executor: impl Executor<'_, Database = Postgres>,
        name: &str,
    ) -> Result<Tag, DbError> {
        Ok(
            sqlx::query_as::<_, Tag>("INSERT INTO tag (name) VALUES ($1) RETURNING id, name")
                .bind(name)
                .fetch_one(executor)
                .await?,
        )
    }

    /// Renames a tag. Returns `None` when the tag doesn't exist.
    pub async fn rename(
        executor: impl Executor<'_, Database = Postgres>,
        tag_id: i32,
        name: &str,
    ) -> Result<Option<Tag>, DbError> {
        Ok(
            sqlx::query_as::<_, Tag>("UPDATE tag SET name = $1 WHERE id = $2 RETURNING id, name")
                .bind(name)
                .bind(tag_id)
                .fetch_optional(executor)
                .await?,
        )
    }

    pub async fn find_by_id(
        executor: impl Executor<'_, Database = Postgres>,
        tag_id: i32,
    ) -> Result<Option<Tag>, DbError> {
        Ok(
            sqlx::query_as::<_, Tag>("SELECT id, name FROM tag WHERE id = $1")
                .bind(tag_id)
                .fetch_optional(executor)
                .await?,
        )
    }

    pub async fn list(executor: impl Executor<'_, Database = Postgres>) -> Result<Vec<Tag>, DbError> {
        Ok(
            sqlx::query_as::<_, Tag>("SELECT id, name FROM tag ORDER BY id")
                .fetch_all(executor)
                .await?,
        )
    }

    /// Deletes a tag, detaching it from every photo. Returns whether a row was removed.
    pub async fn delete(
        executor: impl Executor<'_, Database = Postgres>,
        tag_id: i32,
    ) -> Result<bool, DbError> {
        let result = sqlx::query("DELETE FROM tag WHERE id = $1")
            .bind(tag_id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
