use crate::api::tags::error::TagError;
use crate::api::tags::interfaces::TagPayload;
use crate::api::validation::{FieldErrors, WriteMode};
use crate::database::tag::Tag;
use crate::database::tag_store::TagStore;
use sqlx::PgPool;
use tracing::instrument;
use validator::Validate;

fn validate_payload(payload: &TagPayload, mode: WriteMode) -> Result<(), FieldErrors> {
    let mut errors = payload
        .validate()
        .err()
        .map(FieldErrors::from)
        .unwrap_or_default();
    if mode.requires_all() {
        errors.require("name", payload.name.as_ref());
    }
    errors.into_result()
}

pub async fn list_tags(pool: &PgPool) -> Result<Vec<Tag>, TagError> {
    Ok(TagStore::list(pool).await?)
}

pub async fn get_tag(pool: &PgPool, tag_id: i32) -> Result<Tag, TagError> {
    TagStore::find_by_id(pool, tag_id)
        .await?
        .ok_or(TagError::NotFound(tag_id))
}

/// Creates a tag.
///
/// # Errors
///
/// * `TagError::Validation` when the name is missing, invalid or already taken.
#[instrument(skip(pool))]
pub async fn create_tag(pool: &PgPool, payload: TagPayload) -> Result<Tag, TagError> {
    let payload = payload.trimmed();
    validate_payload(&payload, WriteMode::Replace)?;
    Ok(TagStore::create(pool, payload.name.as_deref().unwrap_or_default()).await?)
}

/// Renames a tag. A partial update without a name leaves the tag as it is.
#[instrument(skip(pool))]
pub async fn update_tag(
    pool: &PgPool,
    tag_id: i32,
    payload: TagPayload,
    mode: WriteMode,
) -> Result<Tag, TagError> {
    let existing = get_tag(pool, tag_id).await?;
    let payload = payload.trimmed();
    validate_payload(&payload, mode)?;

    match payload.name {
        Some(name) => TagStore::rename(pool, tag_id, &name)
            .await?
            .ok_or(TagError::NotFound(tag_id)),
        None => Ok(existing),
    }
}

/// Deletes a tag, detaching it from every photo.
#[instrument(skip(pool))]
pub async fn delete_tag(pool: &PgPool, tag_id: i32) -> Result<(), TagError> {
    if TagStore::delete(pool, tag_id).await? {
        Ok(())
    } else {
        Err(TagError::NotFound(tag_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::tags::error::TAG_NAME_TAKEN;
    use crate::database::DbError;

    #[test]
    fn name_rules() {
        assert!(validate_payload(&TagPayload::default(), WriteMode::Replace).is_err());
        assert!(validate_payload(&TagPayload::default(), WriteMode::Partial).is_ok());

        let long = TagPayload {
            name: Some("n".repeat(51)),
        };
        assert!(validate_payload(&long, WriteMode::Partial).is_err());

        let ok = TagPayload {
            name: Some("vacation".to_owned()),
        };
        assert!(validate_payload(&ok, WriteMode::Replace).is_ok());
    }

    #[test]
    fn names_are_trimmed_before_validation() {
        let padded = TagPayload {
            name: Some(format!("  {}\t", "n".repeat(50))),
        };
        assert!(validate_payload(&padded, WriteMode::Replace).is_err());

        let trimmed = padded.trimmed();
        assert_eq!(trimmed.name.as_deref(), Some("n".repeat(50).as_str()));
        assert!(validate_payload(&trimmed, WriteMode::Replace).is_ok());

        let spaces = TagPayload {
            name: Some("   ".to_owned()),
        }
        .trimmed();
        assert!(validate_payload(&spaces, WriteMode::Replace).is_err());
    }

    #[test]
    fn unique_violation_becomes_name_error() {
        let err = TagError::from(DbError::UniqueViolation(sqlx::Error::RowNotFound));
        let TagError::Validation(errors) = err else {
            panic!("expected a validation error");
        };
        assert_eq!(errors.get("name"), Some([TAG_NAME_TAKEN.to_owned()].as_slice()));
    }
}
