use crate::api::validation::FieldErrors;
use crate::database::DbError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;
use tracing::{error, info, warn};

pub const TAG_NAME_TAKEN: &str = "tag with this name already exists.";

#[derive(Debug, Error)]
pub enum TagError {
    #[error("Database error")]
    Database(#[from] sqlx::Error),

    #[error("Tag not found: {0}")]
    NotFound(i32),

    #[error("Validation failed: {0}")]
    Validation(FieldErrors),
}

fn log_error(error: &TagError) {
    match error {
        TagError::Database(e) => error!("Database query failed: {}", e),
        TagError::NotFound(id) => warn!("Tag not found: {}", id),
        TagError::Validation(errors) => info!("Tag rejected: {}", errors),
    }
}

impl IntoResponse for TagError {
    fn into_response(self) -> Response {
        log_error(&self);

        let (status, error_message) = match self {
            Self::Validation(errors) => return errors.into_response(),
            Self::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, "A database error occurred."),
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "Not found."),
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

impl From<FieldErrors> for TagError {
    fn from(errors: FieldErrors) -> Self {
        Self::Validation(errors)
    }
}

/// A unique violation can only come from the tag name.
impl From<DbError> for TagError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::UniqueViolation(_) => {
                Self::Validation(FieldErrors::single("name", TAG_NAME_TAKEN))
            }
            DbError::Sqlx(e) => Self::Database(e),
        }
    }
}
