use crate::api::validation::FieldErrors;
use crate::database::DbError;
use crate::media::MediaError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use color_eyre::eyre;
use serde_json::json;
use thiserror::Error;
use tracing::{error, info, warn};

#[derive(Debug, Error)]
pub enum UserError {
    #[error("Database error")]
    Database(#[from] sqlx::Error),

    #[error("internal error")]
    Internal(#[from] eyre::Report),

    #[error("Not found: {0}")]
    NotFound(i32),

    #[error("Validation failed: {0}")]
    Validation(FieldErrors),
}

fn log_error(error: &UserError) {
    match error {
        UserError::Database(e) => error!("Database query failed: {}", e),
        UserError::Internal(e) => error!("Internal error: {:?}", e),
        UserError::NotFound(id) => warn!("User not found: {}", id),
        UserError::Validation(errors) => info!("User update rejected: {}", errors),
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        log_error(&self);

        let (status, error_message) = match self {
            Self::Validation(errors) => return errors.into_response(),
            Self::Database(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "A database error occurred.".to_string(),
            ),
            Self::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An unexpected internal error occurred.".to_string(),
            ),
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "Not found.".to_string()),
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

impl From<FieldErrors> for UserError {
    fn from(errors: FieldErrors) -> Self {
        Self::Validation(errors)
    }
}

impl From<DbError> for UserError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::Sqlx(e) | DbError::UniqueViolation(e) => Self::Database(e),
        }
    }
}

impl From<MediaError> for UserError {
    fn from(err: MediaError) -> Self {
        match err {
            MediaError::InvalidImage => {
                Self::Validation(FieldErrors::single("image", err.to_string()))
            }
            MediaError::Io(e) => Self::Internal(eyre::Report::new(e)),
        }
    }
}
