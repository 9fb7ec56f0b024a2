use crate::api::validation::FieldErrors;
use crate::database::DbError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use color_eyre::eyre;
use serde_json::json;
use thiserror::Error;
use tracing::{error, info, warn};

#[derive(Debug, Error)]
pub enum AlbumError {
    #[error("Database error")]
    Database(#[from] sqlx::Error),

    #[error("internal error")]
    Internal(#[from] eyre::Report),

    #[error("Album not found: {0}")]
    NotFound(i32),

    #[error("Validation failed: {0}")]
    Validation(FieldErrors),
}

fn log_error(error: &AlbumError) {
    match error {
        AlbumError::Database(e) => error!("Database query failed: {}", e),
        AlbumError::Internal(e) => error!("Internal error: {:?}", e),
        AlbumError::NotFound(id) => warn!("Album -> not found for caller: {}", id),
        AlbumError::Validation(errors) => info!("Album -> rejected: {}", errors),
    }
}

impl IntoResponse for AlbumError {
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

impl From<FieldErrors> for AlbumError {
    fn from(errors: FieldErrors) -> Self {
        Self::Validation(errors)
    }
}

impl From<DbError> for AlbumError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::Sqlx(e) | DbError::UniqueViolation(e) => Self::Database(e),
        }
    }
}
