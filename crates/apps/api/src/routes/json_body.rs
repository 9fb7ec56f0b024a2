//! JSON request bodies whose rejections use the same field map as validation errors.

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use axum::response::{IntoResponse, Response};
use common_services::api::validation::{FieldErrors, NON_FIELD_ERRORS};
use http::{HeaderMap, header};
use serde::de::DeserializeOwned;
use serde_path_to_error::Segment;
use tracing::debug;

pub const UNSUPPORTED_MEDIA_TYPE: &str = "Unsupported media type, expected application/json.";

/// Like `axum::Json`, but a body that can't be read as `T` is a 400 with
/// `{"field": [...]}`, or `{"non_field_errors": [...]}` when no single field is at fault.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !has_json_content_type(req.headers()) {
            return Err(
                FieldErrors::single(NON_FIELD_ERRORS, UNSUPPORTED_MEDIA_TYPE).into_response(),
            );
        }
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(IntoResponse::into_response)?;

        parse_body(&bytes)
            .map(Self)
            .map_err(IntoResponse::into_response)
    }
}

fn has_json_content_type(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
    else {
        return false;
    };
    let essence = content_type.split(';').next().unwrap_or_default().trim();
    essence.eq_ignore_ascii_case("application/json")
        || (essence.starts_with("application/") && essence.ends_with("+json"))
}

/// Deserializes `bytes`, attributing a type error to the top-level field it happened in.
fn parse_body<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, FieldErrors> {
    let mut deserializer = serde_json::Deserializer::from_slice(bytes);
    let value = serde_path_to_error::deserialize(&mut deserializer).map_err(|e| {
        debug!("Rejected JSON body: {}", e);
        let field = match e.path().iter().next() {
            Some(Segment::Map { key }) if e.inner().is_data() => key.clone(),
            _ => NON_FIELD_ERRORS.to_owned(),
        };
        FieldErrors::single(&field, describe(e.inner()))
    })?;
    deserializer
        .end()
        .map_err(|e| FieldErrors::single(NON_FIELD_ERRORS, describe(&e)))?;
    Ok(value)
}

/// The serde message without serde_json's position suffix.
fn describe(error: &serde_json::Error) -> String {
    let message = error.to_string();
    let message = match message.rsplit_once(" at line ") {
        Some((head, _)) => head.to_owned(),
        None => message,
    };
    if error.is_syntax() || error.is_eof() {
        format!("JSON parse error: {message}.")
    } else {
        format!("Invalid value: {message}.")
    }
}
