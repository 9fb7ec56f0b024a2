//! Request body of photo create and update: a multipart form or a JSON object.

use crate::json_body::JsonBody;
use axum::extract::{FromRequest, Multipart, Request};
use axum::response::{IntoResponse, Response};
use common_services::api::photos::interfaces::{PhotoWrite, UploadedImage};
use common_services::api::validation::{FieldErrors, INVALID_INTEGER};
use http::header;

/// Parsed photo fields plus the uploaded image, if any.
#[derive(Debug, Default)]
pub struct PhotoForm {
    pub fields: PhotoWrite,
    pub image: Option<UploadedImage>,
}

impl<S> FromRequest<S> for PhotoForm
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_multipart = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("multipart/form-data"));

        if is_multipart {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(IntoResponse::into_response)?;
            read_multipart(multipart).await
        } else {
            let JsonBody(fields) = JsonBody::<PhotoWrite>::from_request(req, state).await?;
            Ok(Self {
                fields,
                image: None,
            })
        }
    }
}

async fn read_multipart(mut multipart: Multipart) -> Result<PhotoForm, Response> {
    let mut form = PhotoForm::default();
    let mut errors = FieldErrors::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(IntoResponse::into_response)?
    {
        let Some(name) = field.name().map(ToOwned::to_owned) else {
            continue;
        };
        match name.as_str() {
            "image" => {
                let bytes = field.bytes().await.map_err(IntoResponse::into_response)?;
                form.image = Some(UploadedImage {
                    bytes: bytes.to_vec(),
                });
            }
            "title" | "description" | "album" | "tag_ids" => {
                let value = field.text().await.map_err(IntoResponse::into_response)?;
                apply_text_field(&mut form.fields, &mut errors, &name, &value);
            }
            // Read-only or unknown fields such as `owner` are ignored.
            _ => {}
        }
    }

    errors.into_result().map_err(IntoResponse::into_response)?;
    Ok(form)
}

/// Applies one text part. Repeated `tag_ids` parts accumulate, and an empty
/// `tag_ids` part stands for an empty list.
fn apply_text_field(fields: &mut PhotoWrite, errors: &mut FieldErrors, name: &str, value: &str) {
    match name {
        "title" => fields.title = Some(value.to_owned()),
        "description" => fields.description = Some(value.to_owned()),
        "album" => match value.trim().parse::<i32>() {
            Ok(album) => fields.album = Some(album),
            Err(_) if value.trim().is_empty() => {}
            Err(_) => errors.add("album", INVALID_INTEGER),
        },
        "tag_ids" => {
            let tag_ids = fields.tag_ids.get_or_insert_with(Vec::new);
            let value = value.trim();
            if value.is_empty() {
                return;
            }
            match value.parse::<i32>() {
                Ok(id) => tag_ids.push(id),
                Err(_) => errors.add("tag_ids", INVALID_INTEGER),
            }
        }
        _ => {}
    }
}
