use crate::runner::context::test_context::TestContext;
use crate::test_constants::{PASSWORD, USERNAME};
use color_eyre::Result;
use color_eyre::eyre::eyre;
use common_services::api::album::interfaces::AlbumResponse;
use common_services::api::auth::interfaces::{RegisterResponse, Tokens};
use common_services::database::tag::Tag;
use image::{ImageBuffer, ImageFormat, Rgb};
use reqwest::StatusCode;
use reqwest::multipart::{Form, Part};
use serde_json::json;
use std::io::Cursor;

/// Asserts the status of a response and returns it, printing the body on a mismatch.
pub async fn expect_status(
    response: reqwest::Response,
    expected: StatusCode,
) -> Result<reqwest::Response> {
    let status = response.status();
    if status == expected {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(eyre!("expected {expected}, got {status}: {body}"))
}

pub async fn register(context: &TestContext, username: &str) -> Result<RegisterResponse> {
    let response = context
        .http_client
        .post(context.url("/users"))
        .json(&json!({ "username": username, "password": PASSWORD }))
        .send()
        .await?;
    Ok(expect_status(response, StatusCode::CREATED)
        .await?
        .json()
        .await?)
}

pub async fn login_as(context: &TestContext, username: &str) -> Result<Tokens> {
    let response = context
        .http_client
        .post(context.url("/token"))
        .json(&json!({ "username": username, "password": PASSWORD }))
        .send()
        .await?;
    Ok(expect_status(response, StatusCode::OK).await?.json().await?)
}

/// Access token for the main test user.
pub async fn login(context: &TestContext) -> Result<String> {
    Ok(login_as(context, USERNAME).await?.access)
}

/// Logs in, registering the user first when the login is rejected.
pub async fn ensure_user(context: &TestContext, username: &str) -> Result<Tokens> {
    match login_as(context, username).await {
        Ok(tokens) => Ok(tokens),
        Err(_) => Ok(register(context, username).await?.tokens),
    }
}

pub async fn create_album(context: &TestContext, token: &str, title: &str) -> Result<AlbumResponse> {
    let response = context
        .http_client
        .post(context.url("/albums"))
        .bearer_auth(token)
        .json(&json!({ "title": title }))
        .send()
        .await?;
    Ok(expect_status(response, StatusCode::CREATED)
        .await?
        .json()
        .await?)
}

pub async fn create_tag(context: &TestContext, token: &str, name: &str) -> Result<Tag> {
    let response = context
        .http_client
        .post(context.url("/tags"))
        .bearer_auth(token)
        .json(&json!({ "name": name }))
        .send()
        .await?;
    Ok(expect_status(response, StatusCode::CREATED)
        .await?
        .json()
        .await?)
}

/// Posts a multipart photo upload and returns the raw response.
pub async fn upload_photo(
    context: &TestContext,
    token: &str,
    album_id: i32,
    title: &str,
    tag_ids: &[i32],
) -> Result<reqwest::Response> {
    let mut form = Form::new()
        .text("title", title.to_owned())
        .text("album", album_id.to_string())
        .part("image", png_part()?);
    for tag_id in tag_ids {
        form = form.text("tag_ids", tag_id.to_string());
    }

    Ok(context
        .http_client
        .post(context.url("/photos"))
        .bearer_auth(token)
        .multipart(form)
        .send()
        .await?)
}

pub fn png_bytes() -> Result<Vec<u8>> {
    let img: ImageBuffer<Rgb<u8>, Vec<u8>> = ImageBuffer::from_pixel(4, 3, Rgb([20, 140, 220]));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png)?;
    Ok(out.into_inner())
}

pub fn png_part() -> Result<Part> {
    Ok(Part::bytes(png_bytes()?)
        .file_name("pixel.png")
        .mime_str("image/png")?)
}
