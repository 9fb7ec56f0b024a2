use crate::runner::context::test_context::TestContext;
use crate::test_constants::{MISSING_ID, OTHER_USERNAME, USERNAME};
use crate::test_helpers::{create_album, ensure_user, expect_status, login};
use color_eyre::Result;
use common_services::api::album::interfaces::AlbumResponse;
use common_services::api::validation::REQUIRED;
use reqwest::StatusCode;
use serde_json::{Value, json};

pub async fn test_album_lifecycle(context: &TestContext) -> Result<()> {
    // ARRANGE
    let token = login(context).await?;

    // ACT: create
    let created = create_album(context, &token, "Summer 2025").await?;
    assert_eq!(created.title, "Summer 2025");
    assert_eq!(created.description, "");
    assert_eq!(created.owner.username, USERNAME);
    assert!(created.photos.is_empty());

    // ACT: list
    let albums: Vec<AlbumResponse> = context
        .http_client
        .get(context.url("/albums"))
        .bearer_auth(&token)
        .send()
        .await?
        .json()
        .await?;
    assert!(albums.iter().any(|a| a.id == created.id));
    assert!(albums.iter().all(|a| a.owner.username == USERNAME));

    // ACT: get, with and without a trailing slash
    let album_url = context.url(&format!("/albums/{}", created.id));
    for url in [album_url.clone(), format!("{album_url}/")] {
        let response = context.http_client.get(&url).bearer_auth(&token).send().await?;
        let fetched: AlbumResponse = expect_status(response, StatusCode::OK).await?.json().await?;
        assert_eq!(fetched.id, created.id);
    }

    // ACT: delete
    let deleted = context
        .http_client
        .delete(&album_url)
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    let after = context
        .http_client
        .get(&album_url)
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(after.status(), StatusCode::NOT_FOUND);

    Ok(())
}

pub async fn test_update_album(context: &TestContext) -> Result<()> {
    // ARRANGE
    let token = login(context).await?;
    let album = create_album(context, &token, "Road trip").await?;
    let album_url = context.url(&format!("/albums/{}", album.id));

    // ACT: partial update keeps the title
    let response = context
        .http_client
        .patch(&album_url)
        .bearer_auth(&token)
        .json(&json!({ "description": "Coast to coast" }))
        .send()
        .await?;
    let patched: AlbumResponse = expect_status(response, StatusCode::OK).await?.json().await?;

    // ACT: full update without a title is rejected
    let incomplete = context
        .http_client
        .put(&album_url)
        .bearer_auth(&token)
        .json(&json!({ "description": "No title" }))
        .send()
        .await?;
    let incomplete_status = incomplete.status();
    let errors: Value = incomplete.json().await?;

    // ACT: full update
    let response = context
        .http_client
        .put(&album_url)
        .bearer_auth(&token)
        .json(&json!({ "title": "Road trip 2025" }))
        .send()
        .await?;
    let replaced: AlbumResponse = expect_status(response, StatusCode::OK).await?.json().await?;

    // ASSERT
    assert_eq!(patched.title, "Road trip");
    assert_eq!(patched.description, "Coast to coast");
    assert!(patched.updated_at >= album.updated_at);
    assert_eq!(incomplete_status, StatusCode::BAD_REQUEST);
    assert_eq!(errors["title"], json!([REQUIRED]));
    assert_eq!(replaced.title, "Road trip 2025");

    Ok(())
}

pub async fn test_album_owner_cannot_be_spoofed(context: &TestContext) -> Result<()> {
    // ARRANGE
    let token = login(context).await?;
    let other = ensure_user(context, OTHER_USERNAME).await?;
    let other_me: Value = context
        .http_client
        .get(context.url("/users/me"))
        .bearer_auth(&other.access)
        .send()
        .await?
        .json()
        .await?;

    // ACT
    let response = context
        .http_client
        .post(context.url("/albums"))
        .bearer_auth(&token)
        .json(&json!({ "title": "Mine", "owner": other_me["id"] }))
        .send()
        .await?;
    let album: AlbumResponse = expect_status(response, StatusCode::CREATED).await?.json().await?;

    // ASSERT
    assert_eq!(album.owner.username, USERNAME);

    Ok(())
}

pub async fn test_album_isolation(context: &TestContext) -> Result<()> {
    // ARRANGE
    let token = login(context).await?;
    let other = ensure_user(context, OTHER_USERNAME).await?;
    let foreign = create_album(context, &other.access, "Private").await?;
    let foreign_url = context.url(&format!("/albums/{}", foreign.id));

    // ACT
    let get = context.http_client.get(&foreign_url).bearer_auth(&token).send().await?;
    let patch = context
        .http_client
        .patch(&foreign_url)
        .bearer_auth(&token)
        .json(&json!({ "title": "Hijacked" }))
        .send()
        .await?;
    let delete = context.http_client.delete(&foreign_url).bearer_auth(&token).send().await?;
    let missing = context
        .http_client
        .get(context.url(&format!("/albums/{MISSING_ID}")))
        .bearer_auth(&token)
        .send()
        .await?;
    let albums: Vec<AlbumResponse> = context
        .http_client
        .get(context.url("/albums"))
        .bearer_auth(&token)
        .send()
        .await?
        .json()
        .await?;

    // ASSERT
    assert_eq!(get.status(), StatusCode::NOT_FOUND);
    assert_eq!(patch.status(), StatusCode::NOT_FOUND);
    assert_eq!(delete.status(), StatusCode::NOT_FOUND);
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    assert!(albums.iter().all(|a| a.id != foreign.id));

    let still_there = context
        .http_client
        .get(&foreign_url)
        .bearer_auth(&other.access)
        .send()
        .await?;
    let untouched: AlbumResponse = expect_status(still_there, StatusCode::OK).await?.json().await?;
    assert_eq!(untouched.title, "Private");

    Ok(())
}
