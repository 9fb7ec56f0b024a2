use crate::runner::context::test_context::TestContext;
use crate::test_constants::{MISSING_ID, OTHER_USERNAME, USERNAME};
use crate::test_helpers::{
    create_album, create_tag, ensure_user, expect_status, login, png_part, upload_photo,
};
use color_eyre::Result;
use common_services::api::album::interfaces::AlbumResponse;
use common_services::api::photos::interfaces::PhotoResponse;
use common_services::api::validation::REQUIRED;
use reqwest::StatusCode;
use reqwest::multipart::Form;
use serde_json::{Value, json};

fn tag_names(photo: &PhotoResponse) -> Vec<&str> {
    photo.tags.iter().map(|t| t.name.as_str()).collect()
}

pub async fn test_photo_upload_with_tags(context: &TestContext) -> Result<()> {
    // ARRANGE
    let token = login(context).await?;
    let album = create_album(context, &token, "Holiday").await?;
    let beach = create_tag(context, &token, "beach").await?;

    // ACT: unknown tag ids are skipped
    let response = upload_photo(context, &token, album.id, "Shoreline", &[beach.id, MISSING_ID]).await?;
    let photo: PhotoResponse = expect_status(response, StatusCode::CREATED).await?.json().await?;

    let album_after: AlbumResponse = context
        .http_client
        .get(context.url(&format!("/albums/{}", album.id)))
        .bearer_auth(&token)
        .send()
        .await?
        .json()
        .await?;

    // ASSERT
    assert_eq!(photo.title, "Shoreline");
    assert_eq!(photo.album, album.id);
    assert_eq!(photo.owner.username, USERNAME);
    assert_eq!(tag_names(&photo), vec!["beach"]);
    let prefix = format!("{}/media/photos/", context.settings.api.public_url);
    assert!(photo.image.starts_with(&prefix), "unexpected url {}", photo.image);

    let served = context.http_client.get(&photo.image).send().await?;
    assert_eq!(served.status(), StatusCode::OK);

    assert_eq!(album_after.photos.len(), 1);
    assert_eq!(album_after.photos[0].id, photo.id);

    Ok(())
}

pub async fn test_photo_validation(context: &TestContext) -> Result<()> {
    // ARRANGE
    let token = login(context).await?;
    let other = ensure_user(context, OTHER_USERNAME).await?;
    let foreign_album = create_album(context, &other.access, "Not yours").await?;

    // ACT: nothing sent
    let empty = context
        .http_client
        .post(context.url("/photos"))
        .bearer_auth(&token)
        .multipart(Form::new().text("description", "no title"))
        .send()
        .await?;
    let empty_status = empty.status();
    let empty_errors: Value = empty.json().await?;

    // ACT: someone else's album
    let foreign = upload_photo(context, &token, foreign_album.id, "Sneaky", &[]).await?;
    let foreign_status = foreign.status();
    let foreign_errors: Value = foreign.json().await?;

    // ACT: not an image
    let own_album = create_album(context, &token, "Validation").await?;
    let not_image = context
        .http_client
        .post(context.url("/photos"))
        .bearer_auth(&token)
        .multipart(
            Form::new()
                .text("title", "Text file")
                .text("album", own_album.id.to_string())
                .part("image", reqwest::multipart::Part::bytes(b"plain text".to_vec()).file_name("notes.txt")),
        )
        .send()
        .await?;
    let not_image_status = not_image.status();
    let not_image_errors: Value = not_image.json().await?;

    // ASSERT
    assert_eq!(empty_status, StatusCode::BAD_REQUEST);
    for field in ["title", "album", "image"] {
        assert_eq!(empty_errors[field], json!([REQUIRED]), "{field}");
    }
    assert_eq!(foreign_status, StatusCode::BAD_REQUEST);
    assert_eq!(
        foreign_errors["album"],
        json!([format!("Invalid pk \"{}\" - object does not exist.", foreign_album.id)])
    );
    assert_eq!(not_image_status, StatusCode::BAD_REQUEST);
    assert!(not_image_errors["image"].is_array());

    Ok(())
}

pub async fn test_photo_updates(context: &TestContext) -> Result<()> {
    // ARRANGE
    let token = login(context).await?;
    let album = create_album(context, &token, "Evenings").await?;
    let second_album = create_album(context, &token, "Best of").await?;
    let sunset = create_tag(context, &token, "sunset").await?;
    let city = create_tag(context, &token, "city").await?;
    let created: PhotoResponse = expect_status(
        upload_photo(context, &token, album.id, "Skyline", &[sunset.id]).await?,
        StatusCode::CREATED,
    )
    .await?
    .json()
    .await?;
    let photo_url = context.url(&format!("/photos/{}", created.id));

    // ACT: partial update leaves the tags alone
    let retitled: PhotoResponse = expect_status(
        context
            .http_client
            .patch(&photo_url)
            .bearer_auth(&token)
            .json(&json!({ "title": "Skyline at dusk" }))
            .send()
            .await?,
        StatusCode::OK,
    )
    .await?
    .json()
    .await?;

    // ACT: tag_ids replaces the tag set, album moves
    let retagged: PhotoResponse = expect_status(
        context
            .http_client
            .patch(&photo_url)
            .bearer_auth(&token)
            .json(&json!({ "tag_ids": [city.id], "album": second_album.id }))
            .send()
            .await?,
        StatusCode::OK,
    )
    .await?
    .json()
    .await?;

    // ACT: a full update needs a new image
    let without_image = context
        .http_client
        .put(&photo_url)
        .bearer_auth(&token)
        .json(&json!({ "title": "Replaced", "album": album.id }))
        .send()
        .await?;
    let without_image_status = without_image.status();
    let without_image_errors: Value = without_image.json().await?;

    let replaced: PhotoResponse = expect_status(
        context
            .http_client
            .put(&photo_url)
            .bearer_auth(&token)
            .multipart(
                Form::new()
                    .text("title", "Replaced")
                    .text("album", album.id.to_string())
                    .text("tag_ids", "")
                    .part("image", png_part()?),
            )
            .send()
            .await?,
        StatusCode::OK,
    )
    .await?
    .json()
    .await?;

    // ASSERT
    assert_eq!(retitled.title, "Skyline at dusk");
    assert_eq!(tag_names(&retitled), vec!["sunset"]);
    assert_eq!(retagged.title, "Skyline at dusk");
    assert_eq!(retagged.album, second_album.id);
    assert_eq!(tag_names(&retagged), vec!["city"]);
    assert_eq!(without_image_status, StatusCode::BAD_REQUEST);
    assert_eq!(without_image_errors["image"], json!([REQUIRED]));
    assert_eq!(replaced.title, "Replaced");
    assert_eq!(replaced.album, album.id);
    assert!(replaced.tags.is_empty());
    assert_ne!(replaced.image, created.image);

    let old_image = context.http_client.get(&created.image).send().await?;
    assert_eq!(old_image.status(), StatusCode::NOT_FOUND);

    Ok(())
}

pub async fn test_search_by_tags(context: &TestContext) -> Result<()> {
    // ARRANGE
    let token = login(context).await?;
    let other = ensure_user(context, OTHER_USERNAME).await?;
    let hiking = create_tag(context, &token, "hiking").await?;
    let snow = create_tag(context, &token, "snow").await?;
    let unused = create_tag(context, &token, "unused").await?;

    let album = create_album(context, &token, "Winter").await?;
    let both: PhotoResponse = expect_status(
        upload_photo(context, &token, album.id, "Summit", &[hiking.id, snow.id]).await?,
        StatusCode::CREATED,
    )
    .await?
    .json()
    .await?;
    let other_album = create_album(context, &other.access, "Trails").await?;
    let theirs: PhotoResponse = expect_status(
        upload_photo(context, &other.access, other_album.id, "Trailhead", &[hiking.id]).await?,
        StatusCode::CREATED,
    )
    .await?
    .json()
    .await?;

    let search_url = context.url("/photos/search_by_tags");

    // ACT
    let found: Vec<PhotoResponse> = expect_status(
        context
            .http_client
            .get(&search_url)
            .bearer_auth(&token)
            .query(&[("tags", "hiking"), ("tags", "snow")])
            .send()
            .await?,
        StatusCode::OK,
    )
    .await?
    .json()
    .await?;

    let none_matching: Vec<PhotoResponse> = context
        .http_client
        .get(&search_url)
        .bearer_auth(&token)
        .query(&[("tags", unused.name.as_str())])
        .send()
        .await?
        .json()
        .await?;

    let no_tags: Vec<PhotoResponse> = context
        .http_client
        .get(&search_url)
        .bearer_auth(&token)
        .send()
        .await?
        .json()
        .await?;

    // ASSERT
    let ids: Vec<i32> = found.iter().map(|p| p.id).collect();
    assert_eq!(ids.iter().filter(|id| **id == both.id).count(), 1);
    if context.settings.constants.search.owner_scoped_tag_search {
        assert!(!ids.contains(&theirs.id));
    } else {
        assert!(ids.contains(&theirs.id));
    }
    assert!(none_matching.is_empty());
    assert!(no_tags.is_empty());

    Ok(())
}

pub async fn test_photo_isolation(context: &TestContext) -> Result<()> {
    // ARRANGE
    let token = login(context).await?;
    let other = ensure_user(context, OTHER_USERNAME).await?;
    let album = create_album(context, &token, "Family").await?;
    let photo: PhotoResponse = expect_status(
        upload_photo(context, &token, album.id, "Dinner", &[]).await?,
        StatusCode::CREATED,
    )
    .await?
    .json()
    .await?;
    let photo_url = context.url(&format!("/photos/{}", photo.id));

    // ACT
    let get = context.http_client.get(&photo_url).bearer_auth(&other.access).send().await?;
    let patch = context
        .http_client
        .patch(&photo_url)
        .bearer_auth(&other.access)
        .json(&json!({ "title": "Mine now" }))
        .send()
        .await?;
    let delete = context.http_client.delete(&photo_url).bearer_auth(&other.access).send().await?;
    let listed: Vec<PhotoResponse> = context
        .http_client
        .get(context.url("/photos"))
        .bearer_auth(&other.access)
        .send()
        .await?
        .json()
        .await?;

    // ASSERT
    assert_eq!(get.status(), StatusCode::NOT_FOUND);
    assert_eq!(patch.status(), StatusCode::NOT_FOUND);
    assert_eq!(delete.status(), StatusCode::NOT_FOUND);
    assert!(listed.iter().all(|p| p.owner.username == OTHER_USERNAME));

    let own = context.http_client.get(&photo_url).bearer_auth(&token).send().await?;
    assert_eq!(own.status(), StatusCode::OK);

    Ok(())
}

pub async fn test_album_delete_cascades_to_photos(context: &TestContext) -> Result<()> {
    // ARRANGE
    let token = login(context).await?;
    let album = create_album(context, &token, "Temporary").await?;
    let photo: PhotoResponse = expect_status(
        upload_photo(context, &token, album.id, "Ephemeral", &[]).await?,
        StatusCode::CREATED,
    )
    .await?
    .json()
    .await?;

    // ACT
    let deleted = context
        .http_client
        .delete(context.url(&format!("/albums/{}", album.id)))
        .bearer_auth(&token)
        .send()
        .await?;
    let photo_after = context
        .http_client
        .get(context.url(&format!("/photos/{}", photo.id)))
        .bearer_auth(&token)
        .send()
        .await?;
    let image_after = context.http_client.get(&photo.image).send().await?;

    // ASSERT
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);
    assert_eq!(photo_after.status(), StatusCode::NOT_FOUND);
    assert_eq!(image_after.status(), StatusCode::NOT_FOUND);

    Ok(())
}
