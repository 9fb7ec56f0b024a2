#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::new_without_default
)]

#[cfg(test)]
pub mod runner;
#[cfg(test)]
pub mod test_constants;
#[cfg(test)]
pub mod test_helpers;
#[cfg(test)]
pub mod tests;

#[cfg(test)]
mod test_runner {
    use crate::runner::context::test_context::{TEST_DATABASE_URL_VAR, TestContext};
    use crate::runner::orchestration_utils::setup_tracing_and_panic_handling;
    use crate::tests::test_album::{
        test_album_isolation, test_album_lifecycle, test_album_owner_cannot_be_spoofed,
        test_update_album,
    };
    use crate::tests::test_auth::{
        test_login, test_login_with_wrong_password, test_refresh, test_register,
        test_second_register_attempt,
    };
    use crate::tests::test_photos::{
        test_album_delete_cascades_to_photos, test_photo_isolation, test_photo_updates,
        test_photo_upload_with_tags, test_photo_validation, test_search_by_tags,
    };
    use crate::tests::test_root::{test_health_endpoint, test_openapi_document};
    use crate::tests::test_tags::{
        test_duplicate_tag_name, test_tag_lifecycle, test_text_fields_are_trimmed,
    };
    use crate::tests::test_users::{
        test_delete_account_removes_owned_content, test_list_and_get_users,
        test_profile_image_upload, test_update_profile,
    };
    use crate::{execute_suite, run_test};
    use color_eyre::Result;
    use tracing::warn;

    /// End-to-end suite against a real Postgres server.
    /// Skipped unless `TEST_DATABASE_URL` is set.
    #[tokio::test]
    async fn integration_suite() -> Result<()> {
        setup_tracing_and_panic_handling();
        let Some(context) = TestContext::from_env().await? else {
            warn!("{TEST_DATABASE_URL_VAR} is not set, skipping the integration suite.");
            return Ok(());
        };

        let outcome = async {
            execute_suite!(
                &context,
                [
                    // -- Root --
                    test_health_endpoint,
                    test_openapi_document,
                    // -- Auth --
                    test_register,
                    test_second_register_attempt,
                    test_login,
                    test_login_with_wrong_password,
                    test_refresh,
                    // -- Users --
                    test_update_profile,
                    test_list_and_get_users,
                    test_profile_image_upload,
                    // -- Albums --
                    test_album_lifecycle,
                    test_update_album,
                    test_album_owner_cannot_be_spoofed,
                    test_album_isolation,
                    // -- Tags --
                    test_tag_lifecycle,
                    test_duplicate_tag_name,
                    test_text_fields_are_trimmed,
                    // -- Photos --
                    test_photo_upload_with_tags,
                    test_photo_validation,
                    test_photo_updates,
                    test_search_by_tags,
                    test_photo_isolation,
                    test_album_delete_cascades_to_photos,
                    // -- Account removal --
                    test_delete_account_removes_owned_content,
                ]
            );
            Ok::<(), color_eyre::Report>(())
        }
        .await;

        context.teardown().await;
        outcome
    }
}
