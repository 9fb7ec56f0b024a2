use crate::routes::{album, auth, photos, root, tags, users};
use common_services::api::album::interfaces::{AlbumPayload, AlbumResponse};
use common_services::api::auth::interfaces::{
    LoginUser, RefreshTokenPayload, RegisterResponse, RegisterUser, Tokens,
};
use common_services::api::photos::interfaces::{PhotoResponse, PhotoUploadForm, PhotoWrite};
use common_services::api::tags::interfaces::TagPayload;
use common_services::api::users::interfaces::{UpdateProfile, UserResponse};
use common_services::api::validation::FieldErrors;
use common_services::database::tag::Tag;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi};

#[derive(OpenApi)]
#[openapi(
    paths(
        root::handlers::root,
        root::handlers::health_check,
        // Auth handlers
        auth::handlers::register,
        auth::handlers::obtain_token,
        auth::handlers::refresh_token,
        // User handlers
        users::handlers::get_me,
        users::handlers::update_profile_handler,
        users::handlers::list_users_handler,
        users::handlers::get_user_handler,
        users::handlers::upload_profile_image,
        users::handlers::delete_me,
        // Album handlers
        album::handlers::list_albums_handler,
        album::handlers::create_album_handler,
        album::handlers::get_album_handler,
        album::handlers::replace_album_handler,
        album::handlers::patch_album_handler,
        album::handlers::delete_album_handler,
        // Photos handlers
        photos::handlers::list_photos_handler,
        photos::handlers::create_photo_handler,
        photos::handlers::get_photo_handler,
        photos::handlers::replace_photo_handler,
        photos::handlers::patch_photo_handler,
        photos::handlers::delete_photo_handler,
        photos::handlers::search_by_tags_handler,
        // Tag handlers
        tags::handlers::list_tags_handler,
        tags::handlers::create_tag_handler,
        tags::handlers::get_tag_handler,
        tags::handlers::replace_tag_handler,
        tags::handlers::patch_tag_handler,
        tags::handlers::delete_tag_handler,
    ),
    components(
        schemas(
            RegisterUser,
            RegisterResponse,
            LoginUser,
            RefreshTokenPayload,
            Tokens,
            UserResponse,
            UpdateProfile,
            AlbumPayload,
            AlbumResponse,
            PhotoResponse,
            PhotoWrite,
            PhotoUploadForm,
            Tag,
            TagPayload,
            FieldErrors,
        ),
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Registration and token endpoints"),
        (name = "Users", description = "Profile and account endpoints"),
        (name = "Album", description = "Endpoints for managing the current user's albums"),
        (name = "Photos", description = "Endpoints for uploading, managing and searching photos"),
        (name = "Tags", description = "Shared tags"),
        (name = "System", description = "Health check"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
