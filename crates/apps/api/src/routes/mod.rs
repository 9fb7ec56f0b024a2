pub mod album;
mod api_doc;
pub mod auth;
pub mod json_body;
pub mod photos;
pub mod root;
pub mod tags;
pub mod users;

use crate::album::router::album_protected_router;
use crate::api_state::ApiContext;
use crate::auth::middlewares::user::ApiUser;
use crate::auth::router::auth_public_router;
use crate::photos::router::photos_protected_router;
use crate::root::handlers::{health_check, root};
use crate::routes::api_doc::ApiDoc;
use crate::tags::router::tags_protected_router;
use crate::users::router::users_protected_router;
use app_state::ApiSettings;
use axum::Router;
use axum::routing::get;
use axum::middleware::from_extractor_with_state;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

// --- Router Construction ---
pub fn create_router(api_state: ApiContext) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()))
        .merge(public_routes(&api_state.settings.api))
        .merge(protected_routes(api_state.clone()))
        .with_state(api_state)
}

fn public_routes(api_settings: &ApiSettings) -> Router<ApiContext> {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .merge(auth_public_router(&api_settings.rate_limiting))
}

fn protected_routes(api_state: ApiContext) -> Router<ApiContext> {
    let max_upload_bytes = api_state.settings.api.max_upload_bytes;
    Router::new()
        .merge(users_protected_router(max_upload_bytes))
        .merge(album_protected_router())
        .merge(photos_protected_router(max_upload_bytes))
        .merge(tags_protected_router())
        .route_layer(from_extractor_with_state::<ApiUser, ApiContext>(api_state))
}
