use crate::api_state::ApiContext;
use crate::users::handlers::{
    delete_me, get_me, get_user_handler, list_users_handler, update_profile_handler,
    upload_profile_image,
};
use axum::extract::DefaultBodyLimit;
use axum::{
    Router,
    routing::{get, put},
};

pub fn users_protected_router(max_upload_bytes: usize) -> Router<ApiContext> {
    Router::new()
        .route("/users", get(list_users_handler))
        .route("/users/me", get(get_me).delete(delete_me))
        .route("/users/update_profile", put(update_profile_handler))
        .route(
            "/users/profile_image",
            put(upload_profile_image).layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .route("/users/{user_id}", get(get_user_handler))
}
