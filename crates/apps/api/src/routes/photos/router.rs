use crate::api_state::ApiContext;
use crate::photos::handlers::{
    create_photo_handler, delete_photo_handler, get_photo_handler, list_photos_handler,
    patch_photo_handler, replace_photo_handler, search_by_tags_handler,
};
use axum::extract::DefaultBodyLimit;
use axum::{Router, routing::get};

pub fn photos_protected_router(max_upload_bytes: usize) -> Router<ApiContext> {
    Router::new()
        .route(
            "/photos",
            get(list_photos_handler)
                .post(create_photo_handler)
                .layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .route("/photos/search_by_tags", get(search_by_tags_handler))
        .route(
            "/photos/{photo_id}",
            get(get_photo_handler)
                .put(replace_photo_handler)
                .patch(patch_photo_handler)
                .delete(delete_photo_handler)
                .layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
}
