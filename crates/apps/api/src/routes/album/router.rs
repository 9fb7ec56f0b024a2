use crate::api_state::ApiContext;
use crate::routes::album::handlers::{
    create_album_handler, delete_album_handler, get_album_handler, list_albums_handler,
    patch_album_handler, replace_album_handler,
};
use axum::{Router, routing::get};

pub fn album_protected_router() -> Router<ApiContext> {
    Router::new()
        .route(
            "/albums",
            get(list_albums_handler).post(create_album_handler),
        )
        .route(
            "/albums/{album_id}",
            get(get_album_handler)
                .put(replace_album_handler)
                .patch(patch_album_handler)
                .delete(delete_album_handler),
        )
}
