use crate::api_state::ApiContext;
use crate::tags::handlers::{
    create_tag_handler, delete_tag_handler, get_tag_handler, list_tags_handler,
    patch_tag_handler, replace_tag_handler,
};
use axum::{Router, routing::get};

pub fn tags_protected_router() -> Router<ApiContext> {
    Router::new()
        .route("/tags", get(list_tags_handler).post(create_tag_handler))
        .route(
            "/tags/{tag_id}",
            get(get_tag_handler)
                .put(replace_tag_handler)
                .patch(patch_tag_handler)
                .delete(delete_tag_handler),
        )
}
