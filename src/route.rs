use std::sync::Arc;

use axum::{
    routing::{any, get},
    Router,
};

use crate::{
    handler::{create_post_handler, health_checker_handler, post_item_handler, post_list_handler},
    AppState,
};

/// `/posts/{*token}` takes every method and any number of segments so that
/// id parsing happens before method dispatch. Unsupported methods on the
/// collection get axum's default 405.
pub fn create_router(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_checker_handler))
        .route("/posts", get(post_list_handler).post(create_post_handler))
        .route("/posts/", get(post_list_handler).post(create_post_handler))
        .route("/posts/{*token}", any(post_item_handler))
        .with_state(app_state)
}
