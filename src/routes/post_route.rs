use axum::{routing::get, Router};
use crate::config::AppState;
use crate::handlers::post_handler::*;

pub fn post_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_posts_handler))
        .route("/posts/{slug}", get(get_post_handler))
        .route("/posts/{slug}/", get(get_post_handler))
        .route("/category/{slug}", get(category_posts_handler))
        .route("/category/{slug}/", get(category_posts_handler))
}
