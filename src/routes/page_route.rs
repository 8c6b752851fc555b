use axum::{routing::get, Router};
use crate::config::AppState;
use crate::handlers::page_handler::*;

pub fn page_routes() -> Router<AppState> {
    Router::new()
        .route("/about", get(about_handler))
        .route("/about/", get(about_handler))
        .route("/rules", get(rules_handler))
        .route("/rules/", get(rules_handler))
}
