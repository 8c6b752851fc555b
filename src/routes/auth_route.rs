use axum::{routing::post, Router};
use crate::config::AppState;
use crate::handlers::auth_handler::*;

// Sign-in sits outside the staff guard
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/login", post(admin_login_handler))
        .route("/admin/login/", post(admin_login_handler))
}
