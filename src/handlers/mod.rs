pub mod admin_handler;
pub mod auth_handler;
pub mod page_handler;
pub mod post_handler;

use axum::{http::StatusCode, response::IntoResponse};
use chrono::Utc;
use crate::utils::api_response::ResponseBuilder;

pub async fn health_check_handler() -> impl IntoResponse {
    ResponseBuilder::success(
        "HEALTH_CHECK_SUCCESS",
        "Server is healthy",
        serde_json::json!({
            "status": "up",
            "server_time": Utc::now().to_rfc3339(),
        })
    )
}

pub async fn fallback_handler() -> impl IntoResponse {
    ResponseBuilder::error::<()>(StatusCode::NOT_FOUND, "ROUTE_NOT_FOUND", "Route not found")
}
