use crate::config::AppState;
use crate::handlers::{fallback_handler, health_check_handler};
use crate::middleware::security::{ssl_redirect_middleware, with_security_headers};
use axum::http::Method;
use axum::{middleware, routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod admin_route;
pub mod auth_route;
pub mod page_route;
pub mod post_route;

pub fn create_routes(state: AppState) -> Router<AppState> {
    // Public pages are read-only
    let public_cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_origin(Any)
        .allow_headers(Any);

    let admin_cors = CorsLayer::new()
        // Allow `GET`, `POST`, `OPTIONS`, `PUT`, `DELETE` methods
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::OPTIONS,
            Method::PUT,
            Method::DELETE,
        ])
        .allow_origin(Any)
        .allow_headers(Any);

    let public = Router::new()
        .merge(post_route::post_routes())
        .merge(page_route::page_routes())
        // Health check
        .route("/health", get(health_check_handler))
        .layer(public_cors);

    let admin = Router::new()
        .merge(auth_route::auth_routes())
        .merge(admin_route::admin_routes(state.clone()))
        .layer(admin_cors);

    let security_headers = state.config.security_headers;
    let mut router = Router::new()
        .merge(public)
        .merge(admin)
        .fallback(fallback_handler)
        .layer(middleware::from_fn_with_state(state, ssl_redirect_middleware));

    // Outside the redirect so 301s carry the headers too
    if security_headers {
        router = with_security_headers(router);
    }

    router.layer(TraceLayer::new_for_http())
}
