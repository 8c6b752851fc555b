use axum::{
    middleware,
    routing::get,
    Router,
};
use crate::config::AppState;
use crate::handlers::admin_handler::*;
use crate::middleware::jwt_middleware::staff_middleware;

pub fn admin_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/admin", get(admin_index_handler))
        .route("/admin/", get(admin_index_handler))
        .route(
            "/admin/categories",
            get(list_categories_handler).post(create_category_handler),
        )
        .route(
            "/admin/categories/{id}",
            get(get_category_handler)
                .put(update_category_handler)
                .delete(delete_category_handler),
        )
        .route(
            "/admin/locations",
            get(list_locations_handler).post(create_location_handler),
        )
        .route(
            "/admin/locations/{id}",
            get(get_location_handler)
                .put(update_location_handler)
                .delete(delete_location_handler),
        )
        .route(
            "/admin/posts",
            get(list_posts_handler).post(create_post_handler),
        )
        .route(
            "/admin/posts/{id}",
            get(get_post_handler)
                .put(update_post_handler)
                .delete(delete_post_handler),
        )
        .route(
            "/admin/users",
            get(list_users_handler).post(create_user_handler),
        )
        .route(
            "/admin/users/{id}",
            get(action_not_allowed_handler)
                .put(action_not_allowed_handler)
                .delete(delete_user_handler),
        )
        .route_layer(middleware::from_fn_with_state(state, staff_middleware))
}
