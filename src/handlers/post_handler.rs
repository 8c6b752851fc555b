use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
};
use chrono::Utc;
use crate::config::AppState;
use crate::models::post_model::PageParams;
use crate::services::post_service::PostService;
use crate::utils::api_response::ResponseBuilder;

pub async fn list_posts_handler(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> impl IntoResponse {
    let now = Utc::now();
    match PostService::feed_page(&state.db, &state.cache, now, params.page.as_deref(), state.config.posts_per_page).await {
        Ok(res) => ResponseBuilder::success("POSTS_FETCHED", "Success", res).into_response(),
        Err(err) => ResponseBuilder::from_error(err).into_response(),
    }
}

pub async fn get_post_handler(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> impl IntoResponse {
    let now = Utc::now();
    match PostService::get_published(&state.db, &state.cache, now, &slug).await {
        Ok(res) => ResponseBuilder::success("POST_FETCHED", "Success", res).into_response(),
        Err(err) => ResponseBuilder::from_error(err).into_response(),
    }
}

pub async fn category_posts_handler(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(params): Query<PageParams>,
) -> impl IntoResponse {
    let now = Utc::now();
    match PostService::category_page(
        &state.db,
        &state.cache,
        now,
        &slug,
        params.page.as_deref(),
        state.config.posts_per_page,
    )
    .await
    {
        Ok(res) => ResponseBuilder::success("CATEGORY_POSTS_FETCHED", "Success", res).into_response(),
        Err(err) => ResponseBuilder::from_error(err).into_response(),
    }
}
