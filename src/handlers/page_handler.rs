use axum::response::IntoResponse;
use crate::services::page_service::PageService;
use crate::utils::api_response::ResponseBuilder;

fn page(slug: &str) -> axum::response::Response {
    match PageService::get(slug) {
        Ok(page) => ResponseBuilder::success("PAGE_FETCHED", page.title, page).into_response(),
        Err(err) => ResponseBuilder::from_error(err).into_response(),
    }
}

pub async fn about_handler() -> impl IntoResponse {
    page("about")
}

pub async fn rules_handler() -> impl IntoResponse {
    page("rules")
}
