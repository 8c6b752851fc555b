use axum::http::StatusCode;
use serde::Serialize;

use crate::utils::api_response::ServiceError;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StaticPage {
    pub slug: &'static str,
    pub title: &'static str,
    pub body: &'static str,
}

const PAGES: &[StaticPage] = &[
    StaticPage {
        slug: "about",
        title: "About the project",
        body: "Geoblog is a small travel and notes blog. Posts are grouped by \
               category and may be tagged with the place they were written.",
    },
    StaticPage {
        slug: "rules",
        title: "Our rules",
        body: "Be respectful. Stay on topic. Credit the sources and photos you use. \
               Editors may unpublish posts that break these rules.",
    },
];

pub struct PageService;

impl PageService {
    pub fn get(slug: &str) -> Result<&'static StaticPage, ServiceError> {
        PAGES
            .iter()
            .find(|p| p.slug == slug)
            .ok_or((StatusCode::NOT_FOUND, "PAGE_NOT_FOUND", "Page not found".to_string()))
    }
}
