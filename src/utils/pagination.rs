use axum::http::StatusCode;
use sea_orm::{ConnectionTrait, EntityTrait, FromQueryResult, ItemsAndPagesNumber, PaginatorTrait, Select};

use crate::models::post_model::PaginationMeta;
use crate::utils::api_response::ServiceError;
use crate::utils::db_utils::map_db_err;

fn page_not_found() -> ServiceError {
    (StatusCode::NOT_FOUND, "PAGE_NOT_FOUND", "Invalid page".to_string())
}

/// `?page=` is optional and defaults to 1. Anything but a positive integer is a 404.
pub fn parse_page(raw: Option<&str>) -> Result<u64, ServiceError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(1),
        Some(value) => match value.parse::<u64>() {
            Ok(page) if page >= 1 => Ok(page),
            _ => Err(page_not_found()),
        },
    }
}

/// Fetches one page of `select`. Page 1 of an empty result is valid;
/// any page past the last one is a 404.
pub async fn fetch_page<'db, E, C>(
    db: &'db C,
    select: Select<E>,
    page: u64,
    per_page: u64,
) -> Result<(Vec<E::Model>, PaginationMeta), ServiceError>
where
    E: EntityTrait,
    E::Model: FromQueryResult + Sized + Send + Sync + 'db,
    C: ConnectionTrait,
{
    let paginator = select.paginate(db, per_page);
    let ItemsAndPagesNumber { number_of_items, number_of_pages } = paginator
        .num_items_and_pages()
        .await
        .map_err(|e| map_db_err(e, "Count"))?;

    let total_pages = number_of_pages.max(1);
    if page > total_pages {
        return Err(page_not_found());
    }

    let items = paginator
        .fetch_page(page - 1)
        .await
        .map_err(|e| map_db_err(e, "Fetch page"))?;

    Ok((items, PaginationMeta::new(page, per_page, number_of_items, total_pages)))
}
