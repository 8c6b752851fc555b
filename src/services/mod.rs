pub mod auth_service;
pub mod cache_service;
pub mod category_service;
pub mod location_service;
pub mod page_service;
pub mod post_service;
pub mod redis_service;
