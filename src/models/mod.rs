pub mod admin_model;
pub mod auth_model;
pub mod post_model;
