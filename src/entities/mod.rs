pub mod category;
pub mod location;
pub mod post;
pub mod user;
