use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::admin::registry::RegisteredModel;
use crate::entities::post::PostStatus;
use crate::models::post_model::PaginationMeta;

/// Tells "field absent" (`None`) apart from "field set to null" (`Some(None)`).
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn default_true() -> bool {
    true
}

// --- Categories ---

#[derive(Deserialize, Validate)]
pub struct CreateCategoryRequest {
    #[serde(default)]
    #[validate(custom(function = "crate::utils::validator_utils::validate_required"))]
    #[validate(length(max = 256, message = "Title must be at most 256 characters"))]
    pub title: String,

    pub description: Option<String>,

    #[validate(custom(function = "crate::utils::validator_utils::validate_slug"))]
    #[validate(length(max = 64, message = "Slug must be at most 64 characters"))]
    pub slug: Option<String>,

    #[serde(default = "default_true")]
    pub is_published: bool,
}

#[derive(Deserialize, Validate)]
pub struct UpdateCategoryRequest {
    #[validate(custom(function = "crate::utils::validator_utils::validate_required"))]
    #[validate(length(max = 256, message = "Title must be at most 256 characters"))]
    pub title: Option<String>,
    pub description: Option<String>,
    #[validate(custom(function = "crate::utils::validator_utils::validate_slug"))]
    #[validate(length(max = 64, message = "Slug must be at most 64 characters"))]
    pub slug: Option<String>,
    pub is_published: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct AdminCategoryResponse {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// --- Locations ---

#[derive(Deserialize, Validate)]
pub struct CreateLocationRequest {
    #[serde(default)]
    #[validate(custom(function = "crate::utils::validator_utils::validate_required"))]
    #[validate(length(max = 256, message = "Name must be at most 256 characters"))]
    pub name: String,

    #[serde(default = "default_true")]
    pub is_published: bool,
}

#[derive(Deserialize, Validate)]
pub struct UpdateLocationRequest {
    #[validate(custom(function = "crate::utils::validator_utils::validate_required"))]
    #[validate(length(max = 256, message = "Name must be at most 256 characters"))]
    pub name: Option<String>,
    pub is_published: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct AdminLocationResponse {
    pub id: i64,
    pub name: String,
    pub is_published: bool,
    pub posts_count: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// --- Posts ---

#[derive(Deserialize, Validate)]
pub struct CreatePostRequest {
    #[serde(default)]
    #[validate(custom(function = "crate::utils::validator_utils::validate_required"))]
    #[validate(length(max = 256, message = "Title must be at most 256 characters"))]
    pub title: String,

    #[serde(default)]
    #[validate(custom(function = "crate::utils::validator_utils::validate_required"))]
    pub text: String,

    #[validate(custom(function = "crate::utils::validator_utils::validate_slug"))]
    #[validate(length(max = 256, message = "Slug must be at most 256 characters"))]
    pub slug: Option<String>,

    /// Defaults to now. A future date schedules the post.
    pub pub_date: Option<DateTime<Utc>>,

    pub category_id: Option<i64>,
    pub location_id: Option<i64>,

    #[serde(default = "default_true")]
    pub is_published: bool,

    pub image: Option<String>,
}

#[derive(Deserialize, Validate)]
pub struct UpdatePostRequest {
    #[validate(custom(function = "crate::utils::validator_utils::validate_required"))]
    #[validate(length(max = 256, message = "Title must be at most 256 characters"))]
    pub title: Option<String>,
    #[validate(custom(function = "crate::utils::validator_utils::validate_required"))]
    pub text: Option<String>,
    #[validate(custom(function = "crate::utils::validator_utils::validate_slug"))]
    #[validate(length(max = 256, message = "Slug must be at most 256 characters"))]
    pub slug: Option<String>,
    pub pub_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "double_option")]
    pub category_id: Option<Option<i64>>,
    #[serde(default, deserialize_with = "double_option")]
    pub location_id: Option<Option<i64>>,
    pub is_published: Option<bool>,
    #[serde(default, deserialize_with = "double_option")]
    pub image: Option<Option<String>>,
}

#[derive(Debug, Serialize)]
pub struct StatusBadge {
    pub status: PostStatus,
    pub label: &'static str,
    pub color: &'static str,
}

impl From<PostStatus> for StatusBadge {
    fn from(status: PostStatus) -> Self {
        StatusBadge {
            status,
            label: status.label(),
            color: status.color(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AdminAuthorResponse {
    pub id: Uuid,
    pub username: String,
}

#[derive(Debug, Serialize)]
pub struct AdminPostCategory {
    pub id: i64,
    pub title: String,
    pub slug: String,
}

#[derive(Debug, Serialize)]
pub struct AdminPostLocation {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct AdminPostResponse {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub text: String,
    pub pub_date: DateTime<Utc>,
    pub is_published: bool,
    pub image: Option<String>,
    pub author: AdminAuthorResponse,
    pub category: Option<AdminPostCategory>,
    pub location: Option<AdminPostLocation>,
    pub status_badge: StatusBadge,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// --- Users ---

#[derive(Deserialize, Validate)]
pub struct CreateUserRequest {
    #[serde(default)]
    #[validate(custom(function = "crate::utils::validator_utils::validate_required"))]
    #[validate(length(min = 3, max = 150, message = "Username must be 3 to 150 characters"))]
    pub username: String,

    #[serde(default)]
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,

    #[serde(default)]
    pub is_staff: bool,
    #[serde(default)]
    pub is_superuser: bool,
}

#[derive(Debug, Serialize)]
pub struct AdminUserResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub created_at: DateTime<Utc>,
}

// --- Listing ---

#[derive(Deserialize, Default)]
pub struct AdminListParams {
    pub page: Option<u64>,
    pub search: Option<String>,
    pub is_published: Option<bool>,
    /// Category slug (posts only)
    pub category: Option<String>,
    /// Location id (posts only)
    pub location: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct AdminListResponse<T> {
    pub data: Vec<T>,
    pub meta: PaginationMeta,
}

#[derive(Debug, Serialize)]
pub struct AdminIndexResponse {
    pub site_header: &'static str,
    pub site_title: &'static str,
    pub index_title: &'static str,
    pub models: Vec<RegisteredModel>,
}
