use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::{category, location, post, user};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PostAuthorResponse {
    pub username: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PostCategoryResponse {
    pub slug: String,
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PostLocationResponse {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PostResponse {
    pub slug: String,
    pub title: String,
    pub text: String,
    pub pub_date: DateTime<Utc>,
    pub image: Option<String>,
    pub author: PostAuthorResponse,
    pub category: Option<PostCategoryResponse>,
    pub location: Option<PostLocationResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PostResponse {
    pub fn from_parts(
        model: post::Model,
        author: user::Model,
        category: Option<category::Model>,
        location: Option<location::Model>,
    ) -> Self {
        PostResponse {
            slug: model.slug,
            title: model.title,
            text: model.text,
            pub_date: model.pub_date,
            image: model.image,
            author: PostAuthorResponse { username: author.username },
            category: category.map(|c| PostCategoryResponse { slug: c.slug, title: c.title }),
            location: location.map(|l| PostLocationResponse { name: l.name }),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaginationMeta {
    pub page: u64,
    pub per_page: u64,
    pub total_items: u64,
    pub total_pages: u64,
    pub has_next: bool,
    pub has_previous: bool,
}

impl PaginationMeta {
    pub fn new(page: u64, per_page: u64, total_items: u64, total_pages: u64) -> Self {
        PaginationMeta {
            page,
            per_page,
            total_items,
            total_pages,
            has_next: page < total_pages,
            has_previous: page > 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PostPage {
    pub data: Vec<PostResponse>,
    pub meta: PaginationMeta,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryResponse {
    pub slug: String,
    pub title: String,
    pub description: String,
}

impl From<category::Model> for CategoryResponse {
    fn from(model: category::Model) -> Self {
        CategoryResponse {
            slug: model.slug,
            title: model.title,
            description: model.description,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryPostsResponse {
    pub category: CategoryResponse,
    pub data: Vec<PostResponse>,
    pub meta: PaginationMeta,
}

/// Raw `?page=` value. Kept as text so a malformed page is a 404, not a 400.
#[derive(Debug, Deserialize, Default)]
pub struct PageParams {
    pub page: Option<String>,
}
