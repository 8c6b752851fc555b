use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use sea_orm::*;

use crate::entities::{category, location, post, post::Entity as Post, user};
use crate::models::admin_model::*;
use crate::models::auth_model::CurrentUser;
use crate::models::post_model::*;
use crate::services::cache_service::{self, CacheService};
use crate::utils::api_response::ServiceError;
use crate::utils::db_utils::{icontains, map_db_err};
use crate::utils::pagination::{fetch_page, parse_page};
use crate::utils::slug_utils::unique_slug;

pub const ADMIN_PAGE_SIZE: u64 = 100;
const POST_SLUG_MAX_LEN: usize = 256;

pub struct PostService;

/// A post with its author, category and location already resolved.
pub struct PostWithRelated {
    pub post: post::Model,
    pub author: user::Model,
    pub category: Option<category::Model>,
    pub location: Option<location::Model>,
}

impl PostService {
    /// Eligible posts, newest first, ties broken by creation time.
    pub fn published_ordered(now: DateTime<Utc>) -> Select<Post> {
        Post::find_published(now)
            .order_by_desc(post::Column::PubDate)
            .order_by_desc(post::Column::CreatedAt)
    }

    /// Eligible posts with their relations loaded in batch. One query per
    /// relation regardless of how many posts come back.
    pub async fn published_with_related<C: ConnectionTrait>(
        db: &C,
        now: DateTime<Utc>,
    ) -> Result<Vec<PostWithRelated>, ServiceError> {
        let posts = Self::published_ordered(now)
            .all(db)
            .await
            .map_err(|e| map_db_err(e, "Fetch posts"))?;
        Self::load_related(db, posts).await
    }

    pub async fn load_related<C: ConnectionTrait>(
        db: &C,
        posts: Vec<post::Model>,
    ) -> Result<Vec<PostWithRelated>, ServiceError> {
        let authors = posts.load_one(user::Entity, db).await
            .map_err(|e| map_db_err(e, "Load authors"))?;
        let categories = posts.load_one(category::Entity, db).await
            .map_err(|e| map_db_err(e, "Load categories"))?;
        let locations = posts.load_one(location::Entity, db).await
            .map_err(|e| map_db_err(e, "Load locations"))?;

        Ok(posts
            .into_iter()
            .zip(authors)
            .zip(categories)
            .zip(locations)
            // author_id is NOT NULL with a cascading FK, so every post has one
            .filter_map(|(((post, author), category), location)| {
                author.map(|author| PostWithRelated { post, author, category, location })
            })
            .collect())
    }

    // --- Public feed ---

    pub async fn feed_page(
        db: &DatabaseConnection,
        cache: &CacheService,
        now: DateTime<Utc>,
        raw_page: Option<&str>,
        per_page: u64,
    ) -> Result<PostPage, ServiceError> {
        let page = parse_page(raw_page)?;
        let cache_key = cache_service::feed_page_key(page);

        if let Some(cached) = cache.get::<PostPage>(&cache_key).await {
            return Ok(cached);
        }

        let (posts, meta) = fetch_page(db, Self::published_ordered(now), page, per_page).await?;
        let data = Self::to_public(db, posts).await?;
        let result = PostPage { data, meta };

        cache.set(&cache_key, &result, cache_service::FEED_PAGE_TTL_SECS).await;
        Ok(result)
    }

    pub async fn category_page(
        db: &DatabaseConnection,
        cache: &CacheService,
        now: DateTime<Utc>,
        category_slug: &str,
        raw_page: Option<&str>,
        per_page: u64,
    ) -> Result<CategoryPostsResponse, ServiceError> {
        // The category itself is always checked against storage
        let category = category::Entity::find_published()
            .filter(category::Column::Slug.eq(category_slug))
            .one(db)
            .await
            .map_err(|e| map_db_err(e, "Fetch category"))?
            .ok_or((StatusCode::NOT_FOUND, "CATEGORY_NOT_FOUND", "Category not found".to_string()))?;

        let page = parse_page(raw_page)?;
        let cache_key = cache_service::category_page_key(&category.slug, page);

        if let Some(cached) = cache.get::<CategoryPostsResponse>(&cache_key).await {
            return Ok(cached);
        }

        let select = Self::published_ordered(now).filter(post::Column::CategoryId.eq(category.id));
        let (posts, meta) = fetch_page(db, select, page, per_page).await?;
        let data = Self::to_public(db, posts).await?;
        let result = CategoryPostsResponse {
            category: category.into(),
            data,
            meta,
        };

        cache.set(&cache_key, &result, cache_service::CATEGORY_PAGE_TTL_SECS).await;
        Ok(result)
    }

    pub async fn get_published(
        db: &DatabaseConnection,
        cache: &CacheService,
        now: DateTime<Utc>,
        slug: &str,
    ) -> Result<PostResponse, ServiceError> {
        let cache_key = cache_service::post_detail_key(slug);

        if let Some(cached) = cache.get::<PostResponse>(&cache_key).await {
            return Ok(cached);
        }

        let post = Self::published_ordered(now)
            .filter(post::Column::Slug.eq(slug))
            .one(db)
            .await
            .map_err(|e| map_db_err(e, "Fetch post"))?
            .ok_or((StatusCode::NOT_FOUND, "POST_NOT_FOUND", "Post not found".to_string()))?;

        let result = Self::to_public(db, vec![post])
            .await?
            .pop()
            .ok_or((StatusCode::NOT_FOUND, "POST_NOT_FOUND", "Post not found".to_string()))?;

        cache.set(&cache_key, &result, cache_service::POST_DETAIL_TTL_SECS).await;
        Ok(result)
    }

    async fn to_public<C: ConnectionTrait>(
        db: &C,
        posts: Vec<post::Model>,
    ) -> Result<Vec<PostResponse>, ServiceError> {
        Ok(Self::load_related(db, posts)
            .await?
            .into_iter()
            .map(|r| PostResponse::from_parts(r.post, r.author, r.category, r.location))
            .collect())
    }

    // --- Admin ---

    pub async fn list_admin(
        db: &DatabaseConnection,
        now: DateTime<Utc>,
        params: AdminListParams,
    ) -> Result<AdminListResponse<AdminPostResponse>, ServiceError> {
        let mut query = Post::find()
            .join(JoinType::InnerJoin, post::Relation::User.def())
            .order_by_desc(post::Column::PubDate)
            .order_by_desc(post::Column::CreatedAt);

        if let Some(is_published) = params.is_published {
            query = query.filter(post::Column::IsPublished.eq(is_published));
        }
        if let Some(location_id) = params.location {
            query = query.filter(post::Column::LocationId.eq(location_id));
        }
        if let Some(category_slug) = params.category.filter(|s| !s.trim().is_empty()) {
            query = query
                .join(JoinType::InnerJoin, post::Relation::Category.def())
                .filter(category::Column::Slug.eq(category_slug));
        }
        if let Some(search) = params.search.filter(|s| !s.trim().is_empty()) {
            query = query.filter(
                Condition::any()
                    .add(icontains(post::Column::Title, &search))
                    .add(icontains(post::Column::Text, &search))
                    .add(icontains(user::Column::Username, &search)),
            );
        }

        let (posts, meta) = fetch_page(db, query, params.page.unwrap_or(1).max(1), ADMIN_PAGE_SIZE).await?;
        let data = Self::load_related(db, posts)
            .await?
            .into_iter()
            .map(|r| Self::to_admin(r, now))
            .collect();

        Ok(AdminListResponse { data, meta })
    }

    pub async fn get_admin(
        db: &DatabaseConnection,
        now: DateTime<Utc>,
        id: i64,
    ) -> Result<AdminPostResponse, ServiceError> {
        let post = Self::find_by_id(db, id).await?;
        Self::load_related(db, vec![post])
            .await?
            .pop()
            .map(|r| Self::to_admin(r, now))
            .ok_or((StatusCode::NOT_FOUND, "POST_NOT_FOUND", "Post not found".to_string()))
    }

    /// Creates a post owned by `author`. The slug is derived from the title
    /// unless one is supplied; `pub_date` defaults to `now`.
    pub async fn create_post(
        db: &DatabaseConnection,
        author: &CurrentUser,
        now: DateTime<Utc>,
        payload: CreatePostRequest,
    ) -> Result<AdminPostResponse, ServiceError> {
        let txn = db.begin().await
            .map_err(|_| (StatusCode::INTERNAL_SERVER_ERROR, "TXN_ERR", "Transaction start failed".to_string()))?;

        let slug = match payload.slug {
            Some(s) => s,
            None => unique_slug::<Post, _>(&txn, post::Column::Slug, &payload.title, "post", POST_SLUG_MAX_LEN)
                .await
                .map_err(|e| map_db_err(e, "Slug check"))?,
        };

        let new_post = post::ActiveModel {
            id: NotSet,
            title: Set(payload.title),
            text: Set(payload.text),
            slug: Set(slug),
            pub_date: Set(payload.pub_date.unwrap_or(now)),
            author_id: Set(author.id),
            location_id: Set(payload.location_id),
            category_id: Set(payload.category_id),
            is_published: Set(payload.is_published),
            image: Set(payload.image),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let saved = new_post.insert(&txn).await
            .map_err(|e| map_db_err(e, "Create post"))?;

        txn.commit().await
            .map_err(|_| (StatusCode::INTERNAL_SERVER_ERROR, "TXN_COMMIT_ERR", "Transaction commit failed".to_string()))?;

        tracing::info!("Post '{}' created by {}", saved.slug, author.username);
        Self::get_admin(db, now, saved.id).await
    }

    /// Applies the supplied fields. A new title never changes the slug;
    /// only an explicit slug does. The author is never reassigned.
    pub async fn update_post(
        db: &DatabaseConnection,
        now: DateTime<Utc>,
        id: i64,
        payload: UpdatePostRequest,
    ) -> Result<AdminPostResponse, ServiceError> {
        let post = Self::find_by_id(db, id).await?;
        let mut active: post::ActiveModel = post.into();

        if let Some(t) = payload.title { active.title = Set(t); }
        if let Some(t) = payload.text { active.text = Set(t); }
        if let Some(s) = payload.slug { active.slug = Set(s); }
        if let Some(d) = payload.pub_date { active.pub_date = Set(d); }
        if let Some(c) = payload.category_id { active.category_id = Set(c); }
        if let Some(l) = payload.location_id { active.location_id = Set(l); }
        if let Some(p) = payload.is_published { active.is_published = Set(p); }
        if let Some(img) = payload.image { active.image = Set(img); }

        active.updated_at = Set(now);

        let updated = active.update(db).await
            .map_err(|e| map_db_err(e, "Update post"))?;

        Self::get_admin(db, now, updated.id).await
    }

    pub async fn delete_post(db: &DatabaseConnection, id: i64) -> Result<(), ServiceError> {
        let res = Post::delete_by_id(id).exec(db).await
            .map_err(|e| map_db_err(e, "Delete post"))?;

        if res.rows_affected == 0 {
            return Err((StatusCode::NOT_FOUND, "POST_NOT_FOUND", "Post not found".to_string()));
        }
        Ok(())
    }

    async fn find_by_id(db: &DatabaseConnection, id: i64) -> Result<post::Model, ServiceError> {
        Post::find_by_id(id)
            .one(db)
            .await
            .map_err(|e| map_db_err(e, "Fetch post"))?
            .ok_or((StatusCode::NOT_FOUND, "POST_NOT_FOUND", "Post not found".to_string()))
    }

    fn to_admin(related: PostWithRelated, now: DateTime<Utc>) -> AdminPostResponse {
        let PostWithRelated { post, author, category, location } = related;
        let status_badge = post.status(now).into();
        AdminPostResponse {
            id: post.id,
            title: post.title,
            slug: post.slug,
            text: post.text,
            pub_date: post.pub_date,
            is_published: post.is_published,
            image: post.image,
            author: AdminAuthorResponse {
                id: author.public_id,
                username: author.username,
            },
            category: category.map(|c| AdminPostCategory { id: c.id, title: c.title, slug: c.slug }),
            location: location.map(|l| AdminPostLocation { id: l.id, name: l.name }),
            status_badge,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}
