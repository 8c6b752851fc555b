use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use sea_orm::*;

use crate::entities::{category, category::Entity as Category};
use crate::models::admin_model::*;
use crate::services::post_service::ADMIN_PAGE_SIZE;
use crate::utils::api_response::ServiceError;
use crate::utils::db_utils::{icontains, map_db_err};
use crate::utils::pagination::fetch_page;
use crate::utils::slug_utils::unique_slug;

const CATEGORY_SLUG_MAX_LEN: usize = 64;

pub struct CategoryService;

impl CategoryService {
    pub async fn list(
        db: &DatabaseConnection,
        params: AdminListParams,
    ) -> Result<AdminListResponse<AdminCategoryResponse>, ServiceError> {
        let mut query = Category::find().order_by_asc(category::Column::Title);

        if let Some(is_published) = params.is_published {
            query = query.filter(category::Column::IsPublished.eq(is_published));
        }
        if let Some(search) = params.search.filter(|s| !s.trim().is_empty()) {
            query = query.filter(
                Condition::any()
                    .add(icontains(category::Column::Title, &search))
                    .add(icontains(category::Column::Description, &search)),
            );
        }

        let (categories, meta) = fetch_page(db, query, params.page.unwrap_or(1).max(1), ADMIN_PAGE_SIZE).await?;

        Ok(AdminListResponse {
            data: categories.into_iter().map(Self::map_to_response).collect(),
            meta,
        })
    }

    pub async fn get(db: &DatabaseConnection, id: i64) -> Result<AdminCategoryResponse, ServiceError> {
        Self::find_by_id(db, id).await.map(Self::map_to_response)
    }

    pub async fn create(
        db: &DatabaseConnection,
        now: DateTime<Utc>,
        payload: CreateCategoryRequest,
    ) -> Result<AdminCategoryResponse, ServiceError> {
        let txn = db.begin().await
            .map_err(|_| (StatusCode::INTERNAL_SERVER_ERROR, "TXN_ERR", "Transaction start failed".to_string()))?;

        let slug = match payload.slug {
            Some(s) => s,
            None => unique_slug::<Category, _>(
                &txn,
                category::Column::Slug,
                &payload.title,
                "category",
                CATEGORY_SLUG_MAX_LEN,
            )
            .await
            .map_err(|e| map_db_err(e, "Slug check"))?,
        };

        let new_category = category::ActiveModel {
            id: NotSet,
            title: Set(payload.title),
            description: Set(payload.description.unwrap_or_default()),
            slug: Set(slug),
            is_published: Set(payload.is_published),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let saved = new_category.insert(&txn).await
            .map_err(|e| map_db_err(e, "Create category"))?;

        txn.commit().await
            .map_err(|_| (StatusCode::INTERNAL_SERVER_ERROR, "TXN_COMMIT_ERR", "Transaction commit failed".to_string()))?;

        tracing::info!("Category '{}' created", saved.slug);
        Ok(Self::map_to_response(saved))
    }

    /// Renaming a category keeps its slug; only an explicit slug replaces it.
    pub async fn update(
        db: &DatabaseConnection,
        now: DateTime<Utc>,
        id: i64,
        payload: UpdateCategoryRequest,
    ) -> Result<AdminCategoryResponse, ServiceError> {
        let category = Self::find_by_id(db, id).await?;
        let mut active: category::ActiveModel = category.into();

        if let Some(t) = payload.title { active.title = Set(t); }
        if let Some(d) = payload.description { active.description = Set(d); }
        if let Some(s) = payload.slug { active.slug = Set(s); }
        if let Some(p) = payload.is_published { active.is_published = Set(p); }

        active.updated_at = Set(now);

        let updated = active.update(db).await
            .map_err(|e| map_db_err(e, "Update category"))?;

        Ok(Self::map_to_response(updated))
    }

    /// Posts in the category survive with their category cleared.
    pub async fn delete(db: &DatabaseConnection, id: i64) -> Result<(), ServiceError> {
        let res = Category::delete_by_id(id).exec(db).await
            .map_err(|e| map_db_err(e, "Delete category"))?;

        if res.rows_affected == 0 {
            return Err((StatusCode::NOT_FOUND, "CATEGORY_NOT_FOUND", "Category not found".to_string()));
        }
        Ok(())
    }

    async fn find_by_id(db: &DatabaseConnection, id: i64) -> Result<category::Model, ServiceError> {
        Category::find_by_id(id)
            .one(db)
            .await
            .map_err(|e| map_db_err(e, "Fetch category"))?
            .ok_or((StatusCode::NOT_FOUND, "CATEGORY_NOT_FOUND", "Category not found".to_string()))
    }

    fn map_to_response(model: category::Model) -> AdminCategoryResponse {
        AdminCategoryResponse {
            id: model.id,
            title: model.title,
            slug: model.slug,
            description: model.description,
            is_published: model.is_published,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
