use std::collections::HashMap;

use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use sea_orm::*;

use crate::entities::{location, location::Entity as Location, post};
use crate::models::admin_model::*;
use crate::services::post_service::ADMIN_PAGE_SIZE;
use crate::utils::api_response::ServiceError;
use crate::utils::db_utils::{icontains, map_db_err};
use crate::utils::pagination::fetch_page;

pub struct LocationService;

impl LocationService {
    pub async fn list(
        db: &DatabaseConnection,
        params: AdminListParams,
    ) -> Result<AdminListResponse<AdminLocationResponse>, ServiceError> {
        let mut query = Location::find().order_by_asc(location::Column::Name);

        if let Some(is_published) = params.is_published {
            query = query.filter(location::Column::IsPublished.eq(is_published));
        }
        if let Some(search) = params.search.filter(|s| !s.trim().is_empty()) {
            query = query.filter(icontains(location::Column::Name, &search));
        }

        let (locations, meta) = fetch_page(db, query, params.page.unwrap_or(1).max(1), ADMIN_PAGE_SIZE).await?;

        let ids: Vec<i64> = locations.iter().map(|l| l.id).collect();
        let counts = Self::posts_counts(db, ids).await?;

        let data = locations
            .into_iter()
            .map(|l| {
                let posts_count = counts.get(&l.id).copied().unwrap_or(0);
                Self::map_to_response(l, posts_count)
            })
            .collect();

        Ok(AdminListResponse { data, meta })
    }

    pub async fn get(db: &DatabaseConnection, id: i64) -> Result<AdminLocationResponse, ServiceError> {
        let location = Self::find_by_id(db, id).await?;
        let counts = Self::posts_counts(db, vec![location.id]).await?;
        let posts_count = counts.get(&location.id).copied().unwrap_or(0);
        Ok(Self::map_to_response(location, posts_count))
    }

    pub async fn create(
        db: &DatabaseConnection,
        now: DateTime<Utc>,
        payload: CreateLocationRequest,
    ) -> Result<AdminLocationResponse, ServiceError> {
        let new_location = location::ActiveModel {
            id: NotSet,
            name: Set(payload.name),
            is_published: Set(payload.is_published),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let saved = new_location.insert(db).await
            .map_err(|e| map_db_err(e, "Create location"))?;

        tracing::info!("Location '{}' created", saved.name);
        Ok(Self::map_to_response(saved, 0))
    }

    pub async fn update(
        db: &DatabaseConnection,
        now: DateTime<Utc>,
        id: i64,
        payload: UpdateLocationRequest,
    ) -> Result<AdminLocationResponse, ServiceError> {
        let location = Self::find_by_id(db, id).await?;
        let mut active: location::ActiveModel = location.into();

        if let Some(n) = payload.name { active.name = Set(n); }
        if let Some(p) = payload.is_published { active.is_published = Set(p); }

        active.updated_at = Set(now);

        let updated = active.update(db).await
            .map_err(|e| map_db_err(e, "Update location"))?;

        Self::get(db, updated.id).await
    }

    /// Posts at the location survive with their location cleared.
    pub async fn delete(db: &DatabaseConnection, id: i64) -> Result<(), ServiceError> {
        let res = Location::delete_by_id(id).exec(db).await
            .map_err(|e| map_db_err(e, "Delete location"))?;

        if res.rows_affected == 0 {
            return Err((StatusCode::NOT_FOUND, "LOCATION_NOT_FOUND", "Location not found".to_string()));
        }
        Ok(())
    }

    /// Number of posts per location, all publication states included.
    async fn posts_counts(db: &DatabaseConnection, ids: Vec<i64>) -> Result<HashMap<i64, u64>, ServiceError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows: Vec<(Option<i64>, i64)> = post::Entity::find()
            .select_only()
            .column(post::Column::LocationId)
            .column_as(post::Column::Id.count(), "posts_count")
            .filter(post::Column::LocationId.is_in(ids))
            .group_by(post::Column::LocationId)
            .into_tuple()
            .all(db)
            .await
            .map_err(|e| map_db_err(e, "Count posts"))?;

        Ok(rows
            .into_iter()
            .filter_map(|(id, count)| id.map(|id| (id, count.max(0) as u64)))
            .collect())
    }

    async fn find_by_id(db: &DatabaseConnection, id: i64) -> Result<location::Model, ServiceError> {
        Location::find_by_id(id)
            .one(db)
            .await
            .map_err(|e| map_db_err(e, "Fetch location"))?
            .ok_or((StatusCode::NOT_FOUND, "LOCATION_NOT_FOUND", "Location not found".to_string()))
    }

    fn map_to_response(model: location::Model, posts_count: u64) -> AdminLocationResponse {
        AdminLocationResponse {
            id: model.id,
            name: model.name,
            is_published: model.is_published,
            posts_count,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
