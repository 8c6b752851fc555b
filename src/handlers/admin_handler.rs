use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension,
};
use chrono::Utc;
use uuid::Uuid;
use crate::admin::registry::{self, AdminAction, RecordKind};
use crate::config::AppState;
use crate::models::admin_model::*;
use crate::models::auth_model::CurrentUser;
use crate::services::auth_service::AuthService;
use crate::services::category_service::CategoryService;
use crate::services::location_service::LocationService;
use crate::services::post_service::PostService;
use crate::utils::api_response::ResponseBuilder;
use crate::utils::validated_wrapper::ValidatedJson;

/// Rejects actions the registry does not grant for `kind`.
fn ensure_allowed(state: &AppState, kind: RecordKind, action: AdminAction) -> Result<(), Response> {
    if state.admin.allows(kind, action) {
        Ok(())
    } else {
        Err(ResponseBuilder::error::<()>(
            StatusCode::METHOD_NOT_ALLOWED,
            "ACTION_NOT_ALLOWED",
            "This action is not available for this record type",
        )
        .into_response())
    }
}

pub async fn admin_index_handler(State(state): State<AppState>) -> impl IntoResponse {
    ResponseBuilder::success(
        "ADMIN_INDEX",
        registry::INDEX_TITLE,
        AdminIndexResponse {
            site_header: registry::SITE_HEADER,
            site_title: registry::SITE_TITLE,
            index_title: registry::INDEX_TITLE,
            models: state.admin.models().to_vec(),
        },
    )
}

// --- Categories ---

pub async fn list_categories_handler(
    State(state): State<AppState>,
    Query(params): Query<AdminListParams>,
) -> Response {
    if let Err(resp) = ensure_allowed(&state, RecordKind::Category, AdminAction::List) {
        return resp;
    }
    match CategoryService::list(&state.db, params).await {
        Ok(res) => ResponseBuilder::success("CATEGORIES_FETCHED", "Success", res).into_response(),
        Err(err) => ResponseBuilder::from_error(err).into_response(),
    }
}

pub async fn get_category_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Response {
    if let Err(resp) = ensure_allowed(&state, RecordKind::Category, AdminAction::View) {
        return resp;
    }
    match CategoryService::get(&state.db, id).await {
        Ok(res) => ResponseBuilder::success("CATEGORY_FETCHED", "Success", res).into_response(),
        Err(err) => ResponseBuilder::from_error(err).into_response(),
    }
}

pub async fn create_category_handler(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateCategoryRequest>,
) -> Response {
    if let Err(resp) = ensure_allowed(&state, RecordKind::Category, AdminAction::Create) {
        return resp;
    }
    match CategoryService::create(&state.db, Utc::now(), payload).await {
        Ok(res) => ResponseBuilder::created("CATEGORY_CREATED", "Category created", res).into_response(),
        Err(err) => ResponseBuilder::from_error(err).into_response(),
    }
}

pub async fn update_category_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<UpdateCategoryRequest>,
) -> Response {
    if let Err(resp) = ensure_allowed(&state, RecordKind::Category, AdminAction::Update) {
        return resp;
    }
    match CategoryService::update(&state.db, Utc::now(), id, payload).await {
        Ok(res) => ResponseBuilder::success("CATEGORY_UPDATED", "Category updated", res).into_response(),
        Err(err) => ResponseBuilder::from_error(err).into_response(),
    }
}

pub async fn delete_category_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Response {
    if let Err(resp) = ensure_allowed(&state, RecordKind::Category, AdminAction::Delete) {
        return resp;
    }
    match CategoryService::delete(&state.db, id).await {
        Ok(_) => ResponseBuilder::success::<()>("CATEGORY_DELETED", "Category deleted", ()).into_response(),
        Err(err) => ResponseBuilder::from_error(err).into_response(),
    }
}

// --- Locations ---

pub async fn list_locations_handler(
    State(state): State<AppState>,
    Query(params): Query<AdminListParams>,
) -> Response {
    if let Err(resp) = ensure_allowed(&state, RecordKind::Location, AdminAction::List) {
        return resp;
    }
    match LocationService::list(&state.db, params).await {
        Ok(res) => ResponseBuilder::success("LOCATIONS_FETCHED", "Success", res).into_response(),
        Err(err) => ResponseBuilder::from_error(err).into_response(),
    }
}

pub async fn get_location_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Response {
    if let Err(resp) = ensure_allowed(&state, RecordKind::Location, AdminAction::View) {
        return resp;
    }
    match LocationService::get(&state.db, id).await {
        Ok(res) => ResponseBuilder::success("LOCATION_FETCHED", "Success", res).into_response(),
        Err(err) => ResponseBuilder::from_error(err).into_response(),
    }
}

pub async fn create_location_handler(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateLocationRequest>,
) -> Response {
    if let Err(resp) = ensure_allowed(&state, RecordKind::Location, AdminAction::Create) {
        return resp;
    }
    match LocationService::create(&state.db, Utc::now(), payload).await {
        Ok(res) => ResponseBuilder::created("LOCATION_CREATED", "Location created", res).into_response(),
        Err(err) => ResponseBuilder::from_error(err).into_response(),
    }
}

pub async fn update_location_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<UpdateLocationRequest>,
) -> Response {
    if let Err(resp) = ensure_allowed(&state, RecordKind::Location, AdminAction::Update) {
        return resp;
    }
    match LocationService::update(&state.db, Utc::now(), id, payload).await {
        Ok(res) => ResponseBuilder::success("LOCATION_UPDATED", "Location updated", res).into_response(),
        Err(err) => ResponseBuilder::from_error(err).into_response(),
    }
}

pub async fn delete_location_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Response {
    if let Err(resp) = ensure_allowed(&state, RecordKind::Location, AdminAction::Delete) {
        return resp;
    }
    match LocationService::delete(&state.db, id).await {
        Ok(_) => ResponseBuilder::success::<()>("LOCATION_DELETED", "Location deleted", ()).into_response(),
        Err(err) => ResponseBuilder::from_error(err).into_response(),
    }
}

// --- Posts ---

pub async fn list_posts_handler(
    State(state): State<AppState>,
    Query(params): Query<AdminListParams>,
) -> Response {
    if let Err(resp) = ensure_allowed(&state, RecordKind::Post, AdminAction::List) {
        return resp;
    }
    match PostService::list_admin(&state.db, Utc::now(), params).await {
        Ok(res) => ResponseBuilder::success("POSTS_FETCHED", "Success", res).into_response(),
        Err(err) => ResponseBuilder::from_error(err).into_response(),
    }
}

pub async fn get_post_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Response {
    if let Err(resp) = ensure_allowed(&state, RecordKind::Post, AdminAction::View) {
        return resp;
    }
    match PostService::get_admin(&state.db, Utc::now(), id).await {
        Ok(res) => ResponseBuilder::success("POST_FETCHED", "Success", res).into_response(),
        Err(err) => ResponseBuilder::from_error(err).into_response(),
    }
}

/// The signed-in staff user becomes the author.
pub async fn create_post_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<CreatePostRequest>,
) -> Response {
    if let Err(resp) = ensure_allowed(&state, RecordKind::Post, AdminAction::Create) {
        return resp;
    }
    match PostService::create_post(&state.db, &user, Utc::now(), payload).await {
        Ok(res) => ResponseBuilder::created("POST_CREATED", "Post created", res).into_response(),
        Err(err) => ResponseBuilder::from_error(err).into_response(),
    }
}

pub async fn update_post_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<UpdatePostRequest>,
) -> Response {
    if let Err(resp) = ensure_allowed(&state, RecordKind::Post, AdminAction::Update) {
        return resp;
    }
    match PostService::update_post(&state.db, Utc::now(), id, payload).await {
        Ok(res) => ResponseBuilder::success("POST_UPDATED", "Post updated", res).into_response(),
        Err(err) => ResponseBuilder::from_error(err).into_response(),
    }
}

pub async fn delete_post_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Response {
    if let Err(resp) = ensure_allowed(&state, RecordKind::Post, AdminAction::Delete) {
        return resp;
    }
    match PostService::delete_post(&state.db, id).await {
        Ok(_) => ResponseBuilder::success::<()>("POST_DELETED", "Post deleted", ()).into_response(),
        Err(err) => ResponseBuilder::from_error(err).into_response(),
    }
}

// --- Users ---

pub async fn list_users_handler(
    State(state): State<AppState>,
    Query(params): Query<AdminListParams>,
) -> Response {
    if let Err(resp) = ensure_allowed(&state, RecordKind::User, AdminAction::List) {
        return resp;
    }
    match AuthService::list_users(&state.db, params).await {
        Ok(res) => ResponseBuilder::success("USERS_FETCHED", "Success", res).into_response(),
        Err(err) => ResponseBuilder::from_error(err).into_response(),
    }
}

pub async fn create_user_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<CreateUserRequest>,
) -> Response {
    if let Err(resp) = ensure_allowed(&state, RecordKind::User, AdminAction::Create) {
        return resp;
    }
    if !user.is_superuser {
        return ResponseBuilder::error::<()>(StatusCode::FORBIDDEN, "ACCESS_DENIED", "Only superusers can manage users")
            .into_response();
    }
    match AuthService::create_user(&state.db, payload).await {
        Ok(res) => ResponseBuilder::created("USER_CREATED", "User created", res).into_response(),
        Err(err) => ResponseBuilder::from_error(err).into_response(),
    }
}

/// Deleting a user deletes every post they authored.
pub async fn delete_user_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Response {
    if let Err(resp) = ensure_allowed(&state, RecordKind::User, AdminAction::Delete) {
        return resp;
    }
    if !user.is_superuser {
        return ResponseBuilder::error::<()>(StatusCode::FORBIDDEN, "ACCESS_DENIED", "Only superusers can manage users")
            .into_response();
    }
    match AuthService::delete_user(&state.db, id, user.id).await {
        Ok(_) => ResponseBuilder::success::<()>("USER_DELETED", "User deleted", ()).into_response(),
        Err(err) => ResponseBuilder::from_error(err).into_response(),
    }
}

/// Methods the registry withholds still resolve to a route; this answers them.
pub async fn action_not_allowed_handler() -> impl IntoResponse {
    ResponseBuilder::error::<()>(
        StatusCode::METHOD_NOT_ALLOWED,
        "ACTION_NOT_ALLOWED",
        "This action is not available for this record type",
    )
}
