#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use geoblog::admin::registry::AdminRegistry;
use geoblog::config::{AppState, Config};
use geoblog::models::auth_model::CurrentUser;
use geoblog::repositories::user_repository::{NewUser, UserRepository};
use geoblog::services::auth_service::AuthService;
use geoblog::services::cache_service::CacheService;
use http_body_util::BodyExt;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use serde_json::Value;
use tower::ServiceExt;

pub const STAFF_PASSWORD: &str = "correct-horse-battery";

/// A fresh in-memory database with the schema applied. One connection so
/// every query sees the same database.
pub async fn setup_db() -> DatabaseConnection {
    let mut opt = ConnectOptions::new("sqlite::memory:");
    opt.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opt).await.expect("connect sqlite");
    Migrator::up(&db, None).await.expect("migrate");
    db
}

pub fn test_config(pairs: &[(&str, &str)]) -> Config {
    let mut map: HashMap<String, String> = HashMap::from([
        ("DATABASE_URL".to_string(), "sqlite::memory:".to_string()),
        ("JWT_SECRET".to_string(), "test-secret".to_string()),
        ("POSTS_PER_PAGE".to_string(), "10".to_string()),
    ]);
    for (k, v) in pairs {
        map.insert(k.to_string(), v.to_string());
    }
    Config::from_lookup(|key| map.get(key).cloned()).expect("test config")
}

pub fn state(db: DatabaseConnection, cache: CacheService, config: Config) -> AppState {
    AppState {
        db,
        cache,
        config: Arc::new(config),
        admin: Arc::new(AdminRegistry::default()),
    }
}

/// Uncached app over a fresh database.
pub async fn app() -> (Router, AppState) {
    let db = setup_db().await;
    let state = state(db, CacheService::Disabled, test_config(&[]));
    (geoblog::build_app(state.clone()), state)
}

pub async fn create_user(
    db: &DatabaseConnection,
    username: &str,
    is_staff: bool,
    is_superuser: bool,
) -> CurrentUser {
    let password_hash = AuthService::hash_password(STAFF_PASSWORD).expect("hash");
    let user = UserRepository::create(
        db,
        NewUser {
            username: username.to_string(),
            email: format!("{}@example.com", username),
            password_hash,
            is_staff,
            is_superuser,
        },
    )
    .await
    .expect("create user");

    CurrentUser {
        id: user.id,
        public_id: user.public_id,
        username: user.username,
        is_superuser: user.is_superuser,
    }
}

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .expect("request"),
        None => builder.body(Body::empty()).expect("request"),
    };

    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = response.into_body().collect().await.expect("body").to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, None, None).await
}

pub async fn login(app: &Router, username: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/admin/login",
        None,
        Some(serde_json::json!({ "login_id": username, "password": STAFF_PASSWORD })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {}", body);
    body["data"]["token"].as_str().expect("token").to_string()
}
