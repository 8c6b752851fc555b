mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use chrono::{Duration, Utc};
use geoblog::models::admin_model::CreatePostRequest;
use geoblog::services::cache_service::CacheService;
use geoblog::services::post_service::PostService;
use tower::ServiceExt;

async fn publish(db: &sea_orm::DatabaseConnection, title: &str, offset: Duration) {
    let author = common::create_user(db, &format!("author-{}", title.len()), true, false).await;
    let now = Utc::now();
    PostService::create_post(
        db,
        &author,
        now,
        CreatePostRequest {
            title: title.to_string(),
            text: "Body".to_string(),
            slug: None,
            pub_date: Some(now + offset),
            category_id: None,
            location_id: None,
            is_published: true,
            image: None,
        },
    )
    .await
    .unwrap();
}

#[tokio::test]
async fn health_check_is_up() {
    let (app, _) = common::app().await;
    let (status, body) = common::get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "up");
}

#[tokio::test]
async fn static_pages_answer_with_and_without_trailing_slash() {
    let (app, _) = common::app().await;
    for uri in ["/about", "/about/", "/rules", "/rules/"] {
        let (status, body) = common::get(&app, uri).await;
        assert_eq!(status, StatusCode::OK, "{}", uri);
        assert_eq!(body["code"], "PAGE_FETCHED");
    }
    let (_, body) = common::get(&app, "/rules/").await;
    assert_eq!(body["data"]["title"], "Our rules");
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let (app, _) = common::app().await;
    let (status, body) = common::get(&app, "/nowhere").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "ROUTE_NOT_FOUND");
    assert_eq!(body["status"], "error");
}

#[tokio::test]
async fn feed_lists_only_live_posts() {
    let (app, state) = common::app().await;
    publish(&state.db, "Live one", -Duration::minutes(5)).await;
    publish(&state.db, "Coming soon", Duration::days(1)).await;

    let (status, body) = common::get(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
    let data = body["data"]["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["slug"], "live-one");
    assert_eq!(body["data"]["meta"]["page"], 1);
    assert_eq!(body["data"]["meta"]["has_next"], false);

    let (status, body) = common::get(&app, "/posts/live-one/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["title"], "Live one");
    assert!(body["data"]["category"].is_null());

    let (status, body) = common::get(&app, "/posts/coming-soon").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "POST_NOT_FOUND");
}

#[tokio::test]
async fn malformed_or_out_of_range_pages_are_not_found() {
    let (app, _) = common::app().await;

    let (status, _) = common::get(&app, "/?page=1").await;
    assert_eq!(status, StatusCode::OK);

    for uri in ["/?page=abc", "/?page=0", "/?page=2"] {
        let (status, body) = common::get(&app, uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{}", uri);
        assert_eq!(body["code"], "PAGE_NOT_FOUND");
    }
}

#[tokio::test]
async fn category_route_lists_posts_of_that_category() {
    let (app, state) = common::app().await;
    let author = common::create_user(&state.db, "editor", true, false).await;
    let now = Utc::now();
    let travel = geoblog::services::category_service::CategoryService::create(
        &state.db,
        now,
        geoblog::models::admin_model::CreateCategoryRequest {
            title: "Travel".to_string(),
            description: None,
            slug: None,
            is_published: true,
        },
    )
    .await
    .unwrap();
    PostService::create_post(
        &state.db,
        &author,
        now,
        CreatePostRequest {
            title: "Road".to_string(),
            text: "Body".to_string(),
            slug: None,
            pub_date: Some(now - Duration::minutes(1)),
            category_id: Some(travel.id),
            location_id: None,
            is_published: true,
            image: None,
        },
    )
    .await
    .unwrap();
    publish(&state.db, "Uncategorized", -Duration::minutes(1)).await;

    for uri in ["/category/travel/", "/category/travel"] {
        let (status, body) = common::get(&app, uri).await;
        assert_eq!(status, StatusCode::OK, "{}", uri);
        assert_eq!(body["data"]["category"]["title"], "Travel");
        let data = body["data"]["data"].as_array().unwrap();
        assert_eq!(data.len(), 1);
        assert_eq!(data[0]["slug"], "road");
    }
}

#[tokio::test]
async fn unknown_category_is_not_found() {
    let (app, _) = common::app().await;
    let (status, body) = common::get(&app, "/category/missing/").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "CATEGORY_NOT_FOUND");
}

#[tokio::test]
async fn production_hardens_responses() {
    let db = common::setup_db().await;
    let config = common::test_config(&[("APP_ENV", "production")]);
    let state = common::state(db, CacheService::Disabled, config);
    let app = geoblog::build_app(state);

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::X_FRAME_OPTIONS], "DENY");
    assert_eq!(response.headers()[header::X_CONTENT_TYPE_OPTIONS], "nosniff");
    assert!(response.headers().contains_key(header::STRICT_TRANSPORT_SECURITY));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/about/?x=1")
                .header(header::HOST, "blog.example.com")
                .header("x-forwarded-proto", "http")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
    assert_eq!(response.headers()[header::LOCATION], "https://blog.example.com/about/?x=1");
    assert!(response.headers().contains_key(header::STRICT_TRANSPORT_SECURITY));
    assert_eq!(response.headers()[header::X_CONTENT_TYPE_OPTIONS], "nosniff");
}

#[tokio::test]
async fn development_sends_no_security_headers() {
    let (app, _) = common::app().await;
    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert!(!response.headers().contains_key(header::STRICT_TRANSPORT_SECURITY));
}
