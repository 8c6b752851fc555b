mod common;

use chrono::{Duration, Utc};
use geoblog::entities::{category, post};
use geoblog::models::admin_model::*;
use geoblog::services::cache_service::{CacheService, MemoryCache};
use geoblog::services::category_service::CategoryService;
use geoblog::services::location_service::LocationService;
use geoblog::services::post_service::PostService;
use sea_orm::EntityTrait;

fn new_post(title: &str) -> CreatePostRequest {
    CreatePostRequest {
        title: title.to_string(),
        text: "Body".to_string(),
        slug: None,
        pub_date: None,
        category_id: None,
        location_id: None,
        is_published: true,
        image: None,
    }
}

fn new_category(title: &str) -> CreateCategoryRequest {
    CreateCategoryRequest {
        title: title.to_string(),
        description: None,
        slug: None,
        is_published: true,
    }
}

#[tokio::test]
async fn scheduled_post_goes_live_once_its_date_passes() {
    let db = common::setup_db().await;
    let author = common::create_user(&db, "editor", true, false).await;
    let now = Utc::now();

    let first = PostService::create_post(&db, &author, now, new_post("Hello World")).await.unwrap();
    let second = PostService::create_post(&db, &author, now, new_post("Hello World")).await.unwrap();
    assert_eq!(first.slug, "hello-world");
    assert_eq!(second.slug, "hello-world-1");

    let mut scheduled = new_post("Hello World");
    scheduled.pub_date = Some(now + Duration::hours(1));
    let third = PostService::create_post(&db, &author, now, scheduled).await.unwrap();
    assert_eq!(third.slug, "hello-world-2");

    let cache = CacheService::Disabled;
    let feed = PostService::feed_page(&db, &cache, now, None, 10).await.unwrap();
    let slugs: Vec<_> = feed.data.iter().map(|p| p.slug.as_str()).collect();
    assert_eq!(feed.meta.total_items, 2);
    assert!(!slugs.contains(&"hello-world-2"));

    let later = now + Duration::hours(2);
    let feed = PostService::feed_page(&db, &cache, later, None, 10).await.unwrap();
    assert_eq!(feed.meta.total_items, 3);
    assert_eq!(feed.data[0].slug, "hello-world-2");

    assert!(PostService::get_published(&db, &cache, now, "hello-world-2").await.is_err());
    assert!(PostService::get_published(&db, &cache, later, "hello-world-2").await.is_ok());
}

#[tokio::test]
async fn unpublished_posts_never_appear() {
    let db = common::setup_db().await;
    let author = common::create_user(&db, "editor", true, false).await;
    let now = Utc::now();

    let mut draft = new_post("Draft");
    draft.pub_date = Some(now - Duration::days(30));
    draft.is_published = false;
    let draft = PostService::create_post(&db, &author, now, draft).await.unwrap();
    assert_eq!(draft.status_badge.color, "red");

    let cache = CacheService::Disabled;
    let far_future = now + Duration::days(3650);
    let feed = PostService::feed_page(&db, &cache, far_future, None, 10).await.unwrap();
    assert!(feed.data.is_empty());
    assert_eq!(feed.meta.total_pages, 1);

    let (status, code, _) = PostService::get_published(&db, &cache, far_future, "draft").await.unwrap_err();
    assert_eq!(status.as_u16(), 404);
    assert_eq!(code, "POST_NOT_FOUND");
}

#[tokio::test]
async fn renaming_a_post_keeps_its_slug() {
    let db = common::setup_db().await;
    let author = common::create_user(&db, "editor", true, false).await;
    let now = Utc::now();

    let created = PostService::create_post(&db, &author, now, new_post("Original title")).await.unwrap();
    let update = UpdatePostRequest {
        title: Some("Completely different".to_string()),
        text: None,
        slug: None,
        pub_date: None,
        category_id: None,
        location_id: None,
        is_published: None,
        image: None,
    };
    let updated = PostService::update_post(&db, now, created.id, update).await.unwrap();

    assert_eq!(updated.title, "Completely different");
    assert_eq!(updated.slug, "original-title");
}

#[tokio::test]
async fn deleting_a_category_clears_it_from_posts() {
    let db = common::setup_db().await;
    let author = common::create_user(&db, "editor", true, false).await;
    let now = Utc::now();

    let travel = CategoryService::create(&db, now, new_category("Travel")).await.unwrap();
    assert_eq!(travel.slug, "travel");

    let location = LocationService::create(
        &db,
        now,
        CreateLocationRequest { name: "Lisbon".to_string(), is_published: true },
    )
    .await
    .unwrap();

    let mut payload = new_post("Trip");
    payload.category_id = Some(travel.id);
    payload.location_id = Some(location.id);
    let created = PostService::create_post(&db, &author, now, payload).await.unwrap();

    assert_eq!(LocationService::get(&db, location.id).await.unwrap().posts_count, 1);

    CategoryService::delete(&db, travel.id).await.unwrap();
    LocationService::delete(&db, location.id).await.unwrap();

    let post = post::Entity::find_by_id(created.id).one(&db).await.unwrap().unwrap();
    assert_eq!(post.category_id, None);
    assert_eq!(post.location_id, None);
    assert_eq!(category::Entity::find().all(&db).await.unwrap().len(), 0);
}

#[tokio::test]
async fn deleting_the_author_deletes_their_posts() {
    let db = common::setup_db().await;
    let admin = common::create_user(&db, "admin", true, true).await;
    let author = common::create_user(&db, "writer", true, false).await;
    let now = Utc::now();

    let created = PostService::create_post(&db, &author, now, new_post("Mine")).await.unwrap();
    geoblog::services::auth_service::AuthService::delete_user(&db, author.public_id, admin.id)
        .await
        .unwrap();

    assert!(post::Entity::find_by_id(created.id).one(&db).await.unwrap().is_none());
}

#[tokio::test]
async fn category_slugs_are_disambiguated_and_bounded() {
    let db = common::setup_db().await;
    let now = Utc::now();

    let long_title = "a".repeat(200);
    let created = CategoryService::create(&db, now, new_category(&long_title)).await.unwrap();
    assert_eq!(created.slug.len(), 64);

    let again = CategoryService::create(&db, now, new_category(&format!("{}!", long_title))).await.unwrap();
    assert!(again.slug.len() <= 64);
    assert_ne!(again.slug, created.slug);

    let first = CategoryService::create(&db, now, new_category("Food & Drink")).await.unwrap();
    let second = CategoryService::create(&db, now, new_category("Food Drink")).await.unwrap();
    assert_eq!(first.slug, "food-drink");
    assert_eq!(second.slug, "food-drink-1");
}

#[tokio::test]
async fn explicit_duplicate_slug_is_a_conflict() {
    let db = common::setup_db().await;
    let now = Utc::now();

    let mut a = new_category("Alpha");
    a.slug = Some("shared".to_string());
    CategoryService::create(&db, now, a).await.unwrap();

    let mut b = new_category("Beta");
    b.slug = Some("shared".to_string());
    let (status, code, _) = CategoryService::create(&db, now, b).await.unwrap_err();
    assert_eq!(status.as_u16(), 409);
    assert_eq!(code, "SLUG_CONFLICT");
}

#[tokio::test]
async fn category_feed_hides_unpublished_categories() {
    let db = common::setup_db().await;
    let author = common::create_user(&db, "editor", true, false).await;
    let now = Utc::now();

    let mut hidden = new_category("Hidden");
    hidden.is_published = false;
    let hidden = CategoryService::create(&db, now, hidden).await.unwrap();

    let mut payload = new_post("Secret");
    payload.category_id = Some(hidden.id);
    PostService::create_post(&db, &author, now, payload).await.unwrap();

    let cache = CacheService::Disabled;
    let (status, code, _) = PostService::category_page(&db, &cache, now, "hidden", None, 10).await.unwrap_err();
    assert_eq!(status.as_u16(), 404);
    assert_eq!(code, "CATEGORY_NOT_FOUND");

    // The post itself is still eligible
    let feed = PostService::feed_page(&db, &cache, now, None, 10).await.unwrap();
    assert_eq!(feed.data.len(), 1);
    assert_eq!(feed.data[0].category.as_ref().map(|c| c.slug.as_str()), Some("hidden"));
}

#[tokio::test]
async fn published_with_related_orders_newest_first() {
    let db = common::setup_db().await;
    let author = common::create_user(&db, "editor", true, false).await;
    let now = Utc::now();

    for (title, hours_ago) in [("Old", 5), ("Newest", 1), ("Middle", 3)] {
        let mut payload = new_post(title);
        payload.pub_date = Some(now - Duration::hours(hours_ago));
        PostService::create_post(&db, &author, now, payload).await.unwrap();
    }

    let posts = PostService::published_with_related(&db, now).await.unwrap();
    let titles: Vec<_> = posts.iter().map(|p| p.post.title.as_str()).collect();
    assert_eq!(titles, ["Newest", "Middle", "Old"]);
    assert!(posts.iter().all(|p| p.author.username == "editor"));
}

#[tokio::test]
async fn cached_feed_is_served_until_it_expires() {
    let db = common::setup_db().await;
    let author = common::create_user(&db, "editor", true, false).await;
    let now = Utc::now();
    let cache = CacheService::Memory(MemoryCache::new());

    PostService::create_post(&db, &author, now, new_post("First")).await.unwrap();
    let before = PostService::feed_page(&db, &cache, now, None, 10).await.unwrap();
    assert_eq!(before.data.len(), 1);

    PostService::create_post(&db, &author, now, new_post("Second")).await.unwrap();
    let cached = PostService::feed_page(&db, &cache, now, None, 10).await.unwrap();
    assert_eq!(cached, before);

    let fresh = PostService::feed_page(&db, &CacheService::Disabled, now, None, 10).await.unwrap();
    assert_eq!(fresh.data.len(), 2);
}

#[tokio::test]
async fn pages_past_the_end_are_not_found() {
    let db = common::setup_db().await;
    let author = common::create_user(&db, "editor", true, false).await;
    let now = Utc::now();
    let cache = CacheService::Disabled;

    for i in 0..3 {
        PostService::create_post(&db, &author, now, new_post(&format!("Post {}", i))).await.unwrap();
    }

    let page2 = PostService::feed_page(&db, &cache, now, Some("2"), 2).await.unwrap();
    assert_eq!(page2.data.len(), 1);
    assert!(page2.meta.has_previous);
    assert!(!page2.meta.has_next);

    let (status, code, _) = PostService::feed_page(&db, &cache, now, Some("3"), 2).await.unwrap_err();
    assert_eq!(status.as_u16(), 404);
    assert_eq!(code, "PAGE_NOT_FOUND");
}

#[tokio::test]
async fn category_feed_holds_only_its_live_posts() {
    let db = common::setup_db().await;
    let author = common::create_user(&db, "editor", true, false).await;
    let now = Utc::now();

    let travel = CategoryService::create(&db, now, new_category("Travel")).await.unwrap();
    let food = CategoryService::create(&db, now, new_category("Food")).await.unwrap();

    let mut live = new_post("In");
    live.category_id = Some(travel.id);
    PostService::create_post(&db, &author, now, live).await.unwrap();

    let mut scheduled = new_post("Later");
    scheduled.category_id = Some(travel.id);
    scheduled.pub_date = Some(now + Duration::days(1));
    PostService::create_post(&db, &author, now, scheduled).await.unwrap();

    let mut elsewhere = new_post("Elsewhere");
    elsewhere.category_id = Some(food.id);
    PostService::create_post(&db, &author, now, elsewhere).await.unwrap();

    let cache = CacheService::Disabled;
    let page = PostService::category_page(&db, &cache, now, "travel", None, 10).await.unwrap();
    let slugs: Vec<_> = page.data.iter().map(|p| p.slug.as_str()).collect();
    assert_eq!(slugs, ["in"]);
    assert_eq!(page.category.slug, "travel");
    assert_eq!(page.meta.total_items, 1);
    assert_eq!(page.data[0].category.as_ref().map(|c| c.title.as_str()), Some("Travel"));
}
