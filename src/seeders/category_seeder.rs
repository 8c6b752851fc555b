use sea_orm::{DatabaseConnection, EntityTrait, ActiveValue::Set, ActiveModelTrait, PaginatorTrait};
use chrono::Utc;
use slug::slugify;
use crate::entities::category;

/// Fills an empty categories table with a few starters.
pub async fn seed_categories(db: &DatabaseConnection) -> Result<(), String> {
    let existing = category::Entity::find()
        .count(db)
        .await
        .map_err(|e| e.to_string())?;

    if existing > 0 {
        return Ok(());
    }

    let categories = vec![
        ("Travel", "Trips, routes and places worth the detour"),
        ("Technology", "Gadgets, software and the occasional rant"),
        ("Personal", "Notes that fit nowhere else"),
    ];

    for (title, description) in categories {
        let now = Utc::now();
        let new_category = category::ActiveModel {
            title: Set(title.to_string()),
            description: Set(description.to_string()),
            slug: Set(slugify(title)),
            is_published: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        new_category.insert(db).await.map_err(|e| e.to_string())?;
        tracing::info!("Seeded category: {}", title);
    }

    Ok(())
}
