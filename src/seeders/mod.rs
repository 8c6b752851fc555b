pub mod category_seeder;
pub mod user_seeder;

use sea_orm::DatabaseConnection;
use crate::config::Config;

pub async fn run_seeders(db: &DatabaseConnection, config: &Config) -> Result<(), String> {
    // 1. Superuser from ADMIN_* settings
    user_seeder::seed_super_user(db, config).await?;

    // 2. Starter categories (development only)
    if !config.is_production() {
        category_seeder::seed_categories(db).await?;
    }

    Ok(())
}
