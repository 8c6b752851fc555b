use sea_orm::DatabaseConnection;
use crate::config::Config;
use crate::repositories::user_repository::{NewUser, UserRepository};
use crate::services::auth_service::AuthService;

/// Creates the superuser named by `ADMIN_USERNAME` unless it already exists.
/// Skipped when any of the `ADMIN_*` settings is missing.
pub async fn seed_super_user(db: &DatabaseConnection, config: &Config) -> Result<(), String> {
    let (Some(username), Some(email), Some(password)) = (
        config.admin_username.as_deref(),
        config.admin_email.as_deref(),
        config.admin_password.as_deref(),
    ) else {
        tracing::debug!("ADMIN_* not fully set, skipping superuser seeding");
        return Ok(());
    };

    let exists = UserRepository::find_by_username(db, username)
        .await
        .map_err(|e| e.to_string())?;

    if exists.is_none() {
        let password_hash = AuthService::hash_password(password).map_err(|e| e.to_string())?;

        UserRepository::create(
            db,
            NewUser {
                username: username.to_string(),
                email: email.to_string(),
                password_hash,
                is_staff: true,
                is_superuser: true,
            },
        )
        .await
        .map_err(|e| e.to_string())?;

        tracing::info!("Superuser '{}' created", username);
    }

    Ok(())
}
