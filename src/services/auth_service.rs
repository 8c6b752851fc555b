use argon2::{
    password_hash::{
        rand_core::OsRng,
        PasswordHash, PasswordHasher, PasswordVerifier, SaltString
    },
    Argon2
};
use axum::http::StatusCode;
use sea_orm::*;
use uuid::Uuid;

use crate::config::Config;
use crate::entities::{user, user::Entity as User};
use crate::models::admin_model::*;
use crate::models::auth_model::LoginResponse;
use crate::repositories::user_repository::{NewUser, UserRepository};
use crate::services::post_service::ADMIN_PAGE_SIZE;
use crate::utils::api_response::ServiceError;
use crate::utils::db_utils::{icontains, map_db_err};
use crate::utils::jwt_utils::JwtUtils;
use crate::utils::pagination::fetch_page;

pub struct AuthService;

impl AuthService {
    /// Issues an admin token. Only staff accounts may sign in.
    pub async fn login(
        db: &DatabaseConnection,
        config: &Config,
        login_id: &str,
        password: &str,
    ) -> Result<LoginResponse, ServiceError> {
        let invalid = || (StatusCode::UNAUTHORIZED, "INVALID_CREDENTIALS", "Invalid username or password".to_string());

        let user = UserRepository::find_by_login_id(db, login_id)
            .await
            .map_err(|e| map_db_err(e, "Fetch user"))?
            .ok_or_else(invalid)?;

        if !Self::verify_password(password, &user.password_hash) {
            tracing::warn!("Failed admin login for {}", login_id);
            return Err(invalid());
        }

        if !user.is_staff {
            return Err((StatusCode::FORBIDDEN, "NOT_STAFF", "This account cannot access the admin".to_string()));
        }

        let (token, token_expires_at) = JwtUtils::generate_jwt(user.public_id, &config.jwt_secret, config.jwt_expires_in)
            .map_err(|_| (StatusCode::INTERNAL_SERVER_ERROR, "TOKEN_ERR", "Failed to issue token".to_string()))?;

        tracing::info!("Admin login: {}", user.username);
        Ok(LoginResponse {
            token,
            token_expires_at,
            type_: "Bearer".to_string(),
        })
    }

    pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        Ok(argon2.hash_password(password.as_bytes(), &salt)?.to_string())
    }

    pub fn verify_password(password: &str, hash: &str) -> bool {
        match PasswordHash::new(hash) {
            Ok(parsed) => Argon2::default().verify_password(password.as_bytes(), &parsed).is_ok(),
            Err(_) => false,
        }
    }

    pub async fn list_users(
        db: &DatabaseConnection,
        params: AdminListParams,
    ) -> Result<AdminListResponse<AdminUserResponse>, ServiceError> {
        let mut query = User::find().order_by_asc(user::Column::Username);

        if let Some(search) = params.search.filter(|s| !s.trim().is_empty()) {
            query = query.filter(
                Condition::any()
                    .add(icontains(user::Column::Username, &search))
                    .add(icontains(user::Column::Email, &search)),
            );
        }

        let (users, meta) = fetch_page(db, query, params.page.unwrap_or(1).max(1), ADMIN_PAGE_SIZE).await?;

        Ok(AdminListResponse {
            data: users.into_iter().map(Self::map_to_response).collect(),
            meta,
        })
    }

    pub async fn create_user(
        db: &DatabaseConnection,
        payload: CreateUserRequest,
    ) -> Result<AdminUserResponse, ServiceError> {
        let password_hash = Self::hash_password(&payload.password)
            .map_err(|_| (StatusCode::INTERNAL_SERVER_ERROR, "HASH_ERR", "Failed to hash password".to_string()))?;

        let user = UserRepository::create(
            db,
            NewUser {
                username: payload.username,
                email: payload.email,
                password_hash,
                is_staff: payload.is_staff || payload.is_superuser,
                is_superuser: payload.is_superuser,
            },
        )
        .await
        .map_err(|e| map_db_err(e, "Create user"))?;

        tracing::info!("User '{}' created", user.username);
        Ok(Self::map_to_response(user))
    }

    /// Removes the user together with every post they authored.
    pub async fn delete_user(
        db: &DatabaseConnection,
        public_id: Uuid,
        requested_by: i64,
    ) -> Result<(), ServiceError> {
        let user = UserRepository::find_by_public_id(db, public_id)
            .await
            .map_err(|e| map_db_err(e, "Fetch user"))?
            .ok_or((StatusCode::NOT_FOUND, "USER_NOT_FOUND", "User not found".to_string()))?;

        if user.id == requested_by {
            return Err((StatusCode::BAD_REQUEST, "SELF_DELETE", "You cannot delete your own account".to_string()));
        }

        User::delete_by_id(user.id).exec(db).await
            .map_err(|e| map_db_err(e, "Delete user"))?;

        tracing::info!("User '{}' deleted", user.username);
        Ok(())
    }

    fn map_to_response(model: user::Model) -> AdminUserResponse {
        AdminUserResponse {
            id: model.public_id,
            username: model.username,
            email: model.email,
            is_staff: model.is_staff,
            is_superuser: model.is_superuser,
            created_at: model.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_hash_verifies_only_the_original() {
        let hash = AuthService::hash_password("correct horse").unwrap();
        assert!(AuthService::verify_password("correct horse", &hash));
        assert!(!AuthService::verify_password("battery staple", &hash));
    }

    #[test]
    fn garbage_hash_never_verifies() {
        assert!(!AuthService::verify_password("anything", "not-a-phc-string"));
    }
}
