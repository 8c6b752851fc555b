use crate::config::AppState;
use crate::models::auth_model::CurrentUser;
use crate::repositories::user_repository::UserRepository;
use crate::utils::api_response::ResponseBuilder;
use crate::utils::jwt_utils::JwtUtils;
use axum::{
    body::Body,
    extract::State,
    http::{header, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use jsonwebtoken::errors::ErrorKind;

/// Admits requests carrying a valid bearer token of a staff user and
/// injects that user as `CurrentUser`.
pub async fn staff_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    // 1. Get Token from Header
    let auth_header = match req.headers().get(header::AUTHORIZATION) {
        Some(header) => header,
        None => {
            return ResponseBuilder::error::<()>(
                StatusCode::UNAUTHORIZED,
                "AUTH_MISSING",
                "Authorization header is missing",
            )
            .into_response();
        }
    };

    let auth_str = match auth_header.to_str() {
        Ok(s) => s,
        Err(_) => {
            return ResponseBuilder::error::<()>(
                StatusCode::UNAUTHORIZED,
                "AUTH_INVALID_FORMAT",
                "Invalid Authorization header format",
            )
            .into_response();
        }
    };

    let Some(token) = auth_str.strip_prefix("Bearer ") else {
        return ResponseBuilder::error::<()>(
            StatusCode::UNAUTHORIZED,
            "AUTH_INVALID_SCHEME",
            "Invalid token format. Missing 'Bearer ' prefix",
        )
        .into_response();
    };

    // 2. Validate JWT
    let token_data = match JwtUtils::validate_jwt(token, &state.config.jwt_secret) {
        Ok(data) => data,
        Err(e) => {
            let (code, message) = match e.kind() {
                ErrorKind::ExpiredSignature => ("TOKEN_EXPIRED", "Token has expired"),
                ErrorKind::InvalidToken => ("TOKEN_INVALID", "Token is invalid"),
                ErrorKind::InvalidSignature => ("TOKEN_BAD_SIGNATURE", "Invalid token signature"),
                _ => ("AUTH_FAILED", "Authentication failed"),
            };

            return ResponseBuilder::error::<()>(StatusCode::UNAUTHORIZED, code, message).into_response();
        }
    };

    // 3. Resolve the user; staff status is re-checked on every request
    let user = match UserRepository::find_by_public_id(&state.db, token_data.claims.sub).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return ResponseBuilder::error::<()>(StatusCode::UNAUTHORIZED, "USER_NOT_FOUND", "User not found")
                .into_response();
        }
        Err(e) => {
            tracing::error!("Failed to load admin user: {}", e);
            return ResponseBuilder::error::<()>(
                StatusCode::INTERNAL_SERVER_ERROR,
                "DB_ERR",
                "Database error",
            )
            .into_response();
        }
    };

    if !user.is_staff {
        tracing::warn!("Non-staff user {} tried to reach {}", user.username, req.uri().path());
        return ResponseBuilder::error::<()>(
            StatusCode::FORBIDDEN,
            "NOT_STAFF",
            "This account cannot access the admin",
        )
        .into_response();
    }

    // 4. Inject CurrentUser into request
    req.extensions_mut().insert(CurrentUser {
        id: user.id,
        public_id: user.public_id,
        username: user.username,
        is_superuser: user.is_superuser,
    });

    next.run(req).await
}
