use axum::{extract::State, response::IntoResponse};
use crate::config::AppState;
use crate::models::auth_model::LoginRequest;
use crate::services::auth_service::AuthService;
use crate::utils::api_response::ResponseBuilder;
use crate::utils::validated_wrapper::ValidatedJson;

pub async fn admin_login_handler(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> impl IntoResponse {
    match AuthService::login(&state.db, &state.config, &payload.login_id, &payload.password).await {
        Ok(res) => ResponseBuilder::success("LOGIN_SUCCESS", "Logged in", res).into_response(),
        Err(err) => ResponseBuilder::from_error(err).into_response(),
    }
}
