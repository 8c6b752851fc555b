use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// HTTP status, machine-readable code, human message.
pub type ServiceError = (StatusCode, &'static str, String);

/// Envelope shared by every endpoint: `{status, code, message, data?}`.
#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub status: &'static str,
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

#[derive(Serialize)]
pub struct ValidationErrorDetail {
    pub field: String,
    pub title: String,   // validator code (e.g. "is_required", "invalid_slug")
    pub message: String, // Human readable
}

// Status code travels next to the body
pub struct ApiResponseResult<T>(pub StatusCode, pub ApiResponse<T>);

impl<T> IntoResponse for ApiResponseResult<T>
where
    T: Serialize,
{
    fn into_response(self) -> Response {
        (self.0, Json(self.1)).into_response()
    }
}

pub struct ResponseBuilder;

impl ResponseBuilder {
    fn build<T: Serialize>(
        status_code: StatusCode,
        code: &str,
        message: &str,
        data: Option<T>,
    ) -> ApiResponseResult<T> {
        let status = if status_code.is_success() { "success" } else { "error" };
        ApiResponseResult(
            status_code,
            ApiResponse {
                status,
                code: code.to_string(),
                message: message.to_string(),
                data,
            },
        )
    }

    pub fn success<T: Serialize>(code: &str, message: &str, data: T) -> ApiResponseResult<T> {
        Self::build(StatusCode::OK, code, message, Some(data))
    }

    pub fn created<T: Serialize>(code: &str, message: &str, data: T) -> ApiResponseResult<T> {
        Self::build(StatusCode::CREATED, code, message, Some(data))
    }

    pub fn error<T: Serialize>(status_code: StatusCode, code: &str, message: &str) -> ApiResponseResult<T> {
        Self::build(status_code, code, message, None)
    }

    /// 400 carrying the per-field problems.
    pub fn validation_failed(details: Vec<ValidationErrorDetail>) -> ApiResponseResult<Vec<ValidationErrorDetail>> {
        Self::build(StatusCode::BAD_REQUEST, "VALIDATION_ERROR", "Validation failed", Some(details))
    }

    pub fn from_error(err: ServiceError) -> ApiResponseResult<()> {
        let (status, code, message) = err;
        Self::error(status, code, &message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_status_follows_http_status() {
        let ok = ResponseBuilder::success("X", "fine", 1);
        assert_eq!(ok.0, StatusCode::OK);
        assert_eq!(ok.1.status, "success");

        let err = ResponseBuilder::from_error((StatusCode::NOT_FOUND, "POST_NOT_FOUND", "Post not found".to_string()));
        assert_eq!(err.0, StatusCode::NOT_FOUND);
        assert_eq!(err.1.status, "error");
        assert_eq!(err.1.code, "POST_NOT_FOUND");
        assert!(err.1.data.is_none());
    }
}
