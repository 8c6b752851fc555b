use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use validator::{Validate, ValidationErrors};
use crate::utils::api_response::{ResponseBuilder, ValidationErrorDetail};

/// JSON body that has already passed its `Validate` rules.
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: serde::de::DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload) = Json::<T>::from_request(req, state)
            .await
            .map_err(reject_body)?;

        payload
            .validate()
            .map_err(|e| ResponseBuilder::validation_failed(map_validation_errors(e)).into_response())?;

        Ok(ValidatedJson(payload))
    }
}

fn reject_body(err: JsonRejection) -> Response {
    let (status, code) = match &err {
        JsonRejection::MissingJsonContentType(_) => (StatusCode::UNSUPPORTED_MEDIA_TYPE, "UNSUPPORTED_MEDIA_TYPE"),
        JsonRejection::JsonDataError(_) => (StatusCode::BAD_REQUEST, "INVALID_PAYLOAD"),
        _ => (StatusCode::BAD_REQUEST, "INVALID_JSON"),
    };
    let message = format!("Invalid request body: {}", err.body_text());
    ResponseBuilder::error::<()>(status, code, &message).into_response()
}

/// Flattens validator output into one entry per failed rule, ordered by field.
fn map_validation_errors(errors: ValidationErrors) -> Vec<ValidationErrorDetail> {
    let mut details: Vec<ValidationErrorDetail> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |err| ValidationErrorDetail {
                field: field.to_string(),
                title: err.code.to_string(),
                message: err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value for {}", field)),
            })
        })
        .collect();

    details.sort_by(|a, b| a.field.cmp(&b.field));
    details
}
