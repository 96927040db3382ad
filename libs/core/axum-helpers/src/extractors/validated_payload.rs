//! Body extractor accepting JSON or urlencoded form input, with
//! automatic validation via the `validator` crate.

use crate::errors::{ErrorCode, ErrorResponse};
use axum::{
    extract::{Form, FromRequest, Json, Request},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use validator::Validate;

/// Extractor that deserializes the request body from JSON
/// (`application/json`) or an urlencoded form
/// (`application/x-www-form-urlencoded`), then validates it.
///
/// Both content types deserialize into the same DTO, so browser form
/// posts and API clients share one validation path. Validation
/// failures return a structured 400 with per-field details.
///
/// # Example
/// ```ignore
/// use axum_helpers::extractors::ValidatedPayload;
///
/// async fn create_project(ValidatedPayload(input): ValidatedPayload<ProjectInput>) { /* ... */ }
/// ```
pub struct ValidatedPayload<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedPayload<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();

        let data: T = if content_type.starts_with("application/json") {
            let Json(data) = Json::<T>::from_request(req, state)
                .await
                .map_err(|e| invalid_body_response(e.body_text()))?;
            data
        } else if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(data) = Form::<T>::from_request(req, state)
                .await
                .map_err(|e| invalid_body_response(e.body_text()))?;
            data
        } else {
            let body = Json(ErrorResponse {
                code: ErrorCode::UnsupportedMediaType.code(),
                error: ErrorCode::UnsupportedMediaType.as_str().to_string(),
                message: format!("Unsupported content type '{}'", content_type),
                details: None,
            });
            return Err((StatusCode::UNSUPPORTED_MEDIA_TYPE, body).into_response());
        };

        data.validate().map_err(|e| {
            // Convert validator errors to structured JSON, keyed by field
            let details = e
                .field_errors()
                .iter()
                .map(|(field, errors)| {
                    let error_messages: Vec<serde_json::Value> = errors
                        .iter()
                        .map(|err| {
                            serde_json::json!({
                                "code": err.code,
                                "message": err.message,
                                "params": err.params,
                            })
                        })
                        .collect();
                    (field.to_string(), serde_json::json!(error_messages))
                })
                .collect::<serde_json::Map<_, _>>();

            let error_response = ErrorResponse {
                code: ErrorCode::ValidationError.code(),
                error: ErrorCode::ValidationError.as_str().to_string(),
                message: "Request validation failed".to_string(),
                details: Some(serde_json::Value::Object(details)),
            };

            (StatusCode::BAD_REQUEST, Json(error_response)).into_response()
        })?;

        Ok(ValidatedPayload(data))
    }
}

/// Missing fields, wrong types, and unparseable values are request
/// validation failures, so they answer 400 in the standard error shape
/// rather than the extractor's default rejection.
fn invalid_body_response(message: String) -> Response {
    let body = Json(ErrorResponse {
        code: ErrorCode::ValidationError.code(),
        error: ErrorCode::ValidationError.as_str().to_string(),
        message,
        details: None,
    });
    (StatusCode::BAD_REQUEST, body).into_response()
}
