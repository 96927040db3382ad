//! ObjectId path parameter extractor with shape validation.

use crate::errors::AppError;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
    response::{IntoResponse, Response},
};
use bson::oid::ObjectId;

/// Extractor for ObjectId path parameters.
///
/// Rejects any id that is not exactly 24 hex characters with a 400
/// response before the handler (and therefore any storage call) runs.
///
/// # Example
/// ```ignore
/// use axum_helpers::extractors::ObjectIdPath;
///
/// async fn get_project(ObjectIdPath(id): ObjectIdPath) -> String {
///     format!("Project ID: {}", id)
/// }
/// ```
pub struct ObjectIdPath(pub ObjectId);

impl<S> FromRequestParts<S> for ObjectIdPath
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| e.into_response())?;

        if id.len() != 24 {
            return Err(AppError::InvalidObjectId(format!(
                "Invalid id '{}': expected a 24-character hex string",
                id
            ))
            .into_response());
        }

        match ObjectId::parse_str(&id) {
            Ok(oid) => Ok(ObjectIdPath(oid)),
            Err(_) => Err(AppError::InvalidObjectId(format!(
                "Invalid id '{}': expected a 24-character hex string",
                id
            ))
            .into_response()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http::Request, http::StatusCode, routing::get};
    use tower::ServiceExt;

    fn app() -> Router {
        Router::new().route(
            "/{id}",
            get(|ObjectIdPath(id): ObjectIdPath| async move { id.to_hex() }),
        )
    }

    #[tokio::test]
    async fn test_valid_object_id_is_accepted() {
        let id = ObjectId::new().to_hex();
        let response = app()
            .oneshot(
                Request::builder()
                    .uri(format!("/{}", id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_wrong_length_is_rejected() {
        let response = app()
            .oneshot(Request::builder().uri("/abc123").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_non_hex_24_chars_is_rejected() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/zzzzzzzzzzzzzzzzzzzzzzzz")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
