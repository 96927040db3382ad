//! Method override for HTML form submissions.
//!
//! Plain HTML forms can only issue GET and POST. The long-standing
//! workaround is a hidden `_method` field carrying the intended verb;
//! this middleware rewrites such POSTs before routing so `PUT` and
//! `DELETE` routes work from a browser form.

use axum::{
    body::{Body, to_bytes},
    extract::Request,
    http::{Method, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::errors::{ErrorCode, error_response};

/// Form bodies larger than this are passed through untouched; anything
/// that big is not a hand-written HTML form.
const MAX_FORM_BYTES: usize = 1024 * 1024;

/// Middleware that honors a `_method` field in urlencoded POST bodies.
///
/// A POST with `_method=PUT` (or `DELETE`/`PATCH`) is rewritten to the
/// named method, with the `_method` field stripped from the body so
/// downstream deserialization never sees it. All other requests pass
/// through unchanged.
///
/// Apply it by wrapping the finished router (`tower::Layer::layer`),
/// not via `Router::layer`: router layers run after the route has
/// matched, where the original POST would already have answered 405.
pub async fn method_override(request: Request, next: Next) -> Response {
    if request.method() != Method::POST || !is_urlencoded_form(&request) {
        return next.run(request).await;
    }

    let (mut parts, body) = request.into_parts();

    let bytes = match to_bytes(body, MAX_FORM_BYTES).await {
        Ok(bytes) => bytes,
        Err(_) => {
            return error_response(
                StatusCode::BAD_REQUEST,
                "Failed to read request body".to_string(),
                ErrorCode::ValidationError,
            )
            .into_response();
        }
    };

    let pairs: Vec<(String, String)> = match serde_urlencoded::from_bytes(&bytes) {
        Ok(pairs) => pairs,
        Err(_) => {
            // Not parseable as a form; let the downstream extractor reject it
            let request = Request::from_parts(parts, Body::from(bytes));
            return next.run(request).await;
        }
    };

    let override_method = pairs
        .iter()
        .find(|(key, _)| key == "_method")
        .and_then(|(_, value)| Method::from_bytes(value.to_ascii_uppercase().as_bytes()).ok());

    let request = match override_method {
        Some(method) if matches!(method, Method::PUT | Method::DELETE | Method::PATCH) => {
            parts.method = method;

            let remaining: Vec<(String, String)> = pairs
                .into_iter()
                .filter(|(key, _)| key != "_method")
                .collect();
            let new_body = serde_urlencoded::to_string(&remaining).unwrap_or_default();

            // Content-Length changed along with the body
            parts.headers.remove(header::CONTENT_LENGTH);
            Request::from_parts(parts, Body::from(new_body))
        }
        _ => Request::from_parts(parts, Body::from(bytes)),
    };

    next.run(request).await
}

fn is_urlencoded_form(request: &Request) -> bool {
    request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|ct| ct.starts_with("application/x-www-form-urlencoded"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Form, Router, middleware,
        routing::{delete, post, put},
    };
    use http_body_util::BodyExt;
    use serde::Deserialize;
    use tower::{Layer, ServiceExt};

    #[derive(Deserialize)]
    struct NameForm {
        name: String,
    }

    // The layer wraps the finished router so the verb is rewritten
    // before routing, matching how the server wires it up.
    fn app()
    -> impl tower::Service<Request, Response = Response, Error = std::convert::Infallible> {
        let router = Router::new()
            .route("/create", post(|| async { "created" }))
            .route(
                "/update",
                put(|Form(form): Form<NameForm>| async move { form.name }),
            )
            .route("/delete", delete(|| async { "deleted" }));
        middleware::from_fn(method_override).layer(router)
    }

    fn form_post(uri: &str, body: &str) -> Request {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_post_with_method_put_reaches_put_route() {
        let response = app()
            .oneshot(form_post("/update", "_method=PUT&name=alpha"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        // The _method field must be stripped before deserialization
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"alpha");
    }

    #[tokio::test]
    async fn test_post_with_method_delete_reaches_delete_route() {
        let response = app()
            .oneshot(form_post("/delete", "_method=DELETE"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_plain_post_passes_through() {
        let response = app()
            .oneshot(form_post("/create", "name=alpha"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_get_override_is_ignored() {
        // Only PUT/DELETE/PATCH may be smuggled through a form
        let response = app()
            .oneshot(form_post("/create", "_method=GET&name=alpha"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
