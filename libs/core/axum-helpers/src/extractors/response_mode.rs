//! Response-mode negotiation from the `Accept` header.

use axum::{extract::FromRequestParts, http::header, http::request::Parts};
use std::convert::Infallible;

/// The response shape a client asked for.
///
/// Browser form posts send `Accept: text/html` and expect a redirect
/// after a successful mutation; API clients get JSON bodies. Errors use
/// the structured JSON shape in both modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseMode {
    /// Machine-readable JSON payloads (the default).
    #[default]
    Structured,
    /// Rendered-page flow: mutations answer with a redirect.
    Display,
}

impl ResponseMode {
    /// Negotiate the mode from an `Accept` header value.
    pub fn from_accept(accept: Option<&str>) -> Self {
        match accept {
            Some(value) if value.contains("text/html") => ResponseMode::Display,
            _ => ResponseMode::Structured,
        }
    }

    pub fn is_display(self) -> bool {
        self == ResponseMode::Display
    }
}

impl<S> FromRequestParts<S> for ResponseMode
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let accept = parts
            .headers
            .get(header::ACCEPT)
            .and_then(|v| v.to_str().ok());
        Ok(ResponseMode::from_accept(accept))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_accept_defaults_to_structured() {
        assert_eq!(ResponseMode::from_accept(None), ResponseMode::Structured);
    }

    #[test]
    fn test_json_accept_is_structured() {
        assert_eq!(
            ResponseMode::from_accept(Some("application/json")),
            ResponseMode::Structured
        );
    }

    #[test]
    fn test_html_accept_is_display() {
        assert_eq!(
            ResponseMode::from_accept(Some("text/html,application/xhtml+xml")),
            ResponseMode::Display
        );
    }
}
