//! HTTP middleware module.
//!
//! - Method override for HTML form posts
//! - Security headers
//!
//! # Example
//!
//! Security headers join the router's middleware stack; the method
//! override wraps the finished router so the verb is rewritten before
//! routing:
//!
//! ```ignore
//! use axum_helpers::http::{method_override, security_headers};
//! use tower::Layer;
//!
//! let router = Router::new()
//!     .layer(axum::middleware::from_fn(security_headers));
//! let app = axum::middleware::from_fn(method_override).layer(router);
//! ```

pub mod method_override;
pub mod security;

pub use method_override::method_override;
pub use security::security_headers;
