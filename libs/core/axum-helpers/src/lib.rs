//! # Axum Helpers
//!
//! Utilities, middleware, and helpers shared by the HTTP-facing crates.
//!
//! ## Modules
//!
//! - **[`errors`]**: Structured error responses with error codes
//! - **[`extractors`]**: Custom extractors (ObjectId path, validated payload)
//! - **[`http`]**: HTTP middleware (method override, security headers)
//! - **[`server`]**: Router setup, health checks, graceful shutdown

pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

// Re-export server types
pub use server::{
    HealthResponse, ShutdownCoordinator, create_production_app, create_router, health_router,
};

// Re-export HTTP middleware
pub use http::{method_override, security_headers};

// Re-export error types
pub use errors::{AppError, ErrorCode, ErrorResponse};

// Re-export extractors
pub use extractors::{ObjectIdPath, ResponseMode, ValidatedPayload};
