//! Custom extractors for Axum handlers.
//!
//! These reduce boilerplate and standardize error handling: malformed
//! ids and invalid payloads are rejected before handler bodies run.

pub mod object_id_path;
pub mod response_mode;
pub mod validated_payload;

pub use object_id_path::ObjectIdPath;
pub use response_mode::ResponseMode;
pub use validated_payload::ValidatedPayload;
