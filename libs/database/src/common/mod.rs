//! Shared database utilities.

pub mod retry;

pub use retry::{retry, retry_with_backoff, RetryConfig};
