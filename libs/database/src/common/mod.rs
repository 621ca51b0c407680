//! Backend-agnostic pieces: the shared error type and retry backoff.

pub mod error;
pub mod retry;

pub use error::{DatabaseError, DatabaseResult};
pub use retry::{RetryConfig, retry, retry_with_backoff};
