//! Cross-cutting helpers.

pub mod retry;

pub use retry::{retry_with_backoff, RetryConfig};
