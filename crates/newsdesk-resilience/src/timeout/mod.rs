//! Timeout wrapper for async operations.

use newsdesk_core::NewsdeskError;
use std::time::Duration;

/// Runs `f` with a deadline. An elapsed deadline becomes `NewsdeskError::Timeout`
/// naming the operation.
pub async fn with_timeout<F, Fut, T>(
    operation: &str,
    duration: Duration,
    f: F,
) -> Result<T, NewsdeskError>
where
    F: FnOnce() -> Fut,
    Fut: std::future::Future<Output = Result<T, NewsdeskError>>,
{
    tokio::time::timeout(duration, f()).await.map_err(|_| {
        NewsdeskError::Timeout(format!("{} timed out after {:?}", operation, duration))
    })?
}
