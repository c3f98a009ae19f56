//! Timeout utilities for network-bound work
//!
//! Result-page fetches during a web search are each bounded so one slow
//! site cannot hold up the whole answer.

use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tokio::time::timeout as tokio_timeout;

/// Error type for timeout operations
#[derive(Debug, Error)]
pub enum TimeoutError<E> {
    /// Operation completed but failed
    #[error("Operation failed: {0}")]
    OperationFailed(E),
    /// Operation timed out
    #[error("Operation timed out after {0:?}")]
    Timeout(Duration),
}

/// Execute a fallible async operation with a timeout
///
/// ```rust,ignore
/// use tooling::async_utils::timeout::with_timeout;
///
/// let body = with_timeout(Duration::from_secs(5), fetch(url)).await?;
/// ```
pub async fn with_timeout<F, T, E>(duration: Duration, operation: F) -> Result<T, TimeoutError<E>>
where
    F: Future<Output = Result<T, E>>,
{
    match tokio_timeout(duration, operation).await {
        Ok(Ok(result)) => Ok(result),
        Ok(Err(error)) => Err(TimeoutError::OperationFailed(error)),
        Err(_elapsed) => Err(TimeoutError::Timeout(duration)),
    }
}

/// Run an operation within `duration`, substituting `fallback` on failure or timeout
pub async fn or_fallback<F, T, E, D>(duration: Duration, operation: F, fallback: D) -> T
where
    F: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
    D: FnOnce(TimeoutError<E>) -> T,
{
    match with_timeout(duration, operation).await {
        Ok(value) => value,
        Err(err) => {
            tracing::debug!(error = %err, "Falling back after failed bounded operation");
            fallback(err)
        }
    }
}
