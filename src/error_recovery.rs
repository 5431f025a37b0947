// src/error_recovery.rs
//! Retry with exponential backoff for store operations.

use crate::error::AppError;
use std::time::Duration;

/// Bounds for a retried operation.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: crate::constants::RETRY_MAX_ATTEMPTS,
            initial_delay: crate::constants::RETRY_INITIAL_DELAY,
            max_delay: crate::constants::RETRY_MAX_DELAY,
        }
    }
}

/// Retries an async operation with exponential backoff.
///
/// Only transient errors are retried; a `NotFound` or malformed response
/// is returned immediately. `on_retry` is invoked before each sleep with
/// the attempt number that just failed, letting callers surface progress
/// (the page lifecycle uses this to enter its fallback state).
pub async fn retry_with_backoff<F, T, Fut, H>(
    policy: RetryPolicy,
    mut operation: F,
    mut on_retry: H,
) -> Result<T, AppError>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, AppError>>,
    H: FnMut(u32, &AppError),
{
    let mut delay = policy.initial_delay;
    let mut last_error = None;

    for attempt in 1..=policy.max_attempts {
        match operation().await {
            Ok(result) => return Ok(result),
            Err(e) => {
                if !e.is_transient() || attempt == policy.max_attempts {
                    return Err(e);
                }

                log::warn!("Attempt {} failed ({}), retrying after {:?}", attempt, e, delay);
                on_retry(attempt, &e);
                last_error = Some(e);

                tokio::time::sleep(delay).await;
                delay = std::cmp::min(delay * 2, policy.max_delay);
            }
        }
    }

    Err(last_error.unwrap_or_else(|| AppError::InternalError {
        message: "Retry failed with no error".to_string(),
        source: None,
    }))
}
