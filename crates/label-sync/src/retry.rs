//! Fixed-delay retry wrapper for fallible async operations.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use tokio::time::sleep;
use tracing::warn;

/// Attempt budget and delay between attempts.
///
/// Fixed delay by design: the target API fails transiently and
/// recovers quickly, so jitter and backoff buy nothing here.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Total attempts, including the first
    pub attempts: u32,
    /// Sleep between attempts
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 3,
            delay: Duration::from_millis(1000),
        }
    }
}

/// Run `operation` up to `policy.attempts` times, sleeping
/// `policy.delay` between attempts, and return the final error
/// unchanged once the budget is exhausted.
///
/// # Errors
/// Returns the last error produced by `operation`.
pub async fn with_retry<T, E, F, Fut>(mut operation: F, policy: RetryPolicy) -> Result<T, E>
where
    E: Display,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let attempts = policy.attempts.max(1);

    for attempt in 1..attempts {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(e) => {
                let remaining = attempts - attempt;
                warn!(error = %e, remaining, "Operation failed, retrying");
                sleep(policy.delay).await;
            }
        }
    }

    // final attempt: the error propagates unchanged
    operation().await
}
