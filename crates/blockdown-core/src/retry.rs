//! Retry with exponential backoff for transient document-store failures.
//!
//! The store rate-limits aggressively (429) and occasionally answers with
//! 5xx. Those are the only errors worth retrying; everything else is
//! propagated to the caller untouched on the first failure. When the store
//! supplies a `Retry-After` hint, it wins over the computed backoff.

use crate::error::{Error, Result};
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;
use tokio::time::sleep;

/// Retry configuration
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of retries after the initial attempt
    pub max_retries: u32,
    /// Base backoff duration (doubled per retry)
    pub base_delay: Duration,
    /// Ceiling applied to every computed delay
    pub max_delay: Duration,
}

impl RetryConfig {
    /// Store-facing defaults: 3 retries, 1s base, 30s cap
    pub fn conservative() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_millis(1000),
            max_delay: Duration::from_millis(30_000),
        }
    }

    /// Compute the delay for retry attempt `attempt` (0-indexed).
    ///
    /// A server `Retry-After` hint on the error takes precedence over the
    /// exponential schedule; either way the result is capped at
    /// `max_delay`. No jitter is applied.
    pub fn delay_for(&self, error: &Error, attempt: u32) -> Duration {
        let delay = match error.retry_after_secs() {
            Some(secs) => Duration::from_secs_f64(secs),
            None => {
                let millis = (self.base_delay.as_millis() as u64)
                    .saturating_mul(1u64 << attempt.min(63));
                Duration::from_millis(millis)
            }
        };
        delay.min(self.max_delay)
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self::conservative()
    }
}

/// Run `op`, retrying transient failures with exponential backoff.
///
/// Non-retryable errors (see [`Error::is_retryable`]) propagate
/// immediately. After `max_retries` consecutive retryable failures the
/// most recent error is re-thrown unchanged, with no further waiting.
/// State is local to one invocation.
pub async fn with_retry<F, T>(config: &RetryConfig, mut op: F) -> Result<T>
where
    F: FnMut() -> Pin<Box<dyn Future<Output = Result<T>> + Send>>,
{
    let mut attempt = 0;

    loop {
        match op().await {
            Ok(result) => return Ok(result),
            Err(e) => {
                if !e.is_retryable() || attempt >= config.max_retries {
                    return Err(e);
                }
                let delay = config.delay_for(&e, attempt);
                log::trace!("transient failure, retry {} in {:?}", attempt + 1, delay);
                sleep(delay).await;
                attempt += 1;
            }
        }
    }
}
