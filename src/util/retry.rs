//! Exponential backoff with full jitter for outbound HTTP calls.
use std::time::Duration;

use anyhow::{Context, Result};
use rand::Rng;
use reqwest::{RequestBuilder, Response};
use tracing::warn;

/// Retry policy for outbound requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryConfig {
    /// Maximum attempts, including the first.
    pub max_attempts: usize,
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_ms: 250,
            max_delay_ms: 10_000,
        }
    }
}

impl RetryConfig {
    #[must_use]
    pub const fn new(max_attempts: usize, base_delay_ms: u64, max_delay_ms: u64) -> Self {
        Self {
            max_attempts,
            base_delay_ms,
            max_delay_ms,
        }
    }

    /// Policy that never retries, for tests.
    #[must_use]
    pub const fn none() -> Self {
        Self::new(1, 0, 0)
    }

    /// Delay before attempt `attempt` (0-based): `random(0, min(cap, base * 2^(attempt-1)))`.
    #[must_use]
    pub fn delay_for_attempt(&self, attempt: usize) -> Duration {
        if attempt == 0 {
            return Duration::ZERO;
        }

        let shift = u32::try_from(attempt - 1).unwrap_or(u32::MAX).min(63);
        let exponential_delay = self.base_delay_ms.saturating_mul(1_u64 << shift);
        let capped_delay = exponential_delay.min(self.max_delay_ms);

        let jittered_delay = if capped_delay > 0 {
            rand::rng().random_range(0..=capped_delay)
        } else {
            0
        };

        Duration::from_millis(jittered_delay)
    }

    #[must_use]
    pub const fn can_retry(&self, attempt: usize) -> bool {
        attempt < self.max_attempts
    }
}

/// Network errors, timeouts, 5xx and 429 are worth another try.
pub(crate) fn is_retryable_error(error: &reqwest::Error) -> bool {
    if error.is_timeout() || error.is_connect() {
        return true;
    }

    if let Some(status) = error.status() {
        if status.is_server_error() || status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return true;
        }
    }

    false
}

/// Sends `request`, retrying retryable failures per `policy`. Non-success
/// statuses are turned into errors.
pub(crate) async fn send_with_retry(
    policy: &RetryConfig,
    request: RequestBuilder,
    what: &'static str,
) -> Result<Response> {
    let mut attempt = 0;
    loop {
        tokio::time::sleep(policy.delay_for_attempt(attempt)).await;
        let builder = request
            .try_clone()
            .with_context(|| format!("{what} request cannot be retried"))?;

        match builder.send().await.and_then(Response::error_for_status) {
            Ok(response) => return Ok(response),
            Err(error) if is_retryable_error(&error) && policy.can_retry(attempt + 1) => {
                warn!(%error, attempt = attempt + 1, what, "retrying request");
                attempt += 1;
            }
            Err(error) => return Err(error).with_context(|| format!("{what} request failed")),
        }
    }
}
