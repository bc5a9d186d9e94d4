use std::time::Duration;

use super::constants::{BASE_RETRY_WAIT_MS, MAX_RETRIES, MAX_RETRY_WAIT_MS};

/// Configuration for the automatic retry mechanism applied to rate-limited requests.
///
/// Only HTTP 429 responses are retried. The delay before retry `r` is
/// `min(2^r * base_wait, max_wait)`, with no jitter, so the schedule is fully
/// deterministic. After `max_retries` consecutive 429 responses the last response is
/// handed to the decoder unchanged.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RetryConfig {
    /// Enables or disables the retry mechanism.
    pub enabled: bool,
    /// The maximum number of retries to attempt. The total number of attempts will be `max_retries + 1`.
    pub max_retries: u32,
    /// The delay before the first retry.
    pub base_wait: Duration,
    /// The maximum delay between retries.
    pub max_wait: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_retries: MAX_RETRIES,
            base_wait: Duration::from_millis(BASE_RETRY_WAIT_MS),
            max_wait: Duration::from_millis(MAX_RETRY_WAIT_MS),
        }
    }
}

impl RetryConfig {
    /// The delay before retry number `attempt` (zero-based).
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let pow = 2u128.saturating_pow(attempt);
        let millis = self
            .base_wait
            .as_millis()
            .saturating_mul(pow)
            .min(self.max_wait.as_millis());
        Duration::from_millis(millis as u64)
    }
}
