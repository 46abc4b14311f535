//! Bounded retry with linear backoff.

use super::AgentError;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;

/// Retry budget for transient transport failures.
///
/// The delay before retry `n` (1-based) is `n * delay_increment`, so the
/// defaults wait 1s, 2s and 3s before giving up after the fourth attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub delay_increment: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            delay_increment: Duration::from_millis(1000),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_retries: u32, delay_increment: Duration) -> Self {
        Self {
            max_retries,
            delay_increment,
        }
    }

    /// Delay to wait before the given retry (1-based).
    pub fn delay_for(&self, retry: u32) -> Duration {
        self.delay_increment.saturating_mul(retry)
    }

    /// Run `op` until it succeeds, fails with a non-transient error, or the
    /// retry budget is spent. `op` receives the 0-based attempt number.
    pub async fn run<T, F, Fut>(&self, mut op: F) -> Result<T, AgentError>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, AgentError>>,
    {
        let mut attempt = 0;
        loop {
            match op(attempt).await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_transient() && attempt < self.max_retries => {
                    attempt += 1;
                    let delay = self.delay_for(attempt);
                    tracing::debug!(
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "Transient failure, retrying"
                    );
                    metrics::counter!("brick_primary_retries_total").increment(1);
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
