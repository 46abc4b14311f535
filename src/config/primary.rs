//! Primary dialogue service configuration

use crate::agent::RetryPolicy;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Connection settings for the dialogue service.
///
/// `url` and `token` are usually supplied through `BRICK_PRIMARY_URL` and
/// `BRICK_PRIMARY_TOKEN`. When either is missing every turn is answered by
/// the generative fallback.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PrimaryConfig {
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// Deadline for a single webhook attempt
    pub timeout_seconds: u64,
    /// Extra attempts after a connection failure
    pub max_retries: u32,
    /// Backoff grows by this much per retry
    pub retry_delay_ms: u64,
}

impl Default for PrimaryConfig {
    fn default() -> Self {
        Self {
            url: None,
            token: None,
            timeout_seconds: 10,
            max_retries: 3,
            retry_delay_ms: 1000,
        }
    }
}

impl PrimaryConfig {
    /// Endpoint and credential, if both are present and non-empty.
    pub fn endpoint(&self) -> Option<(&str, &str)> {
        let url = self.url.as_deref().filter(|u| !u.trim().is_empty())?;
        let token = self.token.as_deref().filter(|t| !t.trim().is_empty())?;
        Some((url.trim_end_matches('/'), token))
    }

    pub fn is_configured(&self) -> bool {
        self.endpoint().is_some()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_retries, Duration::from_millis(self.retry_delay_ms))
    }
}
