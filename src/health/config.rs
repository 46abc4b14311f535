//! Configuration for health checking.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for probing the dialogue service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthCheckConfig {
    /// When false the dialogue service is assumed healthy and never probed
    pub enabled: bool,
    /// How long a verdict is reused before probing again
    pub interval_seconds: u64,
    /// Timeout for each probe
    pub timeout_seconds: u64,
}

impl Default for HealthCheckConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_seconds: 30,
            timeout_seconds: 5,
        }
    }
}

impl HealthCheckConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_seconds)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}
