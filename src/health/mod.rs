//! Health monitoring for the dialogue service.
//!
//! The monitor probes the service's health endpoint at most once per
//! `interval_seconds` and reuses the cached verdict in between. A probe that
//! errors or times out counts as unhealthy; it is never surfaced as an error.

mod config;
mod state;


pub use config::*;
pub use state::*;

use crate::agent::{DialogueBackend, HealthStatus};
use std::sync::Arc;
use tokio::time::Instant;

/// Cached, rate-limited health probing of one dialogue backend.
pub struct HealthMonitor {
    backend: Arc<dyn DialogueBackend>,
    config: HealthCheckConfig,
    cache: HealthCache,
}

impl HealthMonitor {
    pub fn new(backend: Arc<dyn DialogueBackend>, config: HealthCheckConfig) -> Self {
        Self {
            backend,
            config,
            cache: HealthCache::new(),
        }
    }

    /// Whether the backend should be tried for this turn.
    pub async fn is_healthy(&self) -> bool {
        if !self.config.enabled {
            return true;
        }

        let now = Instant::now();
        if let Some(healthy) = self.cache.fresh(now, self.config.interval()) {
            tracing::trace!(healthy, "Reusing cached health verdict");
            return healthy;
        }

        let healthy = self.probe().await;
        let stored = self.cache.record(HealthVerdict {
            healthy,
            checked_at: now,
        });
        if !stored {
            tracing::debug!(healthy, "Discarding stale health probe result");
        }
        healthy
    }

    /// Most recent verdict, fresh or not.
    pub fn last_verdict(&self) -> Option<HealthVerdict> {
        self.cache.get()
    }

    async fn probe(&self) -> bool {
        let timeout = self.config.timeout();
        let (healthy, result) =
            match tokio::time::timeout(timeout, self.backend.health_check()).await {
                Ok(Ok(HealthStatus::Healthy)) => (true, "healthy"),
                Ok(Ok(HealthStatus::Unhealthy)) => (false, "unhealthy"),
                Ok(Err(e)) => {
                    tracing::warn!(
                        backend = self.backend.name(),
                        error = %e,
                        "Health probe failed"
                    );
                    (false, "error")
                }
                Err(_) => {
                    tracing::warn!(
                        backend = self.backend.name(),
                        timeout_ms = timeout.as_millis() as u64,
                        "Health probe timed out"
                    );
                    (false, "timeout")
                }
            };

        metrics::counter!("brick_health_probes_total", "result" => result).increment(1);
        tracing::debug!(backend = self.backend.name(), result, "Health probe finished");
        healthy
    }
}
