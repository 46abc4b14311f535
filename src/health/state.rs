//! Cached health verdict.

use std::sync::Mutex;
use std::time::Duration;
use tokio::time::Instant;

/// Outcome of one probe, stamped with the instant the probe started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealthVerdict {
    pub healthy: bool,
    pub checked_at: Instant,
}

impl HealthVerdict {
    /// A verdict is reusable until `checked_at + interval`.
    pub fn is_fresh(&self, now: Instant, interval: Duration) -> bool {
        now.saturating_duration_since(self.checked_at) < interval
    }
}

/// Last-write-wins holder for the newest verdict.
///
/// A probe that resolves late must not replace a verdict from a probe that
/// started after it, so writes compare `checked_at` instead of overwriting.
#[derive(Debug, Default)]
pub struct HealthCache {
    verdict: Mutex<Option<HealthVerdict>>,
}

impl HealthCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<HealthVerdict> {
        *self.lock()
    }

    /// Cached health if still fresh.
    pub fn fresh(&self, now: Instant, interval: Duration) -> Option<bool> {
        self.get()
            .filter(|v| v.is_fresh(now, interval))
            .map(|v| v.healthy)
    }

    /// Store `verdict` unless a newer one is already cached. Returns whether
    /// it was stored.
    pub fn record(&self, verdict: HealthVerdict) -> bool {
        let mut current = self.lock();
        match *current {
            Some(existing) if existing.checked_at > verdict.checked_at => false,
            _ => {
                *current = Some(verdict);
                true
            }
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<HealthVerdict>> {
        // The guarded value is Copy and always valid, so a poisoned lock is still usable
        self.verdict.lock().unwrap_or_else(|e| e.into_inner())
    }
}
