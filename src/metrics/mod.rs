//! # Metrics
//!
//! Prometheus export for the `metrics` facade used throughout the crate.
//!
//! **Counters:**
//! - `brick_replies_total{source}` - replies returned, by `primary`/`fallback`/`error`
//! - `brick_fallbacks_total{reason}` - turns answered by the fallback, by trigger
//! - `brick_primary_retries_total` - transient dialogue-service retries
//! - `brick_health_probes_total{result}` - dialogue-service health probes
//! - `brick_cache_hits_total` - memoized fallback completions served
//!
//! **Histograms:**
//! - `brick_turn_duration_seconds{source}` - end-to-end turn latency

pub mod handler;

pub use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

/// Buckets for `brick_turn_duration_seconds`, sized for a 10s primary
/// timeout plus a 15s fallback timeout.
pub const TURN_DURATION_BUCKETS: &[f64] = &[
    0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 15.0, 30.0, 60.0,
];

/// Install the global Prometheus recorder.
///
/// Fails if a recorder is already installed (e.g. a second server in the
/// same test binary); callers fall back to [`detached_handle`].
pub fn setup_metrics() -> Result<PrometheusHandle, Box<dyn std::error::Error>> {
    use metrics_exporter_prometheus::Matcher;

    let handle = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full("brick_turn_duration_seconds".to_string()),
            TURN_DURATION_BUCKETS,
        )?
        .install_recorder()?;

    Ok(handle)
}

/// Handle backed by a recorder that is not installed globally.
pub fn detached_handle() -> PrometheusHandle {
    PrometheusBuilder::new().build_recorder().handle()
}

/// Installed handle, or a detached one if a recorder already exists.
pub fn handle_or_detached() -> PrometheusHandle {
    setup_metrics().unwrap_or_else(|e| {
        tracing::debug!(error = %e, "Metrics recorder already installed, using detached handle");
        detached_handle()
    })
}
