//! Health check endpoint handler.

use crate::api::AppState;
use crate::routing::PrimaryStatus;
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub uptime_seconds: u64,
    pub primary: PrimaryHealth,
    pub fallback: FallbackHealth,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PrimaryHealth {
    pub configured: bool,
    /// Absent until the first probe
    #[serde(skip_serializing_if = "Option::is_none")]
    pub healthy: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checked_seconds_ago: Option<u64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FallbackHealth {
    pub configured: bool,
    pub backend: String,
}

/// Overall status from what can answer a turn right now. "unhealthy" means
/// neither the dialogue service nor the completion model is reachable.
fn overall_status(primary: &PrimaryStatus, fallback_configured: bool) -> &'static str {
    match (primary.configured, primary.healthy, fallback_configured) {
        (true, Some(true), _) => "healthy",
        (false, _, true) => "healthy",
        (_, _, true) => "degraded",
        (true, None, false) => "degraded",
        _ => "unhealthy",
    }
}

/// GET /health - Return dialogue-service and fallback status.
pub async fn handle(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let primary = state.orchestrator.primary_status();
    let fallback_configured = state.orchestrator.fallback_configured();

    Json(HealthResponse {
        status: overall_status(&primary, fallback_configured).to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        primary: PrimaryHealth {
            configured: primary.configured,
            healthy: primary.healthy,
            checked_seconds_ago: primary.checked_ago.map(|d| d.as_secs()),
        },
        fallback: FallbackHealth {
            configured: fallback_configured,
            backend: state.orchestrator.fallback_backend().to_string(),
        },
    })
}
