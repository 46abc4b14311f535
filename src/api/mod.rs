//! # HTTP API
//!
//! JSON endpoints in front of the [`Orchestrator`].
//!
//! ## Endpoints
//!
//! - `POST /v1/chat` - answer one customer message
//! - `POST /v1/extract` - run the entity extractor on a text
//! - `GET|DELETE /v1/conversations/:session_id` - stored conversation state
//! - `GET /v1/conversations/:session_id/messages` - in-memory message history
//! - `GET /health` - dialogue-service and fallback status
//! - `GET /metrics` - Prometheus metrics
//!
//! ## Example
//!
//! ```no_run
//! use brick::api::{create_router, AppState};
//! use brick::config::BrickConfig;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Arc::new(BrickConfig::default());
//! let state = Arc::new(AppState::new(config));
//! let app = create_router(state);
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Errors use a single JSON envelope:
//! ```json
//! {
//!   "error": {
//!     "message": "message must not be empty",
//!     "type": "invalid_request_error",
//!     "param": "message",
//!     "code": "invalid_request_error"
//!   }
//! }
//! ```
//!
//! A chat turn never fails with an error envelope once the request is valid;
//! dialogue-service and model failures are answered with recovery replies.

mod chat;
mod conversations;
mod error;
mod extract;
mod health;

pub use chat::{ChatRequest, ChatResponse};
pub use error::{ApiError, ApiErrorBody};
pub use extract::ExtractRequest;
pub use health::{FallbackHealth, HealthResponse, PrimaryHealth};

use crate::config::BrickConfig;
use crate::logging::propagate_request_id;
use crate::metrics::PrometheusHandle;
use crate::routing::Orchestrator;
use axum::{
    routing::{get, post},
    Router,
};
use reqwest::Client;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Shared application state accessible to all handlers.
pub struct AppState {
    pub orchestrator: Arc<Orchestrator>,
    pub config: Arc<BrickConfig>,
    /// Server startup time for uptime tracking
    pub start_time: Instant,
    pub metrics_handle: PrometheusHandle,
}

impl AppState {
    /// Build the orchestrator and every client it needs from `config`.
    pub fn new(config: Arc<BrickConfig>) -> Self {
        let client = Client::builder()
            .pool_max_idle_per_host(10)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Falling back to default HTTP client");
                Client::new()
            });
        let orchestrator = Arc::new(Orchestrator::from_config(&config, Arc::new(client)));
        Self::with_orchestrator(orchestrator, config)
    }

    /// State around an already-built orchestrator.
    pub fn with_orchestrator(orchestrator: Arc<Orchestrator>, config: Arc<BrickConfig>) -> Self {
        Self {
            orchestrator,
            config,
            start_time: Instant::now(),
            metrics_handle: crate::metrics::handle_or_detached(),
        }
    }

    /// Deadline for one chat turn.
    pub fn turn_timeout(&self) -> Duration {
        self.config.server.turn_timeout()
    }
}

/// Create the API router with all endpoints and layers configured.
pub fn create_router(state: Arc<AppState>) -> Router {
    let body_limit = state.config.server.max_body_bytes;

    Router::new()
        .route("/v1/chat", post(chat::handle))
        .route("/v1/extract", post(extract::handle))
        .route(
            "/v1/conversations/:session_id",
            get(conversations::get_state).delete(conversations::delete_state),
        )
        .route(
            "/v1/conversations/:session_id/messages",
            get(conversations::get_messages),
        )
        .route("/health", get(health::handle))
        .route("/metrics", get(crate::metrics::handler::metrics_handler))
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(axum::middleware::from_fn(propagate_request_id))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
