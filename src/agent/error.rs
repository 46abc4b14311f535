//! Error types for backend calls.

use thiserror::Error;

/// Errors that can occur when calling the dialogue service or the completion
/// service.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AgentError {
    /// Network connectivity error (DNS, connection refused, reset).
    #[error("Network error: {0}")]
    Network(String),

    /// Request exceeded its deadline.
    #[error("Request timeout after {0}ms")]
    Timeout(u64),

    /// Backend answered with a well-formed but empty reply list.
    #[error("Backend returned no replies")]
    EmptyResponse,

    /// Backend is throttling this client.
    #[error("Rate limit exceeded: {0}")]
    RateLimited(String),

    /// Backend returned an error response (4xx, 5xx).
    #[error("Backend error {status}: {message}")]
    Upstream { status: u16, message: String },

    /// Backend response doesn't match the expected format.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Client is missing required configuration.
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl AgentError {
    /// Transient transport failures are the only errors worth retrying.
    pub fn is_transient(&self) -> bool {
        matches!(self, AgentError::Network(_))
    }

    /// Short label used in logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            AgentError::Network(_) => "network",
            AgentError::Timeout(_) => "timeout",
            AgentError::EmptyResponse => "empty_response",
            AgentError::RateLimited(_) => "rate_limited",
            AgentError::Upstream { .. } => "upstream",
            AgentError::InvalidResponse(_) => "malformed_response",
            AgentError::Configuration(_) => "configuration",
        }
    }

    pub(crate) fn from_reqwest(e: reqwest::Error, timeout_ms: u64) -> Self {
        if e.is_timeout() {
            AgentError::Timeout(timeout_ms)
        } else {
            AgentError::Network(e.to_string())
        }
    }
}
