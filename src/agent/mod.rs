//! Backend clients.
//!
//! Two remote services can answer a customer message:
//!
//! - the **primary** dialogue service, reached over its REST webhook channel
//!   ([`DialogueBackend`], implemented by [`PrimaryClient`])
//! - the **completion** service used for generative fallback
//!   ([`CompletionBackend`], implemented by [`OpenAIAgent`])
//!
//! Both traits are object-safe and used as `Arc<dyn ...>` so the orchestrator
//! can be exercised against in-process fakes.

use async_trait::async_trait;

pub mod error;
pub mod openai;
pub mod primary;
pub mod retry;
pub mod types;

pub use error::AgentError;
pub use openai::OpenAIAgent;
pub use primary::PrimaryClient;
pub use retry::RetryPolicy;
pub use types::{
    Button, ChatCompletionRequest, ChatCompletionResponse, CompletionMessage, ContextMessage,
    DialogueMetadata, DialogueRequest, EntityValue, HealthStatus, IntentRanking, PrimaryCustom,
    PrimaryReply,
};

/// The dialogue-management service consulted first on every turn.
///
/// # Cancellation Safety
///
/// Dropping a returned future aborts the in-flight HTTP request.
#[async_trait]
pub trait DialogueBackend: Send + Sync + 'static {
    /// Human-readable name for logging.
    fn name(&self) -> &str;

    /// Probe the service's health endpoint.
    ///
    /// - `Ok(HealthStatus::Healthy)` on a 2xx answer
    /// - `Ok(HealthStatus::Unhealthy)` on any other status
    /// - `Err(AgentError::Network | AgentError::Timeout)` when unreachable
    async fn health_check(&self) -> Result<HealthStatus, AgentError>;

    /// Deliver one customer message and return the service's replies.
    ///
    /// Transient network failures are retried internally. An empty reply
    /// list is reported as `AgentError::EmptyResponse`.
    async fn send(&self, request: &DialogueRequest) -> Result<Vec<PrimaryReply>, AgentError>;
}

/// Chat-completion style generative model.
#[async_trait]
pub trait CompletionBackend: Send + Sync + 'static {
    fn name(&self) -> &str;

    /// Whether the backend has the credentials it needs to be called.
    fn is_configured(&self) -> bool {
        true
    }

    /// Execute a non-streaming chat completion.
    ///
    /// Rate limiting is reported as `AgentError::RateLimited`, distinct from
    /// other upstream failures.
    async fn chat_completion(
        &self,
        request: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, AgentError>;
}
