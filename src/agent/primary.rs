//! Dialogue service client (REST webhook channel).

use super::{AgentError, DialogueBackend, DialogueRequest, HealthStatus, PrimaryReply, RetryPolicy};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::sync::Arc;
use std::time::Duration;

/// Client for a dialogue service exposing:
/// - `POST /webhooks/rest/webhook` with bearer auth
/// - `GET /health`
pub struct PrimaryClient {
    base_url: String,
    token: String,
    /// Deadline for one webhook attempt, body included
    timeout: Duration,
    /// Deadline for the health probe
    probe_timeout: Duration,
    retry: RetryPolicy,
    /// Shared HTTP client for connection pooling
    client: Arc<Client>,
}

impl PrimaryClient {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>, client: Arc<Client>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
            timeout: Duration::from_secs(10),
            probe_timeout: Duration::from_secs(5),
            retry: RetryPolicy::default(),
            client,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_probe_timeout(mut self, timeout: Duration) -> Self {
        self.probe_timeout = timeout;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    async fn send_once(&self, request: &DialogueRequest) -> Result<Vec<PrimaryReply>, AgentError> {
        let timeout_ms = self.timeout.as_millis() as u64;
        match tokio::time::timeout(self.timeout, self.post_webhook(request, timeout_ms)).await {
            Ok(result) => result,
            Err(_) => Err(AgentError::Timeout(timeout_ms)),
        }
    }

    async fn post_webhook(
        &self,
        request: &DialogueRequest,
        timeout_ms: u64,
    ) -> Result<Vec<PrimaryReply>, AgentError> {
        let url = format!("{}/webhooks/rest/webhook", self.base_url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .header("x-request-id", &request.metadata.request_id)
            .json(request)
            .send()
            .await
            .map_err(|e| AgentError::from_reqwest(e, timeout_ms))?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(AgentError::RateLimited(format!(
                "dialogue service returned {}",
                status
            )));
        }
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AgentError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| AgentError::from_reqwest(e, timeout_ms))?;

        let replies: Vec<PrimaryReply> = serde_json::from_str(&body).map_err(|e| {
            AgentError::InvalidResponse(format!("Failed to parse webhook response: {}", e))
        })?;

        if replies.is_empty() {
            return Err(AgentError::EmptyResponse);
        }
        Ok(replies)
    }
}

#[async_trait]
impl DialogueBackend for PrimaryClient {
    fn name(&self) -> &str {
        "primary"
    }

    async fn health_check(&self) -> Result<HealthStatus, AgentError> {
        let url = format!("{}/health", self.base_url);
        let timeout_ms = self.probe_timeout.as_millis() as u64;

        let response = self
            .client
            .get(&url)
            .timeout(self.probe_timeout)
            .send()
            .await
            .map_err(|e| AgentError::from_reqwest(e, timeout_ms))?;

        if response.status().is_success() {
            Ok(HealthStatus::Healthy)
        } else {
            Ok(HealthStatus::Unhealthy)
        }
    }

    async fn send(&self, request: &DialogueRequest) -> Result<Vec<PrimaryReply>, AgentError> {
        self.retry.run(|_| self.send_once(request)).await
    }
}
