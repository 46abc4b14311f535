//! OpenAI-compatible completion client.

use super::types::CompletionErrorEnvelope;
use super::{AgentError, ChatCompletionRequest, ChatCompletionResponse, CompletionBackend};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::sync::Arc;

const RATE_LIMIT_CODE: &str = "rate_limit_exceeded";

/// OpenAI agent implementation.
///
/// Chat completion via `POST /v1/chat/completions` with Bearer token. The
/// caller owns the deadline: dropping the future tears down the request.
pub struct OpenAIAgent {
    /// Base URL (e.g., "https://api.openai.com")
    base_url: String,
    /// API key for Bearer authentication; `None` fails every call
    api_key: Option<String>,
    /// Shared HTTP client for connection pooling
    client: Arc<Client>,
}

impl OpenAIAgent {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>, client: Arc<Client>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
            client,
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

/// Classify a non-success response. Throttling is recognized by status or by
/// the error code in the body, since some proxies answer 400/503 for it.
fn classify_failure(status: StatusCode, body: &str) -> AgentError {
    let envelope = serde_json::from_str::<CompletionErrorEnvelope>(body).ok();
    let message = envelope
        .as_ref()
        .map(|e| e.error.message.clone())
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| body.to_string());

    let throttled = status == StatusCode::TOO_MANY_REQUESTS
        || envelope.as_ref().is_some_and(|e| {
            e.error.code.as_deref() == Some(RATE_LIMIT_CODE)
                || e.error.kind.as_deref() == Some("rate_limit_error")
        });

    if throttled {
        AgentError::RateLimited(message)
    } else {
        AgentError::Upstream {
            status: status.as_u16(),
            message,
        }
    }
}

#[async_trait]
impl CompletionBackend for OpenAIAgent {
    fn name(&self) -> &str {
        "openai"
    }

    fn is_configured(&self) -> bool {
        self.has_api_key()
    }

    async fn chat_completion(
        &self,
        request: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, AgentError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| AgentError::Configuration("completion API key is not set".into()))?;

        let url = format!("{}/v1/chat/completions", self.base_url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| AgentError::from_reqwest(e, 0))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(classify_failure(status, &error_body));
        }

        let completion: ChatCompletionResponse = response.json().await.map_err(|e| {
            AgentError::InvalidResponse(format!("Failed to parse completion response: {}", e))
        })?;

        if completion.choices.is_empty() {
            return Err(AgentError::EmptyResponse);
        }
        Ok(completion)
    }
}
