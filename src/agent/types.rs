//! Wire types for the dialogue service and the completion service.

use crate::config::RestaurantProfile;
use crate::nlp::BusinessTestingIntent;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Result of probing a backend's health endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

// ============================================================================
// Dialogue service (REST webhook channel)
// ============================================================================

/// One prior message included as conversation context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextMessage {
    pub role: String,
    pub content: String,
}

/// Metadata envelope attached to every webhook message.
#[derive(Debug, Clone, Serialize)]
pub struct DialogueMetadata {
    pub context: Vec<ContextMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restaurant: Option<RestaurantProfile>,
    #[serde(rename = "businessTesting", skip_serializing_if = "Option::is_none")]
    pub business_testing: Option<BusinessTestingIntent>,
    pub language: String,
    pub timestamp: DateTime<Utc>,
    pub request_id: String,
}

/// `POST /webhooks/rest/webhook` body.
#[derive(Debug, Clone, Serialize)]
pub struct DialogueRequest {
    pub sender: String,
    pub message: String,
    pub metadata: DialogueMetadata,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Button {
    pub title: String,
    pub payload: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentRanking {
    pub name: String,
    #[serde(default)]
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityValue {
    pub entity: String,
    pub value: serde_json::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

/// Structured payload the dialogue service may attach to a reply.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PrimaryCustom {
    #[serde(default)]
    pub intent: Option<IntentRanking>,
    #[serde(default)]
    pub entities: Vec<EntityValue>,
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub context: Option<serde_json::Value>,
}

/// One element of the webhook's JSON array response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrimaryReply {
    #[serde(default)]
    pub recipient_id: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub buttons: Vec<Button>,
    #[serde(default)]
    pub custom: Option<PrimaryCustom>,
}

// ============================================================================
// Completion service (OpenAI-style chat completions)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionMessage {
    pub role: String,
    pub content: String,
}

impl CompletionMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<CompletionMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
    pub presence_penalty: f32,
    pub frequency_penalty: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    pub message: CompletionMessage,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletionResponse {
    pub choices: Vec<Choice>,
}

impl ChatCompletionResponse {
    /// Text of the first choice, if any.
    pub fn first_content(&self) -> Option<&str> {
        self.choices.first().map(|c| c.message.content.as_str())
    }
}

/// Error envelope returned by the completion service.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CompletionErrorEnvelope {
    pub error: CompletionErrorBody,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CompletionErrorBody {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}
