//! Chat messages.

use crate::menu::MenuItem;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    User,
    Assistant,
}

/// One message in a session. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: String,
    pub content: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
    pub language: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attached_items: Vec<MenuItem>,
    /// Auxiliary signals: reply source, detected intent, error flags
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>, language: impl Into<String>) -> Self {
        Self::new(Sender::User, content.into(), language.into())
    }

    pub fn assistant(content: impl Into<String>, language: impl Into<String>) -> Self {
        Self::new(Sender::Assistant, content.into(), language.into())
    }

    fn new(sender: Sender, content: String, language: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            content,
            sender,
            timestamp: Utc::now(),
            language,
            attached_items: Vec::new(),
            metadata: serde_json::Map::new(),
        }
    }

    pub fn with_items(mut self, items: Vec<MenuItem>) -> Self {
        self.attached_items = items;
        self
    }

    pub fn with_metadata(mut self, key: &str, value: serde_json::Value) -> Self {
        self.metadata.insert(key.to_string(), value);
        self
    }

    /// "user: ..." / "assistant: ..." line used as backend context.
    pub fn context_line(&self) -> String {
        let role = match self.sender {
            Sender::User => "user",
            Sender::Assistant => "assistant",
        };
        format!("{}: {}", role, self.content)
    }
}
