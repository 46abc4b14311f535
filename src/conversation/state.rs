//! Durable per-session dialogue state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    User,
    Bot,
    Action,
}

/// One entry of the event log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationEvent {
    pub event: EventKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl ConversationEvent {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            event: EventKind::User,
            text: Some(text.into()),
            name: None,
            timestamp: Utc::now(),
        }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            event: EventKind::Bot,
            text: Some(text.into()),
            name: None,
            timestamp: Utc::now(),
        }
    }

    pub fn action(name: impl Into<String>) -> Self {
        Self {
            event: EventKind::Action,
            text: None,
            name: Some(name.into()),
            timestamp: Utc::now(),
        }
    }
}

/// One row of the `conversations` collection, keyed by `session_id`.
///
/// Column names are snake_case to match the table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationState {
    pub user_id: String,
    pub session_id: String,
    #[serde(default)]
    pub slots: Map<String, Value>,
    /// Ordered event log
    #[serde(default)]
    pub events: Vec<ConversationEvent>,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default)]
    pub last_action: Option<String>,
    #[serde(default, rename = "last_response")]
    pub last_response_text: Option<String>,
    #[serde(default)]
    pub context: Option<Value>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

fn default_language() -> String {
    "en".to_string()
}

impl ConversationState {
    pub fn new(user_id: impl Into<String>, session_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            session_id: session_id.into(),
            slots: Map::new(),
            events: Vec::new(),
            language: default_language(),
            last_action: None,
            last_response_text: None,
            context: None,
            updated_at: None,
        }
    }

    pub fn set_slot(&mut self, name: &str, value: impl Into<Value>) {
        self.slots.insert(name.to_string(), value.into());
    }

    pub fn slot(&self, name: &str) -> Option<&Value> {
        self.slots.get(name)
    }
}
