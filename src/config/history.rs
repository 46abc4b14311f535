//! Conversation history limits

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Messages kept per session before the oldest are dropped
    pub max_messages: usize,
    /// Recent messages sent to either backend as context
    pub context_window: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_messages: 100,
            context_window: 5,
        }
    }
}
