//! Bounded per-session message history.

use super::message::ChatMessage;
use dashmap::DashMap;
use std::collections::VecDeque;

/// In-memory message log for every session, capped per session. The oldest
/// message is dropped once a session reaches the cap.
#[derive(Debug)]
pub struct SessionHistory {
    sessions: DashMap<String, VecDeque<ChatMessage>>,
    max_messages: usize,
}

impl SessionHistory {
    /// A `max_messages` of 0 is treated as 1.
    pub fn new(max_messages: usize) -> Self {
        Self {
            sessions: DashMap::new(),
            max_messages: max_messages.max(1),
        }
    }

    pub fn append(&self, session_id: &str, message: ChatMessage) {
        let mut log = self.sessions.entry(session_id.to_string()).or_default();
        while log.len() >= self.max_messages {
            log.pop_front();
        }
        log.push_back(message);
    }

    /// Last `n` messages, oldest first.
    pub fn recent(&self, session_id: &str, n: usize) -> Vec<ChatMessage> {
        self.sessions
            .get(session_id)
            .map(|log| {
                let skip = log.len().saturating_sub(n);
                log.iter().skip(skip).cloned().collect()
            })
            .unwrap_or_default()
    }

    pub fn messages(&self, session_id: &str) -> Vec<ChatMessage> {
        self.sessions
            .get(session_id)
            .map(|log| log.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn len(&self, session_id: &str) -> usize {
        self.sessions.get(session_id).map_or(0, |log| log.len())
    }

    pub fn clear(&self, session_id: &str) {
        self.sessions.remove(session_id);
    }
}
