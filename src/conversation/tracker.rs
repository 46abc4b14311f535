//! Save/load/clear of conversation state with upsert semantics.

use super::error::StoreError;
use super::state::ConversationState;
use super::store::ConversationStore;
use chrono::Utc;
use std::sync::Arc;

/// Thin adapter over a [`ConversationStore`].
///
/// Saving an existing session replaces every field except the identity keys:
/// the stored `user_id` wins over the incoming one.
pub struct ConversationTracker {
    store: Arc<dyn ConversationStore>,
}

impl ConversationTracker {
    pub fn new(store: Arc<dyn ConversationStore>) -> Self {
        Self { store }
    }

    pub fn store_name(&self) -> &str {
        self.store.name()
    }

    pub async fn save(&self, state: ConversationState) -> Result<ConversationState, StoreError> {
        let mut state = state;
        if let Some(existing) = self.store.select(&state.session_id).await? {
            if !existing.user_id.is_empty() {
                state.user_id = existing.user_id;
            }
        }
        state.updated_at = Some(Utc::now());
        self.store.upsert(&state).await
    }

    /// `None` when the session is unknown or the store fails.
    pub async fn load(&self, session_id: &str) -> Option<ConversationState> {
        match self.store.select(session_id).await {
            Ok(state) => state,
            Err(e) => {
                tracing::warn!(session_id, error = %e, "Failed to load conversation state");
                None
            }
        }
    }

    pub async fn clear(&self, session_id: &str) -> Result<(), StoreError> {
        self.store.delete(session_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::{ConversationEvent, MemoryStore};
    use async_trait::async_trait;

    fn tracker() -> ConversationTracker {
        ConversationTracker::new(Arc::new(MemoryStore::new()))
    }

    #[tokio::test]
    async fn test_round_trip_slots_and_events() {
        let tracker = tracker();
        let mut state = ConversationState::new("u1", "s1");
        state.set_slot("dish", "Masala Dosa");
        state.set_slot("quantity", 2);
        state.events.push(ConversationEvent::user("2 dosas please"));
        state.events.push(ConversationEvent::bot("Two Masala Dosas, coming up."));

        tracker.save(state.clone()).await.unwrap();
        let loaded = tracker.load("s1").await.unwrap();

        assert_eq!(loaded.slots, state.slots);
        assert_eq!(loaded.events, state.events);
        assert!(loaded.updated_at.is_some());
    }

    #[tokio::test]
    async fn test_save_keeps_existing_user_id() {
        let tracker = tracker();
        tracker.save(ConversationState::new("u1", "s1")).await.unwrap();

        let mut next = ConversationState::new("someone-else", "s1");
        next.last_action = Some("action_order".into());
        let saved = tracker.save(next).await.unwrap();

        assert_eq!(saved.user_id, "u1");
        assert_eq!(saved.last_action.as_deref(), Some("action_order"));
    }

    #[tokio::test]
    async fn test_load_missing_is_none_and_clear() {
        let tracker = tracker();
        assert!(tracker.load("unknown").await.is_none());

        tracker.save(ConversationState::new("u", "s")).await.unwrap();
        tracker.clear("s").await.unwrap();
        assert!(tracker.load("s").await.is_none());
    }

    struct BrokenStore;

    #[async_trait]
    impl ConversationStore for BrokenStore {
        fn name(&self) -> &str {
            "broken"
        }
        async fn upsert(&self, _: &ConversationState) -> Result<ConversationState, StoreError> {
            Err(StoreError::Network("down".into()))
        }
        async fn select(&self, _: &str) -> Result<Option<ConversationState>, StoreError> {
            Err(StoreError::Network("down".into()))
        }
        async fn delete(&self, _: &str) -> Result<(), StoreError> {
            Err(StoreError::Network("down".into()))
        }
    }

    #[tokio::test]
    async fn test_load_error_is_absent() {
        let tracker = ConversationTracker::new(Arc::new(BrokenStore));
        assert!(tracker.load("s1").await.is_none());
        assert!(tracker.save(ConversationState::new("u", "s1")).await.is_err());
    }
}
