//! Conversation continuity: message history and durable dialogue state.

mod error;
mod history;
mod message;
mod state;
mod store;
mod tracker;

pub use error::StoreError;
pub use history::SessionHistory;
pub use message::{ChatMessage, Sender};
pub use state::{ConversationEvent, ConversationState, EventKind};
pub use store::{ConversationStore, MemoryStore, PostgrestStore};
pub use tracker::ConversationTracker;

use crate::config::{PersistenceConfig, StoreBackend};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

/// Build the store selected by `persistence.backend`.
pub fn store_from_config(
    config: &PersistenceConfig,
    client: Arc<Client>,
) -> Arc<dyn ConversationStore> {
    match (config.backend, config.url.as_deref()) {
        (StoreBackend::Postgrest, Some(url)) => Arc::new(
            PostgrestStore::new(url, config.table.clone(), config.api_key(), client)
                .with_timeout(Duration::from_secs(config.timeout_seconds)),
        ),
        (StoreBackend::Postgrest, None) => {
            tracing::warn!("persistence.url is not set, keeping conversation state in memory");
            Arc::new(MemoryStore::new())
        }
        (StoreBackend::Memory, _) => Arc::new(MemoryStore::new()),
    }
}
