//! Persistence seam for conversation state.

use super::error::StoreError;
use super::state::ConversationState;
use async_trait::async_trait;
use dashmap::DashMap;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

/// Upsert/select/delete by `session_id`.
#[async_trait]
pub trait ConversationStore: Send + Sync + 'static {
    fn name(&self) -> &str;

    /// Insert or fully replace the row for `state.session_id`.
    async fn upsert(&self, state: &ConversationState) -> Result<ConversationState, StoreError>;

    /// `Ok(None)` when no row exists.
    async fn select(&self, session_id: &str) -> Result<Option<ConversationState>, StoreError>;

    async fn delete(&self, session_id: &str) -> Result<(), StoreError>;
}

/// Process-local store. State is lost on restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    rows: DashMap<String, ConversationState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[async_trait]
impl ConversationStore for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn upsert(&self, state: &ConversationState) -> Result<ConversationState, StoreError> {
        self.rows.insert(state.session_id.clone(), state.clone());
        Ok(state.clone())
    }

    async fn select(&self, session_id: &str) -> Result<Option<ConversationState>, StoreError> {
        Ok(self.rows.get(session_id).map(|row| row.clone()))
    }

    async fn delete(&self, session_id: &str) -> Result<(), StoreError> {
        self.rows.remove(session_id);
        Ok(())
    }
}

/// Store backed by a PostgREST-style table API.
///
/// - upsert: `POST /{table}?on_conflict=session_id` with
///   `Prefer: resolution=merge-duplicates`
/// - select: `GET /{table}?session_id=eq.{id}`
/// - delete: `DELETE /{table}?session_id=eq.{id}`
pub struct PostgrestStore {
    base_url: String,
    table: String,
    api_key: Option<String>,
    timeout: Duration,
    client: Arc<Client>,
}

impl PostgrestStore {
    pub fn new(
        base_url: impl Into<String>,
        table: impl Into<String>,
        api_key: Option<String>,
        client: Arc<Client>,
    ) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            table: table.into(),
            api_key,
            timeout: Duration::from_secs(5),
            client,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn url(&self) -> String {
        format!("{}/{}", self.base_url, self.table)
    }

    fn request(&self, method: reqwest::Method) -> reqwest::RequestBuilder {
        let mut builder = self
            .client
            .request(method, self.url())
            .timeout(self.timeout);
        if let Some(key) = &self.api_key {
            builder = builder.header("apikey", key).bearer_auth(key);
        }
        builder
    }

    async fn send(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, StoreError> {
        let timeout_ms = self.timeout.as_millis() as u64;
        let response = builder
            .send()
            .await
            .map_err(|e| StoreError::from_reqwest(e, timeout_ms))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(StoreError::Upstream {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response)
    }

    async fn rows(response: reqwest::Response) -> Result<Vec<ConversationState>, StoreError> {
        response
            .json()
            .await
            .map_err(|e| StoreError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl ConversationStore for PostgrestStore {
    fn name(&self) -> &str {
        "postgrest"
    }

    async fn upsert(&self, state: &ConversationState) -> Result<ConversationState, StoreError> {
        let builder = self
            .request(reqwest::Method::POST)
            .query(&[("on_conflict", "session_id")])
            .header("prefer", "resolution=merge-duplicates,return=representation")
            .json(&[state]);

        let response = self.send(builder).await?;
        let mut rows = Self::rows(response).await?;
        if rows.is_empty() {
            return Ok(state.clone());
        }
        Ok(rows.swap_remove(0))
    }

    async fn select(&self, session_id: &str) -> Result<Option<ConversationState>, StoreError> {
        let builder = self
            .request(reqwest::Method::GET)
            .query(&[("session_id", format!("eq.{}", session_id))])
            .query(&[("select", "*"), ("limit", "1")]);

        let response = self.send(builder).await?;
        Ok(Self::rows(response).await?.into_iter().next())
    }

    async fn delete(&self, session_id: &str) -> Result<(), StoreError> {
        let builder = self
            .request(reqwest::Method::DELETE)
            .query(&[("session_id", format!("eq.{}", session_id))]);

        self.send(builder).await.map(|_| ())
    }
}
