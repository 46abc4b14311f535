//! Conversation state and history endpoints.

use super::{ApiError, AppState};
use crate::conversation::{ChatMessage, ConversationState};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Serialize)]
pub struct MessageHistory {
    pub session_id: String,
    pub messages: Vec<ChatMessage>,
}

/// GET /v1/conversations/:session_id
pub async fn get_state(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Result<Json<ConversationState>, ApiError> {
    state
        .orchestrator
        .tracker()
        .load(&session_id)
        .await
        .map(Json)
        .ok_or_else(|| ApiError::session_not_found(&session_id))
}

/// DELETE /v1/conversations/:session_id - drops stored state and history.
pub async fn delete_state(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.orchestrator.history().clear(&session_id);
    state
        .orchestrator
        .tracker()
        .clear(&session_id)
        .await
        .map_err(|e| ApiError::bad_gateway(e.to_string()))?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /v1/conversations/:session_id/messages
pub async fn get_messages(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Json<MessageHistory> {
    let messages = state.orchestrator.history().messages(&session_id);
    Json(MessageHistory {
        session_id,
        messages,
    })
}
