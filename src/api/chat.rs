//! `POST /v1/chat` handler.

use super::{ApiError, AppState};
use crate::logging::REQUEST_ID_HEADER;
use crate::routing::{NormalizedReply, Turn};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::HeaderMap,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChatRequest {
    pub message: String,
    /// Omitted on the first message of a conversation
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub locale: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChatResponse {
    pub session_id: String,
    pub replies: Vec<NormalizedReply>,
}

/// Answer one customer message; a new session id is assigned when the
/// request carries none.
pub async fn handle(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let Json(request) = payload?;
    if request.message.trim().is_empty() {
        return Err(ApiError::invalid_field("message", "message must not be empty"));
    }

    let session_id = request
        .session_id
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| Uuid::new_v4().to_string());
    let request_id = headers
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let mut turn = Turn::new(request.message, session_id.clone());
    if let Some(locale) = request.locale.filter(|l| !l.is_empty()) {
        turn = turn.with_locale(locale);
    }
    if let Some(user_id) = request.user_id {
        turn = turn.with_user(user_id);
    }
    turn.request_id = request_id;

    let replies = state
        .orchestrator
        .respond_within(turn, Some(state.turn_timeout()))
        .await;

    Ok(Json(ChatResponse {
        session_id,
        replies,
    }))
}
