//! `POST /v1/extract` handler.

use super::{ApiError, AppState};
use crate::nlp::ExtractedEntities;
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExtractRequest {
    pub text: String,
}

pub async fn handle(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ExtractRequest>, JsonRejection>,
) -> Result<Json<ExtractedEntities>, ApiError> {
    let Json(request) = payload?;
    Ok(Json(state.orchestrator.extractor().extract(&request.text)))
}
