//! Errors from the conversation state store.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Store unreachable: {0}")]
    Network(String),

    #[error("Store request timed out after {0}ms")]
    Timeout(u64),

    #[error("Store error {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error("Invalid store response: {0}")]
    InvalidResponse(String),
}

impl StoreError {
    pub(crate) fn from_reqwest(e: reqwest::Error, timeout_ms: u64) -> Self {
        if e.is_timeout() {
            StoreError::Timeout(timeout_ms)
        } else {
            StoreError::Network(e.to_string())
        }
    }
}
