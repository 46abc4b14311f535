//! JSON error envelope returned by every endpoint.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Error envelope.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiError {
    pub error: ApiErrorBody,
}

/// Error details.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiErrorBody {
    pub message: String,
    pub r#type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub param: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl ApiError {
    fn new(message: impl Into<String>, kind: &str, param: Option<&str>, code: &str) -> Self {
        Self {
            error: ApiErrorBody {
                message: message.into(),
                r#type: kind.to_string(),
                param: param.map(str::to_string),
                code: Some(code.to_string()),
            },
        }
    }

    /// 400 for a malformed or incomplete request.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(message, "invalid_request_error", None, "invalid_request_error")
    }

    /// 400 naming the offending field.
    pub fn invalid_field(param: &str, message: impl Into<String>) -> Self {
        Self::new(
            message,
            "invalid_request_error",
            Some(param),
            "invalid_request_error",
        )
    }

    /// 404 for an unknown session.
    pub fn session_not_found(session_id: &str) -> Self {
        Self::new(
            format!("No conversation stored for session '{}'", session_id),
            "invalid_request_error",
            Some("session_id"),
            "session_not_found",
        )
    }

    /// 502 when the conversation store fails.
    pub fn bad_gateway(message: impl Into<String>) -> Self {
        Self::new(message, "server_error", None, "bad_gateway")
    }

    /// HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self.error.code.as_deref() {
            Some("invalid_request_error") => StatusCode::BAD_REQUEST,
            Some("session_not_found") => StatusCode::NOT_FOUND,
            Some("bad_gateway") => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::bad_request(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self)).into_response()
    }
}
