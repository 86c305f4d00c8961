//! Client error types
//!
//! Errors are `Clone` because every caller waiting on a de-duplicated
//! request receives the same rejection. `reqwest::Error` is not `Clone`, so
//! network failures carry its rendered message instead of the source error.

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum ClientError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Failed to serialize request body: {0}")]
    Serialization(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP {status}")]
    Http {
        status: StatusCode,
        /// Parsed JSON error body, when the server sent one
        body: Option<serde_json::Value>,
    },

    /// The server rejected the credential (401) and the session was expired
    /// through the store. Distinct from [`ClientError::Http`] so callers can
    /// react without inspecting status codes.
    #[error("Session expired")]
    SessionExpired { body: Option<serde_json::Value> },

    #[error("Failed to deserialize response body: {0}")]
    Deserialize(String),
}

impl ClientError {
    /// HTTP status attached to this error, if it came from a response.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Http { status, .. } => Some(*status),
            ClientError::SessionExpired { .. } => Some(StatusCode::UNAUTHORIZED),
            _ => None,
        }
    }

    /// Parsed error body attached to this error, if any.
    pub fn body(&self) -> Option<&serde_json::Value> {
        match self {
            ClientError::Http { body, .. } | ClientError::SessionExpired { body } => body.as_ref(),
            _ => None,
        }
    }
}
