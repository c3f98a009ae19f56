//! Error types for the generation backend.

use thiserror::Error;

/// Result type for generation operations.
pub type Result<T> = std::result::Result<T, LlmError>;

/// Errors that can occur when calling the generation backend.
#[derive(Debug, Error)]
pub enum LlmError {
    /// Backend answered with a non-success status.
    #[error("API Error: {status}")]
    Api {
        status: u16,
        /// Nested `error.message` from the body, when present.
        message: Option<String>,
    },

    /// Request did not complete within the configured timeout.
    #[error("Request timeout: {0}")]
    Timeout(String),

    /// Could not connect to the backend.
    #[error("Connection failed: {0}")]
    Connection(String),

    /// Any other transport failure.
    #[error("HTTP request failed: {0}")]
    HttpError(reqwest::Error),

    /// Success status but the body could not be read.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// No API key configured.
    #[error("API key not found: {0}")]
    ApiKeyNotFound(String),
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            LlmError::Timeout(err.to_string())
        } else if err.is_connect() {
            LlmError::Connection(err.to_string())
        } else if err.is_decode() {
            LlmError::InvalidResponse(err.to_string())
        } else {
            LlmError::HttpError(err)
        }
    }
}

impl From<serde_json::Error> for LlmError {
    fn from(err: serde_json::Error) -> Self {
        LlmError::InvalidResponse(err.to_string())
    }
}

impl LlmError {
    /// Check if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        match self {
            LlmError::Timeout(_) | LlmError::Connection(_) | LlmError::HttpError(_) => true,
            LlmError::Api { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }

    /// User-facing text shown in place of a reply.
    pub fn degraded_message(&self) -> String {
        match self {
            LlmError::Api {
                status,
                message: Some(message),
            } => format!("⚠️ API Error: {} - {}", status, message),
            LlmError::Api { status, .. } => format!("⚠️ API Error: {}", status),
            LlmError::Timeout(_) => {
                "⏰ The response is taking too long. Please try again with a shorter question."
                    .to_string()
            }
            LlmError::Connection(_) => "🔌 Connection issue. Please try again in a moment.".to_string(),
            other => format!("⚠️ Request error: {}", other),
        }
    }
}
