//! Error types for the tool runtime

use super::ToolErrorKind;
use thiserror::Error;

/// Errors raised while a tool does its work
///
/// These never cross the registry boundary: `ToolRegistry::invoke` folds
/// them into a [`ToolFailure`](super::ToolFailure) so callers always get a
/// `ToolResult`.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// Tool not found
    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    /// Invalid tool arguments
    #[error("Invalid tool arguments for {tool}: {message}")]
    InvalidArguments { tool: String, message: String },

    /// Lookup succeeded but matched nothing
    #[error("{0}")]
    NotFound(String),

    /// Upstream service answered with something unusable
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// Transport failure talking to an upstream service
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl RuntimeError {
    /// Shorthand for an argument error
    pub fn invalid_args(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidArguments {
            tool: tool.into(),
            message: message.into(),
        }
    }

    /// Failure category reported to the orchestration layer
    pub fn kind(&self) -> ToolErrorKind {
        match self {
            Self::ToolNotFound(_) => ToolErrorKind::UnknownTool,
            Self::InvalidArguments { .. } => ToolErrorKind::InvalidArguments,
            Self::NotFound(_) => ToolErrorKind::NotFound,
            Self::Upstream(_) | Self::Http(_) | Self::SerializationError(_) => ToolErrorKind::Upstream,
        }
    }
}

/// Result type for runtime operations
pub type Result<T> = std::result::Result<T, RuntimeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            RuntimeError::ToolNotFound("x".into()).kind(),
            ToolErrorKind::UnknownTool
        );
        assert_eq!(
            RuntimeError::invalid_args("drug_info", "missing drug_name").kind(),
            ToolErrorKind::InvalidArguments
        );
        assert_eq!(
            RuntimeError::NotFound("Drug not found".into()).kind(),
            ToolErrorKind::NotFound
        );
        assert_eq!(
            RuntimeError::Upstream("HTTP 503".into()).kind(),
            ToolErrorKind::Upstream
        );
    }

    #[test]
    fn test_error_display() {
        let err = RuntimeError::ToolNotFound("file_read".to_string());
        assert_eq!(err.to_string(), "Tool not found: file_read");

        let err = RuntimeError::invalid_args("internet_search", "missing field 'query'");
        assert_eq!(
            err.to_string(),
            "Invalid tool arguments for internet_search: missing field 'query'"
        );

        let err = RuntimeError::NotFound("Drug not found".to_string());
        assert_eq!(err.to_string(), "Drug not found");
    }
}
