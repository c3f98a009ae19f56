//! Runtime types for tool execution
//!
//! Every tool call ends in a [`ToolResult`]: either a JSON payload or a
//! [`ToolFailure`] describing what went wrong. Tools never propagate errors
//! past the registry.

mod error;

pub use error::{Result, RuntimeError};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Category of a tool failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolErrorKind {
    /// The lookup ran but found nothing
    NotFound,
    /// Required arguments were missing or malformed
    InvalidArguments,
    /// Timeout, transport error or bad status from an upstream service
    Upstream,
    /// No tool is registered under the requested name
    UnknownTool,
}

/// Directive attached to a failure asking the caller to run a web search instead
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchFallback {
    /// Query to hand to `internet_search`
    pub query: String,
}

/// A failed tool call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolFailure {
    pub kind: ToolErrorKind,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_fallback: Option<SearchFallback>,
}

impl ToolFailure {
    pub fn new(kind: ToolErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            search_fallback: None,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::NotFound, message)
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::Upstream, message)
    }

    pub fn invalid_arguments(message: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::InvalidArguments, message)
    }

    pub fn unknown_tool(name: &str) -> Self {
        Self::new(ToolErrorKind::UnknownTool, format!("Unknown tool: {}", name))
    }

    /// Attach a web-search directive
    pub fn with_search_fallback(mut self, query: impl Into<String>) -> Self {
        self.search_fallback = Some(SearchFallback {
            query: query.into(),
        });
        self
    }

    /// Whether the caller should retry the question through web search
    pub fn use_internet_search(&self) -> bool {
        self.search_fallback.is_some()
    }
}

impl From<RuntimeError> for ToolFailure {
    fn from(err: RuntimeError) -> Self {
        let kind = err.kind();
        let message = match err {
            RuntimeError::NotFound(message) => message,
            other => other.to_string(),
        };
        Self::new(kind, message)
    }
}

/// Outcome of a tool call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ToolResult {
    Success { data: Value },
    Error(ToolFailure),
}

impl ToolResult {
    pub fn success(data: impl Serialize) -> Self {
        match serde_json::to_value(data) {
            Ok(data) => Self::Success { data },
            Err(err) => Self::Error(RuntimeError::from(err).into()),
        }
    }

    pub fn failure(failure: ToolFailure) -> Self {
        Self::Error(failure)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Payload of a successful call
    pub fn data(&self) -> Option<&Value> {
        match self {
            Self::Success { data } => Some(data),
            Self::Error(_) => None,
        }
    }

    /// Failure details of an unsuccessful call
    pub fn error(&self) -> Option<&ToolFailure> {
        match self {
            Self::Success { .. } => None,
            Self::Error(failure) => Some(failure),
        }
    }
}

impl<T: Serialize> From<Result<T>> for ToolResult {
    fn from(result: Result<T>) -> Self {
        match result {
            Ok(data) => Self::success(data),
            Err(err) => Self::Error(err.into()),
        }
    }
}

/// Read a required, non-blank string argument
pub fn required_str<'a>(tool: &str, args: &'a Value, key: &str) -> Result<&'a str> {
    match optional_str(args, key) {
        Some(value) => Ok(value),
        None => Err(RuntimeError::invalid_args(
            tool,
            format!("missing field '{}'", key),
        )),
    }
}

/// Read an optional string argument; blank strings count as absent
pub fn optional_str<'a>(args: &'a Value, key: &str) -> Option<&'a str> {
    args.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}
