//! Tool runtime and health lookup tools for medbot
//!
//! This crate owns everything that reaches outside the process to gather
//! facts for an answer: the symptom knowledge base, the drug label database,
//! the metasearch engine and the clock.
//!
//! # Modules
//!
//! - `runtime` - Tool result model and runtime errors
//! - `registry` - Name-keyed registry of tool executors
//! - `tools` - Symptom advice, drug lookup, web search, drug interactions, current time
//! - `config` - Environment variable loading and tool endpoint settings
//! - `async_utils` - Timeout utilities for network-bound work
//! - `logging` - Structured logging helpers and formatters

pub mod async_utils;
pub mod config;
pub mod logging;
pub mod registry;
pub mod runtime;
pub mod tools;

pub use config::ToolsConfig;
pub use registry::{ToolExecutor, ToolRegistry};
pub use runtime::{RuntimeError, SearchFallback, ToolErrorKind, ToolFailure, ToolResult};

use thiserror::Error;

/// Errors that can occur in the tooling crate
#[derive(Debug, Error)]
pub enum ToolingError {
    /// General error with message
    #[error("Tooling error: {0}")]
    General(String),

    /// A setting is present but unusable
    #[error("Invalid configuration for {key}: {message}")]
    InvalidConfig { key: String, message: String },
}

impl ToolingError {
    pub(crate) fn invalid(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            key: key.into(),
            message: message.into(),
        }
    }
}

/// Result type for tooling operations
pub type Result<T> = std::result::Result<T, ToolingError>;

/// Get version information
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
