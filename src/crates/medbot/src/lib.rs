//! Multilingual health assistant
//!
//! A free-text question flows through one pipeline:
//! cache lookup, intent classification, tool dispatch and formatting,
//! text generation, cache store. Latency and errors are recorded per request.
//!
//! # Modules
//!
//! - `router` - Keyword intent classification and tool planning
//! - `interpreter` - Tool result formatting
//! - `engine` - The orchestrator ("safe generate")
//! - `cache` - Process-lifetime response cache
//! - `metrics` - Request timing and aggregate statistics
//! - `context` - Per-user conversation history
//! - `responses` - Fallback strings and error-prefix detection
//! - `config` - TOML server configuration
//! - `api` - HTTP surface

pub mod api;
pub mod cache;
pub mod config;
pub mod context;
pub mod engine;
pub mod interpreter;
pub mod metrics;
pub mod responses;
pub mod router;

pub use cache::ResponseCache;
pub use context::{ConversationHistory, ConversationTurn, Role};
pub use engine::Orchestrator;
pub use metrics::{MetricsRecorder, MetricsSnapshot, RequestTimer};
pub use router::{IntentCategory, IntentClassifier, IntentScore};

use thiserror::Error;

/// Errors that can occur while assembling or running the pipeline
#[derive(Debug, Error)]
pub enum MedbotError {
    /// The prompt has no content
    #[error("Empty prompt")]
    EmptyPrompt,

    /// Configuration could not be used
    #[error("Configuration error: {0}")]
    Config(#[from] config::ServerConfigError),

    /// Tool registry could not be built
    #[error("Tool setup failed: {0}")]
    Tools(#[from] tooling::RuntimeError),

    /// Generation client could not be built
    #[error("Generation setup failed: {0}")]
    Generation(#[from] llm::LlmError),
}

/// Result type for medbot operations
pub type Result<T> = std::result::Result<T, MedbotError>;

/// Get version information
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
