//! Text generation backend client for medbot.
//!
//! The orchestrator talks to generation through [`GenerationClient`], which
//! wraps any [`TextGenerator`] backend. The production backend is the Addis
//! Assistant chat-generation endpoint ([`remote::AddisClient`]).
//!
//! # Example
//!
//! ```rust,ignore
//! use llm::config::{RemoteLlmConfig, DEFAULT_API_URL};
//! use llm::GenerationClient;
//!
//! let config = RemoteLlmConfig::from_env("ADDIS_ASSISTANT_API_KEY", DEFAULT_API_URL)?;
//! let client = GenerationClient::remote(config)?;
//!
//! // General chat
//! let reply = client.generate_direct("Hello!", "am").await;
//!
//! // Medical synthesis from formatted tool output
//! let reply = client
//!     .generate_medical("I have a headache", &[advice_text], "en")
//!     .await;
//! ```

pub mod cleanup;
pub mod client;
pub mod config;
pub mod error;
pub mod generator;
pub mod prompts;
pub mod remote;

pub use client::GenerationClient;
pub use config::RemoteLlmConfig;
pub use error::{LlmError, Result};
pub use generator::{GenerationConfig, GenerationRequest, TextGenerator};
