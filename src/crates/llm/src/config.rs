//! Configuration for the remote generation backend.

use crate::error::{LlmError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default chat-generation endpoint.
pub const DEFAULT_API_URL: &str = "https://api.addisassistant.com/api/v1/chat_generate";

/// Configuration for the remote generation backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteLlmConfig {
    /// API key sent in the `X-API-Key` header.
    pub api_key: String,

    /// Full URL of the generation endpoint.
    pub api_url: String,

    /// Request timeout duration. Kept short so callers fail fast.
    #[serde(default = "default_timeout")]
    pub timeout: Duration,

    /// Sampling temperature sent as `generation_config.temperature`.
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Replies longer than this many characters are truncated.
    #[serde(default = "default_max_chars")]
    pub max_chars: usize,
}

impl RemoteLlmConfig {
    /// Create a new configuration with default timeout, temperature and length cap.
    pub fn new(api_key: impl Into<String>, api_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_url: api_url.into(),
            timeout: default_timeout(),
            temperature: default_temperature(),
            max_chars: default_max_chars(),
        }
    }

    /// Create configuration reading the API key from an environment variable.
    pub fn from_env(env_var: &str, api_url: impl Into<String>) -> Result<Self> {
        let api_key = std::env::var(env_var)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                LlmError::ApiKeyNotFound(format!("Environment variable: {}", env_var))
            })?;

        Ok(Self::new(api_key, api_url))
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set the reply length cap.
    pub fn with_max_chars(mut self, max_chars: usize) -> Self {
        self.max_chars = max_chars;
        self
    }

    /// Whether an API key is configured.
    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

impl Default for RemoteLlmConfig {
    fn default() -> Self {
        Self::new("", DEFAULT_API_URL)
    }
}

fn default_timeout() -> Duration {
    Duration::from_secs(15)
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_chars() -> usize {
    4000
}
