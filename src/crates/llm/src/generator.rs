//! The seam between the orchestrator and a text-generation backend.

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Backend-specific sampling settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    pub temperature: f32,
}

/// One generation call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub prompt: String,
    pub target_language: String,
    pub generation_config: GenerationConfig,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>, target_language: impl Into<String>, temperature: f32) -> Self {
        Self {
            prompt: prompt.into(),
            target_language: target_language.into(),
            generation_config: GenerationConfig { temperature },
        }
    }
}

/// A backend that turns a prompt into raw reply text.
///
/// Implementations return the text untouched; cleanup and error-to-message
/// mapping happen in [`GenerationClient`](crate::GenerationClient).
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<String>;

    /// Short backend name for logs.
    fn backend_name(&self) -> &str {
        "generator"
    }
}
