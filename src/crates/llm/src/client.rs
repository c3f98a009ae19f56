//! Generation entry points used by the orchestrator.

use crate::cleanup::clean_response;
use crate::config::RemoteLlmConfig;
use crate::error::Result;
use crate::generator::{GenerationRequest, TextGenerator};
use crate::prompts::{guided_prompt, medical_context_prompt};
use crate::remote::AddisClient;
use std::sync::Arc;
use std::time::Instant;
use tooling::logging::format_duration;
use tracing::{error, info};

/// Wraps a [`TextGenerator`] with cleanup, prompt assembly and graceful degradation.
///
/// Neither entry point returns an error: backend failures become a
/// user-facing message (see [`LlmError::degraded_message`](crate::LlmError::degraded_message)).
#[derive(Clone)]
pub struct GenerationClient {
    backend: Arc<dyn TextGenerator>,
    temperature: f32,
    max_chars: usize,
}

impl std::fmt::Debug for GenerationClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerationClient")
            .field("backend", &self.backend.backend_name())
            .field("temperature", &self.temperature)
            .field("max_chars", &self.max_chars)
            .finish()
    }
}

impl GenerationClient {
    pub fn new(backend: Arc<dyn TextGenerator>, temperature: f32, max_chars: usize) -> Self {
        Self {
            backend,
            temperature,
            max_chars,
        }
    }

    /// Client backed by the remote Addis endpoint.
    pub fn remote(config: RemoteLlmConfig) -> Result<Self> {
        let temperature = config.temperature;
        let max_chars = config.max_chars;
        let backend = AddisClient::new(config)?;
        Ok(Self::new(Arc::new(backend), temperature, max_chars))
    }

    /// Send `prompt` as-is and return the cleaned reply or a degradation message.
    pub async fn generate_direct(&self, prompt: &str, language: &str) -> String {
        let request = GenerationRequest::new(prompt, language, self.temperature);
        let started = Instant::now();

        match self.backend.generate(&request).await {
            Ok(reply) => {
                info!(
                    backend = self.backend.backend_name(),
                    language = %language,
                    elapsed = %format_duration(started.elapsed()),
                    reply_chars = reply.chars().count(),
                    "Generation completed"
                );
                clean_response(&reply, self.max_chars)
            }
            Err(err) => {
                error!(
                    backend = self.backend.backend_name(),
                    language = %language,
                    error = %err,
                    retryable = err.is_retryable(),
                    "Generation failed"
                );
                err.degraded_message()
            }
        }
    }

    /// Answer a medical question from formatted tool outputs.
    ///
    /// With no tool output, a guided prompt is used instead so the user still
    /// gets substantive advice.
    pub async fn generate_medical(&self, question: &str, tool_texts: &[String], language: &str) -> String {
        let prompt = if tool_texts.is_empty() {
            info!("No tool context, using guided medical prompt");
            guided_prompt(question, language)
        } else {
            medical_context_prompt(&tool_texts.join("\n\n"), question, language)
        };
        self.generate_direct(&prompt, language).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LlmError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct Scripted {
        reply: std::result::Result<String, fn() -> LlmError>,
        prompts: Mutex<Vec<GenerationRequest>>,
    }

    #[async_trait]
    impl TextGenerator for Scripted {
        async fn generate(&self, request: &GenerationRequest) -> Result<String> {
            self.prompts.lock().unwrap().push(request.clone());
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(make) => Err(make()),
            }
        }
    }

    fn scripted(reply: std::result::Result<String, fn() -> LlmError>) -> Arc<Scripted> {
        Arc::new(Scripted {
            reply,
            prompts: Mutex::new(Vec::new()),
        })
    }

    #[tokio::test]
    async fn test_direct_cleans_reply() {
        let backend = scripted(Ok("<think>x</think>**Hello**".to_string()));
        let client = GenerationClient::new(backend.clone(), 0.7, 4000);
        assert_eq!(client.generate_direct("hi", "en").await, "Hello");

        let sent = backend.prompts.lock().unwrap();
        assert_eq!(sent[0].prompt, "hi");
        assert_eq!(sent[0].target_language, "en");
    }

    #[tokio::test]
    async fn test_direct_maps_errors() {
        let backend = scripted(Err(|| LlmError::Timeout("slow".into())));
        let client = GenerationClient::new(backend, 0.7, 4000);
        assert!(client.generate_direct("hi", "en").await.starts_with("⏰"));
    }

    #[tokio::test]
    async fn test_medical_uses_context_prompt() {
        let backend = scripted(Ok("ok".to_string()));
        let client = GenerationClient::new(backend.clone(), 0.7, 4000);
        let texts = vec!["first".to_string(), "second".to_string()];
        client.generate_medical("q", &texts, "am").await;

        let sent = backend.prompts.lock().unwrap();
        assert!(sent[0].prompt.starts_with("Medical Context Information:\nfirst\n\nsecond\n\n"));
        assert_eq!(sent[0].target_language, "am");
    }

    #[tokio::test]
    async fn test_medical_without_tools_uses_guided_prompt() {
        let backend = scripted(Ok("ok".to_string()));
        let client = GenerationClient::new(backend.clone(), 0.7, 4000);
        client.generate_medical("what is lupus", &[], "en").await;

        let sent = backend.prompts.lock().unwrap();
        assert!(sent[0].prompt.starts_with("User is asking about medical concerns: what is lupus"));
    }
}
