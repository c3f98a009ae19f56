//! Request orchestration
//!
//! [`Orchestrator::safe_generate`] is the single entry point used by the HTTP
//! layer. Per request it runs:
//!
//! 1. cache lookup (a hit returns immediately)
//! 2. intent classification
//! 3. medical synthesis through the tools, or direct generation when no
//!    category matched
//! 4. empty-output replacement with the language fallback
//! 5. cache store for replies that are not error-prefixed
//!
//! Failures and panics anywhere in the pipeline become the fallback string;
//! the caller always receives a non-empty reply.

use crate::cache::ResponseCache;
use crate::config::ServerConfig;
use crate::context::{ConversationHistory, Role};
use crate::interpreter::ResponseFormatter;
use crate::responses::fallback_response;
use crate::router::{plan_tools, IntentClassifier, IntentScore};
use crate::{MedbotError, Result};
use chrono::Datelike;
use futures::FutureExt;
use llm::GenerationClient;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tooling::logging::truncate_for_log;
use tooling::ToolRegistry;
use tracing::{error, info, warn};

/// Composes classification, tools, generation and caching
#[derive(Debug, Clone)]
pub struct Orchestrator {
    registry: Arc<ToolRegistry>,
    formatter: ResponseFormatter,
    generator: GenerationClient,
    classifier: IntentClassifier,
    cache: Arc<ResponseCache>,
    history: Arc<ConversationHistory>,
}

impl Orchestrator {
    pub fn new(
        registry: Arc<ToolRegistry>,
        generator: GenerationClient,
        cache: Arc<ResponseCache>,
        history: Arc<ConversationHistory>,
    ) -> Self {
        Self {
            formatter: ResponseFormatter::new(registry.clone()),
            registry,
            generator,
            classifier: IntentClassifier::new(),
            cache,
            history,
        }
    }

    /// Build the production pipeline: standard tools and the remote backend
    pub fn from_config(config: &ServerConfig) -> Result<Self> {
        let registry = ToolRegistry::standard(&config.tools_config())?;
        let generator = GenerationClient::remote(config.llm_config())?;
        info!(tools = ?registry.list_tools(), "Tool registry ready");

        Ok(Self::new(
            Arc::new(registry),
            generator,
            Arc::new(ResponseCache::new()),
            Arc::new(ConversationHistory::new(config.history.max_turns)),
        ))
    }

    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    pub fn history(&self) -> &ConversationHistory {
        &self.history
    }

    /// Answer `prompt`, never failing and never returning an empty string
    ///
    /// With a `user_id`, the prompt and the final reply are appended to that
    /// user's history.
    pub async fn safe_generate(&self, prompt: &str, user_id: Option<&str>, language: &str) -> String {
        if let Some(user) = user_id {
            self.history.add_turn(user, Role::User, prompt);
        }

        let reply = self.respond(prompt, language).await;

        if let Some(user) = user_id {
            self.history.add_turn(user, Role::Assistant, reply.as_str());
        }
        reply
    }

    async fn respond(&self, prompt: &str, language: &str) -> String {
        if let Some(cached) = self.cache.get(prompt, language) {
            info!(prompt = %truncate_for_log(prompt, 50), "Cache hit");
            return cached;
        }

        let outcome = AssertUnwindSafe(self.generate(prompt, language))
            .catch_unwind()
            .await;

        let response = match outcome {
            Ok(Ok(response)) => response,
            Ok(Err(err)) => {
                error!(error = %err, "Generation pipeline failed");
                return fallback_response(language).to_string();
            }
            Err(_) => {
                error!(prompt = %truncate_for_log(prompt, 50), "Generation pipeline panicked");
                return fallback_response(language).to_string();
            }
        };

        if response.trim().is_empty() {
            warn!(prompt = %truncate_for_log(prompt, 50), "Empty response from generation");
            return fallback_response(language).to_string();
        }

        self.cache.put(prompt, language, &response);
        response
    }

    /// Run the pipeline without cache, history or fallback handling
    pub async fn generate(&self, prompt: &str, language: &str) -> Result<String> {
        if prompt.trim().is_empty() {
            return Err(MedbotError::EmptyPrompt);
        }

        let score = self.classifier.classify(prompt);
        if score.is_medical() {
            info!(score = score.total(), intents = ?score, "Medical intent detected");
            Ok(self.medical_response(prompt, &score, language).await)
        } else {
            info!("General conversation, using direct generation");
            Ok(self.generator.generate_direct(prompt, language).await)
        }
    }

    async fn medical_response(&self, prompt: &str, score: &IntentScore, language: &str) -> String {
        let year = chrono::Local::now().year();
        let mut context: Vec<String> = Vec::new();

        for call in plan_tools(prompt, score, year) {
            if call.only_if_empty && !context.is_empty() {
                continue;
            }

            let result = self.registry.invoke(call.tool, call.args).await;
            let (tool, result) = self.formatter.resolve(call.tool, result).await;

            match result.error() {
                None => context.push(ResponseFormatter::render(&tool, &result)),
                Some(failure) => warn!(
                    tool = %tool,
                    kind = ?failure.kind,
                    message = %failure.message,
                    "Tool produced no usable context"
                ),
            }
        }

        info!(blocks = context.len(), "Synthesizing medical response");
        self.generator.generate_medical(prompt, &context, language).await
    }
}
