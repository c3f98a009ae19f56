//! Process-lifetime response cache
//!
//! Keys are the normalized prompt plus the target language. Entries are never
//! evicted; the cache lives as long as the orchestrator that owns it.

use crate::responses::is_error_response;
use dashmap::DashMap;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    prompt: String,
    language: String,
}

impl CacheKey {
    fn new(prompt: &str, language: &str) -> Self {
        Self {
            prompt: prompt.split_whitespace().collect::<Vec<_>>().join(" "),
            language: language.trim().to_lowercase(),
        }
    }
}

/// Concurrent map from (prompt, language) to a finished reply
#[derive(Debug, Default)]
pub struct ResponseCache {
    entries: DashMap<CacheKey, String>,
}

impl ResponseCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, prompt: &str, language: &str) -> Option<String> {
        self.entries
            .get(&CacheKey::new(prompt, language))
            .map(|entry| entry.value().clone())
    }

    /// Store a reply; empty and error-prefixed replies are refused
    ///
    /// Returns whether the reply was stored. Concurrent writers for the same
    /// key race and the last one wins.
    pub fn put(&self, prompt: &str, language: &str, response: &str) -> bool {
        if response.trim().is_empty() || is_error_response(response) {
            warn!(
                preview = %tooling::logging::truncate_for_log(response, 50),
                "Skipping cache for error response"
            );
            return false;
        }
        self.entries
            .insert(CacheKey::new(prompt, language), response.to_string());
        debug!(entries = self.entries.len(), "Cached response");
        true
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&self) {
        self.entries.clear();
    }
}
