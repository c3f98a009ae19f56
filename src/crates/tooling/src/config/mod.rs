//! Tool endpoint settings and environment loading helpers
//!
//! [`ToolsConfig`] carries what the network-bound tools need: where the
//! metasearch engine and drug label database live and how long to wait for
//! them. The server crate fills it from its TOML file and environment.

mod env;

pub use env::{get_env, get_env_parse, override_parsed, override_string};

use crate::{Result, ToolingError};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Settings for the network-bound tools
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolsConfig {
    /// Base URL of the SearXNG instance
    pub searx_host: String,
    /// Budget for the search request itself
    pub search_timeout: Duration,
    /// Budget for each result page fetch
    pub page_timeout: Duration,
    /// How many search results to summarize
    pub num_results: usize,
    /// Search language passed to the engine
    pub search_language: String,
    /// Base URL of the drug label database
    pub openfda_base: String,
    /// Budget for drug label lookups
    pub drug_timeout: Duration,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            searx_host: "http://searxng:8080".to_string(),
            search_timeout: Duration::from_secs(10),
            page_timeout: Duration::from_secs(5),
            num_results: 3,
            search_language: "en".to_string(),
            openfda_base: "https://api.fda.gov".to_string(),
            drug_timeout: Duration::from_secs(10),
        }
    }
}

impl ToolsConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_searx_host(mut self, host: impl Into<String>) -> Self {
        self.searx_host = host.into();
        self
    }

    pub fn with_search_timeout(mut self, timeout: Duration) -> Self {
        self.search_timeout = timeout;
        self
    }

    pub fn with_page_timeout(mut self, timeout: Duration) -> Self {
        self.page_timeout = timeout;
        self
    }

    pub fn with_num_results(mut self, num_results: usize) -> Self {
        self.num_results = num_results;
        self
    }

    pub fn with_openfda_base(mut self, base: impl Into<String>) -> Self {
        self.openfda_base = base.into();
        self
    }

    pub fn with_drug_timeout(mut self, timeout: Duration) -> Self {
        self.drug_timeout = timeout;
        self
    }

    /// Reject settings the tools cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.searx_host.trim().is_empty() {
            return Err(ToolingError::invalid("search.searx_host", "must not be empty"));
        }
        if self.openfda_base.trim().is_empty() {
            return Err(ToolingError::invalid("drugs.base_url", "must not be empty"));
        }
        if self.num_results == 0 {
            return Err(ToolingError::invalid("search.num_results", "must be at least 1"));
        }
        if self.search_timeout.is_zero() || self.drug_timeout.is_zero() {
            return Err(ToolingError::invalid("timeout_secs", "must be greater than zero"));
        }
        if self.page_timeout.is_zero() || self.page_timeout >= self.search_timeout {
            return Err(ToolingError::invalid(
                "search.page_timeout_secs",
                "must be non-zero and shorter than the search timeout",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = ToolsConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.num_results, 3);
        assert_eq!(config.page_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_builder() {
        let config = ToolsConfig::new()
            .with_searx_host("http://127.0.0.1:1234")
            .with_num_results(5)
            .with_openfda_base("http://127.0.0.1:4321");
        assert_eq!(config.searx_host, "http://127.0.0.1:1234");
        assert_eq!(config.num_results, 5);
        assert_eq!(config.openfda_base, "http://127.0.0.1:4321");
    }

    #[test]
    fn test_page_timeout_must_be_shorter() {
        let config = ToolsConfig::new()
            .with_search_timeout(Duration::from_secs(5))
            .with_page_timeout(Duration::from_secs(5));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_results_rejected() {
        let config = ToolsConfig::new().with_num_results(0);
        assert!(config.validate().is_err());
    }
}
