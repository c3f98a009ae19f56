//! Server configuration for medbot-server
//!
//! Loaded from a TOML file; every field has a default so an empty file (or
//! no file at all) yields a runnable configuration. Environment variables
//! override file values after loading.

use llm::config::{RemoteLlmConfig, DEFAULT_API_URL};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tooling::config::{override_parsed, override_string};
use tooling::ToolsConfig;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum ServerConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(toml::de::Error),
    #[error("Invalid environment override: {0}")]
    EnvError(#[from] tooling::ToolingError),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

type Result<T> = std::result::Result<T, ServerConfigError>;

/// Listener and identification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    /// Name reported by `GET /`
    pub name: String,
    pub host: String,
    pub port: u16,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            name: "medbot".to_string(),
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

/// Remote generation backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationSection {
    pub api_url: String,
    /// Usually supplied through `ADDIS_ASSISTANT_API_KEY` instead
    pub api_key: String,
    pub timeout_secs: u64,
    pub temperature: f32,
    /// Replies are truncated to this many characters
    pub max_chars: usize,
}

impl Default for GenerationSection {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_key: String::new(),
            timeout_secs: 15,
            temperature: 0.7,
            max_chars: 4000,
        }
    }
}

/// Metasearch engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSection {
    pub searx_host: String,
    pub timeout_secs: u64,
    /// Per result page; must be shorter than `timeout_secs`
    pub page_timeout_secs: u64,
    pub num_results: usize,
    pub language: String,
}

impl Default for SearchSection {
    fn default() -> Self {
        Self {
            searx_host: "http://searxng:8080".to_string(),
            timeout_secs: 10,
            page_timeout_secs: 5,
            num_results: 3,
            language: "en".to_string(),
        }
    }
}

/// Drug label database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrugsSection {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for DrugsSection {
    fn default() -> Self {
        Self {
            base_url: "https://api.fda.gov".to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistorySection {
    /// Turns kept per user
    pub max_turns: usize,
}

impl Default for HistorySection {
    fn default() -> Self {
        Self {
            max_turns: crate::context::DEFAULT_MAX_TURNS,
        }
    }
}

/// Complete server configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub server: ServerSection,
    pub generation: GenerationSection,
    pub search: SearchSection,
    pub drugs: DrugsSection,
    pub history: HistorySection,
}

impl ServerConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ServerConfigError::ReadError)?;
        Self::from_str(&content)
    }

    /// Load configuration from TOML string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(ServerConfigError::ParseError)
    }

    /// Locate, load, override from environment and validate
    ///
    /// Searches for config in:
    /// 1. `explicit` (the `--config` flag)
    /// 2. CONFIG_PATH environment variable
    /// 3. ./config/medbot.toml
    /// 4. ./medbot.toml
    ///
    /// Falls back to built-in defaults when none exists.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = match Self::locate(explicit)? {
            Some(path) => {
                info!(path = %path.display(), "Loading configuration");
                Self::from_file(&path)?
            }
            None => {
                info!("No configuration file found, using defaults");
                Self::default()
            }
        };
        config.apply_env()?;
        config.validate()?;
        Ok(config)
    }

    fn locate(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
        if let Some(path) = explicit {
            return Ok(Some(path.to_path_buf()));
        }
        if let Some(path) = tooling::config::get_env("CONFIG_PATH")? {
            return Ok(Some(PathBuf::from(path)));
        }
        let candidates = [PathBuf::from("config/medbot.toml"), PathBuf::from("./medbot.toml")];
        Ok(candidates.into_iter().find(|path| path.exists()))
    }

    /// Apply environment overrides; blank variables are ignored
    pub fn apply_env(&mut self) -> Result<()> {
        let applied = [
            override_string(&mut self.generation.api_key, "ADDIS_ASSISTANT_API_KEY")?,
            override_string(&mut self.generation.api_url, "ADDIS_API_URL")?,
            override_string(&mut self.search.searx_host, "SEARX_HOST")?,
            override_string(&mut self.drugs.base_url, "OPENFDA_BASE")?,
            override_string(&mut self.server.host, "HOST")?,
            override_parsed(&mut self.server.port, "PORT")?,
        ];
        debug!(overrides = applied.iter().filter(|a| **a).count(), "Applied environment overrides");
        Ok(())
    }

    /// Reject settings the server cannot run with
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: &str| Err(ServerConfigError::InvalidConfig(msg.to_string()));

        if self.server.port == 0 {
            return invalid("server.port must be non-zero");
        }
        if self.generation.timeout_secs == 0 {
            return invalid("generation.timeout_secs must be non-zero");
        }
        if self.generation.max_chars == 0 {
            return invalid("generation.max_chars must be non-zero");
        }
        if !(0.0..=2.0).contains(&self.generation.temperature) {
            return invalid("generation.temperature must be within [0, 2]");
        }
        if self.search.timeout_secs == 0 || self.search.page_timeout_secs == 0 {
            return invalid("search timeouts must be non-zero");
        }
        if self.search.page_timeout_secs >= self.search.timeout_secs {
            return invalid("search.page_timeout_secs must be shorter than search.timeout_secs");
        }
        if self.drugs.timeout_secs == 0 {
            return invalid("drugs.timeout_secs must be non-zero");
        }
        if self.history.max_turns == 0 {
            return invalid("history.max_turns must be non-zero");
        }
        self.tools_config()
            .validate()
            .map_err(|e| ServerConfigError::InvalidConfig(e.to_string()))
    }

    /// Listen address as `host:port`
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn tools_config(&self) -> ToolsConfig {
        ToolsConfig {
            searx_host: self.search.searx_host.clone(),
            search_timeout: Duration::from_secs(self.search.timeout_secs),
            page_timeout: Duration::from_secs(self.search.page_timeout_secs),
            num_results: self.search.num_results,
            search_language: self.search.language.clone(),
            openfda_base: self.drugs.base_url.clone(),
            drug_timeout: Duration::from_secs(self.drugs.timeout_secs),
        }
    }

    pub fn llm_config(&self) -> RemoteLlmConfig {
        RemoteLlmConfig::new(self.generation.api_key.clone(), self.generation.api_url.clone())
            .with_timeout(Duration::from_secs(self.generation.timeout_secs))
            .with_temperature(self.generation.temperature)
            .with_max_chars(self.generation.max_chars)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.generation.timeout_secs, 15);
        assert_eq!(config.search.num_results, 3);
        assert_eq!(config.history.max_turns, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_parsing() {
        let toml_content = r#"
[server]
name = "medbot-staging"
port = 9000

[generation]
api_url = "http://localhost:1234/generate"
temperature = 0.2

[search]
searx_host = "http://localhost:8888"
timeout_secs = 8
page_timeout_secs = 3

[history]
max_turns = 4
"#;
        let config = ServerConfig::from_str(toml_content).unwrap();
        assert_eq!(config.server.name, "medbot-staging");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.generation.temperature, 0.2);
        assert_eq!(config.generation.max_chars, 4000);
        assert_eq!(config.history.max_turns, 4);

        let tools = config.tools_config();
        assert_eq!(tools.searx_host, "http://localhost:8888");
        assert_eq!(tools.page_timeout, Duration::from_secs(3));
        assert_eq!(tools.openfda_base, "https://api.fda.gov");

        let llm = config.llm_config();
        assert_eq!(llm.api_url, "http://localhost:1234/generate");
        assert_eq!(llm.timeout, Duration::from_secs(15));
    }

    #[test]
    fn test_empty_file_is_default() {
        assert_eq!(ServerConfig::from_str("").unwrap(), ServerConfig::default());
    }

    #[test]
    fn test_sample_file_matches_defaults() {
        let sample = include_str!("../../../../config/medbot.toml");
        assert_eq!(ServerConfig::from_str(sample).unwrap(), ServerConfig::default());
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(
            ServerConfig::from_str("[server]\nport = \"eighty\""),
            Err(ServerConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[drugs]\nbase_url = \"http://fda.local\"\ntimeout_secs = 2").unwrap();

        let config = ServerConfig::from_file(file.path()).unwrap();
        assert_eq!(config.drugs.base_url, "http://fda.local");
        assert_eq!(config.tools_config().drug_timeout, Duration::from_secs(2));
    }

    #[test]
    fn test_load_explicit_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server]\nname = \"from-file\"").unwrap();
        let config = ServerConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.server.name, "from-file");
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = ServerConfig::from_file(dir.path().join("absent.toml"));
        assert!(matches!(result, Err(ServerConfigError::ReadError(_))));
    }

    #[test]
    fn test_validation() {
        let mut config = ServerConfig::default();
        config.search.page_timeout_secs = 10;
        assert!(config.validate().is_err());

        let mut config = ServerConfig::default();
        config.generation.temperature = 2.5;
        assert!(config.validate().is_err());

        let mut config = ServerConfig::default();
        config.history.max_turns = 0;
        assert!(config.validate().is_err());

        let mut config = ServerConfig::default();
        config.server.port = 0;
        assert!(config.validate().is_err());

        let mut config = ServerConfig::default();
        config.search.num_results = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_env_overrides() {
        std::env::set_var("SEARX_HOST", "http://searx.test");
        std::env::set_var("OPENFDA_BASE", "   ");
        let mut config = ServerConfig::default();
        config.apply_env().unwrap();
        std::env::remove_var("SEARX_HOST");
        std::env::remove_var("OPENFDA_BASE");

        assert_eq!(config.search.searx_host, "http://searx.test");
        assert_eq!(config.drugs.base_url, "https://api.fda.gov");
    }
}
