//! Addis Assistant chat-generation client.
//!
//! # Example
//!
//! ```rust,ignore
//! use llm::config::{RemoteLlmConfig, DEFAULT_API_URL};
//! use llm::remote::AddisClient;
//!
//! let config = RemoteLlmConfig::from_env("ADDIS_ASSISTANT_API_KEY", DEFAULT_API_URL)?;
//! let client = AddisClient::new(config)?;
//! ```

use crate::config::RemoteLlmConfig;
use crate::error::{LlmError, Result};
use crate::generator::{GenerationRequest, TextGenerator};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tooling::logging::{sanitize_for_logging, truncate_for_log};
use tracing::{debug, error};

/// Addis Assistant API client.
#[derive(Debug, Clone)]
pub struct AddisClient {
    config: RemoteLlmConfig,
    client: Client,
}

#[derive(Debug, Default, Deserialize)]
struct AddisResponse {
    #[serde(default)]
    data: Option<AddisData>,
}

#[derive(Debug, Default, Deserialize)]
struct AddisData {
    #[serde(default)]
    response_text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AddisErrorBody {
    error: AddisErrorDetail,
}

#[derive(Debug, Deserialize)]
struct AddisErrorDetail {
    message: String,
}

impl AddisClient {
    /// Create a new client with the given configuration.
    pub fn new(config: RemoteLlmConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &RemoteLlmConfig {
        &self.config
    }
}

#[async_trait]
impl TextGenerator for AddisClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<String> {
        if !self.config.has_api_key() {
            return Err(LlmError::ApiKeyNotFound(
                "no API key configured for the generation backend".to_string(),
            ));
        }

        debug!(
            language = %request.target_language,
            prompt = %truncate_for_log(&request.prompt, 120),
            "Calling generation backend"
        );

        let response = self
            .client
            .post(&self.config.api_url)
            .header("X-API-Key", &self.config.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(
                status = status.as_u16(),
                body = %truncate_for_log(&sanitize_for_logging(&body), 300),
                "Generation backend returned an error"
            );
            let message = serde_json::from_str::<AddisErrorBody>(&body)
                .ok()
                .map(|b| b.error.message)
                .filter(|m| !m.trim().is_empty());
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: AddisResponse = response.json().await?;
        Ok(body
            .data
            .and_then(|d| d.response_text)
            .unwrap_or_default())
    }

    fn backend_name(&self) -> &str {
        "addis"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_shape_tolerates_missing_fields() {
        let body: AddisResponse = serde_json::from_str("{}").unwrap();
        assert!(body.data.is_none());

        let body: AddisResponse = serde_json::from_str(r#"{"data": {}}"#).unwrap();
        assert!(body.data.unwrap().response_text.is_none());
    }

    #[test]
    fn test_request_wire_format() {
        let request = GenerationRequest::new("hi", "am", 0.7);
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["prompt"], "hi");
        assert_eq!(value["target_language"], "am");
        assert!((value["generation_config"]["temperature"].as_f64().unwrap() - 0.7).abs() < 1e-6);
    }

    #[tokio::test]
    async fn test_missing_key_skips_network() {
        let client = AddisClient::new(RemoteLlmConfig::new("", "http://127.0.0.1:9/x")).unwrap();
        let err = client
            .generate(&GenerationRequest::new("hi", "en", 0.7))
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::ApiKeyNotFound(_)));
    }
}
