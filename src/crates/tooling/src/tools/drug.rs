//! Drug label lookup against the OpenFDA label endpoint

use super::DRUG_INFO;
use crate::config::ToolsConfig;
use crate::logging::{sanitize_for_logging, truncate_for_log};
use crate::registry::ToolExecutor;
use crate::runtime::{required_str, Result, RuntimeError, ToolFailure, ToolResult};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

/// Success payload of `drug_info`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrugLabel {
    pub brand_name: String,
    pub generic_name: String,
    pub manufacturer_name: String,
    pub purpose: String,
    pub indications_and_usage: String,
    pub warnings: String,
}

impl DrugLabel {
    /// Display name: brand, else generic, else "Drug"
    pub fn display_name(&self) -> &str {
        [self.brand_name.as_str(), self.generic_name.as_str()]
            .into_iter()
            .find(|name| !name.trim().is_empty())
            .unwrap_or("Drug")
    }
}

#[derive(Debug, Default, Deserialize)]
struct LabelResponse {
    #[serde(default)]
    results: Vec<LabelRecord>,
}

#[derive(Debug, Default, Deserialize)]
struct LabelRecord {
    #[serde(default)]
    openfda: OpenFdaFields,
    #[serde(default)]
    purpose: Vec<String>,
    #[serde(default)]
    indications_and_usage: Vec<String>,
    #[serde(default)]
    warnings: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
struct OpenFdaFields {
    #[serde(default)]
    brand_name: Vec<String>,
    #[serde(default)]
    generic_name: Vec<String>,
    #[serde(default)]
    manufacturer_name: Vec<String>,
}

fn join_or(parts: Vec<String>, sep: &str, default: &str) -> String {
    if parts.is_empty() {
        default.to_string()
    } else {
        parts.join(sep)
    }
}

impl From<LabelRecord> for DrugLabel {
    fn from(record: LabelRecord) -> Self {
        Self {
            brand_name: record.openfda.brand_name.join(", "),
            generic_name: record.openfda.generic_name.join(", "),
            manufacturer_name: record.openfda.manufacturer_name.join(", "),
            purpose: join_or(record.purpose, " ", "No purpose info available."),
            indications_and_usage: join_or(
                record.indications_and_usage,
                " ",
                "No indications info available.",
            ),
            warnings: join_or(record.warnings, " ", "No warnings available."),
        }
    }
}

/// HTTP client for the drug label database
#[derive(Debug, Clone)]
pub struct OpenFdaClient {
    client: Client,
    base_url: String,
}

impl OpenFdaClient {
    pub fn new(config: &ToolsConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.drug_timeout).build()?;
        Ok(Self {
            client,
            base_url: config.openfda_base.trim_end_matches('/').to_string(),
        })
    }

    fn label_url(&self, drug_name: &str) -> String {
        let term = drug_name.split_whitespace().collect::<Vec<_>>().join("+");
        format!(
            "{}/drug/label.json?search=openfda.brand_name:{term}+openfda.generic_name:{term}&limit=1",
            self.base_url
        )
    }

    /// Fetch the first matching label
    pub async fn label(&self, drug_name: &str) -> Result<DrugLabel> {
        let response = self.client.get(self.label_url(drug_name)).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(RuntimeError::NotFound(format!(
                "Drug '{}' not found in OpenFDA database. Please check the spelling or try the generic name (e.g., 'paracetamol' instead of 'parsnemol').",
                drug_name
            )));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(
                status = %status,
                body = %truncate_for_log(&sanitize_for_logging(&body), 200),
                "Drug label lookup failed"
            );
            return Err(RuntimeError::Upstream(format!("HTTP {}", status)));
        }

        let parsed: LabelResponse = response.json().await?;
        parsed
            .results
            .into_iter()
            .next()
            .map(DrugLabel::from)
            .ok_or_else(|| {
                RuntimeError::NotFound(format!(
                    "No data found for '{}' in OpenFDA. Please check the spelling.",
                    drug_name
                ))
            })
    }
}

fn validate_drug_name(name: &str) -> Result<&str> {
    let valid = name
        .chars()
        .all(|c| c.is_alphanumeric() || c == ' ' || c == '-');
    if valid {
        Ok(name)
    } else {
        Err(RuntimeError::invalid_args(
            DRUG_INFO,
            format!("unsupported characters in drug name '{}'", name),
        ))
    }
}

/// `drug_info(drug_name)`
pub struct DrugInfoTool {
    client: OpenFdaClient,
}

impl DrugInfoTool {
    pub fn new(client: OpenFdaClient) -> Self {
        Self { client }
    }

    async fn lookup(&self, args: &Value) -> Result<DrugLabel> {
        let name = validate_drug_name(required_str(DRUG_INFO, args, "drug_name")?)?;
        self.client.label(name).await
    }
}

#[async_trait]
impl ToolExecutor for DrugInfoTool {
    fn name(&self) -> &str {
        DRUG_INFO
    }

    async fn execute(&self, args: Value) -> ToolResult {
        match self.lookup(&args).await {
            Ok(label) => ToolResult::success(label),
            Err(err @ (RuntimeError::NotFound(_) | RuntimeError::InvalidArguments { .. })) => {
                ToolResult::failure(err.into())
            }
            Err(err) => {
                let kind = err.kind();
                ToolResult::failure(ToolFailure::new(
                    kind,
                    format!("Unable to fetch drug information: {}", err),
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_url() {
        let client = OpenFdaClient::new(&ToolsConfig::default().with_openfda_base("http://fda.local/")).unwrap();
        assert_eq!(
            client.label_url("aspirin"),
            "http://fda.local/drug/label.json?search=openfda.brand_name:aspirin+openfda.generic_name:aspirin&limit=1"
        );
    }

    #[test]
    fn test_record_defaults() {
        let record: LabelRecord = serde_json::from_str(r#"{"openfda": {"generic_name": ["ASPIRIN"]}}"#).unwrap();
        let label = DrugLabel::from(record);
        assert_eq!(label.generic_name, "ASPIRIN");
        assert_eq!(label.brand_name, "");
        assert_eq!(label.purpose, "No purpose info available.");
        assert_eq!(label.warnings, "No warnings available.");
        assert_eq!(label.display_name(), "ASPIRIN");
    }

    #[test]
    fn test_record_joins_lists() {
        let record: LabelRecord = serde_json::from_str(
            r#"{"openfda": {"brand_name": ["Bayer", "Ecotrin"], "manufacturer_name": ["Bayer"]},
                "purpose": ["Pain reliever", "Fever reducer"]}"#,
        )
        .unwrap();
        let label = DrugLabel::from(record);
        assert_eq!(label.brand_name, "Bayer, Ecotrin");
        assert_eq!(label.purpose, "Pain reliever Fever reducer");
        assert_eq!(label.display_name(), "Bayer, Ecotrin");
    }

    #[test]
    fn test_rejects_query_syntax_in_name() {
        assert!(validate_drug_name("aspirin&limit=100").is_err());
        assert!(validate_drug_name("co-codamol").is_ok());
    }
}
