use super::search::{SearchClient, SearchSummary};
use super::DRUG_INTERACTIONS;
use crate::registry::ToolExecutor;
use crate::runtime::{optional_str, required_str, Result, ToolResult};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

const SOURCES: &str = "site:drugs.com OR site:medlineplus.gov OR site:webmd.com";
const MAX_LINES: usize = 3;

/// Build the interaction search query, restricted to reference sites
pub fn interactions_query(drug_name: &str, other_drug: Option<&str>) -> String {
    match other_drug {
        Some(other) => format!("{} {} drug interaction {}", drug_name, other, SOURCES),
        None => format!("{} drug interactions {}", drug_name, SOURCES),
    }
}

/// `drug_interactions(drug_name, other_drug?)`
pub struct DrugInteractionsTool {
    client: Arc<SearchClient>,
}

impl DrugInteractionsTool {
    pub fn new(client: Arc<SearchClient>) -> Self {
        Self { client }
    }

    async fn summarize(&self, args: &Value) -> Result<SearchSummary> {
        let drug = required_str(DRUG_INTERACTIONS, args, "drug_name")?;
        let query = interactions_query(drug, optional_str(args, "other_drug"));

        let lines: Vec<String> = self
            .client
            .results(&query)
            .await?
            .iter()
            .take(MAX_LINES)
            .map(|hit| format!("{} ({})", hit.title, hit.url))
            .collect();

        let summary = if lines.is_empty() {
            "No interaction info found.".to_string()
        } else {
            lines.join("\n")
        };
        Ok(SearchSummary { query, summary })
    }
}

#[async_trait]
impl ToolExecutor for DrugInteractionsTool {
    fn name(&self) -> &str {
        DRUG_INTERACTIONS
    }

    async fn execute(&self, args: Value) -> ToolResult {
        self.summarize(&args).await.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_drug_query() {
        assert_eq!(
            interactions_query("warfarin", None),
            "warfarin drug interactions site:drugs.com OR site:medlineplus.gov OR site:webmd.com"
        );
    }

    #[test]
    fn test_pair_query() {
        assert_eq!(
            interactions_query("warfarin", Some("aspirin")),
            "warfarin aspirin drug interaction site:drugs.com OR site:medlineplus.gov OR site:webmd.com"
        );
    }
}
