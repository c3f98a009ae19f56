//! Web search through a SearXNG instance
//!
//! The search request is bounded by the search timeout; each result page
//! fetch is bounded separately by the shorter page timeout and degrades to
//! the engine's snippet when it fails.

use super::INTERNET_SEARCH;
use crate::async_utils::timeout::or_fallback;
use crate::config::ToolsConfig;
use crate::logging::timed;
use crate::registry::ToolExecutor;
use crate::runtime::{required_str, Result, RuntimeError, ToolResult};
use async_trait::async_trait;
use futures::future::join_all;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

pub const USER_AGENT: &str = "medical-bot/1.0";

const PARAGRAPHS_PER_PAGE: usize = 5;
const PAGE_TEXT_BUDGET: usize = 500;
const SNIPPET_BUDGET: usize = 300;
const SKIPPED_CONTAINERS: &[&str] = &["script", "style", "nav", "footer", "header"];

/// One result from the engine
///
/// Missing or `null` fields decode as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub url: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub content: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Default, Deserialize)]
struct SearxResponse {
    #[serde(default)]
    results: Vec<SearchHit>,
}

/// Success payload of `internet_search` and `drug_interactions`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchSummary {
    pub query: String,
    pub summary: String,
}

fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

fn inside_skipped_container(element: &ElementRef<'_>) -> bool {
    element.ancestors().any(|node| {
        node.value()
            .as_element()
            .is_some_and(|el| SKIPPED_CONTAINERS.iter().any(|name| *name == el.name()))
    })
}

/// Text of the first paragraphs of an HTML page, capped to the page budget
///
/// Paragraphs inside navigation, header, footer, script or style elements
/// are ignored.
pub fn extract_paragraphs(html: &str) -> String {
    let document = Html::parse_document(html);
    let Ok(selector) = Selector::parse("p") else {
        return String::new();
    };

    let text = document
        .select(&selector)
        .filter(|p| !inside_skipped_container(p))
        .take(PARAGRAPHS_PER_PAGE)
        .map(|p| p.text().collect::<String>().trim().to_string())
        .collect::<Vec<_>>()
        .join(" ");

    truncate_chars(text.trim(), PAGE_TEXT_BUDGET).to_string()
}

/// Render one result as a source-attributed block
pub fn format_result_block(hit: &SearchHit, page_text: &str) -> String {
    let mut block = format!("**{}**\nSource: {}\n", hit.title, hit.url);
    if !page_text.is_empty() {
        block.push_str(&format!("Details: {}...\n", page_text));
    } else if !hit.content.is_empty() {
        block.push_str(&format!(
            "Summary: {}...\n",
            truncate_chars(&hit.content, SNIPPET_BUDGET)
        ));
    }
    block
}

/// HTTP client for the metasearch engine and result pages
#[derive(Debug, Clone)]
pub struct SearchClient {
    client: Client,
    base_url: String,
    language: String,
    num_results: usize,
    page_timeout: Duration,
}

impl SearchClient {
    pub fn new(config: &ToolsConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.search_timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            client,
            base_url: config.searx_host.trim_end_matches('/').to_string(),
            language: config.search_language.clone(),
            num_results: config.num_results,
            page_timeout: config.page_timeout,
        })
    }

    /// Raw engine results for `query`
    pub async fn results(&self, query: &str) -> Result<Vec<SearchHit>> {
        let response = self
            .client
            .get(format!("{}/search", self.base_url))
            .query(&[
                ("q", query),
                ("format", "json"),
                ("pageno", "1"),
                ("language", self.language.as_str()),
            ])
            .header("X-Forwarded-For", "127.0.0.1")
            .header("X-Real-IP", "127.0.0.1")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(RuntimeError::Upstream(format!(
                "Search engine returned HTTP {}",
                status
            )));
        }

        let parsed: SearxResponse = response.json().await?;
        debug!(query = %query, hits = parsed.results.len(), "Search completed");
        Ok(parsed.results)
    }

    async fn fetch_page(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .timeout(self.page_timeout)
            .send()
            .await?
            .error_for_status()?;
        let html = response.text().await?;
        Ok(extract_paragraphs(&html))
    }

    async fn describe(&self, hit: &SearchHit) -> String {
        let page_text = or_fallback(self.page_timeout, self.fetch_page(&hit.url), |err| {
            debug!(url = %hit.url, error = %err, "Page fetch failed, using snippet");
            String::new()
        })
        .await;
        format_result_block(hit, &page_text)
    }

    /// Search and build a multi-result summary with page extracts
    pub async fn summarize(&self, query: &str) -> Result<SearchSummary> {
        let hits = timed("searx_search", self.results(query)).await?;
        let top: Vec<&SearchHit> = hits.iter().take(self.num_results).collect();

        if top.is_empty() {
            return Ok(SearchSummary {
                query: query.to_string(),
                summary: "No results found.".to_string(),
            });
        }

        let blocks = join_all(top.into_iter().map(|hit| self.describe(hit))).await;
        Ok(SearchSummary {
            query: query.to_string(),
            summary: blocks.join("\n\n"),
        })
    }
}

/// `internet_search(query)`
pub struct InternetSearchTool {
    client: Arc<SearchClient>,
}

impl InternetSearchTool {
    pub fn new(client: Arc<SearchClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ToolExecutor for InternetSearchTool {
    fn name(&self) -> &str {
        INTERNET_SEARCH
    }

    async fn execute(&self, args: Value) -> ToolResult {
        let query = match required_str(INTERNET_SEARCH, &args, "query") {
            Ok(query) => query,
            Err(err) => return ToolResult::failure(err.into()),
        };

        let result = self.client.summarize(query).await;
        if let Err(err) = &result {
            warn!(query = %query, error = %err, "Internet search failed");
        }
        result.into()
    }
}
