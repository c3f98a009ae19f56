//! Health lookup tools
//!
//! - `get_symptom_advice` - static knowledge base with web-search fallback
//! - `drug_info` - drug label lookup against OpenFDA
//! - `internet_search` - SearXNG search with page text extraction
//! - `drug_interactions` - search-backed interaction summary
//! - `get_current_time` - local timestamp

mod clock;
mod drug;
mod interactions;
mod search;
mod symptom;

pub use clock::{CurrentTimeTool, TimeReport};
pub use drug::{DrugInfoTool, DrugLabel, OpenFdaClient};
pub use interactions::{interactions_query, DrugInteractionsTool};
pub use search::{
    extract_paragraphs, format_result_block, InternetSearchTool, SearchClient, SearchHit,
    SearchSummary, USER_AGENT,
};
pub use symptom::{fallback_query, lookup, SymptomAdvice, SymptomAdviceTool, SymptomEntry, SymptomReport};

pub const SYMPTOM_ADVICE: &str = "get_symptom_advice";
pub const DRUG_INFO: &str = "drug_info";
pub const INTERNET_SEARCH: &str = "internet_search";
pub const DRUG_INTERACTIONS: &str = "drug_interactions";
pub const CURRENT_TIME: &str = "get_current_time";

/// Tools the orchestrator expects at startup
pub const STANDARD_TOOLS: &[&str] = &[
    SYMPTOM_ADVICE,
    DRUG_INFO,
    INTERNET_SEARCH,
    DRUG_INTERACTIONS,
    CURRENT_TIME,
];
