//! Human-readable rendering of tool results
//!
//! Every tool has a fixed template. Failures render as a short warning line,
//! except that a symptom miss carrying a search directive is first resolved
//! into a web search and that result is rendered instead. Resolution follows
//! at most one directive, so a search result can never trigger another search.

use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::sync::{Arc, OnceLock};
use tooling::tools::{
    DrugLabel, SearchSummary, SymptomReport, TimeReport, CURRENT_TIME, DRUG_INFO, DRUG_INTERACTIONS,
    INTERNET_SEARCH, SYMPTOM_ADVICE,
};
use tooling::{ToolErrorKind, ToolFailure, ToolRegistry, ToolResult};
use tracing::{info, warn};

const PURPOSE_BUDGET: usize = 200;
const WARNINGS_BUDGET: usize = 300;

/// Appended to drug lookups that found nothing
pub const DRUG_NOT_FOUND_GUIDANCE: &str = "💡 Suggestions:\n\
- Check the spelling (e.g., 'paracetamol' not 'parsnemol')\n\
- Try the generic name instead of brand name\n\
- Common pain relievers: paracetamol, ibuprofen, aspirin\n\n\
If you're unsure about the drug name, describe your symptoms and I can help!";

fn medication_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"taking (\w+)").ok()).as_ref()
}

fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

fn or_na(value: &str) -> &str {
    if value.trim().is_empty() {
        "N/A"
    } else {
        value
    }
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Renders tool results and follows search directives
#[derive(Debug, Clone)]
pub struct ResponseFormatter {
    registry: Arc<ToolRegistry>,
}

impl ResponseFormatter {
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self { registry }
    }

    /// Follow a search directive, if any, returning the tool name and result to render
    pub async fn resolve(&self, tool: &str, result: ToolResult) -> (String, ToolResult) {
        let query = match result.error().and_then(|failure| failure.search_fallback.as_ref()) {
            Some(directive) if tool != INTERNET_SEARCH => directive.query.clone(),
            _ => return (tool.to_string(), result),
        };

        info!(tool = %tool, query = %query, "Following search directive");
        let search = self
            .registry
            .invoke(INTERNET_SEARCH, json!({ "query": query }))
            .await;
        (INTERNET_SEARCH.to_string(), search)
    }

    /// Resolve then render
    pub async fn format(&self, tool: &str, result: ToolResult) -> String {
        let (tool, result) = self.resolve(tool, result).await;
        Self::render(&tool, &result)
    }

    /// Render a result without following directives
    pub fn render(tool: &str, result: &ToolResult) -> String {
        match result {
            ToolResult::Error(failure) => Self::render_failure(tool, failure),
            ToolResult::Success { data } => match tool {
                DRUG_INFO => Self::typed(data, Self::render_drug),
                CURRENT_TIME => Self::typed(data, |t: TimeReport| format!("⏰ Current time: {}", t.time)),
                INTERNET_SEARCH => Self::typed(data, |s: SearchSummary| {
                    format!(
                        "🔍 **Medical Information:**\n\n{}\n\n💡 Always consult healthcare professionals for personalized advice.",
                        s.summary
                    )
                }),
                DRUG_INTERACTIONS => Self::typed(data, |s: SearchSummary| {
                    format!(
                        "⚠️ **Drug Interaction Information:**\n\n{}\n\n💡 Consult your doctor or pharmacist before combining medications.",
                        s.summary
                    )
                }),
                SYMPTOM_ADVICE => Self::typed(data, Self::render_symptom),
                _ => data.to_string(),
            },
        }
    }

    fn typed<T: DeserializeOwned>(data: &Value, render: impl FnOnce(T) -> String) -> String {
        match serde_json::from_value::<T>(data.clone()) {
            Ok(payload) => render(payload),
            Err(err) => {
                warn!(error = %err, "Tool payload did not match its template");
                data.to_string()
            }
        }
    }

    fn render_failure(tool: &str, failure: &ToolFailure) -> String {
        if tool == DRUG_INFO && failure.kind == ToolErrorKind::NotFound {
            return format!("⚠️ {}\n\n{}", failure.message, DRUG_NOT_FOUND_GUIDANCE);
        }
        format!("⚠️ {}", failure.message)
    }

    fn render_drug(label: DrugLabel) -> String {
        format!(
            "💊 **{} Information:**\n\n\
             **Generic Name:** {}\n\
             **Manufacturer:** {}\n\n\
             **Purpose:** {}\n\n\
             **⚠️ Important Warnings:** {}\n\n\
             💡 Always follow dosage instructions and consult a doctor if symptoms persist.",
            label.display_name(),
            or_na(&label.generic_name),
            or_na(&label.manufacturer_name),
            truncate_chars(&label.purpose, PURPOSE_BUDGET),
            truncate_chars(&label.warnings, WARNINGS_BUDGET),
        )
    }

    fn render_symptom(report: SymptomReport) -> String {
        let advice = &report.advice;
        let mut out = format!(
            "I understand you're experiencing {}. Here's what can help:\n\n",
            report.symptom
        );

        let medication = report
            .medication_note
            .as_deref()
            .zip(medication_pattern())
            .and_then(|(note, pattern)| pattern.captures(note))
            .and_then(|caps| caps.get(1))
            .map(|m| title_case(m.as_str()));

        if let (Some(medication), Some(timeline)) = (medication, &advice.medication_timeline) {
            out.push_str(&format!("💊 **About {}:**\n{}\n\n", medication, timeline));
        }

        if !advice.relief_tips.is_empty() {
            out.push_str("💡 **What to try right now:**\n");
            for tip in &advice.relief_tips {
                out.push_str(&format!("• {}\n", tip));
            }
            out.push('\n');
        }

        if !advice.when_to_worry.is_empty() {
            out.push_str("🚨 **See a doctor immediately if you have:**\n");
            for warning in &advice.when_to_worry {
                out.push_str(&format!("• {}\n", warning));
            }
            out.push('\n');
        }

        if !advice.common_causes.is_empty() {
            out.push_str(&format!("Common triggers: {}\n\n", advice.common_causes.join(", ")));
        }

        out.push_str(
            "If your symptoms don't improve in the next few hours or get worse, please see a healthcare professional.",
        );
        out
    }
}
