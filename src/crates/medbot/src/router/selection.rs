//! Tool planning from intent scores

use super::intent::{IntentCategory, IntentScore};
use serde_json::{json, Value};
use tooling::tools::{DRUG_INFO, INTERNET_SEARCH, SYMPTOM_ADVICE};

/// Drug names recognized in free text, in lookup priority order
pub const KNOWN_DRUGS: &[&str] = &["aspirin", "paracetamol", "ibuprofen", "penicillin", "antibiotic"];

/// One tool call in a plan
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedCall {
    pub tool: &'static str,
    pub args: Value,
    /// Run only when no earlier call produced usable output
    pub only_if_empty: bool,
}

impl PlannedCall {
    fn always(tool: &'static str, args: Value) -> Self {
        Self {
            tool,
            args,
            only_if_empty: false,
        }
    }
}

/// First known drug mentioned in `prompt`
pub fn extract_drug_name(prompt: &str) -> Option<&'static str> {
    let lowered = prompt.to_lowercase();
    KNOWN_DRUGS.iter().copied().find(|drug| lowered.contains(drug))
}

/// Ordered tool calls for a medical prompt
///
/// Current events search runs first with the year appended, then symptom
/// advice, then a drug label lookup. A plain web search closes the plan for
/// diagnosis questions but only runs if nothing before it succeeded.
pub fn plan_tools(prompt: &str, score: &IntentScore, year: i32) -> Vec<PlannedCall> {
    let mut plan = Vec::new();

    if score.get(IntentCategory::CurrentEvents) > 0 {
        plan.push(PlannedCall::always(
            INTERNET_SEARCH,
            json!({ "query": format!("{} {}", prompt, year) }),
        ));
    }

    let diagnosis = score.get(IntentCategory::Diagnosis) > 0;
    if score.get(IntentCategory::Symptoms) > 0 || diagnosis {
        plan.push(PlannedCall::always(SYMPTOM_ADVICE, json!({ "symptom": prompt })));
    }

    if score.get(IntentCategory::Drugs) > 0 {
        if let Some(drug) = extract_drug_name(prompt) {
            plan.push(PlannedCall::always(DRUG_INFO, json!({ "drug_name": drug })));
        }
    }

    if diagnosis {
        plan.push(PlannedCall {
            tool: INTERNET_SEARCH,
            args: json!({ "query": prompt }),
            only_if_empty: true,
        });
    }

    plan
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::IntentClassifier;

    #[test]
    fn test_zero_score_plans_nothing() {
        let score = IntentScore::default();
        assert!(plan_tools("hello", &score, 2025).is_empty());
    }

    #[test]
    fn test_current_events_search_runs_first_with_year() {
        let prompt = "latest Marburg virus outbreak Ethiopia";
        let score = IntentClassifier::new().classify(prompt);
        let plan = plan_tools(prompt, &score, 2025);

        assert_eq!(plan[0].tool, INTERNET_SEARCH);
        assert_eq!(plan[0].args["query"], "latest Marburg virus outbreak Ethiopia 2025");
        assert!(!plan[0].only_if_empty);
    }

    #[test]
    fn test_symptom_prompt_passed_whole() {
        let score = IntentClassifier::new().classify("I have a headache");
        let plan = plan_tools("I have a headache", &score, 2025);
        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].tool, SYMPTOM_ADVICE);
        assert_eq!(plan[0].args["symptom"], "I have a headache");
    }

    #[test]
    fn test_drug_lookup_uses_first_known_name() {
        let score = IntentScore::default().with(IntentCategory::Drugs, 2);
        let plan = plan_tools("ibuprofen or aspirin?", &score, 2025);
        assert_eq!(plan, vec![PlannedCall::always(DRUG_INFO, json!({"drug_name": "aspirin"}))]);
    }

    #[test]
    fn test_drug_intent_without_known_name() {
        let score = IntentScore::default().with(IntentCategory::Drugs, 1);
        assert!(plan_tools("which pill is best", &score, 2025).is_empty());
    }

    #[test]
    fn test_diagnosis_adds_conditional_search() {
        let score = IntentScore::default().with(IntentCategory::Diagnosis, 1);
        let plan = plan_tools("what is lupus", &score, 2025);
        let tools: Vec<_> = plan.iter().map(|c| (c.tool, c.only_if_empty)).collect();
        assert_eq!(tools, vec![(SYMPTOM_ADVICE, false), (INTERNET_SEARCH, true)]);
        assert_eq!(plan[1].args["query"], "what is lupus");
    }

    #[test]
    fn test_extract_drug_name_case_insensitive() {
        assert_eq!(extract_drug_name("Took PARACETAMOL today"), Some("paracetamol"));
        assert_eq!(extract_drug_name("nothing here"), None);
    }
}
