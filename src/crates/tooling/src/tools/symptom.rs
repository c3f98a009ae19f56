//! Symptom advice from a fixed knowledge base
//!
//! Lookup order is exact key, then substring in either direction (in
//! knowledge-base order), then the alias table (in table order). A miss
//! returns a failure carrying a web-search directive.

use super::SYMPTOM_ADVICE;
use crate::registry::ToolExecutor;
use crate::runtime::{optional_str, required_str, Result, ToolFailure, ToolResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

const DEFAULT_TIMELINE: &str = "Most medications take 30-60 minutes to work.";

/// Static advice for one canonical symptom
#[derive(Debug)]
pub struct SymptomEntry {
    pub common_causes: &'static [&'static str],
    pub relief_tips: &'static [&'static str],
    pub when_to_worry: &'static [&'static str],
    pub medication_timeline: Option<&'static str>,
}

const EMPTY: SymptomEntry = SymptomEntry {
    common_causes: &[],
    relief_tips: &[],
    when_to_worry: &[],
    medication_timeline: None,
};

static KNOWLEDGE_BASE: &[(&str, SymptomEntry)] = &[
    (
        "headache",
        SymptomEntry {
            common_causes: &["tension", "dehydration", "eye strain", "lack of sleep", "stress"],
            relief_tips: &[
                "Rest in a quiet, dark room",
                "Stay hydrated - drink plenty of water",
                "Apply a cold or warm compress to your head or neck",
                "Gently massage your temples and neck",
                "Ensure you're not hungry - low blood sugar can cause headaches",
            ],
            when_to_worry: &[
                "Sudden severe headache (worst headache of your life)",
                "Headache with fever, stiff neck, confusion, or vision changes",
                "Headache after head injury",
                "Headache that worsens over days despite medication",
                "New headache pattern in people over 50",
            ],
            medication_timeline: Some(
                "Paracetamol/ibuprofen usually works within 30-60 minutes. If no relief after 4 hours, may need reassessment.",
            ),
        },
    ),
    (
        "fever",
        SymptomEntry {
            relief_tips: &[
                "Rest and stay hydrated",
                "Take paracetamol or ibuprofen as directed",
                "Dress in light clothing",
                "Keep room temperature comfortable",
            ],
            when_to_worry: &[
                "Fever above 39.4°C (103°F)",
                "Fever lasting more than 3 days",
                "Severe headache, stiff neck, or confusion",
                "Difficulty breathing or chest pain",
            ],
            medication_timeline: Some(
                "Fever reducers (paracetamol, ibuprofen) work in 30-60 minutes. Temperature should start dropping within 1 hour.",
            ),
            ..EMPTY
        },
    ),
    (
        "stomach",
        SymptomEntry {
            common_causes: &["indigestion", "food poisoning", "stress", "overeating", "infection"],
            relief_tips: &[
                "Avoid solid food for a few hours if nauseous",
                "Sip water or clear fluids slowly",
                "Try ginger tea or peppermint tea",
                "Avoid spicy, fatty, or acidic foods",
                "Rest in a comfortable position",
            ],
            when_to_worry: &[
                "Severe abdominal pain lasting more than 2 hours",
                "Blood in vomit or stool",
                "Signs of dehydration (very dark urine, dizziness)",
                "Fever with stomach pain",
                "Unable to keep any fluids down for 24 hours",
            ],
            medication_timeline: Some(
                "Antacids work within 5-10 minutes. Other stomach medicines may take 30-60 minutes.",
            ),
        },
    ),
    (
        "nausea",
        SymptomEntry {
            relief_tips: &[
                "Sip clear fluids slowly (water, ginger ale)",
                "Eat bland foods like crackers or toast",
                "Avoid strong smells",
                "Get fresh air",
                "Try ginger or peppermint",
            ],
            when_to_worry: &[
                "Persistent vomiting for more than 24 hours",
                "Signs of dehydration",
                "Severe abdominal pain",
                "Blood in vomit",
            ],
            ..EMPTY
        },
    ),
    (
        "cough",
        SymptomEntry {
            common_causes: &["cold", "flu", "allergies", "throat irritation"],
            relief_tips: &[
                "Stay hydrated - drink warm liquids",
                "Use honey (for adults and children over 1 year)",
                "Breathe in steam from a hot shower",
                "Use a humidifier",
                "Avoid smoking and irritants",
            ],
            when_to_worry: &[
                "Cough lasting more than 3 weeks",
                "Coughing up blood",
                "Difficulty breathing or wheezing",
                "High fever with cough",
                "Chest pain",
            ],
            medication_timeline: Some(
                "Cough suppressants work within 30 minutes. Full effect in 1-2 hours.",
            ),
        },
    ),
    (
        "cold",
        SymptomEntry {
            relief_tips: &[
                "Rest and sleep well",
                "Drink plenty of fluids",
                "Gargle with warm salt water for sore throat",
                "Use saline nasal drops",
                "Take paracetamol for aches and fever",
            ],
            when_to_worry: &[
                "Symptoms lasting more than 10 days",
                "High fever (above 38.5°C) for more than 3 days",
                "Difficulty breathing",
                "Severe headache or sinus pain",
            ],
            ..EMPTY
        },
    ),
    (
        "pain",
        SymptomEntry {
            medication_timeline: Some(
                "Most pain relievers (paracetamol, ibuprofen) take 30-60 minutes to work. Peak effect at 1-2 hours.",
            ),
            ..EMPTY
        },
    ),
    (
        "dizzy",
        SymptomEntry {
            relief_tips: &[
                "Sit or lie down immediately",
                "Drink water - dehydration can cause dizziness",
                "Avoid sudden movements",
                "Get fresh air",
                "Avoid bright lights",
            ],
            when_to_worry: &[
                "Severe dizziness with chest pain",
                "Fainting or loss of consciousness",
                "Dizziness with severe headache",
                "Numbness or weakness",
                "Dizziness persisting for several days",
            ],
            ..EMPTY
        },
    ),
];

// English and Afan Oromo phrasings mapped to canonical keys.
static ALIASES: &[(&str, &str)] = &[
    ("stomach ache", "stomach"),
    ("stomachache", "stomach"),
    ("belly", "stomach"),
    ("tummy", "stomach"),
    ("head", "headache"),
    ("migraine", "headache"),
    ("temperature", "fever"),
    ("vomit", "nausea"),
    ("throw up", "nausea"),
    ("dizziness", "dizzy"),
    ("vertigo", "dizzy"),
    ("garaa", "stomach"),
    ("dhukkuba garaa", "stomach"),
    ("mataa", "headache"),
    ("dhukkuba mataa", "headache"),
    ("ho'ina", "fever"),
    ("qufa'aa", "nausea"),
    ("qufaa", "cough"),
    ("zukaa", "cold"),
    ("ciniinsa", "pain"),
];

fn entry(key: &str) -> Option<(&'static str, &'static SymptomEntry)> {
    KNOWLEDGE_BASE
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(k, e)| (*k, e))
}

/// Resolve a free-text symptom phrase to a canonical knowledge-base entry
pub fn lookup(symptom: &str) -> Option<(&'static str, &'static SymptomEntry)> {
    let normalized = symptom.trim().to_lowercase();
    if normalized.is_empty() {
        return None;
    }

    entry(&normalized)
        .or_else(|| {
            KNOWLEDGE_BASE
                .iter()
                .find(|(key, _)| normalized.contains(key) || key.contains(normalized.as_str()))
                .map(|(k, e)| (*k, e))
        })
        .or_else(|| {
            ALIASES
                .iter()
                .find(|(alias, _)| normalized.contains(alias))
                .and_then(|(_, canonical)| entry(canonical))
        })
}

/// Advice rendered for transport; empty lists mean the entry has no data
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SymptomAdvice {
    #[serde(default)]
    pub common_causes: Vec<String>,
    #[serde(default)]
    pub relief_tips: Vec<String>,
    #[serde(default)]
    pub when_to_worry: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medication_timeline: Option<String>,
}

impl From<&SymptomEntry> for SymptomAdvice {
    fn from(entry: &SymptomEntry) -> Self {
        let owned = |items: &[&str]| items.iter().map(|s| s.to_string()).collect();
        Self {
            common_causes: owned(entry.common_causes),
            relief_tips: owned(entry.relief_tips),
            when_to_worry: owned(entry.when_to_worry),
            medication_timeline: entry.medication_timeline.map(str::to_string),
        }
    }
}

/// Success payload of `get_symptom_advice`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymptomReport {
    pub symptom: String,
    pub advice: SymptomAdvice,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medication_note: Option<String>,
}

/// Query used when the knowledge base has nothing for `symptom`
pub fn fallback_query(symptom: &str) -> String {
    format!("{} symptoms treatment medical advice", symptom)
}

fn advise(symptom: &str, medication: Option<&str>) -> std::result::Result<SymptomReport, ToolFailure> {
    let Some((key, entry)) = lookup(symptom) else {
        return Err(ToolFailure::not_found(format!(
            "I don't have specific guidance for '{}' in my database. Let me search the internet for information.",
            symptom
        ))
        .with_search_fallback(fallback_query(symptom)));
    };

    let medication_note = medication.map(|med| {
        format!(
            "You mentioned taking {}. {}",
            med,
            entry.medication_timeline.unwrap_or(DEFAULT_TIMELINE)
        )
    });

    Ok(SymptomReport {
        symptom: key.to_string(),
        advice: entry.into(),
        medication_note,
    })
}

/// `get_symptom_advice(symptom, medication_taken?)`
pub struct SymptomAdviceTool;

impl SymptomAdviceTool {
    fn parse_args(args: &Value) -> Result<(&str, Option<&str>)> {
        let symptom = required_str(SYMPTOM_ADVICE, args, "symptom")?;
        Ok((symptom, optional_str(args, "medication_taken")))
    }
}

#[async_trait]
impl ToolExecutor for SymptomAdviceTool {
    fn name(&self) -> &str {
        SYMPTOM_ADVICE
    }

    async fn execute(&self, args: Value) -> ToolResult {
        let (symptom, medication) = match Self::parse_args(&args) {
            Ok(parsed) => parsed,
            Err(err) => return ToolResult::failure(err.into()),
        };

        match advise(symptom, medication) {
            Ok(report) => ToolResult::success(report),
            Err(failure) => ToolResult::failure(failure),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::ToolErrorKind;
    use serde_json::json;

    #[test]
    fn test_exact_match() {
        let (key, entry) = lookup("Fever").unwrap();
        assert_eq!(key, "fever");
        assert_eq!(entry.relief_tips.len(), 4);
    }

    #[test]
    fn test_substring_match_in_sentence() {
        let (key, entry) = lookup("I have a headache").unwrap();
        assert_eq!(key, "headache");
        assert!(entry.common_causes.contains(&"tension"));
    }

    #[test]
    fn test_substring_follows_knowledge_base_order() {
        // both "stomach" and "pain" appear; stomach comes first
        assert_eq!(lookup("my stomach pain is bad").unwrap().0, "stomach");
    }

    #[test]
    fn test_alias_match() {
        assert_eq!(lookup("I feel vertigo").unwrap().0, "dizzy");
        assert_eq!(lookup("migraine").unwrap().0, "headache");
        assert_eq!(lookup("dhukkuba garaa qaba").unwrap().0, "stomach");
        assert_eq!(lookup("zukaa").unwrap().0, "cold");
    }

    #[test]
    fn test_miss_and_blank() {
        assert!(lookup("rash on my arm").is_none());
        assert!(lookup("   ").is_none());
    }

    #[tokio::test]
    async fn test_execute_success_with_medication_note() {
        let result = SymptomAdviceTool
            .execute(json!({"symptom": "headache", "medication_taken": "ibuprofen"}))
            .await;
        let report: SymptomReport = serde_json::from_value(result.data().unwrap().clone()).unwrap();
        assert_eq!(report.symptom, "headache");
        assert_eq!(
            report.medication_note.unwrap(),
            "You mentioned taking ibuprofen. Paracetamol/ibuprofen usually works within 30-60 minutes. If no relief after 4 hours, may need reassessment."
        );
    }

    #[tokio::test]
    async fn test_default_timeline_when_entry_has_none() {
        let result = SymptomAdviceTool
            .execute(json!({"symptom": "nausea", "medication_taken": "ginger"}))
            .await;
        let note = result.data().unwrap()["medication_note"].as_str().unwrap().to_string();
        assert!(note.ends_with(DEFAULT_TIMELINE));
    }

    #[tokio::test]
    async fn test_execute_miss_carries_search_directive() {
        let result = SymptomAdviceTool.execute(json!({"symptom": "rash"})).await;
        let failure = result.error().unwrap();
        assert_eq!(failure.kind, ToolErrorKind::NotFound);
        assert!(failure.message.contains("'rash'"));
        assert_eq!(
            failure.search_fallback.as_ref().unwrap().query,
            "rash symptoms treatment medical advice"
        );
    }

    #[tokio::test]
    async fn test_execute_missing_argument() {
        let result = SymptomAdviceTool.execute(json!({})).await;
        let failure = result.error().unwrap();
        assert_eq!(failure.kind, ToolErrorKind::InvalidArguments);
        assert!(!failure.use_internet_search());
    }
}
