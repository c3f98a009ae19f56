//! Keyword-based intent classification
//!
//! Each category owns a fixed multilingual keyword list (English, Amharic,
//! Afan Oromo). A category's score is the number of its keywords that occur
//! as substrings of the lowercased text. Classification is total: empty text
//! scores zero everywhere.

use serde::{Deserialize, Serialize};
use std::fmt;

const SYMPTOM_KEYWORDS: &[&str] = &[
    // physical
    "hurt", "pain", "ache", "fever", "cough", "headache", "stomach", "nausea",
    "dizzy", "vomit", "throw up", "temperature", "sore", "burning", "itching",
    "rash", "swelling", "bleeding", "infection", "inflamation", "cold", "flu",
    // mental health
    "anxiety", "depression", "stress", "worry", "nervous", "panic", "mood",
    "attention", "focus", "concentration", "adhd", "add", "ocd", "bipolar",
    "sleep", "insomnia", "tired", "fatigue", "energy",
    // amharic
    "የሆድ", "ራስ", "ህመም", "ትኩሳት", "ሳል", "መቅማት", "ማዞር", "ጉንፋን", "መጉንፈን",
    "መደንገግ", "መራመድ", "ማቃጠል", "ማቅማት", "ማድነግ", "ማድረቅ",
    // oromo
    "dhukkuba", "hooina", "dhadachiisa", "dhiifama", "gammadaa", "rifachuu",
];

const DRUG_KEYWORDS: &[&str] = &[
    "medicine", "pill", "tablet", "drug", "medication", "aspirin", "paracetamol",
    "ibuprofen", "antibiotic", "prescription", "dose", "treatment", "መድሀኒት",
    "ፅድት", "ዶክተር", "ህክምና", "dhangalaa", "dhangalaaa", "tijaajila",
];

const DIAGNOSIS_KEYWORDS: &[&str] = &[
    "diagnose", "what is", "what are", "symptom of", "cause of", "why do i",
    "do i have", "am i sick", "is this", "could this be", "test for", "signs of",
    "ምንድን", "ለምን", "የትኛው", "እንዴት", "maali", "maal", "maqaa", "sababaa",
];

const TREATMENT_KEYWORDS: &[&str] = &[
    "treat", "cure", "help", "remedy", "what should i do", "how to", "way to",
    "solution", "fix", "relief", "get better", "prevent", "avoid", "stop",
    "መፍትሔ", "ማከም", "አማራጭ", "መንገድ", "faayidaa", "tajaajila", "naaf", "maaltu",
];

const CURRENT_EVENT_KEYWORDS: &[&str] = &[
    // outbreaks
    "outbreak", "epidemic", "pandemic", "marburg", "ebola", "virus", "variant",
    "covid", "corona", "monkeypox", "mpox", "zika", "dengue", "cholera",
    // news
    "latest", "recent", "breaking", "news", "update", "current", "today",
    "this week", "this month", "new cases", "spreading", "spread",
    // official sources
    "who", "cdc", "health ministry", "world health",
    // places
    "ethiopia", "africa", "region", "country", "city",
    // amharic
    "ወረርሽኝ", "በሽታ", "ቫይረስ", "አዲስ", "ዜና", "መረጃ", "ወቅታዊ",
    // oromo
    "dhibee", "oduu", "haaraa", "ammaa",
];

/// Topical bucket used to decide whether and which tools to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentCategory {
    Symptoms,
    Drugs,
    Diagnosis,
    Treatment,
    CurrentEvents,
}

impl IntentCategory {
    pub const ALL: [IntentCategory; 5] = [
        IntentCategory::Symptoms,
        IntentCategory::Drugs,
        IntentCategory::Diagnosis,
        IntentCategory::Treatment,
        IntentCategory::CurrentEvents,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IntentCategory::Symptoms => "symptoms",
            IntentCategory::Drugs => "drugs",
            IntentCategory::Diagnosis => "diagnosis",
            IntentCategory::Treatment => "treatment",
            IntentCategory::CurrentEvents => "current_events",
        }
    }

    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            IntentCategory::Symptoms => SYMPTOM_KEYWORDS,
            IntentCategory::Drugs => DRUG_KEYWORDS,
            IntentCategory::Diagnosis => DIAGNOSIS_KEYWORDS,
            IntentCategory::Treatment => TREATMENT_KEYWORDS,
            IntentCategory::CurrentEvents => CURRENT_EVENT_KEYWORDS,
        }
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for IntentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Keyword hit counts for the five categories
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IntentScore {
    counts: [u32; 5],
}

impl IntentScore {
    pub fn get(&self, category: IntentCategory) -> u32 {
        self.counts[category.index()]
    }

    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }

    /// Medical requests have at least one keyword hit in any category
    pub fn is_medical(&self) -> bool {
        self.total() > 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (IntentCategory, u32)> + '_ {
        IntentCategory::ALL.iter().map(move |c| (*c, self.get(*c)))
    }

    #[cfg(test)]
    pub(crate) fn with(mut self, category: IntentCategory, count: u32) -> Self {
        self.counts[category.index()] = count;
        self
    }
}

impl Serialize for IntentScore {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(IntentCategory::ALL.len()))?;
        for (category, count) in self.iter() {
            map.serialize_entry(category.as_str(), &count)?;
        }
        map.end()
    }
}

/// Stateless keyword classifier
#[derive(Debug, Clone, Copy, Default)]
pub struct IntentClassifier;

impl IntentClassifier {
    pub fn new() -> Self {
        Self
    }

    pub fn classify(&self, text: &str) -> IntentScore {
        let lowered = text.trim().to_lowercase();
        let mut score = IntentScore::default();
        if lowered.is_empty() {
            return score;
        }

        for category in IntentCategory::ALL {
            score.counts[category.index()] = category
                .keywords()
                .iter()
                .filter(|keyword| lowered.contains(*keyword))
                .count() as u32;
        }
        score
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_headache_scores_symptoms_only() {
        let score = IntentClassifier::new().classify("I have a headache");
        // "ache" and "headache"
        assert_eq!(score.get(IntentCategory::Symptoms), 2);
        assert_eq!(score.get(IntentCategory::CurrentEvents), 0);
        assert!(score.is_medical());
    }

    #[test]
    fn test_outbreak_scores_current_events() {
        let score = IntentClassifier::new().classify("latest Marburg virus outbreak Ethiopia");
        assert_eq!(score.get(IntentCategory::CurrentEvents), 5);
    }

    #[test]
    fn test_general_chat_is_not_medical() {
        let score = IntentClassifier::new().classify("Hello, how are you?");
        assert_eq!(score.total(), 0);
        assert!(!score.is_medical());
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(IntentClassifier::new().classify("   ").total(), 0);
    }

    #[test]
    fn test_multilingual_keywords() {
        let classifier = IntentClassifier::new();
        assert!(classifier.classify("ራስ ህመም አለኝ").get(IntentCategory::Symptoms) >= 2);
        assert!(classifier.classify("dhukkuba qaba").get(IntentCategory::Symptoms) >= 1);
        assert!(classifier.classify("ዶክተር").get(IntentCategory::Drugs) >= 1);
    }

    #[test]
    fn test_each_keyword_counts_once() {
        let score = IntentClassifier::new().classify("pain pain pain");
        assert_eq!(score.get(IntentCategory::Symptoms), 1);
    }

    #[test]
    fn test_serializes_as_category_map() {
        let score = IntentClassifier::new().classify("aspirin dose");
        let value = serde_json::to_value(score).unwrap();
        assert_eq!(value["drugs"], 2);
        assert_eq!(value.as_object().unwrap().len(), 5);
    }

    fn vocabulary() -> impl Strategy<Value = Vec<String>> {
        let words = prop::sample::select(vec![
            "pain", "aspirin", "diagnose", "remedy", "ebola", "ራስ", "dhukkuba", "hello",
            "table", "walk", "morning", "news", "sleep", "fix", "maal", "water",
        ]);
        prop::collection::vec(words.prop_map(str::to_string), 0..12)
    }

    proptest! {
        #[test]
        fn prop_five_categories_total_matches(text in ".{0,80}") {
            let score = IntentClassifier::new().classify(&text);
            let listed: Vec<_> = score.iter().collect();
            prop_assert_eq!(listed.len(), 5);
            prop_assert_eq!(listed.iter().map(|(_, n)| *n).sum::<u32>(), score.total());
        }

        #[test]
        fn prop_word_order_does_not_matter(words in vocabulary(), seed in any::<u64>()) {
            let mut shuffled = words.clone();
            // deterministic rotation stands in for a shuffle
            if !shuffled.is_empty() {
                let k = (seed as usize) % shuffled.len();
                shuffled.rotate_left(k);
                shuffled.reverse();
            }
            let classifier = IntentClassifier::new();
            let a = classifier.classify(&words.join(" | "));
            let b = classifier.classify(&shuffled.join(" | "));
            prop_assert_eq!(a, b);
        }
    }
}
