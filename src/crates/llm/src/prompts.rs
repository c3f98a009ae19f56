//! Prompt templates for medical synthesis.

/// Prompt asking the backend to answer from tool-gathered context.
///
/// Source-citation instructions are only included when the context carries
/// attributed sources (`Source:` lines from web search).
pub fn medical_context_prompt(context: &str, question: &str, language: &str) -> String {
    let mut prompt = format!(
        "Medical Context Information:\n{context}\n\n\
         User's Question: {question}\n\n\
         Please provide a helpful, natural response in {language} that:\n\
         1. Uses the medical information above as reference\n\
         2. Is empathetic, helpful and informative\n\
         3. Provides practical advice when appropriate\n\
         4. Suggests professional medical care for serious concerns\n\
         5. Does not refuse to help or provide information\n\
         6. Speaks in a warm, caring tone\n"
    );

    if context.contains("Source:") {
        prompt.push_str(
            "7. IMPORTANT: Include ALL source URLs from the Medical Context Information above\n\
             8. Format sources clearly at the end like: 'Sources: [URL1], [URL2]'\n",
        );
    }

    prompt.push_str(
        "\nRemember: You are a medical assistant providing helpful information, not refusing help.",
    );
    prompt
}

/// Prompt used for medical questions no tool could cover.
pub fn guided_prompt(question: &str, language: &str) -> String {
    format!(
        "User is asking about medical concerns: {question}\n\n\
         Please provide helpful medical guidance in {language} that:\n\
         - Offers practical, evidence-based information\n\
         - Suggests when to see a doctor for proper diagnosis\n\
         - Provides general health information\n\
         - Is empathetic and does not refuse to help\n\
         - Encourages professional care for serious symptoms\n\n\
         Speak as a helpful medical assistant, not as someone who refuses to provide information."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_prompt_without_sources() {
        let prompt = medical_context_prompt("Rest well.", "I have a cold", "en");
        assert!(prompt.starts_with("Medical Context Information:\nRest well.\n\nUser's Question: I have a cold"));
        assert!(prompt.contains("natural response in en that:"));
        assert!(prompt.contains("6. Speaks in a warm, caring tone"));
        assert!(!prompt.contains("source URLs"));
        assert!(prompt.ends_with("not refusing help."));
    }

    #[test]
    fn test_context_prompt_with_sources() {
        let context = "**WHO**\nSource: https://who.int\nDetails: ...";
        let prompt = medical_context_prompt(context, "Marburg?", "am");
        assert!(prompt.contains("7. IMPORTANT: Include ALL source URLs"));
        assert!(prompt.contains("'Sources: [URL1], [URL2]'"));
    }

    #[test]
    fn test_guided_prompt() {
        let prompt = guided_prompt("what is lupus", "om");
        assert!(prompt.starts_with("User is asking about medical concerns: what is lupus"));
        assert!(prompt.contains("medical guidance in om that:"));
    }
}
