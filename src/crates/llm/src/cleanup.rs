//! Post-processing of backend replies.

use regex::Regex;
use std::sync::OnceLock;

struct Patterns {
    think: Regex,
    bold: Regex,
    italic: Regex,
    blank_lines: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        think: Regex::new(r"(?s)<think>.*?</think>").expect("valid think pattern"),
        bold: Regex::new(r"\*\*(.*?)\*\*").expect("valid bold pattern"),
        italic: Regex::new(r"\*(.*?)\*").expect("valid italic pattern"),
        blank_lines: Regex::new(r"\n\s*\n").expect("valid blank line pattern"),
    })
}

/// Strip reasoning blocks and emphasis markers, collapse blank lines, cap length.
///
/// Text longer than `max_chars` characters is cut and suffixed with "...".
pub fn clean_response(text: &str, max_chars: usize) -> String {
    if text.is_empty() {
        return String::new();
    }

    let p = patterns();
    let text = p.think.replace_all(text, "");
    let text = p.bold.replace_all(&text, "$1");
    let text = p.italic.replace_all(&text, "$1");
    let text = p.blank_lines.replace_all(&text, "\n\n");
    let text = text.trim();

    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_removes_think_blocks_across_lines() {
        let raw = "<think>\nplanning the answer\n</think>Drink water.";
        assert_eq!(clean_response(raw, 4000), "Drink water.");
    }

    #[test]
    fn test_strips_emphasis() {
        assert_eq!(
            clean_response("**Rest** and *hydrate* well", 4000),
            "Rest and hydrate well"
        );
    }

    #[test]
    fn test_collapses_blank_lines() {
        assert_eq!(clean_response("a\n\n\n   \nb", 4000), "a\n\nb");
    }

    #[test]
    fn test_truncates_on_char_boundary() {
        let amharic = "ሰላም".repeat(10);
        let cleaned = clean_response(&amharic, 5);
        assert_eq!(cleaned, format!("{}...", amharic.chars().take(5).collect::<String>()));
    }

    #[test]
    fn test_empty_and_whitespace() {
        assert_eq!(clean_response("", 10), "");
        assert_eq!(clean_response("  \n ", 10), "");
    }
}
