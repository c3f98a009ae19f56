//! Fixed user-facing strings and error-prefix detection

/// Prefixes that mark a reply as a failure; such replies are never cached
pub const ERROR_PREFIXES: &[&str] = &["⚠", "❌", "⏰", "🔌", "Error", "API Error"];

const FALLBACK_EN: &str = "❌ Sorry, I couldn't generate a response right now. Please try again in a moment.";
const FALLBACK_AM: &str = "❌ ይቅርታ፣ በአሁኑ ሰዓት መልስ ማሰራጨት አልተቻለም። እባክዎ ቆይተው እንደገና ይሞክሩ።";
const FALLBACK_OM: &str = "❌ Dhiifama, odeeffannoo kennuu hin dandeenye. Yeroo booda irra deebi'ii yaali.";

/// Apology returned when generation fails or produces nothing
///
/// Unknown language codes get the English string.
pub fn fallback_response(language: &str) -> &'static str {
    match language.trim().to_lowercase().as_str() {
        "am" => FALLBACK_AM,
        "om" => FALLBACK_OM,
        _ => FALLBACK_EN,
    }
}

/// Whether `response` starts with a recognized error or fallback prefix
pub fn is_error_response(response: &str) -> bool {
    let trimmed = response.trim_start();
    ERROR_PREFIXES.iter().any(|prefix| trimmed.starts_with(prefix))
}
