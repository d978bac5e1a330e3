//! Input sanitization for learner-supplied text.
//!
//! Sanitizing happens before validation: control characters are stripped
//! and lengths are capped so oversized bodies never reach the logs or the
//! upstream query strings. Semantic limits (topic length and so on) are
//! enforced afterwards by the preferences validator.

use std::sync::LazyLock;

use regex::Regex;
use tracing::warn;

use learnpath_models::LearningPreferences;

/// Hard cap on any free-text field before validation.
pub const MAX_INPUT_LENGTH: usize = 5000;

/// Hard cap on the language code.
pub const MAX_LANGUAGE_LENGTH: usize = 16;

/// BCP 47-ish language tag, e.g. `en`, `pt-BR`, `zh_Hant`.
static LANGUAGE_CODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z]{2,3}([-_][A-Za-z0-9]{2,8})*$").expect("valid language regex")
});

/// Strip control characters, folding newlines and tabs into spaces, and cap
/// the length in characters.
pub fn sanitize_text(input: &str, max_chars: usize) -> String {
    input
        .chars()
        .filter_map(|c| match c {
            '\n' | '\r' | '\t' => Some(' '),
            c if c.is_control() => None,
            c => Some(c),
        })
        .take(max_chars)
        .collect::<String>()
        .trim()
        .to_string()
}

/// Check a language code.
pub fn is_valid_language(code: &str) -> bool {
    code.len() <= MAX_LANGUAGE_LENGTH && LANGUAGE_CODE.is_match(code)
}

/// Sanitize learner preferences in place of the raw request body.
pub fn sanitize_preferences(mut preferences: LearningPreferences) -> Result<LearningPreferences, String> {
    preferences.topic = sanitize_text(&preferences.topic, MAX_INPUT_LENGTH);
    preferences.intent = preferences
        .intent
        .map(|intent| sanitize_text(&intent, MAX_INPUT_LENGTH))
        .filter(|intent| !intent.is_empty());

    let language = preferences.language.trim();
    if !is_valid_language(language) {
        warn!(language = %language.chars().take(MAX_LANGUAGE_LENGTH).collect::<String>(), "Rejected language code");
        return Err("Invalid language code".to_string());
    }
    preferences.language = language.to_string();

    Ok(preferences)
}
