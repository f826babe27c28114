//! "Did you mean" hints built from the module keyword table.

use super::modules::MODULE_KEYWORDS;
use super::normalize::normalize;

const MAX_SUGGESTIONS: usize = 3;
const SHORT_INPUT_HINT: &str = "Try asking me to 'show dashboard' or 'create new lead'";

/// Suggest module keywords that overlap the words of `message`.
///
/// A keyword is suggested when it contains a word or a word contains it.
/// Messages shorter than three UTF-16 code units also get a usage hint. At most
/// three suggestions are returned, in keyword-table order per word.
pub fn suggest_corrections(message: &str) -> Vec<String> {
    let normalized = normalize(message);
    // An empty message still yields one empty word, which every keyword contains.
    let words: Vec<&str> = if normalized.is_empty() {
        vec![""]
    } else {
        normalized.split_whitespace().collect()
    };

    let mut suggestions: Vec<String> = words
        .iter()
        .flat_map(|word| {
            MODULE_KEYWORDS
                .iter()
                .filter(move |(key, _)| key.contains(word) || word.contains(key))
                .map(|(key, _)| format!("Did you mean \"{}\"?", key))
        })
        .take(MAX_SUGGESTIONS)
        .collect();

    // Length in UTF-16 code units, as the chat frontend measures it.
    if message.encode_utf16().count() < 3 {
        suggestions.push(SHORT_INPUT_HINT.to_string());
    }

    suggestions.truncate(MAX_SUGGESTIONS);
    suggestions
}
