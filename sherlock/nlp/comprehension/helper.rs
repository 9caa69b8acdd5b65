use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));
static WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[[:alnum:]]+").expect("valid regex"));

/// Normalizes whitespace and lowercases content.
#[must_use]
pub fn normalize(text: &str) -> String {
    WHITESPACE
        .replace_all(text.trim(), " ")
        .to_lowercase()
}

/// Lower-cased alphanumeric words of `text`, punctuation dropped.
#[must_use]
pub fn content_words(text: &str) -> Vec<String> {
    WORD.find_iter(&normalize(text))
        .map(|word| word.as_str().to_string())
        .collect()
}

/// Returns true when `phrase` occurs as a contiguous run inside `stream`.
#[must_use]
pub fn contains_phrase<S: AsRef<str>>(stream: &[S], phrase: &[S]) -> bool {
    if phrase.is_empty() || phrase.len() > stream.len() {
        return false;
    }
    stream.windows(phrase.len()).any(|window| {
        window
            .iter()
            .zip(phrase)
            .all(|(left, right)| left.as_ref() == right.as_ref())
    })
}
