use crate::{annotation::Token, config::StemmerKind};

/// Maps a word to the form used for bag-of-words comparison.
pub trait Stemmer: Send + Sync {
    /// Stems a bare word (used for rule phrases, which carry no annotation).
    fn stem_word(&self, word: &str) -> String;

    /// Stems an annotated token.
    fn stem_token(&self, token: &Token) -> String {
        self.stem_word(&token.word)
    }
}

/// Builds the stemmer named in the configuration.
#[must_use]
pub fn from_kind(kind: StemmerKind) -> Box<dyn Stemmer> {
    match kind {
        StemmerKind::Lemma => Box::new(LemmaStemmer),
        StemmerKind::Suffix => Box::new(SuffixStemmer),
    }
}

const MIN_STEM: usize = 3;

/// Lower-cases and strips common English inflections.
#[derive(Debug, Clone, Copy, Default)]
pub struct SuffixStemmer;

impl Stemmer for SuffixStemmer {
    fn stem_word(&self, word: &str) -> String {
        let lower = word.to_lowercase();
        if !lower.is_ascii() || lower.len() <= MIN_STEM {
            return lower;
        }
        if let Some(base) = lower.strip_suffix("ies") {
            if base.len() >= MIN_STEM - 1 {
                return format!("{base}y");
            }
        }
        if lower.ends_with("sses") {
            return lower[..lower.len() - 2].to_string();
        }
        for suffix in ["ing", "ed"] {
            if let Some(base) = lower.strip_suffix(suffix) {
                if base.len() >= MIN_STEM && base.chars().any(is_vowel) {
                    return undouble(base);
                }
            }
        }
        if lower.ends_with('s') && !lower.ends_with("ss") && !lower.ends_with("us") && !lower.ends_with("is") {
            return lower[..lower.len() - 1].to_string();
        }
        lower
    }
}

/// Prefers the annotator's lemma and falls back to [`SuffixStemmer`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LemmaStemmer;

impl Stemmer for LemmaStemmer {
    fn stem_word(&self, word: &str) -> String {
        SuffixStemmer.stem_word(word)
    }

    fn stem_token(&self, token: &Token) -> String {
        if token.lemma.is_empty() {
            self.stem_word(&token.word)
        } else {
            token.lemma.to_lowercase()
        }
    }
}

const fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y')
}

// "running" -> "runn" -> "run"; keeps "ll", "ss", "zz" which usually belong to the root.
fn undouble(base: &str) -> String {
    let bytes = base.as_bytes();
    let n = bytes.len();
    if n > MIN_STEM
        && bytes[n - 1] == bytes[n - 2]
        && !matches!(bytes[n - 1], b'l' | b's' | b'z')
        && !is_vowel(char::from(bytes[n - 1]))
    {
        base[..n - 1].to_string()
    } else {
        base.to_string()
    }
}
