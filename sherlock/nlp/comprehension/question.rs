use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{annotation::Token, error::QaError};

/// Interrogative category of a question.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    /// Asks for a person or organization.
    Who,
    /// Asks for a place.
    Where,
    /// Asks for a date or time.
    When,
    /// Asks for a thing or a name.
    What,
    /// Asks for a reason.
    Why,
    /// Asks for a manner or a quantity.
    How,
    /// No interrogative word; carries the question's first word.
    Other(String),
}

impl QuestionType {
    /// Classifies a question from its tokens: the first interrogative word wins, otherwise the
    /// first token's surface form.
    ///
    /// # Errors
    ///
    /// Returns [`QaError::InvalidQuestion`] for an empty token list.
    pub fn classify(tokens: &[Token]) -> Result<Self, QaError> {
        let first = tokens
            .first()
            .ok_or_else(|| QaError::InvalidQuestion(String::new()))?;
        Ok(tokens
            .iter()
            .find_map(|token| Self::from_word(&token.word))
            .unwrap_or_else(|| Self::Other(first.word.clone())))
    }

    /// Maps an interrogative word (any case) to its type.
    #[must_use]
    pub fn from_word(word: &str) -> Option<Self> {
        match word.to_lowercase().as_str() {
            "who" => Some(Self::Who),
            "where" => Some(Self::Where),
            "when" => Some(Self::When),
            "what" => Some(Self::What),
            "why" => Some(Self::Why),
            "how" => Some(Self::How),
            _ => None,
        }
    }

    /// Entity tags an answer to this question is expected to carry.
    #[must_use]
    pub fn answer_entities(&self) -> Option<&'static [&'static str]> {
        match self {
            Self::Who => Some(&["PERSON", "ORGANIZATION"]),
            Self::Where => Some(&["LOCATION", "ORGANIZATION"]),
            Self::When => Some(&["DATE", "TIME"]),
            Self::How => Some(&["MONEY", "PERCENT"]),
            Self::What | Self::Why | Self::Other(_) => None,
        }
    }

    /// Returns human-readable label.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Who => "who",
            Self::Where => "where",
            Self::When => "when",
            Self::What => "what",
            Self::Why => "why",
            Self::How => "how",
            Self::Other(word) => word,
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
