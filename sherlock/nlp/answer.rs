use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{annotation::Token, comprehension::QuestionType, error::QaError};

/// Narrows the winning sentence to the tokens whose entity tag fits the question type.
///
/// Falls back to the whole sentence when the type has no entity filter or nothing matches.
#[must_use]
pub fn extract<'a>(question_type: &QuestionType, sentence: &'a [Token]) -> Vec<&'a Token> {
    if let Some(tags) = question_type.answer_entities() {
        let picked: Vec<&Token> = sentence
            .iter()
            .filter(|token| token.has_entity(tags))
            .collect();
        if !picked.is_empty() {
            return picked;
        }
    }
    sentence.iter().collect()
}

/// Rebuilds source text from tokens: the first token's leading whitespace, then each token's
/// original text followed by its trailing whitespace.
///
/// # Errors
///
/// Returns [`QaError::EmptyAnswer`] for an empty token list.
pub fn reconstruct(tokens: &[&Token]) -> Result<String, QaError> {
    let first = tokens.first().ok_or(QaError::EmptyAnswer)?;
    let mut text = first.before.clone();
    for token in tokens {
        text.push_str(&token.original_text);
        text.push_str(&token.after);
    }
    Ok(text)
}

/// Answers produced in one run, keyed by question id in answering order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerKey {
    answers: IndexMap<String, String>,
}

impl AnswerKey {
    /// Creates an empty key.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores an answer; a question id can be answered only once.
    ///
    /// # Errors
    ///
    /// Returns [`QaError::DuplicateAnswer`] when the id is already present.
    pub fn record(
        &mut self,
        question_id: impl Into<String>,
        answer: impl Into<String>,
    ) -> Result<(), QaError> {
        let question_id = question_id.into();
        if self.answers.contains_key(&question_id) {
            return Err(QaError::DuplicateAnswer(question_id));
        }
        self.answers.insert(question_id, answer.into());
        Ok(())
    }

    /// Moves every answer of `other` into this key.
    ///
    /// # Errors
    ///
    /// Returns [`QaError::DuplicateAnswer`] on the first id present in both keys.
    pub fn merge(&mut self, other: Self) -> Result<(), QaError> {
        for (question_id, answer) in other.answers {
            self.record(question_id, answer)?;
        }
        Ok(())
    }

    /// Answer recorded for `question_id`.
    #[must_use]
    pub fn get(&self, question_id: &str) -> Option<&str> {
        self.answers.get(question_id).map(String::as_str)
    }

    /// Iterates `(question_id, answer)` pairs in recording order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.answers
            .iter()
            .map(|(id, answer)| (id.as_str(), answer.as_str()))
    }

    /// Number of answered questions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.answers.len()
    }

    /// True when nothing was answered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }
}

/// Plain-text answer file: `QuestionID:` and `Answer:` lines followed by a blank line.
#[derive(Debug, Clone, Copy)]
pub struct AnswerReport<'a> {
    key: &'a AnswerKey,
}

impl<'a> AnswerReport<'a> {
    /// Wraps a key for rendering.
    #[must_use]
    pub const fn new(key: &'a AnswerKey) -> Self {
        Self { key }
    }
}

impl fmt::Display for AnswerReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (question_id, answer) in self.key.iter() {
            writeln!(f, "QuestionID: {question_id}")?;
            writeln!(f, "Answer: {answer}")?;
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::fixtures::DocumentBuilder;

    fn liverpool() -> Vec<Token> {
        DocumentBuilder::new()
            .sentence(&[
                ("The", "DT", "O"),
                ("club", "NN", "O"),
                ("is", "VBZ", "O"),
                ("in", "IN", "O"),
                ("Liverpool", "NNP", "LOCATION"),
                (",", ",", "LOCATION"),
                ("Nova", "NNP", "LOCATION"),
                ("Scotia", "NNP", "LOCATION"),
                (".", ".", "O"),
            ])
            .build()
            .sentences
            .remove(0)
            .tokens
    }

    #[test]
    fn where_filter_keeps_location_tokens() {
        let sentence = liverpool();
        let picked = extract(&QuestionType::Where, &sentence);
        let words: Vec<&str> = picked.iter().map(|token| token.word.as_str()).collect();
        assert_eq!(words, vec!["Liverpool", ",", "Nova", "Scotia"]);
        assert_eq!(reconstruct(&picked).unwrap(), " Liverpool, Nova Scotia");
    }

    #[test]
    fn reconstructing_a_whole_sentence_restores_its_text() {
        let sentence = liverpool();
        let all: Vec<&Token> = sentence.iter().collect();
        assert_eq!(
            reconstruct(&all).unwrap(),
            "The club is in Liverpool, Nova Scotia."
        );
    }

    #[test]
    fn unmatched_filter_falls_back_to_sentence() {
        let sentence = DocumentBuilder::new()
            .words("The boats left early")
            .build()
            .sentences
            .remove(0)
            .tokens;
        assert_eq!(extract(&QuestionType::Who, &sentence).len(), 4);
        assert_eq!(extract(&QuestionType::Why, &sentence).len(), 4);
    }

    #[test]
    fn where_without_location_returns_sentence_verbatim() {
        let sentence = DocumentBuilder::new()
            .sentence(&[
                ("Mayor", "NNP", "O"),
                ("Dumont", "NNP", "PERSON"),
                ("spoke", "VBD", "O"),
                ("yesterday", "NN", "O"),
                (".", ".", "O"),
            ])
            .build()
            .sentences
            .remove(0)
            .tokens;
        let picked = extract(&QuestionType::Where, &sentence);
        assert_eq!(picked.len(), sentence.len());
        assert!(picked
            .iter()
            .zip(&sentence)
            .all(|(picked, original)| std::ptr::eq(*picked, original)));
        assert_eq!(reconstruct(&picked).unwrap(), "Mayor Dumont spoke yesterday.");
    }

    #[test]
    fn empty_token_list_cannot_be_rebuilt() {
        assert!(matches!(reconstruct(&[]), Err(QaError::EmptyAnswer)));
    }

    #[test]
    fn key_rejects_duplicates_and_renders_in_order() {
        let mut key = AnswerKey::new();
        key.record("1999-W02-5-Q2", "Liverpool, Nova Scotia").unwrap();
        key.record("1999-W02-5-Q1", "a yacht club").unwrap();
        assert!(matches!(
            key.record("1999-W02-5-Q1", "again"),
            Err(QaError::DuplicateAnswer(id)) if id == "1999-W02-5-Q1"
        ));
        assert_eq!(key.get("1999-W02-5-Q1"), Some("a yacht club"));
        assert_eq!(
            AnswerReport::new(&key).to_string(),
            "QuestionID: 1999-W02-5-Q2\nAnswer: Liverpool, Nova Scotia\n\n\
             QuestionID: 1999-W02-5-Q1\nAnswer: a yacht club\n\n"
        );
    }
}
