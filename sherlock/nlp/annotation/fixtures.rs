use std::collections::HashMap;

use super::{
    annotator::Annotator,
    model::{CorefChain, Document, Mention, Sentence, Token},
};
use crate::error::QaError;

const CLOSING_PUNCTUATION: [&str; 7] = [",", ".", "?", "!", ";", ":", "'s"];

/// Hand-built documents for unit tests. Tokens are separated by one space except before
/// closing punctuation, and the last token of each sentence carries no trailing space.
#[derive(Debug, Default)]
pub struct DocumentBuilder {
    sentences: Vec<Sentence>,
    chains: Vec<CorefChain>,
}

impl DocumentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a sentence of `(word, pos, ner)` triples.
    pub fn sentence(mut self, tokens: &[(&str, &str, &str)]) -> Self {
        let leading = if self.sentences.is_empty() { "" } else { " " };
        self.sentences.push(sentence(tokens, leading));
        self
    }

    /// Appends a sentence of plain words tagged `NN`/`O`.
    pub fn words(self, text: &str) -> Self {
        let triples: Vec<(&str, &str, &str)> =
            text.split_whitespace().map(|word| (word, "NN", "O")).collect();
        self.sentence(&triples)
    }

    pub fn chain(mut self, representative: Mention, mentions: &[Mention]) -> Self {
        self.chains.push(CorefChain {
            representative,
            mentions: mentions.to_vec(),
        });
        self
    }

    pub fn build(self) -> Document {
        Document {
            sentences: self.sentences,
            chains: self.chains,
        }
    }
}

pub fn token(word: &str, pos: &str, ner: &str) -> Token {
    Token {
        word: word.into(),
        original_text: word.into(),
        before: String::new(),
        after: String::new(),
        pos: pos.into(),
        ner: ner.into(),
        lemma: String::new(),
    }
}

fn sentence(triples: &[(&str, &str, &str)], leading: &str) -> Sentence {
    let mut tokens: Vec<Token> = triples
        .iter()
        .map(|(word, pos, ner)| token(word, pos, ner))
        .collect();
    let count = tokens.len();
    for index in 0..count {
        let next_closes = triples
            .get(index + 1)
            .is_some_and(|(word, _, _)| CLOSING_PUNCTUATION.contains(word));
        let spacing = if index + 1 == count || next_closes {
            ""
        } else {
            " "
        };
        tokens[index].after = spacing.into();
        tokens[index].before = if index == 0 {
            leading.into()
        } else {
            tokens[index - 1].after.clone()
        };
    }
    Sentence { tokens }
}

/// Question annotated as a single sentence of plain words.
pub fn question(text: &str) -> Vec<Token> {
    DocumentBuilder::new()
        .words(text)
        .build()
        .sentences
        .remove(0)
        .tokens
}

/// Annotator answering from canned documents keyed by the exact input text.
#[derive(Debug, Default)]
pub struct FakeAnnotator {
    documents: HashMap<String, Document>,
}

impl FakeAnnotator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, text: &str, document: Document) -> Self {
        self.documents.insert(text.to_string(), document);
        self
    }
}

impl Annotator for FakeAnnotator {
    fn annotate(&self, text: &str) -> Result<Document, QaError> {
        self.documents
            .get(text)
            .cloned()
            .ok_or_else(|| QaError::Annotator(format!("no annotation for {text:?}")))
    }
}
