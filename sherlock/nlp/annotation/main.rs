//! Linguistic data model filled in by an external annotator.

/// Annotator trait and the CoreNLP server client.
pub mod annotator;
/// CoreNLP JSON decoding.
pub mod corenlp;
/// Tokens, sentences, documents and coreference chains.
pub mod model;

#[cfg(test)]
pub(crate) mod fixtures;

pub use annotator::{Annotator, CoreNlpClient};
pub use model::{CorefChain, Document, Mention, Sentence, Token, VERB_TAGS};
