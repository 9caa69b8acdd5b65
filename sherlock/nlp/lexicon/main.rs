//! Stemming and stop-word collaborators used when bagging tokens.

/// Stemmer trait and implementations.
pub mod stemmer;
/// Stop-word set.
pub mod stopwords;

pub use stemmer::{from_kind, LemmaStemmer, Stemmer, SuffixStemmer};
pub use stopwords::StopWords;
