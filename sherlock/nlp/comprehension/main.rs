//! Sentence scoring, question-type heuristics and best-sentence selection.

/// Async controller answering whole stories in parallel.
pub mod advanced;
/// Bag-of-words overlap scoring.
pub mod algo;
/// Coreference expansion of sentence token streams.
pub mod coref;
/// Text normalization and phrase matching.
pub mod helper;
/// Rule table awarding bonus points per question type.
pub mod heuristics;
/// Interrogative classification.
pub mod question;
/// Best-sentence search.
pub mod selector;

pub use advanced::{BatchAnswerController, StoryOutcome};
pub use algo::{BagScorer, Overlap};
pub use coref::expand;
pub use heuristics::{Bonus, Heuristics, Rule, Tier};
pub use question::QuestionType;
pub use selector::{Selection, SentenceScore, SentenceSelector};
