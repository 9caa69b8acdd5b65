#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rust_2018_idioms,
    missing_docs
)]

//! Sherlock answer-selection engine: picks the story sentence that best answers a question.

/// Telemetry builder/hook for NLP components.
#[path = "../telemetry.rs"]
pub mod telemetry;

/// Error type shared by the engine.
#[path = "../error.rs"]
pub mod error;

/// Engine tuning loaded from TOML.
#[path = "../config.rs"]
pub mod config;

/// Linguistic data model and annotator access.
#[path = "../annotation/main.rs"]
pub mod annotation;

/// Stemming and stop-word collaborators.
#[path = "../lexicon/main.rs"]
pub mod lexicon;

/// Sentence scoring, heuristics and selection.
#[path = "../comprehension/main.rs"]
pub mod comprehension;

/// Answer extraction, rendering and the per-run answer key.
#[path = "../answer.rs"]
pub mod answer;

/// Story, question and manifest files.
#[path = "../dataset/main.rs"]
pub mod dataset;

/// Word-overlap scoring against gold answers.
#[path = "../evaluation.rs"]
pub mod evaluation;

/// Engine entry point answering every question of a story.
#[path = "../main.rs"]
pub mod runtime;

pub use annotation::{Annotator, CoreNlpClient, CorefChain, Document, Mention, Sentence, Token};
pub use answer::{extract, reconstruct, AnswerKey, AnswerReport};
pub use comprehension::{
    BatchAnswerController, BagScorer, Heuristics, QuestionType, Selection, SentenceSelector,
    StoryOutcome,
};
pub use config::EngineConfig;
pub use dataset::{Difficulty, Manifest, Question, Story, StoryLoader};
pub use error::QaError;
pub use evaluation::{Evaluation, OverlapScore};
pub use lexicon::{LemmaStemmer, Stemmer, StopWords, SuffixStemmer};
pub use runtime::Sherlock;
pub use telemetry::{NlpTelemetry, NlpTelemetryBuilder};
