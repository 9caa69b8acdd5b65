use std::sync::Arc;

use anyhow::Result;
use serde_json::{json, Value};
use shared_logging::LogLevel;

use crate::{
    annotation::{Annotator, Document, Token},
    answer::{extract, reconstruct, AnswerKey},
    comprehension::{BagScorer, Heuristics, SentenceSelector},
    config::EngineConfig,
    dataset::{Question, Story},
    error::QaError,
    lexicon::{from_kind, Stemmer, StopWords},
    telemetry::NlpTelemetry,
};

/// Answers every question of a story with the best-matching sentence.
pub struct Sherlock {
    annotator: Arc<dyn Annotator>,
    selector: SentenceSelector,
    telemetry: Option<NlpTelemetry>,
}

impl Sherlock {
    /// Builds the engine, loading the configured stop-word list.
    ///
    /// # Errors
    ///
    /// Fails when the configured stop-word file cannot be read.
    pub fn new(
        config: &EngineConfig,
        annotator: Arc<dyn Annotator>,
        telemetry: Option<NlpTelemetry>,
    ) -> Result<Self> {
        let stop_words = match &config.stop_words {
            Some(path) => StopWords::load(path)?,
            None => StopWords::default(),
        };
        let stemmer: Arc<dyn Stemmer> = Arc::from(from_kind(config.stemmer));
        let selector = SentenceSelector::new(
            BagScorer::new(config, Arc::clone(&stemmer), stop_words),
            Heuristics::new(config.tiers, stemmer),
        );
        Ok(Self {
            annotator,
            selector,
            telemetry,
        })
    }

    /// Sentence selector in use.
    #[must_use]
    pub const fn selector(&self) -> &SentenceSelector {
        &self.selector
    }

    /// Picks the best sentence for an annotated question and renders its answer span.
    ///
    /// # Errors
    ///
    /// Returns [`QaError::InvalidQuestion`], [`QaError::NoSentences`] or [`QaError::EmptyAnswer`].
    pub fn answer(&self, document: &Document, question: &[Token]) -> Result<String, QaError> {
        let selection = self.selector.select(question, document)?;
        let picked = extract(&selection.question_type, selection.tokens(document));
        Ok(reconstruct(&picked)?.trim().to_string())
    }

    /// Annotates one question as a single sentence and answers it.
    ///
    /// # Errors
    ///
    /// Propagates annotator failures and the errors of [`Sherlock::answer`].
    pub fn answer_question(&self, document: &Document, question: &Question) -> Result<String, QaError> {
        let annotated = self.annotator.annotate_question(&question.text)?;
        let tokens: Vec<Token> = annotated.tokens().cloned().collect();
        if tokens.is_empty() {
            return Err(QaError::InvalidQuestion(question.id.clone()));
        }
        self.answer(document, &tokens)
    }

    /// Annotates the story once and answers its questions in order.
    ///
    /// A question that cannot be answered gets an empty answer; annotator failures abort the
    /// story.
    ///
    /// # Errors
    ///
    /// Returns annotator failures and [`QaError::DuplicateAnswer`].
    pub fn process_story(&self, story: &Story) -> Result<AnswerKey, QaError> {
        let document = self.annotator.annotate(&story.text)?;
        self.log(
            LogLevel::Info,
            "nlp.story.annotated",
            &story.id,
            json!({
                "sentences": document.sentences.len(),
                "tokens": document.token_count(),
                "chains": document.chains.len(),
            }),
        );

        let mut key = AnswerKey::new();
        for question in &story.questions {
            let answer = match self.answer_question(&document, question) {
                Ok(answer) => {
                    self.log(
                        LogLevel::Debug,
                        "nlp.question.answered",
                        &story.id,
                        json!({ "question_id": question.id, "answer": answer }),
                    );
                    answer
                }
                Err(err) if err.is_story_fatal() => return Err(err),
                Err(err) => {
                    self.log(
                        LogLevel::Warn,
                        "nlp.question.failed",
                        &story.id,
                        json!({ "question_id": question.id, "error": err.to_string() }),
                    );
                    String::new()
                }
            };
            key.record(question.id.as_str(), answer)?;
        }
        Ok(key)
    }

    fn log(&self, level: LogLevel, message: &str, story_id: &str, metadata: Value) {
        if let Some(tel) = &self.telemetry {
            let _ = tel.log_story(level, message, story_id, metadata);
        }
    }
}
