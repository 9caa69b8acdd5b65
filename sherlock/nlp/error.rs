use thiserror::Error;

/// Errors raised while answering questions.
#[derive(Debug, Error)]
pub enum QaError {
    /// The question annotated to zero tokens.
    #[error("question {0:?} has no tokens")]
    InvalidQuestion(String),
    /// The story annotated to zero sentences.
    #[error("document has no sentences")]
    NoSentences,
    /// Reconstruction was asked to render an empty token list.
    #[error("cannot rebuild an answer from an empty token list")]
    EmptyAnswer,
    /// The answer key already holds an answer for this question.
    #[error("question {0} was already answered in this run")]
    DuplicateAnswer(String),
    /// The annotator returned an unusable response.
    #[error("annotator error: {0}")]
    Annotator(String),
    /// Transport failure talking to the annotation server.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    /// JSON decoding failure.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    /// I/O error (filesystem).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl QaError {
    /// True for failures that sink the whole story rather than one question.
    #[must_use]
    pub const fn is_story_fatal(&self) -> bool {
        matches!(
            self,
            Self::Annotator(_) | Self::Http(_) | Self::Json(_) | Self::Io(_)
        )
    }
}
