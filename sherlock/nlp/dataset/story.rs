use serde::{Deserialize, Serialize};

/// How hard the question was judged to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    /// Marked `Easy`.
    Easy,
    /// Everything else.
    Hard,
}

impl Difficulty {
    /// `Easy` maps to [`Difficulty::Easy`]; any other label is hard.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        if label == "Easy" {
            Self::Easy
        } else {
            Self::Hard
        }
    }
}

/// A question about a story, with its gold answer when one was supplied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Question id, unique across a run.
    pub id: String,
    /// Question text as written.
    pub text: String,
    /// Gold answer; alternatives are separated by `|`.
    pub answer: Option<String>,
    /// Judged difficulty.
    pub difficulty: Difficulty,
}

/// A news story and the questions asked about it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Story {
    /// Story id.
    pub id: String,
    /// Headline line.
    pub headline: String,
    /// Publication date as written in the file.
    pub date: String,
    /// Body text, lines joined by single spaces.
    pub text: String,
    /// Questions in file order.
    pub questions: Vec<Question>,
}
