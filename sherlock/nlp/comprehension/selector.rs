use serde::{Deserialize, Serialize};

use crate::{
    annotation::{Document, Token},
    comprehension::{
        algo::{BagScorer, Overlap},
        coref,
        heuristics::Heuristics,
        question::QuestionType,
    },
    error::QaError,
};

/// Score breakdown of one candidate sentence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentenceScore {
    /// Sentence index in the document.
    pub index: usize,
    /// Weighted bag-of-words score.
    pub bagging: f64,
    /// Question-type bonus.
    pub bonus: f64,
    /// Rules that contributed to the bonus.
    pub fired: Vec<String>,
    /// Length of the coreference-expanded token stream.
    pub expanded_len: usize,
}

impl SentenceScore {
    /// Bagging plus bonus.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.bagging + self.bonus
    }

    // Empty sentences lose every size tie.
    const fn tie_size(&self) -> usize {
        if self.expanded_len == 0 {
            usize::MAX
        } else {
            self.expanded_len
        }
    }
}

/// Winning sentence and the scores that decided it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    /// Interrogative type the question was classified as.
    pub question_type: QuestionType,
    /// Score of the winning sentence.
    pub best: SentenceScore,
    /// Scores of every sentence in document order.
    pub candidates: Vec<SentenceScore>,
}

impl Selection {
    /// Index of the winning sentence.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.best.index
    }

    /// Literal tokens of the winning sentence; the coreference expansion never leaks here.
    #[must_use]
    pub fn tokens<'a>(&self, document: &'a Document) -> &'a [Token] {
        document
            .sentences
            .get(self.best.index)
            .map_or(&[], |sentence| sentence.tokens.as_slice())
    }
}

/// Scores every sentence of a document and picks the best answer candidate.
#[derive(Debug)]
pub struct SentenceSelector {
    scorer: BagScorer,
    heuristics: Heuristics,
}

impl SentenceSelector {
    /// Combines a bag scorer and a heuristic rule table.
    #[must_use]
    pub const fn new(scorer: BagScorer, heuristics: Heuristics) -> Self {
        Self { scorer, heuristics }
    }

    /// Bag-of-words scorer.
    #[must_use]
    pub const fn scorer(&self) -> &BagScorer {
        &self.scorer
    }

    /// Heuristic rule table.
    #[must_use]
    pub const fn heuristics(&self) -> &Heuristics {
        &self.heuristics
    }

    /// Picks the sentence with the highest bagging-plus-bonus total.
    ///
    /// Sentence 0 seeds the search. A later sentence replaces the current best on a strictly
    /// higher total, or on an equal total with a strictly shorter expanded form; otherwise the
    /// earlier sentence stays. A sentence with no tokens never wins a size tie, even though its
    /// expanded form is empty.
    ///
    /// # Errors
    ///
    /// Returns [`QaError::InvalidQuestion`] for an empty question and [`QaError::NoSentences`] for an empty document.
    pub fn select(&self, question: &[Token], document: &Document) -> Result<Selection, QaError> {
        let question_type = QuestionType::classify(question)?;
        if document.sentences.is_empty() {
            return Err(QaError::NoSentences);
        }
        let question_bag = self.scorer.question_bag(question);

        let candidates: Vec<SentenceScore> = document
            .sentences
            .iter()
            .enumerate()
            .map(|(index, sentence)| {
                let expanded = coref::expand(document, index);
                let overlap: Overlap = self.scorer.overlap(&question_bag, &expanded);
                let bonus = self
                    .heuristics
                    .apply(&question_type, question, &sentence.tokens);
                SentenceScore {
                    index,
                    bagging: self.scorer.weigh(overlap),
                    bonus: bonus.points,
                    fired: bonus.fired.into_iter().map(str::to_string).collect(),
                    expanded_len: expanded.len(),
                }
            })
            .collect();

        let mut best = &candidates[0];
        for candidate in &candidates[1..] {
            let (total, best_total) = (candidate.total(), best.total());
            #[allow(clippy::float_cmp)]
            let tied = total == best_total;
            if total > best_total || (tied && candidate.tie_size() < best.tie_size()) {
                best = candidate;
            }
        }
        let best = best.clone();

        Ok(Selection {
            question_type,
            best,
            candidates,
        })
    }
}
