use std::{collections::HashSet, fmt, sync::Arc};

use serde::{Deserialize, Serialize};

use crate::{
    annotation::{Document, Token},
    comprehension::coref,
    config::EngineConfig,
    lexicon::{Stemmer, StopWords},
};

/// Bag-of-words overlap split by part of speech.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Overlap {
    /// Question words matched by sentence verbs.
    pub verbs: usize,
    /// Question words matched by the remaining sentence tokens.
    pub others: usize,
}

/// Scores sentences by stemmed word overlap with the question, weighting verbs higher.
pub struct BagScorer {
    stemmer: Arc<dyn Stemmer>,
    stop_words: StopWords,
    verb_weight: f64,
    bagging_weight: f64,
}

impl BagScorer {
    /// Creates a scorer using the configured weights.
    #[must_use]
    pub fn new(config: &EngineConfig, stemmer: Arc<dyn Stemmer>, stop_words: StopWords) -> Self {
        Self {
            stemmer,
            stop_words,
            verb_weight: config.verb_weight,
            bagging_weight: config.bagging_weight,
        }
    }

    /// Stemmed, stop-word-free set of the given tokens.
    pub fn bag<'a, I>(&self, tokens: I) -> HashSet<String>
    where
        I: IntoIterator<Item = &'a Token>,
    {
        tokens
            .into_iter()
            .filter(|token| !self.stop_words.contains(&token.word))
            .map(|token| self.stemmer.stem_token(token))
            .filter(|stem| !stem.is_empty() && !self.stop_words.contains(stem))
            .collect()
    }

    /// Bag of the question without its leading question word.
    #[must_use]
    pub fn question_bag(&self, question: &[Token]) -> HashSet<String> {
        self.bag(question.iter().skip(1))
    }

    /// Counts question-bag words found among verbs and non-verbs of `tokens`.
    #[must_use]
    pub fn overlap(&self, question_bag: &HashSet<String>, tokens: &[&Token]) -> Overlap {
        let (verbs, others): (Vec<&Token>, Vec<&Token>) =
            tokens.iter().copied().partition(|token| token.is_verb());
        Overlap {
            verbs: self.bag(verbs).intersection(question_bag).count(),
            others: self.bag(others).intersection(question_bag).count(),
        }
    }

    /// Weighted score of an overlap.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn weigh(&self, overlap: Overlap) -> f64 {
        (overlap.verbs as f64 * self.verb_weight + overlap.others as f64) * self.bagging_weight
    }

    /// Scores one sentence of `document`, expanded through coreference, against the question.
    #[must_use]
    pub fn score(&self, question: &[Token], document: &Document, sentence_index: usize) -> f64 {
        let question_bag = self.question_bag(question);
        let expanded = coref::expand(document, sentence_index);
        self.weigh(self.overlap(&question_bag, &expanded))
    }

    /// Stemmer shared with the heuristics.
    #[must_use]
    pub fn stemmer(&self) -> Arc<dyn Stemmer> {
        Arc::clone(&self.stemmer)
    }
}

impl fmt::Debug for BagScorer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BagScorer")
            .field("stop_words", &self.stop_words.len())
            .field("verb_weight", &self.verb_weight)
            .field("bagging_weight", &self.bagging_weight)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        annotation::{fixtures::DocumentBuilder, Mention},
        lexicon::SuffixStemmer,
    };

    fn scorer() -> BagScorer {
        BagScorer::new(
            &EngineConfig::default(),
            Arc::new(SuffixStemmer),
            StopWords::default(),
        )
    }

    fn question(triples: &[(&str, &str, &str)]) -> Vec<Token> {
        DocumentBuilder::new().sentence(triples).build().sentences.remove(0).tokens
    }

    #[test]
    fn question_bag_skips_question_word_and_stop_words() {
        let q = question(&[
            ("Clubs", "NNS", "O"),
            ("the", "DT", "O"),
            ("clubs", "NNS", "O"),
            ("?", ".", "O"),
        ]);
        let bag = scorer().question_bag(&q);
        assert_eq!(bag.len(), 1);
        assert!(bag.contains("club"));
    }

    #[test]
    fn verbs_weigh_double_then_bagging_weight() {
        let doc = DocumentBuilder::new()
            .sentence(&[
                ("The", "DT", "O"),
                ("club", "NN", "O"),
                ("sailed", "VBD", "O"),
                ("north", "RB", "O"),
            ])
            .build();
        let q = question(&[
            ("Where", "WRB", "O"),
            ("did", "VBD", "O"),
            ("the", "DT", "O"),
            ("club", "NN", "O"),
            ("sail", "VB", "O"),
            ("?", ".", "O"),
        ]);
        // verb "sail" (2) + noun "club" (1), times 3.
        assert!((scorer().score(&q, &doc, 0) - 9.0).abs() < f64::EPSILON);
    }

    #[test]
    fn coreference_adds_evidence() {
        let doc = DocumentBuilder::new()
            .words("Mayor Dumont spoke")
            .words("He resigned")
            .chain(Mention::new(0, 0, 2), &[Mention::new(1, 0, 1)])
            .build();
        let q = question(&[("Who", "WP", "O"), ("Dumont", "NNP", "PERSON")]);
        assert!((scorer().score(&q, &doc, 1) - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_sentence_scores_zero() {
        let doc = DocumentBuilder::new().sentence(&[]).build();
        let q = question(&[("Who", "WP", "O"), ("won", "VBD", "O")]);
        assert!(scorer().score(&q, &doc, 0).abs() < f64::EPSILON);
    }

    #[test]
    fn superset_bag_never_scores_lower() {
        let doc = DocumentBuilder::new()
            .words("boats race")
            .words("boats race harbor today")
            .build();
        let q = question(&[
            ("What", "WP", "O"),
            ("boats", "NNS", "O"),
            ("race", "NN", "O"),
            ("harbor", "NN", "O"),
        ]);
        let scorer = scorer();
        assert!(scorer.score(&q, &doc, 1) >= scorer.score(&q, &doc, 0));
    }
}
