use std::{collections::HashMap, fmt};

use serde::Serialize;

use crate::{answer::AnswerKey, comprehension::helper::content_words, dataset::Story};

/// Word-overlap agreement between a produced answer and a gold answer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct OverlapScore {
    /// Share of answer words found in the gold answer.
    pub precision: f64,
    /// Share of gold words found in the answer.
    pub recall: f64,
    /// Harmonic mean of precision and recall.
    pub f_measure: f64,
}

impl OverlapScore {
    /// Scores `answer` against every `|`-separated alternative of `gold` and keeps the best F.
    #[must_use]
    pub fn best_of(answer: &str, gold: &str) -> Self {
        let produced = content_words(answer);
        gold.split('|')
            .map(|alternative| Self::between(&produced, &content_words(alternative)))
            .fold(Self::default(), |best, score| {
                if score.f_measure > best.f_measure {
                    score
                } else {
                    best
                }
            })
    }

    fn between(produced: &[String], gold: &[String]) -> Self {
        if produced.is_empty() || gold.is_empty() {
            return Self::default();
        }
        let mut remaining: HashMap<&str, usize> = HashMap::new();
        for word in gold {
            *remaining.entry(word.as_str()).or_default() += 1;
        }
        let mut matched = 0_usize;
        for word in produced {
            if let Some(count) = remaining.get_mut(word.as_str()) {
                if *count > 0 {
                    *count -= 1;
                    matched += 1;
                }
            }
        }
        #[allow(clippy::cast_precision_loss)]
        let (matched, produced, gold) = (matched as f64, produced.len() as f64, gold.len() as f64);
        let precision = matched / produced;
        let recall = matched / gold;
        let f_measure = if matched > 0.0 {
            2.0 * precision * recall / (precision + recall)
        } else {
            0.0
        };
        Self {
            precision,
            recall,
            f_measure,
        }
    }
}

/// Running averages over every answered question that has a gold answer.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Evaluation {
    scored: usize,
    unanswered: usize,
    precision: f64,
    recall: f64,
    f_measure: f64,
}

impl Evaluation {
    /// Creates an empty tally.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one question's score.
    pub fn add(&mut self, score: OverlapScore) {
        self.scored += 1;
        self.precision += score.precision;
        self.recall += score.recall;
        self.f_measure += score.f_measure;
    }

    /// Scores every gold-answered question of `story` found in `key`.
    pub fn add_story(&mut self, story: &Story, key: &AnswerKey) {
        for question in &story.questions {
            let Some(gold) = question.answer.as_deref() else {
                continue;
            };
            match key.get(&question.id) {
                Some(answer) => self.add(OverlapScore::best_of(answer, gold)),
                None => self.unanswered += 1,
            }
        }
    }

    /// Number of scored questions.
    #[must_use]
    pub const fn scored(&self) -> usize {
        self.scored
    }

    /// Gold-answered questions with no produced answer.
    #[must_use]
    pub const fn unanswered(&self) -> usize {
        self.unanswered
    }

    /// Mean scores, or zeros when nothing was scored.
    #[must_use]
    pub fn mean(&self) -> OverlapScore {
        if self.scored == 0 {
            return OverlapScore::default();
        }
        #[allow(clippy::cast_precision_loss)]
        let count = self.scored as f64;
        OverlapScore {
            precision: self.precision / count,
            recall: self.recall / count,
            f_measure: self.f_measure / count,
        }
    }
}

impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mean = self.mean();
        writeln!(f, "Questions scored: {}", self.scored)?;
        writeln!(f, "Unanswered: {}", self.unanswered)?;
        writeln!(f, "Precision: {:.4}", mean.precision)?;
        writeln!(f, "Recall: {:.4}", mean.recall)?;
        writeln!(f, "F-measure: {:.4}", mean.f_measure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{Difficulty, Question};

    fn close(left: f64, right: f64) -> bool {
        (left - right).abs() < 1e-9
    }

    #[test]
    fn partial_overlap_scores_precision_and_recall() {
        let score = OverlapScore::best_of("in Liverpool, Nova Scotia", "Liverpool");
        assert!(close(score.precision, 0.25));
        assert!(close(score.recall, 1.0));
        assert!(close(score.f_measure, 0.4));
    }

    #[test]
    fn best_alternative_wins() {
        let score = OverlapScore::best_of("Nova Scotia", "Liverpool | Nova Scotia");
        assert!(close(score.f_measure, 1.0));
    }

    #[test]
    fn disjoint_answers_score_zero() {
        assert_eq!(
            OverlapScore::best_of("yesterday", "Liverpool"),
            OverlapScore::default()
        );
    }

    #[test]
    fn story_tally_averages_and_counts_unanswered() {
        let question = |id: &str, gold: Option<&str>| Question {
            id: id.into(),
            text: "Where?".into(),
            answer: gold.map(Into::into),
            difficulty: Difficulty::Easy,
        };
        let story = Story {
            id: "s".into(),
            headline: String::new(),
            date: String::new(),
            text: String::new(),
            questions: vec![
                question("q1", Some("Liverpool")),
                question("q2", Some("1849")),
                question("q3", Some("boats")),
                question("q4", None),
            ],
        };
        let mut key = AnswerKey::new();
        key.record("q1", "Liverpool").unwrap();
        key.record("q2", "in May").unwrap();
        key.record("q4", "anything").unwrap();

        let mut evaluation = Evaluation::new();
        evaluation.add_story(&story, &key);
        assert_eq!(evaluation.scored(), 2);
        assert_eq!(evaluation.unanswered(), 1);
        assert!(close(evaluation.mean().f_measure, 0.5));
        assert!(evaluation.to_string().contains("F-measure: 0.5000"));
    }
}
