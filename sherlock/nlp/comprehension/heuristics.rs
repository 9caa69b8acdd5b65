use std::{fmt, sync::Arc};

use crate::{
    annotation::Token,
    comprehension::{helper::contains_phrase, question::QuestionType},
    config::BonusTiers,
    lexicon::Stemmer,
};

const PERSON_OR_ORG: &[&str] = &["PERSON", "ORGANIZATION"];
const LOCATION_OR_ORG: &[&str] = &["LOCATION", "ORGANIZATION"];
const DATE_OR_TIME: &[&str] = &["DATE", "TIME"];
const MONEY_OR_PERCENT: &[&str] = &["MONEY", "PERCENT"];

const MONTHS: &[&str] = &[
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];

/// Strength of a rule; resolved to points through [`BonusTiers`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    /// Weak evidence.
    Clue,
    /// Moderate evidence.
    GoodClue,
    /// Strong evidence.
    Confident,
    /// Near-certain evidence.
    SlamDunk,
}

impl Tier {
    const fn points(self, tiers: &BonusTiers) -> f64 {
        match self {
            Self::Clue => tiers.clue,
            Self::GoodClue => tiers.good_clue,
            Self::Confident => tiers.confident,
            Self::SlamDunk => tiers.slam_dunk,
        }
    }
}

/// Condition over one token stream.
#[derive(Debug, Clone)]
enum Predicate {
    Always,
    /// Any of the (stemmed) phrases occurs contiguously.
    Phrases(Vec<Vec<String>>),
    /// Some token carries one of the tags.
    Entities(&'static [&'static str]),
    /// No token carries any of the tags.
    NoEntities(&'static [&'static str]),
}

impl Predicate {
    fn holds(&self, stems: &[String], tokens: &[Token]) -> bool {
        match self {
            Self::Always => true,
            Self::Phrases(phrases) => phrases
                .iter()
                .any(|phrase| contains_phrase(stems, phrase.as_slice())),
            Self::Entities(tags) => tokens.iter().any(|token| token.has_entity(tags)),
            Self::NoEntities(tags) => !tokens.iter().any(|token| token.has_entity(tags)),
        }
    }
}

/// One row of the rule table: both predicates must hold to earn the tier.
#[derive(Debug, Clone)]
pub struct Rule {
    name: &'static str,
    question: Predicate,
    sentence: Predicate,
    tier: Tier,
}

impl Rule {
    /// Short identifier used in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Strength of the rule.
    #[must_use]
    pub const fn tier(&self) -> Tier {
        self.tier
    }
}

/// Outcome of applying a rule set to one sentence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bonus {
    /// Sum of the points of every rule that fired.
    pub points: f64,
    /// Names of the rules that fired, in table order.
    pub fired: Vec<&'static str>,
}

/// Question-type specific rules that reward sentences looking like the expected answer.
pub struct Heuristics {
    stemmer: Arc<dyn Stemmer>,
    tiers: BonusTiers,
    what: Vec<Rule>,
    who: Vec<Rule>,
    where_: Vec<Rule>,
    when: Vec<Rule>,
    how: Vec<Rule>,
}

impl fmt::Debug for Heuristics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Heuristics")
            .field("tiers", &self.tiers)
            .field("what", &self.what.len())
            .field("who", &self.who.len())
            .field("where", &self.where_.len())
            .field("when", &self.when.len())
            .field("how", &self.how.len())
            .finish()
    }
}

impl Heuristics {
    /// Builds the rule table, stemming every phrase once with `stemmer`.
    #[must_use]
    pub fn new(tiers: BonusTiers, stemmer: Arc<dyn Stemmer>) -> Self {
        let phrases = |items: &[&str]| -> Predicate {
            Predicate::Phrases(
                items
                    .iter()
                    .map(|phrase| {
                        phrase
                            .split_whitespace()
                            .map(|word| stemmer.stem_word(word))
                            .collect()
                    })
                    .collect(),
            )
        };
        let rule = |name, question, sentence, tier| Rule {
            name,
            question,
            sentence,
            tier,
        };

        let what = vec![
            rule(
                "what.month_relative_day",
                phrases(MONTHS),
                phrases(&["today", "yesterday", "tomorrow", "last night"]),
                Tier::Clue,
            ),
            rule(
                "what.kind",
                phrases(&["kind"]),
                phrases(&["call", "from"]),
                Tier::GoodClue,
            ),
            rule(
                "what.name",
                phrases(&["name"]),
                phrases(&["name", "call", "from"]),
                Tier::SlamDunk,
            ),
        ];
        let who = vec![
            rule(
                "who.unnamed_question_named_sentence",
                Predicate::NoEntities(PERSON_OR_ORG),
                Predicate::Entities(PERSON_OR_ORG),
                Tier::Confident,
            ),
            rule(
                "who.unnamed_question_name_word",
                Predicate::NoEntities(PERSON_OR_ORG),
                phrases(&["name"]),
                Tier::GoodClue,
            ),
            rule(
                "who.named_question",
                Predicate::Entities(PERSON_OR_ORG),
                Predicate::Always,
                Tier::GoodClue,
            ),
        ];
        let where_ = vec![
            rule(
                "where.location_preposition",
                Predicate::Always,
                phrases(&["in", "at", "near", "inside"]),
                Tier::GoodClue,
            ),
            rule(
                "where.location_entity",
                Predicate::Always,
                Predicate::Entities(LOCATION_OR_ORG),
                Tier::Confident,
            ),
        ];
        let when = vec![
            rule(
                "when.date_entity",
                Predicate::Always,
                Predicate::Entities(DATE_OR_TIME),
                Tier::GoodClue,
            ),
            rule(
                "when.the_last",
                phrases(&["the last"]),
                phrases(&["first", "last", "since", "ago"]),
                Tier::SlamDunk,
            ),
            rule(
                "when.start",
                phrases(&["start", "begin"]),
                phrases(&["start", "begin", "since", "year"]),
                Tier::SlamDunk,
            ),
        ];
        let how = vec![rule(
            "how.quantity",
            phrases(&["much", "many"]),
            Predicate::Entities(MONEY_OR_PERCENT),
            Tier::Confident,
        )];

        Self {
            stemmer,
            tiers,
            what,
            who,
            where_,
            when,
            how,
        }
    }

    /// Rules bound to a question type; empty for `why` and unrecognized types.
    #[must_use]
    pub fn rules(&self, question_type: &QuestionType) -> &[Rule] {
        match question_type {
            QuestionType::What => &self.what,
            QuestionType::Who => &self.who,
            QuestionType::Where => &self.where_,
            QuestionType::When => &self.when,
            QuestionType::How => &self.how,
            QuestionType::Why | QuestionType::Other(_) => &[],
        }
    }

    /// Applies the rules for `question_type` and reports which fired.
    #[must_use]
    pub fn apply(
        &self,
        question_type: &QuestionType,
        question: &[Token],
        sentence: &[Token],
    ) -> Bonus {
        let rules = self.rules(question_type);
        if rules.is_empty() {
            return Bonus::default();
        }
        let question_stems = self.stems(question);
        let sentence_stems = self.stems(sentence);
        rules
            .iter()
            .filter(|rule| {
                rule.question.holds(&question_stems, question)
                    && rule.sentence.holds(&sentence_stems, sentence)
            })
            .fold(Bonus::default(), |mut bonus, rule| {
                bonus.points += rule.tier.points(&self.tiers);
                bonus.fired.push(rule.name);
                bonus
            })
    }

    /// Points earned by `sentence` for this question.
    #[must_use]
    pub fn bonus(&self, question_type: &QuestionType, question: &[Token], sentence: &[Token]) -> f64 {
        self.apply(question_type, question, sentence).points
    }

    fn stems(&self, tokens: &[Token]) -> Vec<String> {
        tokens
            .iter()
            .map(|token| self.stemmer.stem_token(token))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        annotation::fixtures::{question, DocumentBuilder},
        lexicon::SuffixStemmer,
    };

    fn heuristics() -> Heuristics {
        Heuristics::new(BonusTiers::default(), Arc::new(SuffixStemmer))
    }

    fn sentence(triples: &[(&str, &str, &str)]) -> Vec<Token> {
        DocumentBuilder::new().sentence(triples).build().sentences.remove(0).tokens
    }

    fn plain(text: &str) -> Vec<Token> {
        question(text)
    }

    #[test]
    fn what_kind_rewards_call_or_from() {
        let q = plain("What kind of club is it ?");
        let s = plain("Locals call it the club from the north shore .");
        let bonus = heuristics().apply(&QuestionType::What, &q, &s);
        assert!((bonus.points - 4.0).abs() < f64::EPSILON);
        assert_eq!(bonus.fired, vec!["what.kind"]);
    }

    #[test]
    fn what_name_is_a_slam_dunk() {
        let q = plain("What is the name of the boat ?");
        let s = plain("They call the boat Bluenose .");
        assert!((heuristics().bonus(&QuestionType::What, &q, &s) - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn what_month_needs_relative_day() {
        let q = plain("What happened in March ?");
        let yes = plain("The storm hit last night .");
        let no = plain("The storm hit on Monday night .");
        let h = heuristics();
        assert!((h.bonus(&QuestionType::What, &q, &yes) - 3.0).abs() < f64::EPSILON);
        assert!(h.bonus(&QuestionType::What, &q, &no).abs() < f64::EPSILON);
    }

    #[test]
    fn who_rules_depend_on_question_entities() {
        let h = heuristics();
        let unnamed = plain("Who won the race ?");
        let named_sentence = sentence(&[
            ("Jean", "NNP", "PERSON"),
            ("Dumont", "NNP", "PERSON"),
            ("won", "VBD", "O"),
        ]);
        assert!((h.bonus(&QuestionType::Who, &unnamed, &named_sentence) - 6.0).abs() < f64::EPSILON);

        let name_word = plain("The winner 's name was withheld .");
        assert!((h.bonus(&QuestionType::Who, &unnamed, &name_word) - 4.0).abs() < f64::EPSILON);

        let named_question = sentence(&[
            ("Who", "WP", "O"),
            ("beat", "VBD", "O"),
            ("Dumont", "NNP", "PERSON"),
            ("?", ".", "O"),
        ]);
        let anything = plain("It rained .");
        assert!((h.bonus(&QuestionType::Who, &named_question, &anything) - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn where_rules_stack() {
        let h = heuristics();
        let q = plain("Where is the club located ?");
        let s = sentence(&[
            ("The", "DT", "O"),
            ("club", "NN", "O"),
            ("is", "VBZ", "O"),
            ("in", "IN", "O"),
            ("Liverpool", "NNP", "LOCATION"),
        ]);
        let bonus = h.apply(&QuestionType::Where, &q, &s);
        assert!((bonus.points - 10.0).abs() < f64::EPSILON);
        assert_eq!(
            bonus.fired,
            vec!["where.location_preposition", "where.location_entity"]
        );
    }

    #[test]
    fn when_rules() {
        let h = heuristics();
        let dated = sentence(&[("It", "PRP", "O"), ("opened", "VBD", "O"), ("Tuesday", "NNP", "DATE")]);
        let q = plain("When did it open ?");
        assert!((h.bonus(&QuestionType::When, &q, &dated) - 4.0).abs() < f64::EPSILON);

        let last = plain("When was the last flood ?");
        let since = plain("There has been none since 1990 .");
        assert!((h.bonus(&QuestionType::When, &last, &since) - 20.0).abs() < f64::EPSILON);

        let start = plain("When did the festival start ?");
        let year = plain("It has run every year .");
        assert!((h.bonus(&QuestionType::When, &start, &year) - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn how_much_needs_money() {
        let h = heuristics();
        let q = plain("How much did it cost ?");
        let priced = sentence(&[("It", "PRP", "O"), ("cost", "VBD", "O"), ("$", "$", "MONEY"), ("5", "CD", "MONEY")]);
        assert!((h.bonus(&QuestionType::How, &q, &priced) - 6.0).abs() < f64::EPSILON);
        let manner = plain("How did it sink ?");
        assert!(h.bonus(&QuestionType::How, &manner, &priced).abs() < f64::EPSILON);
    }

    #[test]
    fn why_and_unknown_types_score_zero() {
        let h = heuristics();
        let s = plain("They called it a name from the past in Halifax .");
        assert!(h.rules(&QuestionType::Why).is_empty());
        assert!(h.bonus(&QuestionType::Why, &plain("Why is it called that ?"), &s).abs() < f64::EPSILON);
        assert!(h
            .bonus(&QuestionType::Other("Name".into()), &plain("Name the town ."), &s)
            .abs()
            < f64::EPSILON);
    }

    #[test]
    fn tiers_come_from_configuration() {
        let tiers = BonusTiers {
            good_clue: 1.5,
            ..BonusTiers::default()
        };
        let h = Heuristics::new(tiers, Arc::new(SuffixStemmer));
        let q = plain("What kind of club is it ?");
        let s = plain("It came from Halifax .");
        assert!((h.bonus(&QuestionType::What, &q, &s) - 1.5).abs() < f64::EPSILON);
    }
}
