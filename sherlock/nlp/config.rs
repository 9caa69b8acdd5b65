use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{ensure, Context, Result};
use serde::Deserialize;

/// Tuning knobs for the answer-selection engine.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Multiplier for question words matched by a verb in the sentence.
    #[serde(default = "default_verb_weight")]
    pub verb_weight: f64,
    /// Global multiplier applied to the whole bag-of-words overlap.
    #[serde(default = "default_bagging_weight")]
    pub bagging_weight: f64,
    /// Point values awarded by question-type rules.
    #[serde(default)]
    pub tiers: BonusTiers,
    /// Which stemmer turns tokens into bag entries.
    #[serde(default)]
    pub stemmer: StemmerKind,
    /// Optional stop-word file; the built-in list is used when absent.
    #[serde(default)]
    pub stop_words: Option<PathBuf>,
    /// Annotation server settings.
    #[serde(default)]
    pub annotator: AnnotatorSettings,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            verb_weight: default_verb_weight(),
            bagging_weight: default_bagging_weight(),
            tiers: BonusTiers::default(),
            stemmer: StemmerKind::default(),
            stop_words: None,
            annotator: AnnotatorSettings::default(),
        }
    }
}

impl EngineConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be read, parsed or validated.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading engine config {}", path.display()))?;
        let mut config: Self =
            toml::from_str(&raw).with_context(|| format!("parsing {}", path.display()))?;
        config.validate()?;
        let source_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        if let Some(stop_words) = config.stop_words.as_mut() {
            if stop_words.is_relative() {
                *stop_words = source_dir.join(&*stop_words);
            }
        }
        Ok(config)
    }

    /// Rejects weights that would make scores meaningless.
    ///
    /// # Errors
    ///
    /// Fails on a negative or non-finite weight, or a zero timeout.
    pub fn validate(&self) -> Result<()> {
        let weights = [
            ("verb_weight", self.verb_weight),
            ("bagging_weight", self.bagging_weight),
            ("tiers.clue", self.tiers.clue),
            ("tiers.good_clue", self.tiers.good_clue),
            ("tiers.confident", self.tiers.confident),
            ("tiers.slam_dunk", self.tiers.slam_dunk),
        ];
        for (name, value) in weights {
            ensure!(
                value.is_finite() && value >= 0.0,
                "{name} must be a finite non-negative number, got {value}"
            );
        }
        ensure!(
            self.annotator.timeout_ms > 0,
            "annotator.timeout_ms must be positive"
        );
        Ok(())
    }
}

/// Bonus tiers for heuristic rules, weakest to strongest.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
pub struct BonusTiers {
    /// Weak evidence.
    #[serde(default = "default_clue")]
    pub clue: f64,
    /// Moderate evidence.
    #[serde(default = "default_good_clue")]
    pub good_clue: f64,
    /// Strong evidence.
    #[serde(default = "default_confident")]
    pub confident: f64,
    /// Near-certain evidence.
    #[serde(default = "default_slam_dunk")]
    pub slam_dunk: f64,
}

impl Default for BonusTiers {
    fn default() -> Self {
        Self {
            clue: default_clue(),
            good_clue: default_good_clue(),
            confident: default_confident(),
            slam_dunk: default_slam_dunk(),
        }
    }
}

/// Stemmer selection.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StemmerKind {
    /// Annotator lemma, falling back to suffix stripping.
    #[default]
    Lemma,
    /// Suffix stripping only.
    Suffix,
}

/// Where and how to reach the annotation server.
#[derive(Debug, Clone, Deserialize)]
pub struct AnnotatorSettings {
    /// Base URL of a CoreNLP server.
    #[serde(default = "default_annotator_url")]
    pub url: String,
    /// Per-request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for AnnotatorSettings {
    fn default() -> Self {
        Self {
            url: default_annotator_url(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

const fn default_verb_weight() -> f64 {
    2.0
}

const fn default_bagging_weight() -> f64 {
    3.0
}

const fn default_clue() -> f64 {
    3.0
}

const fn default_good_clue() -> f64 {
    4.0
}

const fn default_confident() -> f64 {
    6.0
}

const fn default_slam_dunk() -> f64 {
    20.0
}

const fn default_timeout_ms() -> u64 {
    60_000
}

fn default_annotator_url() -> String {
    "http://localhost:9000".into()
}
