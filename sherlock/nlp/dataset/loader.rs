use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;

use super::{Difficulty, Question, Story};

static FIELD_SEPARATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*:\s*").expect("valid regex"));

/// Reads stories and their question files from one directory.
#[derive(Debug, Clone)]
pub struct StoryLoader {
    directory: PathBuf,
}

impl StoryLoader {
    /// Creates a loader rooted at `directory`.
    #[must_use]
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    /// Directory the story files live in.
    #[must_use]
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Loads `<id>.story` plus `<id>.answers`, or `<id>.questions` when no answers exist.
    ///
    /// # Errors
    ///
    /// Fails when the story or question file is missing or malformed.
    pub fn load(&self, id: &str) -> Result<Story> {
        let story_path = self.directory.join(format!("{id}.story"));
        let raw = fs::read_to_string(&story_path)
            .with_context(|| format!("reading story {}", story_path.display()))?;
        let mut story =
            parse_story(id, &raw).with_context(|| format!("parsing {}", story_path.display()))?;

        let answers_path = self.directory.join(format!("{id}.answers"));
        let questions_path = if answers_path.exists() {
            answers_path
        } else {
            self.directory.join(format!("{id}.questions"))
        };
        let raw = fs::read_to_string(&questions_path)
            .with_context(|| format!("reading questions {}", questions_path.display()))?;
        story.questions = parse_questions(&raw)
            .with_context(|| format!("parsing {}", questions_path.display()))?;
        Ok(story)
    }
}

/// Parses a `.story` file. `fallback_id` is used when the file carries no `STORYID` line.
///
/// # Errors
///
/// Fails when the text has no `TEXT:` section.
pub fn parse_story(fallback_id: &str, raw: &str) -> Result<Story> {
    let mut headline = String::new();
    let mut date = String::new();
    let mut id = String::new();
    let mut lines = raw.lines();
    let mut found_text = false;

    for line in lines.by_ref() {
        let Some((key, value)) = split_field(line) else {
            continue;
        };
        match key {
            "HEADLINE" => headline = value.to_string(),
            "DATE" => date = value.to_string(),
            "STORYID" => id = value.to_string(),
            "TEXT" => {
                found_text = true;
                break;
            }
            _ => {}
        }
    }
    if !found_text {
        bail!("story has no TEXT section");
    }

    let text = lines
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    if id.is_empty() {
        id = fallback_id.to_string();
    }
    Ok(Story {
        id,
        headline,
        date,
        text,
        questions: Vec::new(),
    })
}

/// Parses an `.answers` or `.questions` file into questions in file order.
///
/// # Errors
///
/// Fails on a block without `QuestionID` or `Question`.
pub fn parse_questions(raw: &str) -> Result<Vec<Question>> {
    let mut questions = Vec::new();
    let mut block: HashMap<&str, &str> = HashMap::new();
    for line in raw.lines().chain(std::iter::once("")) {
        if line.trim().is_empty() {
            if !block.is_empty() {
                questions.push(question_from_block(&block)?);
                block.clear();
            }
            continue;
        }
        if let Some((key, value)) = split_field(line) {
            block.insert(key, value);
        }
    }
    Ok(questions)
}

fn question_from_block(block: &HashMap<&str, &str>) -> Result<Question> {
    let Some(id) = block.get("QuestionID") else {
        bail!("question block without QuestionID");
    };
    let Some(text) = block.get("Question") else {
        bail!("question {id} has no Question line");
    };
    Ok(Question {
        id: (*id).to_string(),
        text: (*text).to_string(),
        answer: block.get("Answer").map(|answer| (*answer).to_string()),
        difficulty: block
            .get("Difficulty")
            .map_or(Difficulty::Hard, |label| Difficulty::from_label(label)),
    })
}

// Splits on the first colon and its surrounding whitespace.
fn split_field(line: &str) -> Option<(&str, &str)> {
    let mut parts = FIELD_SEPARATOR.splitn(line.trim(), 2);
    let key = parts.next()?;
    let value = parts.next()?;
    Some((key, value))
}
