//! Story, question and manifest files on disk.

/// Manifest listing the stories of a run.
pub mod index;
/// Readers for `.story`, `.answers` and `.questions` files.
pub mod loader;
/// Plain story and question records.
pub mod story;

pub use index::Manifest;
pub use loader::StoryLoader;
pub use story::{Difficulty, Question, Story};
