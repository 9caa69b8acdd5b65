use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{ensure, Context, Result};

use super::StoryLoader;

/// Run manifest: a story directory line followed by one story id per line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    path: PathBuf,
    directory_line: String,
    /// Story directory, resolved against the manifest's own directory.
    pub directory: PathBuf,
    /// Story ids in file order.
    pub story_ids: Vec<String>,
}

impl Manifest {
    /// Reads and validates a manifest file.
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be read or names no story directory.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading manifest {}", path.display()))?;
        let mut lines = raw.lines().map(str::trim).filter(|line| !line.is_empty());
        let directory_line = lines.next().unwrap_or_default().to_string();
        ensure!(
            !directory_line.is_empty(),
            "manifest {} names no story directory",
            path.display()
        );
        let story_ids = lines.map(str::to_string).collect();

        let directory = PathBuf::from(&directory_line);
        let directory = if directory.is_relative() {
            path.parent().unwrap_or_else(|| Path::new(".")).join(directory)
        } else {
            directory
        };
        Ok(Self {
            path: path.to_path_buf(),
            directory_line,
            directory,
            story_ids,
        })
    }

    /// File the manifest was read from.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sorts the story ids; the directory line stays first.
    pub fn alphabetize(&mut self) {
        self.story_ids.sort();
    }

    /// Writes the manifest back to where it was loaded from.
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be written.
    pub fn save(&self) -> Result<()> {
        let mut out = String::with_capacity(self.directory_line.len() + self.story_ids.len() * 16);
        out.push_str(&self.directory_line);
        out.push('\n');
        for id in &self.story_ids {
            out.push_str(id);
            out.push('\n');
        }
        fs::write(&self.path, out)
            .with_context(|| format!("writing manifest {}", self.path.display()))
    }

    /// `.story` file of every listed id.
    #[must_use]
    pub fn story_paths(&self) -> Vec<PathBuf> {
        self.story_ids
            .iter()
            .map(|id| self.directory.join(format!("{id}.story")))
            .collect()
    }

    /// Loader over the manifest's story directory.
    #[must_use]
    pub fn loader(&self) -> StoryLoader {
        StoryLoader::new(&self.directory)
    }
}
