use rand::seq::index;
use rand::Rng;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{BatchError, Result};

/// Dictionary words, one per line in the source file.
#[derive(Debug, Clone)]
pub struct WordList {
    path: PathBuf,
    words: Vec<String>,
}

impl WordList {
    /// Reads `path`, trimming each line and skipping blank ones.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| BatchError::WordList {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_words(
            path,
            content.lines().map(str::trim).filter(|w| !w.is_empty()),
        ))
    }

    pub fn from_words<I, S>(path: &Path, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            path: path.to_path_buf(),
            words: words.into_iter().map(Into::into).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Fails unless `count` words can be drawn without replacement.
    pub fn check_count(&self, count: usize) -> Result<()> {
        if count > self.words.len() {
            return Err(BatchError::NotEnoughWords {
                path: self.path.clone(),
                requested: count,
                available: self.words.len(),
            });
        }
        Ok(())
    }

    /// `count` distinct lines joined by single spaces, in draw order.
    pub fn sample<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Result<String> {
        self.check_count(count)?;
        let text = index::sample(rng, self.words.len(), count)
            .into_iter()
            .map(|i| self.words[i].as_str())
            .collect::<Vec<_>>()
            .join(" ");
        log::info!(
            "Generated random text from {}: {}",
            self.path.display(),
            text
        );
        Ok(text)
    }
}

/// Where each job's utterance comes from.
#[derive(Debug, Clone)]
pub enum TextSource {
    Fixed(String),
    Dictionary { words: WordList, count: usize },
}

impl TextSource {
    /// Text for the next job. Dictionary sources draw a fresh sample every call.
    pub fn next_text<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<String> {
        match self {
            TextSource::Fixed(text) => Ok(text.clone()),
            TextSource::Dictionary { words, count } => words.sample(*count, rng),
        }
    }
}
