use rand::seq::{index, SliceRandom};
use rand::Rng;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{BatchError, Result};

/// Speaker reference files found in the input directory, shuffled once.
#[derive(Debug, Clone)]
pub struct SpeakerPool {
    files: Vec<PathBuf>,
}

impl SpeakerPool {
    /// Collects the `*.{extension}` files directly inside `dir` (no recursion,
    /// dot-files skipped like a shell glob) and shuffles them. An empty result
    /// is an error.
    pub fn load<R: Rng + ?Sized>(dir: &Path, extension: &str, rng: &mut R) -> Result<Self> {
        let entries = fs::read_dir(dir).map_err(|source| BatchError::SpeakerDirectory {
            dir: dir.to_path_buf(),
            source,
        })?;

        let mut files: Vec<PathBuf> = entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| path.is_file())
            .filter(|path| !is_hidden(path))
            .filter(|path| path.extension().and_then(|s| s.to_str()) == Some(extension))
            .collect();

        if files.is_empty() {
            return Err(BatchError::EmptySpeakerPool {
                dir: dir.to_path_buf(),
                extension: extension.to_string(),
            });
        }

        // read_dir order is platform dependent; sort so a seeded rng reproduces
        files.sort();
        files.shuffle(rng);
        log::info!(
            "Found and shuffled {} {} files in {}",
            files.len(),
            extension,
            dir.display()
        );

        Ok(Self { files })
    }

    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Draws `min(count, len)` distinct files.
    pub fn sample<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Vec<PathBuf> {
        let amount = count.min(self.files.len());
        index::sample(rng, self.files.len(), amount)
            .into_iter()
            .map(|i| self.files[i].clone())
            .collect()
    }
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with('.'))
}
