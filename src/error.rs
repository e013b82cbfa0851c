//! Error types for tts-batch.
//!
//! Failures fall into four severities. Everything except a single job's
//! failure aborts the run.

use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// How bad an error is for the batch as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The environment cannot run synthesis at all (tool missing).
    Environment,
    /// Bad or missing input detected before the batch starts.
    Configuration,
    /// Filesystem failure while handling generated output.
    Filesystem,
    /// One synthesis job failed; the batch continues.
    Job,
}

/// Failure of a single synthesis job.
#[derive(Debug, Error)]
pub enum JobError {
    #[error("failed to start '{binary}': {source}")]
    Spawn {
        binary: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed while waiting for '{binary}': {source}")]
    Wait {
        binary: String,
        #[source]
        source: std::io::Error,
    },

    #[error("'{binary}' exited with {status}")]
    Failed { binary: String, status: ExitStatus },

    #[error("'{binary}' timed out after {secs}s and was killed")]
    TimedOut { binary: String, secs: u64 },
}

#[derive(Debug, Error)]
pub enum BatchError {
    #[error("The '{0}' command is not available. Please install it first.")]
    ToolNotFound(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Settings error: {0}")]
    Settings(#[from] config::ConfigError),

    #[error("No .{extension} files found in directory {}", dir.display())]
    EmptySpeakerPool { dir: PathBuf, extension: String },

    #[error("Failed to read speaker directory {}: {source}", dir.display())]
    SpeakerDirectory {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read word list {}: {source}", path.display())]
    WordList {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Requested {requested} words but {} only has {available}", path.display())]
    NotEnoughWords {
        path: PathBuf,
        requested: usize,
        available: usize,
    },

    #[error("Failed to create output directory {}: {source}", dir.display())]
    OutputDirectory {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to move {} to {}: {source}", from.display(), to.display())]
    Relocation {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to initialize logging: {0}")]
    Logging(String),

    #[error(transparent)]
    Job(#[from] JobError),
}

impl BatchError {
    pub fn severity(&self) -> Severity {
        match self {
            BatchError::ToolNotFound(_) => Severity::Environment,
            BatchError::Configuration(_)
            | BatchError::Settings(_)
            | BatchError::EmptySpeakerPool { .. }
            | BatchError::SpeakerDirectory { .. }
            | BatchError::WordList { .. }
            | BatchError::NotEnoughWords { .. }
            | BatchError::Logging(_) => Severity::Configuration,
            BatchError::OutputDirectory { .. } | BatchError::Relocation { .. } => {
                Severity::Filesystem
            }
            BatchError::Job(_) => Severity::Job,
        }
    }

    /// Whether this error must terminate the run.
    pub fn is_fatal(&self) -> bool {
        self.severity() != Severity::Job
    }
}

pub type Result<T> = std::result::Result<T, BatchError>;
