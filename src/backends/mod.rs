pub mod coqui;

use std::path::PathBuf;

use crate::error::JobError;
use crate::synthesis::SynthesisConfig;

/// Trait that all speech synthesis backends must implement.
/// The batch drivers only see this, so tests can swap the external tool out.
pub trait SpeechBackend: Send + Sync {
    /// Runs one synthesis job and returns the path of the produced audio
    /// (the job's `out_path`) on success.
    fn synthesize(&self, config: &SynthesisConfig, text: &str) -> Result<PathBuf, JobError>;

    /// Returns the unique ID of the backend (e.g., "coqui-tts")
    fn id(&self) -> &'static str;
}
