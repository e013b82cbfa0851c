//! Generate and train batch loops.
//!
//! Jobs run strictly one after another. A failed synthesis is logged and the
//! loop moves on; a failed relocation aborts the batch.

use rand::Rng;
use std::path::{Path, PathBuf};

use crate::backends::SpeechBackend;
use crate::error::{BatchError, Result};
use crate::relocate::relocate_output;
use crate::speakers::SpeakerPool;
use crate::synthesis::SynthesisConfig;
use crate::text::{TextSource, WordList};

/// Bounds on how many voices a merged-voice job blends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeRange {
    min: usize,
    max: usize,
}

impl MergeRange {
    pub fn new(min: usize, max: usize) -> Result<Self> {
        if min == 0 {
            return Err(BatchError::Configuration(
                "min_merge must be at least 1".to_string(),
            ));
        }
        if min > max {
            return Err(BatchError::Configuration(format!(
                "min_merge ({}) must not exceed max_merge ({})",
                min, max
            )));
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> usize {
        self.min
    }

    pub fn max(&self) -> usize {
        self.max
    }
}

/// Counters for a finished batch.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    pub attempted: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl BatchSummary {
    fn record(&mut self, result: &Option<PathBuf>) {
        self.attempted += 1;
        match result {
            Some(_) => self.succeeded += 1,
            None => self.failed += 1,
        }
    }
}

pub struct BatchRunner<'a, R: Rng> {
    backend: &'a dyn SpeechBackend,
    template: SynthesisConfig,
    pool: &'a SpeakerPool,
    output_dir: PathBuf,
    extension: String,
    rng: R,
}

impl<'a, R: Rng> BatchRunner<'a, R> {
    pub fn new(
        backend: &'a dyn SpeechBackend,
        template: SynthesisConfig,
        pool: &'a SpeakerPool,
        output_dir: impl Into<PathBuf>,
        extension: impl Into<String>,
        rng: R,
    ) -> Self {
        Self {
            backend,
            template,
            pool,
            output_dir: output_dir.into(),
            extension: extension.into(),
            rng,
        }
    }

    /// `shots` jobs per speaker with `text`, then `shots` merged-voice jobs.
    pub fn run_generate(
        &mut self,
        text: &str,
        shots: usize,
        merge: MergeRange,
    ) -> Result<BatchSummary> {
        let source = TextSource::Fixed(text.to_string());
        let mut summary = self.run_per_speaker(&source, shots)?;

        for shot in 1..=shots {
            let wanted = self.rng.gen_range(merge.min()..=merge.max());
            let selected = self.pool.sample(wanted, &mut self.rng);
            log::info!(
                "Selected {} speaker wav files for TTS command: {:?}",
                selected.len(),
                selected
            );

            let config = self.template.with_speakers(selected);
            let result = self.process_job(&config, text)?;
            log::info!(
                "Generated output for merged files, shot: {}, result: {}",
                shot,
                describe(&result)
            );
            summary.record(&result);
        }

        log_summary("generate", &summary);
        Ok(summary)
    }

    /// `shots` jobs per speaker, each with freshly sampled dictionary text.
    /// Fails before any job when `word_count` exceeds the word list.
    pub fn run_train(
        &mut self,
        words: &WordList,
        shots: usize,
        word_count: usize,
    ) -> Result<BatchSummary> {
        words.check_count(word_count)?;

        let source = TextSource::Dictionary {
            words: words.clone(),
            count: word_count,
        };
        let summary = self.run_per_speaker(&source, shots)?;

        log_summary("train", &summary);
        Ok(summary)
    }

    fn run_per_speaker(&mut self, source: &TextSource, shots: usize) -> Result<BatchSummary> {
        let mut summary = BatchSummary::default();
        let pool = self.pool;

        for wav_file in pool.files() {
            log::info!("Processing input wav: {}", wav_file.display());
            let config = self.template.with_speakers(vec![wav_file.clone()]);

            for shot in 1..=shots {
                let text = source.next_text(&mut self.rng)?;
                let result = self.process_job(&config, &text)?;
                log::info!(
                    "Generated output for wav file: {}, shot: {}, result: {}",
                    wav_file.display(),
                    shot,
                    describe(&result)
                );
                summary.record(&result);
            }
        }

        Ok(summary)
    }

    /// Synthesizes then relocates. Only relocation errors escape.
    fn process_job(&self, config: &SynthesisConfig, text: &str) -> Result<Option<PathBuf>> {
        match self.backend.synthesize(config, text) {
            Ok(produced) => relocate_output(&produced, &self.output_dir, &self.extension),
            Err(e) => {
                log::warn!("Skipping job after {} failure: {}", self.backend.id(), e);
                Ok(None)
            }
        }
    }
}

fn describe(result: &Option<PathBuf>) -> String {
    result
        .as_deref()
        .map(Path::display)
        .map(|p| p.to_string())
        .unwrap_or_else(|| "None".to_string())
}

fn log_summary(mode: &str, summary: &BatchSummary) {
    log::info!(
        "Finished {} batch: {} attempted, {} succeeded, {} failed",
        mode,
        summary.attempted,
        summary.succeeded,
        summary.failed
    );
}
