//! Command-line surface of `tts-batch`.
//!
//! Flags keep the underscore spelling of the Coqui `tts` CLI so existing
//! invocations carry over unchanged.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::driver::MergeRange;
use crate::error::{BatchError, Result};
use crate::synthesis::{SynthesisConfig, DEFAULT_MODEL};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Random dictionary text for every speaker file
    Train,
    /// Fixed text for every speaker file, plus merged voices
    Generate,
}

/// TTS CLI Wrapper
#[derive(Parser, Debug)]
#[command(name = "tts-batch")]
#[command(version)]
#[command(about = "Batch-generate speech samples with the Coqui tts CLI", long_about = None)]
pub struct Args {
    /// Directory of input wav files
    #[arg(long = "input_wav_dir")]
    pub input_wav_dir: PathBuf,

    /// Directory for output wav files
    #[arg(long = "output_wav_dir")]
    pub output_wav_dir: PathBuf,

    /// Mode: train or generate
    #[arg(long, value_enum)]
    pub mode: Mode,

    /// Text to be used in generate mode
    #[arg(long)]
    pub text: Option<String>,

    /// Dictionary file to be used in train mode
    #[arg(long = "dict_file")]
    pub dict_file: Option<PathBuf>,

    /// Number of shots for TTS generation
    #[arg(long, default_value_t = 2)]
    pub shots: usize,

    /// Number of words from dictionary when training
    #[arg(long = "word_count", default_value_t = 15)]
    pub word_count: usize,

    /// Minimum number of files to merge
    #[arg(long = "min_merge", default_value_t = 2)]
    pub min_merge: usize,

    /// Maximum number of files to merge
    #[arg(long = "max_merge", default_value_t = 7)]
    pub max_merge: usize,

    /// Device to use for TTS (e.g., cpu, cuda, mps)
    #[arg(long, default_value = "cpu")]
    pub device: String,

    /// Name of the TTS model
    #[arg(long = "model_name", default_value = DEFAULT_MODEL)]
    pub model_name: String,

    /// Name of the vocoder model
    #[arg(long = "vocoder_name")]
    pub vocoder_name: Option<String>,

    /// Use CUDA for TTS generation
    #[arg(long = "use_cuda")]
    pub use_cuda: bool,

    /// Original audio file to convert in the voice of the target_wav
    #[arg(long = "source_wav")]
    pub source_wav: Option<PathBuf>,

    /// Target audio file to convert in the voice of the source_wav
    #[arg(long = "target_wav")]
    pub target_wav: Option<PathBuf>,

    /// Language code passed to the model
    #[arg(long = "language_idx", default_value = "en")]
    pub language_idx: String,

    /// Where the tts tool writes each result before it is moved
    #[arg(long = "out_path", default_value = "tts_output.wav")]
    pub out_path: PathBuf,

    /// Seed for shuffling and sampling, for reproducible runs
    #[arg(long)]
    pub seed: Option<u64>,

    /// Extra settings file (toml, yaml, json, ...)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Debug-level logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Mode-specific inputs, checked before anything runs.
#[derive(Debug, Clone, PartialEq)]
pub enum RunPlan {
    Generate { text: String, merge: MergeRange },
    Train { dict_file: PathBuf, word_count: usize },
}

impl Args {
    pub fn plan(&self) -> Result<RunPlan> {
        match self.mode {
            Mode::Generate => {
                let text = self
                    .text
                    .as_deref()
                    .filter(|t| !t.is_empty())
                    .ok_or_else(|| {
                        BatchError::Configuration(
                            "Text must be provided in generate mode.".to_string(),
                        )
                    })?;
                Ok(RunPlan::Generate {
                    text: text.to_string(),
                    merge: MergeRange::new(self.min_merge, self.max_merge)?,
                })
            }
            Mode::Train => {
                let dict_file = self.dict_file.clone().ok_or_else(|| {
                    BatchError::Configuration(
                        "Dictionary file must be provided in train mode.".to_string(),
                    )
                })?;
                if self.word_count == 0 {
                    return Err(BatchError::Configuration(
                        "word_count must be at least 1".to_string(),
                    ));
                }
                Ok(RunPlan::Train {
                    dict_file,
                    word_count: self.word_count,
                })
            }
        }
    }

    /// Template every job's configuration is derived from.
    pub fn synthesis_template(&self) -> SynthesisConfig {
        SynthesisConfig {
            model_name: self.model_name.clone(),
            language_idx: self.language_idx.clone(),
            device: self.device.clone(),
            vocoder_name: self.vocoder_name.clone(),
            speaker_wav: Vec::new(),
            use_cuda: self.use_cuda,
            out_path: self.out_path.clone(),
            source_wav: self.source_wav.clone(),
            target_wav: self.target_wav.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(extra: &[&str]) -> Args {
        let mut argv = vec![
            "tts-batch",
            "--input_wav_dir",
            "voices",
            "--output_wav_dir",
            "out",
        ];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_cli_is_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let args = parse(&["--mode", "generate", "--text", "hi"]);
        assert_eq!(args.shots, 2);
        assert_eq!(args.word_count, 15);
        assert_eq!((args.min_merge, args.max_merge), (2, 7));
        assert_eq!(args.device, "cpu");
        assert_eq!(args.model_name, DEFAULT_MODEL);
        assert!(!args.use_cuda);

        let template = args.synthesis_template();
        assert_eq!(template, SynthesisConfig::default());
    }

    #[test]
    fn test_generate_requires_text() {
        let args = parse(&["--mode", "generate"]);
        assert!(matches!(args.plan(), Err(BatchError::Configuration(_))));
    }

    #[test]
    fn test_generate_rejects_only_empty_text() {
        let args = parse(&["--mode", "generate", "--text", ""]);
        assert!(matches!(args.plan(), Err(BatchError::Configuration(_))));

        let args = parse(&["--mode", "generate", "--text", "  "]);
        assert!(matches!(args.plan(), Ok(RunPlan::Generate { text, .. }) if text == "  "));
    }

    #[test]
    fn test_train_rejects_zero_word_count() {
        let args = parse(&["--mode", "train", "--dict_file", "words.txt", "--word_count", "0"]);
        assert!(matches!(args.plan(), Err(BatchError::Configuration(_))));
    }

    #[test]
    fn test_train_requires_dict_file() {
        let args = parse(&["--mode", "train"]);
        assert!(matches!(args.plan(), Err(BatchError::Configuration(_))));

        let args = parse(&["--mode", "train", "--dict_file", "words.txt", "--word_count", "4"]);
        assert_eq!(
            args.plan().unwrap(),
            RunPlan::Train {
                dict_file: PathBuf::from("words.txt"),
                word_count: 4
            }
        );
    }

    #[test]
    fn test_bad_merge_bounds() {
        let args = parse(&[
            "--mode",
            "generate",
            "--text",
            "hi",
            "--min_merge",
            "5",
            "--max_merge",
            "2",
        ]);
        assert!(args.plan().is_err());
    }

    #[test]
    fn test_rejects_unknown_mode() {
        let result = Args::try_parse_from([
            "tts-batch",
            "--input_wav_dir",
            "voices",
            "--output_wav_dir",
            "out",
            "--mode",
            "infer",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_pass_through_options() {
        let args = parse(&[
            "--mode",
            "generate",
            "--text",
            "hi",
            "--use_cuda",
            "--vocoder_name",
            "voc",
            "--source_wav",
            "s.wav",
            "--target_wav",
            "t.wav",
            "--language_idx",
            "de",
        ]);
        let template = args.synthesis_template();
        assert!(template.use_cuda);
        assert_eq!(template.vocoder_name.as_deref(), Some("voc"));
        assert_eq!(template.source_wav, Some(PathBuf::from("s.wav")));
        assert_eq!(template.target_wav, Some(PathBuf::from("t.wav")));
        assert_eq!(template.language_idx, "de");
    }
}
