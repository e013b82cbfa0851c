use std::ffi::OsString;
use std::path::{Path, PathBuf};

pub const DEFAULT_MODEL: &str = "tts_models/multilingual/multi-dataset/xtts_v2";

/// Arguments for one run of the synthesis tool.
///
/// A run builds one template and derives a fresh copy per job with
/// [`SynthesisConfig::with_speakers`]; nothing mutates a shared config.
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisConfig {
    pub model_name: String,
    pub language_idx: String,
    pub device: String,
    pub vocoder_name: Option<String>,
    pub speaker_wav: Vec<PathBuf>,
    pub use_cuda: bool,
    pub out_path: PathBuf,
    pub source_wav: Option<PathBuf>,
    pub target_wav: Option<PathBuf>,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            model_name: DEFAULT_MODEL.to_string(),
            language_idx: "en".to_string(),
            device: "cpu".to_string(),
            vocoder_name: None,
            speaker_wav: Vec::new(),
            use_cuda: false,
            out_path: PathBuf::from("tts_output.wav"),
            source_wav: None,
            target_wav: None,
        }
    }
}

impl SynthesisConfig {
    pub fn with_speakers(&self, speakers: Vec<PathBuf>) -> Self {
        Self {
            speaker_wav: speakers,
            ..self.clone()
        }
    }

    /// Command line for the Coqui `tts` CLI. Flag order and spelling are fixed.
    pub fn command_args(&self, text: &str) -> Vec<OsString> {
        let mut args: Vec<OsString> = Vec::new();
        push_flag(&mut args, "--model_name", &self.model_name);
        push_flag(&mut args, "--text", text);
        push_flag(&mut args, "--language_idx", &self.language_idx);
        push_flag(&mut args, "--out_path", &self.out_path);
        push_flag(&mut args, "--device", &self.device);

        if let Some(vocoder) = &self.vocoder_name {
            push_flag(&mut args, "--vocoder_name", vocoder);
        }
        for wav in &self.speaker_wav {
            push_flag(&mut args, "--speaker_wav", wav);
        }
        if self.use_cuda {
            args.push("--use_cuda".into());
        }
        if let Some(source) = &self.source_wav {
            push_flag(&mut args, "--source_wav", source);
        }
        if let Some(target) = &self.target_wav {
            push_flag(&mut args, "--target_wav", target);
        }
        args
    }
}

fn push_flag<V: AsRef<std::ffi::OsStr> + ?Sized>(args: &mut Vec<OsString>, flag: &str, value: &V) {
    args.push(flag.into());
    args.push(value.as_ref().to_os_string());
}

/// Space-joined rendering of a command for log lines.
pub fn display_command(binary: &Path, args: &[OsString]) -> String {
    std::iter::once(binary.as_os_str())
        .chain(args.iter().map(OsString::as_os_str))
        .map(|a| a.to_string_lossy())
        .collect::<Vec<_>>()
        .join(" ")
}
