use config::{Config, Environment, File};
use log::LevelFilter;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::logging::LogConfig;

/// Settings that are not per-run CLI flags.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Synthesis executable, looked up on PATH unless it contains a separator
    pub tts_binary: String,
    /// Extension of speaker references and generated files, without the dot
    pub audio_extension: String,
    /// 0 waits for the synthesis process forever
    pub synthesis_timeout_secs: u64,
    pub log_to_console: bool,
    pub log_to_disk: bool,
    pub log_file: String,
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tts_binary: "tts".to_string(),
            audio_extension: "wav".to_string(),
            synthesis_timeout_secs: 0,
            log_to_console: true,
            log_to_disk: false,
            log_file: "app.log".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Settings {
    /// Loads defaults, then the optional `TtsBatch` files, then `extra`
    /// (which must exist when given), then `TTS_BATCH_*` environment variables.
    pub fn load(extra: Option<&Path>) -> Result<Self, config::ConfigError> {
        let defaults = Settings::default();
        let mut builder = Config::builder()
            .set_default("tts_binary", defaults.tts_binary)?
            .set_default("audio_extension", defaults.audio_extension)?
            .set_default("synthesis_timeout_secs", defaults.synthesis_timeout_secs)?
            .set_default("log_to_console", defaults.log_to_console)?
            .set_default("log_to_disk", defaults.log_to_disk)?
            .set_default("log_file", defaults.log_file)?
            .set_default("log_level", defaults.log_level)?
            .add_source(File::with_name("TtsBatch").required(false));

        if let Some(user_file) = user_config_file() {
            builder = builder.add_source(File::from(user_file).required(false));
        }
        if let Some(path) = extra {
            builder = builder.add_source(File::from(path).required(true));
        }

        let settings: Settings = builder
            .add_source(Environment::with_prefix("TTS_BATCH"))
            .build()?
            .try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), config::ConfigError> {
        if self.tts_binary.trim().is_empty() {
            return Err(config::ConfigError::Message(
                "tts_binary must not be empty".to_string(),
            ));
        }
        if self.audio_extension.trim().is_empty() || self.audio_extension.starts_with('.') {
            return Err(config::ConfigError::Message(format!(
                "Invalid audio_extension: '{}'. Use a bare extension such as 'wav'",
                self.audio_extension
            )));
        }
        if self.log_level.parse::<LevelFilter>().is_err() {
            return Err(config::ConfigError::Message(format!(
                "Invalid log_level: '{}'",
                self.log_level
            )));
        }
        Ok(())
    }

    pub fn synthesis_timeout(&self) -> Option<Duration> {
        match self.synthesis_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }

    /// Logging configuration; `verbose` forces debug level.
    pub fn log_config(&self, verbose: bool) -> LogConfig {
        let level = if verbose {
            LevelFilter::Debug
        } else {
            self.log_level.parse().unwrap_or(LevelFilter::Info)
        };
        LogConfig {
            console: self.log_to_console,
            file: self.log_to_disk.then(|| PathBuf::from(&self.log_file)),
            level,
        }
    }
}

fn user_config_file() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("tts-batch").join("TtsBatch"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    #[test]
    #[serial]
    fn test_config_load_defaults() {
        let settings = Settings::load(None).expect("Failed to load settings");
        assert!(!settings.tts_binary.is_empty());
        assert!(!settings.audio_extension.is_empty());
    }

    #[test]
    #[serial]
    fn test_env_override() {
        std::env::set_var("TTS_BATCH_TTS_BINARY", "/opt/coqui/bin/tts");
        let settings = Settings::load(None);
        std::env::remove_var("TTS_BATCH_TTS_BINARY");

        assert_eq!(settings.unwrap().tts_binary, "/opt/coqui/bin/tts");
    }

    #[test]
    #[serial]
    fn test_explicit_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "synthesis_timeout_secs = 90\nlog_to_disk = true").unwrap();

        let settings = Settings::load(Some(file.path())).unwrap();
        assert_eq!(settings.synthesis_timeout(), Some(Duration::from_secs(90)));
        assert_eq!(settings.log_config(false).file, Some(PathBuf::from("app.log")));
    }

    #[test]
    #[serial]
    fn test_missing_explicit_file_fails() {
        assert!(Settings::load(Some(Path::new("/nonexistent/TtsBatch.toml"))).is_err());
    }

    #[test]
    fn test_validate_rejects_dotted_extension() {
        let settings = Settings {
            audio_extension: ".wav".to_string(),
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_verbose_forces_debug() {
        let settings = Settings::default();
        assert_eq!(settings.log_config(true).level, LevelFilter::Debug);
        assert_eq!(settings.log_config(false).level, LevelFilter::Info);
        assert_eq!(settings.synthesis_timeout(), None);
    }
}
