use env_logger::{Builder, Env, Target};
use log::LevelFilter;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;

use crate::error::{BatchError, Result};

/// Where log records go. Built once at startup and handed to [`init_logging`].
#[derive(Debug, Clone, PartialEq)]
pub struct LogConfig {
    pub console: bool,
    /// Appended to when set
    pub file: Option<PathBuf>,
    pub level: LevelFilter,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            console: true,
            file: None,
            level: LevelFilter::Info,
        }
    }
}

/// Fans every record out to stdout and/or a log file.
struct Sinks {
    console: Option<io::Stdout>,
    file: Option<File>,
}

impl Write for Sinks {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if let Some(out) = self.console.as_mut() {
            out.write_all(buf)?;
        }
        if let Some(file) = self.file.as_mut() {
            file.write_all(buf)?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if let Some(out) = self.console.as_mut() {
            out.flush()?;
        }
        if let Some(file) = self.file.as_mut() {
            file.flush()?;
        }
        Ok(())
    }
}

/// Installs the global logger. `RUST_LOG` overrides `config.level`.
pub fn init_logging(config: &LogConfig) -> Result<()> {
    let file = match &config.file {
        Some(path) => Some(
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| {
                    BatchError::Logging(format!("cannot open {}: {}", path.display(), e))
                })?,
        ),
        None => None,
    };

    let level = if !config.console && file.is_none() {
        LevelFilter::Off
    } else {
        config.level
    };

    let sinks = Sinks {
        console: config.console.then(io::stdout),
        file,
    };

    let env = Env::default().filter_or("RUST_LOG", level.to_string().to_lowercase());
    Builder::from_env(env)
        .format(|buf, record| {
            writeln!(
                buf,
                "{} - {} - {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S,%3f"),
                record.level(),
                record.args()
            )
        })
        .target(Target::Pipe(Box::new(sinks)))
        .try_init()
        .map_err(|e| BatchError::Logging(e.to_string()))
}
