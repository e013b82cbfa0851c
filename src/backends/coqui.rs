use super::SpeechBackend;
use std::io::{BufRead, BufReader, Read};
use std::path::PathBuf;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use wait_timeout::ChildExt;

use crate::error::JobError;
use crate::synthesis::{display_command, SynthesisConfig};

/// Runs the Coqui `tts` command line tool, one blocking process per job.
pub struct CoquiBackend {
    binary_path: PathBuf,
    timeout: Option<Duration>,
}

impl CoquiBackend {
    pub fn new(binary_path: impl Into<PathBuf>, timeout: Option<Duration>) -> Self {
        Self {
            binary_path: binary_path.into(),
            timeout,
        }
    }

    fn binary_name(&self) -> String {
        self.binary_path.display().to_string()
    }

    fn wait(&self, child: &mut Child) -> Result<ExitStatus, JobError> {
        let binary = self.binary_name();
        let Some(limit) = self.timeout else {
            return child
                .wait()
                .map_err(|source| JobError::Wait { binary, source });
        };

        match child.wait_timeout(limit) {
            Ok(Some(status)) => Ok(status),
            Ok(None) => {
                // Timeout occurred, kill the process and anything it forked
                kill_process_group(child);
                let _ = child.kill();
                let _ = child.wait();
                Err(JobError::TimedOut {
                    binary,
                    secs: limit.as_secs(),
                })
            }
            Err(source) => Err(JobError::Wait { binary, source }),
        }
    }
}

/// With a timeout the child leads its own process group, so a kill reaches
/// the workers it forked as well.
#[cfg(unix)]
fn kill_process_group(child: &Child) {
    let pgid = child.id() as libc::pid_t;
    // SAFETY: plain syscall; a negative pid addresses the process group
    let rc = unsafe { libc::kill(-pgid, libc::SIGKILL) };
    if rc != 0 {
        log::debug!(
            "killpg({}) failed: {}",
            pgid,
            std::io::Error::last_os_error()
        );
    }
}

#[cfg(not(unix))]
fn kill_process_group(_child: &Child) {}

/// Echoes the tool's stdout to our console as it arrives.
fn forward_lines<R: Read>(output: R) {
    for line in BufReader::new(output).lines().map_while(Result::ok) {
        println!("{}", line);
    }
}

/// Joins the stdout forwarder; false (and a warning) if it panicked.
fn finish_pump(pump: JoinHandle<()>, binary: &str) -> bool {
    match pump.join() {
        Ok(()) => true,
        Err(_) => {
            log::warn!("Forwarding {} output panicked; some output was lost", binary);
            false
        }
    }
}

impl SpeechBackend for CoquiBackend {
    fn id(&self) -> &'static str {
        "coqui-tts"
    }

    fn synthesize(&self, config: &SynthesisConfig, text: &str) -> Result<PathBuf, JobError> {
        let args = config.command_args(text);
        log::info!(
            "Running TTS command: {}",
            display_command(&self.binary_path, &args)
        );

        let mut command = Command::new(&self.binary_path);
        command
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit());
        #[cfg(unix)]
        if self.timeout.is_some() {
            use std::os::unix::process::CommandExt;
            command.process_group(0);
        }

        let mut child = command
            .spawn()
            .map_err(|source| JobError::Spawn {
                binary: self.binary_name(),
                source,
            })?;

        let pump = child
            .stdout
            .take()
            .map(|stdout| thread::spawn(move || forward_lines(stdout)));

        let status = self.wait(&mut child);
        match (&status, pump) {
            // A surviving holder of the pipe would block the join; leave the
            // pump detached, it exits once the pipe closes.
            (Err(JobError::TimedOut { .. }), _) | (_, None) => {}
            (_, Some(pump)) => {
                finish_pump(pump, &self.binary_name());
            }
        }
        let status = status?;

        if status.success() {
            Ok(config.out_path.clone())
        } else {
            let err = JobError::Failed {
                binary: self.binary_name(),
                status,
            };
            log::error!("An error occurred while running tts command: {}", err);
            Err(err)
        }
    }
}
