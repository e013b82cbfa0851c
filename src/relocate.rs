use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::error::{BatchError, Result};

/// Moves a produced file into `output_dir` as `<uuid>.<extension>`.
///
/// Returns `Ok(None)` when `produced` does not exist. Filesystem failures are
/// returned as errors so that a generated file is never silently lost.
pub fn relocate_output(
    produced: &Path,
    output_dir: &Path,
    extension: &str,
) -> Result<Option<PathBuf>> {
    fs::create_dir_all(output_dir).map_err(|source| {
        log::error!(
            "An error occurred while creating {}: {}",
            output_dir.display(),
            source
        );
        BatchError::OutputDirectory {
            dir: output_dir.to_path_buf(),
            source,
        }
    })?;

    if !produced.exists() {
        log::error!("{} does not exist.", produced.display());
        return Ok(None);
    }

    let new_path = output_dir.join(format!("{}.{}", Uuid::new_v4(), extension));
    move_file(produced, &new_path).map_err(|source| {
        log::error!("An error occurred while moving the file: {}", source);
        BatchError::Relocation {
            from: produced.to_path_buf(),
            to: new_path.clone(),
            source,
        }
    })?;

    log::info!("Moved {} to {}", produced.display(), new_path.display());
    Ok(Some(new_path))
}

/// Rename, or copy and delete when rename cannot cross filesystems.
fn move_file(from: &Path, to: &Path) -> std::io::Result<()> {
    match fs::rename(from, to) {
        Ok(()) => Ok(()),
        Err(rename_err) => {
            log::debug!(
                "rename {} failed ({}), falling back to copy",
                from.display(),
                rename_err
            );
            fs::copy(from, to)?;
            fs::remove_file(from)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_moves_into_new_directory_with_fresh_name() {
        let scratch = tempfile::tempdir().unwrap();
        let produced = scratch.path().join("tts_output.wav");
        fs::write(&produced, b"RIFF....WAVE").unwrap();
        let output_dir = scratch.path().join("out").join("nested");

        let moved = relocate_output(&produced, &output_dir, "wav")
            .unwrap()
            .expect("file should be moved");

        assert!(!produced.exists());
        assert_eq!(moved.parent(), Some(output_dir.as_path()));
        assert_ne!(moved.file_name(), produced.file_name());
        assert_eq!(moved.extension().and_then(|e| e.to_str()), Some("wav"));
        assert!(Uuid::parse_str(moved.file_stem().unwrap().to_str().unwrap()).is_ok());
        assert_eq!(fs::read(&moved).unwrap(), b"RIFF....WAVE");
        assert_eq!(fs::read_dir(&output_dir).unwrap().count(), 1);
    }

    #[test]
    fn test_missing_source_returns_none() {
        let scratch = tempfile::tempdir().unwrap();
        let output_dir = scratch.path().join("out");

        let result = relocate_output(&scratch.path().join("missing.wav"), &output_dir, "wav").unwrap();

        assert!(result.is_none());
        assert!(output_dir.is_dir());
        assert_eq!(fs::read_dir(&output_dir).unwrap().count(), 0);
    }

    #[test]
    fn test_output_dir_blocked_by_file_is_fatal() {
        let scratch = tempfile::tempdir().unwrap();
        let produced = scratch.path().join("tts_output.wav");
        fs::write(&produced, b"RIFF").unwrap();
        let blocker = scratch.path().join("out");
        fs::write(&blocker, b"not a directory").unwrap();

        let err = relocate_output(&produced, &blocker, "wav").unwrap_err();
        assert!(err.is_fatal());
        assert!(produced.exists());
    }

    #[test]
    fn test_two_moves_get_distinct_names() {
        let scratch = tempfile::tempdir().unwrap();
        let produced = scratch.path().join("tts_output.wav");
        let output_dir = scratch.path().join("out");

        fs::write(&produced, b"one").unwrap();
        let first = relocate_output(&produced, &output_dir, "wav").unwrap().unwrap();
        fs::write(&produced, b"two").unwrap();
        let second = relocate_output(&produced, &output_dir, "wav").unwrap().unwrap();

        assert_ne!(first, second);
        assert_eq!(fs::read_dir(&output_dir).unwrap().count(), 2);
    }
}
