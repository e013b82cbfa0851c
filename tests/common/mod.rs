#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

/// Creates `count` placeholder speaker references in `dir`.
pub fn speaker_dir(dir: &Path, count: usize) -> Vec<PathBuf> {
    fs::create_dir_all(dir).unwrap();
    (0..count)
        .map(|i| {
            let path = dir.join(format!("speaker_{}.wav", i));
            fs::write(&path, b"RIFF").unwrap();
            path
        })
        .collect()
}

pub fn word_file(dir: &Path, count: usize) -> PathBuf {
    let path = dir.join("words.txt");
    let words: Vec<String> = (0..count).map(|i| format!("word{}", i)).collect();
    fs::write(&path, words.join("\n")).unwrap();
    path
}

pub fn wav_count(dir: &Path) -> usize {
    match fs::read_dir(dir) {
        Ok(entries) => entries
            .flatten()
            .filter(|e| e.path().extension().and_then(|s| s.to_str()) == Some("wav"))
            .count(),
        Err(_) => 0,
    }
}

/// Shell stand-in for the Coqui `tts` CLI. Appends one line per call to
/// `calls.log` in `dir` and writes the `--out_path` file unless `exit_code`
/// is nonzero.
#[cfg(unix)]
pub fn fake_tool(dir: &Path, exit_code: i32) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join("tts");
    let calls = dir.join("calls.log");
    let script = format!(
        r#"#!/bin/sh
out=""
speakers=0
while [ $# -gt 0 ]; do
  case "$1" in
    --out_path) out="$2"; shift 2 ;;
    --speaker_wav) speakers=$((speakers + 1)); shift 2 ;;
    *) shift ;;
  esac
done
echo "speakers=$speakers" >> '{calls}'
echo "fake tts writing $out"
if [ {code} -ne 0 ]; then
  exit {code}
fi
printf 'RIFF' > "$out"
"#,
        calls = calls.display(),
        code = exit_code
    );
    fs::write(&path, script).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

pub fn recorded_calls(dir: &Path) -> Vec<String> {
    fs::read_to_string(dir.join("calls.log"))
        .map(|s| s.lines().map(str::to_string).collect())
        .unwrap_or_default()
}
