use std::path::PathBuf;

use crate::error::{BatchError, Result};

/// Whether `binary` resolves to an executable, either on PATH or as a path.
pub fn tool_exists(binary: &str) -> bool {
    which::which(binary).is_ok()
}

/// Resolves the synthesis executable or fails with [`BatchError::ToolNotFound`].
pub fn ensure_tool(binary: &str) -> Result<PathBuf> {
    match which::which(binary) {
        Ok(path) => {
            log::info!("Using synthesis tool at {}", path.display());
            Ok(path)
        }
        Err(e) => {
            log::error!("{} command not found: {}", binary, e);
            Err(BatchError::ToolNotFound(binary.to_string()))
        }
    }
}
