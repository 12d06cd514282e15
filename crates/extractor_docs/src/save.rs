use std::io::Write;
use std::path::Path;

use extractor_core::ExtractorError;
use tempfile::NamedTempFile;
use tracing::info;

/// Write `bytes` to `path` without ever leaving a partial file behind.
///
/// The content goes to a temporary file in the destination directory first
/// and is renamed into place once fully written.
pub fn save_atomic(path: &Path, bytes: &[u8]) -> Result<(), ExtractorError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(|e| {
        ExtractorError::Export(format!("failed to create {}: {e}", dir.display()))
    })?;

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| {
        ExtractorError::Export(format!("failed to create temp file in {}: {e}", dir.display()))
    })?;
    tmp.write_all(bytes)
        .and_then(|_| tmp.flush())
        .map_err(|e| ExtractorError::Export(format!("failed to write temp file: {e}")))?;
    tmp.persist(path).map_err(|e| {
        ExtractorError::Export(format!("failed to move file into {}: {}", path.display(), e.error))
    })?;

    info!(path = %path.display(), bytes = bytes.len(), "saved export");
    Ok(())
}
