//! Atomic file output.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

use crate::WriteResult;

/// Write `bytes` to `path` atomically.
///
/// The content goes to a temporary file in the target directory first
/// and is renamed into place only once fully written, so readers never
/// observe a partial artifact and a failed write leaves nothing behind
/// at `path`.
///
/// # Errors
///
/// Returns [`WriteError::Io`](crate::WriteError::Io) when the temporary
/// file cannot be created, written, or renamed into place.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> WriteResult<()> {
    let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
    let mut tmp = match dir {
        Some(dir) => NamedTempFile::new_in(dir)?,
        None => NamedTempFile::new()?,
    };
    tmp.write_all(bytes)?;
    tmp.persist(path).map_err(|e| crate::WriteError::Io(e.error))?;
    debug!(path = %path.display(), bytes = bytes.len(), "wrote output file");
    Ok(())
}
