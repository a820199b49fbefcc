use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::errors::{JsonDbError, JsonDbResult};

/// Destination of encoded collection snapshots.
///
/// The writer guarantees at most one call in flight per path, so an
/// implementation does not need to coordinate writes to the same file.
pub trait FileSink: Send + Sync {
    /// Replaces the content of `path` with `bytes`.
    fn write(&self, path: &Path, bytes: &[u8]) -> JsonDbResult<()>;
}

/// Writes snapshots to the local filesystem.
///
/// The bytes go to a sibling temporary file first, which is synced and then
/// renamed over the target, so readers see either the previous or the new
/// content and never a torn file.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiskSink;

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

impl FileSink for DiskSink {
    fn write(&self, path: &Path, bytes: &[u8]) -> JsonDbResult<()> {
        let temp = temp_path(path);
        let result = File::create(&temp)
            .and_then(|mut file| {
                file.write_all(bytes)?;
                file.sync_all()
            })
            .and_then(|_| fs::rename(&temp, path));

        match result {
            Ok(()) => Ok(()),
            Err(err) => {
                let _ = fs::remove_file(&temp);
                log::error!("Failed to write {}: {}", path.display(), err);
                Err(JsonDbError::from(err))
            }
        }
    }
}
