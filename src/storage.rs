//! Scoped temporary files for the per-request pipeline artifacts.
//!
//! Each request owns at most two files on disk: the client's upload and the
//! synthesized reply audio. Both are wrapped in [`ScopedFile`] so they are
//! deleted on every exit path, including early `?` returns — the guard's
//! `Drop` removes whatever an explicit [`ScopedFile::remove`] did not.

use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::{debug, warn};
use uuid::Uuid;

/// Build a collision-resistant file name inside `dir` for an upload of
/// `original_name` arriving under the multipart field `field`.
///
/// Concurrent requests share the upload directory, so the name combines the
/// field name, a microsecond timestamp and a UUID, keeping the original
/// extension so the provider can sniff the container format.
pub fn scoped_name(dir: &Path, field: &str, original_name: &str) -> PathBuf {
    let ext = Path::new(original_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{e}"))
        .unwrap_or_default();
    dir.join(format!(
        "{field}-{}-{}{ext}",
        Utc::now().timestamp_micros(),
        Uuid::new_v4()
    ))
}

/// A temporary file owned by one in-flight request.
///
/// Deleted explicitly via [`remove`](Self::remove) on the happy path, or by
/// `Drop` on any other exit path.
#[derive(Debug)]
pub struct ScopedFile {
    path: PathBuf,
    released: bool,
}

impl ScopedFile {
    /// Write `bytes` to `path` and take ownership of the resulting file.
    pub async fn create(path: PathBuf, bytes: &[u8]) -> std::io::Result<Self> {
        tokio::fs::write(&path, bytes).await?;
        debug!(path = %path.display(), size_bytes = bytes.len(), "scoped file written");
        Ok(Self {
            path,
            released: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Delete the file now and disarm the drop guard.
    pub async fn remove(mut self) -> std::io::Result<()> {
        self.released = true;
        tokio::fs::remove_file(&self.path).await?;
        debug!(path = %self.path.display(), "scoped file removed");
        Ok(())
    }
}

impl Drop for ScopedFile {
    fn drop(&mut self) {
        if !self.released {
            if let Err(e) = std::fs::remove_file(&self.path) {
                warn!(path = %self.path.display(), error = %e, "failed to remove scoped file on drop");
            }
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
