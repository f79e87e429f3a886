//! Point storage: the ordered point list as one JSON file.
//!
//! DESIGN
//! ======
//! The whole list is replaced on every save. Writes go to a sibling temp file
//! that is then renamed over the target, so a crash mid-write leaves the
//! previous list intact. A `RwLock` serializes writers and keeps readers from
//! observing a rename in progress.
//!
//! ERROR HANDLING
//! ==============
//! A missing file is an empty list. Unreadable or undecodable files are
//! errors; they are never silently replaced with an empty list.

#[cfg(test)]
#[path = "points_test.rs"]
mod points_test;

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::sync::RwLock;
use tracing::{debug, info};
use wire::PointRecord;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("points file I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("points file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub struct PointFile {
    path: PathBuf,
    lock: RwLock<()>,
}

impl PointFile {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path, lock: RwLock::new(()) }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored list. A missing file yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the file exists but cannot be read or decoded.
    pub async fn load(&self) -> Result<Vec<PointRecord>, StoreError> {
        let _guard = self.lock.read().await;
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no points file yet");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Replace the stored list with `points`, in order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the temp file cannot be written or renamed.
    pub async fn save(&self, points: &[PointRecord]) -> Result<(), StoreError> {
        let body = serde_json::to_vec(points)?;
        let tmp = self.temp_path();

        let _guard = self.lock.write().await;
        tokio::fs::write(&tmp, &body).await?;
        if let Err(e) = tokio::fs::rename(&tmp, &self.path).await {
            if let Err(cleanup) = tokio::fs::remove_file(&tmp).await {
                debug!(error = %cleanup, path = %tmp.display(), "temp file cleanup failed");
            }
            return Err(e.into());
        }

        info!(count = points.len(), path = %self.path.display(), "points saved");
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().map(std::ffi::OsStr::to_os_string).unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
