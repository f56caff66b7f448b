use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::PortagenError;

/// A per-export scratch directory, removed when this value is dropped.
///
/// Every exit path (finished stream, client disconnect, early `?`) ends
/// with the drop, so no export leaves files behind.
pub struct StagingDir {
    path: PathBuf,
    dir: Option<TempDir>,
}

impl StagingDir {
    /// Create `<base>/<portfolio_id>-<random>`, creating `base` if needed.
    pub fn create(base: &Path, portfolio_id: Uuid) -> Result<Self, PortagenError> {
        fs::create_dir_all(base)?;
        let dir = tempfile::Builder::new()
            .prefix(&format!("{portfolio_id}-"))
            .tempdir_in(base)?;
        let path = dir.path().to_path_buf();
        debug!(path = %path.display(), "staging directory created");
        Ok(Self {
            path,
            dir: Some(dir),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write `contents` to `relative` inside the staging directory.
    pub fn write(&self, relative: &str, contents: impl AsRef<[u8]>) -> Result<PathBuf, PortagenError> {
        let target = self.path.join(relative);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&target, contents)?;
        Ok(target)
    }
}

impl Drop for StagingDir {
    fn drop(&mut self) {
        let Some(dir) = self.dir.take() else {
            return;
        };
        match dir.close() {
            Ok(()) => debug!(path = %self.path.display(), "staging directory removed"),
            Err(e) => warn!(
                path = %self.path.display(),
                error = %e,
                "failed to remove staging directory"
            ),
        }
    }
}
