//! Scoped temporary artifacts.
//!
//! A [`TempArtifact`] owns one file in the working directory. The file is
//! removed exactly once, when the handle is dropped, on every exit path of
//! the code holding it (success, `?` propagation, panic unwinding, or the
//! future being cancelled).

use std::io;
use std::path::{Path, PathBuf};

use uuid::Uuid;

/// Collision-resistant file name: a fresh UUID v4 in simple (hex) form.
pub fn unique_name() -> String {
    Uuid::new_v4().simple().to_string()
}

/// A file removed when this handle goes out of scope.
#[derive(Debug)]
pub struct TempArtifact {
    path: PathBuf,
}

impl TempArtifact {
    /// Write `contents` to a new uniquely named file under `dir`.
    ///
    /// The handle exists before the write starts, so a failed or partial
    /// write is cleaned up as well.
    pub async fn persist(dir: &Path, contents: &[u8]) -> io::Result<Self> {
        let artifact = Self {
            path: dir.join(unique_name()),
        };
        tokio::fs::write(&artifact.path, contents).await?;
        Ok(artifact)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempArtifact {
    fn drop(&mut self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => tracing::debug!(path = %self.path.display(), "Temporary file removed"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::warn!(path = %self.path.display(), "Temporary file already gone");
            }
            Err(e) => {
                tracing::error!(path = %self.path.display(), error = %e, "Failed to remove temporary file");
            }
        }
    }
}
