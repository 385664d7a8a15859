//! Run-scoped scratch storage for submitted programs.
//!
//! Every run writes its artifact into `<root>/<uuid>/program.bpasm`, so
//! concurrent submissions never share a file. A run directory that was not
//! cleaned up explicitly is removed when its [`Workspace`] is dropped, so a
//! cancelled request does not leave its source behind.

use crate::error::{WorkspaceError, WorkspaceResult};
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};
use uuid::Uuid;

/// File name of the artifact inside a run directory
pub const ARTIFACT_FILE_NAME: &str = "program.bpasm";

/// Scratch directory owned by a single run
#[derive(Debug)]
pub struct Workspace {
    run_id: Uuid,
    run_dir: PathBuf,
    artifact: PathBuf,
    removed: bool,
}

impl Workspace {
    /// Ensure `root` exists and create a fresh run directory beneath it.
    pub async fn prepare(root: &Path) -> WorkspaceResult<Self> {
        // create_dir_all treats an existing directory as success
        tokio::fs::create_dir_all(root)
            .await
            .map_err(|source| WorkspaceError::CreateDir {
                path: root.to_path_buf(),
                source,
            })?;

        let run_id = Uuid::new_v4();
        let run_dir = root.join(run_id.to_string());
        tokio::fs::create_dir(&run_dir)
            .await
            .map_err(|source| WorkspaceError::CreateDir {
                path: run_dir.clone(),
                source,
            })?;

        debug!(%run_id, dir = %run_dir.display(), "workspace prepared");

        let artifact = run_dir.join(ARTIFACT_FILE_NAME);
        Ok(Self {
            run_id,
            run_dir,
            artifact,
            removed: false,
        })
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    pub fn run_dir(&self) -> &Path {
        &self.run_dir
    }

    /// Where the artifact lives once written
    pub fn artifact_path(&self) -> &Path {
        &self.artifact
    }

    /// Write `source` as the run's artifact, replacing any earlier content.
    pub async fn write_artifact(&self, source: &[u8]) -> WorkspaceResult<()> {
        let write_err = |source: std::io::Error| WorkspaceError::WriteArtifact {
            path: self.artifact.clone(),
            source,
        };

        let mut file = tokio::fs::File::create(&self.artifact)
            .await
            .map_err(write_err)?;
        file.write_all(source).await.map_err(write_err)?;
        // Surface close-time errors instead of losing them in Drop
        file.sync_all().await.map_err(write_err)?;

        Ok(())
    }

    /// Remove the run directory and everything in it.
    pub async fn cleanup(mut self) -> WorkspaceResult<()> {
        let result = tokio::fs::remove_dir_all(&self.run_dir).await;
        self.removed = true;
        result.map_err(|source| WorkspaceError::Cleanup {
            path: self.run_dir.clone(),
            source,
        })
    }

    /// Like [`Workspace::cleanup`], logging instead of returning failures.
    pub async fn discard(self) {
        let run_id = self.run_id;
        if let Err(e) = self.cleanup().await {
            warn!(%run_id, "workspace cleanup failed: {}", e);
        }
    }
}

impl Drop for Workspace {
    fn drop(&mut self) {
        if self.removed {
            return;
        }
        // Reached when the owning future is dropped mid-run
        match std::fs::remove_dir_all(&self.run_dir) {
            Ok(()) => debug!(run_id = %self.run_id, "abandoned workspace removed"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!(run_id = %self.run_id, "abandoned workspace not removed: {}", e),
        }
    }
}
