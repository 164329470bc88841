//! Read-modify-write synchronization against the remote store.
//!
//! Writes follow a three-step protocol: discover the document's current
//! version tag, issue a conditional write naming that tag, then reconcile
//! the local mirror with the committed bytes. Concurrency control lives
//! entirely in the remote store's tag check; the engine never locks or
//! queues per path, and it never retries a conflict on the caller's
//! behalf.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::mirror::Mirror;
use crate::remote::{CommitInfo, DirectoryListing, Document, RemoteError, RemoteStore};

mod tracks;

pub use tracks::{track_path, RECORDS_DIR};

/// Orchestrates the remote store and the local mirror.
#[derive(Clone)]
pub struct SyncEngine {
    store: Arc<dyn RemoteStore>,
    mirror: Mirror,
}

/// Outcome of a successful write.
///
/// The remote commit has landed by the time a receipt exists; `mirror`
/// reports separately whether the local copy caught up, so a mirror
/// failure never masks or reverts the commit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitReceipt {
    pub path: String,
    pub version_tag: String,
    pub commit: CommitInfo,
    pub mirror: MirrorStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MirrorStatus {
    Synced,
    Failed(String),
}

impl MirrorStatus {
    pub fn is_synced(&self) -> bool {
        matches!(self, Self::Synced)
    }

    pub fn failure(&self) -> Option<&str> {
        match self {
            Self::Synced => None,
            Self::Failed(reason) => Some(reason),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// A concurrent writer changed the document between the version-tag
    /// read and the conditional write. Not retried here; callers
    /// re-fetch and resubmit.
    #[error("version conflict on '{path}' (expected tag {expected:?})")]
    Conflict {
        path: String,
        expected: Option<String>,
    },
    #[error("not a directory: {0}")]
    NotADirectory(String),
    #[error("remote store unavailable: {0}")]
    Unavailable(RemoteError),
}

impl SyncEngine {
    pub fn new(store: Arc<dyn RemoteStore>, mirror: Mirror) -> Self {
        Self { store, mirror }
    }

    pub fn mirror(&self) -> &Mirror {
        &self.mirror
    }

    /// Read a document straight from the remote store.
    ///
    /// The mirror is never consulted, so reads always reflect the remote
    /// store's current state at the cost of a round trip.
    pub async fn read(&self, path: &str) -> Result<Option<Document>, SyncError> {
        self.store.get(path).await.map_err(SyncError::Unavailable)
    }

    /// List the entries under a directory path, in remote order.
    pub async fn list(&self, path: &str) -> Result<Option<DirectoryListing>, SyncError> {
        self.store.list(path).await.map_err(|err| match err {
            RemoteError::NotADirectory(path) => SyncError::NotADirectory(path),
            other => SyncError::Unavailable(other),
        })
    }

    /// Commit new content for a logical path.
    pub async fn write(
        &self,
        path: &str,
        content: &str,
        message: Option<&str>,
    ) -> Result<CommitReceipt, SyncError> {
        let message = message
            .map(str::to_string)
            .unwrap_or_else(|| format!("update {}", path));

        // Step 1: discover the current tag. Absence means first write.
        let current = self.store.get(path).await.map_err(SyncError::Unavailable)?;
        let expected = current.map(|doc| doc.version_tag);
        tracing::debug!(path = %path, tag = ?expected, "writing document");

        // Step 2: conditional write. A writer that slipped in since step 1
        // surfaces as a conflict from the store.
        let (version_tag, commit) = self
            .store
            .put(path, content, &message, expected.as_deref())
            .await
            .map_err(|err| match err {
                RemoteError::VersionConflict { path, expected } => {
                    SyncError::Conflict { path, expected }
                }
                other => SyncError::Unavailable(other),
            })?;

        // Step 3: reconcile the mirror. The commit already landed, so a
        // failure here is reported on the receipt instead of returned.
        let mirror = match self.mirror.sync(path, content).await {
            Ok(()) => MirrorStatus::Synced,
            Err(err) => {
                tracing::warn!(
                    path = %path,
                    error = %err,
                    "remote commit succeeded but mirror write failed"
                );
                MirrorStatus::Failed(err.to_string())
            }
        };

        tracing::info!(path = %path, tag = %version_tag, "document committed");
        Ok(CommitReceipt {
            path: path.to_string(),
            version_tag,
            commit,
            mirror,
        })
    }
}
