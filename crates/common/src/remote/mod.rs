//! Capability interface over a versioned remote document store.
//!
//! The remote store is the sole source of truth for document content. Every
//! document carries an opaque version tag that changes on each successful
//! write; conditional writes name the tag they expect and are rejected on a
//! mismatch, which is the only concurrency control in the system.

use serde::{Deserialize, Serialize};

pub mod config;
pub mod github;
pub mod memory;

pub use config::{GithubConfig, RemoteStoreConfig, StoreSetupError};
pub use github::GithubStore;
pub use memory::MemoryStore;

/// A document as read from the remote store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Slash-separated logical path within the store.
    pub path: String,
    /// Text payload.
    pub content: String,
    /// Opaque revision tag for the current content.
    pub version_tag: String,
}

/// One entry of a directory listing, in the order the remote returned it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryEntry {
    pub name: String,
    pub path: String,
    pub version_tag: String,
}

pub type DirectoryListing = Vec<DirectoryEntry>;

/// Metadata of the commit a successful write produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitInfo {
    pub sha: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    /// The path resolves to a single document, not a collection.
    #[error("not a directory: {0}")]
    NotADirectory(String),
    /// The conditional write named a tag that no longer matches, or
    /// violated first-write semantics.
    #[error("version conflict on '{path}' (expected tag {expected:?})")]
    VersionConflict {
        path: String,
        expected: Option<String>,
    },
    /// Transport, auth, or rate-limit failure; cause preserved for logs.
    #[error("remote store unavailable: {message}")]
    Unavailable {
        status: Option<u16>,
        message: String,
    },
}

impl RemoteError {
    pub(crate) fn transport(err: reqwest::Error) -> Self {
        Self::Unavailable {
            status: err.status().map(|s| s.as_u16()),
            message: err.to_string(),
        }
    }

    pub(crate) fn http(status: reqwest::StatusCode, body: String) -> Self {
        Self::Unavailable {
            status: Some(status.as_u16()),
            message: format!("{}: {}", status, body),
        }
    }
}

/// Versioned document store operations.
///
/// The ref (branch) every operation runs against is fixed at client
/// construction and does not vary per call. `get` and `list` report an
/// absent path as `Ok(None)`; absence is an expected outcome, not a
/// failure.
#[async_trait::async_trait]
pub trait RemoteStore: Send + Sync {
    /// Fetch a document and its current version tag.
    async fn get(&self, path: &str) -> Result<Option<Document>, RemoteError>;

    /// List the entries under a directory path.
    async fn list(&self, path: &str) -> Result<Option<DirectoryListing>, RemoteError>;

    /// Create or update a document.
    ///
    /// With `expected_tag` the store must reject the write unless the tag
    /// matches the document's current one. Without it the path must not
    /// yet exist (first-write semantics). Returns the new version tag and
    /// the commit that carried the write.
    async fn put(
        &self,
        path: &str,
        content: &str,
        message: &str,
        expected_tag: Option<&str>,
    ) -> Result<(String, CommitInfo), RemoteError>;
}
