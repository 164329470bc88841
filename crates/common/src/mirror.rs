//! Write-through local mirror of committed remote content.
//!
//! The mirror is a derived copy: it is written immediately after a remote
//! commit succeeds and is never consulted on reads or deleted by this
//! crate. A mirror that drifts from the remote store (out-of-band edits,
//! a crash between commit and mirror write) stays stale until the next
//! successful write to the same path; there is no reconciliation pass.

use std::path::{Path, PathBuf};

/// Local filesystem mirror rooted at a fixed directory.
#[derive(Debug, Clone)]
pub struct Mirror {
    root: PathBuf,
}

impl Mirror {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Local path a logical path maps to, structurally identical to the
    /// remote layout.
    pub fn local_path(&self, path: &str) -> PathBuf {
        self.root.join(path.trim_start_matches('/'))
    }

    /// Write committed content to the mirror, creating intermediate
    /// directories as needed.
    pub async fn sync(&self, path: &str, content: &str) -> Result<(), MirrorError> {
        let target = self.local_path(path);
        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| MirrorError::CreateDir {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }
        tokio::fs::write(&target, content.as_bytes())
            .await
            .map_err(|source| MirrorError::Write {
                path: target.clone(),
                source,
            })?;
        tracing::debug!(path = %path, target = %target.display(), "mirrored committed content");
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum MirrorError {
    #[error("failed to create mirror directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write mirror file {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn creates_intermediate_directories() {
        let tmp = tempfile::tempdir().unwrap();
        let mirror = Mirror::new(tmp.path());

        mirror.sync("notes/2024/plan.md", "lines").await.unwrap();

        let written = tokio::fs::read_to_string(tmp.path().join("notes/2024/plan.md"))
            .await
            .unwrap();
        assert_eq!(written, "lines");
    }

    #[tokio::test]
    async fn overwrites_previous_copy() {
        let tmp = tempfile::tempdir().unwrap();
        let mirror = Mirror::new(tmp.path());

        mirror.sync("doc.txt", "one").await.unwrap();
        mirror.sync("doc.txt", "two").await.unwrap();

        let written = tokio::fs::read_to_string(tmp.path().join("doc.txt"))
            .await
            .unwrap();
        assert_eq!(written, "two");
    }

    #[tokio::test]
    async fn reports_unwritable_target() {
        let tmp = tempfile::tempdir().unwrap();
        // Occupy the would-be directory with a plain file.
        tokio::fs::write(tmp.path().join("blocked"), b"file")
            .await
            .unwrap();
        let mirror = Mirror::new(tmp.path());

        let err = mirror.sync("blocked/doc.txt", "content").await.unwrap_err();
        assert!(matches!(err, MirrorError::CreateDir { .. }));
    }
}
