//! In-process implementation of [`RemoteStore`].
//!
//! Backs tests and ephemeral runs with the same contract as the real
//! store: sha-like version tags, first-write semantics, and tag-mismatch
//! rejection on conditional writes.

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::RwLock;
use sha2::{Digest, Sha256};

use super::{CommitInfo, DirectoryEntry, DirectoryListing, Document, RemoteError, RemoteStore};

#[derive(Debug, Clone)]
struct StoredDocument {
    content: String,
    version_tag: String,
    revision: u64,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<BTreeMap<String, StoredDocument>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn normalize(path: &str) -> String {
        path.trim_start_matches('/').trim_end_matches('/').to_string()
    }

    /// Git-sha-shaped tag derived from the path, revision, and content.
    fn tag_for(path: &str, revision: u64, content: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(path.as_bytes());
        hasher.update(revision.to_be_bytes());
        hasher.update(content.as_bytes());
        let mut tag = hex::encode(hasher.finalize());
        tag.truncate(40);
        tag
    }

    fn commit_sha_for(path: &str, revision: u64, message: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(b"commit");
        hasher.update(path.as_bytes());
        hasher.update(revision.to_be_bytes());
        hasher.update(message.as_bytes());
        let mut sha = hex::encode(hasher.finalize());
        sha.truncate(40);
        sha
    }
}

#[async_trait::async_trait]
impl RemoteStore for MemoryStore {
    async fn get(&self, path: &str) -> Result<Option<Document>, RemoteError> {
        let path = Self::normalize(path);
        let map = self.inner.read();
        Ok(map.get(&path).map(|doc| Document {
            path: path.clone(),
            content: doc.content.clone(),
            version_tag: doc.version_tag.clone(),
        }))
    }

    async fn list(&self, path: &str) -> Result<Option<DirectoryListing>, RemoteError> {
        let path = Self::normalize(path);
        let map = self.inner.read();

        if map.contains_key(&path) {
            return Err(RemoteError::NotADirectory(path));
        }

        let prefix = if path.is_empty() {
            String::new()
        } else {
            format!("{}/", path)
        };
        let entries: DirectoryListing = map
            .iter()
            .filter(|(stored_path, _)| {
                stored_path.starts_with(&prefix)
                    && !stored_path[prefix.len()..].contains('/')
            })
            .map(|(stored_path, doc)| DirectoryEntry {
                name: stored_path[prefix.len()..].to_string(),
                path: stored_path.clone(),
                version_tag: doc.version_tag.clone(),
            })
            .collect();

        if entries.is_empty() {
            return Ok(None);
        }
        Ok(Some(entries))
    }

    async fn put(
        &self,
        path: &str,
        content: &str,
        message: &str,
        expected_tag: Option<&str>,
    ) -> Result<(String, CommitInfo), RemoteError> {
        let path = Self::normalize(path);
        let mut map = self.inner.write();

        let revision = match (map.get(&path), expected_tag) {
            (Some(existing), Some(tag)) if existing.version_tag == tag => existing.revision + 1,
            (None, None) => 1,
            // Stale tag, tag for a document that does not exist, or an
            // unconditional write to an occupied path.
            _ => {
                return Err(RemoteError::VersionConflict {
                    path,
                    expected: expected_tag.map(String::from),
                })
            }
        };

        let version_tag = Self::tag_for(&path, revision, content);
        let commit = CommitInfo {
            sha: Self::commit_sha_for(&path, revision, message),
            message: Some(message.to_string()),
        };
        map.insert(
            path,
            StoredDocument {
                content: content.to_string(),
                version_tag: version_tag.clone(),
                revision,
            },
        );

        Ok((version_tag, commit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn first_write_requires_absent_path() {
        let store = MemoryStore::new();
        let (tag, _) = store.put("doc.txt", "one", "m", None).await.unwrap();
        assert_eq!(tag.len(), 40);

        let err = store.put("doc.txt", "two", "m", None).await.unwrap_err();
        assert!(matches!(err, RemoteError::VersionConflict { .. }));
    }

    #[tokio::test]
    async fn conditional_write_checks_the_tag() {
        let store = MemoryStore::new();
        let (first_tag, _) = store.put("doc.txt", "one", "m", None).await.unwrap();

        let (second_tag, _) = store
            .put("doc.txt", "two", "m", Some(&first_tag))
            .await
            .unwrap();
        assert_ne!(first_tag, second_tag);

        // The original tag is now stale.
        let err = store
            .put("doc.txt", "three", "m", Some(&first_tag))
            .await
            .unwrap_err();
        assert!(matches!(err, RemoteError::VersionConflict { .. }));

        // The current one still works.
        store
            .put("doc.txt", "three", "m", Some(&second_tag))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn expected_tag_on_missing_path_conflicts() {
        let store = MemoryStore::new();
        let err = store
            .put("ghost.txt", "content", "m", Some("deadbeef"))
            .await
            .unwrap_err();
        assert!(matches!(err, RemoteError::VersionConflict { .. }));
    }

    #[tokio::test]
    async fn lists_only_direct_children() {
        let store = MemoryStore::new();
        store.put("notes/a.md", "a", "m", None).await.unwrap();
        store.put("notes/b.md", "b", "m", None).await.unwrap();
        store
            .put("notes/deep/c.md", "c", "m", None)
            .await
            .unwrap();

        let listing = store.list("notes").await.unwrap().unwrap();
        let names: Vec<_> = listing.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["a.md", "b.md"]);
    }

    #[tokio::test]
    async fn listing_a_document_is_not_a_directory() {
        let store = MemoryStore::new();
        store.put("notes/a.md", "a", "m", None).await.unwrap();

        let err = store.list("notes/a.md").await.unwrap_err();
        assert!(matches!(err, RemoteError::NotADirectory(path) if path == "notes/a.md"));
    }

    #[tokio::test]
    async fn missing_paths_read_as_none() {
        let store = MemoryStore::new();
        assert!(store.get("nope.txt").await.unwrap().is_none());
        assert!(store.list("nope").await.unwrap().is_none());
    }
}
