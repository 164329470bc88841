//! Integration tests for the write protocol: round trips, conflicts, and
//! mirror reconciliation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use common::prelude::*;
use common::remote::CommitInfo;

fn engine_with_mirror(root: &std::path::Path) -> SyncEngine {
    SyncEngine::new(Arc::new(MemoryStore::new()), Mirror::new(root))
}

#[tokio::test]
async fn write_then_read_round_trip() {
    let tmp = tempfile::tempdir().unwrap();
    let engine = engine_with_mirror(tmp.path());

    let receipt = engine
        .write("notes/plan.md", "first draft", None)
        .await
        .unwrap();
    assert!(!receipt.version_tag.is_empty());
    assert!(!receipt.commit.sha.is_empty());
    assert!(receipt.mirror.is_synced());

    let doc = engine.read("notes/plan.md").await.unwrap().unwrap();
    assert_eq!(doc.content, "first draft");
    assert_eq!(doc.version_tag, receipt.version_tag);
}

#[tokio::test]
async fn rewrite_refetches_the_current_tag() {
    let tmp = tempfile::tempdir().unwrap();
    let engine = engine_with_mirror(tmp.path());

    let first = engine.write("doc.txt", "one", None).await.unwrap();
    let second = engine.write("doc.txt", "two", None).await.unwrap();
    assert_ne!(first.version_tag, second.version_tag);

    let doc = engine.read("doc.txt").await.unwrap().unwrap();
    assert_eq!(doc.content, "two");
}

#[tokio::test]
async fn default_commit_message_names_the_path() {
    let tmp = tempfile::tempdir().unwrap();
    let engine = engine_with_mirror(tmp.path());

    let receipt = engine.write("doc.txt", "content", None).await.unwrap();
    assert_eq!(receipt.commit.message.as_deref(), Some("update doc.txt"));

    let receipt = engine
        .write("doc.txt", "more", Some("tweak wording"))
        .await
        .unwrap();
    assert_eq!(receipt.commit.message.as_deref(), Some("tweak wording"));
}

#[tokio::test]
async fn reading_a_missing_path_is_not_an_error() {
    let tmp = tempfile::tempdir().unwrap();
    let engine = engine_with_mirror(tmp.path());

    assert!(engine.read("ghost.txt").await.unwrap().is_none());
}

#[tokio::test]
async fn mirror_matches_committed_content() {
    let tmp = tempfile::tempdir().unwrap();
    let engine = engine_with_mirror(tmp.path());

    engine
        .write("notes/2024/plan.md", "mirror me", None)
        .await
        .unwrap();

    let mirrored = std::fs::read(tmp.path().join("notes/2024/plan.md")).unwrap();
    assert_eq!(mirrored, b"mirror me");
}

#[tokio::test]
async fn reads_bypass_the_mirror() {
    let tmp = tempfile::tempdir().unwrap();
    let store = Arc::new(MemoryStore::new());
    let engine = SyncEngine::new(store.clone(), Mirror::new(tmp.path()));

    engine.write("doc.txt", "remote", None).await.unwrap();
    // Corrupt the mirror copy; reads must not notice.
    std::fs::write(tmp.path().join("doc.txt"), "stale local").unwrap();

    let doc = engine.read("doc.txt").await.unwrap().unwrap();
    assert_eq!(doc.content, "remote");
}

#[tokio::test]
async fn mirror_failure_is_partial_success() {
    let tmp = tempfile::tempdir().unwrap();
    // A plain file where the mirror needs a directory.
    std::fs::write(tmp.path().join("blocked"), b"file").unwrap();
    let store = Arc::new(MemoryStore::new());
    let engine = SyncEngine::new(store.clone(), Mirror::new(tmp.path()));

    let receipt = engine
        .write("blocked/doc.txt", "content", None)
        .await
        .unwrap();

    // The remote commit stands even though the mirror write failed.
    assert!(!receipt.version_tag.is_empty());
    assert!(!receipt.mirror.is_synced());
    assert!(receipt.mirror.failure().is_some());
    let doc = engine.read("blocked/doc.txt").await.unwrap().unwrap();
    assert_eq!(doc.content, "content");
}

#[tokio::test]
async fn listing_a_document_is_not_a_directory() {
    let tmp = tempfile::tempdir().unwrap();
    let engine = engine_with_mirror(tmp.path());

    engine.write("notes/a.md", "a", None).await.unwrap();

    let err = engine.list("notes/a.md").await.unwrap_err();
    assert!(matches!(err, SyncError::NotADirectory(path) if path == "notes/a.md"));

    // A real directory lists, a missing one is absent - neither is an error.
    let listing = engine.list("notes").await.unwrap().unwrap();
    assert_eq!(listing.len(), 1);
    assert_eq!(listing[0].path, "notes/a.md");
    assert!(engine.list("nowhere").await.unwrap().is_none());
}

#[tokio::test]
async fn stale_tag_is_rejected_by_the_store() {
    let store = MemoryStore::new();
    let (stale_tag, _) = store.put("doc.txt", "one", "m", None).await.unwrap();
    let (current_tag, _) = store
        .put("doc.txt", "two", "m", Some(&stale_tag))
        .await
        .unwrap();

    let err = store
        .put("doc.txt", "three", "m", Some(&stale_tag))
        .await
        .unwrap_err();
    assert!(matches!(err, RemoteError::VersionConflict { .. }));

    store
        .put("doc.txt", "three", "m", Some(&current_tag))
        .await
        .unwrap();
}

/// Store double that simulates a concurrent writer landing between the
/// engine's tag read and its conditional write.
#[derive(Clone)]
struct RacingStore {
    inner: MemoryStore,
    race_pending: Arc<AtomicBool>,
}

#[async_trait::async_trait]
impl RemoteStore for RacingStore {
    async fn get(&self, path: &str) -> Result<Option<Document>, RemoteError> {
        let seen = self.inner.get(path).await?;
        if self.race_pending.swap(false, Ordering::SeqCst) {
            // Another writer slips in after this read.
            let current = seen.as_ref().map(|doc| doc.version_tag.clone());
            self.inner
                .put(path, "sneaky update", "concurrent writer", current.as_deref())
                .await?;
        }
        Ok(seen)
    }

    async fn list(&self, path: &str) -> Result<Option<DirectoryListing>, RemoteError> {
        self.inner.list(path).await
    }

    async fn put(
        &self,
        path: &str,
        content: &str,
        message: &str,
        expected_tag: Option<&str>,
    ) -> Result<(String, CommitInfo), RemoteError> {
        self.inner.put(path, content, message, expected_tag).await
    }
}

#[tokio::test]
async fn concurrent_writer_surfaces_as_conflict() {
    let tmp = tempfile::tempdir().unwrap();
    let race_pending = Arc::new(AtomicBool::new(false));
    let store = RacingStore {
        inner: MemoryStore::new(),
        race_pending: race_pending.clone(),
    };
    let engine = SyncEngine::new(Arc::new(store), Mirror::new(tmp.path()));

    engine.write("doc.txt", "original", None).await.unwrap();

    // Next write reads a tag that a concurrent writer immediately stales.
    race_pending.store(true, Ordering::SeqCst);
    let err = engine.write("doc.txt", "mine", None).await.unwrap_err();
    assert!(matches!(err, SyncError::Conflict { .. }));

    // The concurrent writer's content won; ours was never applied.
    let doc = engine.read("doc.txt").await.unwrap().unwrap();
    assert_eq!(doc.content, "sneaky update");

    // No conflict once the engine re-reads the fresh tag.
    engine.write("doc.txt", "mine", None).await.unwrap();
    let doc = engine.read("doc.txt").await.unwrap().unwrap();
    assert_eq!(doc.content, "mine");
}
