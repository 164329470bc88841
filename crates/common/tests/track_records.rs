//! End-to-end behavior of name-addressed track records.

use std::sync::Arc;

use common::prelude::*;
use common::sync::{track_path, RECORDS_DIR};

fn engine(root: &std::path::Path) -> SyncEngine {
    SyncEngine::new(Arc::new(MemoryStore::new()), Mirror::new(root))
}

#[tokio::test]
async fn save_and_read_by_display_name() {
    let tmp = tempfile::tempdir().unwrap();
    let engine = engine(tmp.path());
    let content = serde_json::json!({"bpm": 120}).to_string();

    let receipt = engine
        .save_track("Night Drive", &content, None)
        .await
        .unwrap();
    assert_eq!(receipt.path, "records/night-drive.json");
    assert!(receipt.mirror.is_synced());

    // Any spelling that sanitizes to the same token resolves to the
    // same record.
    for name in ["Night Drive", "NIGHT DRIVE!!", "night   drive"] {
        let doc = engine.read_track(name).await.unwrap().unwrap();
        assert_eq!(doc.path, "records/night-drive.json");
        assert_eq!(doc.content, content);
    }
}

#[tokio::test]
async fn saved_records_land_in_the_mirror() {
    let tmp = tempfile::tempdir().unwrap();
    let engine = engine(tmp.path());

    engine
        .save_track("Lo-Fi_Beats", "{\"bpm\":80}", None)
        .await
        .unwrap();

    let mirrored = std::fs::read_to_string(tmp.path().join("records/lo-fi_beats.json")).unwrap();
    assert_eq!(mirrored, "{\"bpm\":80}");
}

#[tokio::test]
async fn default_message_uses_the_display_name() {
    let tmp = tempfile::tempdir().unwrap();
    let engine = engine(tmp.path());

    let receipt = engine
        .save_track("Night Drive", "{}", None)
        .await
        .unwrap();
    assert_eq!(
        receipt.commit.message.as_deref(),
        Some("save track 'Night Drive'")
    );

    let receipt = engine
        .save_track("Night Drive", "{}", Some("retune"))
        .await
        .unwrap();
    assert_eq!(receipt.commit.message.as_deref(), Some("retune"));
}

#[tokio::test]
async fn resaving_updates_the_same_record() {
    let tmp = tempfile::tempdir().unwrap();
    let engine = engine(tmp.path());

    let first = engine.save_track("Night Drive", "{\"v\":1}", None).await.unwrap();
    let second = engine
        .save_track("NIGHT DRIVE!!", "{\"v\":2}", None)
        .await
        .unwrap();

    assert_eq!(first.path, second.path);
    assert_ne!(first.version_tag, second.version_tag);

    let doc = engine.read_track("night drive").await.unwrap().unwrap();
    assert_eq!(doc.content, "{\"v\":2}");
}

#[tokio::test]
async fn record_listing_shows_saved_tracks() {
    let tmp = tempfile::tempdir().unwrap();
    let engine = engine(tmp.path());

    engine.save_track("Night Drive", "{}", None).await.unwrap();
    engine.save_track("Morning Run", "{}", None).await.unwrap();

    let listing = engine.list(RECORDS_DIR).await.unwrap().unwrap();
    let paths: Vec<_> = listing.iter().map(|e| e.path.as_str()).collect();
    assert_eq!(
        paths,
        vec!["records/morning-run.json", "records/night-drive.json"]
    );
}

#[tokio::test]
async fn missing_record_reads_as_none() {
    let tmp = tempfile::tempdir().unwrap();
    let engine = engine(tmp.path());

    assert!(engine.read_track("Never Saved").await.unwrap().is_none());
    assert_eq!(track_path("Never Saved"), "records/never-saved.json");
}
