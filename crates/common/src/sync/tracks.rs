//! Name-addressed track records.
//!
//! A track is stored at `records/<token>.json` where the token is the
//! sanitized display name. Same write protocol and guarantees as
//! path-addressed documents; only the path derivation and the default
//! commit message differ.

use crate::remote::Document;
use crate::sanitize::sanitize;

use super::{CommitReceipt, SyncEngine, SyncError};

/// Directory all track records live under.
pub const RECORDS_DIR: &str = "records";

/// Storage path for a track display name.
pub fn track_path(name: &str) -> String {
    format!("{}/{}.json", RECORDS_DIR, sanitize(name))
}

impl SyncEngine {
    /// Save a track record under its sanitized name.
    pub async fn save_track(
        &self,
        name: &str,
        content: &str,
        message: Option<&str>,
    ) -> Result<CommitReceipt, SyncError> {
        let path = track_path(name);
        let message = message
            .map(str::to_string)
            .unwrap_or_else(|| format!("save track '{}'", name));
        self.write(&path, content, Some(&message)).await
    }

    /// Read a track record by display name.
    pub async fn read_track(&self, name: &str) -> Result<Option<Document>, SyncError> {
        self.read(&track_path(name)).await
    }
}
