//! Convenience re-exports for consumers (daemon, CLI, tests).

pub use crate::mirror::{Mirror, MirrorError};
pub use crate::remote::config::{GithubConfig, RemoteStoreConfig, StoreSetupError};
pub use crate::remote::github::GithubStore;
pub use crate::remote::memory::MemoryStore;
pub use crate::remote::{
    CommitInfo, DirectoryEntry, DirectoryListing, Document, RemoteError, RemoteStore,
};
pub use crate::sanitize::sanitize;
pub use crate::sync::{CommitReceipt, MirrorStatus, SyncEngine, SyncError};
pub use crate::version::BuildInfo;
