use common::prelude::{Mirror, StoreSetupError, SyncEngine};

use crate::service_config::Config;

/// Main service state - the sync engine shared by every request handler.
#[derive(Clone)]
pub struct State {
    engine: SyncEngine,
}

impl State {
    pub fn from_config(config: &Config) -> Result<Self, StateSetupError> {
        let store = config.remote.build()?;
        let mirror = Mirror::new(config.mirror_root.clone());
        tracing::info!(root = %mirror.root().display(), "mirror root");
        Ok(Self {
            engine: SyncEngine::new(store, mirror),
        })
    }

    pub fn engine(&self) -> &SyncEngine {
        &self.engine
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StateSetupError {
    #[error("remote store setup failed: {0}")]
    StoreSetup(#[from] StoreSetupError),
}
