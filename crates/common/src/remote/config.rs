//! Remote store selection, fixed once at process startup.

use std::sync::Arc;

use url::Url;

use super::github::GithubStore;
use super::memory::MemoryStore;
use super::RemoteStore;

/// Connection settings for a GitHub-compatible contents API.
#[derive(Clone)]
pub struct GithubConfig {
    pub owner: String,
    pub repo: String,
    /// Branch that fixes the ref for every operation this process makes.
    pub branch: String,
    pub token: String,
    /// API base, `https://api.github.com` for github.com.
    pub api_base: Url,
}

impl std::fmt::Debug for GithubConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GithubConfig")
            .field("owner", &self.owner)
            .field("repo", &self.repo)
            .field("branch", &self.branch)
            .field("token", &"<redacted>")
            .field("api_base", &self.api_base.as_str())
            .finish()
    }
}

/// Which store implementation backs the service.
#[derive(Debug, Clone)]
pub enum RemoteStoreConfig {
    Github(GithubConfig),
    /// In-process store, for tests and ephemeral runs.
    Memory,
}

impl RemoteStoreConfig {
    pub fn build(&self) -> Result<Arc<dyn RemoteStore>, StoreSetupError> {
        match self {
            Self::Github(config) => {
                tracing::info!(
                    owner = %config.owner,
                    repo = %config.repo,
                    branch = %config.branch,
                    "using github contents store"
                );
                Ok(Arc::new(GithubStore::new(config.clone())?))
            }
            Self::Memory => {
                tracing::info!("using in-memory store");
                Ok(Arc::new(MemoryStore::new()))
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreSetupError {
    #[error("invalid access token: {0}")]
    InvalidToken(#[from] reqwest::header::InvalidHeaderValue),
    #[error("failed to construct http client: {0}")]
    HttpClient(#[from] reqwest::Error),
}
