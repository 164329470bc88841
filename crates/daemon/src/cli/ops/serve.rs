use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Args;
use url::Url;

use common::prelude::{GithubConfig, RemoteStoreConfig};
use trackd_daemon::{spawn_service, ServiceConfig};

#[derive(Args, Debug, Clone)]
pub struct Serve {
    /// Address to bind the HTTP API on
    #[arg(long, env = "TRACKD_LISTEN_ADDR", default_value = "0.0.0.0:8080")]
    pub listen: SocketAddr,

    /// Owner of the GitHub repository holding the documents
    #[arg(long, env = "TRACKD_GITHUB_OWNER")]
    pub owner: Option<String>,

    /// Name of the GitHub repository
    #[arg(long, env = "TRACKD_GITHUB_REPO")]
    pub repo: Option<String>,

    /// Branch that fixes the ref for every remote operation
    #[arg(long, env = "TRACKD_GITHUB_BRANCH", default_value = "main")]
    pub branch: String,

    /// Access token with contents read/write scope
    #[arg(long, env = "TRACKD_GITHUB_TOKEN")]
    pub token: Option<String>,

    /// Contents API base URL (override for GitHub Enterprise)
    #[arg(
        long,
        env = "TRACKD_GITHUB_API",
        default_value = "https://api.github.com"
    )]
    pub api_base: Url,

    /// Keep documents in process memory instead of a remote repository
    #[arg(long)]
    pub ephemeral: bool,

    /// Root directory of the local mirror
    #[arg(long, env = "TRACKD_MIRROR_ROOT", default_value = ".")]
    pub mirror_root: PathBuf,

    /// Directory of static files to serve at the root
    #[arg(long, env = "TRACKD_PUBLIC_DIR")]
    pub public_dir: Option<PathBuf>,
}

#[derive(Debug, thiserror::Error)]
pub enum ServeError {
    #[error("missing required option: --{0} (or its environment variable)")]
    MissingOption(&'static str),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Serve {
    type Error = ServeError;
    type Output = String;

    async fn execute(&self, _ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let remote = if self.ephemeral {
            RemoteStoreConfig::Memory
        } else {
            RemoteStoreConfig::Github(GithubConfig {
                owner: self
                    .owner
                    .clone()
                    .ok_or(ServeError::MissingOption("owner"))?,
                repo: self.repo.clone().ok_or(ServeError::MissingOption("repo"))?,
                branch: self.branch.clone(),
                token: self
                    .token
                    .clone()
                    .ok_or(ServeError::MissingOption("token"))?,
                api_base: self.api_base.clone(),
            })
        };

        let config = ServiceConfig {
            api_listen_addr: self.listen,
            remote,
            mirror_root: self.mirror_root.clone(),
            public_dir: self.public_dir.clone(),
            log_level: tracing::Level::INFO,
        };

        spawn_service(&config).await;
        Ok("service ended".to_string())
    }
}
