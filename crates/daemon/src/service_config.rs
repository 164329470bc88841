use std::net::SocketAddr;
use std::path::PathBuf;

use common::prelude::RemoteStoreConfig;

/// Service configuration, assembled once at startup and passed into
/// construction - nothing in the core reads ambient globals.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP API binds on. Port 0 picks an ephemeral port.
    pub api_listen_addr: SocketAddr,
    /// Which remote store backs the service, including the fixed ref.
    pub remote: RemoteStoreConfig,
    /// Root of the local write-through mirror.
    pub mirror_root: PathBuf,
    /// Static files served at the root, if any.
    pub public_dir: Option<PathBuf>,
    /// Default log level when RUST_LOG is unset.
    pub log_level: tracing::Level,
}
