//! Service startup and shutdown.

use std::net::SocketAddr;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::http_server;
use crate::service_config::Config;
use crate::service_state::{State, StateSetupError};

/// Handle for stopping a running service.
pub struct ShutdownHandle {
    shutdown_tx: oneshot::Sender<()>,
    handle: JoinHandle<()>,
}

impl ShutdownHandle {
    /// Signal graceful shutdown and wait for the server task to finish.
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(());
        let _ = self.handle.await;
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("state setup failed: {0}")]
    StateSetup(#[from] StateSetupError),
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        source: std::io::Error,
    },
}

/// Bind the API listener and serve in a background task.
///
/// Returns the bound address (useful with port 0) and a shutdown handle.
pub async fn start_service(config: &Config) -> Result<(SocketAddr, ShutdownHandle), ServiceError> {
    let state = State::from_config(config)?;
    let app = http_server::router(state, config.public_dir.clone());

    let listener = tokio::net::TcpListener::bind(config.api_listen_addr)
        .await
        .map_err(|source| ServiceError::Bind {
            addr: config.api_listen_addr,
            source,
        })?;
    let local_addr = listener.local_addr().map_err(|source| ServiceError::Bind {
        addr: config.api_listen_addr,
        source,
    })?;
    tracing::info!("API listening on {}", local_addr);

    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    let handle = tokio::spawn(async move {
        let serve = axum::serve(listener, app).with_graceful_shutdown(async {
            let _ = shutdown_rx.await;
        });
        if let Err(err) = serve.await {
            tracing::error!("server error: {}", err);
        }
    });

    Ok((local_addr, ShutdownHandle {
        shutdown_tx,
        handle,
    }))
}

/// Run the service until ctrl-c.
pub async fn spawn_service(config: &Config) {
    match start_service(config).await {
        Ok((_, handle)) => {
            if let Err(err) = tokio::signal::ctrl_c().await {
                tracing::error!("failed to listen for shutdown signal: {}", err);
            }
            tracing::info!("shutting down");
            handle.shutdown().await;
        }
        Err(err) => {
            tracing::error!("failed to start service: {}", err);
        }
    }
}
