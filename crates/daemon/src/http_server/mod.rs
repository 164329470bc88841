//! HTTP surface: the document API, health probes, and static files.

use std::path::PathBuf;

use axum::routing::get;
use axum::Router;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::ServiceState;

pub mod api;
pub mod health;

pub fn router(state: ServiceState, public_dir: Option<PathBuf>) -> Router {
    let router = Router::new()
        .nest("/api", api::router())
        .route("/_status/livez", get(health::liveness::handler))
        .route("/_status/version", get(health::version::handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    match public_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir)),
        None => router,
    }
}
