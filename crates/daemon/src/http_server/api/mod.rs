//! Document API endpoints.

use axum::routing::{get, post};
use axum::Router;

use crate::ServiceState;

pub mod client;
pub mod data;
pub mod list;
pub mod track;

pub fn router() -> Router<ServiceState> {
    Router::new()
        .route("/data", get(data::get::handler).post(data::put::handler))
        .route("/list", get(list::handler))
        .route("/track/save", post(track::save::handler))
        .route("/track", get(track::get::handler))
}
