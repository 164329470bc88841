use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};

use common::prelude::SyncError;

use crate::http_server::api::client::ApiRequest;
use crate::ServiceState;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetTrackRequest {
    /// Display name of the track
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetTrackResponse {
    pub content: String,
    pub sha: String,
    /// Storage path the name resolved to
    pub path: String,
}

pub async fn handler(
    State(state): State<ServiceState>,
    Query(req): Query<GetTrackRequest>,
) -> Result<impl IntoResponse, GetTrackError> {
    let name = req
        .name
        .filter(|n| !n.is_empty())
        .ok_or(GetTrackError::MissingName)?;

    let doc = state
        .engine()
        .read_track(&name)
        .await?
        .ok_or_else(|| GetTrackError::NotFound(name.clone()))?;

    Ok((
        http::StatusCode::OK,
        Json(GetTrackResponse {
            content: doc.content,
            sha: doc.version_tag,
            path: doc.path,
        }),
    )
        .into_response())
}

#[derive(Debug, thiserror::Error)]
pub enum GetTrackError {
    #[error("missing required query parameter: name")]
    MissingName,
    #[error("track not found: {0}")]
    NotFound(String),
    #[error("sync error: {0}")]
    Sync(#[from] SyncError),
}

impl IntoResponse for GetTrackError {
    fn into_response(self) -> Response {
        match self {
            GetTrackError::MissingName => {
                (http::StatusCode::BAD_REQUEST, format!("Bad request: {}", self)).into_response()
            }
            GetTrackError::NotFound(name) => {
                (http::StatusCode::NOT_FOUND, format!("Not found: {}", name)).into_response()
            }
            GetTrackError::Sync(err) => {
                tracing::error!("track read failed: {}", err);
                (
                    http::StatusCode::INTERNAL_SERVER_ERROR,
                    "Remote store error".to_string(),
                )
                    .into_response()
            }
        }
    }
}

impl ApiRequest for GetTrackRequest {
    type Response = GetTrackResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> RequestBuilder {
        let full_url = base_url.join("/api/track").unwrap();
        client
            .get(full_url)
            .query(&[("name", self.name.as_deref().unwrap_or(""))])
    }
}
