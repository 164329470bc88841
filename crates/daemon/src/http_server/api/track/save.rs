use axum::extract::{Json, State};
use axum::response::{IntoResponse, Response};
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};

use common::prelude::SyncError;
use common::remote::CommitInfo;

use crate::http_server::api::client::ApiRequest;
use crate::ServiceState;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveTrackRequest {
    /// Display name of the track
    pub name: Option<String>,
    /// Record content, typically a JSON document
    pub content: Option<String>,
    /// Commit message; defaults to one naming the track
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveTrackResponse {
    pub ok: bool,
    /// Storage path the name resolved to
    pub path: String,
    pub sha: String,
    pub commit: CommitInfo,
    pub mirrored: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mirror_error: Option<String>,
}

pub async fn handler(
    State(state): State<ServiceState>,
    Json(req): Json<SaveTrackRequest>,
) -> Result<impl IntoResponse, SaveTrackError> {
    let name = req
        .name
        .filter(|n| !n.is_empty())
        .ok_or(SaveTrackError::MissingField("name"))?;
    let content = req.content.ok_or(SaveTrackError::MissingField("content"))?;

    let receipt = state
        .engine()
        .save_track(&name, &content, req.message.as_deref())
        .await?;

    tracing::debug!(name = %name, path = %receipt.path, "track saved");

    Ok((
        http::StatusCode::OK,
        Json(SaveTrackResponse {
            ok: true,
            path: receipt.path,
            sha: receipt.version_tag,
            commit: receipt.commit,
            mirrored: receipt.mirror.is_synced(),
            mirror_error: receipt.mirror.failure().map(String::from),
        }),
    )
        .into_response())
}

#[derive(Debug, thiserror::Error)]
pub enum SaveTrackError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    #[error("sync error: {0}")]
    Sync(#[from] SyncError),
}

impl IntoResponse for SaveTrackError {
    fn into_response(self) -> Response {
        match self {
            SaveTrackError::MissingField(_) => {
                (http::StatusCode::BAD_REQUEST, format!("Bad request: {}", self)).into_response()
            }
            SaveTrackError::Sync(SyncError::Conflict { path, .. }) => (
                http::StatusCode::CONFLICT,
                format!("Version conflict: {} changed since it was read", path),
            )
                .into_response(),
            SaveTrackError::Sync(err) => {
                tracing::error!("track save failed: {}", err);
                (
                    http::StatusCode::INTERNAL_SERVER_ERROR,
                    "Commit failed".to_string(),
                )
                    .into_response()
            }
        }
    }
}

impl ApiRequest for SaveTrackRequest {
    type Response = SaveTrackResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> RequestBuilder {
        let full_url = base_url.join("/api/track/save").unwrap();
        client.post(full_url).json(&self)
    }
}
