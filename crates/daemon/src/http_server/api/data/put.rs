use axum::extract::{Json, State};
use axum::response::{IntoResponse, Response};
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};

use common::prelude::SyncError;
use common::remote::CommitInfo;

use crate::http_server::api::client::ApiRequest;
use crate::ServiceState;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PutDataRequest {
    /// Logical path to write
    pub path: Option<String>,
    /// New document content
    pub content: Option<String>,
    /// Commit message; defaults to one naming the path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PutDataResponse {
    pub ok: bool,
    /// Version tag of the committed content
    pub sha: String,
    pub commit: CommitInfo,
    /// Whether the local mirror caught up with the commit
    pub mirrored: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mirror_error: Option<String>,
}

pub async fn handler(
    State(state): State<ServiceState>,
    Json(req): Json<PutDataRequest>,
) -> Result<impl IntoResponse, PutDataError> {
    let path = req
        .path
        .filter(|p| !p.is_empty())
        .ok_or(PutDataError::MissingField("path"))?;
    let content = req.content.ok_or(PutDataError::MissingField("content"))?;

    let receipt = state
        .engine()
        .write(&path, &content, req.message.as_deref())
        .await?;

    Ok((
        http::StatusCode::OK,
        Json(PutDataResponse {
            ok: true,
            sha: receipt.version_tag,
            commit: receipt.commit,
            mirrored: receipt.mirror.is_synced(),
            mirror_error: receipt.mirror.failure().map(String::from),
        }),
    )
        .into_response())
}

#[derive(Debug, thiserror::Error)]
pub enum PutDataError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    #[error("sync error: {0}")]
    Sync(#[from] SyncError),
}

impl IntoResponse for PutDataError {
    fn into_response(self) -> Response {
        match self {
            PutDataError::MissingField(_) => {
                (http::StatusCode::BAD_REQUEST, format!("Bad request: {}", self)).into_response()
            }
            PutDataError::Sync(SyncError::Conflict { path, .. }) => (
                http::StatusCode::CONFLICT,
                format!("Version conflict: {} changed since it was read", path),
            )
                .into_response(),
            PutDataError::Sync(err) => {
                tracing::error!("commit failed: {}", err);
                (
                    http::StatusCode::INTERNAL_SERVER_ERROR,
                    "Commit failed".to_string(),
                )
                    .into_response()
            }
        }
    }
}

impl ApiRequest for PutDataRequest {
    type Response = PutDataResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> RequestBuilder {
        let full_url = base_url.join("/api/data").unwrap();
        client.post(full_url).json(&self)
    }
}
