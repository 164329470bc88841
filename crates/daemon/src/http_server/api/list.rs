//! Directory listing endpoint.

use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};

use common::prelude::SyncError;

use crate::http_server::api::client::ApiRequest;
use crate::ServiceState;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListRequest {
    /// Logical directory path to list
    pub path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse {
    pub files: Vec<ListEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListEntry {
    pub name: String,
    pub path: String,
    pub sha: String,
}

pub async fn handler(
    State(state): State<ServiceState>,
    Query(req): Query<ListRequest>,
) -> Result<impl IntoResponse, ListError> {
    let path = req
        .path
        .filter(|p| !p.is_empty())
        .ok_or(ListError::MissingPath)?;

    let listing = state
        .engine()
        .list(&path)
        .await
        .map_err(|err| match err {
            SyncError::NotADirectory(path) => ListError::NotADirectory(path),
            other => ListError::Sync(other),
        })?
        .ok_or_else(|| ListError::NotFound(path.clone()))?;

    let files = listing
        .into_iter()
        .map(|entry| ListEntry {
            name: entry.name,
            path: entry.path,
            sha: entry.version_tag,
        })
        .collect();

    Ok((http::StatusCode::OK, Json(ListResponse { files })).into_response())
}

#[derive(Debug, thiserror::Error)]
pub enum ListError {
    #[error("missing required query parameter: path")]
    MissingPath,
    #[error("not a directory: {0}")]
    NotADirectory(String),
    #[error("directory not found: {0}")]
    NotFound(String),
    #[error("sync error: {0}")]
    Sync(SyncError),
}

impl IntoResponse for ListError {
    fn into_response(self) -> Response {
        match self {
            ListError::MissingPath | ListError::NotADirectory(_) => {
                (http::StatusCode::BAD_REQUEST, format!("Bad request: {}", self)).into_response()
            }
            ListError::NotFound(path) => {
                (http::StatusCode::NOT_FOUND, format!("Not found: {}", path)).into_response()
            }
            ListError::Sync(err) => {
                tracing::error!("list failed: {}", err);
                (
                    http::StatusCode::INTERNAL_SERVER_ERROR,
                    "Remote store error".to_string(),
                )
                    .into_response()
            }
        }
    }
}

impl ApiRequest for ListRequest {
    type Response = ListResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> RequestBuilder {
        let full_url = base_url.join("/api/list").unwrap();
        client
            .get(full_url)
            .query(&[("path", self.path.as_deref().unwrap_or(""))])
    }
}
