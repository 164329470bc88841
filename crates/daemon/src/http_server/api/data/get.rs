use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};

use common::prelude::SyncError;

use crate::http_server::api::client::ApiRequest;
use crate::ServiceState;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetDataRequest {
    /// Logical path of the document in the remote repository
    pub path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetDataResponse {
    pub content: String,
    /// Current version tag of the document
    pub sha: String,
}

pub async fn handler(
    State(state): State<ServiceState>,
    Query(req): Query<GetDataRequest>,
) -> Result<impl IntoResponse, GetDataError> {
    let path = req
        .path
        .filter(|p| !p.is_empty())
        .ok_or(GetDataError::MissingPath)?;

    let doc = state
        .engine()
        .read(&path)
        .await?
        .ok_or_else(|| GetDataError::NotFound(path.clone()))?;

    Ok((
        http::StatusCode::OK,
        Json(GetDataResponse {
            content: doc.content,
            sha: doc.version_tag,
        }),
    )
        .into_response())
}

#[derive(Debug, thiserror::Error)]
pub enum GetDataError {
    #[error("missing required query parameter: path")]
    MissingPath,
    #[error("document not found: {0}")]
    NotFound(String),
    #[error("sync error: {0}")]
    Sync(#[from] SyncError),
}

impl IntoResponse for GetDataError {
    fn into_response(self) -> Response {
        match self {
            GetDataError::MissingPath => {
                (http::StatusCode::BAD_REQUEST, format!("Bad request: {}", self)).into_response()
            }
            GetDataError::NotFound(path) => {
                (http::StatusCode::NOT_FOUND, format!("Not found: {}", path)).into_response()
            }
            GetDataError::Sync(err) => {
                tracing::error!("read failed: {}", err);
                (
                    http::StatusCode::INTERNAL_SERVER_ERROR,
                    "Remote store error".to_string(),
                )
                    .into_response()
            }
        }
    }
}

impl ApiRequest for GetDataRequest {
    type Response = GetDataResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> RequestBuilder {
        let full_url = base_url.join("/api/data").unwrap();
        client
            .get(full_url)
            .query(&[("path", self.path.as_deref().unwrap_or(""))])
    }
}
