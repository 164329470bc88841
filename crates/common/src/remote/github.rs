//! GitHub contents-API implementation of [`RemoteStore`].
//!
//! Documents are files in a repository; the version tag is the blob sha
//! the API reports, and conditional writes pass that sha back so the
//! remote enforces the optimistic-concurrency check server-side.

use base64::Engine;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use url::Url;

use super::config::{GithubConfig, StoreSetupError};
use super::{CommitInfo, DirectoryEntry, DirectoryListing, Document, RemoteError, RemoteStore};

#[derive(Debug, Clone)]
pub struct GithubStore {
    config: GithubConfig,
    client: Client,
}

impl GithubStore {
    pub fn new(config: GithubConfig) -> Result<Self, StoreSetupError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.token))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let client = Client::builder()
            .user_agent(concat!("trackd/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()?;

        Ok(Self { config, client })
    }

    fn contents_url(&self, path: &str) -> Result<Url, RemoteError> {
        let raw = format!(
            "{}/repos/{}/{}/contents/{}",
            self.config.api_base.as_str().trim_end_matches('/'),
            self.config.owner,
            self.config.repo,
            path.trim_start_matches('/'),
        );
        Url::parse(&raw).map_err(|err| RemoteError::Unavailable {
            status: None,
            message: format!("unusable contents url '{}': {}", raw, err),
        })
    }

    async fn fetch_contents(&self, path: &str) -> Result<Option<serde_json::Value>, RemoteError> {
        let url = self.contents_url(path)?;
        let response = self
            .client
            .get(url)
            .query(&[("ref", self.config.branch.as_str())])
            .send()
            .await
            .map_err(RemoteError::transport)?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if !status.is_success() => Err(RemoteError::http(
                status,
                response.text().await.unwrap_or_default(),
            )),
            _ => Ok(Some(
                response.json().await.map_err(RemoteError::transport)?,
            )),
        }
    }
}

#[async_trait::async_trait]
impl RemoteStore for GithubStore {
    async fn get(&self, path: &str) -> Result<Option<Document>, RemoteError> {
        let body = match self.fetch_contents(path).await? {
            Some(body) => body,
            None => return Ok(None),
        };

        // A listing array means the path names a collection, which has no
        // document content to return.
        if body.is_array() {
            return Err(RemoteError::Unavailable {
                status: None,
                message: format!("path '{}' is a collection, not a document", path),
            });
        }

        let file: ContentsFile =
            serde_json::from_value(body).map_err(|err| RemoteError::Unavailable {
                status: None,
                message: format!("unexpected contents payload for '{}': {}", path, err),
            })?;
        let content = decode_content(path, &file.content)?;

        Ok(Some(Document {
            path: path.to_string(),
            content,
            version_tag: file.sha,
        }))
    }

    async fn list(&self, path: &str) -> Result<Option<DirectoryListing>, RemoteError> {
        let body = match self.fetch_contents(path).await? {
            Some(body) => body,
            None => return Ok(None),
        };

        if !body.is_array() {
            return Err(RemoteError::NotADirectory(path.to_string()));
        }

        let entries: Vec<ContentsEntry> =
            serde_json::from_value(body).map_err(|err| RemoteError::Unavailable {
                status: None,
                message: format!("unexpected listing payload for '{}': {}", path, err),
            })?;

        Ok(Some(
            entries
                .into_iter()
                .map(|entry| DirectoryEntry {
                    name: entry.name,
                    path: entry.path,
                    version_tag: entry.sha,
                })
                .collect(),
        ))
    }

    async fn put(
        &self,
        path: &str,
        content: &str,
        message: &str,
        expected_tag: Option<&str>,
    ) -> Result<(String, CommitInfo), RemoteError> {
        let url = self.contents_url(path)?;
        let mut body = serde_json::json!({
            "message": message,
            "content": base64::engine::general_purpose::STANDARD.encode(content),
            "branch": self.config.branch,
        });
        if let Some(tag) = expected_tag {
            body["sha"] = tag.into();
        }

        let response = self
            .client
            .put(url)
            .json(&body)
            .send()
            .await
            .map_err(RemoteError::transport)?;

        match response.status() {
            // 409 and 422 are what the contents API answers for a stale or
            // missing sha on an existing file.
            StatusCode::CONFLICT | StatusCode::UNPROCESSABLE_ENTITY => {
                Err(RemoteError::VersionConflict {
                    path: path.to_string(),
                    expected: expected_tag.map(String::from),
                })
            }
            status if !status.is_success() => Err(RemoteError::http(
                status,
                response.text().await.unwrap_or_default(),
            )),
            _ => {
                let body: PutResponse = response.json().await.map_err(RemoteError::transport)?;
                Ok((
                    body.content.sha,
                    CommitInfo {
                        sha: body.commit.sha,
                        message: body.commit.message,
                    },
                ))
            }
        }
    }
}

/// Contents-API file payload; `content` is base64 with embedded newlines.
#[derive(Debug, Deserialize)]
struct ContentsFile {
    sha: String,
    #[serde(default)]
    content: String,
}

#[derive(Debug, Deserialize)]
struct ContentsEntry {
    name: String,
    path: String,
    sha: String,
}

#[derive(Debug, Deserialize)]
struct PutResponse {
    content: PutContent,
    commit: PutCommit,
}

#[derive(Debug, Deserialize)]
struct PutContent {
    sha: String,
}

#[derive(Debug, Deserialize)]
struct PutCommit {
    sha: String,
    #[serde(default)]
    message: Option<String>,
}

fn decode_content(path: &str, encoded: &str) -> Result<String, RemoteError> {
    let stripped: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(stripped)
        .map_err(|err| RemoteError::Unavailable {
            status: None,
            message: format!("undecodable content for '{}': {}", path, err),
        })?;
    String::from_utf8(bytes).map_err(|err| RemoteError::Unavailable {
        status: None,
        message: format!("non-text content for '{}': {}", path, err),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> GithubStore {
        GithubStore::new(GithubConfig {
            owner: "acme".to_string(),
            repo: "library".to_string(),
            branch: "main".to_string(),
            token: "token".to_string(),
            api_base: Url::parse("https://api.github.com").unwrap(),
        })
        .unwrap()
    }

    #[test]
    fn builds_contents_urls() {
        let url = store().contents_url("records/night-drive.json").unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.github.com/repos/acme/library/contents/records/night-drive.json"
        );
    }

    #[test]
    fn strips_leading_slash_from_paths() {
        let url = store().contents_url("/notes/a.md").unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.github.com/repos/acme/library/contents/notes/a.md"
        );
    }

    #[test]
    fn decodes_wrapped_base64_content() {
        // The contents API wraps base64 at 60 columns.
        let encoded = "eyJicG0i\nOjEyMH0=\n";
        assert_eq!(decode_content("p", encoded).unwrap(), "{\"bpm\":120}");
    }

    #[test]
    fn rejects_undecodable_content() {
        let err = decode_content("p", "!!not base64!!").unwrap_err();
        assert!(matches!(err, RemoteError::Unavailable { .. }));
    }
}
