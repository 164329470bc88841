use std::fmt;

use clap::Args;
use owo_colors::OwoColorize;

use trackd_daemon::http_server::api::client::ApiError;
use trackd_daemon::http_server::api::track::get::GetTrackRequest;

#[derive(Args, Debug, Clone)]
pub struct Show {
    /// Display name of the track
    pub name: String,
}

#[derive(Debug)]
pub struct ShowOutput {
    pub path: String,
    pub sha: String,
    pub content: String,
}

impl fmt::Display for ShowOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} {}  {} {}",
            "Path:".dimmed(),
            self.path.bold(),
            "Sha:".dimmed(),
            self.sha
        )?;
        write!(f, "{}", self.content)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ShowError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Show {
    type Error = ShowError;
    type Output = ShowOutput;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let request = GetTrackRequest {
            name: Some(self.name.clone()),
        };
        let response = ctx.client.call(request).await?;

        Ok(ShowOutput {
            path: response.path,
            sha: response.sha,
            content: response.content,
        })
    }
}
