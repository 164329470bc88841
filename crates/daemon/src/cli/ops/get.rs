use std::fmt;

use clap::Args;
use owo_colors::OwoColorize;

use trackd_daemon::http_server::api::client::ApiError;
use trackd_daemon::http_server::api::data::get::GetDataRequest;

#[derive(Args, Debug, Clone)]
pub struct Get {
    /// Path of the document in the remote repository
    pub path: String,
}

#[derive(Debug)]
pub struct GetOutput {
    pub path: String,
    pub sha: String,
    pub content: String,
}

impl fmt::Display for GetOutput {
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
pub enum GetError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Get {
    type Error = GetError;
    type Output = GetOutput;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let request = GetDataRequest {
            path: Some(self.path.clone()),
        };
        let response = ctx.client.call(request).await?;

        Ok(GetOutput {
            path: self.path.clone(),
            sha: response.sha,
            content: response.content,
        })
    }
}
