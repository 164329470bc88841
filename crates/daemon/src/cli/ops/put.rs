use std::fmt;
use std::io::Read;
use std::path::PathBuf;

use clap::Args;
use owo_colors::OwoColorize;

use trackd_daemon::http_server::api::client::ApiError;
use trackd_daemon::http_server::api::data::put::PutDataRequest;

#[derive(Args, Debug, Clone)]
pub struct Put {
    /// Path of the document in the remote repository
    pub path: String,

    /// File to read the new content from; stdin when omitted
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Commit message
    #[arg(long, short)]
    pub message: Option<String>,
}

#[derive(Debug)]
pub struct PutOutput {
    pub path: String,
    pub sha: String,
    pub commit_sha: String,
    pub mirrored: bool,
}

impl fmt::Display for PutOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} {}  {} {}",
            "Committed:".dimmed(),
            self.path.bold(),
            "Sha:".dimmed(),
            self.sha
        )?;
        write!(f, "{} {}", "Commit:".dimmed(), self.commit_sha)?;
        if !self.mirrored {
            write!(f, "\n{}", "warning: local mirror not updated".yellow())?;
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PutError {
    #[error("failed to read content: {0}")]
    ReadContent(#[from] std::io::Error),
    #[error("API error: {0}")]
    Api(#[from] ApiError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Put {
    type Error = PutError;
    type Output = PutOutput;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let content = match &self.file {
            Some(file) => tokio::fs::read_to_string(file).await?,
            None => {
                let mut buf = String::new();
                std::io::stdin().read_to_string(&mut buf)?;
                buf
            }
        };

        let request = PutDataRequest {
            path: Some(self.path.clone()),
            content: Some(content),
            message: self.message.clone(),
        };
        let response = ctx.client.call(request).await?;

        Ok(PutOutput {
            path: self.path.clone(),
            sha: response.sha,
            commit_sha: response.commit.sha,
            mirrored: response.mirrored,
        })
    }
}
