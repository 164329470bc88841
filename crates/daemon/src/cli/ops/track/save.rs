use std::fmt;
use std::io::Read;
use std::path::PathBuf;

use clap::Args;
use owo_colors::OwoColorize;

use trackd_daemon::http_server::api::client::ApiError;
use trackd_daemon::http_server::api::track::save::SaveTrackRequest;

#[derive(Args, Debug, Clone)]
pub struct Save {
    /// Display name of the track
    pub name: String,

    /// File to read the record content from; stdin when omitted
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Commit message
    #[arg(long, short)]
    pub message: Option<String>,
}

#[derive(Debug)]
pub struct SaveOutput {
    pub name: String,
    pub path: String,
    pub sha: String,
    pub mirrored: bool,
}

impl fmt::Display for SaveOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}  {} {}  {} {}",
            "Track:".dimmed(),
            self.name.bold(),
            "Path:".dimmed(),
            self.path,
            "Sha:".dimmed(),
            self.sha
        )?;
        if !self.mirrored {
            write!(f, "\n{}", "warning: local mirror not updated".yellow())?;
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    #[error("failed to read content: {0}")]
    ReadContent(#[from] std::io::Error),
    #[error("API error: {0}")]
    Api(#[from] ApiError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Save {
    type Error = SaveError;
    type Output = SaveOutput;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let content = match &self.file {
            Some(file) => tokio::fs::read_to_string(file).await?,
            None => {
                let mut buf = String::new();
                std::io::stdin().read_to_string(&mut buf)?;
                buf
            }
        };

        let request = SaveTrackRequest {
            name: Some(self.name.clone()),
            content: Some(content),
            message: self.message.clone(),
        };
        let response = ctx.client.call(request).await?;

        Ok(SaveOutput {
            name: self.name.clone(),
            path: response.path,
            sha: response.sha,
            mirrored: response.mirrored,
        })
    }
}
