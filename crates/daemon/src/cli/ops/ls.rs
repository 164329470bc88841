use std::fmt;

use clap::Args;
use comfy_table::Table;

use trackd_daemon::http_server::api::client::ApiError;
use trackd_daemon::http_server::api::list::{ListEntry, ListRequest};

#[derive(Args, Debug, Clone)]
pub struct Ls {
    /// Directory path in the remote repository
    pub path: String,
}

#[derive(Debug)]
pub struct LsOutput {
    pub files: Vec<ListEntry>,
}

impl fmt::Display for LsOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut table = Table::new();
        table.set_header(vec!["NAME", "PATH", "SHA"]);
        for entry in &self.files {
            table.add_row(vec![
                entry.name.clone(),
                entry.path.clone(),
                entry.sha.clone(),
            ]);
        }
        write!(f, "{}", table)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LsError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Ls {
    type Error = LsError;
    type Output = LsOutput;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let request = ListRequest {
            path: Some(self.path.clone()),
        };
        let response = ctx.client.call(request).await?;

        Ok(LsOutput {
            files: response.files,
        })
    }
}
