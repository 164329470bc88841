use trackd_daemon::http_server::api::client::ApiClient;

/// Context shared by every CLI operation.
pub struct OpContext {
    pub client: ApiClient,
}

/// A CLI operation: typed output, typed error.
#[async_trait::async_trait]
pub trait Op {
    type Error: std::error::Error;
    type Output: std::fmt::Display;

    async fn execute(&self, ctx: &OpContext) -> Result<Self::Output, Self::Error>;
}
