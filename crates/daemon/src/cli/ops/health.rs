use std::fmt;

use clap::Args;
use owo_colors::OwoColorize;

use trackd_daemon::http_server::health::version::VersionRequest;

#[derive(Args, Debug, Clone)]
pub struct Health;

#[derive(Debug)]
pub enum EndpointStatus {
    Ok,
    Unhealthy(String),
    NotReachable,
}

#[derive(Debug)]
pub struct HealthOutput {
    pub url: String,
    pub livez: EndpointStatus,
    pub version: Option<String>,
}

impl fmt::Display for HealthOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status_str = |s: &EndpointStatus| -> String {
            match s {
                EndpointStatus::Ok => "OK".green().to_string(),
                EndpointStatus::Unhealthy(code) => format!("{} ({})", "UNHEALTHY".red(), code),
                EndpointStatus::NotReachable => "NOT REACHABLE".red().to_string(),
            }
        };

        writeln!(f, "{} ({}):", "Daemon".bold(), self.url)?;
        writeln!(f, "  {} {}", "livez:".dimmed(), status_str(&self.livez))?;
        write!(
            f,
            "  {} {}",
            "version:".dimmed(),
            self.version.as_deref().unwrap_or("unknown")
        )
    }
}

#[derive(Debug, thiserror::Error)]
pub enum HealthError {
    #[error("Health check failed: {0}")]
    Failed(String),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Health {
    type Error = HealthError;
    type Output = HealthOutput;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let base = ctx.client.base_url();
        let client = ctx.client.http_client();

        let livez_url = format!("{}/_status/livez", base.as_str().trim_end_matches('/'));
        let livez = match client.get(&livez_url).send().await {
            Ok(resp) if resp.status().is_success() => EndpointStatus::Ok,
            Ok(resp) => EndpointStatus::Unhealthy(resp.status().to_string()),
            Err(_) => EndpointStatus::NotReachable,
        };

        let version = match ctx.client.call(VersionRequest {}).await {
            Ok(info) => Some(info.version),
            Err(_) => None,
        };

        if matches!(livez, EndpointStatus::NotReachable) && version.is_none() {
            return Err(HealthError::Failed(format!("no daemon at {}", base)));
        }

        Ok(HealthOutput {
            url: base.to_string(),
            livez,
            version,
        })
    }
}
