use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;
use url::Url;

use trackd_daemon::http_server::api::client::ApiClient;

mod cli;

use cli::op::{Op, OpContext};
use cli::ops;

#[derive(Parser, Debug)]
#[command(name = "trackd", version, about = "Documents synced to a versioned remote repository")]
struct Cli {
    /// Base URL of a running trackd daemon
    #[arg(
        long,
        env = "TRACKD_API_URL",
        default_value = "http://localhost:8080",
        global = true
    )]
    api_url: Url,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP service
    Serve(ops::Serve),
    /// Read a document by path
    Get(ops::Get),
    /// Write a document by path
    Put(ops::Put),
    /// List a directory in the remote repository
    Ls(ops::Ls),
    /// Name-addressed track records
    #[command(subcommand)]
    Track(ops::Track),
    /// Check daemon health
    Health(ops::Health),
    /// Print build information
    Version(ops::Version),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let client = ApiClient::new(&cli.api_url)?;
    let ctx = OpContext { client };

    match cli.command {
        Command::Serve(op) => run(&op, &ctx).await,
        Command::Get(op) => run(&op, &ctx).await,
        Command::Put(op) => run(&op, &ctx).await,
        Command::Ls(op) => run(&op, &ctx).await,
        Command::Track(ops::Track::Save(op)) => run(&op, &ctx).await,
        Command::Track(ops::Track::Show(op)) => run(&op, &ctx).await,
        Command::Health(op) => run(&op, &ctx).await,
        Command::Version(op) => run(&op, &ctx).await,
    }

    Ok(())
}

async fn run<O: Op>(op: &O, ctx: &OpContext) {
    match op.execute(ctx).await {
        Ok(output) => println!("{}", output),
        Err(err) => {
            eprintln!("{} {}", "error:".red().bold(), err);
            std::process::exit(1);
        }
    }
}
