mod cmd;
mod config;
mod context;
mod domain;
mod error;
mod infra;
mod logging;
mod services;
mod workflow;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::{info, warn};

use crate::cmd::sync::{self as sync_cmd, SyncCommandArgs};
use crate::config::AppConfig;
use crate::context::AppContext;
use crate::error::AppResult;
use crate::infra::freshservice::FreshserviceClient;
use crate::infra::github::GithubClient;
use crate::logging::LogFormat;

#[derive(Parser)]
#[command(
    name = "fresh-sync",
    author,
    version,
    about = "Mirror Freshservice tickets into GitHub issues"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
    /// Report the issues that would be created without creating them.
    #[arg(long, global = true)]
    dry_run: bool,
    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(short, long, global = true)]
    verbose: bool,
    #[arg(long, value_enum, default_value_t = LogFormat::Text, global = true)]
    log_format: LogFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a GitHub issue for every qualifying ticket that has none yet (default).
    Sync,
    /// Show the configuration resolved from the environment (secrets masked).
    Config,
}

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> AppResult<()> {
    let cli = Cli::parse();
    logging::init(cli.log_format, cli.verbose);

    let config = AppConfig::from_env()?;

    match cli.command {
        Some(Commands::Config) => cmd::config::run(&config),
        Some(Commands::Sync) | None => run_sync(config, cli.dry_run).await,
    }
}

async fn run_sync(config: AppConfig, dry_run: bool) -> AppResult<()> {
    let ticket_source = Arc::new(FreshserviceClient::from_config(&config)?);
    let issue_tracker = Arc::new(GithubClient::from_config(&config)?);
    let context = AppContext::new(config, ticket_source, issue_tracker);

    let report = sync_cmd::run(&context, SyncCommandArgs { dry_run }).await?;

    if report.titles_truncated {
        warn!("existing issue titles were only partially collected; duplicates are possible");
    }
    if dry_run {
        info!(
            planned = report.planned,
            already_synced = report.already_synced,
            "dry run finished"
        );
    } else {
        info!(
            fetched = report.tickets_fetched,
            qualifying = report.tickets_qualifying,
            already_synced = report.already_synced,
            created = report.created,
            failed = report.failed,
            "sync finished"
        );
    }

    Ok(())
}
