//! TaskHub CLI
//!
//! Command-line front end for the TaskHub task-management backend. Reads are
//! served from the local cache and refreshed from the server when it is
//! reachable; changes are sent to the server and written through to the cache.

mod app;
mod commands;
mod config;
mod id_resolver;
mod output;
mod types;

use anyhow::Result;
use clap::Parser;
use colored::*;
use commands::{Commands, handle_command};
use config::Config;
use taskhub_store::SyncError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::app::App;

#[derive(Parser)]
#[command(name = "taskhub")]
#[command(about = "TaskHub task management CLI", long_about = None)]
struct Cli {
    /// TaskHub API URL
    #[arg(long, env = "TASKHUB_API_URL", default_value = "http://localhost:5000/api")]
    api_url: String,

    /// Cache database URL (default: a database in the user data directory)
    #[arg(long, env = "TASKHUB_DATABASE_URL")]
    database: Option<String>,

    /// Work from the local cache only, never contacting the server
    #[arg(long, global = true)]
    offline: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Increase log verbosity (-v: info, -vv: debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let config = Config::new(cli.api_url, cli.database, cli.offline, cli.json)?;
    let app = App::connect(config).await?;

    if let Err(err) = handle_command(cli.command, &app).await {
        // Categorized failures get their user-facing message, everything else the full chain
        if let Some(sync_err) = err.downcast_ref::<SyncError>() {
            tracing::debug!(error = ?err, "Command failed");
            eprintln!("{} {}", "✗".red(), sync_err.user_message());
            std::process::exit(1);
        }
        return Err(err);
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let default_filter = match verbose {
        0 => "taskhub_cli=warn,taskhub_store=warn,taskhub_client=warn",
        1 => "taskhub_cli=info,taskhub_store=info,taskhub_client=info",
        _ => "taskhub_cli=debug,taskhub_store=debug,taskhub_client=debug,sqlx=warn",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
