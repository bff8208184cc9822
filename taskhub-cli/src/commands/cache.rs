//! Cache command handlers

use anyhow::{Context, Result};
use clap::Subcommand;

use crate::app::App;
use crate::output;

/// Cache subcommands
#[derive(Subcommand)]
pub enum CacheCommands {
    /// Drop all cached records; the login session is kept
    Clear,
}

/// Handle cache commands
pub async fn handle_cache_command(command: CacheCommands, app: &App) -> Result<()> {
    match command {
        CacheCommands::Clear => {
            app.cache
                .clear_all()
                .await
                .context("Failed to clear the local cache")?;
            output::success("Local cache cleared");
            Ok(())
        }
    }
}
