//! Sync command handler

use anyhow::Result;
use colored::*;

use crate::app::App;

/// Refresh the first page of everything the current user can see
pub async fn handle_sync(app: &App) -> Result<()> {
    let reports = app.repos.synchronizer.refresh_all(app.page_size()).await?;

    println!("{}", "Sync results:".bold());
    for report in &reports {
        match &report.outcome {
            Ok(count) => println!(
                "  {} {:<12} {}",
                "✓".green(),
                report.scope,
                format!("{} record(s)", count).dimmed()
            ),
            Err(err) => println!(
                "  {} {:<12} {}",
                "✗".red(),
                report.scope,
                err.user_message().red()
            ),
        }
    }

    let failed = reports.iter().filter(|r| !r.is_ok()).count();
    if failed > 0 {
        println!();
        println!(
            "{}",
            format!("{} of {} scope(s) failed to refresh.", failed, reports.len()).yellow()
        );
    }

    Ok(())
}
