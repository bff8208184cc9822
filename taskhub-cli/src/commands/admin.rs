//! Admin command handlers
//!
//! Admin accounts and the organization dashboard.

use anyhow::Result;
use clap::Subcommand;
use colored::*;
use taskhub_core::domain::Admin;
use taskhub_core::dto::admin::DashboardStats;

use crate::app::App;
use crate::id_resolver::resolve_id;
use crate::output::{self, format_optional_time};
use crate::types::{FetchArgs, ListArgs};

/// Admin subcommands
#[derive(Subcommand)]
pub enum AdminCommands {
    /// List admin accounts
    List(ListArgs),
    /// Get admin details
    Get {
        /// Admin ID or unambiguous prefix
        id: String,

        #[command(flatten)]
        fetch: FetchArgs,
    },
    /// Show organization statistics
    Stats {
        #[command(flatten)]
        fetch: FetchArgs,
    },
}

/// Handle admin commands
pub async fn handle_admin_command(command: AdminCommands, app: &App) -> Result<()> {
    match command {
        AdminCommands::List(args) => list_admins(app, &args).await,
        AdminCommands::Get { id, fetch } => get_admin(app, &id, &fetch).await,
        AdminCommands::Stats { fetch } => show_stats(app, &fetch).await,
    }
}

async fn list_admins(app: &App, args: &ListArgs) -> Result<()> {
    let stream = app
        .repos
        .admin
        .admins(args.request(app.page_size()), args.fetch.policy());
    let view = output::settle(stream).await?;

    if app.config.json {
        return output::print_json(&view.data);
    }

    output::print_page_header("admin(s)", &view.data, view.source);
    for admin in &view.data.items {
        println!("  {} {} {}", "▸".cyan(), admin.name.bold(), admin.id.dimmed());
        println!("    Email: {}", admin.email);
        println!();
    }
    output::print_page_footer(&view.data);

    Ok(())
}

async fn get_admin(app: &App, id: &str, fetch: &FetchArgs) -> Result<()> {
    let id = resolve_id(app.cache.admins(), "admin", id).await?;
    let view = output::settle(app.repos.admin.admin(&id, fetch.policy())).await?;

    if app.config.json {
        return output::print_json(&view.data);
    }

    print_admin_details(&view.data);
    output::print_source(view.source);
    Ok(())
}

async fn show_stats(app: &App, fetch: &FetchArgs) -> Result<()> {
    let view = output::settle(app.repos.admin.dashboard_stats(fetch.policy())).await?;

    if app.config.json {
        return output::print_json(&view.data);
    }

    print_stats(&view.data);
    output::print_source(view.source);
    Ok(())
}

fn print_admin_details(admin: &Admin) {
    println!("{}", "Admin Details:".bold());
    println!("  ID:      {}", admin.id.cyan());
    println!("  Name:    {}", admin.name);
    println!("  Email:   {}", admin.email);
    if let Some(phone) = &admin.phone {
        println!("  Phone:   {}", phone);
    }
    println!("  Created: {}", format_optional_time(admin.created_at));
}

fn print_stats(stats: &DashboardStats) {
    println!("{}", "Organization:".bold());
    println!("  Departments: {}", stats.total_departments);
    println!("  Managers:    {}", stats.total_managers);
    println!("  Employees:   {}", stats.total_employees);

    println!("\n{}", "Tasks:".bold());
    println!("  Total:       {}", stats.total_tasks);
    println!("  Pending:     {}", stats.pending_tasks.to_string().yellow());
    println!("  In progress: {}", stats.in_progress_tasks.to_string().cyan());
    println!("  Completed:   {}", stats.completed_tasks.to_string().green());
    println!(
        "  Completion:  {}",
        format!("{:.0}%", stats.completion_rate()).bold()
    );
}
