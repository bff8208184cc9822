//! Manager command handlers

use anyhow::Result;
use clap::Subcommand;
use colored::*;
use taskhub_core::domain::Manager;
use taskhub_core::dto::manager::{CreateManager, UpdateManager};

use crate::app::App;
use crate::id_resolver::resolve_id;
use crate::output::{self, format_optional_time};
use crate::types::{FetchArgs, ListArgs};

/// Manager subcommands
#[derive(Subcommand)]
pub enum ManagerCommands {
    /// List managers
    List(ListArgs),
    /// Get manager details
    Get {
        /// Manager ID or unambiguous prefix
        id: String,

        #[command(flatten)]
        fetch: FetchArgs,
    },
    /// Create a manager account (admin)
    Create {
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        email: String,

        /// Initial password, at least 6 characters
        #[arg(short, long, env = "TASKHUB_NEW_PASSWORD", hide_env_values = true)]
        password: String,

        #[arg(long)]
        phone: Option<String>,

        /// Department ID or unambiguous prefix
        #[arg(short, long)]
        department: Option<String>,
    },
    /// Update a manager (admin)
    Update {
        /// Manager ID or unambiguous prefix
        id: String,

        #[arg(short, long)]
        name: Option<String>,

        #[arg(short, long)]
        email: Option<String>,

        #[arg(long)]
        phone: Option<String>,

        /// Department ID or unambiguous prefix
        #[arg(short, long)]
        department: Option<String>,
    },
    /// Delete a manager (admin)
    Delete {
        /// Manager ID or unambiguous prefix
        id: String,
    },
}

/// Handle manager commands
pub async fn handle_manager_command(command: ManagerCommands, app: &App) -> Result<()> {
    match command {
        ManagerCommands::List(args) => list_managers(app, &args).await,
        ManagerCommands::Get { id, fetch } => get_manager(app, &id, &fetch).await,
        ManagerCommands::Create {
            name,
            email,
            password,
            phone,
            department,
        } => {
            let department_id = match department {
                Some(d) => Some(resolve_id(app.cache.departments(), "department", &d).await?),
                None => None,
            };
            let manager = app
                .repos
                .admin
                .create_manager(CreateManager {
                    name,
                    email,
                    password,
                    phone,
                    department_id,
                })
                .await?;
            output::success(format!(
                "Manager created: {} ({})",
                manager.name.bold(),
                manager.id.dimmed()
            ));
            Ok(())
        }
        ManagerCommands::Update {
            id,
            name,
            email,
            phone,
            department,
        } => {
            let id = resolve_id(app.cache.managers(), "manager", &id).await?;
            let department_id = match department {
                Some(d) => Some(resolve_id(app.cache.departments(), "department", &d).await?),
                None => None,
            };
            let manager = app
                .repos
                .admin
                .update_manager(
                    &id,
                    UpdateManager {
                        name,
                        email,
                        phone,
                        department_id,
                    },
                )
                .await?;
            output::success(format!("Manager updated: {}", manager.name.bold()));
            Ok(())
        }
        ManagerCommands::Delete { id } => {
            let id = resolve_id(app.cache.managers(), "manager", &id).await?;
            app.repos.admin.delete_manager(&id).await?;
            output::success(format!("Manager deleted: {}", id.dimmed()));
            Ok(())
        }
    }
}

async fn list_managers(app: &App, args: &ListArgs) -> Result<()> {
    let stream = app
        .repos
        .admin
        .managers(args.request(app.page_size()), args.fetch.policy());
    let view = output::settle(stream).await?;

    if app.config.json {
        return output::print_json(&view.data);
    }

    output::print_page_header("manager(s)", &view.data, view.source);
    for manager in &view.data.items {
        println!("  {} {} {}", "▸".cyan(), manager.name.bold(), manager.id.dimmed());
        println!("    Email:      {}", manager.email);
        if let Some(department) = &manager.department_id {
            println!("    Department: {}", department.dimmed());
        }
        println!();
    }
    output::print_page_footer(&view.data);

    Ok(())
}

async fn get_manager(app: &App, id: &str, fetch: &FetchArgs) -> Result<()> {
    let id = resolve_id(app.cache.managers(), "manager", id).await?;
    let view = output::settle(app.repos.admin.manager(&id, fetch.policy())).await?;

    if app.config.json {
        return output::print_json(&view.data);
    }

    print_manager_details(&view.data);
    output::print_source(view.source);
    Ok(())
}

fn print_manager_details(manager: &Manager) {
    println!("{}", "Manager Details:".bold());
    println!("  ID:         {}", manager.id.cyan());
    println!("  Name:       {}", manager.name);
    println!("  Email:      {}", manager.email);
    if let Some(phone) = &manager.phone {
        println!("  Phone:      {}", phone);
    }
    if let Some(department) = &manager.department_id {
        println!("  Department: {}", department.dimmed());
    }
    println!("  Created:    {}", format_optional_time(manager.created_at));
}
