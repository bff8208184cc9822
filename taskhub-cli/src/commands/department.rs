//! Department command handlers

use anyhow::Result;
use clap::Subcommand;
use colored::*;
use taskhub_core::domain::Department;
use taskhub_core::dto::department::{CreateDepartment, UpdateDepartment};

use crate::app::App;
use crate::id_resolver::resolve_id;
use crate::output::{self, format_optional_time};
use crate::types::{FetchArgs, ListArgs};

/// Department subcommands
#[derive(Subcommand)]
pub enum DepartmentCommands {
    /// List departments
    List(ListArgs),
    /// Get department details
    Get {
        /// Department ID or unambiguous prefix
        id: String,

        #[command(flatten)]
        fetch: FetchArgs,
    },
    /// Create a department (admin)
    Create {
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        description: Option<String>,

        /// Manager ID or unambiguous prefix
        #[arg(short, long)]
        manager: Option<String>,
    },
    /// Update a department (admin)
    Update {
        /// Department ID or unambiguous prefix
        id: String,

        #[arg(short, long)]
        name: Option<String>,

        #[arg(short, long)]
        description: Option<String>,

        /// Manager ID or unambiguous prefix
        #[arg(short, long)]
        manager: Option<String>,
    },
    /// Delete a department (admin)
    Delete {
        /// Department ID or unambiguous prefix
        id: String,
    },
}

/// Handle department commands
pub async fn handle_department_command(command: DepartmentCommands, app: &App) -> Result<()> {
    match command {
        DepartmentCommands::List(args) => list_departments(app, &args).await,
        DepartmentCommands::Get { id, fetch } => get_department(app, &id, &fetch).await,
        DepartmentCommands::Create {
            name,
            description,
            manager,
        } => {
            let manager_id = match manager {
                Some(m) => Some(resolve_id(app.cache.managers(), "manager", &m).await?),
                None => None,
            };
            let department = app
                .repos
                .admin
                .create_department(CreateDepartment {
                    name,
                    description,
                    manager_id,
                })
                .await?;
            output::success(format!(
                "Department created: {} ({})",
                department.name.bold(),
                department.id.dimmed()
            ));
            Ok(())
        }
        DepartmentCommands::Update {
            id,
            name,
            description,
            manager,
        } => {
            let id = resolve_id(app.cache.departments(), "department", &id).await?;
            let manager_id = match manager {
                Some(m) => Some(resolve_id(app.cache.managers(), "manager", &m).await?),
                None => None,
            };
            let department = app
                .repos
                .admin
                .update_department(
                    &id,
                    UpdateDepartment {
                        name,
                        description,
                        manager_id,
                    },
                )
                .await?;
            output::success(format!("Department updated: {}", department.name.bold()));
            Ok(())
        }
        DepartmentCommands::Delete { id } => {
            let id = resolve_id(app.cache.departments(), "department", &id).await?;
            app.repos.admin.delete_department(&id).await?;
            output::success(format!("Department deleted: {}", id.dimmed()));
            Ok(())
        }
    }
}

async fn list_departments(app: &App, args: &ListArgs) -> Result<()> {
    let stream = app
        .repos
        .shared
        .departments(args.request(app.page_size()), args.fetch.policy());
    let view = output::settle(stream).await?;

    if app.config.json {
        return output::print_json(&view.data);
    }

    output::print_page_header("department(s)", &view.data, view.source);
    for department in &view.data.items {
        print_department_summary(department);
    }
    output::print_page_footer(&view.data);

    Ok(())
}

async fn get_department(app: &App, id: &str, fetch: &FetchArgs) -> Result<()> {
    let id = resolve_id(app.cache.departments(), "department", id).await?;
    let view = output::settle(app.repos.shared.department(&id, fetch.policy())).await?;

    if app.config.json {
        return output::print_json(&view.data);
    }

    print_department_details(&view.data);
    output::print_source(view.source);
    Ok(())
}

fn print_department_summary(department: &Department) {
    println!(
        "  {} {} {}",
        "▸".cyan(),
        department.name.bold(),
        department.id.dimmed()
    );
    if let Some(description) = &department.description {
        println!("    {}", description);
    }
    if let Some(count) = department.employee_count {
        println!("    Employees: {}", count);
    }
    println!();
}

fn print_department_details(department: &Department) {
    println!("{}", "Department Details:".bold());
    println!("  ID:          {}", department.id.cyan());
    println!("  Name:        {}", department.name);
    if let Some(description) = &department.description {
        println!("  Description: {}", description);
    }
    if let Some(manager) = &department.manager_id {
        println!("  Manager:     {}", manager.dimmed());
    }
    if let Some(count) = department.employee_count {
        println!("  Employees:   {}", count);
    }
    println!("  Created:     {}", format_optional_time(department.created_at));
    println!("  Updated:     {}", format_optional_time(department.updated_at));
}
