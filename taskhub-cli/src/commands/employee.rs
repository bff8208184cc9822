//! Employee command handlers
//!
//! Admins manage every employee; managers are routed to their own team.

use anyhow::{Result, bail};
use clap::Subcommand;
use colored::*;
use taskhub_core::domain::{Employee, Role};
use taskhub_core::dto::employee::{CreateEmployee, EmployeeFilter, UpdateEmployee};

use crate::app::App;
use crate::id_resolver::resolve_id;
use crate::output::{self, format_optional_time};
use crate::types::{FetchArgs, ListArgs};

/// Employee subcommands
#[derive(Subcommand)]
pub enum EmployeeCommands {
    /// List employees (a manager sees their team)
    List {
        #[command(flatten)]
        list: ListArgs,

        /// Only employees of this department (ID or prefix)
        #[arg(short, long)]
        department: Option<String>,

        /// Only employees reporting to this manager (ID or prefix)
        #[arg(short, long)]
        manager: Option<String>,
    },
    /// Get employee details
    Get {
        /// Employee ID or unambiguous prefix
        id: String,

        #[command(flatten)]
        fetch: FetchArgs,
    },
    /// Create an employee account
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

        #[arg(long)]
        position: Option<String>,

        /// Department ID or prefix (admins only; managers hire into their own)
        #[arg(short, long)]
        department: Option<String>,

        /// Manager ID or prefix (admins only)
        #[arg(short, long)]
        manager: Option<String>,
    },
    /// Update an employee
    Update {
        /// Employee ID or unambiguous prefix
        id: String,

        #[arg(short, long)]
        name: Option<String>,

        #[arg(short, long)]
        email: Option<String>,

        #[arg(long)]
        phone: Option<String>,

        #[arg(long)]
        position: Option<String>,

        /// Department ID or prefix (admins only)
        #[arg(short, long)]
        department: Option<String>,

        /// Manager ID or prefix (admins only)
        #[arg(short, long)]
        manager: Option<String>,
    },
    /// Delete an employee
    Delete {
        /// Employee ID or unambiguous prefix
        id: String,
    },
}

/// Handle employee commands
pub async fn handle_employee_command(command: EmployeeCommands, app: &App) -> Result<()> {
    match command {
        EmployeeCommands::List {
            list,
            department,
            manager,
        } => list_employees(app, &list, department, manager).await,
        EmployeeCommands::Get { id, fetch } => get_employee(app, &id, &fetch).await,
        EmployeeCommands::Create {
            name,
            email,
            password,
            phone,
            position,
            department,
            manager,
        } => {
            let mut req = CreateEmployee {
                name,
                email,
                password,
                phone,
                position,
                department_id: None,
                manager_id: None,
            };

            let employee = if app.session()?.role() == Role::Manager {
                app.repos.manager.create_employee(req).await?
            } else {
                req.department_id = resolve_optional(app, "department", department).await?;
                req.manager_id = resolve_optional(app, "manager", manager).await?;
                app.repos.admin.create_employee(req).await?
            };

            output::success(format!(
                "Employee created: {} ({})",
                employee.name.bold(),
                employee.id.dimmed()
            ));
            Ok(())
        }
        EmployeeCommands::Update {
            id,
            name,
            email,
            phone,
            position,
            department,
            manager,
        } => {
            let id = resolve_id(app.cache.employees(), "employee", &id).await?;
            let mut req = UpdateEmployee {
                name,
                email,
                phone,
                position,
                department_id: None,
                manager_id: None,
            };

            let employee = if app.session()?.role() == Role::Manager {
                if department.is_some() || manager.is_some() {
                    bail!("Managers cannot move employees to another department or manager");
                }
                app.repos.manager.update_employee(&id, req).await?
            } else {
                req.department_id = resolve_optional(app, "department", department).await?;
                req.manager_id = resolve_optional(app, "manager", manager).await?;
                app.repos.admin.update_employee(&id, req).await?
            };

            output::success(format!("Employee updated: {}", employee.name.bold()));
            Ok(())
        }
        EmployeeCommands::Delete { id } => {
            let id = resolve_id(app.cache.employees(), "employee", &id).await?;
            if app.session()?.role() == Role::Manager {
                app.repos.manager.delete_employee(&id).await?;
            } else {
                app.repos.admin.delete_employee(&id).await?;
            }
            output::success(format!("Employee deleted: {}", id.dimmed()));
            Ok(())
        }
    }
}

async fn resolve_optional(app: &App, kind: &str, input: Option<String>) -> Result<Option<String>> {
    let Some(input) = input else {
        return Ok(None);
    };
    let id = match kind {
        "department" => resolve_id(app.cache.departments(), kind, &input).await?,
        _ => resolve_id(app.cache.managers(), kind, &input).await?,
    };
    Ok(Some(id))
}

async fn list_employees(
    app: &App,
    args: &ListArgs,
    department: Option<String>,
    manager: Option<String>,
) -> Result<()> {
    let request = args.request(app.page_size());
    let policy = args.fetch.policy();

    let stream = if app.role() == Some(Role::Manager) {
        app.repos.manager.team(request, policy).await?
    } else {
        let filter = EmployeeFilter {
            department_id: resolve_optional(app, "department", department).await?,
            manager_id: resolve_optional(app, "manager", manager).await?,
        };
        app.repos.admin.employees(request, filter, policy)
    };
    let view = output::settle(stream).await?;

    if app.config.json {
        return output::print_json(&view.data);
    }

    output::print_page_header("employee(s)", &view.data, view.source);
    for employee in &view.data.items {
        println!("  {} {} {}", "▸".cyan(), employee.name.bold(), employee.id.dimmed());
        println!("    Email:    {}", employee.email);
        if let Some(position) = &employee.position {
            println!("    Position: {}", position);
        }
        println!();
    }
    output::print_page_footer(&view.data);

    Ok(())
}

async fn get_employee(app: &App, id: &str, fetch: &FetchArgs) -> Result<()> {
    let id = resolve_id(app.cache.employees(), "employee", id).await?;
    let stream = if app.role() == Some(Role::Manager) {
        app.repos.manager.employee(&id, fetch.policy())
    } else {
        app.repos.admin.employee(&id, fetch.policy())
    };
    let view = output::settle(stream).await?;

    if app.config.json {
        return output::print_json(&view.data);
    }

    print_employee_details(&view.data);
    output::print_source(view.source);
    Ok(())
}

fn print_employee_details(employee: &Employee) {
    println!("{}", "Employee Details:".bold());
    println!("  ID:         {}", employee.id.cyan());
    println!("  Name:       {}", employee.name);
    println!("  Email:      {}", employee.email);
    if let Some(phone) = &employee.phone {
        println!("  Phone:      {}", phone);
    }
    if let Some(position) = &employee.position {
        println!("  Position:   {}", position);
    }
    if let Some(department) = &employee.department_id {
        println!("  Department: {}", department.dimmed());
    }
    if let Some(manager) = &employee.manager_id {
        println!("  Manager:    {}", manager.dimmed());
    }
    println!("  Created:    {}", format_optional_time(employee.created_at));
}
