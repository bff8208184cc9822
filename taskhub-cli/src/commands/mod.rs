//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod admin;
mod auth;
mod cache;
mod department;
mod employee;
mod manager;
mod sync;
mod task;

pub use admin::AdminCommands;
pub use auth::AuthCommands;
pub use cache::CacheCommands;
pub use department::DepartmentCommands;
pub use employee::EmployeeCommands;
pub use manager::ManagerCommands;
pub use task::TaskCommands;

use anyhow::Result;
use clap::Subcommand;

use crate::app::App;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Log in, sign up, log out and show the current user
    Auth {
        #[command(subcommand)]
        command: AuthCommands,
    },
    /// Admin accounts and dashboard statistics
    Admin {
        #[command(subcommand)]
        command: AdminCommands,
    },
    /// Department management
    Department {
        #[command(subcommand)]
        command: DepartmentCommands,
    },
    /// Manager management
    Manager {
        #[command(subcommand)]
        command: ManagerCommands,
    },
    /// Employee management
    Employee {
        #[command(subcommand)]
        command: EmployeeCommands,
    },
    /// Task management
    Task {
        #[command(subcommand)]
        command: TaskCommands,
    },
    /// Refresh everything visible to the current user
    Sync,
    /// Local cache maintenance
    Cache {
        #[command(subcommand)]
        command: CacheCommands,
    },
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
pub async fn handle_command(command: Commands, app: &App) -> Result<()> {
    match command {
        Commands::Auth { command } => auth::handle_auth_command(command, app).await,
        Commands::Admin { command } => admin::handle_admin_command(command, app).await,
        Commands::Department { command } => {
            department::handle_department_command(command, app).await
        }
        Commands::Manager { command } => manager::handle_manager_command(command, app).await,
        Commands::Employee { command } => employee::handle_employee_command(command, app).await,
        Commands::Task { command } => task::handle_task_command(command, app).await,
        Commands::Sync => sync::handle_sync(app).await,
        Commands::Cache { command } => cache::handle_cache_command(command, app).await,
    }
}
