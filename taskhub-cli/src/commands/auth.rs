//! Authentication command handlers

use anyhow::Result;
use clap::Subcommand;
use colored::*;
use taskhub_core::domain::AuthUser;
use taskhub_core::dto::auth::{LoginRequest, SignupRequest};

use crate::app::App;
use crate::output;
use crate::types::FetchArgs;

/// Auth subcommands
#[derive(Subcommand)]
pub enum AuthCommands {
    /// Log in and store the session
    Login {
        #[arg(short, long)]
        email: String,

        /// Password (or set TASKHUB_PASSWORD)
        #[arg(short, long, env = "TASKHUB_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Register a new admin account
    Signup {
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        email: String,

        /// Password, at least 6 characters (or set TASKHUB_PASSWORD)
        #[arg(short, long, env = "TASKHUB_PASSWORD", hide_env_values = true)]
        password: String,

        #[arg(long)]
        phone: Option<String>,
    },
    /// Forget the session and clear the local cache
    Logout,
    /// Show the logged-in user
    Whoami {
        #[command(flatten)]
        fetch: FetchArgs,
    },
}

/// Handle auth commands
pub async fn handle_auth_command(command: AuthCommands, app: &App) -> Result<()> {
    match command {
        AuthCommands::Login { email, password } => {
            let session = app
                .repos
                .shared
                .login(LoginRequest { email, password })
                .await?;
            output::success(format!(
                "Logged in as {} ({})",
                session.user.name.bold(),
                session.user.role.to_string().cyan()
            ));
            Ok(())
        }
        AuthCommands::Signup {
            name,
            email,
            password,
            phone,
        } => {
            let session = app
                .repos
                .shared
                .signup(SignupRequest {
                    name,
                    email,
                    password,
                    phone,
                })
                .await?;
            output::success(format!("Account created for {}", session.user.email.bold()));
            Ok(())
        }
        AuthCommands::Logout => {
            app.repos.shared.logout().await?;
            output::success("Logged out, local cache cleared");
            Ok(())
        }
        AuthCommands::Whoami { fetch } => whoami(app, &fetch).await,
    }
}

async fn whoami(app: &App, fetch: &FetchArgs) -> Result<()> {
    let view = output::settle(app.repos.shared.profile(fetch.policy())).await?;

    if app.config.json {
        return output::print_json(&view.data);
    }

    print_user(&view.data);
    output::print_source(view.source);
    Ok(())
}

fn print_user(user: &AuthUser) {
    println!("{}", "Current User:".bold());
    println!("  ID:         {}", user.id.cyan());
    println!("  Name:       {}", user.name);
    println!("  Email:      {}", user.email);
    println!("  Role:       {}", user.role.to_string().cyan());
    if let Some(department) = &user.department_id {
        println!("  Department: {}", department.dimmed());
    }
}
