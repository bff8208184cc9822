//! Task command handlers
//!
//! Handles listing, viewing, creating, updating and deleting tasks, and
//! moving tasks through their statuses.

use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::Subcommand;
use colored::*;
use taskhub_core::domain::{Role, Task, TaskPriority, TaskStatus};
use taskhub_core::dto::task::{CreateTask, TaskFilter, UpdateTask};

use crate::app::App;
use crate::id_resolver::resolve_id;
use crate::output::{self, colorize_priority, colorize_status, format_optional_time, format_time};
use crate::types::{FetchArgs, ListArgs, parse_due};

/// Task subcommands
#[derive(Subcommand)]
pub enum TaskCommands {
    /// List tasks (an employee sees the tasks assigned to them)
    List {
        #[command(flatten)]
        list: ListArgs,

        /// pending, in-progress, completed or cancelled
        #[arg(long)]
        status: Option<TaskStatus>,

        /// low, medium, high or urgent
        #[arg(long)]
        priority: Option<TaskPriority>,

        /// Only tasks assigned to this employee (ID or prefix)
        #[arg(short, long)]
        assigned_to: Option<String>,

        /// Only tasks of this department (ID or prefix)
        #[arg(short, long)]
        department: Option<String>,

        /// Only tasks assigned to me
        #[arg(long, conflicts_with = "assigned_to")]
        mine: bool,
    },
    /// Get task details
    Get {
        /// Task ID or unambiguous prefix
        id: String,

        #[command(flatten)]
        fetch: FetchArgs,
    },
    /// Create a task (admin or manager)
    Create {
        #[arg(short, long)]
        title: String,

        #[arg(short, long)]
        description: Option<String>,

        #[arg(short, long, default_value = "medium")]
        priority: TaskPriority,

        /// Department ID or prefix (managers default to their own)
        #[arg(long)]
        department: Option<String>,

        /// Assignee employee ID or prefix
        #[arg(short, long)]
        assign: Option<String>,

        /// Due date (YYYY-MM-DD or RFC 3339)
        #[arg(long, value_parser = parse_due)]
        due: Option<DateTime<Utc>>,
    },
    /// Update a task (admin or manager)
    Update {
        /// Task ID or unambiguous prefix
        id: String,

        #[arg(short, long)]
        title: Option<String>,

        #[arg(short, long)]
        description: Option<String>,

        #[arg(short, long)]
        status: Option<TaskStatus>,

        #[arg(short, long)]
        priority: Option<TaskPriority>,

        /// Assignee employee ID or prefix
        #[arg(short, long)]
        assign: Option<String>,

        /// Due date (YYYY-MM-DD or RFC 3339)
        #[arg(long, value_parser = parse_due)]
        due: Option<DateTime<Utc>>,
    },
    /// Change the status of a task
    Status {
        /// Task ID or unambiguous prefix
        id: String,

        /// pending, in-progress, completed or cancelled
        status: TaskStatus,
    },
    /// Delete a task (admin or manager)
    Delete {
        /// Task ID or unambiguous prefix
        id: String,
    },
}

/// Handle task commands
pub async fn handle_task_command(command: TaskCommands, app: &App) -> Result<()> {
    match command {
        TaskCommands::List {
            list,
            status,
            priority,
            assigned_to,
            department,
            mine,
        } => {
            let mut filter = TaskFilter {
                status,
                priority,
                assigned_to: None,
                department_id: None,
            };
            if let Some(assignee) = assigned_to {
                filter.assigned_to = Some(resolve_id(app.cache.employees(), "employee", &assignee).await?);
            }
            if let Some(department) = department {
                filter.department_id =
                    Some(resolve_id(app.cache.departments(), "department", &department).await?);
            }
            let mine = mine || app.role() == Some(Role::Employee);
            list_tasks(app, &list, filter, mine).await
        }
        TaskCommands::Get { id, fetch } => get_task(app, &id, &fetch).await,
        TaskCommands::Create {
            title,
            description,
            priority,
            department,
            assign,
            due,
        } => {
            let department_id = match department {
                Some(d) => Some(resolve_id(app.cache.departments(), "department", &d).await?),
                None => None,
            };
            let assigned_to = match assign {
                Some(a) => Some(resolve_id(app.cache.employees(), "employee", &a).await?),
                None => None,
            };
            let task = app
                .repos
                .tasks
                .create_task(CreateTask {
                    title,
                    description,
                    priority,
                    department_id,
                    assigned_to,
                    due_date: due,
                })
                .await?;
            output::success(format!(
                "Task created: {} ({})",
                task.title.bold(),
                task.id.dimmed()
            ));
            Ok(())
        }
        TaskCommands::Update {
            id,
            title,
            description,
            status,
            priority,
            assign,
            due,
        } => {
            let id = resolve_id(app.cache.tasks(), "task", &id).await?;
            let assigned_to = match assign {
                Some(a) => Some(resolve_id(app.cache.employees(), "employee", &a).await?),
                None => None,
            };
            let task = app
                .repos
                .tasks
                .update_task(
                    &id,
                    UpdateTask {
                        title,
                        description,
                        status,
                        priority,
                        assigned_to,
                        due_date: due,
                    },
                )
                .await?;
            output::success(format!("Task updated: {}", task.title.bold()));
            Ok(())
        }
        TaskCommands::Status { id, status } => {
            let id = resolve_id(app.cache.tasks(), "task", &id).await?;
            let task = app.repos.tasks.update_status(&id, status).await?;
            output::success(format!(
                "Task {} is now {}",
                task.title.bold(),
                colorize_status(task.status)
            ));
            Ok(())
        }
        TaskCommands::Delete { id } => {
            let id = resolve_id(app.cache.tasks(), "task", &id).await?;
            app.repos.tasks.delete_task(&id).await?;
            output::success(format!("Task deleted: {}", id.dimmed()));
            Ok(())
        }
    }
}

async fn list_tasks(app: &App, args: &ListArgs, filter: TaskFilter, mine: bool) -> Result<()> {
    let request = args.request(app.page_size());
    let policy = args.fetch.policy();

    let stream = if mine {
        app.repos.tasks.my_tasks(filter, request, policy).await?
    } else {
        app.repos.tasks.tasks(filter, request, policy)
    };
    let view = output::settle(stream).await?;

    if app.config.json {
        return output::print_json(&view.data);
    }

    output::print_page_header("task(s)", &view.data, view.source);
    let now = Utc::now();
    for task in &view.data.items {
        print_task_summary(task, now);
    }
    output::print_page_footer(&view.data);

    Ok(())
}

async fn get_task(app: &App, id: &str, fetch: &FetchArgs) -> Result<()> {
    let id = resolve_id(app.cache.tasks(), "task", id).await?;
    let view = output::settle(app.repos.tasks.task(&id, fetch.policy())).await?;

    if app.config.json {
        return output::print_json(&view.data);
    }

    print_task_details(&view.data);
    output::print_source(view.source);
    Ok(())
}

fn print_task_summary(task: &Task, now: DateTime<Utc>) {
    println!("  {} {} {}", "▸".cyan(), task.title.bold(), task.id.dimmed());
    println!(
        "    Status: {}  Priority: {}",
        colorize_status(task.status),
        colorize_priority(task.priority)
    );
    if let Some(due) = task.due_date {
        let due_str = format_time(due);
        if task.is_overdue(now) {
            println!("    Due:    {} {}", due_str.red(), "(overdue)".red());
        } else {
            println!("    Due:    {}", due_str);
        }
    }
    println!();
}

fn print_task_details(task: &Task) {
    println!("{}", "Task Details:".bold());
    println!("  ID:          {}", task.id.cyan());
    println!("  Title:       {}", task.title);
    println!("  Status:      {}", colorize_status(task.status));
    println!("  Priority:    {}", colorize_priority(task.priority));
    if let Some(assignee) = &task.assigned_to {
        println!("  Assigned to: {}", assignee.dimmed());
    }
    if let Some(department) = &task.department_id {
        println!("  Department:  {}", department.dimmed());
    }
    if let Some(creator) = &task.created_by {
        println!("  Created by:  {}", creator.dimmed());
    }
    println!("  Due:         {}", format_optional_time(task.due_date));
    println!("  Created:     {}", format_optional_time(task.created_at));
    println!("  Updated:     {}", format_optional_time(task.updated_at));

    if let Some(description) = &task.description {
        println!("\n{}", "Description:".bold());
        println!("{}", description);
    }
}
