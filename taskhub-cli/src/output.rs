//! Rendering helpers shared by the command handlers

use anyhow::Result;
use chrono::{DateTime, Local, Utc};
use colored::*;
use futures::stream::BoxStream;
use serde::Serialize;
use taskhub_core::domain::{TaskPriority, TaskStatus};
use taskhub_core::dto::Page;
use taskhub_store::{DataSource, Resource, Settled, SyncError};

/// Result of a read as shown to the user
pub struct View<T> {
    pub data: T,
    pub source: DataSource,
}

/// Drain a read stream into what should be displayed
///
/// When the refresh failed but a cached copy exists, the copy is shown with a
/// warning instead of failing the command.
pub async fn settle<T>(stream: BoxStream<'static, Resource<T>>) -> Result<View<T>> {
    let settled = Settled::from_stream(stream).await;

    match (settled.data, settled.error) {
        (Some(data), Some(error)) => {
            eprintln!(
                "{} {} Showing cached data.",
                "⚠".yellow(),
                error.user_message().yellow()
            );
            Ok(View {
                data,
                source: DataSource::Cache,
            })
        }
        (Some(data), None) => Ok(View {
            data,
            source: settled.source.unwrap_or(DataSource::Cache),
        }),
        (None, Some(error)) => Err(error.into()),
        (None, None) => Err(SyncError::NotCached("the requested data".to_string()).into()),
    }
}

/// Print `value` as pretty JSON
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Heading line for a page of results
pub fn print_page_header<T>(noun: &str, page: &Page<T>, source: DataSource) {
    if page.is_empty() {
        println!("{}", format!("No {} found.", noun).yellow());
        return;
    }

    println!(
        "{} {}",
        format!(
            "Found {} {} (page {}/{}, {} total):",
            page.len(),
            noun,
            page.meta.page,
            page.meta.total_pages.max(1),
            page.meta.total
        )
        .bold(),
        source_tag(source)
    );
    println!();
}

/// Hint printed under a page that has a successor
pub fn print_page_footer<T>(page: &Page<T>) {
    if page.meta.has_next_page {
        println!(
            "{}",
            format!("More results: --page {}", page.meta.page + 1).dimmed()
        );
    }
}

fn source_tag(source: DataSource) -> ColoredString {
    match source {
        DataSource::Cache => "(cached)".dimmed(),
        DataSource::Network => "".normal(),
    }
}

/// Note under a single record that came from the cache
pub fn print_source(source: DataSource) {
    if source == DataSource::Cache {
        println!("  {}", source_tag(source));
    }
}

pub fn format_time(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}

pub fn format_optional_time(at: Option<DateTime<Utc>>) -> String {
    at.map(format_time).unwrap_or_else(|| "-".to_string())
}

/// Colorize task status for display
pub fn colorize_status(status: TaskStatus) -> ColoredString {
    let status_str = status.as_str();
    match status {
        TaskStatus::Pending => status_str.yellow(),
        TaskStatus::InProgress => status_str.cyan(),
        TaskStatus::Completed => status_str.green(),
        TaskStatus::Cancelled => status_str.dimmed(),
    }
}

/// Colorize task priority for display
pub fn colorize_priority(priority: TaskPriority) -> ColoredString {
    let priority_str = priority.as_str();
    match priority {
        TaskPriority::Low => priority_str.dimmed(),
        TaskPriority::Medium => priority_str.normal(),
        TaskPriority::High => priority_str.yellow(),
        TaskPriority::Urgent => priority_str.red().bold(),
    }
}

pub fn success(message: impl std::fmt::Display) {
    println!("{} {}", "✓".green(), message);
}
