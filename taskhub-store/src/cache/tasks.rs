//! Task table mapping

use chrono::{DateTime, Utc};
use sqlx::Sqlite;
use sqlx::query_builder::Separated;
use taskhub_core::domain::{Task, TaskPriority, TaskStatus};

use super::{CacheRecord, CachedEntity};

impl CacheRecord for Task {
    fn id(&self) -> &str {
        &self.id
    }

    fn last_synced_at(&self) -> Option<DateTime<Utc>> {
        self.last_synced_at
    }

    fn with_synced_at(mut self, synced_at: DateTime<Utc>) -> Self {
        self.last_synced_at = Some(synced_at);
        self
    }
}

impl CachedEntity for Task {
    const TABLE: &'static str = "tasks";
    const COLUMNS: &'static str = "id, title, description, status, priority, department_id, \
         assigned_to, created_by, due_date, created_at, updated_at, last_synced_at";

    type Row = TaskRow;

    fn bind_row(&self, row: &mut Separated<'_, '_, Sqlite, &'static str>, synced_at: DateTime<Utc>) {
        row.push_bind(self.id.clone())
            .push_bind(self.title.clone())
            .push_bind(self.description.clone())
            .push_bind(self.status.as_str())
            .push_bind(self.priority.as_str())
            .push_bind(self.department_id.clone())
            .push_bind(self.assigned_to.clone())
            .push_bind(self.created_by.clone())
            .push_bind(self.due_date)
            .push_bind(self.created_at)
            .push_bind(self.updated_at)
            .push_bind(synced_at);
    }
}

#[derive(sqlx::FromRow)]
pub struct TaskRow {
    id: String,
    title: String,
    description: Option<String>,
    status: String,
    priority: String,
    department_id: Option<String>,
    assigned_to: Option<String>,
    created_by: Option<String>,
    due_date: Option<DateTime<Utc>>,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
    last_synced_at: DateTime<Utc>,
}

impl From<TaskRow> for Task {
    fn from(row: TaskRow) -> Self {
        Task {
            id: row.id,
            title: row.title,
            description: row.description,
            status: row.status.parse().unwrap_or(TaskStatus::Pending),
            priority: row.priority.parse().unwrap_or(TaskPriority::Medium),
            department_id: row.department_id,
            assigned_to: row.assigned_to,
            created_by: row.created_by,
            due_date: row.due_date,
            created_at: row.created_at,
            updated_at: row.updated_at,
            last_synced_at: Some(row.last_synced_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::tests::memory_cache;

    #[tokio::test]
    async fn test_task_round_trips_enums_and_dates() {
        let cache = memory_cache().await;
        let due = Utc::now() + chrono::Duration::days(2);
        let task = Task {
            id: "t1".into(),
            title: "Quarterly review".into(),
            description: Some("Prepare slides".into()),
            status: TaskStatus::InProgress,
            priority: TaskPriority::Urgent,
            department_id: Some("d1".into()),
            assigned_to: Some("e1".into()),
            created_by: Some("m1".into()),
            due_date: Some(due),
            created_at: None,
            updated_at: None,
            last_synced_at: None,
        };

        let synced_at = Utc::now();
        cache.tasks().upsert_many(&[task.clone()], synced_at).await.unwrap();
        let cached = cache.tasks().find_by_id("t1").await.unwrap().unwrap();

        assert_eq!(cached, task.with_synced_at(synced_at));
    }
}
