//! Department table mapping

use chrono::{DateTime, Utc};
use sqlx::Sqlite;
use sqlx::query_builder::Separated;
use taskhub_core::domain::Department;

use super::{CacheRecord, CachedEntity};

impl CacheRecord for Department {
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

impl CachedEntity for Department {
    const TABLE: &'static str = "departments";
    const COLUMNS: &'static str =
        "id, name, description, manager_id, employee_count, created_at, updated_at, last_synced_at";

    type Row = DepartmentRow;

    fn bind_row(&self, row: &mut Separated<'_, '_, Sqlite, &'static str>, synced_at: DateTime<Utc>) {
        row.push_bind(self.id.clone())
            .push_bind(self.name.clone())
            .push_bind(self.description.clone())
            .push_bind(self.manager_id.clone())
            .push_bind(self.employee_count.map(i64::from))
            .push_bind(self.created_at)
            .push_bind(self.updated_at)
            .push_bind(synced_at);
    }
}

#[derive(sqlx::FromRow)]
pub struct DepartmentRow {
    id: String,
    name: String,
    description: Option<String>,
    manager_id: Option<String>,
    employee_count: Option<i64>,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
    last_synced_at: DateTime<Utc>,
}

impl From<DepartmentRow> for Department {
    fn from(row: DepartmentRow) -> Self {
        Department {
            id: row.id,
            name: row.name,
            description: row.description,
            manager_id: row.manager_id,
            employee_count: row.employee_count.and_then(|n| u32::try_from(n).ok()),
            created_at: row.created_at,
            updated_at: row.updated_at,
            last_synced_at: Some(row.last_synced_at),
        }
    }
}
