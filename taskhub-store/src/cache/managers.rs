//! Manager table mapping

use chrono::{DateTime, Utc};
use sqlx::Sqlite;
use sqlx::query_builder::Separated;
use taskhub_core::domain::Manager;

use super::{CacheRecord, CachedEntity};

impl CacheRecord for Manager {
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

impl CachedEntity for Manager {
    const TABLE: &'static str = "managers";
    const COLUMNS: &'static str = "id, name, email, phone, department_id, created_at, last_synced_at";

    type Row = ManagerRow;

    fn bind_row(&self, row: &mut Separated<'_, '_, Sqlite, &'static str>, synced_at: DateTime<Utc>) {
        row.push_bind(self.id.clone())
            .push_bind(self.name.clone())
            .push_bind(self.email.clone())
            .push_bind(self.phone.clone())
            .push_bind(self.department_id.clone())
            .push_bind(self.created_at)
            .push_bind(synced_at);
    }
}

#[derive(sqlx::FromRow)]
pub struct ManagerRow {
    id: String,
    name: String,
    email: String,
    phone: Option<String>,
    department_id: Option<String>,
    created_at: Option<DateTime<Utc>>,
    last_synced_at: DateTime<Utc>,
}

impl From<ManagerRow> for Manager {
    fn from(row: ManagerRow) -> Self {
        Manager {
            id: row.id,
            name: row.name,
            email: row.email,
            phone: row.phone,
            department_id: row.department_id,
            created_at: row.created_at,
            last_synced_at: Some(row.last_synced_at),
        }
    }
}
