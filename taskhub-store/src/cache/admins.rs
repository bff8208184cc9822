//! Admin table mapping

use chrono::{DateTime, Utc};
use sqlx::Sqlite;
use sqlx::query_builder::Separated;
use taskhub_core::domain::Admin;

use super::{CacheRecord, CachedEntity};

impl CacheRecord for Admin {
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

impl CachedEntity for Admin {
    const TABLE: &'static str = "admins";
    const COLUMNS: &'static str = "id, name, email, phone, created_at, last_synced_at";

    type Row = AdminRow;

    fn bind_row(&self, row: &mut Separated<'_, '_, Sqlite, &'static str>, synced_at: DateTime<Utc>) {
        row.push_bind(self.id.clone())
            .push_bind(self.name.clone())
            .push_bind(self.email.clone())
            .push_bind(self.phone.clone())
            .push_bind(self.created_at)
            .push_bind(synced_at);
    }
}

#[derive(sqlx::FromRow)]
pub struct AdminRow {
    id: String,
    name: String,
    email: String,
    phone: Option<String>,
    created_at: Option<DateTime<Utc>>,
    last_synced_at: DateTime<Utc>,
}

impl From<AdminRow> for Admin {
    fn from(row: AdminRow) -> Self {
        Admin {
            id: row.id,
            name: row.name,
            email: row.email,
            phone: row.phone,
            created_at: row.created_at,
            last_synced_at: Some(row.last_synced_at),
        }
    }
}
