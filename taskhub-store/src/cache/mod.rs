//! Local cache
//!
//! Typed SQLite tables for every entity plus the bookkeeping the sync engine
//! needs: the page index, the persisted session and JSON snapshots.
//!
//! Writes are wholesale: a record fetched from the network replaces the cached
//! row with the same id and stamps it with the time of the sync.

mod admins;
mod departments;
mod employees;
mod managers;
pub mod page_index;
pub mod session;
pub mod snapshot;
mod tasks;

pub use page_index::{PageEntry, PageIndex};
pub use session::SessionStore;
pub use snapshot::SnapshotStore;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::query_builder::Separated;
use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::Arc;
use taskhub_core::domain::{Admin, Department, Employee, Manager, Task};

/// Rows per INSERT statement, keeping well under SQLite's bind limit
const UPSERT_CHUNK: usize = 50;

/// A record that can be cached and refreshed
pub trait CacheRecord: Clone + Send + Sync + 'static {
    fn id(&self) -> &str;

    /// When this copy was last written from the network
    fn last_synced_at(&self) -> Option<DateTime<Utc>>;

    fn with_synced_at(self, synced_at: DateTime<Utc>) -> Self;
}

/// Mapping of a record onto its SQLite table
pub trait CachedEntity: CacheRecord {
    const TABLE: &'static str;

    /// Column list, `last_synced_at` last, in the order `bind_row` binds
    const COLUMNS: &'static str;

    type Row: for<'r> sqlx::FromRow<'r, SqliteRow> + Send + Unpin + Into<Self>;

    fn bind_row(&self, row: &mut Separated<'_, '_, Sqlite, &'static str>, synced_at: DateTime<Utc>);
}

/// Storage of one entity kind
#[async_trait]
pub trait EntityCache<T: CacheRecord>: Send + Sync {
    /// Insert or wholesale replace `items`, stamping them with `synced_at`
    async fn upsert_many(&self, items: &[T], synced_at: DateTime<Utc>) -> Result<(), sqlx::Error>;

    async fn find_by_id(&self, id: &str) -> Result<Option<T>, sqlx::Error>;

    /// Records for `ids` in the same order, skipping ids not cached
    async fn find_by_ids(&self, ids: &[String]) -> Result<Vec<T>, sqlx::Error>;

    async fn delete(&self, id: &str) -> Result<bool, sqlx::Error>;

    async fn clear(&self) -> Result<u64, sqlx::Error>;

    /// Cached ids starting with `prefix`
    async fn ids_with_prefix(&self, prefix: &str) -> Result<Vec<String>, sqlx::Error>;
}

/// [`EntityCache`] backed by the entity's own table
pub struct SqliteTable<T> {
    pool: SqlitePool,
    _entity: PhantomData<fn() -> T>,
}

impl<T> SqliteTable<T> {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            _entity: PhantomData,
        }
    }
}

impl<T> Clone for SqliteTable<T> {
    fn clone(&self) -> Self {
        Self::new(self.pool.clone())
    }
}

#[async_trait]
impl<T: CachedEntity> EntityCache<T> for SqliteTable<T> {
    async fn upsert_many(&self, items: &[T], synced_at: DateTime<Utc>) -> Result<(), sqlx::Error> {
        if items.is_empty() {
            return Ok(());
        }

        let mut tx = self.pool.begin().await?;
        for chunk in items.chunks(UPSERT_CHUNK) {
            let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new(format!(
                "INSERT OR REPLACE INTO {} ({}) ",
                T::TABLE,
                T::COLUMNS
            ));
            qb.push_values(chunk, |mut row, item| item.bind_row(&mut row, synced_at));
            qb.build().execute(&mut *tx).await?;
        }
        tx.commit().await?;

        tracing::debug!(table = T::TABLE, count = items.len(), "Cached records");
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<T>, sqlx::Error> {
        let sql = format!("SELECT {} FROM {} WHERE id = ?", T::COLUMNS, T::TABLE);
        let row = sqlx::query_as::<_, T::Row>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Into::into))
    }

    async fn find_by_ids(&self, ids: &[String]) -> Result<Vec<T>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new(format!(
            "SELECT {} FROM {} WHERE id IN (",
            T::COLUMNS,
            T::TABLE
        ));
        let mut separated = qb.separated(", ");
        for id in ids {
            separated.push_bind(id.clone());
        }
        separated.push_unseparated(")");

        let rows = qb.build_query_as::<T::Row>().fetch_all(&self.pool).await?;
        let mut by_id: HashMap<String, T> = rows
            .into_iter()
            .map(|row| {
                let record: T = row.into();
                (record.id().to_string(), record)
            })
            .collect();

        Ok(ids.iter().filter_map(|id| by_id.remove(id)).collect())
    }

    async fn delete(&self, id: &str) -> Result<bool, sqlx::Error> {
        let sql = format!("DELETE FROM {} WHERE id = ?", T::TABLE);
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;

        Ok(result.rows_affected() > 0)
    }

    async fn clear(&self) -> Result<u64, sqlx::Error> {
        let sql = format!("DELETE FROM {}", T::TABLE);
        let result = sqlx::query(&sql).execute(&self.pool).await?;

        Ok(result.rows_affected())
    }

    async fn ids_with_prefix(&self, prefix: &str) -> Result<Vec<String>, sqlx::Error> {
        let sql = format!(
            "SELECT id FROM {} WHERE id LIKE ? ESCAPE '\\' ORDER BY id LIMIT 20",
            T::TABLE
        );
        sqlx::query_scalar::<_, String>(&sql)
            .bind(format!("{}%", escape_like(prefix)))
            .fetch_all(&self.pool)
            .await
    }
}

fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Handle on every cached table of one database
#[derive(Clone)]
pub struct LocalCache {
    pool: SqlitePool,
    admins: Arc<dyn EntityCache<Admin>>,
    departments: Arc<dyn EntityCache<Department>>,
    managers: Arc<dyn EntityCache<Manager>>,
    employees: Arc<dyn EntityCache<Employee>>,
    tasks: Arc<dyn EntityCache<Task>>,
}

impl LocalCache {
    /// Wrap a pool whose schema is already migrated
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            admins: Arc::new(SqliteTable::<Admin>::new(pool.clone())),
            departments: Arc::new(SqliteTable::<Department>::new(pool.clone())),
            managers: Arc::new(SqliteTable::<Manager>::new(pool.clone())),
            employees: Arc::new(SqliteTable::<Employee>::new(pool.clone())),
            tasks: Arc::new(SqliteTable::<Task>::new(pool.clone())),
            pool,
        }
    }

    /// Open the database at `database_url` and migrate it
    pub async fn open(database_url: &str) -> Result<Self, sqlx::Error> {
        let pool = crate::db::connect(database_url).await?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn admins(&self) -> Arc<dyn EntityCache<Admin>> {
        self.admins.clone()
    }

    pub fn departments(&self) -> Arc<dyn EntityCache<Department>> {
        self.departments.clone()
    }

    pub fn managers(&self) -> Arc<dyn EntityCache<Manager>> {
        self.managers.clone()
    }

    pub fn employees(&self) -> Arc<dyn EntityCache<Employee>> {
        self.employees.clone()
    }

    pub fn tasks(&self) -> Arc<dyn EntityCache<Task>> {
        self.tasks.clone()
    }

    pub fn pages(&self) -> PageIndex {
        PageIndex::new(self.pool.clone())
    }

    pub fn session(&self) -> SessionStore {
        SessionStore::new(self.pool.clone())
    }

    pub fn snapshots(&self) -> SnapshotStore {
        SnapshotStore::new(self.pool.clone())
    }

    /// Drop every cached record, page and snapshot; the session is kept
    pub async fn clear_all(&self) -> Result<(), sqlx::Error> {
        self.admins.clear().await?;
        self.departments.clear().await?;
        self.managers.clear().await?;
        self.employees.clear().await?;
        self.tasks.clear().await?;
        self.pages().clear().await?;
        self.snapshots().clear().await?;

        tracing::info!("Local cache cleared");
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::Duration;

    pub(crate) async fn memory_cache() -> LocalCache {
        LocalCache::open("sqlite::memory:").await.unwrap()
    }

    pub(crate) fn department(id: &str, name: &str) -> Department {
        Department {
            id: id.to_string(),
            name: name.to_string(),
            description: None,
            manager_id: None,
            employee_count: Some(3),
            created_at: None,
            updated_at: None,
            last_synced_at: None,
        }
    }

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("ab"), "ab");
        assert_eq!(escape_like("a%b_c\\"), "a\\%b\\_c\\\\");
    }

    #[tokio::test]
    async fn test_upsert_and_find() {
        let cache = memory_cache().await;
        let table = cache.departments();
        let now = Utc::now();

        table
            .upsert_many(&[department("d1", "Ops"), department("d2", "HR")], now)
            .await
            .unwrap();

        let found = table.find_by_id("d1").await.unwrap().unwrap();
        assert_eq!(found.name, "Ops");
        assert_eq!(found.employee_count, Some(3));
        assert_eq!(found.last_synced_at, Some(now));
        assert!(table.find_by_id("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_upsert_overwrites_wholesale() {
        let cache = memory_cache().await;
        let table = cache.departments();
        let first = Utc::now() - Duration::minutes(10);
        let second = Utc::now();

        let mut original = department("d1", "Ops");
        original.description = Some("Operations".into());
        table.upsert_many(&[original], first).await.unwrap();

        table
            .upsert_many(&[department("d1", "Operations")], second)
            .await
            .unwrap();

        let found = table.find_by_id("d1").await.unwrap().unwrap();
        assert_eq!(found.name, "Operations");
        assert_eq!(found.description, None);
        assert_eq!(found.last_synced_at, Some(second));
    }

    #[tokio::test]
    async fn test_find_by_ids_keeps_requested_order() {
        let cache = memory_cache().await;
        let table = cache.departments();
        let items: Vec<_> = (0..120)
            .map(|i| department(&format!("d{:03}", i), &format!("Dept {}", i)))
            .collect();
        table.upsert_many(&items, Utc::now()).await.unwrap();

        let ids = vec!["d042".to_string(), "missing".to_string(), "d007".to_string(), "d119".to_string()];
        let found = table.find_by_ids(&ids).await.unwrap();
        let found_ids: Vec<&str> = found.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(found_ids, vec!["d042", "d007", "d119"]);

        assert!(table.find_by_ids(&[]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_and_clear() {
        let cache = memory_cache().await;
        let table = cache.departments();
        table
            .upsert_many(&[department("d1", "Ops"), department("d2", "HR")], Utc::now())
            .await
            .unwrap();

        assert!(table.delete("d1").await.unwrap());
        assert!(!table.delete("d1").await.unwrap());
        assert_eq!(table.clear().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_ids_with_prefix() {
        let cache = memory_cache().await;
        let table = cache.departments();
        table
            .upsert_many(
                &[department("65af01", "A"), department("65af02", "B"), department("77bb", "C")],
                Utc::now(),
            )
            .await
            .unwrap();

        assert_eq!(table.ids_with_prefix("65af").await.unwrap().len(), 2);
        assert_eq!(table.ids_with_prefix("77").await.unwrap(), vec!["77bb".to_string()]);
        assert!(table.ids_with_prefix("%").await.unwrap().is_empty());
    }
}
