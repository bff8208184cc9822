//! Page index
//!
//! Remembers which ids each remote page returned, in order, together with the
//! pagination metadata. An offline read of a page replays exactly what the
//! server last answered instead of guessing from the entity tables.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use taskhub_core::dto::PaginationMeta;

/// A remembered remote page
#[derive(Debug, Clone, PartialEq)]
pub struct PageEntry {
    pub ids: Vec<String>,
    pub meta: PaginationMeta,
    pub synced_at: DateTime<Utc>,
    /// Set when a mutation touched the scope after this page was fetched
    pub stale: bool,
}

#[derive(sqlx::FromRow)]
struct PageRow {
    item_ids: String,
    meta_page: i64,
    page_limit: i64,
    total: i64,
    total_pages: i64,
    has_next: bool,
    has_prev: bool,
    synced_at: DateTime<Utc>,
    stale: bool,
}

impl PageRow {
    fn into_entry(self) -> Result<PageEntry, sqlx::Error> {
        let ids: Vec<String> =
            serde_json::from_str(&self.item_ids).map_err(|e| sqlx::Error::Decode(Box::new(e)))?;

        Ok(PageEntry {
            ids,
            meta: PaginationMeta {
                page: clamp_u32(self.meta_page),
                limit: clamp_u32(self.page_limit),
                total: u64::try_from(self.total).unwrap_or(0),
                total_pages: clamp_u32(self.total_pages),
                has_next_page: self.has_next,
                has_prev_page: self.has_prev,
            },
            synced_at: self.synced_at,
            stale: self.stale,
        })
    }
}

fn clamp_u32(value: i64) -> u32 {
    u32::try_from(value.max(0)).unwrap_or(u32::MAX)
}

#[derive(Clone)]
pub struct PageIndex {
    pool: SqlitePool,
}

impl PageIndex {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Record the ids returned for `page` of `(scope, key)`, replacing any earlier copy
    ///
    /// `page` is the page that was asked for; the server may report another
    /// one in `meta` (for example when it clamps an out-of-range request).
    pub async fn save(
        &self,
        scope: &str,
        key: &str,
        page: u32,
        meta: &PaginationMeta,
        ids: &[String],
        synced_at: DateTime<Utc>,
    ) -> Result<(), sqlx::Error> {
        let item_ids =
            serde_json::to_string(ids).map_err(|e| sqlx::Error::Encode(Box::new(e)))?;

        sqlx::query(
            r#"
            INSERT OR REPLACE INTO page_index
                (scope, query_key, page, item_ids, meta_page, page_limit, total,
                 total_pages, has_next, has_prev, synced_at, stale)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, 0)
            "#,
        )
        .bind(scope)
        .bind(key)
        .bind(i64::from(page))
        .bind(item_ids)
        .bind(i64::from(meta.page))
        .bind(i64::from(meta.limit))
        .bind(i64::try_from(meta.total).unwrap_or(i64::MAX))
        .bind(i64::from(meta.total_pages))
        .bind(meta.has_next_page)
        .bind(meta.has_prev_page)
        .bind(synced_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn load(
        &self,
        scope: &str,
        key: &str,
        page: u32,
    ) -> Result<Option<PageEntry>, sqlx::Error> {
        let row = sqlx::query_as::<_, PageRow>(
            r#"
            SELECT item_ids, meta_page, page_limit, total, total_pages, has_next, has_prev,
                   synced_at, stale
            FROM page_index
            WHERE scope = ? AND query_key = ? AND page = ?
            "#,
        )
        .bind(scope)
        .bind(key)
        .bind(i64::from(page))
        .fetch_optional(&self.pool)
        .await?;

        row.map(PageRow::into_entry).transpose()
    }

    /// Mark every page of `scope` stale so the next read refetches it
    pub async fn invalidate(&self, scope: &str) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("UPDATE page_index SET stale = 1 WHERE scope = ?")
            .bind(scope)
            .execute(&self.pool)
            .await?;

        tracing::debug!(scope, pages = result.rows_affected(), "Invalidated cached pages");
        Ok(result.rows_affected())
    }

    pub async fn clear(&self) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM page_index")
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::tests::memory_cache;

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_save_and_load() {
        let pages = memory_cache().await.pages();
        let meta = PaginationMeta::new(2, 10, 25);
        let now = Utc::now();

        pages
            .save("tasks", "limit=10", 2, &meta, &ids(&["t3", "t1", "t2"]), now)
            .await
            .unwrap();

        let entry = pages.load("tasks", "limit=10", 2).await.unwrap().unwrap();
        assert_eq!(entry.ids, ids(&["t3", "t1", "t2"]));
        assert_eq!(entry.meta, meta);
        assert_eq!(entry.synced_at, now);
        assert!(!entry.stale);

        assert!(pages.load("tasks", "limit=10", 1).await.unwrap().is_none());
        assert!(pages.load("tasks", "limit=20", 2).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_invalidate_only_touches_scope() {
        let pages = memory_cache().await.pages();
        let meta = PaginationMeta::new(1, 10, 1);
        pages.save("tasks", "k", 1, &meta, &ids(&["t1"]), Utc::now()).await.unwrap();
        pages.save("employees", "k", 1, &meta, &ids(&["e1"]), Utc::now()).await.unwrap();

        assert_eq!(pages.invalidate("tasks").await.unwrap(), 1);
        assert!(pages.load("tasks", "k", 1).await.unwrap().unwrap().stale);
        assert!(!pages.load("employees", "k", 1).await.unwrap().unwrap().stale);

        // A fresh save clears the flag
        pages.save("tasks", "k", 1, &meta, &ids(&["t1"]), Utc::now()).await.unwrap();
        assert!(!pages.load("tasks", "k", 1).await.unwrap().unwrap().stale);
    }

    #[tokio::test]
    async fn test_clear() {
        let pages = memory_cache().await.pages();
        let meta = PaginationMeta::new(1, 10, 0);
        pages.save("tasks", "k", 1, &meta, &[], Utc::now()).await.unwrap();

        assert_eq!(pages.clear().await.unwrap(), 1);
        assert!(pages.load("tasks", "k", 1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_keyed_on_requested_page() {
        let pages = memory_cache().await.pages();
        // Asked for page 9, the server clamped to its last page
        let meta = PaginationMeta::new(3, 10, 25);
        pages.save("tasks", "k", 9, &meta, &ids(&["t21"]), Utc::now()).await.unwrap();

        let entry = pages.load("tasks", "k", 9).await.unwrap().unwrap();
        assert_eq!(entry.meta.page, 3);
        assert_eq!(entry.ids, ids(&["t21"]));
        assert!(pages.load("tasks", "k", 3).await.unwrap().is_none());
    }
}
