//! JSON snapshots of values that are not paged collections

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct SnapshotStore {
    pool: SqlitePool,
}

impl SnapshotStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn save<T: Serialize>(
        &self,
        key: &str,
        value: &T,
        synced_at: DateTime<Utc>,
    ) -> Result<(), sqlx::Error> {
        let payload =
            serde_json::to_string(value).map_err(|e| sqlx::Error::Encode(Box::new(e)))?;

        sqlx::query("INSERT OR REPLACE INTO snapshots (key, payload, synced_at) VALUES (?, ?, ?)")
            .bind(key)
            .bind(payload)
            .bind(synced_at)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// The stored value and when it was taken
    ///
    /// A payload that no longer matches `T` is dropped and reported as missing.
    pub async fn load<T: DeserializeOwned>(
        &self,
        key: &str,
    ) -> Result<Option<(T, DateTime<Utc>)>, sqlx::Error> {
        let row = sqlx::query_as::<_, (String, DateTime<Utc>)>(
            "SELECT payload, synced_at FROM snapshots WHERE key = ?",
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;

        let Some((payload, synced_at)) = row else {
            return Ok(None);
        };

        match serde_json::from_str(&payload) {
            Ok(value) => Ok(Some((value, synced_at))),
            Err(e) => {
                tracing::warn!(key, error = %e, "Discarding unreadable snapshot");
                sqlx::query("DELETE FROM snapshots WHERE key = ?")
                    .bind(key)
                    .execute(&self.pool)
                    .await?;
                Ok(None)
            }
        }
    }

    pub async fn clear(&self) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM snapshots").execute(&self.pool).await?;
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::tests::memory_cache;
    use taskhub_core::dto::admin::DashboardStats;

    #[tokio::test]
    async fn test_snapshot_round_trip() {
        let store = memory_cache().await.snapshots();
        let stats = DashboardStats {
            total_tasks: 8,
            completed_tasks: 2,
            ..Default::default()
        };
        let now = Utc::now();

        store.save("dashboard_stats", &stats, now).await.unwrap();
        let (loaded, at) = store
            .load::<DashboardStats>("dashboard_stats")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(loaded, stats);
        assert_eq!(at, now);
        assert!(store.load::<DashboardStats>("other").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_unreadable_snapshot_is_dropped() {
        let store = memory_cache().await.snapshots();
        store.save("key", &"just a string", Utc::now()).await.unwrap();

        assert!(store.load::<DashboardStats>("key").await.unwrap().is_none());
        assert_eq!(store.clear().await.unwrap(), 0);
    }
}
