//! Persisted login session

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use taskhub_core::domain::{AuthUser, Role, Session};

#[derive(sqlx::FromRow)]
struct SessionRow {
    token: String,
    user_id: String,
    name: String,
    email: String,
    role: String,
    department_id: Option<String>,
    created_at: DateTime<Utc>,
}

/// The single stored session of this device
#[derive(Clone)]
pub struct SessionStore {
    pool: SqlitePool,
}

impl SessionStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Replace the stored session
    pub async fn save(&self, session: &Session) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT OR REPLACE INTO session
                (id, token, user_id, name, email, role, department_id, created_at)
            VALUES (1, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&session.token)
        .bind(&session.user.id)
        .bind(&session.user.name)
        .bind(&session.user.email)
        .bind(session.user.role.as_str())
        .bind(&session.user.department_id)
        .bind(session.created_at)
        .execute(&self.pool)
        .await?;

        tracing::debug!(user = %session.user.email, role = %session.user.role, "Session stored");
        Ok(())
    }

    /// The stored session, if any
    ///
    /// A row with an unknown role is treated as no session at all.
    pub async fn load(&self) -> Result<Option<Session>, sqlx::Error> {
        let row = sqlx::query_as::<_, SessionRow>(
            "SELECT token, user_id, name, email, role, department_id, created_at FROM session WHERE id = 1",
        )
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let role = match row.role.parse::<Role>() {
            Ok(role) => role,
            Err(_) => {
                tracing::warn!(role = %row.role, "Ignoring stored session with unknown role");
                return Ok(None);
            }
        };

        Ok(Some(Session {
            token: row.token,
            user: AuthUser {
                id: row.user_id,
                name: row.name,
                email: row.email,
                role,
                department_id: row.department_id,
            },
            created_at: row.created_at,
        }))
    }

    pub async fn clear(&self) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM session").execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::tests::memory_cache;

    fn session(role: Role) -> Session {
        Session {
            token: "jwt-token".into(),
            user: AuthUser {
                id: "u1".into(),
                name: "Ada".into(),
                email: "ada@example.com".into(),
                role,
                department_id: Some("d1".into()),
            },
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_save_load_clear() {
        let store = memory_cache().await.session();
        assert!(store.load().await.unwrap().is_none());

        let saved = session(Role::Manager);
        store.save(&saved).await.unwrap();
        assert_eq!(store.load().await.unwrap(), Some(saved));

        assert!(store.clear().await.unwrap());
        assert!(store.load().await.unwrap().is_none());
        assert!(!store.clear().await.unwrap());
    }

    #[tokio::test]
    async fn test_save_replaces_previous_session() {
        let store = memory_cache().await.session();
        store.save(&session(Role::Admin)).await.unwrap();
        store.save(&session(Role::Employee)).await.unwrap();

        let loaded = store.load().await.unwrap().unwrap();
        assert_eq!(loaded.role(), Role::Employee);
    }
}
