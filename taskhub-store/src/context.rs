//! Shared state of the repositories

use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use taskhub_client::{ClientError, TaskHubApi};
use taskhub_core::domain::{Role, Session};
use tracing::warn;

use crate::cache::LocalCache;
use crate::error::{Result, SyncError};
use crate::network::NetworkMonitor;

/// Everything a read or a mutation needs: the API, the cache and connectivity
///
/// Cloning is cheap; every repository holds its own copy.
#[derive(Clone)]
pub struct SyncContext {
    api: Arc<dyn TaskHubApi>,
    cache: LocalCache,
    network: Arc<dyn NetworkMonitor>,
    max_age: Duration,
}

impl SyncContext {
    pub fn new(
        api: Arc<dyn TaskHubApi>,
        cache: LocalCache,
        network: Arc<dyn NetworkMonitor>,
        max_age: Duration,
    ) -> Self {
        Self {
            api,
            cache,
            network,
            max_age,
        }
    }

    pub fn api(&self) -> &Arc<dyn TaskHubApi> {
        &self.api
    }

    pub fn cache(&self) -> &LocalCache {
        &self.cache
    }

    pub fn max_age(&self) -> Duration {
        self.max_age
    }

    pub async fn is_online(&self) -> bool {
        self.network.is_online().await
    }

    /// Whether data synced at `synced_at` is still young enough to serve alone
    pub fn is_fresh(&self, synced_at: DateTime<Utc>) -> bool {
        match chrono::Duration::from_std(self.max_age) {
            Ok(max_age) => Utc::now() - synced_at < max_age,
            Err(_) => true,
        }
    }

    /// Fail fast with [`SyncError::NoNetwork`] when offline
    pub async fn require_online(&self) -> Result<()> {
        if self.is_online().await {
            Ok(())
        } else {
            Err(SyncError::NoNetwork)
        }
    }

    /// Categorize a failed request
    ///
    /// An unauthorized answer means the token is no longer valid: the stored
    /// session is dropped and the client forgets its token.
    pub async fn remote_error(&self, err: ClientError) -> SyncError {
        if err.is_unauthorized() {
            warn!("Session rejected by the server, logging out");
            self.api.use_token(None);
            if let Err(e) = self.cache.session().clear().await {
                warn!(error = %e, "Failed to clear stored session");
            }
        }
        SyncError::Remote(err)
    }

    /// The stored session, or [`SyncError::NotAuthenticated`]
    pub async fn require_session(&self) -> Result<Session> {
        self.cache
            .session()
            .load()
            .await?
            .ok_or(SyncError::NotAuthenticated)
    }

    /// The stored session if its role is one of `allowed`
    pub async fn require_role(&self, allowed: &[Role]) -> Result<Session> {
        let session = self.require_session().await?;
        if allowed.contains(&session.role()) {
            Ok(session)
        } else {
            Err(SyncError::Forbidden(session.role()))
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::cache::tests::memory_cache;
    use crate::network::ManualNetwork;
    use taskhub_client::TaskHubClient;
    use taskhub_core::domain::AuthUser;

    /// Context whose API points at a closed port; tests drive the fetches themselves
    pub(crate) async fn test_context(network: Arc<ManualNetwork>) -> SyncContext {
        SyncContext::new(
            Arc::new(TaskHubClient::new("http://127.0.0.1:9")),
            memory_cache().await,
            network,
            Duration::from_secs(300),
        )
    }

    pub(crate) fn session(role: Role) -> Session {
        Session {
            token: "token".into(),
            user: AuthUser {
                id: "u1".into(),
                name: "Grace".into(),
                email: "grace@example.com".into(),
                role,
                department_id: Some("d1".into()),
            },
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_freshness() {
        let ctx = test_context(Arc::new(ManualNetwork::new(true))).await;
        assert!(ctx.is_fresh(Utc::now()));
        assert!(!ctx.is_fresh(Utc::now() - chrono::Duration::minutes(6)));
    }

    #[tokio::test]
    async fn test_require_online() {
        let network = Arc::new(ManualNetwork::new(false));
        let ctx = test_context(network.clone()).await;
        assert!(matches!(ctx.require_online().await, Err(SyncError::NoNetwork)));

        network.set_online(true);
        assert!(ctx.require_online().await.is_ok());
    }

    #[tokio::test]
    async fn test_require_role() {
        let ctx = test_context(Arc::new(ManualNetwork::new(true))).await;
        assert!(matches!(
            ctx.require_role(&[Role::Admin]).await,
            Err(SyncError::NotAuthenticated)
        ));

        ctx.cache().session().save(&session(Role::Manager)).await.unwrap();
        assert!(ctx.require_role(&[Role::Admin, Role::Manager]).await.is_ok());
        assert!(matches!(
            ctx.require_role(&[Role::Admin]).await,
            Err(SyncError::Forbidden(Role::Manager))
        ));
    }

    #[tokio::test]
    async fn test_unauthorized_clears_session() {
        let ctx = test_context(Arc::new(ManualNetwork::new(true))).await;
        ctx.cache().session().save(&session(Role::Admin)).await.unwrap();

        let err = ctx.remote_error(ClientError::api_error(404, "missing")).await;
        assert!(matches!(err, SyncError::Remote(_)));
        assert!(ctx.cache().session().load().await.unwrap().is_some());

        let err = ctx.remote_error(ClientError::api_error(401, "expired")).await;
        assert_eq!(err.kind(), taskhub_core::ErrorKind::Unauthorized);
        assert!(ctx.cache().session().load().await.unwrap().is_none());
    }
}
