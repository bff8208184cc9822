//! Operations open to every role: authentication, the profile and the
//! read-only department directory

use async_stream::stream;
use chrono::Utc;
use futures::StreamExt;
use futures::stream::BoxStream;
use taskhub_client::AuthApi;
use taskhub_core::domain::{AuthUser, Department, Session};
use taskhub_core::dto::auth::{AuthResponse, LoginRequest, SignupRequest};
use taskhub_core::dto::{Page, PageRequest};
use tracing::{info, warn};

use crate::context::SyncContext;
use crate::error::{Result, SyncError};
use crate::resource::{DataSource, RefreshPolicy, Resource};

/// Snapshot key of the id of the user the cached data belongs to
///
/// Kept apart from the session, which an expired token clears.
const CACHE_OWNER: &str = "cache_owner";

#[derive(Clone)]
pub struct SharedRepository {
    ctx: SyncContext,
}

impl SharedRepository {
    pub fn new(ctx: SyncContext) -> Self {
        Self { ctx }
    }

    /// Exchange credentials for a session
    ///
    /// Rejected credentials leave any stored session in place.
    pub async fn login(&self, req: LoginRequest) -> Result<Session> {
        req.validate()?;
        self.ctx.require_online().await?;
        let response = self.ctx.api().login(&req).await?;
        self.start_session(response).await
    }

    /// Register a new admin account and log it in
    pub async fn signup(&self, req: SignupRequest) -> Result<Session> {
        req.validate()?;
        self.ctx.require_online().await?;
        let response = self.ctx.api().signup(&req).await?;
        self.start_session(response).await
    }

    async fn start_session(&self, response: AuthResponse) -> Result<Session> {
        let session = Session {
            token: response.token,
            user: response.user,
            created_at: Utc::now(),
        };

        let store = self.ctx.cache().session();
        let snapshots = self.ctx.cache().snapshots();

        // Data cached for another account must not be served to this one
        let owner = match snapshots.load::<String>(CACHE_OWNER).await? {
            Some((id, _)) => Some(id),
            None => store.load().await?.map(|previous| previous.user.id),
        };
        if owner.is_some_and(|id| id != session.user.id) {
            info!("Different account, dropping cached data");
            self.ctx.cache().clear_all().await?;
        }

        store.save(&session).await?;
        snapshots.save(CACHE_OWNER, &session.user.id, session.created_at).await?;
        self.ctx.api().use_token(Some(session.token.clone()));

        info!("Logged in as {} ({})", session.user.email, session.user.role);
        Ok(session)
    }

    /// Forget the session and everything cached for it; works offline
    pub async fn logout(&self) -> Result<()> {
        self.ctx.api().use_token(None);
        self.ctx.cache().session().clear().await?;
        self.ctx.cache().clear_all().await?;

        info!("Logged out");
        Ok(())
    }

    pub async fn session(&self) -> Result<Option<Session>> {
        Ok(self.ctx.cache().session().load().await?)
    }

    /// Load the stored session and authenticate the client with its token
    pub async fn restore(&self) -> Result<Option<Session>> {
        let session = self.session().await?;
        if let Some(session) = &session {
            self.ctx.api().use_token(Some(session.token.clone()));
        }
        Ok(session)
    }

    /// The logged-in user, from the session and then from `/auth/me`
    pub fn profile(&self, policy: RefreshPolicy) -> BoxStream<'static, Resource<AuthUser>> {
        let ctx = self.ctx.clone();

        stream! {
            yield Resource::Loading;

            let stored = match ctx.cache().session().load().await {
                Ok(stored) => stored,
                Err(e) => {
                    warn!(error = %e, "Failed to read stored session");
                    None
                }
            };
            let session = match stored {
                Some(session) => session,
                None => {
                    yield Resource::Error { error: SyncError::NotAuthenticated, cached: None };
                    return;
                }
            };

            let fresh = ctx.is_fresh(session.created_at);
            yield Resource::Success { data: session.user.clone(), source: DataSource::Cache };

            match policy {
                RefreshPolicy::CacheOnly => return,
                RefreshPolicy::CacheFirst if fresh => return,
                _ => {}
            }

            if !ctx.is_online().await {
                yield Resource::Error { error: SyncError::NoNetwork, cached: Some(session.user) };
                return;
            }

            match ctx.api().profile().await {
                Ok(user) => {
                    let refreshed = Session {
                        user: user.clone(),
                        created_at: Utc::now(),
                        ..session
                    };
                    if let Err(e) = ctx.cache().session().save(&refreshed).await {
                        warn!(error = %e, "Failed to store refreshed profile");
                    }
                    yield Resource::Success { data: user, source: DataSource::Network };
                }
                Err(e) => {
                    let error = ctx.remote_error(e).await;
                    yield Resource::Error { error, cached: Some(session.user) };
                }
            }
        }
        .boxed()
    }

    pub fn departments(
        &self,
        request: PageRequest,
        policy: RefreshPolicy,
    ) -> BoxStream<'static, Resource<Page<Department>>> {
        super::department_page(&self.ctx, request, policy)
    }

    pub fn department(&self, id: &str, policy: RefreshPolicy) -> BoxStream<'static, Resource<Department>> {
        super::department(&self.ctx, id, policy)
    }
}
