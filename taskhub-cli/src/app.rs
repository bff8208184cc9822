//! Wiring of the client, the cache and the repositories for one invocation

use anyhow::{Context, Result};
use std::sync::Arc;
use taskhub_client::TaskHubClient;
use taskhub_core::domain::{Role, Session};
use taskhub_store::network::{AlwaysOnline, ManualNetwork, NetworkMonitor, TcpProbe};
use taskhub_store::repository::Repositories;
use taskhub_store::{LocalCache, SyncContext, SyncError};
use tracing::debug;

use crate::config::Config;

pub struct App {
    pub config: Config,
    pub cache: LocalCache,
    pub repos: Repositories,
    /// Session restored from the cache at startup
    pub session: Option<Session>,
}

impl App {
    pub async fn connect(config: Config) -> Result<Self> {
        let cache = LocalCache::open(&config.store.database_url)
            .await
            .with_context(|| format!("Failed to open cache at {}", config.store.database_url))?;

        let network: Arc<dyn NetworkMonitor> = if config.offline {
            Arc::new(ManualNetwork::new(false))
        } else {
            match TcpProbe::from_url(&config.api_url, config.store.probe_timeout) {
                Some(probe) => Arc::new(probe),
                None => Arc::new(AlwaysOnline),
            }
        };

        let client = Arc::new(TaskHubClient::new(config.api_url.clone()));
        let ctx = SyncContext::new(client, cache.clone(), network, config.store.cache_max_age);
        let repos = Repositories::new(ctx);

        let session = repos.shared.restore().await?;
        debug!(
            logged_in = session.is_some(),
            database = %config.store.database_url,
            "CLI initialized"
        );

        Ok(Self {
            config,
            cache,
            repos,
            session,
        })
    }

    /// The restored session, or a not-logged-in error
    pub fn session(&self) -> Result<&Session> {
        self.session
            .as_ref()
            .ok_or_else(|| SyncError::NotAuthenticated.into())
    }

    pub fn role(&self) -> Option<Role> {
        self.session.as_ref().map(Session::role)
    }

    /// Page size used when a list command does not pass `--limit`
    pub fn page_size(&self) -> u32 {
        self.config.store.page_size
    }
}
