//! Sync engine
//!
//! Reads are cache-then-refresh streams:
//!
//! 1. `Loading`, then `Error { Validation }` for a page request out of range
//! 2. the cached copy, if any, as `Success { source: Cache }`
//! 3. stop here under [`RefreshPolicy::CacheOnly`], or under
//!    [`RefreshPolicy::CacheFirst`] when the copy is fresh
//! 4. offline: `Error { NoNetwork, cached }` without attempting a request
//! 5. the fetched value as `Success { source: Network }` after it has been
//!    written to the cache, or `Error { error, cached }`
//!
//! Mutations are write-through: they need the network, and their result is
//! written to the cache and invalidates the pages of the touched scopes.
//!
//! Cache failures are logged and never hide what the network returned.

use async_stream::stream;
use chrono::{DateTime, Utc};
use futures::StreamExt;
use futures::future::BoxFuture;
use futures::stream::BoxStream;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::future::Future;
use std::sync::Arc;
use taskhub_client::Result as ClientResult;
use taskhub_core::dto::{Page, PageRequest};
use tracing::{debug, info, warn};

use crate::cache::{CacheRecord, EntityCache};
use crate::context::SyncContext;
use crate::error::{Result, SyncError};
use crate::resource::{DataSource, RefreshPolicy, Resource};

/// Cache namespaces; a mutation invalidates every page of its scopes
pub mod scope {
    pub const ADMINS: &str = "admins";
    pub const DEPARTMENTS: &str = "departments";
    pub const MANAGERS: &str = "managers";
    pub const EMPLOYEES: &str = "employees";
    pub const TASKS: &str = "tasks";
}

/// A request that has not been sent yet
pub type Fetch<T> = BoxFuture<'static, ClientResult<T>>;

/// Where a paged read lives in the page index
#[derive(Debug, Clone)]
pub struct PageQuery {
    pub scope: &'static str,
    pub key: String,
    pub request: PageRequest,
}

impl PageQuery {
    /// Key `request` together with the filters that shape the result
    pub fn new(
        scope: &'static str,
        request: PageRequest,
        filters: &[(&'static str, String)],
    ) -> Self {
        Self {
            scope,
            key: request.cache_key(filters),
            request,
        }
    }
}

struct CachedPage<T> {
    page: Page<T>,
    fresh: bool,
}

async fn read_cached_page<T: CacheRecord>(
    ctx: &SyncContext,
    table: &dyn EntityCache<T>,
    query: &PageQuery,
) -> Option<CachedPage<T>> {
    let entry = match ctx
        .cache()
        .pages()
        .load(query.scope, &query.key, query.request.page)
        .await
    {
        Ok(Some(entry)) => entry,
        Ok(None) => return None,
        Err(e) => {
            warn!(scope = query.scope, error = %e, "Failed to read page index");
            return None;
        }
    };

    match table.find_by_ids(&entry.ids).await {
        Ok(items) => Some(CachedPage {
            fresh: !entry.stale && ctx.is_fresh(entry.synced_at),
            page: Page::new(items, entry.meta),
        }),
        Err(e) => {
            warn!(scope = query.scope, error = %e, "Failed to read cached page");
            None
        }
    }
}

async fn write_page<T: CacheRecord>(
    ctx: &SyncContext,
    table: &dyn EntityCache<T>,
    query: &PageQuery,
    page: &Page<T>,
    synced_at: DateTime<Utc>,
) -> Result<()> {
    table.upsert_many(&page.items, synced_at).await?;

    let ids: Vec<String> = page.items.iter().map(|item| item.id().to_string()).collect();
    ctx.cache()
        .pages()
        .save(query.scope, &query.key, query.request.page, &page.meta, &ids, synced_at)
        .await?;

    Ok(())
}

/// Cache-then-refresh read of one page of a collection
pub fn paged<T: CacheRecord>(
    ctx: SyncContext,
    table: Arc<dyn EntityCache<T>>,
    query: PageQuery,
    policy: RefreshPolicy,
    fetch: Fetch<Page<T>>,
) -> BoxStream<'static, Resource<Page<T>>> {
    stream! {
        yield Resource::Loading;

        if let Err(e) = query.request.validate() {
            yield Resource::Error { error: e.into(), cached: None };
            return;
        }

        let cached = read_cached_page(&ctx, table.as_ref(), &query).await;
        let fresh = cached.as_ref().is_some_and(|c| c.fresh);
        let cached = cached.map(|c| c.page);

        if let Some(page) = &cached {
            debug!(scope = query.scope, page = query.request.page, items = page.len(), fresh, "Serving cached page");
            yield Resource::Success { data: page.clone(), source: DataSource::Cache };
        }

        match policy {
            RefreshPolicy::CacheOnly => {
                if cached.is_none() {
                    yield Resource::Error {
                        error: SyncError::NotCached(format!("{} page {}", query.scope, query.request.page)),
                        cached: None,
                    };
                }
                return;
            }
            RefreshPolicy::CacheFirst if fresh => return,
            _ => {}
        }

        if !ctx.is_online().await {
            debug!(scope = query.scope, "Offline, skipping refresh");
            yield Resource::Error { error: SyncError::NoNetwork, cached };
            return;
        }

        match fetch.await {
            Ok(page) => {
                let synced_at = Utc::now();
                let page = page.map(|item| item.with_synced_at(synced_at));
                if let Err(e) = write_page(&ctx, table.as_ref(), &query, &page, synced_at).await {
                    warn!(scope = query.scope, error = %e, "Failed to cache page");
                }
                info!(scope = query.scope, page = page.meta.page, items = page.len(), total = page.meta.total, "Page synced");
                yield Resource::Success { data: page, source: DataSource::Network };
            }
            Err(e) => {
                let error = ctx.remote_error(e).await;
                warn!(scope = query.scope, error = %error, "Page refresh failed");
                yield Resource::Error { error, cached };
            }
        }
    }
    .boxed()
}

/// Cache-then-refresh read of one record
///
/// A record the server no longer knows is evicted from the cache.
pub fn single<T: CacheRecord>(
    ctx: SyncContext,
    table: Arc<dyn EntityCache<T>>,
    id: String,
    policy: RefreshPolicy,
    fetch: Fetch<T>,
) -> BoxStream<'static, Resource<T>> {
    stream! {
        yield Resource::Loading;

        let cached = match table.find_by_id(&id).await {
            Ok(found) => found,
            Err(e) => {
                warn!(id = %id, error = %e, "Failed to read cached record");
                None
            }
        };
        let fresh = cached
            .as_ref()
            .and_then(|record| record.last_synced_at())
            .is_some_and(|at| ctx.is_fresh(at));

        if let Some(record) = &cached {
            yield Resource::Success { data: record.clone(), source: DataSource::Cache };
        }

        match policy {
            RefreshPolicy::CacheOnly => {
                if cached.is_none() {
                    yield Resource::Error { error: SyncError::NotCached(id.clone()), cached: None };
                }
                return;
            }
            RefreshPolicy::CacheFirst if fresh => return,
            _ => {}
        }

        if !ctx.is_online().await {
            yield Resource::Error { error: SyncError::NoNetwork, cached };
            return;
        }

        match fetch.await {
            Ok(record) => {
                let synced_at = Utc::now();
                let record = record.with_synced_at(synced_at);
                if let Err(e) = table.upsert_many(std::slice::from_ref(&record), synced_at).await {
                    warn!(id = %id, error = %e, "Failed to cache record");
                }
                yield Resource::Success { data: record, source: DataSource::Network };
            }
            Err(e) if e.is_not_found() => {
                if let Err(err) = table.delete(&id).await {
                    warn!(id = %id, error = %err, "Failed to evict record");
                }
                yield Resource::Error { error: ctx.remote_error(e).await, cached: None };
            }
            Err(e) => {
                yield Resource::Error { error: ctx.remote_error(e).await, cached };
            }
        }
    }
    .boxed()
}

/// Network read of a value kept as a JSON snapshot
///
/// The snapshot is served only when the network cannot be used.
pub fn snapshot<T>(
    ctx: SyncContext,
    key: &'static str,
    policy: RefreshPolicy,
    fetch: Fetch<T>,
) -> BoxStream<'static, Resource<T>>
where
    T: Serialize + DeserializeOwned + Send + Sync + 'static,
{
    stream! {
        yield Resource::Loading;

        let cached = match ctx.cache().snapshots().load::<T>(key).await {
            Ok(found) => found.map(|(value, _)| value),
            Err(e) => {
                warn!(key, error = %e, "Failed to read snapshot");
                None
            }
        };

        if policy == RefreshPolicy::CacheOnly {
            match cached {
                Some(data) => {
                    yield Resource::Success { data, source: DataSource::Cache };
                }
                None => {
                    yield Resource::Error { error: SyncError::NotCached(key.to_string()), cached: None };
                }
            }
            return;
        }

        if !ctx.is_online().await {
            yield Resource::Error { error: SyncError::NoNetwork, cached };
            return;
        }

        match fetch.await {
            Ok(value) => {
                if let Err(e) = ctx.cache().snapshots().save(key, &value, Utc::now()).await {
                    warn!(key, error = %e, "Failed to store snapshot");
                }
                yield Resource::Success { data: value, source: DataSource::Network };
            }
            Err(e) => {
                yield Resource::Error { error: ctx.remote_error(e).await, cached };
            }
        }
    }
    .boxed()
}

/// Send a request that touches nothing in the cache
pub async fn remote<T>(ctx: &SyncContext, call: impl Future<Output = ClientResult<T>>) -> Result<T> {
    ctx.require_online().await?;
    match call.await {
        Ok(value) => Ok(value),
        Err(e) => Err(ctx.remote_error(e).await),
    }
}

/// Send a create or update and write the returned record through to the cache
pub async fn save_through<T: CacheRecord>(
    ctx: &SyncContext,
    table: &dyn EntityCache<T>,
    scopes: &[&'static str],
    call: impl Future<Output = ClientResult<T>>,
) -> Result<T> {
    let record = remote(ctx, call).await?;

    let synced_at = Utc::now();
    let record = record.with_synced_at(synced_at);
    if let Err(e) = table.upsert_many(std::slice::from_ref(&record), synced_at).await {
        warn!(id = record.id(), error = %e, "Failed to cache saved record");
    }
    invalidate(ctx, scopes).await;

    debug!(id = record.id(), "Saved record");
    Ok(record)
}

/// Send a delete and drop the record from the cache
pub async fn delete_through<T: CacheRecord>(
    ctx: &SyncContext,
    table: &dyn EntityCache<T>,
    id: &str,
    scopes: &[&'static str],
    call: impl Future<Output = ClientResult<()>>,
) -> Result<()> {
    if let Err(err) = remote(ctx, call).await {
        // Already gone on the server; the cached copy is stale either way
        if matches!(&err, SyncError::Remote(e) if e.is_not_found()) {
            evict(table, id).await;
            invalidate(ctx, scopes).await;
        }
        return Err(err);
    }

    evict(table, id).await;
    invalidate(ctx, scopes).await;

    debug!(id, "Deleted record");
    Ok(())
}

async fn evict<T: CacheRecord>(table: &dyn EntityCache<T>, id: &str) {
    if let Err(e) = table.delete(id).await {
        warn!(id, error = %e, "Failed to evict record");
    }
}

async fn invalidate(ctx: &SyncContext, scopes: &[&'static str]) {
    let pages = ctx.cache().pages();
    for scope in scopes {
        if let Err(e) = pages.invalidate(scope).await {
            warn!(scope, error = %e, "Failed to invalidate cached pages");
        }
    }
}
