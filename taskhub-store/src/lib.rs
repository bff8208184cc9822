//! TaskHub Store
//!
//! Offline-first synchronization layer between the TaskHub REST API and a
//! local SQLite cache.
//!
//! Architecture:
//! - Cache: typed tables per entity, a page index remembering which ids each
//!   remote page returned, the persisted session and JSON snapshots
//! - Sync engine: cache-then-refresh streams for reads, write-through for
//!   mutations, gated by a [`NetworkMonitor`](network::NetworkMonitor)
//! - Repositories: role-oriented entry points (admin, manager, shared, task)
//!   that the front end talks to
//!
//! Reads are streams of [`Resource`] values: `Loading`, then the cached copy
//! if there is one, then the fresh copy from the network (or an error that
//! still carries the cached copy).

pub mod cache;
pub mod config;
pub mod context;
pub mod db;
pub mod error;
pub mod network;
pub mod repository;
pub mod resource;
pub mod sync;

pub use cache::LocalCache;
pub use config::StoreConfig;
pub use context::SyncContext;
pub use error::{Result, SyncError};
pub use resource::{DataSource, RefreshPolicy, Resource, Settled};
