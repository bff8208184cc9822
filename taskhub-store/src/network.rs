//! Connectivity checks
//!
//! The sync engine asks a [`NetworkMonitor`] before every request; when it
//! reports offline, cached data is served and no request is attempted.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::net::TcpStream;
use tracing::debug;

/// Source of truth for "can we reach the backend right now"
#[async_trait]
pub trait NetworkMonitor: Send + Sync {
    async fn is_online(&self) -> bool;
}

/// Assumes the network is always reachable; failures surface from the request itself
#[derive(Debug, Default, Clone, Copy)]
pub struct AlwaysOnline;

#[async_trait]
impl NetworkMonitor for AlwaysOnline {
    async fn is_online(&self) -> bool {
        true
    }
}

/// Connectivity flag flipped by the caller (offline mode, tests)
#[derive(Debug)]
pub struct ManualNetwork {
    online: AtomicBool,
}

impl ManualNetwork {
    pub fn new(online: bool) -> Self {
        Self {
            online: AtomicBool::new(online),
        }
    }

    pub fn set_online(&self, online: bool) {
        self.online.store(online, Ordering::SeqCst);
    }
}

#[async_trait]
impl NetworkMonitor for ManualNetwork {
    async fn is_online(&self) -> bool {
        self.online.load(Ordering::SeqCst)
    }
}

/// Probes the API host with a TCP connect
#[derive(Debug, Clone)]
pub struct TcpProbe {
    host: String,
    port: u16,
    timeout: Duration,
}

impl TcpProbe {
    pub fn new(host: impl Into<String>, port: u16, timeout: Duration) -> Self {
        Self {
            host: host.into(),
            port,
            timeout,
        }
    }

    /// Build a probe for the host of an `http://` or `https://` URL
    pub fn from_url(url: &str, timeout: Duration) -> Option<Self> {
        let (rest, default_port) = if let Some(rest) = url.strip_prefix("https://") {
            (rest, 443)
        } else if let Some(rest) = url.strip_prefix("http://") {
            (rest, 80)
        } else {
            return None;
        };

        let authority = rest.split(['/', '?', '#']).next()?;
        let authority = authority.rsplit('@').next()?;
        if authority.is_empty() {
            return None;
        }

        // Bracketed IPv6 literal, possibly with a port.
        if let Some(v6) = authority.strip_prefix('[') {
            let (host, after) = v6.split_once(']')?;
            let port = match after.strip_prefix(':') {
                Some(p) => p.parse().ok()?,
                None => default_port,
            };
            return Some(Self::new(host, port, timeout));
        }

        match authority.split_once(':') {
            Some((host, port)) => Some(Self::new(host, port.parse().ok()?, timeout)),
            None => Some(Self::new(authority, default_port, timeout)),
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }
}

#[async_trait]
impl NetworkMonitor for TcpProbe {
    async fn is_online(&self) -> bool {
        let connect = TcpStream::connect((self.host.as_str(), self.port));
        let online = matches!(tokio::time::timeout(self.timeout, connect).await, Ok(Ok(_)));
        debug!(host = %self.host, port = self.port, online, "Connectivity probe");
        online
    }
}
