//! Results of cache-then-refresh reads

use futures::StreamExt;
use futures::stream::BoxStream;

use crate::error::SyncError;

/// Where a value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    Cache,
    Network,
}

/// When a read goes to the network
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RefreshPolicy {
    /// Serve the cache; refresh only when it is missing, stale or invalidated
    #[default]
    CacheFirst,
    /// Serve the cache, then always refresh
    NetworkFirst,
    /// Never touch the network
    CacheOnly,
}

/// One step of a read
#[derive(Debug)]
pub enum Resource<T> {
    Loading,
    Success { data: T, source: DataSource },
    Error { error: SyncError, cached: Option<T> },
}

impl<T> Resource<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Resource::Loading)
    }

    /// The value carried by this step, fresh or cached
    pub fn data(&self) -> Option<&T> {
        match self {
            Resource::Loading => None,
            Resource::Success { data, .. } => Some(data),
            Resource::Error { cached, .. } => cached.as_ref(),
        }
    }
}

/// Final state of a read once its stream has ended
#[derive(Debug)]
pub struct Settled<T> {
    /// Most recent value seen
    pub data: Option<T>,
    /// Where `data` came from
    pub source: Option<DataSource>,
    /// Error that ended the read, if any
    pub error: Option<SyncError>,
}

impl<T> Settled<T> {
    /// Drain a read stream, keeping the latest value and the terminal error
    pub async fn from_stream(mut stream: BoxStream<'_, Resource<T>>) -> Self {
        let mut settled = Settled {
            data: None,
            source: None,
            error: None,
        };

        while let Some(step) = stream.next().await {
            match step {
                Resource::Loading => {}
                Resource::Success { data, source } => {
                    settled.data = Some(data);
                    settled.source = Some(source);
                }
                Resource::Error { error, cached } => {
                    if let Some(cached) = cached {
                        settled.data = Some(cached);
                        settled.source = Some(DataSource::Cache);
                    }
                    settled.error = Some(error);
                }
            }
        }

        settled
    }

    /// Fresh data, or the error when none could be produced
    pub fn into_result(self) -> Result<(T, DataSource), SyncError> {
        match (self.data, self.source, self.error) {
            (Some(data), Some(source), None) => Ok((data, source)),
            (_, _, Some(error)) => Err(error),
            _ => Err(SyncError::NotCached("the requested data".to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::stream;

    #[tokio::test]
    async fn test_settle_keeps_latest_success() {
        let steps = stream::iter(vec![
            Resource::Loading,
            Resource::Success { data: 1, source: DataSource::Cache },
            Resource::Success { data: 2, source: DataSource::Network },
        ])
        .boxed();

        let settled = Settled::from_stream(steps).await;
        assert_eq!(settled.data, Some(2));
        assert_eq!(settled.source, Some(DataSource::Network));
        assert!(settled.error.is_none());
        assert_eq!(settled.into_result().unwrap(), (2, DataSource::Network));
    }

    #[tokio::test]
    async fn test_settle_keeps_cached_copy_on_error() {
        let steps = stream::iter(vec![
            Resource::Loading,
            Resource::Success { data: 1, source: DataSource::Cache },
            Resource::Error { error: SyncError::NoNetwork, cached: Some(1) },
        ])
        .boxed();

        let settled = Settled::from_stream(steps).await;
        assert_eq!(settled.data, Some(1));
        assert_eq!(settled.source, Some(DataSource::Cache));
        assert!(matches!(settled.error, Some(SyncError::NoNetwork)));
        assert!(matches!(settled.into_result(), Err(SyncError::NoNetwork)));
    }

    #[test]
    fn test_resource_data() {
        let loading: Resource<u8> = Resource::Loading;
        assert!(loading.is_loading());
        assert_eq!(loading.data(), None);

        let failed = Resource::Error { error: SyncError::NoNetwork, cached: Some(3u8) };
        assert_eq!(failed.data(), Some(&3));
    }
}
