//! Store configuration
//!
//! Location of the cache database and the knobs of the refresh policy.

use std::time::Duration;

/// Cache and sync configuration
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// SQLite connection URL (e.g., "sqlite:///home/me/.local/share/taskhub/cache.db")
    pub database_url: String,

    /// Age after which cached data is refreshed under the cache-first policy
    pub cache_max_age: Duration,

    /// Page size used when the caller does not ask for one
    pub page_size: u32,

    /// How long a connectivity probe may take before the device counts as offline
    pub probe_timeout: Duration,
}

impl StoreConfig {
    /// Creates a new configuration with defaults
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            cache_max_age: Duration::from_secs(300),
            page_size: 10,
            probe_timeout: Duration::from_secs(3),
        }
    }

    /// Creates configuration from environment variables
    ///
    /// Expected environment variables:
    /// - TASKHUB_DATABASE_URL (required)
    /// - TASKHUB_CACHE_MAX_AGE (optional, seconds, default: 300)
    /// - TASKHUB_PAGE_SIZE (optional, default: 10)
    /// - TASKHUB_PROBE_TIMEOUT (optional, seconds, default: 3)
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("TASKHUB_DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("TASKHUB_DATABASE_URL environment variable not set"))?;

        Ok(Self::new(database_url).with_env_overrides())
    }

    /// Applies the optional tuning variables on top of this configuration
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(secs) = env_parse::<u64>("TASKHUB_CACHE_MAX_AGE") {
            self.cache_max_age = Duration::from_secs(secs);
        }
        if let Some(size) = env_parse::<u32>("TASKHUB_PAGE_SIZE") {
            self.page_size = size;
        }
        if let Some(secs) = env_parse::<u64>("TASKHUB_PROBE_TIMEOUT") {
            self.probe_timeout = Duration::from_secs(secs);
        }
        self
    }

    /// Sets how long cached data counts as fresh
    pub fn with_max_age(mut self, max_age: Duration) -> Self {
        self.cache_max_age = max_age;
        self
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.database_url.is_empty() {
            anyhow::bail!("database_url cannot be empty");
        }

        if !self.database_url.starts_with("sqlite:") {
            anyhow::bail!("database_url must start with sqlite:");
        }

        if self.page_size == 0 || self.page_size > taskhub_core::dto::pagination::MAX_LIMIT {
            anyhow::bail!(
                "page_size must be between 1 and {}",
                taskhub_core::dto::pagination::MAX_LIMIT
            );
        }

        if self.probe_timeout.is_zero() {
            anyhow::bail!("probe_timeout must be greater than 0");
        }

        Ok(())
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new("sqlite::memory:")
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|s| s.parse::<T>().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = StoreConfig::default();
        assert_eq!(config.cache_max_age, Duration::from_secs(300));
        assert_eq!(config.page_size, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = StoreConfig::default();

        config.database_url = String::new();
        assert!(config.validate().is_err());

        config.database_url = "postgres://localhost/taskhub".to_string();
        assert!(config.validate().is_err());

        config.database_url = "sqlite://cache.db".to_string();
        assert!(config.validate().is_ok());

        config.page_size = 0;
        assert!(config.validate().is_err());

        config.page_size = 500;
        assert!(config.validate().is_err());

        config.page_size = 25;
        config.probe_timeout = Duration::ZERO;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_with_max_age() {
        let config = StoreConfig::default().with_max_age(Duration::from_secs(5));
        assert_eq!(config.cache_max_age, Duration::from_secs(5));
    }
}
