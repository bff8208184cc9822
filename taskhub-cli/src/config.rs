//! Configuration module
//!
//! Handles CLI configuration: the API URL, the cache database and output options.

use anyhow::{Context, Result};
use taskhub_store::StoreConfig;

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// URL of the TaskHub API
    pub api_url: String,
    /// Cache database and refresh settings
    pub store: StoreConfig,
    /// Never contact the server
    pub offline: bool,
    /// Print JSON instead of formatted text
    pub json: bool,
}

impl Config {
    pub fn new(api_url: String, database: Option<String>, offline: bool, json: bool) -> Result<Self> {
        let database_url = match database {
            Some(url) => url,
            None => default_database_url()?,
        };

        let store = StoreConfig::new(database_url).with_env_overrides();
        store.validate().context("Invalid cache configuration")?;

        Ok(Self {
            api_url,
            store,
            offline,
            json,
        })
    }
}

/// `sqlite://<data dir>/taskhub/cache.db`
fn default_database_url() -> Result<String> {
    let path = dirs::data_dir()
        .context("Could not determine the user data directory; pass --database")?
        .join("taskhub")
        .join("cache.db");

    Ok(format!("sqlite://{}", path.display()))
}
