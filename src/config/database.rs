//! Document store configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Upper bound on pool size; the store is one table with short transactions.
const MAX_POOL_SIZE: u32 = 50;

/// Where user documents live.
///
/// Without a URL the service keeps everything in memory, which is how
/// local development and the test suite run.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL (`CYCLE_TRACKER__DATABASE__URL`)
    #[serde(default)]
    pub url: Option<Secret<String>>,

    /// Apply bundled migrations before serving
    #[serde(default)]
    pub run_migrations: bool,

    #[serde(default)]
    pub pool: PoolConfig,
}

/// Connection pool sizing (`CYCLE_TRACKER__DATABASE__POOL__*`).
#[derive(Debug, Clone, Deserialize)]
pub struct PoolConfig {
    #[serde(default = "default_min_size")]
    pub min_size: u32,

    #[serde(default = "default_max_size")]
    pub max_size: u32,

    /// Seconds to wait for a free connection
    #[serde(default = "default_acquire_secs")]
    pub acquire_secs: u64,

    /// Seconds before an idle connection is closed
    #[serde(default = "default_idle_secs")]
    pub idle_secs: u64,
}

impl DatabaseConfig {
    /// The connection URL, when one is set and non-empty.
    pub fn connection_url(&self) -> Option<&str> {
        self.url
            .as_ref()
            .map(|url| url.expose_secret().as_str())
            .filter(|url| !url.is_empty())
    }

    pub fn is_configured(&self) -> bool {
        self.connection_url().is_some()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(url) = self.connection_url() {
            let scheme = url.split("://").next().unwrap_or_default();
            if scheme != "postgres" && scheme != "postgresql" {
                return Err(ValidationError::InvalidDatabaseUrl);
            }
        }
        self.pool.validate()
    }
}

impl PoolConfig {
    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_secs)
    }

    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_secs)
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.max_size == 0 || self.min_size > self.max_size {
            return Err(ValidationError::InvalidPoolSize);
        }
        if self.max_size > MAX_POOL_SIZE {
            return Err(ValidationError::PoolSizeTooLarge(MAX_POOL_SIZE));
        }
        Ok(())
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            min_size: default_min_size(),
            max_size: default_max_size(),
            acquire_secs: default_acquire_secs(),
            idle_secs: default_idle_secs(),
        }
    }
}

fn default_min_size() -> u32 {
    1
}

fn default_max_size() -> u32 {
    10
}

fn default_acquire_secs() -> u64 {
    5
}

fn default_idle_secs() -> u64 {
    300
}
