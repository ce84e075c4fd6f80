//! Application configuration module
//!
//! Configuration is loaded from environment variables using the `config` and
//! `dotenvy` crates, with the `CYCLE_TRACKER` prefix and `__` separating
//! nested values.
//!
//! # Example
//!
//! ```no_run
//! use cycle_tracker::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod database;
mod error;
mod scheduler;
mod server;
mod tracker;

pub use database::{DatabaseConfig, PoolConfig};
pub use error::{ConfigError, ValidationError};
pub use scheduler::SchedulerConfig;
pub use server::{Environment, ServerConfig};
pub use tracker::TrackerConfig;

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration. Without a URL the service runs on in-memory stores.
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Late-cycle check tuning
    #[serde(default)]
    pub tracker: TrackerConfig,

    /// Scheduler trigger authentication
    #[serde(default)]
    pub scheduler: SchedulerConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Environment Variable Format
    ///
    /// - `CYCLE_TRACKER__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `CYCLE_TRACKER__TRACKER__GRACE_DAYS=3` -> `tracker.grace_days = 3`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("CYCLE_TRACKER")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.tracker.validate()?;
        self.scheduler.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: &[&str] = &[
        "CYCLE_TRACKER__SERVER__PORT",
        "CYCLE_TRACKER__SERVER__ENVIRONMENT",
        "CYCLE_TRACKER__DATABASE__URL",
        "CYCLE_TRACKER__TRACKER__GRACE_DAYS",
        "CYCLE_TRACKER__TRACKER__SWEEP_CONCURRENCY",
        "CYCLE_TRACKER__SCHEDULER__HEADER_NAME",
        "CYCLE_TRACKER__SCHEDULER__SECRET",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_load_with_no_environment_uses_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let config = AppConfig::load().unwrap();

        assert_eq!(config.server.port, 8080);
        assert!(!config.database.is_configured());
        assert_eq!(config.tracker.grace_days, 3);
        assert_eq!(config.scheduler.header_name, "x-cron-trigger");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("CYCLE_TRACKER__SERVER__PORT", "3000");
        env::set_var("CYCLE_TRACKER__SERVER__ENVIRONMENT", "production");
        env::set_var("CYCLE_TRACKER__DATABASE__URL", "postgresql://test@localhost/test");
        env::set_var("CYCLE_TRACKER__TRACKER__GRACE_DAYS", "5");
        env::set_var("CYCLE_TRACKER__SCHEDULER__SECRET", "s3cret");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 3000);
        assert!(config.is_production());
        assert!(config.database.is_configured());
        assert_eq!(config.tracker.grace_days, 5);
        assert_eq!(config.scheduler.expected_value(), Some("s3cret"));
    }

    #[test]
    fn test_invalid_concurrency_fails_validation() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("CYCLE_TRACKER__TRACKER__SWEEP_CONCURRENCY", "0");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.validate().is_err());
    }
}
