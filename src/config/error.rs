//! Configuration errors

use thiserror::Error;

/// Failure to build an `AppConfig`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("invalid configuration: {0}")]
    Invalid(#[from] ValidationError),
}

/// A setting that parsed but is out of range.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("server.port must be non-zero")]
    InvalidPort,

    #[error("server.request_timeout_secs must be between 1 and {0}")]
    InvalidTimeout(u64),

    #[error("cannot bind to {0}")]
    InvalidSocketAddr(String),

    #[error("database.url must use the postgres:// or postgresql:// scheme")]
    InvalidDatabaseUrl,

    #[error("database.pool.min_size must not exceed a non-zero max_size")]
    InvalidPoolSize,

    #[error("database.pool.max_size must be at most {0}")]
    PoolSizeTooLarge(u32),

    #[error("tracker.grace_days must be at most 60")]
    InvalidGraceDays,

    #[error("tracker.sweep_concurrency must be between 1 and 64")]
    InvalidSweepConcurrency,

    #[error("tracker.late_notice_link must be an absolute path")]
    InvalidNoticeLink,

    #[error("scheduler.header_name is not a valid header: {0}")]
    InvalidHeaderName(String),
}
