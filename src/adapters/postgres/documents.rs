//! Shared plumbing for the `user_documents` table.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::DatabaseConfig;
use crate::domain::foundation::{DomainError, ErrorCode, UserId};

pub(super) const CYCLE_DATA: &str = "cycleData";
pub(super) const CYCLE_DATA_DOC: &str = "main";
pub(super) const DAILY_EVENTS: &str = "dailyEvents";
pub(super) const NOTIFICATIONS: &str = "notifications";
pub(super) const BADGES: &str = "badges";
pub(super) const LATE_NOTICES: &str = "lateNotices";

/// Opens a pool sized from configuration.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, DomainError> {
    let url = config
        .connection_url()
        .ok_or_else(|| DomainError::database("database url is not configured"))?;

    PgPoolOptions::new()
        .min_connections(config.pool.min_size)
        .max_connections(config.pool.max_size)
        .acquire_timeout(config.pool.acquire_timeout())
        .idle_timeout(config.pool.idle_timeout())
        .connect(url)
        .await
        .map_err(|e| db_error("Failed to connect to database", e))
}

/// Applies the bundled migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<(), DomainError> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| DomainError::new(ErrorCode::DatabaseError, format!("Failed to run migrations: {}", e)))
}

pub(super) fn db_error(context: &str, err: impl std::fmt::Display) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, format!("{}: {}", context, err))
}

/// Deletes every document of one collection for a user.
pub(super) async fn delete_collection(
    pool: &PgPool,
    user_id: &UserId,
    collection: &str,
) -> Result<(), DomainError> {
    sqlx::query("DELETE FROM user_documents WHERE user_id = $1 AND collection = $2")
        .bind(user_id.as_str())
        .bind(collection)
        .execute(pool)
        .await
        .map_err(|e| db_error("Failed to delete documents", e))?;
    Ok(())
}
