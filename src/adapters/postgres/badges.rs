//! PostgreSQL implementation of BadgeRepository.

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::domain::gamification::{Badge, BadgeKey};
use crate::ports::BadgeRepository;

use super::documents::{db_error, delete_collection, BADGES};

#[derive(Clone)]
pub struct PostgresBadgeRepository {
    pool: PgPool,
}

impl PostgresBadgeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BadgeRepository for PostgresBadgeRepository {
    async fn unlock(
        &self,
        user_id: &UserId,
        key: BadgeKey,
        at: Timestamp,
    ) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            INSERT INTO user_documents (user_id, collection, doc_id, body, created_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (user_id, collection, doc_id) DO NOTHING
            "#,
        )
        .bind(user_id.as_str())
        .bind(BADGES)
        .bind(key.as_str())
        .bind(Json(Badge::new(key, at)))
        .bind(at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to unlock badge", e))?;

        Ok(result.rows_affected() == 1)
    }

    async fn list(&self, user_id: &UserId) -> Result<Vec<Badge>, DomainError> {
        let bodies: Vec<Json<Badge>> = sqlx::query_scalar(
            r#"
            SELECT body FROM user_documents
            WHERE user_id = $1 AND collection = $2
            ORDER BY created_at
            "#,
        )
        .bind(user_id.as_str())
        .bind(BADGES)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list badges", e))?;

        Ok(bodies.into_iter().map(|Json(badge)| badge).collect())
    }

    async fn delete_all(&self, user_id: &UserId) -> Result<(), DomainError> {
        delete_collection(&self.pool, user_id, BADGES).await
    }
}
