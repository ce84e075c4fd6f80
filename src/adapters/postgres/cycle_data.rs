//! PostgreSQL implementation of CycleDataRepository.

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::{PgPool, Row};

use crate::domain::cycle::CycleAggregate;
use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::ports::CycleDataRepository;

use super::documents::{db_error, CYCLE_DATA, CYCLE_DATA_DOC};

#[derive(Clone)]
pub struct PostgresCycleDataRepository {
    pool: PgPool,
}

impl PostgresCycleDataRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn version_conflict(user_id: &UserId, expected: u64) -> DomainError {
    DomainError::new(
        ErrorCode::VersionConflict,
        format!("Cycle data for {} changed since version {}", user_id, expected),
    )
}

#[async_trait]
impl CycleDataRepository for PostgresCycleDataRepository {
    async fn load(&self, user_id: &UserId) -> Result<Option<CycleAggregate>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT body, version FROM user_documents
            WHERE user_id = $1 AND collection = $2 AND doc_id = $3
            "#,
        )
        .bind(user_id.as_str())
        .bind(CYCLE_DATA)
        .bind(CYCLE_DATA_DOC)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to fetch cycle data", e))?;

        let Some(row) = row else {
            return Ok(None);
        };
        let Json(aggregate): Json<CycleAggregate> = row
            .try_get("body")
            .map_err(|e| db_error("Failed to decode cycle data", e))?;
        let version: i64 = row
            .try_get("version")
            .map_err(|e| db_error("Failed to decode cycle data version", e))?;

        Ok(Some(aggregate.with_version(version.max(0) as u64)))
    }

    async fn save(&self, user_id: &UserId, aggregate: &CycleAggregate) -> Result<u64, DomainError> {
        let expected = aggregate.version();
        let next = expected + 1;
        let body = aggregate.clone().with_version(next);

        let result = if expected == 0 {
            sqlx::query(
                r#"
                INSERT INTO user_documents (user_id, collection, doc_id, body, version)
                VALUES ($1, $2, $3, $4, $5)
                ON CONFLICT (user_id, collection, doc_id) DO NOTHING
                "#,
            )
            .bind(user_id.as_str())
            .bind(CYCLE_DATA)
            .bind(CYCLE_DATA_DOC)
            .bind(Json(&body))
            .bind(next as i64)
            .execute(&self.pool)
            .await
        } else {
            sqlx::query(
                r#"
                UPDATE user_documents
                SET body = $4, version = $5, updated_at = now()
                WHERE user_id = $1 AND collection = $2 AND doc_id = $3 AND version = $6
                "#,
            )
            .bind(user_id.as_str())
            .bind(CYCLE_DATA)
            .bind(CYCLE_DATA_DOC)
            .bind(Json(&body))
            .bind(next as i64)
            .bind(expected as i64)
            .execute(&self.pool)
            .await
        };
        let result = result.map_err(|e| db_error("Failed to save cycle data", e))?;

        if result.rows_affected() == 0 {
            return Err(version_conflict(user_id, expected));
        }
        Ok(next)
    }

    async fn list_user_ids(&self) -> Result<Vec<UserId>, DomainError> {
        let ids: Vec<String> = sqlx::query_scalar(
            "SELECT user_id FROM user_documents WHERE collection = $1 ORDER BY user_id",
        )
        .bind(CYCLE_DATA)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list users", e))?;

        ids.into_iter()
            .map(|id| UserId::new(id).map_err(DomainError::from))
            .collect()
    }

    async fn delete(&self, user_id: &UserId) -> Result<(), DomainError> {
        super::documents::delete_collection(&self.pool, user_id, CYCLE_DATA).await
    }
}
