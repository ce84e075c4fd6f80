//! PostgreSQL implementation of LateNoticeStore.
//!
//! The primary key makes `claim` an atomic insert-if-absent.

use async_trait::async_trait;
use serde_json::json;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::notification::LateNoticeKey;
use crate::ports::LateNoticeStore;

use super::documents::{db_error, delete_collection, LATE_NOTICES};

#[derive(Clone)]
pub struct PostgresLateNoticeStore {
    pool: PgPool,
}

impl PostgresLateNoticeStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LateNoticeStore for PostgresLateNoticeStore {
    async fn claim(&self, user_id: &UserId, key: LateNoticeKey) -> Result<bool, DomainError> {
        let doc_id = key.doc_id();
        let result = sqlx::query(
            r#"
            INSERT INTO user_documents (user_id, collection, doc_id, body)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (user_id, collection, doc_id) DO NOTHING
            "#,
        )
        .bind(user_id.as_str())
        .bind(LATE_NOTICES)
        .bind(&doc_id)
        .bind(Json(json!({ "predictedDate": doc_id })))
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to claim late notice", e))?;

        Ok(result.rows_affected() == 1)
    }

    async fn release(&self, user_id: &UserId, key: LateNoticeKey) -> Result<(), DomainError> {
        sqlx::query(
            "DELETE FROM user_documents WHERE user_id = $1 AND collection = $2 AND doc_id = $3",
        )
        .bind(user_id.as_str())
        .bind(LATE_NOTICES)
        .bind(key.doc_id())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to release late notice", e))?;
        Ok(())
    }

    async fn delete_all(&self, user_id: &UserId) -> Result<(), DomainError> {
        delete_collection(&self.pool, user_id, LATE_NOTICES).await
    }
}
