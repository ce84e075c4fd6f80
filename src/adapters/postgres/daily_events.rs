//! PostgreSQL implementation of DailyEventRepository.
//!
//! A merge inserts an empty day if none exists, then locks the row for the
//! read-merge-write so concurrent patches to one day never drop flags.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::domain::daily_log::{DailyEvent, DailyEventPatch};
use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::ports::DailyEventRepository;

use super::documents::{db_error, delete_collection, DAILY_EVENTS};

#[derive(Clone)]
pub struct PostgresDailyEventRepository {
    pool: PgPool,
}

impl PostgresDailyEventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn doc_id(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[async_trait]
impl DailyEventRepository for PostgresDailyEventRepository {
    async fn merge(
        &self,
        user_id: &UserId,
        date: NaiveDate,
        patch: &DailyEventPatch,
        now: Timestamp,
    ) -> Result<DailyEvent, DomainError> {
        let doc_id = doc_id(date);
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("Failed to begin transaction", e))?;

        sqlx::query(
            r#"
            INSERT INTO user_documents (user_id, collection, doc_id, body)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (user_id, collection, doc_id) DO NOTHING
            "#,
        )
        .bind(user_id.as_str())
        .bind(DAILY_EVENTS)
        .bind(&doc_id)
        .bind(Json(DailyEvent::new(date, now)))
        .execute(&mut *tx)
        .await
        .map_err(|e| db_error("Failed to create daily event", e))?;

        let Json(mut event): Json<DailyEvent> = sqlx::query_scalar(
            r#"
            SELECT body FROM user_documents
            WHERE user_id = $1 AND collection = $2 AND doc_id = $3
            FOR UPDATE
            "#,
        )
        .bind(user_id.as_str())
        .bind(DAILY_EVENTS)
        .bind(&doc_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| db_error("Failed to lock daily event", e))?;

        event.apply(patch, now);

        sqlx::query(
            r#"
            UPDATE user_documents SET body = $4, updated_at = now()
            WHERE user_id = $1 AND collection = $2 AND doc_id = $3
            "#,
        )
        .bind(user_id.as_str())
        .bind(DAILY_EVENTS)
        .bind(&doc_id)
        .bind(Json(&event))
        .execute(&mut *tx)
        .await
        .map_err(|e| db_error("Failed to update daily event", e))?;

        tx.commit()
            .await
            .map_err(|e| db_error("Failed to commit transaction", e))?;

        Ok(event)
    }

    async fn find(
        &self,
        user_id: &UserId,
        date: NaiveDate,
    ) -> Result<Option<DailyEvent>, DomainError> {
        let body: Option<Json<DailyEvent>> = sqlx::query_scalar(
            r#"
            SELECT body FROM user_documents
            WHERE user_id = $1 AND collection = $2 AND doc_id = $3
            "#,
        )
        .bind(user_id.as_str())
        .bind(DAILY_EVENTS)
        .bind(doc_id(date))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to fetch daily event", e))?;

        Ok(body.map(|Json(event)| event))
    }

    async fn list_range(
        &self,
        user_id: &UserId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<DailyEvent>, DomainError> {
        // Document ids are ISO dates, so text order is date order.
        let bodies: Vec<Json<DailyEvent>> = sqlx::query_scalar(
            r#"
            SELECT body FROM user_documents
            WHERE user_id = $1 AND collection = $2 AND doc_id BETWEEN $3 AND $4
            ORDER BY doc_id
            "#,
        )
        .bind(user_id.as_str())
        .bind(DAILY_EVENTS)
        .bind(doc_id(from))
        .bind(doc_id(to))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list daily events", e))?;

        Ok(bodies.into_iter().map(|Json(event)| event).collect())
    }

    async fn exists_any(&self, user_id: &UserId) -> Result<bool, DomainError> {
        sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM user_documents WHERE user_id = $1 AND collection = $2)",
        )
        .bind(user_id.as_str())
        .bind(DAILY_EVENTS)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("Failed to check daily events", e))
    }

    async fn delete_all(&self, user_id: &UserId) -> Result<(), DomainError> {
        delete_collection(&self.pool, user_id, DAILY_EVENTS).await
    }
}
