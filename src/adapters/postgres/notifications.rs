//! PostgreSQL implementation of NotificationRepository.

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::domain::foundation::{DomainError, NotificationId, UserId};
use crate::domain::notification::Notification;
use crate::ports::NotificationRepository;

use super::documents::{db_error, delete_collection, NOTIFICATIONS};

#[derive(Clone)]
pub struct PostgresNotificationRepository {
    pool: PgPool,
}

impl PostgresNotificationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationRepository for PostgresNotificationRepository {
    async fn create(&self, notification: &Notification) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO user_documents (user_id, collection, doc_id, body, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(notification.user_id.as_str())
        .bind(NOTIFICATIONS)
        .bind(notification.id.to_string())
        .bind(Json(notification))
        .bind(notification.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to insert notification", e))?;
        Ok(())
    }

    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Notification>, DomainError> {
        let bodies: Vec<Json<Notification>> = sqlx::query_scalar(
            r#"
            SELECT body FROM user_documents
            WHERE user_id = $1 AND collection = $2
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id.as_str())
        .bind(NOTIFICATIONS)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list notifications", e))?;

        Ok(bodies.into_iter().map(|Json(n)| n).collect())
    }

    async fn mark_read(&self, user_id: &UserId, id: &NotificationId) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE user_documents
            SET body = jsonb_set(body, '{read}', 'true'::jsonb), updated_at = now()
            WHERE user_id = $1 AND collection = $2 AND doc_id = $3
            "#,
        )
        .bind(user_id.as_str())
        .bind(NOTIFICATIONS)
        .bind(id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to mark notification read", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_all(&self, user_id: &UserId) -> Result<(), DomainError> {
        delete_collection(&self.pool, user_id, NOTIFICATIONS).await
    }
}
