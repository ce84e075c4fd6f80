//! Notification repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, NotificationId, UserId};
use crate::domain::notification::Notification;

#[async_trait]
pub trait NotificationRepository: Send + Sync {
    async fn create(&self, notification: &Notification) -> Result<(), DomainError>;

    /// Newest first.
    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Notification>, DomainError>;

    /// Returns false when no such notification exists for the user.
    async fn mark_read(&self, user_id: &UserId, id: &NotificationId) -> Result<bool, DomainError>;

    async fn delete_all(&self, user_id: &UserId) -> Result<(), DomainError>;
}
