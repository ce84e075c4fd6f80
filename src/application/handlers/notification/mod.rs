//! Notification inbox handlers.

use std::sync::Arc;

use crate::domain::foundation::{CommandMetadata, DomainError, NotificationId, UserId};
use crate::domain::notification::Notification;
use crate::ports::NotificationRepository;

pub struct ListNotificationsHandler {
    notifications: Arc<dyn NotificationRepository>,
}

impl ListNotificationsHandler {
    pub fn new(notifications: Arc<dyn NotificationRepository>) -> Self {
        Self { notifications }
    }

    /// Newest first.
    pub async fn handle(&self, user_id: &UserId) -> Result<Vec<Notification>, DomainError> {
        self.notifications.list_for_user(user_id).await
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum MarkNotificationReadError {
    #[error("Notification not found: {0}")]
    NotFound(NotificationId),
    #[error(transparent)]
    Domain(#[from] DomainError),
}

pub struct MarkNotificationReadHandler {
    notifications: Arc<dyn NotificationRepository>,
}

impl MarkNotificationReadHandler {
    pub fn new(notifications: Arc<dyn NotificationRepository>) -> Self {
        Self { notifications }
    }

    pub async fn handle(
        &self,
        id: NotificationId,
        metadata: CommandMetadata,
    ) -> Result<(), MarkNotificationReadError> {
        if !self.notifications.mark_read(&metadata.user_id, &id).await? {
            return Err(MarkNotificationReadError::NotFound(id));
        }
        Ok(())
    }
}
