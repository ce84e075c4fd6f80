//! In-memory notification store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, NotificationId, UserId};
use crate::domain::notification::Notification;
use crate::ports::NotificationRepository;

#[derive(Debug, Clone, Default)]
pub struct InMemoryNotificationRepository {
    notifications: Arc<RwLock<HashMap<UserId, Vec<Notification>>>>,
}

impl InMemoryNotificationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total notifications across all users.
    pub async fn count(&self) -> usize {
        self.notifications.read().await.values().map(Vec::len).sum()
    }
}

#[async_trait]
impl NotificationRepository for InMemoryNotificationRepository {
    async fn create(&self, notification: &Notification) -> Result<(), DomainError> {
        self.notifications
            .write()
            .await
            .entry(notification.user_id.clone())
            .or_default()
            .push(notification.clone());
        Ok(())
    }

    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Notification>, DomainError> {
        let mut list = self
            .notifications
            .read()
            .await
            .get(user_id)
            .cloned()
            .unwrap_or_default();
        list.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(list)
    }

    async fn mark_read(&self, user_id: &UserId, id: &NotificationId) -> Result<bool, DomainError> {
        let mut notifications = self.notifications.write().await;
        let found = notifications
            .get_mut(user_id)
            .and_then(|list| list.iter_mut().find(|n| n.id == *id));
        match found {
            Some(notification) => {
                notification.mark_read();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_all(&self, user_id: &UserId) -> Result<(), DomainError> {
        self.notifications.write().await.remove(user_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Timestamp;

    fn user() -> UserId {
        UserId::new("user-1").unwrap()
    }

    #[tokio::test]
    async fn list_is_newest_first() {
        let repo = InMemoryNotificationRepository::new();
        let older = Notification::cycle_late(user(), "a", "/x", Timestamp::now().add_days(-1));
        let newer = Notification::cycle_late(user(), "b", "/x", Timestamp::now());
        repo.create(&older).await.unwrap();
        repo.create(&newer).await.unwrap();

        let list = repo.list_for_user(&user()).await.unwrap();

        assert_eq!(list[0].text, "b");
        assert_eq!(list[1].text, "a");
    }

    #[tokio::test]
    async fn mark_read_is_scoped_to_owner() {
        let repo = InMemoryNotificationRepository::new();
        let n = Notification::cycle_late(user(), "late", "/x", Timestamp::now());
        repo.create(&n).await.unwrap();

        let other = UserId::new("user-2").unwrap();
        assert!(!repo.mark_read(&other, &n.id).await.unwrap());
        assert!(repo.mark_read(&user(), &n.id).await.unwrap());
        assert!(repo.list_for_user(&user()).await.unwrap()[0].read);
    }
}
