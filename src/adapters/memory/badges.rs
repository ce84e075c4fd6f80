//! In-memory badge store.

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::domain::gamification::{Badge, BadgeKey};
use crate::ports::BadgeRepository;

#[derive(Debug, Clone, Default)]
pub struct InMemoryBadgeRepository {
    badges: Arc<RwLock<HashMap<UserId, BTreeMap<BadgeKey, Badge>>>>,
}

impl InMemoryBadgeRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BadgeRepository for InMemoryBadgeRepository {
    async fn unlock(
        &self,
        user_id: &UserId,
        key: BadgeKey,
        at: Timestamp,
    ) -> Result<bool, DomainError> {
        let mut badges = self.badges.write().await;
        let user_badges = badges.entry(user_id.clone()).or_default();
        if user_badges.contains_key(&key) {
            return Ok(false);
        }
        user_badges.insert(key, Badge::new(key, at));
        Ok(true)
    }

    async fn list(&self, user_id: &UserId) -> Result<Vec<Badge>, DomainError> {
        Ok(self
            .badges
            .read()
            .await
            .get(user_id)
            .map(|b| b.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn delete_all(&self, user_id: &UserId) -> Result<(), DomainError> {
        self.badges.write().await.remove(user_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unlock_reports_first_time_only() {
        let repo = InMemoryBadgeRepository::new();
        let user = UserId::new("user-1").unwrap();

        assert!(repo.unlock(&user, BadgeKey::FirstCycle, Timestamp::now()).await.unwrap());
        assert!(!repo.unlock(&user, BadgeKey::FirstCycle, Timestamp::now()).await.unwrap());
        assert_eq!(repo.list(&user).await.unwrap().len(), 1);
    }
}
