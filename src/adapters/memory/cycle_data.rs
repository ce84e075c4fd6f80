//! In-memory cycle data store with compare-and-swap writes.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::cycle::CycleAggregate;
use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::ports::CycleDataRepository;

#[derive(Debug, Clone, Default)]
pub struct InMemoryCycleDataRepository {
    documents: Arc<RwLock<HashMap<UserId, CycleAggregate>>>,
}

impl InMemoryCycleDataRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a document as-is, bypassing the version check.
    pub async fn insert(&self, user_id: UserId, aggregate: CycleAggregate) {
        self.documents.write().await.insert(user_id, aggregate);
    }

    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }
}

#[async_trait]
impl CycleDataRepository for InMemoryCycleDataRepository {
    async fn load(&self, user_id: &UserId) -> Result<Option<CycleAggregate>, DomainError> {
        Ok(self.documents.read().await.get(user_id).cloned())
    }

    async fn save(&self, user_id: &UserId, aggregate: &CycleAggregate) -> Result<u64, DomainError> {
        let mut documents = self.documents.write().await;
        let stored_version = documents.get(user_id).map_or(0, CycleAggregate::version);
        if stored_version != aggregate.version() {
            return Err(DomainError::new(
                ErrorCode::VersionConflict,
                format!(
                    "cycle data for {} is at version {}, write expected {}",
                    user_id,
                    stored_version,
                    aggregate.version()
                ),
            ));
        }

        let next_version = stored_version + 1;
        documents.insert(user_id.clone(), aggregate.clone().with_version(next_version));
        Ok(next_version)
    }

    async fn list_user_ids(&self) -> Result<Vec<UserId>, DomainError> {
        let mut ids: Vec<UserId> = self.documents.read().await.keys().cloned().collect();
        ids.sort();
        Ok(ids)
    }

    async fn delete(&self, user_id: &UserId) -> Result<(), DomainError> {
        self.documents.write().await.remove(user_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn user() -> UserId {
        UserId::new("user-1").unwrap()
    }

    #[tokio::test]
    async fn load_missing_returns_none() {
        let repo = InMemoryCycleDataRepository::new();
        assert!(repo.load(&user()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn save_bumps_version() {
        let repo = InMemoryCycleDataRepository::new();
        let mut aggregate = CycleAggregate::empty();
        aggregate.start_period(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());

        assert_eq!(repo.save(&user(), &aggregate).await.unwrap(), 1);

        let loaded = repo.load(&user()).await.unwrap().unwrap();
        assert_eq!(loaded.version(), 1);
        assert_eq!(loaded.cycles().len(), 1);
    }

    #[tokio::test]
    async fn stale_write_is_rejected() {
        let repo = InMemoryCycleDataRepository::new();
        repo.save(&user(), &CycleAggregate::empty()).await.unwrap();

        let err = repo
            .save(&user(), &CycleAggregate::empty())
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::VersionConflict);
    }

    #[tokio::test]
    async fn delete_and_list() {
        let repo = InMemoryCycleDataRepository::new();
        repo.save(&user(), &CycleAggregate::empty()).await.unwrap();
        assert_eq!(repo.list_user_ids().await.unwrap(), vec![user()]);

        repo.delete(&user()).await.unwrap();

        assert!(repo.list_user_ids().await.unwrap().is_empty());
    }
}
