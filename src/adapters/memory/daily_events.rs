//! In-memory daily event store.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::daily_log::{DailyEvent, DailyEventPatch};
use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::ports::DailyEventRepository;

#[derive(Debug, Clone, Default)]
pub struct InMemoryDailyEventRepository {
    days: Arc<RwLock<HashMap<UserId, BTreeMap<NaiveDate, DailyEvent>>>>,
}

impl InMemoryDailyEventRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DailyEventRepository for InMemoryDailyEventRepository {
    async fn merge(
        &self,
        user_id: &UserId,
        date: NaiveDate,
        patch: &DailyEventPatch,
        now: Timestamp,
    ) -> Result<DailyEvent, DomainError> {
        // The write lock spans read and write, so concurrent merges serialize.
        let mut days = self.days.write().await;
        let user_days = days.entry(user_id.clone()).or_default();
        let merged = DailyEvent::merged(user_days.remove(&date), date, patch, now);
        user_days.insert(date, merged.clone());
        Ok(merged)
    }

    async fn find(
        &self,
        user_id: &UserId,
        date: NaiveDate,
    ) -> Result<Option<DailyEvent>, DomainError> {
        Ok(self
            .days
            .read()
            .await
            .get(user_id)
            .and_then(|days| days.get(&date))
            .cloned())
    }

    async fn list_range(
        &self,
        user_id: &UserId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<DailyEvent>, DomainError> {
        if from > to {
            return Ok(Vec::new());
        }
        Ok(self
            .days
            .read()
            .await
            .get(user_id)
            .map(|days| days.range(from..=to).map(|(_, e)| e.clone()).collect())
            .unwrap_or_default())
    }

    async fn exists_any(&self, user_id: &UserId) -> Result<bool, DomainError> {
        Ok(self
            .days
            .read()
            .await
            .get(user_id)
            .is_some_and(|days| !days.is_empty()))
    }

    async fn delete_all(&self, user_id: &UserId) -> Result<(), DomainError> {
        self.days.write().await.remove(user_id);
        Ok(())
    }
}
