//! In-memory late notice markers.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::notification::LateNoticeKey;
use crate::ports::LateNoticeStore;

#[derive(Debug, Clone, Default)]
pub struct InMemoryLateNoticeStore {
    claimed: Arc<RwLock<HashSet<(UserId, LateNoticeKey)>>>,
}

impl InMemoryLateNoticeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn is_claimed(&self, user_id: &UserId, key: LateNoticeKey) -> bool {
        self.claimed.read().await.contains(&(user_id.clone(), key))
    }
}

#[async_trait]
impl LateNoticeStore for InMemoryLateNoticeStore {
    async fn claim(&self, user_id: &UserId, key: LateNoticeKey) -> Result<bool, DomainError> {
        Ok(self.claimed.write().await.insert((user_id.clone(), key)))
    }

    async fn release(&self, user_id: &UserId, key: LateNoticeKey) -> Result<(), DomainError> {
        self.claimed.write().await.remove(&(user_id.clone(), key));
        Ok(())
    }

    async fn delete_all(&self, user_id: &UserId) -> Result<(), DomainError> {
        self.claimed.write().await.retain(|(owner, _)| owner != user_id);
        Ok(())
    }
}
