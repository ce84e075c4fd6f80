//! Badge repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::domain::gamification::{Badge, BadgeKey};

#[async_trait]
pub trait BadgeRepository: Send + Sync {
    /// Records the badge. Returns `true` only the first time it is unlocked.
    async fn unlock(
        &self,
        user_id: &UserId,
        key: BadgeKey,
        at: Timestamp,
    ) -> Result<bool, DomainError>;

    async fn list(&self, user_id: &UserId) -> Result<Vec<Badge>, DomainError>;

    async fn delete_all(&self, user_id: &UserId) -> Result<(), DomainError>;
}
