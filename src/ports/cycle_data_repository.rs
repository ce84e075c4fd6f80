//! Cycle data repository port.
//!
//! One document per user holding the cycle list and its rolling averages.
//! Writes are compare-and-swap on the aggregate's `version`.

use async_trait::async_trait;

use crate::domain::cycle::CycleAggregate;
use crate::domain::foundation::{DomainError, UserId};

/// Repository port for the per-user `CycleAggregate`.
#[async_trait]
pub trait CycleDataRepository: Send + Sync {
    /// Load a user's aggregate.
    ///
    /// Returns `None` when the user has never logged anything.
    async fn load(&self, user_id: &UserId) -> Result<Option<CycleAggregate>, DomainError>;

    /// Persist the aggregate if the stored version still equals
    /// `aggregate.version()`. Returns the new version.
    ///
    /// # Errors
    ///
    /// - `VersionConflict` if another writer got there first
    /// - `DatabaseError` on persistence failure
    async fn save(&self, user_id: &UserId, aggregate: &CycleAggregate) -> Result<u64, DomainError>;

    /// All users that have a stored aggregate.
    async fn list_user_ids(&self) -> Result<Vec<UserId>, DomainError>;

    /// Remove the aggregate. Missing documents are not an error.
    async fn delete(&self, user_id: &UserId) -> Result<(), DomainError>;
}
