//! LateNoticeStore port - at-most-once markers for late-cycle notices.
//!
//! The scheduled check claims `(user, predicted start)` before creating a
//! notification, so repeated or overlapping sweeps notify once.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::notification::LateNoticeKey;

/// # Example
///
/// ```ignore
/// if !store.claim(&user_id, key).await? {
///     return Ok(()); // Already notified
/// }
/// if let Err(e) = notifications.create(&notice).await {
///     store.release(&user_id, key).await?;
///     return Err(e);
/// }
/// ```
#[async_trait]
pub trait LateNoticeStore: Send + Sync {
    /// Atomically creates the marker. Returns `true` if this call created it.
    async fn claim(&self, user_id: &UserId, key: LateNoticeKey) -> Result<bool, DomainError>;

    /// Removes a marker so a later sweep may retry.
    async fn release(&self, user_id: &UserId, key: LateNoticeKey) -> Result<(), DomainError>;

    async fn delete_all(&self, user_id: &UserId) -> Result<(), DomainError>;
}
