//! Daily event repository port.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::daily_log::{DailyEvent, DailyEventPatch};
use crate::domain::foundation::{DomainError, Timestamp, UserId};

/// Repository port for per-day symptom records.
///
/// Writes are merges: flags absent from a patch are never touched, even when
/// two patches for the same day race.
#[async_trait]
pub trait DailyEventRepository: Send + Sync {
    /// Merge a patch into the day's record, creating it if needed.
    async fn merge(
        &self,
        user_id: &UserId,
        date: NaiveDate,
        patch: &DailyEventPatch,
        now: Timestamp,
    ) -> Result<DailyEvent, DomainError>;

    async fn find(&self, user_id: &UserId, date: NaiveDate)
        -> Result<Option<DailyEvent>, DomainError>;

    /// Records with `from <= date <= to`, ascending by date.
    async fn list_range(
        &self,
        user_id: &UserId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<DailyEvent>, DomainError>;

    /// Returns true if the user has any daily record.
    async fn exists_any(&self, user_id: &UserId) -> Result<bool, DomainError>;

    async fn delete_all(&self, user_id: &UserId) -> Result<(), DomainError>;
}
