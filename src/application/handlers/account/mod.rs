//! Account data erasure.

use std::sync::Arc;

use crate::domain::foundation::{CommandMetadata, DomainError};
use crate::ports::{
    BadgeRepository, CycleDataRepository, DailyEventRepository, LateNoticeStore,
    NotificationRepository,
};

/// Deletes everything stored for a user.
///
/// Stores are cleared one after another; a failure part-way leaves the rest
/// in place and the call can simply be repeated.
pub struct EraseUserDataHandler {
    cycle_data: Arc<dyn CycleDataRepository>,
    daily_events: Arc<dyn DailyEventRepository>,
    notifications: Arc<dyn NotificationRepository>,
    badges: Arc<dyn BadgeRepository>,
    late_notices: Arc<dyn LateNoticeStore>,
}

impl EraseUserDataHandler {
    pub fn new(
        cycle_data: Arc<dyn CycleDataRepository>,
        daily_events: Arc<dyn DailyEventRepository>,
        notifications: Arc<dyn NotificationRepository>,
        badges: Arc<dyn BadgeRepository>,
        late_notices: Arc<dyn LateNoticeStore>,
    ) -> Self {
        Self {
            cycle_data,
            daily_events,
            notifications,
            badges,
            late_notices,
        }
    }

    pub async fn handle(&self, metadata: CommandMetadata) -> Result<(), DomainError> {
        let user_id = &metadata.user_id;

        self.cycle_data.delete(user_id).await?;
        self.daily_events.delete_all(user_id).await?;
        self.notifications.delete_all(user_id).await?;
        self.badges.delete_all(user_id).await?;
        self.late_notices.delete_all(user_id).await?;

        tracing::info!(user_id = %user_id, "user data erased");
        Ok(())
    }
}
