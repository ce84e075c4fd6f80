//! Late-cycle scheduled check.
//!
//! Sweeps every user with cycle data and issues one `cycle_late`
//! notification per predicted start date that is more than `grace_days`
//! overdue. Safe to run repeatedly: the late-notice marker is claimed before
//! the notification is written and released again if the write fails.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::stream::{self, StreamExt};
use futures::FutureExt;
use serde::Serialize;

use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::notification::{LateNoticeKey, Notification};
use crate::ports::{
    Clock, CycleDataRepository, LateNoticeStore, LocaleStrings, Message, NotificationRepository,
};

/// Sweep settings.
#[derive(Debug, Clone)]
pub struct LateCycleCheckConfig {
    pub grace_days: u32,
    pub concurrency: usize,
    pub link: String,
}

impl Default for LateCycleCheckConfig {
    fn default() -> Self {
        Self {
            grace_days: 3,
            concurrency: 4,
            link: "/cycle-tracker".to_string(),
        }
    }
}

/// Totals for one sweep.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LateCycleReport {
    pub scanned: usize,
    pub notified: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl LateCycleReport {
    pub fn summary(&self) -> String {
        format!(
            "Late cycle check complete: {} users scanned, {} notified, {} skipped, {} failed",
            self.scanned, self.notified, self.skipped, self.failed
        )
    }
}

/// Per-user result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UserCheck {
    Notified,
    NoPrediction,
    NotLate,
    AlreadyNotified,
}

pub struct LateCycleCheckHandler {
    cycle_data: Arc<dyn CycleDataRepository>,
    notifications: Arc<dyn NotificationRepository>,
    late_notices: Arc<dyn LateNoticeStore>,
    clock: Arc<dyn Clock>,
    strings: Arc<dyn LocaleStrings>,
    config: LateCycleCheckConfig,
}

impl LateCycleCheckHandler {
    pub fn new(
        cycle_data: Arc<dyn CycleDataRepository>,
        notifications: Arc<dyn NotificationRepository>,
        late_notices: Arc<dyn LateNoticeStore>,
        clock: Arc<dyn Clock>,
        strings: Arc<dyn LocaleStrings>,
        config: LateCycleCheckConfig,
    ) -> Self {
        Self {
            cycle_data,
            notifications,
            late_notices,
            clock,
            strings,
            config,
        }
    }

    /// Runs one sweep. Only failing to list users fails the sweep; per-user
    /// errors and panics are logged and counted.
    pub async fn handle(&self) -> Result<LateCycleReport, DomainError> {
        let user_ids = self.cycle_data.list_user_ids().await?;
        let mut report = LateCycleReport {
            scanned: user_ids.len(),
            ..Default::default()
        };

        let mut results = stream::iter(user_ids)
            .map(|user_id| async move {
                let result = AssertUnwindSafe(self.check_user(&user_id))
                    .catch_unwind()
                    .await
                    .unwrap_or_else(|_| {
                        Err(DomainError::new(
                            ErrorCode::InternalError,
                            "late cycle check panicked",
                        ))
                    });
                (user_id, result)
            })
            .buffer_unordered(self.config.concurrency.max(1));

        while let Some((user_id, result)) = results.next().await {
            match result {
                Ok(UserCheck::Notified) => report.notified += 1,
                Ok(_) => report.skipped += 1,
                Err(err) => {
                    tracing::error!(user_id = %user_id, error = %err, "late cycle check failed for user");
                    report.failed += 1;
                }
            }
        }

        tracing::info!(
            scanned = report.scanned,
            notified = report.notified,
            skipped = report.skipped,
            failed = report.failed,
            "late cycle check finished"
        );
        Ok(report)
    }

    async fn check_user(&self, user_id: &UserId) -> Result<UserCheck, DomainError> {
        let Some(aggregate) = self.cycle_data.load(user_id).await? else {
            return Ok(UserCheck::NoPrediction);
        };
        let Some(prediction) = aggregate.prediction() else {
            return Ok(UserCheck::NoPrediction);
        };

        let today = self.clock.today();
        if !prediction.is_late(today, self.config.grace_days) {
            return Ok(UserCheck::NotLate);
        }

        let key = LateNoticeKey::new(prediction.next_period_start);
        if !self.late_notices.claim(user_id, key).await? {
            return Ok(UserCheck::AlreadyNotified);
        }

        let text = self.strings.render(Message::CycleLateText {
            days_late: prediction.days_overdue(today),
        });
        let notice = Notification::cycle_late(
            user_id.clone(),
            text,
            self.config.link.clone(),
            self.clock.now(),
        );

        if let Err(err) = self.notifications.create(&notice).await {
            if let Err(release_err) = self.late_notices.release(user_id, key).await {
                tracing::error!(
                    user_id = %user_id,
                    predicted_start = %key.predicted_start,
                    error = %release_err,
                    "failed to release late notice claim"
                );
            }
            return Err(err);
        }

        tracing::info!(
            user_id = %user_id,
            predicted_start = %prediction.next_period_start,
            "late cycle notice issued"
        );
        Ok(UserCheck::Notified)
    }
}
