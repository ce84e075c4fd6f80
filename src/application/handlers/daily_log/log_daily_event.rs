//! LogDailyEventHandler - merges symptom flags into one day's record.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::daily_log::{DailyEvent, DailyEventLogged, DailyEventPatch};
use crate::domain::foundation::{CommandMetadata, DomainError, EventId, ValidationError};
use crate::ports::{Clock, DailyEventRepository, EventPublisher};

use super::super::publish::publish_after_commit;

#[derive(Debug, Clone)]
pub struct LogDailyEventCommand {
    pub date: NaiveDate,
    pub patch: DailyEventPatch,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum LogDailyEventError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Domain(#[from] DomainError),
}

pub struct LogDailyEventHandler {
    daily_events: Arc<dyn DailyEventRepository>,
    publisher: Arc<dyn EventPublisher>,
    clock: Arc<dyn Clock>,
}

impl LogDailyEventHandler {
    pub fn new(
        daily_events: Arc<dyn DailyEventRepository>,
        publisher: Arc<dyn EventPublisher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            daily_events,
            publisher,
            clock,
        }
    }

    pub async fn handle(
        &self,
        cmd: LogDailyEventCommand,
        metadata: CommandMetadata,
    ) -> Result<DailyEvent, LogDailyEventError> {
        if cmd.patch.is_empty() {
            return Err(ValidationError::empty_field("flags").into());
        }

        let now = self.clock.now();
        let event = self
            .daily_events
            .merge(&metadata.user_id, cmd.date, &cmd.patch, now)
            .await?;

        tracing::info!(
            user_id = %metadata.user_id,
            date = %cmd.date,
            flags = event.flags.len(),
            "daily event merged"
        );

        let logged = DailyEventLogged {
            event_id: EventId::new(),
            user_id: metadata.user_id.clone(),
            date: cmd.date,
            flags: event.flags.iter().cloned().collect(),
            occurred_at: now,
        };
        publish_after_commit(self.publisher.as_ref(), &logged, &metadata).await;

        Ok(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::events::SessionEventBus;
    use crate::adapters::memory::InMemoryDailyEventRepository;
    use crate::adapters::SystemClock;
    use crate::domain::daily_log::SymptomTag;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, 10).unwrap()
    }

    fn tag(s: &str) -> SymptomTag {
        SymptomTag::new(s).unwrap()
    }

    fn handler(repo: &InMemoryDailyEventRepository, bus: &SessionEventBus) -> LogDailyEventHandler {
        LogDailyEventHandler::new(
            Arc::new(repo.clone()),
            Arc::new(bus.clone()),
            Arc::new(SystemClock),
        )
    }

    #[tokio::test]
    async fn merge_publishes_resulting_flags() {
        let repo = InMemoryDailyEventRepository::new();
        let bus = SessionEventBus::new();
        let h = handler(&repo, &bus);
        h.handle(
            LogDailyEventCommand {
                date: day(),
                patch: DailyEventPatch::default().set(tag("cramps")).set(tag("headache")),
            },
            CommandMetadata::test_fixture(),
        )
        .await
        .unwrap();

        let event = h
            .handle(
                LogDailyEventCommand {
                    date: day(),
                    patch: DailyEventPatch::default().clear(tag("headache")),
                },
                CommandMetadata::test_fixture(),
            )
            .await
            .unwrap();

        assert_eq!(event.flags.len(), 1);
        let published = bus.events_of_type("daily_event.logged");
        assert_eq!(published.len(), 2);
        assert_eq!(published[1].payload["flags"], serde_json::json!(["cramps"]));
        assert_eq!(published[1].payload["date"], "2024-02-10");
    }

    #[tokio::test]
    async fn empty_patch_is_rejected() {
        let repo = InMemoryDailyEventRepository::new();
        let bus = SessionEventBus::new();

        let err = handler(&repo, &bus)
            .handle(
                LogDailyEventCommand {
                    date: day(),
                    patch: DailyEventPatch::default(),
                },
                CommandMetadata::test_fixture(),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, LogDailyEventError::Validation(_)));
        assert!(bus.published_events().is_empty());
    }
}
