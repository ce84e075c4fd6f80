//! Client-reported engagement signals.

use std::sync::Arc;

use crate::domain::engagement::{EngagementKind, EngagementSignal};
use crate::domain::foundation::{CommandMetadata, SerializableDomainEvent, DomainError};
use crate::ports::{Clock, EventPublisher};

#[derive(Debug, Clone)]
pub struct RecordEngagementCommand {
    pub kind: EngagementKind,
}

/// Publishes an engagement signal on the session bus.
pub struct RecordEngagementHandler {
    publisher: Arc<dyn EventPublisher>,
    clock: Arc<dyn Clock>,
}

impl RecordEngagementHandler {
    pub fn new(publisher: Arc<dyn EventPublisher>, clock: Arc<dyn Clock>) -> Self {
        Self { publisher, clock }
    }

    pub async fn handle(
        &self,
        cmd: RecordEngagementCommand,
        metadata: CommandMetadata,
    ) -> Result<(), DomainError> {
        let signal = EngagementSignal::new(metadata.user_id.clone(), cmd.kind, self.clock.now());
        tracing::debug!(user_id = %metadata.user_id, kind = ?cmd.kind, "engagement recorded");
        self.publisher
            .publish(metadata.stamp(signal.to_envelope()?))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::events::SessionEventBus;
    use crate::adapters::SystemClock;

    #[tokio::test]
    async fn publishes_event_for_kind() {
        let bus = SessionEventBus::new();
        let handler = RecordEngagementHandler::new(Arc::new(bus.clone()), Arc::new(SystemClock));

        handler
            .handle(
                RecordEngagementCommand {
                    kind: EngagementKind::WalkthroughComplete,
                },
                CommandMetadata::test_fixture(),
            )
            .await
            .unwrap();

        let events = bus.events_of_type("walkthrough.complete");
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].aggregate_id, "test-user-123");
    }
}
