//! Event publishing shared by the command handlers.

use serde::Serialize;

use crate::domain::foundation::{CommandMetadata, DomainEvent, SerializableDomainEvent};
use crate::ports::EventPublisher;

/// Publishes an event after its state change has been persisted.
///
/// The write already happened, so a failure here is logged and swallowed.
pub(crate) async fn publish_after_commit<E>(
    publisher: &dyn EventPublisher,
    event: &E,
    metadata: &CommandMetadata,
) where
    E: DomainEvent + Serialize,
{
    let envelope = match event.to_envelope() {
        Ok(envelope) => metadata.stamp(envelope),
        Err(err) => {
            tracing::error!(event_type = event.event_type(), error = %err, "failed to serialize event");
            return;
        }
    };

    if let Err(err) = publisher.publish(envelope).await {
        tracing::warn!(event_type = event.event_type(), error = %err, "failed to publish event");
    }
}
