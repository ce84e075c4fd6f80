//! Event publishing port.
//!
//! Handlers publish after their write commits, without knowing who listens.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, EventEnvelope};

/// Delivers envelopes to the handlers subscribed to their type.
///
/// Subscribers run in subscription order. A failing subscriber never fails
/// the publisher.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Resolves once every current subscriber has finished with the event.
    async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError>;

    /// Publishes `events` one after another.
    async fn publish_all(&self, events: Vec<EventEnvelope>) -> Result<(), DomainError>;
}
