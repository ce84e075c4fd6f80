//! Event subscription port.

use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;

use crate::domain::foundation::{DomainError, EventEnvelope};

/// Reacts to events on a session bus.
///
/// Handlers may publish further events while handling one. An error or a
/// panic is logged by the bus and does not reach the publisher.
#[async_trait]
pub trait EventHandler: Send + Sync {
    async fn handle(&self, event: EventEnvelope) -> Result<(), DomainError>;

    /// Shown in bus logs when the handler fails.
    fn name(&self) -> &'static str;
}

/// Handle returned by `subscribe`; call `unsubscribe` to detach the handler.
///
/// Dropping a subscription leaves the handler registered until the bus shuts
/// down.
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    pub fn new(cancel: impl FnOnce() + Send + Sync + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// A subscription with nothing to cancel.
    pub fn detached() -> Self {
        Self { cancel: None }
    }

    /// Removes the handler from the bus. Later publishes skip it.
    pub fn unsubscribe(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}

/// Attaches handlers to event types.
pub trait EventSubscriber: Send + Sync {
    fn subscribe(&self, event_type: &str, handler: Arc<dyn EventHandler>) -> Subscription;

    /// One subscription per event type, all sharing `handler`.
    fn subscribe_all(
        &self,
        event_types: &[&str],
        handler: Arc<dyn EventHandler>,
    ) -> Vec<Subscription> {
        event_types
            .iter()
            .map(|event_type| self.subscribe(event_type, handler.clone()))
            .collect()
    }
}

/// Anything that can both publish and subscribe.
pub trait EventBus: super::EventPublisher + EventSubscriber {}

impl<T: super::EventPublisher + EventSubscriber> EventBus for T {}
