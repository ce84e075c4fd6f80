//! Per-session event bus.
//!
//! One bus lives for one session (an HTTP request, a scheduled sweep). Events
//! are delivered in-process, in subscription order, awaiting each handler
//! before the next. Handler errors and panics are logged and swallowed.

use async_trait::async_trait;
use futures::FutureExt;
use std::any::Any;
use std::collections::HashMap;
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock, Weak};

use crate::domain::foundation::{DomainError, EventEnvelope};
use crate::ports::{EventHandler, EventPublisher, EventSubscriber, Subscription};

type HandlerList = Vec<(u64, Arc<dyn EventHandler>)>;

struct BusState {
    handlers: RwLock<HashMap<String, HandlerList>>,
    published: RwLock<Vec<EventEnvelope>>,
    next_id: AtomicU64,
    closed: AtomicBool,
}

impl BusState {
    fn remove(&self, event_type: &str, id: u64) {
        let mut handlers = self
            .handlers
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(list) = handlers.get_mut(event_type) {
            list.retain(|(handler_id, _)| *handler_id != id);
            if list.is_empty() {
                handlers.remove(event_type);
            }
        }
    }
}

/// In-process bus scoped to one session.
///
/// Handlers may hold a clone of the bus and publish from inside `handle`.
/// Call `shutdown` at session end to drop every handler, which also breaks
/// any handler -> bus reference cycles.
///
/// # Example
///
/// ```ignore
/// let bus = SessionEventBus::new();
/// let sub = bus.subscribe("cycle.logged", Arc::new(ToastNotifier::new(/* ... */)));
///
/// bus.publish(envelope).await?;
///
/// sub.unsubscribe();
/// bus.shutdown();
/// ```
#[derive(Clone)]
pub struct SessionEventBus {
    state: Arc<BusState>,
}

impl SessionEventBus {
    pub fn new() -> Self {
        Self {
            state: Arc::new(BusState {
                handlers: RwLock::new(HashMap::new()),
                published: RwLock::new(Vec::new()),
                next_id: AtomicU64::new(1),
                closed: AtomicBool::new(false),
            }),
        }
    }

    /// Drops every handler and the publish log. Later publishes are no-ops.
    pub fn shutdown(&self) {
        self.state.closed.store(true, Ordering::SeqCst);
        self.state
            .handlers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        self.state
            .published
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    pub fn is_closed(&self) -> bool {
        self.state.closed.load(Ordering::SeqCst)
    }

    /// Number of handlers registered for an event type.
    pub fn handler_count(&self, event_type: &str) -> usize {
        self.state
            .handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(event_type)
            .map_or(0, Vec::len)
    }

    // === Inspection ===

    /// Every event published on this bus, in publish order.
    pub fn published_events(&self) -> Vec<EventEnvelope> {
        self.state
            .published
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn events_of_type(&self, event_type: &str) -> Vec<EventEnvelope> {
        self.published_events()
            .into_iter()
            .filter(|e| e.event_type == event_type)
            .collect()
    }

    pub fn has_event(&self, event_type: &str) -> bool {
        self.state
            .published
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .any(|e| e.event_type == event_type)
    }
}

impl Default for SessionEventBus {
    fn default() -> Self {
        Self::new()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

#[async_trait]
impl EventPublisher for SessionEventBus {
    async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError> {
        if self.is_closed() {
            tracing::debug!(event_type = %event.event_type, "publish after shutdown ignored");
            return Ok(());
        }

        self.state
            .published
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event.clone());

        // Snapshot so handlers can subscribe, unsubscribe or publish re-entrantly.
        let type_handlers: Vec<Arc<dyn EventHandler>> = {
            let handlers = self
                .state
                .handlers
                .read()
                .unwrap_or_else(PoisonError::into_inner);
            handlers
                .get(&event.event_type)
                .map(|list| list.iter().map(|(_, h)| Arc::clone(h)).collect())
                .unwrap_or_default()
        };

        for handler in type_handlers {
            let outcome = AssertUnwindSafe(handler.handle(event.clone()))
                .catch_unwind()
                .await;
            match outcome {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    tracing::warn!(
                        handler = handler.name(),
                        event_type = %event.event_type,
                        event_id = %event.event_id,
                        error = %e,
                        "event handler failed"
                    );
                }
                Err(panic) => {
                    tracing::warn!(
                        handler = handler.name(),
                        event_type = %event.event_type,
                        event_id = %event.event_id,
                        panic = %panic_message(panic.as_ref()),
                        "event handler panicked"
                    );
                }
            }
        }

        Ok(())
    }

    async fn publish_all(&self, events: Vec<EventEnvelope>) -> Result<(), DomainError> {
        for event in events {
            self.publish(event).await?;
        }
        Ok(())
    }
}

impl EventSubscriber for SessionEventBus {
    fn subscribe(&self, event_type: &str, handler: Arc<dyn EventHandler>) -> Subscription {
        if self.is_closed() {
            return Subscription::detached();
        }

        let id = self.state.next_id.fetch_add(1, Ordering::SeqCst);
        self.state
            .handlers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(event_type.to_string())
            .or_default()
            .push((id, handler));

        let state: Weak<BusState> = Arc::downgrade(&self.state);
        let event_type = event_type.to_string();
        Subscription::new(move || {
            if let Some(state) = state.upgrade() {
                state.remove(&event_type, id);
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{ErrorCode, EventId, EventMetadata, Timestamp};
    use serde_json::json;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Mutex;

    fn test_envelope(event_type: &str) -> EventEnvelope {
        EventEnvelope {
            event_id: EventId::new(),
            event_type: event_type.to_string(),
            aggregate_id: "user-1".to_string(),
            aggregate_type: "Test".to_string(),
            occurred_at: Timestamp::now(),
            payload: json!({}),
            metadata: EventMetadata::default(),
        }
    }

    struct RecordingHandler {
        label: &'static str,
        log: Arc<Mutex<Vec<&'static str>>>,
    }

    #[async_trait]
    impl EventHandler for RecordingHandler {
        async fn handle(&self, _: EventEnvelope) -> Result<(), DomainError> {
            self.log.lock().unwrap().push(self.label);
            Ok(())
        }
        fn name(&self) -> &'static str {
            "RecordingHandler"
        }
    }

    struct CountingHandler(Arc<AtomicUsize>);

    #[async_trait]
    impl EventHandler for CountingHandler {
        async fn handle(&self, _: EventEnvelope) -> Result<(), DomainError> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
        fn name(&self) -> &'static str {
            "CountingHandler"
        }
    }

    struct FailingHandler;

    #[async_trait]
    impl EventHandler for FailingHandler {
        async fn handle(&self, _: EventEnvelope) -> Result<(), DomainError> {
            Err(DomainError::new(ErrorCode::InternalError, "Handler failed"))
        }
        fn name(&self) -> &'static str {
            "FailingHandler"
        }
    }

    struct PanickingHandler;

    #[async_trait]
    impl EventHandler for PanickingHandler {
        async fn handle(&self, _: EventEnvelope) -> Result<(), DomainError> {
            panic!("boom");
        }
        fn name(&self) -> &'static str {
            "PanickingHandler"
        }
    }

    #[tokio::test]
    async fn handlers_run_in_subscription_order() {
        let bus = SessionEventBus::new();
        let log = Arc::new(Mutex::new(Vec::new()));
        for label in ["first", "second", "third"] {
            bus.subscribe(
                "test.event",
                Arc::new(RecordingHandler {
                    label,
                    log: log.clone(),
                }),
            );
        }

        bus.publish(test_envelope("test.event")).await.unwrap();

        assert_eq!(*log.lock().unwrap(), vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn only_matching_type_is_delivered() {
        let bus = SessionEventBus::new();
        let counter = Arc::new(AtomicUsize::new(0));
        bus.subscribe_all(&["type.a", "type.b"], Arc::new(CountingHandler(counter.clone())));

        bus.publish(test_envelope("type.a")).await.unwrap();
        bus.publish(test_envelope("type.b")).await.unwrap();
        bus.publish(test_envelope("type.c")).await.unwrap();

        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn failing_handler_does_not_block_others_or_publisher() {
        let bus = SessionEventBus::new();
        let counter = Arc::new(AtomicUsize::new(0));
        bus.subscribe("test.event", Arc::new(FailingHandler));
        bus.subscribe("test.event", Arc::new(CountingHandler(counter.clone())));

        let result = bus.publish(test_envelope("test.event")).await;

        assert!(result.is_ok());
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn panicking_handler_is_contained() {
        let bus = SessionEventBus::new();
        let counter = Arc::new(AtomicUsize::new(0));
        bus.subscribe("test.event", Arc::new(PanickingHandler));
        bus.subscribe("test.event", Arc::new(CountingHandler(counter.clone())));

        let result = bus.publish(test_envelope("test.event")).await;

        assert!(result.is_ok());
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn unsubscribe_stops_delivery() {
        let bus = SessionEventBus::new();
        let counter = Arc::new(AtomicUsize::new(0));
        let sub = bus.subscribe("test.event", Arc::new(CountingHandler(counter.clone())));

        bus.publish(test_envelope("test.event")).await.unwrap();
        sub.unsubscribe();
        bus.publish(test_envelope("test.event")).await.unwrap();

        assert_eq!(counter.load(Ordering::SeqCst), 1);
        assert_eq!(bus.handler_count("test.event"), 0);
    }

    #[tokio::test]
    async fn unsubscribe_removes_only_its_own_handler() {
        let bus = SessionEventBus::new();
        let counter = Arc::new(AtomicUsize::new(0));
        let handler: Arc<dyn EventHandler> = Arc::new(CountingHandler(counter.clone()));
        let first = bus.subscribe("test.event", handler.clone());
        let _second = bus.subscribe("test.event", handler);

        first.unsubscribe();
        bus.publish(test_envelope("test.event")).await.unwrap();

        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn handlers_can_publish_reentrantly() {
        struct Relay {
            bus: SessionEventBus,
        }

        #[async_trait]
        impl EventHandler for Relay {
            async fn handle(&self, _: EventEnvelope) -> Result<(), DomainError> {
                self.bus.publish(test_envelope("second.event")).await
            }
            fn name(&self) -> &'static str {
                "Relay"
            }
        }

        let bus = SessionEventBus::new();
        let counter = Arc::new(AtomicUsize::new(0));
        bus.subscribe("first.event", Arc::new(Relay { bus: bus.clone() }));
        bus.subscribe("second.event", Arc::new(CountingHandler(counter.clone())));

        bus.publish(test_envelope("first.event")).await.unwrap();

        assert_eq!(counter.load(Ordering::SeqCst), 1);
        assert!(bus.has_event("second.event"));
    }

    #[tokio::test]
    async fn shutdown_drops_handlers_and_ignores_publishes() {
        let bus = SessionEventBus::new();
        let counter = Arc::new(AtomicUsize::new(0));
        bus.subscribe("test.event", Arc::new(CountingHandler(counter.clone())));

        bus.shutdown();
        bus.publish(test_envelope("test.event")).await.unwrap();

        assert_eq!(counter.load(Ordering::SeqCst), 0);
        assert_eq!(bus.handler_count("test.event"), 0);
        assert!(bus.published_events().is_empty());
    }

    #[tokio::test]
    async fn shutdown_discards_publish_log() {
        let bus = SessionEventBus::new();
        bus.publish(test_envelope("test.event")).await.unwrap();
        assert!(bus.has_event("test.event"));

        bus.shutdown();

        assert!(bus.published_events().is_empty());
        assert!(!bus.has_event("test.event"));
    }

    #[tokio::test]
    async fn publish_all_keeps_order() {
        let bus = SessionEventBus::new();
        bus.publish_all(vec![test_envelope("type.a"), test_envelope("type.b")])
            .await
            .unwrap();

        let types: Vec<_> = bus
            .published_events()
            .into_iter()
            .map(|e| e.event_type)
            .collect();
        assert_eq!(types, vec!["type.a", "type.b"]);
        assert_eq!(bus.events_of_type("type.b").len(), 1);
    }
}
