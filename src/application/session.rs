//! EventSession - one bus, its standard subscribers, and their teardown.

use std::sync::Arc;

use crate::ports::{
    BadgeRepository, Clock, EventPublisher, EventSubscriber, LocaleStrings, Subscription,
};

use super::subscribers::{BadgeUnlocker, Effect, EffectRecorder, ToastNotifier};

/// Long-lived dependencies the standard subscribers need.
#[derive(Clone)]
pub struct SessionServices {
    pub badges: Arc<dyn BadgeRepository>,
    pub clock: Arc<dyn Clock>,
    pub strings: Arc<dyn LocaleStrings>,
}

/// Subscribers wired onto a per-session bus.
///
/// Open one per request (or per scheduled run), hand `publisher()` to the
/// command handlers, then `close` to detach everything and collect the
/// client-facing effects.
pub struct EventSession {
    publisher: Arc<dyn EventPublisher>,
    recorder: EffectRecorder,
    subscriptions: Vec<Subscription>,
}

impl EventSession {
    pub fn open<B>(bus: Arc<B>, services: &SessionServices) -> Self
    where
        B: EventPublisher + EventSubscriber + 'static,
    {
        let publisher: Arc<dyn EventPublisher> = bus.clone();
        let recorder = EffectRecorder::new();
        let badge_unlocker = Arc::new(BadgeUnlocker::new(
            services.badges.clone(),
            publisher.clone(),
            services.clock.clone(),
        ));
        let toast_notifier = Arc::new(ToastNotifier::new(
            publisher.clone(),
            services.strings.clone(),
        ));

        // Recorder first so a badge is recorded ahead of its toast.
        let mut subscriptions =
            bus.subscribe_all(&EffectRecorder::EVENT_TYPES, Arc::new(recorder.clone()));
        subscriptions.extend(bus.subscribe_all(&BadgeUnlocker::EVENT_TYPES, badge_unlocker));
        subscriptions.extend(bus.subscribe_all(&ToastNotifier::EVENT_TYPES, toast_notifier));

        Self {
            publisher,
            recorder,
            subscriptions,
        }
    }

    pub fn publisher(&self) -> Arc<dyn EventPublisher> {
        self.publisher.clone()
    }

    /// Detaches every subscriber and returns the recorded effects.
    pub fn close(self) -> Vec<Effect> {
        for subscription in self.subscriptions {
            subscription.unsubscribe();
        }
        self.recorder.take()
    }
}
