//! BadgeUnlocker - awards badges from session events.

use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;

use crate::domain::event_types::{
    APPOINTMENT_INQUIRY_SENT, CYCLE_LOGGED, DAILY_EVENT_LOGGED, FIRST_CYCLE_LOGGED, RATE_APP,
    SHARE_APP, WALKTHROUGH_COMPLETE,
};
use crate::domain::foundation::{
    DomainError, EventEnvelope, EventId, SerializableDomainEvent, UserId,
};
use crate::domain::gamification::{BadgeKey, BadgeUnlocked, CYCLE_VETERAN_THRESHOLD};
use crate::ports::{BadgeRepository, Clock, EventHandler, EventPublisher};

use super::{event_user, follow_up};

/// The part of a `cycle.logged` payload the veteran badge depends on.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoggedCount {
    cycle_count: usize,
}

/// Unlocks badges and publishes `badge.unlocked` the first time each one is
/// earned.
pub struct BadgeUnlocker {
    badges: Arc<dyn BadgeRepository>,
    publisher: Arc<dyn EventPublisher>,
    clock: Arc<dyn Clock>,
}

impl BadgeUnlocker {
    /// Event types this handler reacts to.
    pub const EVENT_TYPES: [&'static str; 7] = [
        FIRST_CYCLE_LOGGED,
        CYCLE_LOGGED,
        DAILY_EVENT_LOGGED,
        WALKTHROUGH_COMPLETE,
        SHARE_APP,
        RATE_APP,
        APPOINTMENT_INQUIRY_SENT,
    ];

    pub fn new(
        badges: Arc<dyn BadgeRepository>,
        publisher: Arc<dyn EventPublisher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            badges,
            publisher,
            clock,
        }
    }

    /// Which badge, if any, this event earns.
    fn earned_badge(event: &EventEnvelope) -> Result<Option<BadgeKey>, DomainError> {
        let key = match event.event_type.as_str() {
            FIRST_CYCLE_LOGGED => BadgeKey::FirstCycle,
            CYCLE_LOGGED => {
                let logged: LoggedCount = event.payload_as()?;
                if logged.cycle_count < CYCLE_VETERAN_THRESHOLD {
                    return Ok(None);
                }
                BadgeKey::CycleVeteran
            }
            DAILY_EVENT_LOGGED => BadgeKey::SymptomScout,
            WALKTHROUGH_COMPLETE => BadgeKey::GuidedTour,
            SHARE_APP => BadgeKey::Ambassador,
            RATE_APP => BadgeKey::Supporter,
            APPOINTMENT_INQUIRY_SENT => BadgeKey::CareSeeker,
            _ => return Ok(None),
        };
        Ok(Some(key))
    }

    async fn unlock(
        &self,
        cause: &EventEnvelope,
        user_id: UserId,
        key: BadgeKey,
    ) -> Result<(), DomainError> {
        let now = self.clock.now();
        if !self.badges.unlock(&user_id, key, now).await? {
            return Ok(());
        }

        tracing::info!(user_id = %user_id, badge = %key, "badge unlocked");

        let unlocked = BadgeUnlocked {
            event_id: EventId::new(),
            user_id,
            badge_key: key,
            occurred_at: now,
        };
        self.publisher
            .publish(follow_up(cause, unlocked.to_envelope()?))
            .await
    }
}

#[async_trait]
impl EventHandler for BadgeUnlocker {
    async fn handle(&self, event: EventEnvelope) -> Result<(), DomainError> {
        let Some(key) = Self::earned_badge(&event)? else {
            return Ok(());
        };
        let user_id = event_user(&event)?;
        self.unlock(&event, user_id, key).await
    }

    fn name(&self) -> &'static str {
        "BadgeUnlocker"
    }
}
