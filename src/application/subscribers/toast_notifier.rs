//! ToastNotifier - asks the client to show toasts for cycle and badge events.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;
use std::sync::Arc;

use crate::domain::engagement::{ToastShow, ToastVariant};
use crate::domain::event_types::{BADGE_UNLOCKED, CYCLE_LOGGED};
use crate::domain::foundation::{serde_date, DomainError, EventEnvelope, SerializableDomainEvent};
use crate::domain::gamification::BadgeKey;
use crate::ports::{EventHandler, EventPublisher, LocaleStrings, Message};

use super::{event_user, follow_up};

const BADGE_TOAST_MS: u32 = 5000;
const CYCLE_TOAST_MS: u32 = 3000;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UnlockedBadge {
    badge_key: BadgeKey,
}

#[derive(Deserialize)]
struct LoggedDate {
    #[serde(with = "serde_date")]
    date: NaiveDate,
}

pub struct ToastNotifier {
    publisher: Arc<dyn EventPublisher>,
    strings: Arc<dyn LocaleStrings>,
}

impl ToastNotifier {
    pub const EVENT_TYPES: [&'static str; 2] = [BADGE_UNLOCKED, CYCLE_LOGGED];

    pub fn new(publisher: Arc<dyn EventPublisher>, strings: Arc<dyn LocaleStrings>) -> Self {
        Self { publisher, strings }
    }

    fn toast_for(&self, event: &EventEnvelope) -> Result<Option<ToastShow>, DomainError> {
        let user_id = event_user(event)?;
        let toast = match event.event_type.as_str() {
            BADGE_UNLOCKED => {
                let unlocked: UnlockedBadge = event.payload_as()?;
                ToastShow::new(user_id, self.strings.render(Message::BadgeUnlockedTitle))
                    .with_description(self.strings.render(Message::BadgeName(unlocked.badge_key)))
                    .with_variant(ToastVariant::Success)
                    .with_duration(BADGE_TOAST_MS)
            }
            CYCLE_LOGGED => {
                let logged: LoggedDate = event.payload_as()?;
                ToastShow::new(user_id, self.strings.render(Message::CycleLoggedTitle))
                    .with_description(
                        self.strings
                            .render(Message::CycleLoggedDescription { date: logged.date }),
                    )
                    .with_duration(CYCLE_TOAST_MS)
            }
            _ => return Ok(None),
        };
        Ok(Some(toast))
    }
}

#[async_trait]
impl EventHandler for ToastNotifier {
    async fn handle(&self, event: EventEnvelope) -> Result<(), DomainError> {
        let Some(toast) = self.toast_for(&event)? else {
            return Ok(());
        };
        self.publisher
            .publish(follow_up(&event, toast.to_envelope()?))
            .await
    }

    fn name(&self) -> &'static str {
        "ToastNotifier"
    }
}
