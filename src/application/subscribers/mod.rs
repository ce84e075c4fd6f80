//! Standard session subscribers.
//!
//! Wired onto every session bus by `EventSession::open`:
//!
//! - `BadgeUnlocker` - unlocks badges and announces first unlocks
//! - `ToastNotifier` - turns cycle and badge events into toasts
//! - `EffectRecorder` - collects client-facing effects for the response

mod badge_unlocker;
mod effect_recorder;
mod toast_notifier;

pub use badge_unlocker::BadgeUnlocker;
pub use effect_recorder::{Effect, EffectRecorder};
pub use toast_notifier::ToastNotifier;

use crate::domain::foundation::{DomainError, EventEnvelope, UserId};

/// Carries the causing event's context onto a follow-up event.
pub(crate) fn follow_up(cause: &EventEnvelope, envelope: EventEnvelope) -> EventEnvelope {
    let mut envelope = envelope.with_causation_id(cause.event_id.to_string());
    if let Some(correlation_id) = &cause.metadata.correlation_id {
        envelope = envelope.with_correlation_id(correlation_id.clone());
    }
    if let Some(user_id) = &cause.metadata.user_id {
        envelope = envelope.with_user_id(user_id.clone());
    }
    envelope
}

/// The user an event belongs to. Every catalog event is keyed by user.
pub(crate) fn event_user(event: &EventEnvelope) -> Result<UserId, DomainError> {
    Ok(UserId::new(event.aggregate_id.clone())?)
}
