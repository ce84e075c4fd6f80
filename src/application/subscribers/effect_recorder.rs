//! EffectRecorder - collects the events a client should act on.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value as JsonValue;
use std::sync::{Arc, Mutex, PoisonError};

use crate::domain::event_types::{BADGE_UNLOCKED, TOAST_SHOW};
use crate::domain::foundation::{DomainError, EventEnvelope};
use crate::ports::EventHandler;

/// A client-facing side effect of a request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Effect {
    #[serde(rename = "type")]
    pub effect_type: String,
    pub payload: JsonValue,
}

/// Records `toast.show` and `badge.unlocked` events in publish order.
#[derive(Clone, Default)]
pub struct EffectRecorder {
    effects: Arc<Mutex<Vec<Effect>>>,
}

impl EffectRecorder {
    pub const EVENT_TYPES: [&'static str; 2] = [TOAST_SHOW, BADGE_UNLOCKED];

    pub fn new() -> Self {
        Self::default()
    }

    /// Removes and returns everything recorded so far.
    pub fn take(&self) -> Vec<Effect> {
        std::mem::take(&mut *self.effects.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

#[async_trait]
impl EventHandler for EffectRecorder {
    async fn handle(&self, event: EventEnvelope) -> Result<(), DomainError> {
        self.effects
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Effect {
                effect_type: event.event_type,
                payload: event.payload,
            });
        Ok(())
    }

    fn name(&self) -> &'static str {
        "EffectRecorder"
    }
}
