//! Daily log module - symptom flags recorded per calendar day.

mod daily_event;
mod events;

pub use daily_event::{DailyEvent, DailyEventPatch, SymptomTag};
pub use events::DailyEventLogged;
