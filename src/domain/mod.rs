//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors, events)
//! - `event_types` - Routing keys for the session event bus
//! - `cycle` - Cycle aggregate, average recalculation and phase prediction
//! - `daily_log` - Per-day symptom flags
//! - `notification` - Inbox notifications and late-notice markers
//! - `gamification` - Badge catalog
//! - `engagement` - Toasts and client-reported engagement signals

pub mod cycle;
pub mod daily_log;
pub mod engagement;
pub mod event_types;
pub mod foundation;
pub mod gamification;
pub mod notification;
