//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, errors and the event envelope
//! that form the vocabulary of the cycle tracker.

mod calendar;
mod command;
mod errors;
mod events;
mod ids;
mod timestamp;

pub use calendar::{
    days_between, parse_calendar_date, serde_date, serde_date_opt, MAX_CALENDAR_YEAR,
    MIN_CALENDAR_YEAR,
};
pub use command::CommandMetadata;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use events::{
    domain_event, DomainEvent, EventEnvelope, EventId, EventMetadata, SerializableDomainEvent,
};
pub use ids::{CycleId, NotificationId, UserId};
pub use timestamp::Timestamp;
