//! Daily symptom log handlers.

mod get_daily_events;
mod log_daily_event;

pub use get_daily_events::{GetDailyEventsHandler, GetDailyEventsQuery, MAX_RANGE_DAYS};
pub use log_daily_event::{LogDailyEventCommand, LogDailyEventError, LogDailyEventHandler};
