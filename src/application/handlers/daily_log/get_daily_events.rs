//! GetDailyEventsHandler - lists daily records in a date range.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::daily_log::DailyEvent;
use crate::domain::foundation::{days_between, DomainError, UserId, ValidationError};
use crate::ports::DailyEventRepository;

/// Widest range a single query may cover.
pub const MAX_RANGE_DAYS: i64 = 366;

#[derive(Debug, Clone)]
pub struct GetDailyEventsQuery {
    pub user_id: UserId,
    pub from: NaiveDate,
    pub to: NaiveDate,
}

pub struct GetDailyEventsHandler {
    daily_events: Arc<dyn DailyEventRepository>,
}

impl GetDailyEventsHandler {
    pub fn new(daily_events: Arc<dyn DailyEventRepository>) -> Self {
        Self { daily_events }
    }

    pub async fn handle(&self, query: GetDailyEventsQuery) -> Result<Vec<DailyEvent>, DomainError> {
        let span = days_between(query.from, query.to);
        if span < 0 {
            return Err(ValidationError::invalid_format("to", "must not be before 'from'").into());
        }
        if span > MAX_RANGE_DAYS {
            return Err(ValidationError::out_of_range("to", 0, MAX_RANGE_DAYS, span).into());
        }

        self.daily_events
            .list_range(&query.user_id, query.from, query.to)
            .await
    }
}
