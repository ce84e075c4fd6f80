//! Daily log events.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::event_types::DAILY_EVENT_LOGGED;
use crate::domain::foundation::{domain_event, serde_date, EventId, Timestamp, UserId};

use super::SymptomTag;

/// A day's flags were merged.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyEventLogged {
    pub event_id: EventId,
    pub user_id: UserId,
    #[serde(with = "serde_date")]
    pub date: NaiveDate,
    /// Flags on the day after the merge.
    pub flags: Vec<SymptomTag>,
    pub occurred_at: Timestamp,
}

domain_event!(DailyEventLogged, DAILY_EVENT_LOGGED, "DailyEvent");
