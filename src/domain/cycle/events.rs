//! Cycle domain events.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::event_types::{CYCLE_LOGGED, FIRST_CYCLE_LOGGED, PERIOD_END_UPDATED};
use crate::domain::foundation::{
    domain_event, serde_date, serde_date_opt, CycleId, EventId, Timestamp, UserId,
};

/// A new period start was recorded.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CycleLogged {
    pub event_id: EventId,
    pub user_id: UserId,
    pub cycle_id: CycleId,
    #[serde(with = "serde_date")]
    pub date: NaiveDate,
    /// Number of cycles on record after this one was added.
    pub cycle_count: usize,
    pub occurred_at: Timestamp,
}

domain_event!(CycleLogged, CYCLE_LOGGED, "CycleData");

/// The user's very first cycle was recorded.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FirstCycleLogged {
    pub event_id: EventId,
    pub user_id: UserId,
    pub occurred_at: Timestamp,
}

domain_event!(FirstCycleLogged, FIRST_CYCLE_LOGGED, "CycleData");

/// A period end was set or cleared.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodEndUpdated {
    pub event_id: EventId,
    pub user_id: UserId,
    pub cycle_id: CycleId,
    #[serde(with = "serde_date_opt")]
    pub end_date: Option<NaiveDate>,
    pub occurred_at: Timestamp,
}

domain_event!(PeriodEndUpdated, PERIOD_END_UPDATED, "CycleData");
