//! HTTP DTOs for cycle endpoints.

use serde::{Deserialize, Serialize};

use crate::application::handlers::CycleOverview;
use crate::application::Effect;
use crate::domain::cycle::{Cycle, CycleAggregate, CycleType, PhasePrediction};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request to log a period start. `date` is `YYYY-MM-DD` or RFC 3339.
#[derive(Debug, Clone, Deserialize)]
pub struct LogPeriodStartRequest {
    pub date: String,
}

/// Request to set (or clear, with `null`) a period end.
#[derive(Debug, Clone, Deserialize)]
pub struct SetPeriodEndRequest {
    #[serde(default)]
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SetCycleTypeRequest {
    #[serde(rename = "type")]
    pub cycle_type: CycleType,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
pub struct CycleResponse {
    pub id: String,
    pub start_date: String,
    pub end_date: Option<String>,
    #[serde(rename = "type")]
    pub cycle_type: CycleType,
}

impl From<&Cycle> for CycleResponse {
    fn from(cycle: &Cycle) -> Self {
        Self {
            id: cycle.id().to_string(),
            start_date: iso(cycle.start_date()),
            end_date: cycle.end_date().map(iso),
            cycle_type: cycle.cycle_type(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PredictionResponse {
    pub next_period_start: String,
    pub ovulation_date: String,
    pub fertile_start: String,
    pub fertile_end: String,
}

impl From<&PhasePrediction> for PredictionResponse {
    fn from(p: &PhasePrediction) -> Self {
        Self {
            next_period_start: iso(p.next_period_start),
            ovulation_date: iso(p.ovulation_date),
            fertile_start: iso(p.fertile_start),
            fertile_end: iso(p.fertile_end),
        }
    }
}

/// Response for `GET /api/cycles`.
#[derive(Debug, Clone, Serialize)]
pub struct CycleOverviewResponse {
    pub cycles: Vec<CycleResponse>,
    pub avg_cycle_length: u32,
    pub avg_period_length: u32,
    pub prediction: Option<PredictionResponse>,
    pub today: String,
    pub days_overdue: Option<i64>,
    pub in_fertile_window: bool,
}

impl From<CycleOverview> for CycleOverviewResponse {
    fn from(overview: CycleOverview) -> Self {
        Self {
            cycles: overview.cycles.iter().map(CycleResponse::from).collect(),
            avg_cycle_length: overview.avg_cycle_length,
            avg_period_length: overview.avg_period_length,
            prediction: overview.prediction.as_ref().map(PredictionResponse::from),
            today: iso(overview.today),
            days_overdue: overview.days_overdue,
            in_fertile_window: overview.in_fertile_window,
        }
    }
}

/// Response for cycle mutations.
#[derive(Debug, Clone, Serialize)]
pub struct CycleCommandResponse {
    /// `created`, `already_logged` or `updated`.
    pub status: &'static str,
    pub cycle: CycleResponse,
    pub avg_cycle_length: u32,
    pub avg_period_length: u32,
    pub effects: Vec<Effect>,
}

impl CycleCommandResponse {
    pub fn new(
        status: &'static str,
        cycle: &Cycle,
        cycle_data: &CycleAggregate,
        effects: Vec<Effect>,
    ) -> Self {
        Self {
            status,
            cycle: CycleResponse::from(cycle),
            avg_cycle_length: cycle_data.avg_cycle_length(),
            avg_period_length: cycle_data.avg_period_length(),
            effects,
        }
    }
}

fn iso(date: chrono::NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
