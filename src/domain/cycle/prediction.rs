//! Phase prediction from the latest regular cycle.

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::domain::foundation::{days_between, serde_date};

use super::Cycle;

/// Ovulation precedes the next period by a fixed luteal phase.
pub const LUTEAL_PHASE_DAYS: i64 = 14;

/// Fertile window: four days before ovulation through the day after.
pub const FERTILE_DAYS_BEFORE_OVULATION: i64 = 4;
pub const FERTILE_DAYS_AFTER_OVULATION: i64 = 1;

/// Predicted dates for the upcoming cycle.
///
/// Values are raw; a prediction may lie in the past when the user has not
/// logged a new period yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhasePrediction {
    #[serde(with = "serde_date")]
    pub next_period_start: NaiveDate,
    #[serde(with = "serde_date")]
    pub ovulation_date: NaiveDate,
    #[serde(with = "serde_date")]
    pub fertile_start: NaiveDate,
    #[serde(with = "serde_date")]
    pub fertile_end: NaiveDate,
}

impl PhasePrediction {
    /// Days `today` is past the predicted period start (negative if not yet due).
    pub fn days_overdue(&self, today: NaiveDate) -> i64 {
        days_between(self.next_period_start, today)
    }

    /// Whether `today` is at least `grace_days` past the predicted start.
    pub fn is_late(&self, today: NaiveDate, grace_days: u32) -> bool {
        self.days_overdue(today) >= i64::from(grace_days)
    }

    pub fn in_fertile_window(&self, day: NaiveDate) -> bool {
        day >= self.fertile_start && day <= self.fertile_end
    }
}

/// Predicts the next cycle from the most recent regular cycle.
///
/// Returns `None` when the user has no regular cycle, or when a predicted
/// day would fall outside the representable calendar.
pub fn predict_phases(
    last_regular_cycle: Option<&Cycle>,
    avg_cycle_length: u32,
) -> Option<PhasePrediction> {
    let cycle = last_regular_cycle?;
    let next_period_start = cycle
        .start_date()
        .checked_add_signed(Duration::days(i64::from(avg_cycle_length)))?;
    let ovulation_date = next_period_start.checked_sub_signed(Duration::days(LUTEAL_PHASE_DAYS))?;

    Some(PhasePrediction {
        next_period_start,
        ovulation_date,
        fertile_start: ovulation_date
            .checked_sub_signed(Duration::days(FERTILE_DAYS_BEFORE_OVULATION))?,
        fertile_end: ovulation_date
            .checked_add_signed(Duration::days(FERTILE_DAYS_AFTER_OVULATION))?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn no_cycle_means_no_prediction() {
        assert!(predict_phases(None, 28).is_none());
    }

    #[test]
    fn predicts_standard_28_day_cycle() {
        let cycle = Cycle::start(date(2024, 1, 1));
        let p = predict_phases(Some(&cycle), 28).unwrap();

        assert_eq!(p.next_period_start, date(2024, 1, 29));
        assert_eq!(p.ovulation_date, date(2024, 1, 15));
        assert_eq!(p.fertile_start, date(2024, 1, 11));
        assert_eq!(p.fertile_end, date(2024, 1, 16));
    }

    #[test]
    fn crosses_month_and_leap_day() {
        let cycle = Cycle::start(date(2024, 2, 10));
        let p = predict_phases(Some(&cycle), 30).unwrap();

        assert_eq!(p.next_period_start, date(2024, 3, 11));
        assert_eq!(p.ovulation_date, date(2024, 2, 26));
    }

    #[test]
    fn lateness_uses_grace_days() {
        let cycle = Cycle::start(date(2024, 1, 1));
        let p = predict_phases(Some(&cycle), 28).unwrap();

        assert_eq!(p.days_overdue(date(2024, 1, 29)), 0);
        assert!(!p.is_late(date(2024, 1, 31), 3));
        assert!(p.is_late(date(2024, 2, 1), 3));
        assert!(p.is_late(date(2024, 1, 29), 0));
    }

    #[test]
    fn fertile_window_is_inclusive() {
        let cycle = Cycle::start(date(2024, 1, 1));
        let p = predict_phases(Some(&cycle), 28).unwrap();

        assert!(p.in_fertile_window(date(2024, 1, 11)));
        assert!(p.in_fertile_window(date(2024, 1, 16)));
        assert!(!p.in_fertile_window(date(2024, 1, 17)));
    }

    #[test]
    fn unrepresentable_dates_give_no_prediction() {
        let cycle = Cycle::start(NaiveDate::MAX);
        assert!(predict_phases(Some(&cycle), 28).is_none());

        let near_end = NaiveDate::MAX - Duration::days(10);
        assert!(predict_phases(Some(&Cycle::start(near_end)), 28).is_none());
    }

    #[test]
    fn serializes_as_calendar_days() {
        let cycle = Cycle::start(date(2024, 1, 1));
        let json = serde_json::to_value(predict_phases(Some(&cycle), 28).unwrap()).unwrap();
        assert_eq!(json["nextPeriodStart"], "2024-01-29");
        assert_eq!(json["fertileEnd"], "2024-01-16");
    }
}
