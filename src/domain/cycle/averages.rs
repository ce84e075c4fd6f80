//! Rolling averages for cycle length and period length.
//!
//! Cycle length is the gap between consecutive regular period starts. Gaps
//! outside 21..=45 days usually mean two logs of one period or a missed log,
//! so they never enter the average. Only the six most recent accepted samples
//! count. When there is nothing to sample the previous average is kept.

use std::ops::RangeInclusive;

use super::Cycle;

pub const DEFAULT_CYCLE_LENGTH: u32 = 28;
pub const DEFAULT_PERIOD_LENGTH: u32 = 5;

/// Accepted cycle-length samples, in days.
pub const CYCLE_GAP_DAYS: RangeInclusive<i64> = 21..=45;

/// Accepted period-length samples, in days (the open interval 0..15).
pub const PERIOD_LENGTH_DAYS: RangeInclusive<i64> = 1..=14;

/// Number of most recent samples each average is computed over.
pub const ROLLING_WINDOW: usize = 6;

/// The two derived averages stored on a user's cycle data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Averages {
    pub cycle_length: u32,
    pub period_length: u32,
}

impl Default for Averages {
    fn default() -> Self {
        Self {
            cycle_length: DEFAULT_CYCLE_LENGTH,
            period_length: DEFAULT_PERIOD_LENGTH,
        }
    }
}

/// Recomputes both averages from the full cycle list.
///
/// Irregular cycles are ignored. Input order does not matter.
pub fn recalc_averages(cycles: &[Cycle], previous: Averages) -> Averages {
    let mut regular: Vec<&Cycle> = cycles.iter().filter(|c| c.is_regular()).collect();
    regular.sort_by_key(|c| c.start_date());

    let gaps: Vec<i64> = regular
        .windows(2)
        .map(|pair| (pair[1].start_date() - pair[0].start_date()).num_days())
        .filter(|gap| CYCLE_GAP_DAYS.contains(gap))
        .collect();

    let periods: Vec<i64> = regular
        .iter()
        .filter_map(|c| c.period_length())
        .filter(|len| PERIOD_LENGTH_DAYS.contains(len))
        .collect();

    Averages {
        cycle_length: rolling_mean(&gaps).unwrap_or(previous.cycle_length),
        period_length: rolling_mean(&periods).unwrap_or(previous.period_length),
    }
}

/// Round-half-up mean of the last `ROLLING_WINDOW` samples.
fn rolling_mean(samples: &[i64]) -> Option<u32> {
    let window = &samples[samples.len().saturating_sub(ROLLING_WINDOW)..];
    if window.is_empty() {
        return None;
    }
    let n = window.len() as i64;
    let sum: i64 = window.iter().sum();
    // Samples are positive, so integer (2s + n) / 2n is floor(s/n + 0.5).
    u32::try_from((2 * sum + n) / (2 * n)).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cycle::CycleType;
    use crate::domain::foundation::CycleId;
    use chrono::{Duration, NaiveDate};
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn regular(start: NaiveDate) -> Cycle {
        Cycle::start(start)
    }

    fn closed(start: NaiveDate, days: i64) -> Cycle {
        Cycle::reconstitute(
            CycleId::new(),
            start,
            Some(start + Duration::days(days - 1)),
            CycleType::Regular,
        )
        .unwrap()
    }

    fn irregular(start: NaiveDate) -> Cycle {
        Cycle::reconstitute(CycleId::new(), start, None, CycleType::Irregular).unwrap()
    }

    /// Regular cycles whose consecutive gaps are exactly `gaps`.
    fn cycles_with_gaps(first: NaiveDate, gaps: &[i64]) -> Vec<Cycle> {
        let mut start = first;
        let mut cycles = vec![regular(start)];
        for gap in gaps {
            start += Duration::days(*gap);
            cycles.push(regular(start));
        }
        cycles
    }

    #[test]
    fn empty_list_keeps_defaults() {
        assert_eq!(recalc_averages(&[], Averages::default()), Averages::default());
    }

    #[test]
    fn single_cycle_keeps_previous_cycle_length() {
        let previous = Averages {
            cycle_length: 31,
            period_length: 6,
        };
        let result = recalc_averages(&[regular(date(2024, 1, 1))], previous);
        assert_eq!(result.cycle_length, 31);
        assert_eq!(result.period_length, 6);
    }

    #[test]
    fn out_of_range_gap_is_excluded() {
        let cycles = vec![
            regular(date(2024, 1, 1)),
            regular(date(2024, 1, 5)),
            regular(date(2024, 2, 2)),
        ];
        let result = recalc_averages(&cycles, Averages::default());
        assert_eq!(result.cycle_length, 28);
    }

    #[test]
    fn only_out_of_range_gaps_keep_previous() {
        let cycles = cycles_with_gaps(date(2024, 1, 1), &[10, 60]);
        let previous = Averages {
            cycle_length: 33,
            period_length: 5,
        };
        assert_eq!(recalc_averages(&cycles, previous).cycle_length, 33);
    }

    #[test]
    fn gap_bounds_are_inclusive() {
        let cycles = cycles_with_gaps(date(2024, 1, 1), &[21, 45]);
        assert_eq!(recalc_averages(&cycles, Averages::default()).cycle_length, 33);

        let cycles = cycles_with_gaps(date(2024, 1, 1), &[20, 46]);
        assert_eq!(recalc_averages(&cycles, Averages::default()).cycle_length, 28);
    }

    #[test]
    fn rolling_window_drops_older_samples() {
        // Two old 40-day gaps fall out of the window behind six 30-day gaps.
        let cycles = cycles_with_gaps(date(2023, 1, 1), &[40, 40, 30, 30, 30, 30, 30, 30]);
        assert_eq!(recalc_averages(&cycles, Averages::default()).cycle_length, 30);
    }

    #[test]
    fn excluded_gap_does_not_consume_window_slot() {
        let mut gaps = vec![30; 8];
        gaps.push(20);
        let cycles = cycles_with_gaps(date(2023, 1, 1), &gaps);
        assert_eq!(recalc_averages(&cycles, Averages::default()).cycle_length, 30);
    }

    #[test]
    fn window_holds_last_six_accepted_samples() {
        // Samples: 30 x8, 20 (rejected), 40. Window = 30 x5 + 40 = 190 / 6.
        let mut gaps = vec![30; 8];
        gaps.extend([20, 40]);
        let cycles = cycles_with_gaps(date(2023, 1, 1), &gaps);
        assert_eq!(recalc_averages(&cycles, Averages::default()).cycle_length, 32);
    }

    #[test]
    fn mean_rounds_half_up() {
        // 28 and 29 average to 28.5.
        let cycles = cycles_with_gaps(date(2024, 1, 1), &[28, 29]);
        assert_eq!(recalc_averages(&cycles, Averages::default()).cycle_length, 29);

        // 28, 28, 29 average to 28.33.
        let cycles = cycles_with_gaps(date(2024, 1, 1), &[28, 28, 29]);
        assert_eq!(recalc_averages(&cycles, Averages::default()).cycle_length, 28);
    }

    #[test]
    fn input_order_is_irrelevant() {
        let mut cycles = cycles_with_gaps(date(2024, 1, 1), &[27, 29, 31]);
        let sorted = recalc_averages(&cycles, Averages::default());
        cycles.reverse();
        assert_eq!(recalc_averages(&cycles, Averages::default()), sorted);
    }

    #[test]
    fn irregular_cycles_are_ignored() {
        let cycles = vec![
            regular(date(2024, 1, 1)),
            irregular(date(2024, 1, 15)),
            regular(date(2024, 1, 31)),
        ];
        assert_eq!(recalc_averages(&cycles, Averages::default()).cycle_length, 30);
    }

    #[test]
    fn period_length_uses_completed_periods() {
        let cycles = vec![
            closed(date(2024, 1, 1), 4),
            closed(date(2024, 1, 29), 6),
            regular(date(2024, 2, 26)),
        ];
        assert_eq!(recalc_averages(&cycles, Averages::default()).period_length, 5);
    }

    #[test]
    fn period_length_excludes_fifteen_days_or_more() {
        let previous = Averages {
            cycle_length: 28,
            period_length: 7,
        };
        let cycles = vec![closed(date(2024, 1, 1), 15)];
        assert_eq!(recalc_averages(&cycles, previous).period_length, 7);

        let cycles = vec![closed(date(2024, 1, 1), 14)];
        assert_eq!(recalc_averages(&cycles, previous).period_length, 14);
    }

    #[test]
    fn no_completed_periods_keep_previous_period_length() {
        let cycles = cycles_with_gaps(date(2024, 1, 1), &[28, 28]);
        assert_eq!(recalc_averages(&cycles, Averages::default()).period_length, 5);
    }

    proptest! {
        #[test]
        fn fewer_than_two_regular_cycles_never_change_cycle_length(
            previous in 15u32..60,
            offset in 0i64..2000,
            irregulars in 0usize..4,
        ) {
            let start = date(2020, 1, 1) + Duration::days(offset);
            let mut cycles = vec![regular(start)];
            for i in 0..irregulars {
                cycles.push(irregular(start + Duration::days(30 * (i as i64 + 1))));
            }
            let prev = Averages { cycle_length: previous, period_length: 5 };
            prop_assert_eq!(recalc_averages(&cycles, prev).cycle_length, previous);
        }

        #[test]
        fn cycle_average_stays_within_accepted_range(
            gaps in proptest::collection::vec(1i64..90, 1..20),
        ) {
            let cycles = cycles_with_gaps(date(2020, 1, 1), &gaps);
            let avg = recalc_averages(&cycles, Averages::default()).cycle_length as i64;
            let accepted = gaps.iter().any(|g| CYCLE_GAP_DAYS.contains(g));
            if accepted {
                prop_assert!(CYCLE_GAP_DAYS.contains(&avg));
            } else {
                prop_assert_eq!(avg, DEFAULT_CYCLE_LENGTH as i64);
            }
        }
    }
}
