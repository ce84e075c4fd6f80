//! GetCycleOverviewHandler - read-only view of cycles, averages and the
//! upcoming phases.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::cycle::{Cycle, PhasePrediction};
use crate::domain::foundation::{DomainError, UserId};
use crate::ports::{Clock, CycleDataRepository};

#[derive(Debug, Clone)]
pub struct GetCycleOverviewQuery {
    pub user_id: UserId,
}

#[derive(Debug, Clone)]
pub struct CycleOverview {
    pub cycles: Vec<Cycle>,
    pub avg_cycle_length: u32,
    pub avg_period_length: u32,
    pub prediction: Option<PhasePrediction>,
    pub today: NaiveDate,
    /// Days since the predicted start; negative while it is still ahead.
    pub days_overdue: Option<i64>,
    pub in_fertile_window: bool,
}

pub struct GetCycleOverviewHandler {
    cycle_data: Arc<dyn CycleDataRepository>,
    clock: Arc<dyn Clock>,
}

impl GetCycleOverviewHandler {
    pub fn new(cycle_data: Arc<dyn CycleDataRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { cycle_data, clock }
    }

    pub async fn handle(&self, query: GetCycleOverviewQuery) -> Result<CycleOverview, DomainError> {
        let aggregate = self
            .cycle_data
            .load(&query.user_id)
            .await?
            .unwrap_or_default();
        let today = self.clock.today();
        let prediction = aggregate.prediction();

        Ok(CycleOverview {
            cycles: aggregate.cycles().to_vec(),
            avg_cycle_length: aggregate.avg_cycle_length(),
            avg_period_length: aggregate.avg_period_length(),
            days_overdue: prediction.as_ref().map(|p| p.days_overdue(today)),
            in_fertile_window: prediction
                .as_ref()
                .is_some_and(|p| p.in_fertile_window(today)),
            prediction,
            today,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryCycleDataRepository;
    use crate::adapters::FixedClock;
    use crate::domain::cycle::CycleAggregate;
    use crate::domain::foundation::Timestamp;

    fn day(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    fn user() -> UserId {
        UserId::new("user-1").unwrap()
    }

    #[tokio::test]
    async fn missing_user_gets_defaults() {
        let handler = GetCycleOverviewHandler::new(
            Arc::new(InMemoryCycleDataRepository::new()),
            Arc::new(FixedClock::new(Timestamp::start_of_day(day(1, 1)))),
        );

        let overview = handler
            .handle(GetCycleOverviewQuery { user_id: user() })
            .await
            .unwrap();

        assert!(overview.cycles.is_empty());
        assert_eq!(overview.avg_cycle_length, 28);
        assert_eq!(overview.avg_period_length, 5);
        assert!(overview.prediction.is_none());
        assert!(!overview.in_fertile_window);
    }

    #[tokio::test]
    async fn prediction_uses_latest_regular_cycle() {
        let repo = InMemoryCycleDataRepository::new();
        let mut aggregate = CycleAggregate::empty();
        aggregate.start_period(day(1, 1));
        repo.save(&user(), &aggregate).await.unwrap();
        let handler = GetCycleOverviewHandler::new(
            Arc::new(repo),
            Arc::new(FixedClock::new(Timestamp::start_of_day(day(1, 13)))),
        );

        let overview = handler
            .handle(GetCycleOverviewQuery { user_id: user() })
            .await
            .unwrap();

        let prediction = overview.prediction.unwrap();
        assert_eq!(prediction.next_period_start, day(1, 29));
        assert_eq!(prediction.ovulation_date, day(1, 15));
        assert_eq!(overview.days_overdue, Some(-16));
        assert!(overview.in_fertile_window);
    }
}
