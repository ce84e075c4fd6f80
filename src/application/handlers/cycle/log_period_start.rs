//! LogPeriodStartHandler - records the first day of a period.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::cycle::{Cycle, CycleAggregate, CycleLogged, FirstCycleLogged, PeriodStart};
use crate::domain::foundation::{CommandMetadata, DomainError, EventId};
use crate::ports::{Clock, CycleDataRepository, EventPublisher};

use super::super::publish::publish_after_commit;
use super::write::{apply_change, Change};

/// Command to log a period starting on `date`.
#[derive(Debug, Clone)]
pub struct LogPeriodStartCommand {
    pub date: NaiveDate,
}

/// What logging a period start did.
#[derive(Debug, Clone)]
pub enum LogPeriodStartOutcome {
    /// A new regular cycle was stored.
    Created {
        cycle: Cycle,
        first_cycle: bool,
        cycle_data: CycleAggregate,
    },
    /// A regular cycle already starts that day; nothing was written.
    AlreadyLogged {
        cycle: Cycle,
        cycle_data: CycleAggregate,
    },
}

impl LogPeriodStartOutcome {
    pub fn cycle(&self) -> &Cycle {
        match self {
            Self::Created { cycle, .. } | Self::AlreadyLogged { cycle, .. } => cycle,
        }
    }

    pub fn cycle_data(&self) -> &CycleAggregate {
        match self {
            Self::Created { cycle_data, .. } | Self::AlreadyLogged { cycle_data, .. } => cycle_data,
        }
    }

    pub fn is_created(&self) -> bool {
        matches!(self, Self::Created { .. })
    }
}

/// Error type for logging a period start.
#[derive(Debug, Clone, thiserror::Error)]
pub enum LogPeriodStartError {
    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Handler for logging period starts.
pub struct LogPeriodStartHandler {
    cycle_data: Arc<dyn CycleDataRepository>,
    publisher: Arc<dyn EventPublisher>,
    clock: Arc<dyn Clock>,
}

impl LogPeriodStartHandler {
    pub fn new(
        cycle_data: Arc<dyn CycleDataRepository>,
        publisher: Arc<dyn EventPublisher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            cycle_data,
            publisher,
            clock,
        }
    }

    pub async fn handle(
        &self,
        cmd: LogPeriodStartCommand,
        metadata: CommandMetadata,
    ) -> Result<LogPeriodStartOutcome, LogPeriodStartError> {
        let user_id = &metadata.user_id;

        let applied = apply_change::<_, LogPeriodStartError, _>(
            self.cycle_data.as_ref(),
            user_id,
            |aggregate| {
                Ok(match aggregate.start_period(cmd.date) {
                    created @ PeriodStart::Created { .. } => Change::Save(created),
                    existing @ PeriodStart::AlreadyLogged { .. } => Change::Keep(existing),
                })
            },
        )
        .await?;

        let cycle_data = applied.aggregate;
        let (cycle, first_cycle) = match applied.value {
            PeriodStart::AlreadyLogged { cycle } => {
                tracing::debug!(user_id = %user_id, date = %cmd.date, "period start already logged");
                return Ok(LogPeriodStartOutcome::AlreadyLogged { cycle, cycle_data });
            }
            PeriodStart::Created { cycle, first_cycle } => (cycle, first_cycle),
        };

        tracing::info!(
            user_id = %user_id,
            cycle_id = %cycle.id(),
            date = %cmd.date,
            cycle_count = cycle_data.cycles().len(),
            "period start logged"
        );

        let now = self.clock.now();
        let logged = CycleLogged {
            event_id: EventId::new(),
            user_id: user_id.clone(),
            cycle_id: cycle.id(),
            date: cmd.date,
            cycle_count: cycle_data.cycles().len(),
            occurred_at: now,
        };
        publish_after_commit(self.publisher.as_ref(), &logged, &metadata).await;

        if first_cycle {
            let first = FirstCycleLogged {
                event_id: EventId::new(),
                user_id: user_id.clone(),
                occurred_at: now,
            };
            publish_after_commit(self.publisher.as_ref(), &first, &metadata).await;
        }

        Ok(LogPeriodStartOutcome::Created {
            cycle,
            first_cycle,
            cycle_data,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::events::SessionEventBus;
    use crate::adapters::memory::InMemoryCycleDataRepository;
    use crate::adapters::SystemClock;
    use crate::domain::foundation::{ErrorCode, UserId};
    use async_trait::async_trait;

    fn day(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    struct Fixture {
        repo: InMemoryCycleDataRepository,
        bus: SessionEventBus,
        handler: LogPeriodStartHandler,
    }

    fn fixture() -> Fixture {
        let repo = InMemoryCycleDataRepository::new();
        let bus = SessionEventBus::new();
        let handler = LogPeriodStartHandler::new(
            Arc::new(repo.clone()),
            Arc::new(bus.clone()),
            Arc::new(SystemClock),
        );
        Fixture { repo, bus, handler }
    }

    async fn log(f: &Fixture, date: NaiveDate) -> LogPeriodStartOutcome {
        f.handler
            .handle(LogPeriodStartCommand { date }, CommandMetadata::test_fixture())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn first_log_creates_cycle_and_publishes_both_events() {
        let f = fixture();

        let outcome = log(&f, day(1, 1)).await;

        match &outcome {
            LogPeriodStartOutcome::Created { first_cycle, .. } => assert!(*first_cycle),
            other => panic!("expected Created, got {:?}", other),
        }
        let types: Vec<_> = f
            .bus
            .published_events()
            .into_iter()
            .map(|e| e.event_type)
            .collect();
        assert_eq!(types, vec!["cycle.logged", "cycle.first_logged"]);

        let logged = &f.bus.events_of_type("cycle.logged")[0];
        assert_eq!(logged.payload["date"], "2024-01-01");
        assert_eq!(logged.payload["cycleCount"], 1);
        assert_eq!(logged.metadata.correlation_id.as_deref(), Some("test-correlation-id"));
    }

    #[tokio::test]
    async fn same_day_is_idempotent() {
        let f = fixture();
        log(&f, day(1, 1)).await;

        let outcome = log(&f, day(1, 1)).await;

        assert!(!outcome.is_created());
        assert_eq!(outcome.cycle_data().cycles().len(), 1);
        assert_eq!(f.bus.events_of_type("cycle.logged").len(), 1);

        let stored = f
            .repo
            .load(&UserId::new("test-user-123").unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.version(), 1);
    }

    #[tokio::test]
    async fn second_cycle_updates_average_and_skips_first_cycle_event() {
        let f = fixture();
        log(&f, day(1, 1)).await;

        let outcome = log(&f, day(1, 31)).await;

        match &outcome {
            LogPeriodStartOutcome::Created { first_cycle, cycle_data, .. } => {
                assert!(!*first_cycle);
                assert_eq!(cycle_data.avg_cycle_length(), 30);
            }
            other => panic!("expected Created, got {:?}", other),
        }
        assert_eq!(f.bus.events_of_type("cycle.first_logged").len(), 1);
        assert_eq!(f.bus.events_of_type("cycle.logged")[1].payload["cycleCount"], 2);
    }

    #[tokio::test]
    async fn out_of_order_logs_are_sorted() {
        let f = fixture();
        log(&f, day(3, 1)).await;

        let outcome = log(&f, day(1, 31)).await;

        let starts: Vec<_> = outcome
            .cycle_data()
            .cycles()
            .iter()
            .map(|c| c.start_date())
            .collect();
        assert_eq!(starts, vec![day(1, 31), day(3, 1)]);
    }

    struct BrokenRepository;

    #[async_trait]
    impl CycleDataRepository for BrokenRepository {
        async fn load(&self, _: &UserId) -> Result<Option<CycleAggregate>, DomainError> {
            Err(DomainError::database("connection refused"))
        }
        async fn save(&self, _: &UserId, _: &CycleAggregate) -> Result<u64, DomainError> {
            Err(DomainError::database("connection refused"))
        }
        async fn list_user_ids(&self) -> Result<Vec<UserId>, DomainError> {
            Ok(Vec::new())
        }
        async fn delete(&self, _: &UserId) -> Result<(), DomainError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn store_failure_publishes_nothing() {
        let bus = SessionEventBus::new();
        let handler = LogPeriodStartHandler::new(
            Arc::new(BrokenRepository),
            Arc::new(bus.clone()),
            Arc::new(SystemClock),
        );

        let err = handler
            .handle(LogPeriodStartCommand { date: day(1, 1) }, CommandMetadata::test_fixture())
            .await
            .unwrap_err();

        let LogPeriodStartError::Domain(err) = err;
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert!(bus.published_events().is_empty());
    }
}
