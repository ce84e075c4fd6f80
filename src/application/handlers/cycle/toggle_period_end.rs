//! TogglePeriodEndHandler - sets or clears the last day of a period.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::cycle::{Cycle, CycleAggregate, PeriodEndUpdated};
use crate::domain::foundation::{CommandMetadata, CycleId, DomainError, EventId};
use crate::ports::{Clock, CycleDataRepository, EventPublisher};

use super::super::publish::publish_after_commit;
use super::write::{apply_change, Change};

/// Command to set (`Some`) or clear (`None`) a cycle's end date.
#[derive(Debug, Clone)]
pub struct TogglePeriodEndCommand {
    pub cycle_id: CycleId,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone)]
pub enum TogglePeriodEndOutcome {
    Updated {
        cycle: Cycle,
        cycle_data: CycleAggregate,
    },
    /// No cycle with that id; nothing was written.
    CycleNotFound,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum TogglePeriodEndError {
    #[error(transparent)]
    Domain(#[from] DomainError),
}

pub struct TogglePeriodEndHandler {
    cycle_data: Arc<dyn CycleDataRepository>,
    publisher: Arc<dyn EventPublisher>,
    clock: Arc<dyn Clock>,
}

impl TogglePeriodEndHandler {
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
        cmd: TogglePeriodEndCommand,
        metadata: CommandMetadata,
    ) -> Result<TogglePeriodEndOutcome, TogglePeriodEndError> {
        let user_id = &metadata.user_id;

        let applied = apply_change::<_, TogglePeriodEndError, _>(
            self.cycle_data.as_ref(),
            user_id,
            |aggregate| {
                let updated = aggregate
                    .set_period_end(cmd.cycle_id, cmd.end_date)
                    .map_err(DomainError::from)?;
                Ok(match updated {
                    Some(cycle) => Change::Save(Some(cycle)),
                    None => Change::Keep(None),
                })
            },
        )
        .await?;

        let Some(cycle) = applied.value else {
            tracing::debug!(user_id = %user_id, cycle_id = %cmd.cycle_id, "period end toggle for unknown cycle");
            return Ok(TogglePeriodEndOutcome::CycleNotFound);
        };

        tracing::info!(
            user_id = %user_id,
            cycle_id = %cycle.id(),
            end_date = ?cmd.end_date,
            "period end updated"
        );

        let event = PeriodEndUpdated {
            event_id: EventId::new(),
            user_id: user_id.clone(),
            cycle_id: cycle.id(),
            end_date: cmd.end_date,
            occurred_at: self.clock.now(),
        };
        publish_after_commit(self.publisher.as_ref(), &event, &metadata).await;

        Ok(TogglePeriodEndOutcome::Updated {
            cycle,
            cycle_data: applied.aggregate,
        })
    }
}
