//! SetCycleTypeHandler - reclassifies a cycle as regular or irregular.
//!
//! Irregular cycles stay on record but are left out of averages and
//! prediction.

use std::sync::Arc;

use crate::domain::cycle::{Cycle, CycleAggregate, CycleType};
use crate::domain::foundation::{CommandMetadata, CycleId, DomainError};
use crate::ports::CycleDataRepository;

use super::write::{apply_change, Change};

#[derive(Debug, Clone)]
pub struct SetCycleTypeCommand {
    pub cycle_id: CycleId,
    pub cycle_type: CycleType,
}

#[derive(Debug, Clone)]
pub struct SetCycleTypeResult {
    pub cycle: Cycle,
    pub cycle_data: CycleAggregate,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum SetCycleTypeError {
    #[error("Cycle not found: {0}")]
    CycleNotFound(CycleId),
    #[error(transparent)]
    Domain(#[from] DomainError),
}

pub struct SetCycleTypeHandler {
    cycle_data: Arc<dyn CycleDataRepository>,
}

impl SetCycleTypeHandler {
    pub fn new(cycle_data: Arc<dyn CycleDataRepository>) -> Self {
        Self { cycle_data }
    }

    pub async fn handle(
        &self,
        cmd: SetCycleTypeCommand,
        metadata: CommandMetadata,
    ) -> Result<SetCycleTypeResult, SetCycleTypeError> {
        let applied = apply_change::<_, SetCycleTypeError, _>(
            self.cycle_data.as_ref(),
            &metadata.user_id,
            |aggregate| {
                match aggregate
                    .set_cycle_type(cmd.cycle_id, cmd.cycle_type)
                    .map_err(DomainError::from)?
                {
                    Some(cycle) => Ok(Change::Save(cycle)),
                    None => Err(SetCycleTypeError::CycleNotFound(cmd.cycle_id)),
                }
            },
        )
        .await?;

        tracing::info!(
            user_id = %metadata.user_id,
            cycle_id = %cmd.cycle_id,
            cycle_type = %cmd.cycle_type,
            "cycle type changed"
        );

        Ok(SetCycleTypeResult {
            cycle: applied.value,
            cycle_data: applied.aggregate,
        })
    }
}
