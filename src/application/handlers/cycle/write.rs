//! Read-modify-write of the cycle aggregate with compare-and-swap retry.

use crate::domain::cycle::CycleAggregate;
use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::ports::CycleDataRepository;

/// Attempts per mutation before a version conflict is surfaced.
pub const MAX_WRITE_ATTEMPTS: u32 = 3;

/// What a mutation decided to do with the loaded aggregate.
pub(crate) enum Change<T> {
    /// Persist the mutated aggregate.
    Save(T),
    /// Nothing changed; skip the write.
    Keep(T),
}

/// Outcome of `apply_change`.
#[derive(Debug)]
pub(crate) struct Applied<T> {
    pub value: T,
    /// The aggregate as stored after the call.
    pub aggregate: CycleAggregate,
    pub saved: bool,
}

/// Loads the user's aggregate (empty if missing), applies `change` and saves.
///
/// On a version conflict the aggregate is re-read and `change` re-applied,
/// so `change` must be a pure function of the aggregate it is given.
pub(crate) async fn apply_change<T, E, F>(
    repository: &dyn CycleDataRepository,
    user_id: &UserId,
    mut change: F,
) -> Result<Applied<T>, E>
where
    F: FnMut(&mut CycleAggregate) -> Result<Change<T>, E>,
    E: From<DomainError>,
{
    let mut attempt = 0;
    loop {
        attempt += 1;
        let mut aggregate = repository.load(user_id).await?.unwrap_or_default();

        let value = match change(&mut aggregate)? {
            Change::Keep(value) => {
                return Ok(Applied {
                    value,
                    aggregate,
                    saved: false,
                })
            }
            Change::Save(value) => value,
        };

        match repository.save(user_id, &aggregate).await {
            Ok(version) => {
                return Ok(Applied {
                    value,
                    aggregate: aggregate.with_version(version),
                    saved: true,
                })
            }
            Err(err) if err.code == ErrorCode::VersionConflict && attempt < MAX_WRITE_ATTEMPTS => {
                tracing::debug!(user_id = %user_id, attempt, "cycle data write conflicted, retrying");
            }
            Err(err) => {
                if err.code == ErrorCode::VersionConflict {
                    tracing::warn!(user_id = %user_id, attempts = attempt, "cycle data write gave up after conflicts");
                }
                return Err(err.into());
            }
        }
    }
}
