//! CycleAggregate - one user's cycle history plus derived averages.
//!
//! Every mutation re-sorts the cycle list and recomputes both averages over
//! the full set, so the averages are never stale relative to `cycles`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{CycleId, ValidationError};

use super::{
    predict_phases, recalc_averages, Averages, Cycle, CycleType, PhasePrediction,
    DEFAULT_CYCLE_LENGTH, DEFAULT_PERIOD_LENGTH,
};

/// Result of logging a period start on the aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeriodStart {
    /// A new regular cycle was inserted.
    Created { cycle: Cycle, first_cycle: bool },
    /// A regular cycle already starts on that day; nothing changed.
    AlreadyLogged { cycle: Cycle },
}

/// The per-user cycle document.
///
/// `version` increments on every successful write and backs the
/// compare-and-swap in the repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "CycleDataDocument")]
pub struct CycleAggregate {
    cycles: Vec<Cycle>,
    avg_cycle_length: u32,
    avg_period_length: u32,
    version: u64,
}

/// Stored shape, tolerant of missing fields and unsorted cycles.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CycleDataDocument {
    #[serde(default)]
    cycles: Vec<Cycle>,
    #[serde(default = "default_cycle_length")]
    avg_cycle_length: u32,
    #[serde(default = "default_period_length")]
    avg_period_length: u32,
    #[serde(default)]
    version: u64,
}

fn default_cycle_length() -> u32 {
    DEFAULT_CYCLE_LENGTH
}

fn default_period_length() -> u32 {
    DEFAULT_PERIOD_LENGTH
}

impl From<CycleDataDocument> for CycleAggregate {
    fn from(doc: CycleDataDocument) -> Self {
        let mut aggregate = Self {
            cycles: doc.cycles,
            avg_cycle_length: doc.avg_cycle_length,
            avg_period_length: doc.avg_period_length,
            version: doc.version,
        };
        aggregate.sort();
        aggregate
    }
}

impl Default for CycleAggregate {
    fn default() -> Self {
        Self::empty()
    }
}

impl CycleAggregate {
    /// A user with no history: no cycles, default averages.
    pub fn empty() -> Self {
        Self {
            cycles: Vec::new(),
            avg_cycle_length: DEFAULT_CYCLE_LENGTH,
            avg_period_length: DEFAULT_PERIOD_LENGTH,
            version: 0,
        }
    }

    /// Builds an aggregate from an arbitrary cycle list, deriving averages.
    pub fn from_cycles(cycles: Vec<Cycle>) -> Self {
        let mut aggregate = Self {
            cycles,
            ..Self::empty()
        };
        aggregate.recalculate();
        aggregate
    }

    /// Replaces the version with the one held by the store.
    pub fn with_version(mut self, version: u64) -> Self {
        self.version = version;
        self
    }

    // ───────────────────────────────────────────────────────────────
    // Accessors
    // ───────────────────────────────────────────────────────────────

    /// Cycles ordered by start date, oldest first.
    pub fn cycles(&self) -> &[Cycle] {
        &self.cycles
    }

    pub fn avg_cycle_length(&self) -> u32 {
        self.avg_cycle_length
    }

    pub fn avg_period_length(&self) -> u32 {
        self.avg_period_length
    }

    pub fn averages(&self) -> Averages {
        Averages {
            cycle_length: self.avg_cycle_length,
            period_length: self.avg_period_length,
        }
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn is_empty(&self) -> bool {
        self.cycles.is_empty()
    }

    pub fn find(&self, id: CycleId) -> Option<&Cycle> {
        self.cycles.iter().find(|c| c.id() == id)
    }

    pub fn regular_starting_on(&self, date: NaiveDate) -> Option<&Cycle> {
        self.cycles
            .iter()
            .find(|c| c.is_regular() && c.start_date() == date)
    }

    pub fn latest_regular_cycle(&self) -> Option<&Cycle> {
        self.cycles.iter().rev().find(|c| c.is_regular())
    }

    /// Upcoming phases derived from the latest regular cycle.
    pub fn prediction(&self) -> Option<PhasePrediction> {
        predict_phases(self.latest_regular_cycle(), self.avg_cycle_length)
    }

    // ───────────────────────────────────────────────────────────────
    // Mutations
    // ───────────────────────────────────────────────────────────────

    /// Logs a period starting on `date`.
    ///
    /// Idempotent per calendar day: a second log for a day that already has a
    /// regular cycle changes nothing.
    pub fn start_period(&mut self, date: NaiveDate) -> PeriodStart {
        if let Some(existing) = self.regular_starting_on(date) {
            return PeriodStart::AlreadyLogged {
                cycle: existing.clone(),
            };
        }

        let first_cycle = self.cycles.is_empty();
        let cycle = Cycle::start(date);
        self.cycles.push(cycle.clone());
        self.recalculate();

        PeriodStart::Created { cycle, first_cycle }
    }

    /// Sets or clears the end day of a cycle.
    ///
    /// Returns `Ok(None)` when no cycle has that id.
    pub fn set_period_end(
        &mut self,
        id: CycleId,
        end_date: Option<NaiveDate>,
    ) -> Result<Option<Cycle>, ValidationError> {
        let Some(cycle) = self.cycles.iter_mut().find(|c| c.id() == id) else {
            return Ok(None);
        };
        cycle.set_end_date(end_date)?;
        let updated = cycle.clone();
        self.recalculate();
        Ok(Some(updated))
    }

    /// Reclassifies a cycle as regular or irregular.
    ///
    /// Returns `Ok(None)` when no cycle has that id. Making a cycle regular
    /// is rejected if another regular cycle already starts that day.
    pub fn set_cycle_type(
        &mut self,
        id: CycleId,
        cycle_type: CycleType,
    ) -> Result<Option<Cycle>, ValidationError> {
        let Some(target) = self.find(id).cloned() else {
            return Ok(None);
        };
        if cycle_type == CycleType::Regular && !target.is_regular() {
            if let Some(clash) = self.regular_starting_on(target.start_date()) {
                return Err(ValidationError::invalid_format(
                    "type",
                    format!(
                        "cycle {} already starts on {}",
                        clash.id(),
                        target.start_date()
                    ),
                ));
            }
        }

        let mut updated = target;
        if let Some(cycle) = self.cycles.iter_mut().find(|c| c.id() == id) {
            cycle.set_cycle_type(cycle_type);
            updated = cycle.clone();
        }
        self.recalculate();
        Ok(Some(updated))
    }

    fn sort(&mut self) {
        self.cycles.sort_by_key(|c| c.start_date());
    }

    fn recalculate(&mut self) {
        self.sort();
        let averages = recalc_averages(&self.cycles, self.averages());
        self.avg_cycle_length = averages.cycle_length;
        self.avg_period_length = averages.period_length;
    }
}
