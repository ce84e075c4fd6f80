//! A single logged period.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{serde_date, serde_date_opt, CycleId, ValidationError};

/// Whether a cycle participates in averages and predictions.
///
/// Documents written before the field existed have no `type`; they are
/// regular cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CycleType {
    #[default]
    Regular,
    Irregular,
}

impl CycleType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CycleType::Regular => "regular",
            CycleType::Irregular => "irregular",
        }
    }
}

impl fmt::Display for CycleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One menstrual period: a start day and, once marked, an end day.
///
/// Invariant: `start_date <= end_date` whenever an end date is present.
/// Stored documents are checked on the way in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "StoredCycle")]
pub struct Cycle {
    id: CycleId,
    #[serde(with = "serde_date")]
    start_date: NaiveDate,
    #[serde(with = "serde_date_opt", default)]
    end_date: Option<NaiveDate>,
    #[serde(rename = "type", default)]
    cycle_type: CycleType,
}

/// Stored shape, before the date invariant is checked.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredCycle {
    id: CycleId,
    #[serde(with = "serde_date")]
    start_date: NaiveDate,
    #[serde(with = "serde_date_opt", default)]
    end_date: Option<NaiveDate>,
    #[serde(rename = "type", default)]
    cycle_type: CycleType,
}

impl TryFrom<StoredCycle> for Cycle {
    type Error = ValidationError;

    fn try_from(stored: StoredCycle) -> Result<Self, Self::Error> {
        Cycle::reconstitute(stored.id, stored.start_date, stored.end_date, stored.cycle_type)
    }
}

impl Cycle {
    /// A freshly logged regular period with no end date yet.
    pub fn start(start_date: NaiveDate) -> Self {
        Self {
            id: CycleId::new(),
            start_date,
            end_date: None,
            cycle_type: CycleType::Regular,
        }
    }

    /// Rebuilds a cycle from stored fields, enforcing the date invariant.
    pub fn reconstitute(
        id: CycleId,
        start_date: NaiveDate,
        end_date: Option<NaiveDate>,
        cycle_type: CycleType,
    ) -> Result<Self, ValidationError> {
        let mut cycle = Self {
            id,
            start_date,
            end_date: None,
            cycle_type,
        };
        cycle.set_end_date(end_date)?;
        Ok(cycle)
    }

    pub fn id(&self) -> CycleId {
        self.id
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        self.end_date
    }

    pub fn cycle_type(&self) -> CycleType {
        self.cycle_type
    }

    pub fn is_regular(&self) -> bool {
        self.cycle_type == CycleType::Regular
    }

    /// Inclusive period length in days, when the period has been closed.
    pub fn period_length(&self) -> Option<i64> {
        self.end_date
            .map(|end| (end - self.start_date).num_days() + 1)
    }

    /// Sets or clears the end day.
    pub fn set_end_date(&mut self, end_date: Option<NaiveDate>) -> Result<(), ValidationError> {
        if let Some(end) = end_date {
            if end < self.start_date {
                return Err(ValidationError::invalid_format(
                    "end_date",
                    format!(
                        "end date {} is before start date {}",
                        end, self.start_date
                    ),
                ));
            }
        }
        self.end_date = end_date;
        Ok(())
    }

    pub(super) fn set_cycle_type(&mut self, cycle_type: CycleType) {
        self.cycle_type = cycle_type;
    }
}
