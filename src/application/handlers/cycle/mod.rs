//! Cycle command and query handlers.
//!
//! Every command is a read-modify-write of the user's `CycleAggregate`,
//! retried on version conflicts (see `write`).

mod get_cycle_overview;
mod log_period_start;
mod set_cycle_type;
mod toggle_period_end;
mod write;

pub use get_cycle_overview::{CycleOverview, GetCycleOverviewHandler, GetCycleOverviewQuery};
pub use log_period_start::{
    LogPeriodStartCommand, LogPeriodStartError, LogPeriodStartHandler, LogPeriodStartOutcome,
};
pub use set_cycle_type::{
    SetCycleTypeCommand, SetCycleTypeError, SetCycleTypeHandler, SetCycleTypeResult,
};
pub use toggle_period_end::{
    TogglePeriodEndCommand, TogglePeriodEndError, TogglePeriodEndHandler, TogglePeriodEndOutcome,
};
pub use write::MAX_WRITE_ATTEMPTS;
