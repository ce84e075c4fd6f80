//! Cycle module - period history, rolling averages and phase prediction.
//!
//! `CycleAggregate` is the per-user document; `recalc_averages` and
//! `predict_phases` are the pure functions it is built on.

mod aggregate;
mod averages;
mod events;
mod prediction;
mod record;

pub use aggregate::{CycleAggregate, PeriodStart};
pub use averages::{
    recalc_averages, Averages, CYCLE_GAP_DAYS, DEFAULT_CYCLE_LENGTH, DEFAULT_PERIOD_LENGTH,
    PERIOD_LENGTH_DAYS, ROLLING_WINDOW,
};
pub use events::{CycleLogged, FirstCycleLogged, PeriodEndUpdated};
pub use prediction::{
    predict_phases, PhasePrediction, FERTILE_DAYS_AFTER_OVULATION, FERTILE_DAYS_BEFORE_OVULATION,
    LUTEAL_PHASE_DAYS,
};
pub use record::{Cycle, CycleType};
