//! Clock port - current time for handlers and the scheduled check.

use chrono::NaiveDate;

use crate::domain::foundation::Timestamp;

pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;

    /// Current UTC calendar date.
    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}
