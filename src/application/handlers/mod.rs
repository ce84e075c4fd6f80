//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod account;
pub mod assistant;
pub mod cycle;
pub mod daily_log;
pub mod engagement;
pub mod late_cycle;
pub mod notification;

mod publish;

pub use account::EraseUserDataHandler;
pub use assistant::{AssistantAction, AssistantActionError, AssistantActionHandler};
pub use cycle::{
    CycleOverview, GetCycleOverviewHandler, GetCycleOverviewQuery, LogPeriodStartCommand,
    LogPeriodStartError, LogPeriodStartHandler, LogPeriodStartOutcome, SetCycleTypeCommand,
    SetCycleTypeError, SetCycleTypeHandler, SetCycleTypeResult, TogglePeriodEndCommand,
    TogglePeriodEndError, TogglePeriodEndHandler, TogglePeriodEndOutcome,
};
pub use daily_log::{
    GetDailyEventsHandler, GetDailyEventsQuery, LogDailyEventCommand, LogDailyEventError,
    LogDailyEventHandler,
};
pub use engagement::{RecordEngagementCommand, RecordEngagementHandler};
pub use late_cycle::{LateCycleCheckConfig, LateCycleCheckHandler, LateCycleReport};
pub use notification::{
    ListNotificationsHandler, MarkNotificationReadError, MarkNotificationReadHandler,
};
