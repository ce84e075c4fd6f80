//! In-memory store adapters.
//!
//! Used when no database URL is configured and throughout the tests.
//! Each store is cheap to clone; clones share state.

mod badges;
mod cycle_data;
mod daily_events;
mod late_notices;
mod notifications;

pub use badges::InMemoryBadgeRepository;
pub use cycle_data::InMemoryCycleDataRepository;
pub use daily_events::InMemoryDailyEventRepository;
pub use late_notices::InMemoryLateNoticeStore;
pub use notifications::InMemoryNotificationRepository;
