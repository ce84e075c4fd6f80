//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! Every per-user collection is stored in the `user_documents` table as a
//! JSONB body keyed by `(user_id, collection, doc_id)`:
//!
//! - `PostgresCycleDataRepository` - `cycleData/main`, compare-and-swap on `version`
//! - `PostgresDailyEventRepository` - `dailyEvents/{date}`, row-locked merges
//! - `PostgresNotificationRepository` - `notifications/{id}`
//! - `PostgresBadgeRepository` - `badges/{key}`
//! - `PostgresLateNoticeStore` - `lateNotices/{date}`

mod badges;
mod cycle_data;
mod daily_events;
mod documents;
mod late_notices;
mod notifications;

pub use badges::PostgresBadgeRepository;
pub use cycle_data::PostgresCycleDataRepository;
pub use daily_events::PostgresDailyEventRepository;
pub use documents::{connect, run_migrations};
pub use late_notices::PostgresLateNoticeStore;
pub use notifications::PostgresNotificationRepository;
