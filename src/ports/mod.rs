//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Event Ports
//!
//! - `EventPublisher` - Publishing domain events
//! - `EventSubscriber` - Subscribing handlers, returning a `Subscription`
//! - `EventHandler` - Handler that processes incoming events
//!
//! ## Persistence Ports
//!
//! - `CycleDataRepository` - Per-user cycle aggregate, compare-and-swap writes
//! - `DailyEventRepository` - Merge-only daily symptom records
//! - `NotificationRepository` - Inbox notifications
//! - `BadgeRepository` - Unlocked badges
//! - `LateNoticeStore` - At-most-once markers for late-cycle notices
//!
//! ## Environment Ports
//!
//! - `Clock` - Current time
//! - `LocaleStrings` - User-facing copy

mod badge_repository;
mod clock;
mod cycle_data_repository;
mod daily_event_repository;
mod event_publisher;
mod event_subscriber;
mod late_notice_store;
mod locale_strings;
mod notification_repository;

pub use badge_repository::BadgeRepository;
pub use clock::Clock;
pub use cycle_data_repository::CycleDataRepository;
pub use daily_event_repository::DailyEventRepository;
pub use event_publisher::EventPublisher;
pub use event_subscriber::{EventBus, EventHandler, EventSubscriber, Subscription};
pub use late_notice_store::LateNoticeStore;
pub use locale_strings::{LocaleStrings, Message};
pub use notification_repository::NotificationRepository;
