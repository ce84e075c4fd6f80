//! Routing keys for every event published on the session bus.
//!
//! Subscribers register against these constants; the payload schema for each
//! key is the serialized event struct named alongside it.

/// `BadgeUnlocked { badge_key }`
pub const BADGE_UNLOCKED: &str = "badge.unlocked";

/// `CycleLogged { date, cycle_count }`
pub const CYCLE_LOGGED: &str = "cycle.logged";

/// `FirstCycleLogged {}`
pub const FIRST_CYCLE_LOGGED: &str = "cycle.first_logged";

/// `PeriodEndUpdated { cycle_id, end_date }`
pub const PERIOD_END_UPDATED: &str = "cycle.period_end_updated";

/// `DailyEventLogged { date, flags }`
pub const DAILY_EVENT_LOGGED: &str = "daily_event.logged";

/// `ToastShow { title, description?, variant?, duration? }`
pub const TOAST_SHOW: &str = "toast.show";

pub const PWA_INSTALL_PROMPT: &str = "pwa.install_prompt";
pub const WALKTHROUGH_START: &str = "walkthrough.start";
pub const WALKTHROUGH_COMPLETE: &str = "walkthrough.complete";
pub const APPOINTMENT_INQUIRY_SENT: &str = "appointment.inquiry_sent";
pub const SHARE_APP: &str = "app.shared";
pub const RATE_APP: &str = "app.rated";
