//! LocaleStrings port - user-facing copy for toasts and notifications.

use chrono::NaiveDate;

use crate::domain::gamification::BadgeKey;

/// A message to render in the user's locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    CycleLoggedTitle,
    CycleLoggedDescription { date: NaiveDate },
    BadgeUnlockedTitle,
    BadgeName(BadgeKey),
    CycleLateText { days_late: i64 },
}

pub trait LocaleStrings: Send + Sync {
    fn render(&self, message: Message) -> String;
}
