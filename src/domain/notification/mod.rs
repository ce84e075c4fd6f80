//! In-app notifications.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{NotificationId, Timestamp, UserId};

/// Kind of notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    /// The predicted period start has passed the grace window.
    CycleLate,
}

impl NotificationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationType::CycleLate => "cycle_late",
        }
    }
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A message shown in the user's notification inbox.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: NotificationId,
    pub user_id: UserId,
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    pub text: String,
    pub link: String,
    pub created_at: Timestamp,
    #[serde(default)]
    pub read: bool,
}

impl Notification {
    /// Builds an unread late-cycle notice.
    pub fn cycle_late(
        user_id: UserId,
        text: impl Into<String>,
        link: impl Into<String>,
        now: Timestamp,
    ) -> Self {
        Self {
            id: NotificationId::new(),
            user_id,
            notification_type: NotificationType::CycleLate,
            text: text.into(),
            link: link.into(),
            created_at: now,
            read: false,
        }
    }

    pub fn mark_read(&mut self) {
        self.read = true;
    }
}

/// Marks that a late notice was already issued for one predicted start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LateNoticeKey {
    pub predicted_start: NaiveDate,
}

impl LateNoticeKey {
    pub fn new(predicted_start: NaiveDate) -> Self {
        Self { predicted_start }
    }

    /// Document id used by the stores.
    pub fn doc_id(&self) -> String {
        self.predicted_start.format("%Y-%m-%d").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_late_starts_unread() {
        let n = Notification::cycle_late(
            UserId::new("u1").unwrap(),
            "Your period is late",
            "/cycle-tracker",
            Timestamp::now(),
        );
        assert!(!n.read);
        assert_eq!(n.notification_type, NotificationType::CycleLate);
    }

    #[test]
    fn serializes_with_type_field() {
        let mut n = Notification::cycle_late(
            UserId::new("u1").unwrap(),
            "late",
            "/cycle-tracker",
            Timestamp::now(),
        );
        n.mark_read();
        let json = serde_json::to_value(&n).unwrap();
        assert_eq!(json["type"], "cycle_late");
        assert_eq!(json["userId"], "u1");
        assert_eq!(json["link"], "/cycle-tracker");
        assert_eq!(json["read"], true);
        assert!(json["createdAt"].is_string());
    }

    #[test]
    fn late_notice_doc_id_is_calendar_date() {
        let key = LateNoticeKey::new(NaiveDate::from_ymd_opt(2024, 1, 29).unwrap());
        assert_eq!(key.doc_id(), "2024-01-29");
    }
}
