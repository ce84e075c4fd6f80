//! Engagement module - UI-facing signals that flow through the event bus.
//!
//! `ToastShow` asks the client to display a toast. `EngagementSignal` covers
//! the payload-less user actions (walkthrough, sharing, rating ...) that the
//! client reports and that feed badge unlocking.

use serde::{Deserialize, Serialize};

use crate::domain::event_types::{
    APPOINTMENT_INQUIRY_SENT, PWA_INSTALL_PROMPT, RATE_APP, SHARE_APP, TOAST_SHOW,
    WALKTHROUGH_COMPLETE, WALKTHROUGH_START,
};
use crate::domain::foundation::{domain_event, DomainEvent, EventId, Timestamp, UserId};

/// Visual style of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastVariant {
    Default,
    Success,
    Destructive,
}

/// Request to show a toast.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToastShow {
    pub event_id: EventId,
    pub user_id: UserId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<ToastVariant>,
    /// Display time in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    pub occurred_at: Timestamp,
}

domain_event!(ToastShow, TOAST_SHOW, "Toast");

impl ToastShow {
    pub fn new(user_id: UserId, title: impl Into<String>) -> Self {
        Self {
            event_id: EventId::new(),
            user_id,
            title: title.into(),
            description: None,
            variant: None,
            duration: None,
            occurred_at: Timestamp::now(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_variant(mut self, variant: ToastVariant) -> Self {
        self.variant = Some(variant);
        self
    }

    pub fn with_duration(mut self, millis: u32) -> Self {
        self.duration = Some(millis);
        self
    }
}

/// User actions reported by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngagementKind {
    PwaInstallPrompt,
    WalkthroughStart,
    WalkthroughComplete,
    AppointmentInquirySent,
    AppShared,
    AppRated,
}

impl EngagementKind {
    /// Routing key on the event bus.
    pub fn event_type(&self) -> &'static str {
        match self {
            EngagementKind::PwaInstallPrompt => PWA_INSTALL_PROMPT,
            EngagementKind::WalkthroughStart => WALKTHROUGH_START,
            EngagementKind::WalkthroughComplete => WALKTHROUGH_COMPLETE,
            EngagementKind::AppointmentInquirySent => APPOINTMENT_INQUIRY_SENT,
            EngagementKind::AppShared => SHARE_APP,
            EngagementKind::AppRated => RATE_APP,
        }
    }
}

/// A payload-less engagement event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngagementSignal {
    pub event_id: EventId,
    pub user_id: UserId,
    pub kind: EngagementKind,
    pub occurred_at: Timestamp,
}

impl EngagementSignal {
    pub fn new(user_id: UserId, kind: EngagementKind, occurred_at: Timestamp) -> Self {
        Self {
            event_id: EventId::new(),
            user_id,
            kind,
            occurred_at,
        }
    }
}

impl DomainEvent for EngagementSignal {
    fn event_type(&self) -> &'static str {
        self.kind.event_type()
    }

    fn user_id(&self) -> &UserId {
        &self.user_id
    }

    fn aggregate_type(&self) -> &'static str {
        "Engagement"
    }

    fn occurred_at(&self) -> Timestamp {
        self.occurred_at
    }

    fn event_id(&self) -> EventId {
        self.event_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::SerializableDomainEvent;

    fn user() -> UserId {
        UserId::new("user-1").unwrap()
    }

    #[test]
    fn toast_omits_unset_optionals() {
        let toast = ToastShow::new(user(), "Saved");
        let env = toast.to_envelope().unwrap();
        assert_eq!(env.event_type, "toast.show");
        assert_eq!(env.payload["title"], "Saved");
        assert!(env.payload.get("variant").is_none());
        assert!(env.payload.get("duration").is_none());
    }

    #[test]
    fn toast_builder_sets_fields() {
        let toast = ToastShow::new(user(), "Badge")
            .with_description("First cycle")
            .with_variant(ToastVariant::Success)
            .with_duration(5000);
        let json = serde_json::to_value(&toast).unwrap();
        assert_eq!(json["variant"], "success");
        assert_eq!(json["duration"], 5000);
        assert_eq!(json["description"], "First cycle");
    }

    #[test]
    fn engagement_signal_routes_by_kind() {
        let signal = EngagementSignal::new(user(), EngagementKind::AppShared, Timestamp::now());
        let env = signal.to_envelope().unwrap();
        assert_eq!(env.event_type, "app.shared");
        assert_eq!(env.aggregate_id, "user-1");
    }

    #[test]
    fn engagement_kind_parses_from_snake_case() {
        let kind: EngagementKind = serde_json::from_str("\"walkthrough_complete\"").unwrap();
        assert_eq!(kind.event_type(), "walkthrough.complete");
    }
}
