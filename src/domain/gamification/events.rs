use serde::{Deserialize, Serialize};

use crate::domain::event_types::BADGE_UNLOCKED;
use crate::domain::foundation::{domain_event, EventId, Timestamp, UserId};

use super::BadgeKey;

/// A badge was earned for the first time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgeUnlocked {
    pub event_id: EventId,
    pub user_id: UserId,
    pub badge_key: BadgeKey,
    pub occurred_at: Timestamp,
}

domain_event!(BadgeUnlocked, BADGE_UNLOCKED, "Badge");
