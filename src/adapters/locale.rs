//! Default English copy.

use crate::domain::gamification::BadgeKey;
use crate::ports::{LocaleStrings, Message};

#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishStrings;

impl EnglishStrings {
    fn badge_name(key: BadgeKey) -> &'static str {
        match key {
            BadgeKey::FirstCycle => "First Cycle",
            BadgeKey::CycleVeteran => "Cycle Veteran",
            BadgeKey::SymptomScout => "Symptom Scout",
            BadgeKey::GuidedTour => "Guided Tour",
            BadgeKey::Ambassador => "Ambassador",
            BadgeKey::Supporter => "Supporter",
            BadgeKey::CareSeeker => "Care Seeker",
        }
    }
}

impl LocaleStrings for EnglishStrings {
    fn render(&self, message: Message) -> String {
        match message {
            Message::CycleLoggedTitle => "Period logged".to_string(),
            Message::CycleLoggedDescription { date } => {
                format!("Period start saved for {}.", date.format("%B %-d, %Y"))
            }
            Message::BadgeUnlockedTitle => "Badge unlocked!".to_string(),
            Message::BadgeName(key) => Self::badge_name(key).to_string(),
            Message::CycleLateText { days_late } => {
                let unit = if days_late == 1 { "day" } else { "days" };
                format!(
                    "Your period is {} {} later than predicted. Log it in the cycle tracker or talk to your care team.",
                    days_late, unit
                )
            }
        }
    }
}
