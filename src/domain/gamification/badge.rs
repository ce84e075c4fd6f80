use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{Timestamp, ValidationError};

/// Number of logged cycles that earns `cycle_veteran`.
pub const CYCLE_VETERAN_THRESHOLD: usize = 3;

/// The badge catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeKey {
    /// First cycle logged.
    FirstCycle,
    /// Three cycles logged.
    CycleVeteran,
    /// First daily symptom log.
    SymptomScout,
    /// Walkthrough completed.
    GuidedTour,
    /// App shared.
    Ambassador,
    /// App rated.
    Supporter,
    /// Appointment inquiry sent.
    CareSeeker,
}

impl BadgeKey {
    pub const ALL: [BadgeKey; 7] = [
        BadgeKey::FirstCycle,
        BadgeKey::CycleVeteran,
        BadgeKey::SymptomScout,
        BadgeKey::GuidedTour,
        BadgeKey::Ambassador,
        BadgeKey::Supporter,
        BadgeKey::CareSeeker,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BadgeKey::FirstCycle => "first_cycle",
            BadgeKey::CycleVeteran => "cycle_veteran",
            BadgeKey::SymptomScout => "symptom_scout",
            BadgeKey::GuidedTour => "guided_tour",
            BadgeKey::Ambassador => "ambassador",
            BadgeKey::Supporter => "supporter",
            BadgeKey::CareSeeker => "care_seeker",
        }
    }
}

impl fmt::Display for BadgeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BadgeKey {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BadgeKey::ALL
            .iter()
            .copied()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| ValidationError::invalid_format("badge_key", format!("unknown badge '{}'", s)))
    }
}

/// A badge a user has earned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Badge {
    pub key: BadgeKey,
    pub unlocked_at: Timestamp,
}

impl Badge {
    pub fn new(key: BadgeKey, unlocked_at: Timestamp) -> Self {
        Self { key, unlocked_at }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_round_trip_through_strings() {
        for key in BadgeKey::ALL {
            assert_eq!(key.as_str().parse::<BadgeKey>().unwrap(), key);
            assert_eq!(
                serde_json::to_value(key).unwrap(),
                serde_json::Value::String(key.as_str().to_string())
            );
        }
    }

    #[test]
    fn unknown_key_is_rejected() {
        assert!("night_owl".parse::<BadgeKey>().is_err());
    }
}
