//! Per-day symptom records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::domain::foundation::{serde_date, Timestamp, ValidationError};

const MAX_TAG_LEN: usize = 40;

/// A symptom or event flag such as `cramps` or `headache`.
///
/// Lowercase ASCII letters, digits and underscores; at most 40 characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SymptomTag(String);

impl SymptomTag {
    pub fn new(raw: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(ValidationError::empty_field("flag"));
        }
        if raw.len() > MAX_TAG_LEN {
            return Err(ValidationError::out_of_range(
                "flag",
                1,
                MAX_TAG_LEN as i64,
                raw.len() as i64,
            ));
        }
        if !raw
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
        {
            return Err(ValidationError::invalid_format(
                "flag",
                format!("'{}' may only contain a-z, 0-9 and '_'", raw),
            ));
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for SymptomTag {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SymptomTag> for String {
    fn from(tag: SymptomTag) -> Self {
        tag.0
    }
}

impl fmt::Display for SymptomTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A partial update: `true` sets a flag, `false` clears it, anything not
/// mentioned is left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyEventPatch {
    pub flags: BTreeMap<SymptomTag, bool>,
}

impl DailyEventPatch {
    pub fn set(mut self, tag: SymptomTag) -> Self {
        self.flags.insert(tag, true);
        self
    }

    pub fn clear(mut self, tag: SymptomTag) -> Self {
        self.flags.insert(tag, false);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }
}

/// Everything the user flagged on one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyEvent {
    #[serde(with = "serde_date")]
    pub date: NaiveDate,
    #[serde(default)]
    pub flags: BTreeSet<SymptomTag>,
    pub updated_at: Timestamp,
}

impl DailyEvent {
    pub fn new(date: NaiveDate, now: Timestamp) -> Self {
        Self {
            date,
            flags: BTreeSet::new(),
            updated_at: now,
        }
    }

    /// Merges a patch into this day's record.
    pub fn apply(&mut self, patch: &DailyEventPatch, now: Timestamp) {
        for (tag, enabled) in &patch.flags {
            if *enabled {
                self.flags.insert(tag.clone());
            } else {
                self.flags.remove(tag);
            }
        }
        self.updated_at = now;
    }

    /// Merges a patch into an optional existing record.
    pub fn merged(
        existing: Option<DailyEvent>,
        date: NaiveDate,
        patch: &DailyEventPatch,
        now: Timestamp,
    ) -> DailyEvent {
        let mut event = existing.unwrap_or_else(|| DailyEvent::new(date, now));
        event.apply(patch, now);
        event
    }
}
