//! Calendar-day helpers.
//!
//! Cycle math works on whole calendar days. Clients (and older stored
//! documents) send either a plain `YYYY-MM-DD` or a full RFC 3339 timestamp;
//! both collapse to the UTC calendar day.

use chrono::{DateTime, Datelike, NaiveDate, Utc};

use super::ValidationError;

/// Earliest year a logged day may fall in.
pub const MIN_CALENDAR_YEAR: i32 = 1900;
/// Latest year a logged day may fall in.
pub const MAX_CALENDAR_YEAR: i32 = 2100;

/// Parses a calendar day from `YYYY-MM-DD` or an RFC 3339 timestamp.
///
/// Days outside `MIN_CALENDAR_YEAR..=MAX_CALENDAR_YEAR` are rejected.
pub fn parse_calendar_date(field: &str, raw: &str) -> Result<NaiveDate, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::empty_field(field));
    }
    let date = match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(date) => date,
        Err(_) => DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.with_timezone(&Utc).date_naive())
            .map_err(|_| {
                ValidationError::invalid_format(field, format!("'{}' is not a calendar date", raw))
            })?,
    };

    if !(MIN_CALENDAR_YEAR..=MAX_CALENDAR_YEAR).contains(&date.year()) {
        return Err(ValidationError::out_of_range(
            format!("{field} year"),
            i64::from(MIN_CALENDAR_YEAR),
            i64::from(MAX_CALENDAR_YEAR),
            i64::from(date.year()),
        ));
    }
    Ok(date)
}

/// Whole days from `from` to `to` (negative when `to` is earlier).
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

/// Serde adapter accepting either date form, always writing `YYYY-MM-DD`.
pub mod serde_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&date.format("%Y-%m-%d").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(d)?;
        super::parse_calendar_date("date", &raw).map_err(serde::de::Error::custom)
    }
}

/// Nullable variant of [`serde_date`].
pub mod serde_date_opt {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &Option<NaiveDate>, s: S) -> Result<S::Ok, S::Error> {
        match date {
            Some(date) => s.serialize_str(&date.format("%Y-%m-%d").to_string()),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDate>, D::Error> {
        let raw = Option::<String>::deserialize(d)?;
        raw.map(|raw| super::parse_calendar_date("date", &raw))
            .transpose()
            .map_err(serde::de::Error::custom)
    }
}
