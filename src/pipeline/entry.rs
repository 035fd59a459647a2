//! Mood entries and row parsing
//!
//! Converts the untyped rows coming back from the store into typed,
//! immutable [`MoodEntry`] records. Parsing is an explicit fallible step so
//! that dropping a malformed row is a visible branch, not a side effect of
//! a permissive parser.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;
use thiserror::Error;

use crate::store::RawRow;

/// Display vocabulary offered by the logging form.
///
/// The store enforces nothing; historical or external writes may carry any
/// mood string, and the pipeline keeps them all.
pub const MOOD_CHOICES: [&str; 4] = ["Happy", "Frustrated", "Confused", "Excited"];

/// Timestamp format used when appending new rows (second precision, local clock)
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One logged mood observation, immutable once loaded
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct MoodEntry {
    /// Second-precision date-and-time, no timezone normalization
    pub timestamp: NaiveDateTime,
    /// Mood label, usually but not necessarily one of [`MOOD_CHOICES`]
    pub mood: String,
    /// Free-text note, may be empty
    pub note: String,
}

impl MoodEntry {
    /// Convert a raw store row, failing if the timestamp does not parse
    pub fn from_raw(row: &RawRow) -> Result<Self, RowParseError> {
        let timestamp = parse_timestamp(&row.timestamp)?;
        Ok(Self {
            timestamp,
            mood: row.mood.clone(),
            note: row.note.clone(),
        })
    }

    /// Calendar date of the entry, time of day discarded
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }
}

/// A row that cannot become a [`MoodEntry`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RowParseError {
    #[error("unparseable timestamp {0:?}")]
    BadTimestamp(String),
}

const DATETIME_FORMATS: &[&str] = &[
    TIMESTAMP_FORMAT,
    "%Y-%m-%dT%H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
];

/// Best-effort timestamp parsing over the formats seen in real sheets.
///
/// RFC 3339 values keep their wall-clock reading; the offset is dropped
/// rather than normalized, matching how the rest of the pipeline treats
/// timestamps as naive local times. Bare dates parse to midnight.
pub fn parse_timestamp(s: &str) -> Result<NaiveDateTime, RowParseError> {
    let s = s.trim();

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Ok(dt);
        }
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.naive_local());
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN));
    }

    Err(RowParseError::BadTimestamp(s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_parse_primary_format() {
        let dt = parse_timestamp("2024-01-01 09:30:15").unwrap();
        assert_eq!(dt.year(), 2024);
        assert_eq!(dt.hour(), 9);
        assert_eq!(dt.second(), 15);
    }

    #[test]
    fn test_parse_iso_t_separator() {
        assert!(parse_timestamp("2024-01-01T09:30:15").is_ok());
    }

    #[test]
    fn test_parse_us_style() {
        let dt = parse_timestamp("01/02/2024 08:00:00").unwrap();
        assert_eq!(dt.month(), 1);
        assert_eq!(dt.day(), 2);
    }

    #[test]
    fn test_parse_rfc3339_drops_offset() {
        let dt = parse_timestamp("2024-01-01T09:30:15+05:00").unwrap();
        assert_eq!(dt.hour(), 9);
    }

    #[test]
    fn test_parse_bare_date_is_midnight() {
        let dt = parse_timestamp("2024-01-01").unwrap();
        assert_eq!(dt.time(), NaiveTime::MIN);
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert!(parse_timestamp("  2024-01-01 09:30:15 ").is_ok());
    }

    #[test]
    fn test_parse_garbage_is_visible_error() {
        let err = parse_timestamp("not a time").unwrap_err();
        assert_eq!(err, RowParseError::BadTimestamp("not a time".to_string()));
    }

    #[test]
    fn test_from_raw_valid() {
        let row = RawRow::new("2024-01-01 09:00:00", "Happy", "great day");
        let entry = MoodEntry::from_raw(&row).unwrap();
        assert_eq!(entry.mood, "Happy");
        assert_eq!(entry.note, "great day");
        assert_eq!(entry.date(), NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    }

    #[test]
    fn test_from_raw_bad_timestamp() {
        let row = RawRow::new("yesterday-ish", "Happy", "");
        assert!(MoodEntry::from_raw(&row).is_err());
    }

    #[test]
    fn test_mood_choices_match_form() {
        assert_eq!(MOOD_CHOICES, ["Happy", "Frustrated", "Confused", "Excited"]);
    }
}
