//! Date-range filtering
//!
//! A [`DateRange`] is inclusive at both ends and can only be constructed in
//! order, so an inverted range is rejected where the user supplied it
//! instead of surfacing deep inside the pipeline.

use chrono::NaiveDate;
use thiserror::Error;

use crate::pipeline::entry::MoodEntry;

/// Inclusive calendar-date range, `start <= end` by construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

/// Start date after end date
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("invalid date range: start {start} is after end {end}")]
pub struct InvalidDateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, InvalidDateRange> {
        if start > end {
            return Err(InvalidDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Single-day range
    pub fn single(day: NaiveDate) -> Self {
        Self {
            start: day,
            end: day,
        }
    }

    /// Smallest range covering every entry, `None` when there are none.
    ///
    /// Used to seed the dashboard's default window the way the page seeds
    /// its date pickers with the data's min and max.
    pub fn spanning(entries: &[MoodEntry]) -> Option<Self> {
        let start = entries.iter().map(MoodEntry::date).min()?;
        let end = entries.iter().map(MoodEntry::date).max()?;
        Some(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }
}

/// Entries whose calendar date lies within the range, time of day
/// discarded. Pure: input order is preserved and nothing is mutated.
pub fn filter_range(entries: &[MoodEntry], range: &DateRange) -> Vec<MoodEntry> {
    entries
        .iter()
        .filter(|e| range.contains(e.date()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::entry::parse_timestamp;

    fn entry(ts: &str, mood: &str) -> MoodEntry {
        MoodEntry {
            timestamp: parse_timestamp(ts).unwrap(),
            mood: mood.to_string(),
            note: String::new(),
        }
    }

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn sample() -> Vec<MoodEntry> {
        vec![
            entry("2024-01-01 09:00:00", "Happy"),
            entry("2024-01-01 10:00:00", "Happy"),
            entry("2024-01-02 08:00:00", "Confused"),
        ]
    }

    #[test]
    fn test_inverted_range_rejected() {
        let err = DateRange::new(date("2024-01-02"), date("2024-01-01")).unwrap_err();
        assert_eq!(err.start, date("2024-01-02"));
    }

    #[test]
    fn test_filter_is_exactly_the_predicate() {
        let entries = sample();
        let range = DateRange::new(date("2024-01-01"), date("2024-01-02")).unwrap();
        let kept = filter_range(&entries, &range);

        assert_eq!(kept.len(), 3);
        assert!(kept.iter().all(|e| range.contains(e.date())));
    }

    #[test]
    fn test_filter_inclusive_at_both_ends() {
        let entries = sample();
        // Min and max dates present in the data return everything
        let span = DateRange::spanning(&entries).unwrap();
        assert_eq!(span.start(), date("2024-01-01"));
        assert_eq!(span.end(), date("2024-01-02"));
        assert_eq!(filter_range(&entries, &span), entries);
    }

    #[test]
    fn test_filter_single_day() {
        let entries = sample();
        let kept = filter_range(&entries, &DateRange::single(date("2024-01-02")));
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].mood, "Confused");
    }

    #[test]
    fn test_filter_time_of_day_discarded() {
        let entries = vec![entry("2024-01-01 23:59:59", "Happy")];
        let kept = filter_range(&entries, &DateRange::single(date("2024-01-01")));
        assert_eq!(kept.len(), 1);
    }

    #[test]
    fn test_filter_empty_input() {
        let range = DateRange::single(date("2024-01-01"));
        assert!(filter_range(&[], &range).is_empty());
    }

    #[test]
    fn test_filter_outside_range() {
        let entries = sample();
        let range = DateRange::single(date("2024-02-01"));
        assert!(filter_range(&entries, &range).is_empty());
    }

    #[test]
    fn test_spanning_empty() {
        assert!(DateRange::spanning(&[]).is_none());
    }
}
