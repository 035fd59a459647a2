//! Aggregation
//!
//! Turns a windowed entry set into the metrics and chart series the
//! dashboard shows: three scalar metrics, per-mood counts for the bar
//! chart, per-day counts for the daily trend line.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::pipeline::entry::MoodEntry;

/// Shown as the most common mood when there are no entries
pub const NO_MOOD_PLACEHOLDER: &str = "–";

/// Summary metrics and series over one entry set
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Summary {
    /// Number of entries in the window
    pub total_count: usize,
    /// Mood with the highest occurrence count; ties go to the
    /// lexicographically smallest mood. [`NO_MOOD_PLACEHOLDER`] when empty.
    pub most_common_mood: String,
    /// Distinct calendar dates with at least one entry
    pub distinct_days: usize,
    /// Occurrence count per mood label
    pub mood_counts: BTreeMap<String, u64>,
    /// One count per distinct date, ascending by date
    pub daily_counts: Vec<DailyCount>,
}

/// Entry count for one calendar date
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub count: u64,
}

/// Compute summary metrics and chart series. Pure and idempotent; an empty
/// input yields all-zero fields rather than failing, even though callers
/// normally short-circuit to an empty-state message first.
pub fn summarize(entries: &[MoodEntry]) -> Summary {
    let mut mood_counts: BTreeMap<String, u64> = BTreeMap::new();
    let mut per_day: BTreeMap<NaiveDate, u64> = BTreeMap::new();

    for entry in entries {
        *mood_counts.entry(entry.mood.clone()).or_insert(0) += 1;
        *per_day.entry(entry.date()).or_insert(0) += 1;
    }

    // Ascending key order plus a strict comparison makes ties land on the
    // lexicographically smallest mood.
    let most_common_mood = mood_counts
        .iter()
        .fold(None::<(&str, u64)>, |best, (mood, &count)| match best {
            Some((_, best_count)) if count <= best_count => best,
            _ => Some((mood, count)),
        })
        .map(|(mood, _)| mood.to_string())
        .unwrap_or_else(|| NO_MOOD_PLACEHOLDER.to_string());

    Summary {
        total_count: entries.len(),
        most_common_mood,
        distinct_days: per_day.len(),
        daily_counts: per_day
            .into_iter()
            .map(|(date, count)| DailyCount { date, count })
            .collect(),
        mood_counts,
    }
}
