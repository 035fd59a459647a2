//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.
//! These types are serialized/deserialized to/from JSON.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::pipeline::{DailyCount, DateRange, MoodEntry, Summary, TIMESTAMP_FORMAT};

// ============================================
// LOG DTOs
// ============================================

/// New mood submission from the form
#[derive(Debug, Deserialize)]
pub struct LogRequest {
    /// Mood label (free text; the display vocabulary is advisory)
    pub mood: String,
    /// Optional free-text note
    #[serde(default)]
    pub note: String,
}

/// Response to a successful submission
#[derive(Debug, Serialize)]
pub struct LogResponse {
    /// Status: "ok"
    pub status: String,
    /// Timestamp the entry was stored with
    pub timestamp: String,
    /// Reminder that the dashboard shows the entry only after a reload
    pub message: String,
}

// ============================================
// DASHBOARD DTOs
// ============================================

/// Date-range query parameters, both inclusive.
///
/// Omitted bounds default to the span of the loaded data, or today when
/// there is no data at all.
#[derive(Debug, Default, Deserialize)]
pub struct RangeParams {
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
}

/// The resolved date range echoed back to the client
#[derive(Debug, Serialize)]
pub struct RangeDto {
    pub start: String,
    pub end: String,
}

impl From<&DateRange> for RangeDto {
    fn from(range: &DateRange) -> Self {
        Self {
            start: range.start().to_string(),
            end: range.end().to_string(),
        }
    }
}

/// Everything the dashboard page renders for one date range
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    /// The range the metrics were computed over
    pub range: RangeDto,
    /// Set when the store could not be read; the page shows the message
    /// and renders the empty state (non-fatal)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_error: Option<String>,
    /// True when the windowed entry set is empty; the page shows
    /// "No entries in that date range." instead of metrics
    pub empty: bool,
    /// Metrics and chart series, absent when `empty`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<SummaryDto>,
    /// Windowed entries for the raw table, timestamp descending
    pub entries: Vec<EntryDto>,
}

/// Summary metrics and chart series
#[derive(Debug, Serialize)]
pub struct SummaryDto {
    /// "Total Logs" metric
    pub total_count: usize,
    /// "Most Common Mood" metric
    pub most_common_mood: String,
    /// "Days Logged" metric
    pub distinct_days: usize,
    /// Bar-chart series: occurrence count per mood
    pub mood_counts: BTreeMap<String, u64>,
    /// Line-chart series: entry count per day, ascending by date
    pub daily_counts: Vec<DailyCountDto>,
}

impl From<Summary> for SummaryDto {
    fn from(summary: Summary) -> Self {
        Self {
            total_count: summary.total_count,
            most_common_mood: summary.most_common_mood,
            distinct_days: summary.distinct_days,
            mood_counts: summary.mood_counts,
            daily_counts: summary
                .daily_counts
                .into_iter()
                .map(DailyCountDto::from)
                .collect(),
        }
    }
}

/// One point of the daily trend line
#[derive(Debug, Serialize)]
pub struct DailyCountDto {
    pub date: String,
    pub count: u64,
}

impl From<DailyCount> for DailyCountDto {
    fn from(daily: DailyCount) -> Self {
        Self {
            date: daily.date.to_string(),
            count: daily.count,
        }
    }
}

/// One row of the raw entries table
#[derive(Debug, Serialize)]
pub struct EntryDto {
    pub timestamp: String,
    pub mood: String,
    pub note: String,
}

impl From<&MoodEntry> for EntryDto {
    fn from(entry: &MoodEntry) -> Self {
        Self {
            timestamp: entry.timestamp.format(TIMESTAMP_FORMAT).to_string(),
            mood: entry.mood.clone(),
            note: entry.note.clone(),
        }
    }
}

/// Filtered raw entries
#[derive(Debug, Serialize)]
pub struct EntriesResponse {
    pub range: RangeDto,
    /// Set when the store could not be read; distinguishes an outage from
    /// a genuinely empty store (non-fatal)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_error: Option<String>,
    pub entries: Vec<EntryDto>,
    pub total: usize,
}

/// The display vocabulary offered by the logging form
#[derive(Debug, Serialize)]
pub struct MoodChoicesResponse {
    pub moods: Vec<String>,
}

// ============================================
// HEALTH DTOs
// ============================================

/// Full health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall status: healthy, degraded
    pub status: String,
    /// Store status: ok or the failure message
    pub store: String,
    /// Store backend kind ("sheet", "memory")
    pub store_kind: String,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Application version
    pub version: String,
}
