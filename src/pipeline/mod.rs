//! The load → filter → aggregate pipeline
//!
//! Runs once per interaction, to completion, with no background tasks:
//! rows come out of the store, rows that type-check become entries, the
//! caller's date range windows them, and the window is aggregated into the
//! metrics and series the dashboard renders.

pub mod entry;
pub mod filter;
pub mod loader;
pub mod summary;

pub use entry::{parse_timestamp, MoodEntry, RowParseError, MOOD_CHOICES, TIMESTAMP_FORMAT};
pub use filter::{filter_range, DateRange, InvalidDateRange};
pub use loader::{Loaded, MoodLog};
pub use summary::{summarize, DailyCount, Summary, NO_MOOD_PLACEHOLDER};
