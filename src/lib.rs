//! # Moodline
//!
//! Mood-of-the-queue dashboard service: log moods with optional notes to a
//! shared spreadsheet-backed store and serve summary metrics and chart
//! series over a user-selected date range.
//!
//! ## How it fits together
//!
//! The whole substantive logic is one pipeline, run to completion once per
//! interaction:
//!
//! store → loader (typed entries) → range filter (windowed entries)
//! → aggregator (metrics + series) → dashboard response
//!
//! New entries go straight to the store with no read-back; a user who just
//! logged a mood reloads to see it. Read-after-write consistency across
//! users is deliberately not provided.
//!
//! ## Modules
//!
//! - [`store`]: the append-only row store (hosted sheet or in-process)
//! - [`pipeline`]: loading, range filtering, and aggregation
//! - [`api`]: REST API server with Axum
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use moodline::pipeline::{filter_range, summarize, DateRange, MoodLog};
//! use moodline::store::MemoryStore;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let log = MoodLog::new(Arc::new(MemoryStore::new()));
//!
//!     log.log("Happy", "queue is quiet today").await?;
//!
//!     let loaded = log.load().await;
//!     if let Some(range) = DateRange::spanning(&loaded.entries) {
//!         let windowed = filter_range(&loaded.entries, &range);
//!         let summary = summarize(&windowed);
//!         println!(
//!             "{} entries, most common mood: {}",
//!             summary.total_count, summary.most_common_mood
//!         );
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod pipeline;
pub mod store;

// Re-export top-level types for convenience
pub use store::{EntryStore, MemoryStore, RawRow, SheetConfig, SheetStore, StoreError, StoreResult};

pub use pipeline::{
    filter_range, parse_timestamp, summarize, DailyCount, DateRange, InvalidDateRange, Loaded,
    MoodEntry, MoodLog, RowParseError, Summary, MOOD_CHOICES, NO_MOOD_PLACEHOLDER,
};

pub use api::{build_router, serve, ApiConfig, ApiError, AppState};

pub use config::{Config, ConfigError, LoggingConfig, StoreConfig};
