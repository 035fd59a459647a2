//! Entry Store
//!
//! The append-only row store behind the dashboard. The backing service is a
//! hosted spreadsheet reached over HTTP; everything above this layer only
//! sees the [`EntryStore`] trait.
//!
//! - [`SheetStore`]: the hosted spreadsheet backend
//! - [`MemoryStore`]: in-process backend for tests and offline use
//!
//! Rows are never updated or deleted. Reads return the whole sheet; writes
//! append a single row. Concurrent writers are serialized by the backing
//! service, not here.

mod memory;
mod sheet;

pub use memory::MemoryStore;
pub use sheet::{SheetConfig, SheetStore};

use async_trait::async_trait;
use thiserror::Error;

/// One spreadsheet row, positionally mapped from the three sheet columns.
///
/// All fields are untyped strings exactly as the store returned (or will
/// receive) them. The pipeline converts these into typed entries and drops
/// what does not parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    /// Timestamp column, expected to hold a parseable date-and-time string
    pub timestamp: String,
    /// Mood label column
    pub mood: String,
    /// Free-text note column, may be empty
    pub note: String,
}

impl RawRow {
    pub fn new(
        timestamp: impl Into<String>,
        mood: impl Into<String>,
        note: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: timestamp.into(),
            mood: mood.into(),
            note: note.into(),
        }
    }
}

/// Abstraction over the append-only row store
#[async_trait]
pub trait EntryStore: Send + Sync {
    /// Short backend name for health reporting ("sheet", "memory")
    fn kind(&self) -> &'static str;

    /// Read every row currently in the store, in insertion order as far as
    /// the backend preserves it. No chronological guarantee.
    async fn read_all(&self) -> StoreResult<Vec<RawRow>>;

    /// Append one row. No retry is performed; failures propagate.
    async fn append(&self, row: &RawRow) -> StoreResult<()>;

    /// Cheap reachability check, used by the readiness probe
    async fn health_check(&self) -> StoreResult<()> {
        self.read_all().await.map(|_| ())
    }
}

/// Errors from the store layer
///
/// Every connectivity, auth, quota, or decode failure collapses into
/// `Unavailable`: callers only need to know the store could not be reached,
/// and the message carries the detail for the user-visible report.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;
