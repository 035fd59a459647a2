//! In-Process Store
//!
//! A `Vec`-backed [`EntryStore`] used by the test suite and by `--memory`
//! runs where no spreadsheet credentials are available. Rows live only for
//! the lifetime of the process.

use std::sync::Mutex;

use super::{EntryStore, RawRow, StoreResult};
use async_trait::async_trait;

/// In-memory entry store
#[derive(Debug, Default)]
pub struct MemoryStore {
    rows: Mutex<Vec<RawRow>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with rows
    pub fn with_rows(rows: Vec<RawRow>) -> Self {
        Self {
            rows: Mutex::new(rows),
        }
    }

    /// Number of rows currently held
    pub fn len(&self) -> usize {
        self.rows.lock().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl EntryStore for MemoryStore {
    fn kind(&self) -> &'static str {
        "memory"
    }

    async fn read_all(&self) -> StoreResult<Vec<RawRow>> {
        // Lock poisoning would mean a panic elsewhere; serve what we have
        let rows = self.rows.lock().unwrap_or_else(|e| e.into_inner());
        Ok(rows.clone())
    }

    async fn append(&self, row: &RawRow) -> StoreResult<()> {
        let mut rows = self.rows.lock().unwrap_or_else(|e| e.into_inner());
        rows.push(row.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_append_then_read() {
        let store = MemoryStore::new();
        assert!(store.is_empty());

        let row = RawRow::new("2024-01-01 09:00:00", "Happy", "");
        store.append(&row).await.unwrap();

        let rows = store.read_all().await.unwrap();
        assert_eq!(rows, vec![row]);
    }

    #[tokio::test]
    async fn test_with_rows_preserves_insertion_order() {
        let store = MemoryStore::with_rows(vec![
            RawRow::new("2024-01-02 08:00:00", "Confused", ""),
            RawRow::new("2024-01-01 09:00:00", "Happy", ""),
        ]);

        let rows = store.read_all().await.unwrap();
        assert_eq!(rows[0].mood, "Confused");
        assert_eq!(rows[1].mood, "Happy");
    }

    #[tokio::test]
    async fn test_health_check() {
        let store = MemoryStore::new();
        assert!(store.health_check().await.is_ok());
    }
}
