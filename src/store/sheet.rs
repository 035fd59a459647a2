//! Hosted Spreadsheet Store
//!
//! HTTP client for the spreadsheet service holding the mood log. Speaks the
//! values API of the hosting service: a GET for the full column range and a
//! POST to the `:append` endpoint for new rows.

use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{EntryStore, RawRow, StoreError, StoreResult};
use async_trait::async_trait;

/// Configuration for the sheet-backed store
#[derive(Debug, Clone)]
pub struct SheetConfig {
    /// Base URL of the spreadsheet service (e.g. "https://sheets.googleapis.com")
    pub base_url: String,
    /// Spreadsheet document id
    pub spreadsheet_id: String,
    /// Worksheet (tab) name inside the document
    pub sheet_name: String,
    /// Bearer token for the service account
    pub api_token: String,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            base_url: "https://sheets.googleapis.com".to_string(),
            spreadsheet_id: String::new(),
            sheet_name: "mood_of_the_queue".to_string(),
            api_token: String::new(),
            request_timeout_ms: 10_000,
        }
    }
}

/// Sheet-backed entry store
///
/// Holds an authenticated HTTP handle built once at startup; there is no
/// ambient or global session state. The three sheet columns are
/// `Timestamp`, `Mood`, `Note` in that order (range `A:C`).
pub struct SheetStore {
    client: Client,
    config: SheetConfig,
}

impl SheetStore {
    /// Build an authenticated store handle from configuration
    pub fn new(config: SheetConfig) -> StoreResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_millis(config.request_timeout_ms))
            .build()
            .map_err(|e| StoreError::Unavailable(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    /// Get the current configuration
    pub fn config(&self) -> &SheetConfig {
        &self.config
    }

    fn values_url(&self) -> String {
        format!(
            "{}/v4/spreadsheets/{}/values/{}!A:C",
            self.config.base_url, self.config.spreadsheet_id, self.config.sheet_name
        )
    }

    fn append_url(&self) -> String {
        format!("{}:append?valueInputOption=USER_ENTERED", self.values_url())
    }

    fn map_request_error(e: reqwest::Error) -> StoreError {
        if e.is_timeout() {
            StoreError::Unavailable("request timed out".to_string())
        } else if e.is_connect() {
            StoreError::Unavailable(format!("connection failed: {e}"))
        } else {
            StoreError::Unavailable(e.to_string())
        }
    }
}

#[async_trait]
impl EntryStore for SheetStore {
    fn kind(&self) -> &'static str {
        "sheet"
    }

    async fn read_all(&self) -> StoreResult<Vec<RawRow>> {
        let response = self
            .client
            .get(self.values_url())
            .bearer_auth(&self.config.api_token)
            .send()
            .await
            .map_err(Self::map_request_error)?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Unavailable(format!("HTTP {status}: {body}")));
        }

        let values: ValuesResponse = response
            .json()
            .await
            .map_err(|e| StoreError::Unavailable(format!("bad response body: {e}")))?;

        Ok(rows_from_values(values.values))
    }

    async fn append(&self, row: &RawRow) -> StoreResult<()> {
        let body = AppendRequest {
            values: vec![vec![row.timestamp.clone(), row.mood.clone(), row.note.clone()]],
        };

        let response = self
            .client
            .post(self.append_url())
            .bearer_auth(&self.config.api_token)
            .json(&body)
            .send()
            .await
            .map_err(Self::map_request_error)?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Unavailable(format!("HTTP {status}: {body}")));
        }

        tracing::debug!(mood = %row.mood, "appended row to sheet");
        Ok(())
    }
}

/// Map the raw cell grid onto rows, skipping a leading header row.
///
/// Historical and external writes mean rows can be ragged: missing trailing
/// cells become empty strings, extra cells are ignored.
fn rows_from_values(values: Vec<Vec<String>>) -> Vec<RawRow> {
    let mut rows = values;

    if rows
        .first()
        .and_then(|r| r.first())
        .is_some_and(|c| c.eq_ignore_ascii_case("timestamp"))
    {
        rows.remove(0);
    }

    rows.into_iter()
        .map(|mut cells| {
            cells.resize(3, String::new());
            let mut it = cells.into_iter();
            RawRow {
                timestamp: it.next().unwrap_or_default(),
                mood: it.next().unwrap_or_default(),
                note: it.next().unwrap_or_default(),
            }
        })
        .collect()
}

#[derive(Debug, Deserialize)]
struct ValuesResponse {
    #[serde(default)]
    values: Vec<Vec<String>>,
}

#[derive(Debug, Serialize)]
struct AppendRequest {
    values: Vec<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SheetConfig::default();
        assert_eq!(config.base_url, "https://sheets.googleapis.com");
        assert_eq!(config.sheet_name, "mood_of_the_queue");
        assert_eq!(config.request_timeout_ms, 10_000);
    }

    #[test]
    fn test_urls() {
        let store = SheetStore::new(SheetConfig {
            spreadsheet_id: "abc123".to_string(),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(
            store.values_url(),
            "https://sheets.googleapis.com/v4/spreadsheets/abc123/values/mood_of_the_queue!A:C"
        );
        assert!(store.append_url().ends_with(":append?valueInputOption=USER_ENTERED"));
    }

    #[test]
    fn test_rows_from_values_skips_header() {
        let rows = rows_from_values(vec![
            vec!["Timestamp".into(), "Mood".into(), "Note".into()],
            vec!["2024-01-01 09:00:00".into(), "Happy".into(), "".into()],
        ]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].mood, "Happy");
    }

    #[test]
    fn test_rows_from_values_pads_short_rows() {
        let rows = rows_from_values(vec![vec!["2024-01-01 09:00:00".into(), "Happy".into()]]);
        assert_eq!(rows[0].note, "");
    }

    #[test]
    fn test_rows_from_values_ignores_extra_cells() {
        let rows = rows_from_values(vec![vec![
            "2024-01-01 09:00:00".into(),
            "Happy".into(),
            "note".into(),
            "stray".into(),
        ]]);
        assert_eq!(rows[0].note, "note");
    }

    #[test]
    fn test_rows_from_values_no_header_kept() {
        let rows = rows_from_values(vec![vec![
            "2024-01-01 09:00:00".into(),
            "Happy".into(),
            "".into(),
        ]]);
        assert_eq!(rows.len(), 1);
    }
}
