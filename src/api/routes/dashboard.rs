//! Dashboard Route
//!
//! The page's single data endpoint: runs the whole load → filter →
//! aggregate pipeline once per request and returns metrics, chart series,
//! and the raw table.
//!
//! - GET /api/v1/dashboard?start=YYYY-MM-DD&end=YYYY-MM-DD

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{Local, NaiveDate};
use std::sync::Arc;

use crate::api::dto::{DashboardResponse, EntryDto, RangeDto, RangeParams, SummaryDto};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::pipeline::{filter_range, summarize, DateRange, MoodEntry};

/// GET /api/v1/dashboard
///
/// A store read failure is reported in the response body while the page
/// renders its empty state; an inverted range is a 400 and nothing is
/// computed. An empty window is not an error.
pub async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RangeParams>,
) -> ApiResult<Json<DashboardResponse>> {
    let loaded = state.log.load().await;
    let store_error = loaded.error.as_ref().map(|e| e.to_string());

    let range = resolve_range(&params, &loaded.entries)?;

    let mut windowed = filter_range(&loaded.entries, &range);
    windowed.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

    let empty = windowed.is_empty();
    let summary = if empty {
        None
    } else {
        Some(SummaryDto::from(summarize(&windowed)))
    };

    Ok(Json(DashboardResponse {
        range: RangeDto::from(&range),
        store_error,
        empty,
        summary,
        entries: windowed.iter().map(EntryDto::from).collect(),
    }))
}

/// Resolve the requested window against the loaded data.
///
/// Explicit bounds are parsed strictly; omitted bounds fall back to the
/// data's min/max date, the way the page seeds its date pickers, or to
/// today when there is no data at all.
pub(crate) fn resolve_range(
    params: &RangeParams,
    entries: &[MoodEntry],
) -> ApiResult<DateRange> {
    let span = DateRange::spanning(entries);
    let today = Local::now().date_naive();

    let start = match &params.start {
        Some(s) => parse_date(s)?,
        None => span.map(|r| r.start()).unwrap_or(today),
    };
    let end = match &params.end {
        Some(s) => parse_date(s)?,
        None => span.map(|r| r.end()).unwrap_or(today),
    };

    Ok(DateRange::new(start, end)?)
}

fn parse_date(s: &str) -> ApiResult<NaiveDate> {
    s.parse()
        .map_err(|_| ApiError::Validation(format!("invalid date {s:?}, expected YYYY-MM-DD")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::parse_timestamp;

    fn entry(ts: &str) -> MoodEntry {
        MoodEntry {
            timestamp: parse_timestamp(ts).unwrap(),
            mood: "Happy".to_string(),
            note: String::new(),
        }
    }

    #[test]
    fn test_resolve_range_defaults_to_data_span() {
        let entries = vec![entry("2024-01-01 09:00:00"), entry("2024-01-05 09:00:00")];
        let range = resolve_range(&RangeParams::default(), &entries).unwrap();
        assert_eq!(range.start().to_string(), "2024-01-01");
        assert_eq!(range.end().to_string(), "2024-01-05");
    }

    #[test]
    fn test_resolve_range_no_data_defaults_to_today() {
        let range = resolve_range(&RangeParams::default(), &[]).unwrap();
        assert_eq!(range.start(), range.end());
    }

    #[test]
    fn test_resolve_range_rejects_inverted() {
        let params = RangeParams {
            start: Some("2024-01-02".to_string()),
            end: Some("2024-01-01".to_string()),
        };
        assert!(matches!(
            resolve_range(&params, &[]),
            Err(ApiError::InvalidDateRange(_))
        ));
    }

    #[test]
    fn test_resolve_range_rejects_garbage_date() {
        let params = RangeParams {
            start: Some("tomorrow".to_string()),
            end: None,
        };
        assert!(matches!(
            resolve_range(&params, &[]),
            Err(ApiError::Validation(_))
        ));
    }
}
