//! Entry Routes
//!
//! Submission and raw listing of mood entries.
//!
//! - POST /api/v1/entries - Log a mood
//! - GET /api/v1/entries - Filtered raw entries
//! - GET /api/v1/moods - Display vocabulary for the form

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::api::dto::{
    EntriesResponse, EntryDto, LogRequest, LogResponse, MoodChoicesResponse, RangeDto, RangeParams,
};
use crate::api::error::{ApiError, ApiResult};
use crate::api::routes::dashboard::resolve_range;
use crate::api::state::AppState;
use crate::pipeline::{filter_range, MOOD_CHOICES, TIMESTAMP_FORMAT};

/// POST /api/v1/entries
///
/// Append one observation. There is no read-back before the append and no
/// read-after-write guarantee: the dashboard sees the entry on its next
/// reload. A store failure propagates as 503 and the submission is lost
/// unless the user retries.
pub async fn log_entry(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LogRequest>,
) -> ApiResult<(StatusCode, Json<LogResponse>)> {
    validate_log_request(&req, &state)?;

    let entry = state.log.log(&req.mood, &req.note).await?;

    Ok((
        StatusCode::CREATED,
        Json(LogResponse {
            status: "ok".to_string(),
            timestamp: entry.timestamp.format(TIMESTAMP_FORMAT).to_string(),
            message: "Mood logged! Reload the dashboard to see it reflected.".to_string(),
        }),
    ))
}

/// GET /api/v1/entries
///
/// The windowed raw entries, timestamp descending, for the raw table.
/// A store read failure is reported in the body alongside an empty list,
/// the same way the dashboard reports it.
pub async fn list_entries(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RangeParams>,
) -> ApiResult<Json<EntriesResponse>> {
    let loaded = state.log.load().await;
    let store_error = loaded.error.as_ref().map(|e| e.to_string());
    let range = resolve_range(&params, &loaded.entries)?;

    let mut windowed = filter_range(&loaded.entries, &range);
    windowed.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

    Ok(Json(EntriesResponse {
        range: RangeDto::from(&range),
        store_error,
        total: windowed.len(),
        entries: windowed.iter().map(EntryDto::from).collect(),
    }))
}

/// GET /api/v1/moods
///
/// The display vocabulary the form offers. Advisory only; submissions are
/// not validated against it.
pub async fn mood_choices() -> Json<MoodChoicesResponse> {
    Json(MoodChoicesResponse {
        moods: MOOD_CHOICES.iter().map(|m| m.to_string()).collect(),
    })
}

/// Validate a log request
fn validate_log_request(req: &LogRequest, state: &AppState) -> ApiResult<()> {
    if req.mood.trim().is_empty() {
        return Err(ApiError::Validation("Mood cannot be empty".to_string()));
    }

    if req.mood.len() > state.config.max_mood_len {
        return Err(ApiError::Validation(format!(
            "Mood exceeds maximum length of {} characters",
            state.config.max_mood_len
        )));
    }

    if req.note.len() > state.config.max_note_len {
        return Err(ApiError::Validation(format!(
            "Note exceeds maximum length of {} characters",
            state.config.max_note_len
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::state::ApiConfig;
    use crate::store::MemoryStore;

    fn state() -> AppState {
        AppState::new(Arc::new(MemoryStore::new()), ApiConfig::default())
    }

    #[test]
    fn test_validate_log_request_valid() {
        let req = LogRequest {
            mood: "Happy".to_string(),
            note: String::new(),
        };
        assert!(validate_log_request(&req, &state()).is_ok());
    }

    #[test]
    fn test_validate_log_request_empty_mood() {
        let req = LogRequest {
            mood: "   ".to_string(),
            note: String::new(),
        };
        assert!(validate_log_request(&req, &state()).is_err());
    }

    #[test]
    fn test_validate_log_request_oversized_note() {
        let req = LogRequest {
            mood: "Happy".to_string(),
            note: "x".repeat(501),
        };
        assert!(validate_log_request(&req, &state()).is_err());
    }

    #[test]
    fn test_validate_log_request_off_vocabulary_mood_accepted() {
        let req = LogRequest {
            mood: "Melancholy".to_string(),
            note: String::new(),
        };
        assert!(validate_log_request(&req, &state()).is_ok());
    }
}
