use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use tracing::{info, instrument};

use crate::{auth::jwt::AuthUser, error::ApiError, state::AppState};

use super::log::{self, DayGroup, HistoryEntry};
use super::store::HISTORY_KEY;

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
    pub removed: usize,
}

#[instrument(skip(state))]
pub async fn list_history(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
) -> Result<Json<Vec<DayGroup>>, ApiError> {
    let entries: Vec<HistoryEntry> = state
        .store
        .get(HISTORY_KEY)
        .map_err(ApiError::Internal)?
        .unwrap_or_default();
    let today = OffsetDateTime::now_utc().date();
    Ok(Json(log::group_by_day(&entries, today)))
}

#[instrument(skip(state))]
pub async fn delete_entry(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
    Path(time): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let time = OffsetDateTime::parse(&time, &Rfc3339)
        .map_err(|_| ApiError::Validation("Invalid timestamp".into()))?;

    let removed = state
        .store
        .update(HISTORY_KEY, |entries: Option<Vec<HistoryEntry>>| {
            log::delete_by_time(entries.unwrap_or_default(), time)
        })
        .map_err(ApiError::Internal)?;

    info!(removed, "history entries deleted");
    Ok(Json(DeleteResponse {
        success: true,
        removed,
    }))
}
