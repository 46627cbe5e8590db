use axum::{extract::State, Json};
use tracing::instrument;

use crate::{
    auth::jwt::AuthUser,
    error::ApiError,
    history::RESULT_KEY,
    state::AppState,
    users::repo::User,
};

use super::dto::{ClearResponse, ScoreRequest, ScoreResult};
use super::service;

#[instrument(skip(state, payload))]
pub async fn request_score(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<ScoreRequest>,
) -> Result<Json<ScoreResult>, ApiError> {
    let user = User::find_by_id(&state.db, user_id)
        .await
        .map_err(ApiError::Internal)?
        .ok_or(ApiError::UserNotFound)?;

    let result = service::score_product(&state, &user, &payload.barcode).await?;
    Ok(Json(result))
}

#[instrument(skip(state))]
pub async fn get_result(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
) -> Result<Json<ScoreResult>, ApiError> {
    let result: Option<ScoreResult> = state
        .store
        .get(RESULT_KEY)
        .map_err(ApiError::Internal)?;
    result.map(Json).ok_or(ApiError::NoResult)
}

/// Clears the current-result slot only; the history log is untouched.
#[instrument(skip(state))]
pub async fn clear_result(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
) -> Result<Json<ClearResponse>, ApiError> {
    state
        .store
        .remove(RESULT_KEY)
        .map_err(ApiError::Internal)?;
    Ok(Json(ClearResponse { success: true }))
}
