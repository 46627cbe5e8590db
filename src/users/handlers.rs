use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use tracing::{error, instrument, warn};

use crate::{auth::jwt::AuthUser, error::ApiError, state::AppState};

use super::dto::{ProfileResponse, UpdateProfileRequest, UpdateProfileResponse};
use super::repo::{HealthUpdate, User};

#[instrument(skip(state))]
pub async fn get_profile(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<ProfileResponse>, ApiError> {
    let user = User::find_by_id(&state.db, user_id)
        .await
        .map_err(ApiError::Internal)?
        .ok_or(ApiError::UserNotFound)?;

    Ok(Json(ProfileResponse::from(user)))
}

#[instrument(skip(state, payload))]
pub async fn update_profile(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    payload: Result<Json<UpdateProfileRequest>, JsonRejection>,
) -> Result<Json<UpdateProfileResponse>, ApiError> {
    let Json(body) = payload.map_err(|e| {
        warn!(error = %e, "malformed profile update body");
        ApiError::Validation("Invalid input".into())
    })?;

    let update = HealthUpdate {
        age: body.age,
        height: body.height,
        weight: body.weight,
        sugar_level: body.sugar_level,
        has_diabetes: body.has_diabetes,
        has_hypertension: body.has_hypertension,
    };

    match User::update_health(&state.db, user_id, &update).await {
        Ok(_) => Ok(Json(UpdateProfileResponse {
            message: "Profile updated successfully!",
        })),
        Err(e) => {
            error!(error = %e, %user_id, "profile update failed");
            Err(ApiError::UpdateFailed)
        }
    }
}
