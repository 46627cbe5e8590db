use axum::{
    extract::{FromRef, State},
    routing::post,
    Json, Router,
};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, instrument, warn};

use crate::{error::ApiError, state::AppState, users::bmi, users::repo::{NewUser, User}};

use super::{
    dto::{AuthResponse, FederatedRequest, LoginRequest, PublicUser, SignupRequest},
    jwt::JwtKeys,
    password::{hash_password, validate_strength, verify_password},
    repo::Account,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/auth/federated", post(federated))
}

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

#[instrument(skip(state, payload))]
pub async fn signup(
    State(state): State<AppState>,
    Json(mut payload): Json<SignupRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    payload.email = payload.email.trim().to_lowercase();

    if payload.name.trim().is_empty() || payload.email.is_empty() || payload.password.is_empty() {
        return Err(ApiError::Validation("Missing required fields".into()));
    }
    if !is_valid_email(&payload.email) {
        warn!(email = %payload.email, "invalid email");
        return Err(ApiError::Validation("Invalid email".into()));
    }
    validate_strength(&payload.password).map_err(|msg| ApiError::Validation(msg.into()))?;
    if !payload.confirm_password.is_empty() && payload.password != payload.confirm_password {
        return Err(ApiError::Validation("Passwords do not match".into()));
    }

    if User::find_by_email(&state.db, &payload.email)
        .await
        .map_err(ApiError::Internal)?
        .is_some()
    {
        warn!(email = %payload.email, "email already registered");
        return Err(ApiError::EmailExists);
    }

    let hash = hash_password(&payload.password).map_err(ApiError::Internal)?;

    // BMI is derived once here; the profile-edit flow never recomputes it.
    let bmi = match (payload.height, payload.weight) {
        (Some(h), Some(w)) => bmi::compute(h, w),
        _ => None,
    };

    let new = NewUser {
        email: payload.email.clone(),
        name: payload.name.trim().to_string(),
        password_hash: hash,
        age: payload.age,
        gender: payload.gender.clone(),
        height: payload.height,
        weight: payload.weight,
        bmi,
        sugar_level: payload.sugar_level,
        has_diabetes: payload.diabetes,
        has_hypertension: payload.hypertension,
        cholesterol: payload.cholesterol,
        activity_level: payload.activity_level.clone(),
    };

    let user = User::create(&state.db, &new)
        .await
        .map_err(ApiError::Internal)?;

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign(user.id).map_err(ApiError::Internal)?;

    info!(user_id = %user.id, email = %user.email, "user signed up");
    Ok(Json(AuthResponse {
        success: true,
        token,
        user: PublicUser {
            id: user.id,
            email: user.email,
        },
    }))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(mut payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    payload.email = payload.email.trim().to_lowercase();

    if payload.email.is_empty() || payload.password.is_empty() {
        return Err(ApiError::MissingFields);
    }

    let user = User::find_by_email(&state.db, &payload.email)
        .await
        .map_err(ApiError::Internal)?
        .ok_or_else(|| {
            warn!(email = %payload.email, "login unknown email");
            ApiError::NoSuchUser
        })?;

    let Some(hash) = user.password_hash.as_deref() else {
        // Federated-only account: there is no password to match.
        warn!(email = %payload.email, user_id = %user.id, "login against passwordless account");
        return Err(ApiError::InvalidPassword);
    };

    let ok = verify_password(&payload.password, hash).map_err(ApiError::Internal)?;
    if !ok {
        warn!(email = %payload.email, user_id = %user.id, "login invalid password");
        return Err(ApiError::InvalidPassword);
    }

    // First credential login after signup: make sure the credentials link
    // exists so federated sign-in can find it later.
    if Account::find(&state.db, "credentials", &user.email)
        .await
        .map_err(ApiError::Internal)?
        .is_none()
    {
        Account::link(&state.db, user.id, "credentials", &user.email)
            .await
            .map_err(ApiError::Internal)?;
    }

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign(user.id).map_err(ApiError::Internal)?;

    info!(user_id = %user.id, email = %user.email, "user logged in");
    Ok(Json(AuthResponse {
        success: true,
        token,
        user: PublicUser {
            id: user.id,
            email: user.email,
        },
    }))
}

/// Completes a federated sign-in. The identity itself was verified by the
/// external provider; this endpoint only finds or creates the local user and
/// auto-links the identity to an existing account with the same email.
#[instrument(skip(state, payload))]
pub async fn federated(
    State(state): State<AppState>,
    Json(payload): Json<FederatedRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let email = payload.email.trim().to_lowercase();
    if payload.provider.is_empty() || payload.provider_account_id.is_empty() || email.is_empty() {
        return Err(ApiError::Validation("Missing identity fields".into()));
    }
    if !is_valid_email(&email) {
        return Err(ApiError::Validation("Invalid email".into()));
    }

    let existing = Account::find(&state.db, &payload.provider, &payload.provider_account_id)
        .await
        .map_err(ApiError::Internal)?;

    let user = match existing {
        Some(account) => User::find_by_id(&state.db, account.user_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or(ApiError::UserNotFound)?,
        None => {
            let user = match User::find_by_email(&state.db, &email)
                .await
                .map_err(ApiError::Internal)?
            {
                Some(user) => user,
                None => {
                    let name = payload.name.as_deref().unwrap_or(&email);
                    User::create_federated(&state.db, &email, name)
                        .await
                        .map_err(ApiError::Internal)?
                }
            };
            Account::link(&state.db, user.id, &payload.provider, &payload.provider_account_id)
                .await
                .map_err(ApiError::Internal)?;
            info!(user_id = %user.id, provider = %payload.provider, "federated identity linked");
            user
        }
    };

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign(user.id).map_err(ApiError::Internal)?;

    Ok(Json(AuthResponse {
        success: true,
        token,
        user: PublicUser {
            id: user.id,
            email: user.email,
        },
    }))
}
