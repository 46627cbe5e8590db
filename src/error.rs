use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Request-boundary error type. Every failure a handler can produce maps to
/// one variant, each with a stable machine-readable code so clients can
/// branch on the kind of failure rather than the message text.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Missing credentials")]
    MissingFields,
    #[error("No such user found")]
    NoSuchUser,
    #[error("Invalid password")]
    InvalidPassword,
    #[error("Email already exists")]
    EmailExists,
    #[error("Not authenticated")]
    Unauthenticated,
    #[error("User not found")]
    UserNotFound,
    #[error("{0}")]
    Validation(String),
    #[error("No product details found for this barcode.")]
    ProductNotFound,
    #[error("Network error. Could not fetch product details.")]
    CatalogUnavailable,
    #[error("{0}")]
    ScoreRejected(String),
    #[error("Network error. Please ensure the backend is running and reachable.")]
    ScorerUnavailable,
    #[error("No score result available")]
    NoResult,
    #[error("Failed to update profile")]
    UpdateFailed,
    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::MissingFields => "missing_fields",
            ApiError::NoSuchUser => "no_such_user",
            ApiError::InvalidPassword => "invalid_password",
            ApiError::EmailExists => "email_exists",
            ApiError::Unauthenticated => "unauthenticated",
            ApiError::UserNotFound => "user_not_found",
            ApiError::Validation(_) => "validation",
            ApiError::ProductNotFound => "product_not_found",
            ApiError::CatalogUnavailable => "catalog_unavailable",
            ApiError::ScoreRejected(_) => "score_rejected",
            ApiError::ScorerUnavailable => "scorer_unavailable",
            ApiError::NoResult => "no_result",
            ApiError::UpdateFailed => "update_failed",
            ApiError::Internal(_) => "internal",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingFields | ApiError::EmailExists | ApiError::Validation(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::NoSuchUser
            | ApiError::UserNotFound
            | ApiError::ProductNotFound
            | ApiError::NoResult => StatusCode::NOT_FOUND,
            ApiError::InvalidPassword | ApiError::Unauthenticated => StatusCode::UNAUTHORIZED,
            ApiError::CatalogUnavailable
            | ApiError::ScoreRejected(_)
            | ApiError::ScorerUnavailable => StatusCode::BAD_GATEWAY,
            ApiError::UpdateFailed | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(code = self.code(), error = %self, "request failed");
        } else {
            tracing::warn!(code = self.code(), error = %self, "request rejected");
        }
        let body = Json(json!({
            "success": false,
            "error": self.to_string(),
            "code": self.code(),
        }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_failures_are_distinguishable_by_code() {
        assert_ne!(ApiError::NoSuchUser.code(), ApiError::InvalidPassword.code());
        assert_ne!(ApiError::NoSuchUser.code(), ApiError::MissingFields.code());
        assert_ne!(ApiError::InvalidPassword.code(), ApiError::MissingFields.code());
    }

    #[test]
    fn duplicate_email_is_not_a_generic_failure() {
        let dup = ApiError::EmailExists;
        let generic = ApiError::Internal(anyhow::anyhow!("boom"));
        assert_ne!(dup.code(), generic.code());
        assert_eq!(dup.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn statuses_match_the_api_contract() {
        assert_eq!(ApiError::MissingFields.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::NoSuchUser.status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::InvalidPassword.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::Unauthenticated.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::UpdateFailed.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
