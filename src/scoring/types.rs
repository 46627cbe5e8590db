use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::users::repo::User;

/// The health attributes the external scorer expects, with boolean
/// conditions flattened to 0/1 flags.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreUserPayload {
    pub age: f64,
    pub weight: f64,
    pub height: f64,
    pub sugar_level: f64,
    pub diabetes: u8,
    pub hypertension: u8,
}

/// The profile has not been filled in yet (possible after a federated
/// sign-up), so there is nothing to score against.
#[derive(Debug, Error)]
#[error("Health profile is incomplete")]
pub struct IncompleteProfile;

impl TryFrom<&User> for ScoreUserPayload {
    type Error = IncompleteProfile;

    fn try_from(user: &User) -> Result<Self, Self::Error> {
        Ok(Self {
            age: user.age.ok_or(IncompleteProfile)?,
            weight: user.weight.ok_or(IncompleteProfile)?,
            height: user.height.ok_or(IncompleteProfile)?,
            sugar_level: user.sugar_level.ok_or(IncompleteProfile)?,
            diabetes: user.has_diabetes.unwrap_or(false) as u8,
            hypertension: user.has_hypertension.unwrap_or(false) as u8,
        })
    }
}

#[derive(Debug, Error)]
pub enum ScoreError {
    /// The scorer answered but refused: error body, or a success body with
    /// no score in it.
    #[error("{0}")]
    Rejected(String),
    #[error("Network error. Please ensure the backend is running and reachable.")]
    Network(#[source] reqwest::Error),
}

/// Pluggable scoring contract so the external prediction service can be
/// swapped or mocked in tests.
#[async_trait]
pub trait ScoreProvider: Send + Sync {
    async fn score(&self, user: &ScoreUserPayload, barcode: &str) -> Result<f64, ScoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::OffsetDateTime;
    use uuid::Uuid;

    fn full_user() -> User {
        User {
            id: Uuid::new_v4(),
            email: "t@example.com".into(),
            name: "T".into(),
            password_hash: None,
            age: Some(30.0),
            gender: Some("male".into()),
            height: Some(170.0),
            weight: Some(70.0),
            bmi: Some(24.2),
            sugar_level: Some(90.0),
            has_diabetes: Some(true),
            has_hypertension: Some(false),
            cholesterol: Some(false),
            activity_level: Some("low".into()),
            created_at: OffsetDateTime::now_utc(),
        }
    }

    #[test]
    fn payload_flattens_conditions_to_flags() {
        let payload = ScoreUserPayload::try_from(&full_user()).unwrap();
        assert_eq!(payload.diabetes, 1);
        assert_eq!(payload.hypertension, 0);

        let json = serde_json::to_string(&payload).unwrap();
        assert!(json.contains(r#""sugar_level":90.0"#));
        assert!(json.contains(r#""diabetes":1"#));
    }

    #[test]
    fn incomplete_profile_is_rejected() {
        let mut user = full_user();
        user.weight = None;
        assert!(ScoreUserPayload::try_from(&user).is_err());
    }

    #[test]
    fn missing_condition_flags_default_to_absent() {
        let mut user = full_user();
        user.has_diabetes = None;
        let payload = ScoreUserPayload::try_from(&user).unwrap();
        assert_eq!(payload.diabetes, 0);
    }
}
