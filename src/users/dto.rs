use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::repo::User;

/// Profile fields exposed to the client. Also the profile snapshot stored
/// alongside a score result, hence the Deserialize.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub age: Option<f64>,
    pub weight: Option<f64>,
    pub height: Option<f64>,
    pub sugar_level: Option<f64>,
    pub has_diabetes: Option<bool>,
    pub has_hypertension: Option<bool>,
    pub gender: Option<String>,
}

impl From<User> for ProfileResponse {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            name: u.name,
            email: u.email,
            age: u.age,
            weight: u.weight,
            height: u.height,
            sugar_level: u.sugar_level,
            has_diabetes: u.has_diabetes,
            has_hypertension: u.has_hypertension,
            gender: u.gender,
        }
    }
}

/// Body of the profile-edit request. Field types are strict: a string where a
/// number is expected fails deserialization and is rejected with 400.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub age: f64,
    pub height: f64,
    pub weight: f64,
    pub sugar_level: f64,
    pub has_diabetes: bool,
    pub has_hypertension: bool,
}

#[derive(Debug, Serialize)]
pub struct UpdateProfileResponse {
    pub message: &'static str,
}
