use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::users::dto::ProfileResponse;

/// The record held in the single current-result slot: the score plus the
/// product and profile snapshot it was computed for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreResult {
    pub health_score: f64,
    pub product: Product,
    pub user: ProfileResponse,
}

/// Body of a score request; the barcode has already been acquired by one of
/// the input modes.
#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    #[serde(default)]
    pub barcode: String,
}

#[derive(Debug, Serialize)]
pub struct ClearResponse {
    pub success: bool,
}
