use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::types::{ScoreError, ScoreProvider, ScoreUserPayload};

const SCORE_TIMEOUT: Duration = Duration::from_secs(10);
const FALLBACK_ERROR: &str = "Could not calculate NutriScore.";

/// Client for the external prediction endpoint.
pub struct PredictClient {
    client: reqwest::Client,
    url: String,
}

#[derive(Debug, Serialize)]
struct PredictRequest<'a> {
    user: &'a ScoreUserPayload,
    barcode: &'a str,
}

#[derive(Debug, Deserialize)]
struct PredictResponse {
    health_score: Option<f64>,
    error: Option<String>,
}

impl PredictClient {
    pub fn new(url: &str) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(SCORE_TIMEOUT).build()?;
        Ok(Self {
            client,
            url: url.to_string(),
        })
    }
}

#[async_trait]
impl ScoreProvider for PredictClient {
    async fn score(&self, user: &ScoreUserPayload, barcode: &str) -> Result<f64, ScoreError> {
        debug!(url = %self.url, barcode, "requesting score");
        let response = self
            .client
            .post(&self.url)
            .json(&PredictRequest { user, barcode })
            .send()
            .await
            .map_err(ScoreError::Network)?;

        let ok = response.status().is_success();
        let body: PredictResponse = response.json().await.map_err(ScoreError::Network)?;
        interpret(ok, body)
    }
}

fn interpret(status_ok: bool, body: PredictResponse) -> Result<f64, ScoreError> {
    match body.health_score {
        Some(score) if status_ok => Ok(score),
        _ => Err(ScoreError::Rejected(
            body.error.unwrap_or_else(|| FALLBACK_ERROR.to_string()),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_payload_matches_the_scorer_contract() {
        let user = ScoreUserPayload {
            age: 30.0,
            weight: 70.0,
            height: 170.0,
            sugar_level: 90.0,
            diabetes: 0,
            hypertension: 1,
        };
        let json = serde_json::to_value(PredictRequest {
            user: &user,
            barcode: "4006381333931",
        })
        .unwrap();

        assert_eq!(json["barcode"], "4006381333931");
        assert_eq!(json["user"]["sugar_level"], 90.0);
        assert_eq!(json["user"]["hypertension"], 1);
    }

    #[test]
    fn success_body_yields_the_score() {
        let body: PredictResponse = serde_json::from_str(r#"{"health_score": 72.4}"#).unwrap();
        let score = interpret(true, body).unwrap();
        assert_eq!(score, 72.4);
    }

    #[test]
    fn error_body_surfaces_the_server_message() {
        let body: PredictResponse =
            serde_json::from_str(r#"{"error": "'user' data is required"}"#).unwrap();
        match interpret(false, body) {
            Err(ScoreError::Rejected(msg)) => assert_eq!(msg, "'user' data is required"),
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[test]
    fn missing_score_field_falls_back_to_generic_message() {
        let body: PredictResponse = serde_json::from_str(r#"{}"#).unwrap();
        match interpret(true, body) {
            Err(ScoreError::Rejected(msg)) => assert_eq!(msg, FALLBACK_ERROR),
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[test]
    fn score_in_a_failed_response_is_not_trusted() {
        let body: PredictResponse =
            serde_json::from_str(r#"{"health_score": 10.0, "error": "stale model"}"#).unwrap();
        assert!(interpret(false, body).is_err());
    }
}
