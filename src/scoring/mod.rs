use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub mod dto;
pub mod handlers;
mod predict;
pub mod service;
mod types;

pub use dto::ScoreResult;
pub use predict::PredictClient;
pub use types::{IncompleteProfile, ScoreError, ScoreProvider, ScoreUserPayload};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/score", post(handlers::request_score))
        .route(
            "/result",
            get(handlers::get_result).delete(handlers::clear_result),
        )
}
