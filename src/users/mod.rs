use axum::{routing::get, Router};

use crate::state::AppState;

pub mod bmi;
pub mod dto;
pub mod handlers;
pub mod repo;

pub fn router() -> Router<AppState> {
    Router::new().route(
        "/user/profile",
        get(handlers::get_profile).put(handlers::update_profile),
    )
}
