use axum::{
    routing::{delete, get},
    Router,
};

use crate::state::AppState;

pub mod handlers;
pub mod log;
mod store;

pub use log::{DayGroup, HistoryEntry};
pub use store::{LocalStore, HISTORY_KEY, RESULT_KEY};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/history", get(handlers::list_history))
        .route("/history/:time", delete(handlers::delete_entry))
}
