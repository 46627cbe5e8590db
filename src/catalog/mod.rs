use axum::{routing::get, Router};

use crate::state::AppState;

pub mod handlers;
pub mod na;
mod openfoodfacts;
mod types;

pub use openfoodfacts::OpenFoodFactsClient;
pub use types::{CatalogError, Product, ProductLookup};

pub fn router() -> Router<AppState> {
    Router::new().route("/product/:barcode", get(handlers::get_product))
}
