use axum::{
    extract::{Path, State},
    Json,
};
use tracing::instrument;

use crate::{auth::jwt::AuthUser, error::ApiError, state::AppState};

use super::types::{CatalogError, Product};

impl From<CatalogError> for ApiError {
    fn from(e: CatalogError) -> Self {
        match e {
            CatalogError::InvalidBarcode => ApiError::Validation(e.to_string()),
            CatalogError::NotFound => ApiError::ProductNotFound,
            CatalogError::Network(_) => ApiError::CatalogUnavailable,
        }
    }
}

#[instrument(skip(state))]
pub async fn get_product(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
    Path(barcode): Path<String>,
) -> Result<Json<Product>, ApiError> {
    let product = state.catalog.lookup(&barcode).await?;
    Ok(Json(product))
}
