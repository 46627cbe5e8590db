use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A product resolved from the public catalog. Fetched fresh per scan, never
/// persisted server-side. Missing nutrient values stay `None` and serialize
/// as the "N/A" sentinel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub barcode: String,
    pub name: String,
    #[serde(with = "super::na")]
    pub sugar: Option<f64>,
    #[serde(with = "super::na")]
    pub sodium: Option<f64>,
    pub ingredients: String,
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Barcode must contain only digits")]
    InvalidBarcode,
    #[error("No product details found for this barcode.")]
    NotFound,
    #[error("Network error. Could not fetch product details.")]
    Network(#[source] reqwest::Error),
}

/// Pluggable catalog contract so the external dependency can be swapped or
/// mocked in tests.
#[async_trait]
pub trait ProductLookup: Send + Sync {
    async fn lookup(&self, barcode: &str) -> Result<Product, CatalogError>;
}
