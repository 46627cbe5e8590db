use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use super::types::{CatalogError, Product, ProductLookup};

const LOOKUP_TIMEOUT: Duration = Duration::from_secs(10);
const USER_AGENT: &str = concat!("nutriscore/", env!("CARGO_PKG_VERSION"));

/// Client for the Open Food Facts product catalog. No caching: every scan
/// re-fetches, even for a repeated barcode.
pub struct OpenFoodFactsClient {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct CatalogResponse {
    #[serde(default)]
    status: i64,
    product: Option<CatalogProduct>,
}

#[derive(Debug, Deserialize)]
struct CatalogProduct {
    code: Option<String>,
    product_name: Option<String>,
    #[serde(default)]
    nutriments: Nutriments,
    ingredients_text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct Nutriments {
    #[serde(default, with = "super::na")]
    sugars_100g: Option<f64>,
    #[serde(default, with = "super::na")]
    sodium_100g: Option<f64>,
}

impl OpenFoodFactsClient {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(LOOKUP_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl ProductLookup for OpenFoodFactsClient {
    async fn lookup(&self, barcode: &str) -> Result<Product, CatalogError> {
        let code = barcode.trim();
        if code.is_empty() || !code.chars().all(|c| c.is_ascii_digit()) {
            return Err(CatalogError::InvalidBarcode);
        }

        let url = format!("{}/api/v0/product/{}.json", self.base_url, code);
        debug!(%url, "catalog lookup");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(CatalogError::Network)?;

        let body: CatalogResponse = response.json().await.map_err(|e| {
            warn!(error = %e, barcode = %code, "catalog returned malformed body");
            CatalogError::Network(e)
        })?;

        into_product(code, body)
    }
}

fn into_product(barcode: &str, body: CatalogResponse) -> Result<Product, CatalogError> {
    if body.status != 1 {
        return Err(CatalogError::NotFound);
    }
    let found = body.product.ok_or(CatalogError::NotFound)?;
    Ok(Product {
        barcode: found.code.unwrap_or_else(|| barcode.to_string()),
        name: found
            .product_name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| "N/A".to_string()),
        sugar: found.nutriments.sugars_100g,
        sodium: found.nutriments.sodium_100g,
        ingredients: found
            .ingredients_text
            .filter(|i| !i.trim().is_empty())
            .unwrap_or_else(|| "N/A".to_string()),
    })
}
