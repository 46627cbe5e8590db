use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt: JwtConfig,
    /// Base URL of the public product catalog (Open Food Facts).
    pub catalog_base_url: String,
    /// Endpoint of the external scoring service.
    pub scorer_url: String,
    /// Directory holding the client-resident result slot and history log.
    pub local_store_path: String,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET")?,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "nutriscore".into()),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "nutriscore-users".into()),
            ttl_minutes: std::env::var("JWT_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(60),
        };
        Ok(Self {
            database_url,
            jwt,
            catalog_base_url: std::env::var("CATALOG_BASE_URL")
                .unwrap_or_else(|_| "https://world.openfoodfacts.org".into()),
            scorer_url: std::env::var("SCORER_URL")
                .unwrap_or_else(|_| "http://localhost:5000/predict".into()),
            local_store_path: std::env::var("LOCAL_STORE_PATH")
                .unwrap_or_else(|_| "./data".into()),
        })
    }
}
