use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

/// A link between a user and an identity provider account.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Account {
    pub id: Uuid,
    pub user_id: Uuid,
    pub provider: String,
    pub provider_account_id: String,
    pub created_at: OffsetDateTime,
}

impl Account {
    pub async fn find(
        db: &PgPool,
        provider: &str,
        provider_account_id: &str,
    ) -> anyhow::Result<Option<Account>> {
        let account = sqlx::query_as::<_, Account>(
            r#"
            SELECT id, user_id, provider, provider_account_id, created_at
            FROM accounts
            WHERE provider = $1 AND provider_account_id = $2
            "#,
        )
        .bind(provider)
        .bind(provider_account_id)
        .fetch_optional(db)
        .await?;
        Ok(account)
    }

    /// Link a provider identity to a user. Linking the same identity twice is
    /// a no-op thanks to the unique (provider, provider_account_id) key.
    pub async fn link(
        db: &PgPool,
        user_id: Uuid,
        provider: &str,
        provider_account_id: &str,
    ) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO accounts (user_id, provider, provider_account_id)
            VALUES ($1, $2, $3)
            ON CONFLICT (provider, provider_account_id) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(provider)
        .bind(provider_account_id)
        .execute(db)
        .await?;
        Ok(())
    }
}
