use crate::domain::credentials::VendorCredentials;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};

#[derive(Debug, Clone)]
pub struct WalletCredentialsRow {
    pub merchant_id: String,
    pub wallet_vendor: VendorCredentials,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct WalletCredentialsRepo {
    pub pool: PgPool,
}

impl WalletCredentialsRepo {
    pub async fn fetch(&self, merchant_id: &str) -> anyhow::Result<Option<WalletCredentialsRow>> {
        let row = sqlx::query(
            r#"
            SELECT merchant_id, wallet_username, wallet_password, wallet_base_url, updated_at
            FROM wallet_credentials
            WHERE merchant_id = $1
            "#,
        )
        .bind(merchant_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| WalletCredentialsRow {
            merchant_id: r.get("merchant_id"),
            wallet_vendor: VendorCredentials {
                username: r.get("wallet_username"),
                password: r.get("wallet_password"),
                base_url: r.get("wallet_base_url"),
            },
            updated_at: r.get("updated_at"),
        }))
    }

    pub async fn upsert(&self, merchant_id: &str, wallet: &VendorCredentials) -> anyhow::Result<()> {
        let exists = sqlx::query("SELECT 1 AS one FROM wallet_credentials WHERE merchant_id = $1")
            .bind(merchant_id)
            .fetch_optional(&self.pool)
            .await?
            .is_some();

        if exists {
            sqlx::query(
                r#"
                UPDATE wallet_credentials
                SET wallet_username = $2, wallet_password = $3, wallet_base_url = $4, updated_at = now()
                WHERE merchant_id = $1
                "#,
            )
            .bind(merchant_id)
            .bind(wallet.username.clone())
            .bind(wallet.password.clone())
            .bind(wallet.base_url.clone())
            .execute(&self.pool)
            .await?;
        } else {
            sqlx::query(
                r#"
                INSERT INTO wallet_credentials (merchant_id, wallet_username, wallet_password, wallet_base_url)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(merchant_id)
            .bind(wallet.username.clone())
            .bind(wallet.password.clone())
            .bind(wallet.base_url.clone())
            .execute(&self.pool)
            .await?;
        }

        Ok(())
    }
}
