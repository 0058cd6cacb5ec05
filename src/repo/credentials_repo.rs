use crate::domain::credentials::{FeatureFlags, VendorCredentials};
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};

#[derive(Debug, Clone)]
pub struct CredentialsRow {
    pub merchant_id: String,
    pub tap_vendor: VendorCredentials,
    pub cbdc_vendor: VendorCredentials,
    pub flags: FeatureFlags,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct CredentialsRepo {
    pub pool: PgPool,
}

impl CredentialsRepo {
    pub async fn fetch(&self, merchant_id: &str) -> anyhow::Result<Option<CredentialsRow>> {
        let row = sqlx::query(
            r#"
            SELECT merchant_id, tap_username, tap_password, tap_base_url,
                   cbdc_username, cbdc_password, cbdc_base_url,
                   use_bridge, use_cbdc, apple_pay_enabled, google_pay_enabled,
                   created_at, updated_at
            FROM merchant_credentials
            WHERE merchant_id = $1
            "#,
        )
        .bind(merchant_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| CredentialsRow {
            merchant_id: r.get("merchant_id"),
            tap_vendor: VendorCredentials {
                username: r.get("tap_username"),
                password: r.get("tap_password"),
                base_url: r.get("tap_base_url"),
            },
            cbdc_vendor: VendorCredentials {
                username: r.get("cbdc_username"),
                password: r.get("cbdc_password"),
                base_url: r.get("cbdc_base_url"),
            },
            flags: FeatureFlags {
                use_bridge: r.get("use_bridge"),
                use_cbdc: r.get("use_cbdc"),
                apple_pay_enabled: r.get("apple_pay_enabled"),
                google_pay_enabled: r.get("google_pay_enabled"),
            },
            created_at: r.get("created_at"),
            updated_at: r.get("updated_at"),
        }))
    }

    pub async fn exists(&self, merchant_id: &str) -> anyhow::Result<bool> {
        let row = sqlx::query("SELECT 1 AS one FROM merchant_credentials WHERE merchant_id = $1")
            .bind(merchant_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.is_some())
    }

    pub async fn upsert(
        &self,
        merchant_id: &str,
        tap: &VendorCredentials,
        cbdc: &VendorCredentials,
        flags: &FeatureFlags,
    ) -> anyhow::Result<()> {
        if self.exists(merchant_id).await? {
            sqlx::query(
                r#"
                UPDATE merchant_credentials
                SET tap_username = $2, tap_password = $3, tap_base_url = $4,
                    cbdc_username = $5, cbdc_password = $6, cbdc_base_url = $7,
                    use_bridge = $8, use_cbdc = $9,
                    apple_pay_enabled = $10, google_pay_enabled = $11,
                    updated_at = now()
                WHERE merchant_id = $1
                "#,
            )
            .bind(merchant_id)
            .bind(tap.username.clone())
            .bind(tap.password.clone())
            .bind(tap.base_url.clone())
            .bind(cbdc.username.clone())
            .bind(cbdc.password.clone())
            .bind(cbdc.base_url.clone())
            .bind(flags.use_bridge)
            .bind(flags.use_cbdc)
            .bind(flags.apple_pay_enabled)
            .bind(flags.google_pay_enabled)
            .execute(&self.pool)
            .await?;
        } else {
            sqlx::query(
                r#"
                INSERT INTO merchant_credentials (
                    merchant_id, tap_username, tap_password, tap_base_url,
                    cbdc_username, cbdc_password, cbdc_base_url,
                    use_bridge, use_cbdc, apple_pay_enabled, google_pay_enabled
                ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
                "#,
            )
            .bind(merchant_id)
            .bind(tap.username.clone())
            .bind(tap.password.clone())
            .bind(tap.base_url.clone())
            .bind(cbdc.username.clone())
            .bind(cbdc.password.clone())
            .bind(cbdc.base_url.clone())
            .bind(flags.use_bridge)
            .bind(flags.use_cbdc)
            .bind(flags.apple_pay_enabled)
            .bind(flags.google_pay_enabled)
            .execute(&self.pool)
            .await?;
        }

        Ok(())
    }

    pub async fn update_flags(&self, merchant_id: &str, flags: &FeatureFlags) -> anyhow::Result<()> {
        if self.exists(merchant_id).await? {
            sqlx::query(
                r#"
                UPDATE merchant_credentials
                SET use_bridge = $2, use_cbdc = $3,
                    apple_pay_enabled = $4, google_pay_enabled = $5,
                    updated_at = now()
                WHERE merchant_id = $1
                "#,
            )
            .bind(merchant_id)
            .bind(flags.use_bridge)
            .bind(flags.use_cbdc)
            .bind(flags.apple_pay_enabled)
            .bind(flags.google_pay_enabled)
            .execute(&self.pool)
            .await?;
        } else {
            sqlx::query(
                r#"
                INSERT INTO merchant_credentials (
                    merchant_id, use_bridge, use_cbdc, apple_pay_enabled, google_pay_enabled
                ) VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(merchant_id)
            .bind(flags.use_bridge)
            .bind(flags.use_cbdc)
            .bind(flags.apple_pay_enabled)
            .bind(flags.google_pay_enabled)
            .execute(&self.pool)
            .await?;
        }

        Ok(())
    }
}
