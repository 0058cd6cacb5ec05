use crate::domain::credentials::{
    CredentialsUpdate, MerchantCredentials, SaveReport, SaveStatus,
};
use crate::repo::credentials_repo::{CredentialsRepo, CredentialsRow};
use crate::repo::wallet_credentials_repo::{WalletCredentialsRepo, WalletCredentialsRow};
use tokio::sync::RwLock;

pub struct CredentialStore {
    credentials_repo: CredentialsRepo,
    wallet_repo: WalletCredentialsRepo,
    cached: RwLock<Option<MerchantCredentials>>,
}

impl CredentialStore {
    pub fn new(credentials_repo: CredentialsRepo, wallet_repo: WalletCredentialsRepo) -> Self {
        Self {
            credentials_repo,
            wallet_repo,
            cached: RwLock::new(None),
        }
    }

    pub async fn cached(&self) -> Option<MerchantCredentials> {
        self.cached.read().await.clone()
    }

    /// Two independent fetches merged into one logical record. A single
    /// failed fetch degrades to "fields absent"; only both failing yields
    /// None. No stored rows at all is still a valid all-defaults record.
    pub async fn load(&self, merchant_id: &str) -> Option<MerchantCredentials> {
        let primary = self.credentials_repo.fetch(merchant_id).await;
        let wallet = self.wallet_repo.fetch(merchant_id).await;

        if primary.is_err() && wallet.is_err() {
            tracing::error!("both credential fetches failed for merchant {}", merchant_id);
            return None;
        }

        let primary = match primary {
            Ok(row) => row,
            Err(err) => {
                tracing::warn!("credentials fetch failed: {}", err);
                None
            }
        };
        let wallet = match wallet {
            Ok(row) => row,
            Err(err) => {
                tracing::warn!("wallet credentials fetch failed: {}", err);
                None
            }
        };

        let merged = merge_credentials(merchant_id, primary, wallet);
        *self.cached.write().await = Some(merged.clone());
        Some(merged)
    }

    /// Best-effort dual-table upsert: a secondary (wallet) failure never
    /// rolls back the primary write. The report carries both outcomes.
    pub async fn save(&self, merchant_id: &str, update: CredentialsUpdate) -> SaveReport {
        let current = self
            .load(merchant_id)
            .await
            .unwrap_or_else(|| MerchantCredentials::empty(merchant_id));
        let next = apply_update(current, update);

        let primary = match self
            .credentials_repo
            .upsert(merchant_id, &next.tap_vendor, &next.cbdc_vendor, &next.flags)
            .await
        {
            Ok(()) => SaveStatus::Saved,
            Err(err) => {
                tracing::warn!("primary credentials save failed: {}", err);
                SaveStatus::Failed(err.to_string())
            }
        };

        let secondary = match self.wallet_repo.upsert(merchant_id, &next.wallet_vendor).await {
            Ok(()) => SaveStatus::Saved,
            Err(err) => {
                tracing::warn!("wallet credentials save failed: {}", err);
                SaveStatus::Failed(err.to_string())
            }
        };

        self.load(merchant_id).await;

        SaveReport { primary, secondary }
    }
}

pub fn merge_credentials(
    merchant_id: &str,
    primary: Option<CredentialsRow>,
    wallet: Option<WalletCredentialsRow>,
) -> MerchantCredentials {
    let mut merged = MerchantCredentials::empty(merchant_id);

    if let Some(row) = primary {
        merged.tap_vendor = row.tap_vendor;
        merged.cbdc_vendor = row.cbdc_vendor;
        merged.flags = row.flags;
        merged.created_at = Some(row.created_at);
        merged.updated_at = Some(row.updated_at);
    }

    if let Some(row) = wallet {
        merged.wallet_vendor = row.wallet_vendor;
        if merged.updated_at.map_or(true, |t| row.updated_at > t) {
            merged.updated_at = Some(row.updated_at);
        }
    }

    merged
}

pub fn apply_update(mut current: MerchantCredentials, update: CredentialsUpdate) -> MerchantCredentials {
    if let Some(tap) = update.tap_vendor {
        current.tap_vendor = tap;
    }
    if let Some(cbdc) = update.cbdc_vendor {
        current.cbdc_vendor = cbdc;
    }
    if let Some(wallet) = update.wallet_vendor {
        current.wallet_vendor = wallet;
    }
    if let Some(flags) = update.flags {
        current.flags = flags;
    }
    current
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::credentials::{FeatureFlags, VendorCredentials};
    use chrono::Utc;

    #[test]
    fn merge_with_no_rows_yields_defaults() {
        let merged = merge_credentials("m1", None, None);
        assert_eq!(merged.merchant_id, "m1");
        assert!(merged.tap_vendor.username.is_none());
        assert!(merged.wallet_vendor.base_url.is_none());
        assert!(!merged.flags.use_bridge);
        assert!(!merged.flags.use_cbdc);
    }

    #[test]
    fn wallet_row_survives_missing_primary() {
        let wallet = WalletCredentialsRow {
            merchant_id: "m1".to_string(),
            wallet_vendor: VendorCredentials {
                username: Some("w".to_string()),
                password: Some("p".to_string()),
                base_url: Some("https://wallet.example".to_string()),
            },
            updated_at: Utc::now(),
        };

        let merged = merge_credentials("m1", None, Some(wallet));
        assert_eq!(merged.wallet_vendor.username.as_deref(), Some("w"));
        assert!(merged.tap_vendor.username.is_none());
    }

    #[test]
    fn update_only_touches_provided_sections() {
        let mut current = MerchantCredentials::empty("m1");
        current.tap_vendor.username = Some("existing".to_string());

        let next = apply_update(
            current,
            CredentialsUpdate {
                tap_vendor: None,
                cbdc_vendor: None,
                wallet_vendor: None,
                flags: Some(FeatureFlags {
                    use_bridge: true,
                    use_cbdc: false,
                    apple_pay_enabled: false,
                    google_pay_enabled: false,
                }),
            },
        );

        assert_eq!(next.tap_vendor.username.as_deref(), Some("existing"));
        assert!(next.flags.use_bridge);
    }
}
