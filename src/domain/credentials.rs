use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VendorCredentials {
    pub username: Option<String>,
    pub password: Option<String>,
    pub base_url: Option<String>,
}

impl VendorCredentials {
    pub fn is_configured(&self) -> bool {
        self.username.is_some() && self.password.is_some() && self.base_url.is_some()
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct FeatureFlags {
    pub use_bridge: bool,
    pub use_cbdc: bool,
    pub apple_pay_enabled: bool,
    pub google_pay_enabled: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MerchantCredentials {
    pub merchant_id: String,
    pub tap_vendor: VendorCredentials,
    pub cbdc_vendor: VendorCredentials,
    pub wallet_vendor: VendorCredentials,
    pub flags: FeatureFlags,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl MerchantCredentials {
    pub fn empty(merchant_id: &str) -> Self {
        Self {
            merchant_id: merchant_id.to_string(),
            tap_vendor: VendorCredentials::default(),
            cbdc_vendor: VendorCredentials::default(),
            wallet_vendor: VendorCredentials::default(),
            flags: FeatureFlags::default(),
            created_at: None,
            updated_at: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CredentialsUpdate {
    #[serde(default)]
    pub tap_vendor: Option<VendorCredentials>,
    #[serde(default)]
    pub cbdc_vendor: Option<VendorCredentials>,
    #[serde(default)]
    pub wallet_vendor: Option<VendorCredentials>,
    #[serde(default)]
    pub flags: Option<FeatureFlags>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "error", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SaveStatus {
    Saved,
    Failed(String),
}

impl SaveStatus {
    pub fn is_saved(&self) -> bool {
        matches!(self, SaveStatus::Saved)
    }
}

/// Per-table outcome of a credentials save. The wallet table write is
/// best-effort: a secondary failure never rolls back the primary.
#[derive(Debug, Clone, Serialize)]
pub struct SaveReport {
    pub primary: SaveStatus,
    pub secondary: SaveStatus,
}

impl SaveReport {
    pub fn fully_saved(&self) -> bool {
        self.primary.is_saved() && self.secondary.is_saved()
    }
}
