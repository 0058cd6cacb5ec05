use crate::domain::credentials::FeatureFlags;

/// Platform-level wallet availability. Availability to the merchant is the
/// platform capability AND the per-merchant flag.
#[derive(Debug, Clone, Copy)]
pub struct WalletCapabilities {
    pub apple_pay_supported: bool,
    pub google_pay_supported: bool,
}

impl WalletCapabilities {
    pub fn from_env() -> Self {
        Self {
            apple_pay_supported: env_bool("APPLE_PAY_SUPPORTED"),
            google_pay_supported: env_bool("GOOGLE_PAY_SUPPORTED"),
        }
    }

    pub fn is_apple_pay_available(&self, flags: &FeatureFlags) -> bool {
        self.apple_pay_supported && flags.apple_pay_enabled
    }

    pub fn is_google_pay_available(&self, flags: &FeatureFlags) -> bool {
        self.google_pay_supported && flags.google_pay_enabled
    }
}

fn env_bool(name: &str) -> bool {
    std::env::var(name)
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}
