use anyhow::Result;
use serde::Deserialize;

pub mod http;
pub mod mock;

#[derive(Debug, Clone, Deserialize)]
pub struct BridgeOutcome {
    pub status: String,
    #[serde(rename = "transactionId", default)]
    pub transaction_id: Option<String>,
    #[serde(rename = "errorMessage", default)]
    pub error_message: Option<String>,
}

/// Hardware tap-to-pay SDK handle. Opaque: the bridge drives the physical
/// terminal interaction and reports one terminal outcome per payment.
#[async_trait::async_trait]
pub trait TapBridge: Send + Sync {
    async fn initialize(&self) -> Result<bool>;

    async fn start_payment(&self, amount_minor: i64, currency: &str) -> Result<BridgeOutcome>;
}
