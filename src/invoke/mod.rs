use anyhow::Result;
use serde::{Deserialize, Serialize};

pub mod http;

#[derive(Debug, Clone, Serialize)]
pub struct InvokeRequest {
    #[serde(rename = "merchantId")]
    pub merchant_id: String,
    pub endpoint: String,
    pub data: serde_json::Value,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct InvokeResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(rename = "transactionId", default)]
    pub transaction_id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// The single network transport boundary: every vendor integration goes
/// through one named remote function.
#[async_trait::async_trait]
pub trait FunctionInvoker: Send + Sync {
    async fn invoke(&self, name: &str, request: InvokeRequest) -> Result<InvokeResponse>;
}
