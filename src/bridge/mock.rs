use crate::bridge::{BridgeOutcome, TapBridge};
use anyhow::Result;

pub struct MockBridge {
    pub behavior: String,
}

#[async_trait::async_trait]
impl TapBridge for MockBridge {
    async fn initialize(&self) -> Result<bool> {
        Ok(self.behavior != "INIT_FAILURE")
    }

    async fn start_payment(&self, _amount_minor: i64, _currency: &str) -> Result<BridgeOutcome> {
        let outcome = match self.behavior.as_str() {
            "ALWAYS_FAILURE" => BridgeOutcome {
                status: "failed".to_string(),
                transaction_id: None,
                error_message: Some("mock decline".to_string()),
            },
            "ALWAYS_CANCELLED" => BridgeOutcome {
                status: "cancelled".to_string(),
                transaction_id: None,
                error_message: Some("mock cancel".to_string()),
            },
            _ => BridgeOutcome {
                status: "completed".to_string(),
                transaction_id: Some(format!("mock_txn_{}", uuid::Uuid::new_v4())),
                error_message: None,
            },
        };

        Ok(outcome)
    }
}
