use crate::bridge::TapBridge;
use crate::domain::checkout::{normalize, PaymentResult, PaymentStatus};
use crate::gateways::{audit_status, map_vendor_status, record_best_effort};
use crate::repo::transaction_log_repo::{TransactionLog, TransactionLogEntry};
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeState {
    Uninitialized,
    Initializing,
    Ready,
    AwaitingHardware,
}

pub struct BridgeGateway {
    bridge: Arc<dyn TapBridge>,
    log: Arc<dyn TransactionLog>,
    state: RwLock<BridgeState>,
    merchant_id: RwLock<Option<String>>,
}

impl BridgeGateway {
    pub fn new(bridge: Arc<dyn TapBridge>, log: Arc<dyn TransactionLog>) -> Self {
        Self {
            bridge,
            log,
            state: RwLock::new(BridgeState::Uninitialized),
            merchant_id: RwLock::new(None),
        }
    }

    pub async fn state(&self) -> BridgeState {
        *self.state.read().await
    }

    pub async fn initialize(&self, merchant_id: &str) -> anyhow::Result<bool> {
        {
            let mut state = self.state.write().await;
            *state = BridgeState::Initializing;
        }

        match self.bridge.initialize().await {
            Ok(true) => {
                *self.merchant_id.write().await = Some(merchant_id.to_string());
                *self.state.write().await = BridgeState::Ready;
                Ok(true)
            }
            Ok(false) => {
                *self.state.write().await = BridgeState::Uninitialized;
                Ok(false)
            }
            Err(err) => {
                *self.state.write().await = BridgeState::Uninitialized;
                Err(err)
            }
        }
    }

    pub async fn start_payment(&self, amount_minor: i64, currency: &str) -> PaymentResult {
        let merchant_id = match self.guard_ready().await {
            Ok(id) => id,
            Err(result) => return result,
        };

        *self.state.write().await = BridgeState::AwaitingHardware;

        let result = match self.bridge.start_payment(amount_minor, currency).await {
            Ok(outcome) => {
                let status = map_vendor_status(&outcome.status);
                normalize(PaymentResult {
                    success: matches!(status, PaymentStatus::Completed | PaymentStatus::Pending),
                    transaction_id: outcome.transaction_id,
                    status,
                    error: outcome.error_message,
                })
            }
            Err(err) => PaymentResult::failed(err.to_string()),
        };

        *self.state.write().await = BridgeState::Ready;

        record_best_effort(
            &self.log,
            TransactionLogEntry {
                merchant_id,
                transaction_id: result.transaction_id.clone(),
                amount_minor,
                currency: currency.to_string(),
                payment_method: "TAP_TO_PAY".to_string(),
                gateway: "bridge".to_string(),
                status: audit_status(&result.status).to_string(),
                error_message: result.error.clone(),
            },
        )
        .await;

        result
    }

    // startPayment before a successful initialize is a signaled error, never
    // a silent no-op.
    async fn guard_ready(&self) -> Result<String, PaymentResult> {
        let state = *self.state.read().await;
        if !matches!(state, BridgeState::Ready) {
            return Err(PaymentResult::failed("bridge not initialized"));
        }

        match self.merchant_id.read().await.clone() {
            Some(id) => Ok(id),
            None => Err(PaymentResult::failed("bridge not configured with a merchant")),
        }
    }
}
