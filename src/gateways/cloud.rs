use crate::domain::checkout::{normalize, CheckoutRequest, PaymentResult, PaymentStatus};
use crate::gateways::{audit_status, record_best_effort};
use crate::invoke::{FunctionInvoker, InvokeRequest};
use crate::pending::PendingTable;
use crate::repo::transaction_log_repo::{TransactionLog, TransactionLogEntry};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use uuid::Uuid;

pub const TIMEOUT_ERROR: &str = "payment timeout";

/// Listener-path tap-to-pay gateway. Initiation goes out through the vendor
/// proxy with a locally generated correlation ref; completion arrives
/// out-of-band (webhook) and settles the pending entry, racing the timeout.
pub struct CloudGateway {
    invoker: Arc<dyn FunctionInvoker>,
    log: Arc<dyn TransactionLog>,
    pending: Arc<PendingTable>,
    listeners: broadcast::Sender<PaymentResult>,
    timeout: Duration,
}

impl CloudGateway {
    pub fn new(
        invoker: Arc<dyn FunctionInvoker>,
        log: Arc<dyn TransactionLog>,
        timeout: Duration,
    ) -> Self {
        let (listeners, _) = broadcast::channel(64);
        Self {
            invoker,
            log,
            pending: Arc::new(PendingTable::new()),
            listeners,
            timeout,
        }
    }

    /// Dropping the receiver unsubscribes. Listeners see the Pending
    /// notification and then the terminal result; filter on
    /// `status != Pending` for terminal-only interest.
    pub fn subscribe(&self) -> broadcast::Receiver<PaymentResult> {
        self.listeners.subscribe()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub async fn initiate_payment(&self, request: &CheckoutRequest) -> PaymentResult {
        let transaction_ref = format!("ttp_{}", Uuid::new_v4());
        let receiver = self.pending.register(&transaction_ref);

        let initiation = self
            .invoker
            .invoke(
                "tap-to-pay-proxy",
                InvokeRequest {
                    merchant_id: request.merchant_id.clone(),
                    endpoint: "initiate".to_string(),
                    data: json!({
                        "amount": request.amount_minor,
                        "currency": request.currency,
                        "cartItems": request.cart_items,
                        "metadata": {
                            "transactionRef": transaction_ref,
                            "passthrough": request.metadata,
                        },
                    }),
                },
            )
            .await;

        match initiation {
            Ok(resp) if resp.success => {}
            Ok(resp) => {
                self.pending.remove(&transaction_ref);
                let result = PaymentResult::failed(
                    resp.error.unwrap_or_else(|| "payment initiation rejected".to_string()),
                );
                self.finish(request, &result).await;
                return result;
            }
            Err(err) => {
                self.pending.remove(&transaction_ref);
                let result = PaymentResult::failed(err.to_string());
                self.finish(request, &result).await;
                return result;
            }
        }

        self.notify(&PaymentResult::pending(transaction_ref.clone()));

        let result = match tokio::time::timeout(self.timeout, receiver).await {
            Ok(Ok(settled)) => normalize(settled),
            Ok(Err(_)) => PaymentResult::failed("payment channel closed before settlement"),
            Err(_) => {
                self.pending.remove(&transaction_ref);
                PaymentResult::failed(TIMEOUT_ERROR)
            }
        };

        self.finish(request, &result).await;
        result
    }

    /// Out-of-band completion, driven by the webhook handler. No-op when the
    /// entry already settled or timed out.
    pub fn settle(&self, transaction_ref: &str, result: PaymentResult) -> bool {
        self.pending.settle(transaction_ref, result)
    }

    fn notify(&self, result: &PaymentResult) {
        let _ = self.listeners.send(result.clone());
    }

    async fn finish(&self, request: &CheckoutRequest, result: &PaymentResult) {
        self.notify(result);
        record_best_effort(
            &self.log,
            TransactionLogEntry {
                merchant_id: request.merchant_id.clone(),
                transaction_id: result.transaction_id.clone(),
                amount_minor: request.amount_minor,
                currency: request.currency.clone(),
                payment_method: "TAP_TO_PAY".to_string(),
                gateway: "cloud".to_string(),
                status: audit_status(&result.status).to_string(),
                error_message: result.error.clone(),
            },
        )
        .await;
    }
}

pub fn is_terminal(result: &PaymentResult) -> bool {
    result.status != PaymentStatus::Pending
}
