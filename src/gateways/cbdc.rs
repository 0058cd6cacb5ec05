use crate::domain::checkout::{normalize, CheckoutRequest, PaymentResult, PaymentStatus};
use crate::gateways::{audit_status, map_vendor_status, record_best_effort};
use crate::invoke::{FunctionInvoker, InvokeRequest, InvokeResponse};
use crate::repo::transaction_log_repo::{TransactionLog, TransactionLogEntry};
use serde_json::json;
use std::sync::Arc;

/// A cancel the vendor still reports as pending has not cancelled anything,
/// so the cancel path maps vendor `pending` to Failed. Everywhere else
/// `pending` passes through untouched.
pub const CANCEL_PENDING_MAPS_TO: PaymentStatus = PaymentStatus::Failed;

pub struct CbdcGateway {
    invoker: Arc<dyn FunctionInvoker>,
    log: Arc<dyn TransactionLog>,
}

impl CbdcGateway {
    pub fn new(invoker: Arc<dyn FunctionInvoker>, log: Arc<dyn TransactionLog>) -> Self {
        Self { invoker, log }
    }

    pub async fn initiate_payment(&self, request: &CheckoutRequest) -> PaymentResult {
        let response = self
            .invoker
            .invoke(
                "cbdc-proxy",
                InvokeRequest {
                    merchant_id: request.merchant_id.clone(),
                    endpoint: "initiate".to_string(),
                    data: json!({
                        "amount": request.amount_minor,
                        "currency": request.currency,
                        "cartItems": request.cart_items,
                        "metadata": request.metadata,
                    }),
                },
            )
            .await;

        let result = match response {
            Ok(resp) => map_response(resp),
            Err(err) => PaymentResult::failed(err.to_string()),
        };

        record_best_effort(
            &self.log,
            TransactionLogEntry {
                merchant_id: request.merchant_id.clone(),
                transaction_id: result.transaction_id.clone(),
                amount_minor: request.amount_minor,
                currency: request.currency.clone(),
                payment_method: "CBDC".to_string(),
                gateway: "cbdc".to_string(),
                status: audit_status(&result.status).to_string(),
                error_message: result.error.clone(),
            },
        )
        .await;

        result
    }

    pub async fn transaction_status(&self, merchant_id: &str, transaction_id: &str) -> PaymentResult {
        let response = self
            .invoker
            .invoke(
                "cbdc-proxy",
                InvokeRequest {
                    merchant_id: merchant_id.to_string(),
                    endpoint: "status".to_string(),
                    data: json!({ "transactionId": transaction_id }),
                },
            )
            .await;

        match response {
            Ok(resp) => map_response(resp),
            Err(err) => PaymentResult::failed(err.to_string()),
        }
    }

    pub async fn cancel_payment(&self, merchant_id: &str, transaction_id: &str) -> PaymentResult {
        let response = self
            .invoker
            .invoke(
                "cbdc-proxy",
                InvokeRequest {
                    merchant_id: merchant_id.to_string(),
                    endpoint: "cancel".to_string(),
                    data: json!({ "transactionId": transaction_id }),
                },
            )
            .await;

        match response {
            Ok(resp) => {
                let mut result = map_response(resp);
                if result.status == PaymentStatus::Pending {
                    result.status = CANCEL_PENDING_MAPS_TO;
                    result.error = Some("cancellation still pending at vendor".to_string());
                }
                normalize(result)
            }
            Err(err) => PaymentResult::failed(err.to_string()),
        }
    }
}

fn map_response(resp: InvokeResponse) -> PaymentResult {
    let status = match resp.status.as_deref() {
        Some(s) => map_vendor_status(s),
        None if resp.success => PaymentStatus::Completed,
        None => PaymentStatus::Failed,
    };

    normalize(PaymentResult {
        success: resp.success,
        transaction_id: resp.transaction_id,
        status,
        error: resp.error,
    })
}
