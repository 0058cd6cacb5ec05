mod common;

use checkout_gateway::domain::checkout::{CheckoutRequest, PaymentMethod, PaymentStatus};
use checkout_gateway::gateways::cbdc::{CbdcGateway, CANCEL_PENDING_MAPS_TO};
use checkout_gateway::invoke::InvokeResponse;
use common::{CannedInvoker, MemoryLog};
use std::sync::Arc;

fn gateway(response: InvokeResponse) -> CbdcGateway {
    CbdcGateway::new(Arc::new(CannedInvoker::new(response)), Arc::new(MemoryLog::new()))
}

fn vendor(success: bool, status: &str, transaction_id: Option<&str>) -> InvokeResponse {
    InvokeResponse {
        success,
        transaction_id: transaction_id.map(str::to_string),
        status: Some(status.to_string()),
        error: None,
    }
}

fn request() -> CheckoutRequest {
    CheckoutRequest {
        merchant_id: "m1".to_string(),
        amount_minor: 500,
        currency: "TTD".to_string(),
        payment_method: PaymentMethod::Cbdc,
        cart_items: serde_json::json!([]),
        metadata: serde_json::json!({}),
    }
}

#[tokio::test]
async fn initiate_passes_vendor_pending_through() {
    let gateway = gateway(vendor(true, "pending", Some("cbdc_tx_1")));

    let result = gateway.initiate_payment(&request()).await;
    assert!(result.success);
    assert_eq!(result.status, PaymentStatus::Pending);
    assert_eq!(result.transaction_id.as_deref(), Some("cbdc_tx_1"));
}

#[tokio::test]
async fn status_passes_vendor_statuses_through() {
    let completed = gateway(vendor(true, "completed", Some("cbdc_tx_1")));
    let result = completed.transaction_status("m1", "cbdc_tx_1").await;
    assert_eq!(result.status, PaymentStatus::Completed);

    let cancelled = gateway(vendor(false, "cancelled", Some("cbdc_tx_1")));
    let result = cancelled.transaction_status("m1", "cbdc_tx_1").await;
    assert_eq!(result.status, PaymentStatus::Cancelled);
    assert!(!result.success);
}

// Pins the documented choice: a cancel the vendor still reports pending maps
// to the CANCEL_PENDING_MAPS_TO constant, identically on every call.
#[tokio::test]
async fn cancel_maps_vendor_pending_to_the_documented_constant() {
    assert_eq!(CANCEL_PENDING_MAPS_TO, PaymentStatus::Failed);

    let gateway = gateway(vendor(true, "pending", Some("cbdc_tx_1")));

    for _ in 0..3 {
        let result = gateway.cancel_payment("m1", "cbdc_tx_1").await;
        assert_eq!(result.status, CANCEL_PENDING_MAPS_TO);
        assert!(!result.success);
        assert_eq!(
            result.error.as_deref(),
            Some("cancellation still pending at vendor")
        );
    }
}

#[tokio::test]
async fn cancel_passes_a_real_cancellation_through() {
    let gateway = gateway(vendor(false, "cancelled", Some("cbdc_tx_1")));

    let result = gateway.cancel_payment("m1", "cbdc_tx_1").await;
    assert_eq!(result.status, PaymentStatus::Cancelled);
}

#[tokio::test]
async fn initiate_records_an_audit_entry() {
    let log = Arc::new(MemoryLog::new());
    let gateway = CbdcGateway::new(
        Arc::new(CannedInvoker::new(vendor(true, "completed", Some("cbdc_tx_7")))),
        log.clone(),
    );

    let result = gateway.initiate_payment(&request()).await;
    assert!(result.success);

    let recorded = log.recorded();
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0].gateway, "cbdc");
    assert_eq!(recorded[0].status, "success");
    assert_eq!(recorded[0].transaction_id.as_deref(), Some("cbdc_tx_7"));
}
