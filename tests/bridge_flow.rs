mod common;

use checkout_gateway::domain::checkout::PaymentStatus;
use checkout_gateway::gateways::bridge::{BridgeGateway, BridgeState};
use common::{FixedBridge, MemoryLog};
use std::sync::Arc;

#[tokio::test]
async fn start_payment_before_initialize_is_signaled() {
    let log = Arc::new(MemoryLog::new());
    let gateway = BridgeGateway::new(Arc::new(FixedBridge::completing("tx1")), log.clone());

    let result = gateway.start_payment(1000, "TTD").await;
    assert!(!result.success);
    assert_eq!(result.status, PaymentStatus::Failed);
    assert_eq!(result.error.as_deref(), Some("bridge not initialized"));
    assert_eq!(gateway.state().await, BridgeState::Uninitialized);
}

#[tokio::test]
async fn successful_payment_records_a_success_audit_entry() {
    let log = Arc::new(MemoryLog::new());
    let gateway = BridgeGateway::new(Arc::new(FixedBridge::completing("tx1")), log.clone());

    assert!(gateway.initialize("m1").await.unwrap());
    assert_eq!(gateway.state().await, BridgeState::Ready);

    let result = gateway.start_payment(1000, "TTD").await;
    assert!(result.success);
    assert_eq!(result.status, PaymentStatus::Completed);
    assert_eq!(result.transaction_id.as_deref(), Some("tx1"));
    assert_eq!(gateway.state().await, BridgeState::Ready);

    let recorded = log.recorded();
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0].merchant_id, "m1");
    assert_eq!(recorded[0].amount_minor, 1000);
    assert_eq!(recorded[0].status, "success");
}

#[tokio::test]
async fn declined_payment_still_records_the_failure() {
    let log = Arc::new(MemoryLog::new());
    let gateway = BridgeGateway::new(Arc::new(FixedBridge::declining("terminal declined")), log.clone());

    assert!(gateway.initialize("m1").await.unwrap());

    let result = gateway.start_payment(1000, "TTD").await;
    assert!(!result.success);
    assert_eq!(result.status, PaymentStatus::Failed);

    let recorded = log.recorded();
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0].status, "failed");
    assert_eq!(recorded[0].error_message.as_deref(), Some("terminal declined"));
}

#[tokio::test]
async fn failed_initialization_keeps_the_gateway_unusable() {
    let log = Arc::new(MemoryLog::new());
    let bridge = FixedBridge {
        init_ok: false,
        status: "completed".to_string(),
        transaction_id: Some("unreachable".to_string()),
        error_message: None,
    };
    let gateway = BridgeGateway::new(Arc::new(bridge), log.clone());

    assert!(!gateway.initialize("m1").await.unwrap());
    assert_eq!(gateway.state().await, BridgeState::Uninitialized);

    let result = gateway.start_payment(1000, "TTD").await;
    assert!(!result.success);
    assert_eq!(result.error.as_deref(), Some("bridge not initialized"));
    assert!(log.recorded().is_empty());
}
