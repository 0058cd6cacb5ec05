mod common;

use checkout_gateway::domain::checkout::{CheckoutRequest, PaymentMethod, PaymentStatus};
use checkout_gateway::gateways::bridge::BridgeGateway;
use checkout_gateway::gateways::cbdc::CbdcGateway;
use checkout_gateway::gateways::cloud::CloudGateway;
use checkout_gateway::service::checkout_service::{CheckoutError, CheckoutService};
use checkout_gateway::service::settings_cache::SettingsCache;
use common::{CannedInvoker, FixedBridge, MemoryLog};
use std::sync::Arc;
use std::time::Duration;

struct Harness {
    service: CheckoutService,
    invoker: Arc<CannedInvoker>,
    log: Arc<MemoryLog>,
}

async fn harness(bridge_enabled: bool, invoker: CannedInvoker, bridge: FixedBridge) -> Harness {
    let invoker: Arc<CannedInvoker> = Arc::new(invoker);
    let log = Arc::new(MemoryLog::new());
    let settings = Arc::new(SettingsCache::detached());
    settings.toggle_bridge(bridge_enabled).await;

    let bridge_gateway = Arc::new(BridgeGateway::new(Arc::new(bridge), log.clone()));
    if bridge_enabled {
        bridge_gateway.initialize("m1").await.unwrap();
    }

    let service = CheckoutService {
        settings,
        bridge_gateway,
        cloud_gateway: Arc::new(CloudGateway::new(
            invoker.clone(),
            log.clone(),
            Duration::from_secs(60),
        )),
        cbdc_gateway: Arc::new(CbdcGateway::new(invoker.clone(), log.clone())),
    };

    Harness {
        service,
        invoker,
        log,
    }
}

fn request(method: PaymentMethod) -> CheckoutRequest {
    CheckoutRequest {
        merchant_id: "m1".to_string(),
        amount_minor: 1000,
        currency: "TTD".to_string(),
        payment_method: method,
        cart_items: serde_json::json!([]),
        metadata: serde_json::json!({}),
    }
}

#[tokio::test]
async fn card_and_cash_settle_without_any_remote_call() {
    let h = harness(false, CannedInvoker::accepting(), FixedBridge::completing("tx1")).await;

    for method in [PaymentMethod::Card, PaymentMethod::Cash] {
        let result = h.service.process(request(method)).await.unwrap();
        assert!(result.success);
        assert_eq!(result.status, PaymentStatus::Completed);
        assert!(result.transaction_id.is_some());
    }

    assert_eq!(h.invoker.call_count(), 0);
}

#[tokio::test]
async fn tap_to_pay_uses_the_bridge_when_enabled() {
    let h = harness(true, CannedInvoker::accepting(), FixedBridge::completing("tx1")).await;

    let result = h.service.process(request(PaymentMethod::TapToPay)).await.unwrap();
    assert!(result.success);
    assert_eq!(result.status, PaymentStatus::Completed);
    assert_eq!(result.transaction_id.as_deref(), Some("tx1"));

    // Bridge path only: nothing went through the function invoker.
    assert_eq!(h.invoker.call_count(), 0);

    let recorded = h.log.recorded();
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0].gateway, "bridge");
    assert_eq!(recorded[0].status, "success");
    assert_eq!(recorded[0].merchant_id, "m1");
}

#[tokio::test]
async fn tap_to_pay_uses_the_cloud_path_when_bridge_disabled() {
    let h = harness(
        false,
        CannedInvoker::rejecting("vendor unavailable"),
        FixedBridge::completing("unused"),
    )
    .await;

    let result = h.service.process(request(PaymentMethod::TapToPay)).await.unwrap();
    assert!(!result.success);
    assert_eq!(result.status, PaymentStatus::Failed);

    assert_eq!(h.invoker.called_functions(), vec!["tap-to-pay-proxy".to_string()]);
}

#[tokio::test]
async fn cbdc_dispatches_to_the_cbdc_gateway_regardless_of_bridge_flag() {
    let h = harness(true, CannedInvoker::rejecting("declined"), FixedBridge::completing("unused")).await;

    let result = h.service.process(request(PaymentMethod::Cbdc)).await.unwrap();
    assert!(!result.success);
    assert_eq!(h.invoker.called_functions(), vec!["cbdc-proxy".to_string()]);
}

#[tokio::test]
async fn unwired_methods_are_a_distinct_error() {
    let h = harness(false, CannedInvoker::accepting(), FixedBridge::completing("unused")).await;

    let err = h.service.process(request(PaymentMethod::ApplePay)).await.unwrap_err();
    assert!(matches!(err, CheckoutError::UnsupportedMethod(_)));
    assert_eq!(h.invoker.call_count(), 0);
}

#[tokio::test]
async fn missing_merchant_and_bad_amount_fail_fast() {
    let h = harness(false, CannedInvoker::accepting(), FixedBridge::completing("unused")).await;

    let mut no_merchant = request(PaymentMethod::Card);
    no_merchant.merchant_id = "  ".to_string();
    assert!(matches!(
        h.service.process(no_merchant).await.unwrap_err(),
        CheckoutError::NotConfigured
    ));

    let mut zero_amount = request(PaymentMethod::Card);
    zero_amount.amount_minor = 0;
    assert!(matches!(
        h.service.process(zero_amount).await.unwrap_err(),
        CheckoutError::InvalidAmount
    ));

    assert_eq!(h.invoker.call_count(), 0);
}
