use crate::domain::checkout::{
    local_transaction_id, normalize, CheckoutRequest, PaymentMethod, PaymentResult,
};
use crate::gateways::bridge::BridgeGateway;
use crate::gateways::cbdc::CbdcGateway;
use crate::gateways::cloud::CloudGateway;
use crate::service::settings_cache::SettingsCache;
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum CheckoutError {
    #[error("merchant not configured")]
    NotConfigured,
    #[error("amount_minor must be > 0")]
    InvalidAmount,
    #[error("unsupported payment method: {0}")]
    UnsupportedMethod(String),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Settled before checkout is invoked; synthesize a completed result.
    Settled,
    Bridge,
    Cloud,
    Cbdc,
    Unsupported,
}

/// Dispatch is a pure function of the method and the bridge flag at call
/// time.
pub fn route_for(method: PaymentMethod, bridge_enabled: bool) -> Route {
    match method {
        PaymentMethod::Card | PaymentMethod::Cash => Route::Settled,
        PaymentMethod::TapToPay if bridge_enabled => Route::Bridge,
        PaymentMethod::TapToPay => Route::Cloud,
        PaymentMethod::Cbdc => Route::Cbdc,
        PaymentMethod::ApplePay
        | PaymentMethod::GooglePay
        | PaymentMethod::Wipay
        | PaymentMethod::Lynk => Route::Unsupported,
    }
}

#[derive(Clone)]
pub struct CheckoutService {
    pub settings: Arc<SettingsCache>,
    pub bridge_gateway: Arc<BridgeGateway>,
    pub cloud_gateway: Arc<CloudGateway>,
    pub cbdc_gateway: Arc<CbdcGateway>,
}

impl CheckoutService {
    pub async fn process(&self, request: CheckoutRequest) -> Result<PaymentResult, CheckoutError> {
        if request.merchant_id.trim().is_empty() {
            return Err(CheckoutError::NotConfigured);
        }
        if request.amount_minor <= 0 {
            return Err(CheckoutError::InvalidAmount);
        }

        let route = route_for(request.payment_method, self.settings.is_bridge_enabled().await);
        let result = match route {
            Route::Settled => PaymentResult::completed(local_transaction_id()),
            Route::Bridge => {
                self.bridge_gateway
                    .start_payment(request.amount_minor, &request.currency)
                    .await
            }
            Route::Cloud => self.cloud_gateway.initiate_payment(&request).await,
            Route::Cbdc => self.cbdc_gateway.initiate_payment(&request).await,
            Route::Unsupported => {
                return Err(CheckoutError::UnsupportedMethod(
                    request.payment_method.as_str().to_string(),
                ))
            }
        };

        Ok(normalize(result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tap_to_pay_follows_the_bridge_flag() {
        assert_eq!(route_for(PaymentMethod::TapToPay, true), Route::Bridge);
        assert_eq!(route_for(PaymentMethod::TapToPay, false), Route::Cloud);
    }

    #[test]
    fn cbdc_ignores_the_bridge_flag() {
        assert_eq!(route_for(PaymentMethod::Cbdc, true), Route::Cbdc);
        assert_eq!(route_for(PaymentMethod::Cbdc, false), Route::Cbdc);
    }

    #[test]
    fn card_and_cash_are_already_settled() {
        assert_eq!(route_for(PaymentMethod::Card, false), Route::Settled);
        assert_eq!(route_for(PaymentMethod::Cash, true), Route::Settled);
    }

    #[test]
    fn unwired_wallet_methods_are_unsupported() {
        assert_eq!(route_for(PaymentMethod::ApplePay, true), Route::Unsupported);
        assert_eq!(route_for(PaymentMethod::Wipay, false), Route::Unsupported);
    }
}
