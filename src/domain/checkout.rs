use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    Card,
    Cash,
    TapToPay,
    Cbdc,
    ApplePay,
    GooglePay,
    Wipay,
    Lynk,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Card => "CARD",
            PaymentMethod::Cash => "CASH",
            PaymentMethod::TapToPay => "TAP_TO_PAY",
            PaymentMethod::Cbdc => "CBDC",
            PaymentMethod::ApplePay => "APPLE_PAY",
            PaymentMethod::GooglePay => "GOOGLE_PAY",
            PaymentMethod::Wipay => "WIPAY",
            PaymentMethod::Lynk => "LYNK",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Completed,
    Pending,
    Failed,
    Cancelled,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CheckoutRequest {
    pub merchant_id: String,
    /// Minor currency units. Never a float, never major units.
    pub amount_minor: i64,
    pub currency: String,
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub cart_items: serde_json::Value,
    #[serde(default)]
    pub metadata: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentResult {
    pub success: bool,
    pub transaction_id: Option<String>,
    pub status: PaymentStatus,
    pub error: Option<String>,
}

impl PaymentResult {
    pub fn completed(transaction_id: String) -> Self {
        Self {
            success: true,
            transaction_id: Some(transaction_id),
            status: PaymentStatus::Completed,
            error: None,
        }
    }

    pub fn pending(transaction_id: String) -> Self {
        Self {
            success: true,
            transaction_id: Some(transaction_id),
            status: PaymentStatus::Pending,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            transaction_id: None,
            status: PaymentStatus::Failed,
            error: Some(error.into()),
        }
    }

    pub fn cancelled(transaction_id: Option<String>, error: Option<String>) -> Self {
        Self {
            success: false,
            transaction_id,
            status: PaymentStatus::Cancelled,
            error,
        }
    }
}

pub fn local_transaction_id() -> String {
    format!("local_{}", Uuid::new_v4())
}

/// success=true is only valid with a Completed or Pending status.
pub fn normalize(mut result: PaymentResult) -> PaymentResult {
    match result.status {
        PaymentStatus::Completed | PaymentStatus::Pending => {}
        PaymentStatus::Failed | PaymentStatus::Cancelled => {
            result.success = false;
        }
    }
    result
}

#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    pub error: ErrorPayload,
}

impl ErrorEnvelope {
    pub fn new(code: &str, message: &str) -> Self {
        Self {
            error: ErrorPayload {
                code: code.to_string(),
                message: message.to_string(),
                details: None,
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorPayload {
    pub code: String,
    pub message: String,
    pub details: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_success_from_terminal_failures() {
        let out = normalize(PaymentResult {
            success: true,
            transaction_id: Some("tx1".to_string()),
            status: PaymentStatus::Failed,
            error: None,
        });
        assert!(!out.success);
    }

    #[test]
    fn normalize_keeps_pending_success() {
        let out = normalize(PaymentResult::pending("tx2".to_string()));
        assert!(out.success);
        assert_eq!(out.status, PaymentStatus::Pending);
    }
}
