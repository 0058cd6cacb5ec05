use crate::domain::checkout::PaymentStatus;
use crate::repo::transaction_log_repo::{TransactionLog, TransactionLogEntry};
use std::sync::Arc;

pub mod bridge;
pub mod cbdc;
pub mod cloud;

pub fn map_vendor_status(status: &str) -> PaymentStatus {
    match status.to_lowercase().as_str() {
        "completed" | "success" | "succeeded" => PaymentStatus::Completed,
        "pending" | "processing" => PaymentStatus::Pending,
        "cancelled" | "canceled" => PaymentStatus::Cancelled,
        _ => PaymentStatus::Failed,
    }
}

pub fn audit_status(status: &PaymentStatus) -> &'static str {
    match status {
        PaymentStatus::Completed => "success",
        PaymentStatus::Pending => "pending",
        PaymentStatus::Failed => "failed",
        PaymentStatus::Cancelled => "cancelled",
    }
}

/// Audit writes never change a payment outcome; failures are logged and
/// swallowed here.
pub async fn record_best_effort(log: &Arc<dyn TransactionLog>, entry: TransactionLogEntry) {
    if let Err(err) = log.record(entry).await {
        tracing::warn!("transaction log write failed: {}", err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_vendor_statuses_case_insensitively() {
        assert_eq!(map_vendor_status("COMPLETED"), PaymentStatus::Completed);
        assert_eq!(map_vendor_status("Pending"), PaymentStatus::Pending);
        assert_eq!(map_vendor_status("canceled"), PaymentStatus::Cancelled);
        assert_eq!(map_vendor_status("declined"), PaymentStatus::Failed);
    }
}
