use crate::domain::checkout::{normalize, PaymentResult, PaymentStatus};
use crate::gateways::map_vendor_status;
use crate::AppState;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CompletionPayload {
    #[serde(rename = "transactionRef")]
    pub transaction_ref: String,
    #[serde(default)]
    pub success: bool,
    #[serde(rename = "transactionId", default)]
    pub transaction_id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// The out-of-band completion channel: the vendor notifies us here and the
/// correlation ref settles the matching pending entry. A ref that already
/// settled or timed out is acknowledged and dropped.
pub async fn payment_completion(
    State(state): State<AppState>,
    Json(payload): Json<CompletionPayload>,
) -> impl IntoResponse {
    let status = match payload.status.as_deref() {
        Some(s) => map_vendor_status(s),
        None if payload.success => PaymentStatus::Completed,
        None => PaymentStatus::Failed,
    };

    let result = normalize(PaymentResult {
        success: payload.success,
        transaction_id: payload.transaction_id,
        status,
        error: payload.error,
    });

    let settled = state.cloud_gateway.settle(&payload.transaction_ref, result);

    (
        axum::http::StatusCode::OK,
        Json(serde_json::json!({"settled": settled})),
    )
        .into_response()
}
