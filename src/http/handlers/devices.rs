use crate::AppState;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct PingPayload {
    #[serde(rename = "deviceId")]
    pub device_id: String,
}

#[derive(Debug, Deserialize)]
pub struct RegisterWalletPayload {
    #[serde(rename = "walletType")]
    pub wallet_type: String,
    #[serde(rename = "walletId")]
    pub wallet_id: String,
}

pub async fn device_status(State(state): State<AppState>) -> impl IntoResponse {
    let device_id = state.device_registry.connected_device().await;

    (
        axum::http::StatusCode::OK,
        Json(serde_json::json!({
            "connected": device_id.is_some(),
            "device_id": device_id,
        })),
    )
        .into_response()
}

/// Heartbeat endpoint for the physical terminal. Connected-device state is
/// refreshed immediately instead of waiting for the next poll tick.
pub async fn device_ping(
    State(state): State<AppState>,
    Json(payload): Json<PingPayload>,
) -> impl IntoResponse {
    if let Err(err) = state
        .devices_repo
        .record_ping(&payload.device_id, &state.merchant_id)
        .await
    {
        return (
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({"error": err.to_string()})),
        )
            .into_response();
    }

    state
        .device_registry
        .check_connected_devices(&state.devices_repo, &state.merchant_id)
        .await;

    (axum::http::StatusCode::OK, Json(serde_json::json!({"recorded": true}))).into_response()
}

pub async fn register_wallet(
    State(state): State<AppState>,
    Json(payload): Json<RegisterWalletPayload>,
) -> impl IntoResponse {
    let registered = state
        .device_registry
        .register_wallet(&state.merchant_id, &payload.wallet_type, &payload.wallet_id)
        .await;

    let status = if registered {
        axum::http::StatusCode::OK
    } else {
        axum::http::StatusCode::BAD_GATEWAY
    };

    (status, Json(serde_json::json!({"registered": registered}))).into_response()
}
