use crate::AppState;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct TogglePayload {
    pub enabled: bool,
}

pub async fn get_settings(State(state): State<AppState>) -> impl IntoResponse {
    let flags = state.settings_cache.flags().await;

    (
        axum::http::StatusCode::OK,
        Json(serde_json::json!({
            "bridge_enabled": flags.use_bridge,
            "cbdc_enabled": flags.use_cbdc,
            "apple_pay_available": state.wallet_capabilities.is_apple_pay_available(&flags),
            "google_pay_available": state.wallet_capabilities.is_google_pay_available(&flags),
        })),
    )
        .into_response()
}

pub async fn toggle_bridge(
    State(state): State<AppState>,
    Json(payload): Json<TogglePayload>,
) -> impl IntoResponse {
    state.settings_cache.toggle_bridge(payload.enabled).await;

    (
        axum::http::StatusCode::OK,
        Json(serde_json::json!({"bridge_enabled": payload.enabled})),
    )
        .into_response()
}

pub async fn toggle_cbdc(
    State(state): State<AppState>,
    Json(payload): Json<TogglePayload>,
) -> impl IntoResponse {
    state.settings_cache.toggle_cbdc(payload.enabled).await;

    (
        axum::http::StatusCode::OK,
        Json(serde_json::json!({"cbdc_enabled": payload.enabled})),
    )
        .into_response()
}
