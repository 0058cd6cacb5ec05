use crate::AppState;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;

pub async fn transaction_status(
    State(state): State<AppState>,
    Path(transaction_id): Path<String>,
) -> impl IntoResponse {
    let result = state
        .cbdc_gateway
        .transaction_status(&state.merchant_id, &transaction_id)
        .await;

    (axum::http::StatusCode::OK, Json(result)).into_response()
}

pub async fn cancel_payment(
    State(state): State<AppState>,
    Path(transaction_id): Path<String>,
) -> impl IntoResponse {
    let result = state
        .cbdc_gateway
        .cancel_payment(&state.merchant_id, &transaction_id)
        .await;

    (axum::http::StatusCode::OK, Json(result)).into_response()
}
