use crate::domain::checkout::{CheckoutRequest, ErrorEnvelope};
use crate::service::checkout_service::CheckoutError;
use crate::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

pub async fn process_payment(
    State(state): State<AppState>,
    Json(request): Json<CheckoutRequest>,
) -> impl IntoResponse {
    match state.checkout_service.process(request).await {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(err) => error_response(err),
    }
}

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

fn error_response(err: CheckoutError) -> axum::response::Response {
    let (status, code) = match &err {
        CheckoutError::NotConfigured => (StatusCode::BAD_REQUEST, "MERCHANT_NOT_CONFIGURED"),
        CheckoutError::InvalidAmount => (StatusCode::BAD_REQUEST, "INVALID_AMOUNT"),
        CheckoutError::UnsupportedMethod(_) => (StatusCode::BAD_REQUEST, "UNSUPPORTED_PAYMENT_METHOD"),
        CheckoutError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
    };

    (status, Json(ErrorEnvelope::new(code, &err.to_string()))).into_response()
}
