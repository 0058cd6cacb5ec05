use crate::domain::checkout::ErrorEnvelope;
use crate::domain::credentials::CredentialsUpdate;
use crate::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

pub async fn get_credentials(State(state): State<AppState>) -> impl IntoResponse {
    match state.credential_store.load(&state.merchant_id).await {
        Some(credentials) => (StatusCode::OK, Json(credentials)).into_response(),
        None => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorEnvelope::new(
                "CREDENTIALS_UNAVAILABLE",
                "both credential fetches failed",
            )),
        )
            .into_response(),
    }
}

pub async fn save_credentials(
    State(state): State<AppState>,
    Json(update): Json<CredentialsUpdate>,
) -> impl IntoResponse {
    let report = state.credential_store.save(&state.merchant_id, update).await;
    (StatusCode::OK, Json(report)).into_response()
}
