use crate::AppState;
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub limit: Option<i64>,
}

pub async fn list_transactions(
    State(state): State<AppState>,
    Path(merchant_id): Path<String>,
    Query(params): Query<ListParams>,
) -> impl IntoResponse {
    let limit = params.limit.unwrap_or(50).clamp(1, 500);

    match state.transaction_log_repo.list_recent(&merchant_id, limit).await {
        Ok(transactions) => (
            axum::http::StatusCode::OK,
            Json(serde_json::json!({
                "merchant_id": merchant_id,
                "count": transactions.len(),
                "transactions": transactions,
            })),
        )
            .into_response(),
        Err(e) => (
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({"error": e.to_string()})),
        )
            .into_response(),
    }
}
