//! History API:
//!   GET    /api/history         – recent values, most recent first
//!   DELETE /api/history         – clear history
//!   POST   /api/history/select  – re-render a value with the current look

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use serde::Deserialize;
use serde_json::json;

use crate::app::SharedState;

use super::qr::render_and_record;
use super::{ApiResult, bad_request, err_json, qr_err};

#[derive(Debug, Deserialize)]
pub struct SelectRequest {
    pub value: String,
}

/// GET /api/history
pub async fn get_history(State(state): State<SharedState>) -> ApiResult {
    let history = state.history().lock().await;
    Ok(Json(json!({
        "history": history.entries(),
        "count": history.len(),
    })))
}

/// DELETE /api/history
pub async fn clear_history(State(state): State<SharedState>) -> ApiResult {
    state
        .history()
        .lock()
        .await
        .clear()
        .map_err(|e| err_json(500, &format!("Failed to clear history: {e}")))?;
    tracing::info!("History cleared");
    Ok(Json(json!({ "status": "ok", "history": [] })))
}

/// POST /api/history/select
pub async fn select_entry(
    State(state): State<SharedState>,
    payload: Result<Json<SelectRequest>, JsonRejection>,
) -> ApiResult {
    let Json(body) = payload.map_err(bad_request)?;
    let params = state.params_for(&body.value).await;
    params.validate().map_err(qr_err)?;
    render_and_record(&state, params).await
}
