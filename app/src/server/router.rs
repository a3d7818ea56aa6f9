use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;

use super::{api, assets};
use crate::app::SharedState;

/// Create the axum router with all routes.
pub fn create_router(state: SharedState) -> Router {
    Router::new()
        // --- Core ---
        .route("/status", get(status_handler))
        // --- QR code ---
        .route("/api/qr", post(api::qr::generate))
        .route(
            "/api/qr/current",
            get(api::qr::get_current).delete(api::qr::clear_current),
        )
        .route("/api/qr/export", get(api::qr::export))
        // --- History ---
        .route(
            "/api/history",
            get(api::history::get_history).delete(api::history::clear_history),
        )
        .route("/api/history/select", post(api::history::select_entry))
        // --- Page ---
        .route("/", get(assets::index))
        .fallback(assets::fallback)
        // --- Middleware ---
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn status_handler() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
