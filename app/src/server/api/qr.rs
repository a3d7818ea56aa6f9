//! QR code API:
//!   POST   /api/qr          – render a QR code and record it in history
//!   GET    /api/qr/current  – SVG of the current QR code (204 if none)
//!   DELETE /api/qr/current  – forget the current QR code
//!   GET    /api/qr/export   – padded PNG download (204 if none)

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use serde_json::json;

use qr_engine::{Color, CornerStyle, QrError, QrParams, QrSymbol, export_png};

use crate::app::SharedState;
use crate::config::AppConfig;

use super::{ApiError, ApiResult, bad_request, err_json, qr_err};

#[derive(Debug, Default, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub value: String,
    pub fg: Option<String>,
    pub bg: Option<String>,
    pub size: Option<u32>,
    pub corner: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    pub size: Option<u32>,
}

/// Resolve form input into render parameters. Blank colors fall back to
/// black on white; missing size and corner style use the configured defaults.
pub fn build_params(req: &GenerateRequest, config: &AppConfig) -> Result<QrParams, QrError> {
    let corner = match req.corner.as_deref().map(str::trim) {
        None | Some("") => config.default_corner,
        Some(s) => s.parse::<CornerStyle>()?,
    };

    let params = QrParams::new(req.value.clone())
        .with_foreground(Color::parse_or(req.fg.as_deref(), Color::BLACK)?)
        .with_background(Color::parse_or(req.bg.as_deref(), Color::WHITE)?)
        .with_size(req.size.unwrap_or(config.default_size))
        .with_corner(corner);
    params.validate()?;
    Ok(params)
}

/// Render `params`, make it the current QR code and record its value.
pub async fn render_and_record(state: &SharedState, params: QrParams) -> ApiResult {
    let symbol = QrSymbol::generate(&params).map_err(qr_err)?;

    // History and current symbol change together, so history[0] always
    // matches what is on screen.
    let mut history = state.history().lock().await;
    history
        .record(&params.value)
        .map_err(|e| err_json(500, &format!("Failed to save history: {e}")))?;
    let entries = history.entries().to_vec();

    let svg = symbol.to_svg();
    let data_url = symbol.to_data_url();
    state.set_current(Some(symbol)).await;
    drop(history);

    tracing::info!(
        size = params.size,
        corner = params.corner.as_str(),
        "QR code generated"
    );

    Ok(Json(json!({
        "status": "ok",
        "svg": svg,
        "data_url": data_url,
        "params": params,
        "history": entries,
    })))
}

/// POST /api/qr
pub async fn generate(
    State(state): State<SharedState>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> ApiResult {
    let Json(body) = payload.map_err(bad_request)?;
    let params = build_params(&body, state.config()).map_err(qr_err)?;
    render_and_record(&state, params).await
}

/// GET /api/qr/current
pub async fn get_current(State(state): State<SharedState>) -> Response {
    match state.current().await {
        Some(symbol) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "image/svg+xml")],
            symbol.to_svg(),
        )
            .into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}

/// DELETE /api/qr/current
pub async fn clear_current(State(state): State<SharedState>) -> ApiResult {
    state.set_current(None).await;
    Ok(Json(json!({ "status": "ok" })))
}

/// GET /api/qr/export?size=N
pub async fn export(
    State(state): State<SharedState>,
    query: Result<Query<ExportQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(q) = query.map_err(bad_request)?;
    let current = state.current().await;
    let size = q.size.unwrap_or_else(|| {
        current
            .as_ref()
            .map_or(state.config().default_size, |s| s.params().size)
    });

    let Some(image) = export_png(current.as_ref(), size).map_err(qr_err)? else {
        return Ok(StatusCode::NO_CONTENT.into_response());
    };

    let disposition = format!("attachment; filename=\"{}\"", image.file_name);
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "image/png".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        image.png,
    )
        .into_response())
}
