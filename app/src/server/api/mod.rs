//! REST API handlers grouped by domain.

pub mod history;
pub mod qr;


use axum::Json;
use axum::http::StatusCode;
use serde_json::{Value, json};

pub type ApiError = (StatusCode, Json<Value>);
pub type ApiResult = Result<Json<Value>, ApiError>;

/// Standard error response.
pub fn err_json(status: u16, message: &str) -> ApiError {
    (
        StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        Json(json!({ "status": "error", "error": message })),
    )
}

/// Turn an extractor rejection (malformed JSON body or query string) into
/// the standard 400 error envelope.
pub fn bad_request(rejection: impl std::fmt::Display) -> ApiError {
    err_json(400, &rejection.to_string())
}

/// Map a rendering error to 400 for bad input, 500 otherwise.
pub fn qr_err(e: qr_engine::QrError) -> ApiError {
    match e {
        qr_engine::QrError::Image(_) => err_json(500, &e.to_string()),
        _ => err_json(400, &e.to_string()),
    }
}
