//! QR code rendering for QR Studio.
//!
//! Encodes a payload into a module grid, renders it as SVG for display and
//! rasterizes it into a padded PNG for download.

pub mod export;
pub mod params;
pub mod qr;

// Re-exports for convenience
pub use export::{EXPORT_FILE_NAME, ExportedImage, export_png, padded_canvas_size};
pub use params::{Color, CornerStyle, DEFAULT_SIZE, MAX_SIZE, MIN_SIZE, QrParams};
pub use qr::QrSymbol;

/// Errors raised while validating parameters or producing images.
#[derive(Debug, thiserror::Error)]
pub enum QrError {
    #[error("QR value must not be empty")]
    EmptyValue,

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Invalid corner style: {0}")]
    InvalidCornerStyle(String),

    #[error("Size {0} is out of range ({min}-{max})", min = MIN_SIZE, max = MAX_SIZE)]
    InvalidSize(u32),

    #[error("QR encode error: {0}")]
    Encode(String),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}
