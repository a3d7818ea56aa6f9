//! Padded PNG export of a rendered QR code.

use std::io::Cursor;

use image::{DynamicImage, ImageFormat, Rgba, RgbaImage, imageops};
use tracing::{debug, info};

use crate::QrError;
use crate::qr::QrSymbol;

/// File name offered for every download.
pub const EXPORT_FILE_NAME: &str = "qrcode.png";

/// Padding on each side, as a fraction of the QR size.
const PADDING_RATIO: f64 = 0.15;

const PADDING_COLOR: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// A PNG ready to be handed to the user.
#[derive(Debug, Clone)]
pub struct ExportedImage {
    pub file_name: &'static str,
    pub width: u32,
    pub height: u32,
    pub png: Vec<u8>,
}

/// Edge length of the padded canvas: `round(size * 1.3)`.
pub fn padded_canvas_size(size: u32) -> u32 {
    (f64::from(size) * (1.0 + 2.0 * PADDING_RATIO)).round() as u32
}

/// Offset of the QR inside the canvas on both axes: `round(size * 0.15)`.
pub fn padding_offset(size: u32) -> u32 {
    (f64::from(size) * PADDING_RATIO).round() as u32
}

/// Rasterize `symbol` at `size` onto a white, padded square canvas and
/// encode it as PNG.
///
/// Returns `Ok(None)` when there is no symbol to export.
pub fn export_png(symbol: Option<&QrSymbol>, size: u32) -> Result<Option<ExportedImage>, QrError> {
    let Some(symbol) = symbol else {
        debug!("Nothing to export, no QR code rendered yet");
        return Ok(None);
    };

    let qr = symbol.rasterize(size)?;
    let canvas_size = padded_canvas_size(size);
    let offset = i64::from(padding_offset(size));

    let mut canvas = RgbaImage::from_pixel(canvas_size, canvas_size, PADDING_COLOR);
    imageops::overlay(&mut canvas, &qr, offset, offset);

    let mut png = Vec::new();
    DynamicImage::ImageRgba8(canvas).write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;

    info!(size, canvas_size, bytes = png.len(), "QR code exported");

    Ok(Some(ExportedImage {
        file_name: EXPORT_FILE_NAME,
        width: canvas_size,
        height: canvas_size,
        png,
    }))
}
