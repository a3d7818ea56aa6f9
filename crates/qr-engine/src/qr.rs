//! QR symbol encoding plus SVG and raster rendering.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use image::RgbaImage;
use qrcode::{EcLevel, QrCode};
use tracing::debug;

use crate::QrError;
use crate::params::{CornerStyle, QrParams, validate_size};

/// Title embedded in the SVG rendering.
pub const SVG_TITLE: &str = "Your QR code is ready!";

/// Corner radius of a rounded module, in module units.
const CORNER_RADIUS: f64 = 0.5;

/// Corners of a module, clockwise from top-left, as (dx, dy) neighbour offsets.
const CORNERS: [(i64, i64); 4] = [(-1, -1), (1, -1), (1, 1), (-1, 1)];

/// An encoded QR code together with the parameters it was rendered with.
#[derive(Debug, Clone)]
pub struct QrSymbol {
    params: QrParams,
    width: usize,
    modules: Vec<bool>,
}

impl QrSymbol {
    /// Validate `params` and encode its value (error correction level M).
    pub fn generate(params: &QrParams) -> Result<Self, QrError> {
        params.validate()?;

        let code = QrCode::with_error_correction_level(params.value.as_bytes(), EcLevel::M)
            .map_err(|e| QrError::Encode(e.to_string()))?;
        let width = code.width();
        let modules = code
            .to_colors()
            .into_iter()
            .map(|c| c == qrcode::Color::Dark)
            .collect();

        debug!(
            modules = width,
            size = params.size,
            corner = params.corner.as_str(),
            "QR symbol encoded"
        );

        Ok(Self {
            params: params.clone(),
            width,
            modules,
        })
    }

    pub fn params(&self) -> &QrParams {
        &self.params
    }

    /// Number of modules along one edge.
    pub fn module_count(&self) -> usize {
        self.width
    }

    /// Whether the module at (x, y) is dark. Out-of-range coordinates are light.
    pub fn is_dark(&self, x: i64, y: i64) -> bool {
        let w = self.width as i64;
        if x < 0 || y < 0 || x >= w || y >= w {
            return false;
        }
        self.modules[(y * w + x) as usize]
    }

    /// Outer corners of a dark module that get rounded: those whose two
    /// adjacent neighbours are both light. Square style never rounds.
    fn rounded_corners(&self, x: i64, y: i64) -> [bool; 4] {
        if self.params.corner == CornerStyle::Square {
            return [false; 4];
        }
        CORNERS.map(|(dx, dy)| !self.is_dark(x + dx, y) && !self.is_dark(x, y + dy))
    }

    /// Vector rendering, one unit per module, scaled to the configured size.
    pub fn to_svg(&self) -> String {
        let n = self.width;
        let size = self.params.size;
        let mut path = String::new();

        for y in 0..n as i64 {
            for x in 0..n as i64 {
                if self.is_dark(x, y) {
                    write_module_path(&mut path, x, y, self.rounded_corners(x, y));
                }
            }
        }

        let rendering = match self.params.corner {
            CornerStyle::Square => r#" shape-rendering="crispEdges""#,
            CornerStyle::Rounded => "",
        };

        format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {n} {n}" width="{size}" height="{size}"{rendering}><title>{SVG_TITLE}</title><rect width="{n}" height="{n}" fill="{bg}"/><path d="{path}" fill="{fg}"/></svg>"#,
            bg = self.params.background,
            fg = self.params.foreground,
        )
    }

    /// The SVG rendering as a `data:` URL for use in an `<img>` tag.
    pub fn to_data_url(&self) -> String {
        let encoded = STANDARD.encode(self.to_svg().as_bytes());
        format!("data:image/svg+xml;base64,{encoded}")
    }

    /// Rasterize to an exactly `size`×`size` image by sampling the module
    /// grid at each pixel centre.
    pub fn rasterize(&self, size: u32) -> Result<RgbaImage, QrError> {
        validate_size(size)?;

        let n = self.width as f64;
        let scale = n / f64::from(size);
        let fg = self.params.foreground.to_rgba();
        let bg = self.params.background.to_rgba();

        let img = RgbaImage::from_fn(size, size, |px, py| {
            let fx = (f64::from(px) + 0.5) * scale;
            let fy = (f64::from(py) + 0.5) * scale;
            if self.covers(fx, fy) { fg } else { bg }
        });

        debug!(size, modules = self.width, "QR symbol rasterized");
        Ok(img)
    }

    /// Whether the point (fx, fy), in module units, falls on a dark shape.
    fn covers(&self, fx: f64, fy: f64) -> bool {
        let x = fx.floor() as i64;
        let y = fy.floor() as i64;
        if !self.is_dark(x, y) {
            return false;
        }

        let u = fx - fx.floor();
        let v = fy - fy.floor();
        let quadrant = match (u < 0.5, v < 0.5) {
            (true, true) => 0,
            (false, true) => 1,
            (false, false) => 2,
            (true, false) => 3,
        };
        if !self.rounded_corners(x, y)[quadrant] {
            return true;
        }

        let (dx, dy) = CORNERS[quadrant];
        let cx = if dx < 0 { CORNER_RADIUS } else { 1.0 - CORNER_RADIUS };
        let cy = if dy < 0 { CORNER_RADIUS } else { 1.0 - CORNER_RADIUS };
        let ox = if dx < 0 { (cx - u).max(0.0) } else { (u - cx).max(0.0) };
        let oy = if dy < 0 { (cy - v).max(0.0) } else { (v - cy).max(0.0) };
        ox * ox + oy * oy <= CORNER_RADIUS * CORNER_RADIUS
    }
}

/// Append the outline of one module, with arcs on the rounded corners.
fn write_module_path(out: &mut String, x: i64, y: i64, rounded: [bool; 4]) {
    let (x, y) = (x as f64, y as f64);
    let r = CORNER_RADIUS;
    let inset = |on: bool| if on { r } else { 0.0 };
    let arc = |to_x: f64, to_y: f64| format!("A{r} {r} 0 0 1 {to_x} {to_y}");
    let [tl, tr, br, bl] = rounded;

    out.push_str(&format!("M{} {}H{}", x + inset(tl), y, x + 1.0 - inset(tr)));
    if tr {
        out.push_str(&arc(x + 1.0, y + r));
    }
    out.push_str(&format!("V{}", y + 1.0 - inset(br)));
    if br {
        out.push_str(&arc(x + 1.0 - r, y + 1.0));
    }
    out.push_str(&format!("H{}", x + inset(bl)));
    if bl {
        out.push_str(&arc(x, y + 1.0 - r));
    }
    out.push_str(&format!("V{}", y + inset(tl)));
    if tl {
        out.push_str(&arc(x + r, y));
    }
    out.push('Z');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::Color;

    fn symbol(corner: CornerStyle) -> QrSymbol {
        QrSymbol::generate(&QrParams::new("https://example.com").with_corner(corner)).unwrap()
    }

    #[test]
    fn generate_rejects_empty_value() {
        let err = QrSymbol::generate(&QrParams::new("")).unwrap_err();
        assert!(matches!(err, QrError::EmptyValue));
    }

    #[test]
    fn generate_rejects_oversized_payload() {
        let huge = "x".repeat(5000);
        let err = QrSymbol::generate(&QrParams::new(huge)).unwrap_err();
        assert!(matches!(err, QrError::Encode(_)));
    }

    #[test]
    fn finder_pattern_corner_is_dark() {
        let sym = symbol(CornerStyle::Square);
        assert!(sym.module_count() >= 21);
        assert!(sym.is_dark(0, 0));
        assert!(!sym.is_dark(-1, 0));
    }

    #[test]
    fn svg_embeds_colors_size_and_title() {
        let params = QrParams::new("hello")
            .with_foreground(Color::rgb(0x0f, 0x17, 0x2a))
            .with_background(Color::rgb(0xf8, 0xfa, 0xfc))
            .with_size(300);
        let svg = QrSymbol::generate(&params).unwrap().to_svg();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(r#"width="300""#));
        assert!(svg.contains("#0F172A"));
        assert!(svg.contains("#F8FAFC"));
        assert!(svg.contains(SVG_TITLE));
    }

    #[test]
    fn square_svg_has_no_arcs() {
        assert!(!symbol(CornerStyle::Square).to_svg().contains("A0.5"));
    }

    #[test]
    fn module_path_outlines_square_module() {
        let mut path = String::new();
        write_module_path(&mut path, 2, 3, [false; 4]);
        assert_eq!(path, "M2 3H3V4H2V3Z");
    }

    #[test]
    fn module_path_turns_isolated_rounded_module_into_dot() {
        let mut path = String::new();
        write_module_path(&mut path, 0, 0, [true; 4]);
        assert_eq!(
            path,
            "M0.5 0H0.5A0.5 0.5 0 0 1 1 0.5V0.5A0.5 0.5 0 0 1 0.5 1\
             H0.5A0.5 0.5 0 0 1 0 0.5V0.5A0.5 0.5 0 0 1 0.5 0Z"
        );
    }

    #[test]
    fn rounded_svg_uses_arcs() {
        assert!(symbol(CornerStyle::Rounded).to_svg().contains("A0.5 0.5"));
    }

    #[test]
    fn data_url_is_base64_svg() {
        let url = symbol(CornerStyle::Square).to_data_url();
        let encoded = url.trim_start_matches("data:image/svg+xml;base64,");
        let decoded = STANDARD.decode(encoded).unwrap();
        assert!(String::from_utf8(decoded).unwrap().contains("<svg"));
    }

    #[test]
    fn rasterize_has_exact_size() {
        let img = symbol(CornerStyle::Square).rasterize(256).unwrap();
        assert_eq!(img.dimensions(), (256, 256));
    }

    #[test]
    fn rasterize_rejects_tiny_size() {
        assert!(symbol(CornerStyle::Square).rasterize(10).is_err());
    }

    #[test]
    fn rounded_style_clears_outer_finder_corner() {
        let sq = symbol(CornerStyle::Square).rasterize(512).unwrap();
        let rd = symbol(CornerStyle::Rounded).rasterize(512).unwrap();
        // Top-left pixel sits on the outer corner of the finder pattern.
        assert_eq!(*sq.get_pixel(0, 0), Color::BLACK.to_rgba());
        assert_eq!(*rd.get_pixel(0, 0), Color::WHITE.to_rgba());
    }
}
