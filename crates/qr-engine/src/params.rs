//! Visual parameters of a QR code.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::QrError;

/// Default edge length in pixels.
pub const DEFAULT_SIZE: u32 = 256;
pub const MIN_SIZE: u32 = 64;
pub const MAX_SIZE: u32 = 2048;

static RE_HEX_COLOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#?([0-9A-Fa-f]{3}|[0-9A-Fa-f]{6}|[0-9A-Fa-f]{8})$").unwrap()
});

/// An RGBA color, written as `#RRGGBB` (or `#RRGGBBAA` when translucent).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parse `#RGB`, `#RRGGBB` or `#RRGGBBAA`. The `#` is optional.
    pub fn parse(input: &str) -> Result<Self, QrError> {
        let trimmed = input.trim();
        if !RE_HEX_COLOR.is_match(trimmed) {
            return Err(QrError::InvalidColor(input.to_string()));
        }
        let hex = trimmed.trim_start_matches('#');

        // Regex guarantees ASCII hex digits, so these slices and parses succeed.
        let channel = |s: &str| u8::from_str_radix(s, 16).unwrap_or(0);
        let color = match hex.len() {
            3 => {
                let expand = |i: usize| channel(&hex[i..=i].repeat(2));
                Color::rgb(expand(0), expand(1), expand(2))
            }
            6 => Color::rgb(channel(&hex[0..2]), channel(&hex[2..4]), channel(&hex[4..6])),
            _ => Color {
                r: channel(&hex[0..2]),
                g: channel(&hex[2..4]),
                b: channel(&hex[4..6]),
                a: channel(&hex[6..8]),
            },
        };
        Ok(color)
    }

    /// Parse an optional form input, using `fallback` when it is blank.
    pub fn parse_or(input: Option<&str>, fallback: Color) -> Result<Self, QrError> {
        match input.map(str::trim) {
            None | Some("") => Ok(fallback),
            Some(s) => Self::parse(s),
        }
    }

    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }

    pub fn to_rgba(&self) -> image::Rgba<u8> {
        image::Rgba([self.r, self.g, self.b, self.a])
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl TryFrom<String> for Color {
    type Error = QrError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

/// Shape of each dark module's outer corners.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CornerStyle {
    #[default]
    Square,
    Rounded,
}

impl CornerStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            CornerStyle::Square => "square",
            CornerStyle::Rounded => "rounded",
        }
    }
}

impl FromStr for CornerStyle {
    type Err = QrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "square" => Ok(CornerStyle::Square),
            "rounded" | "round" => Ok(CornerStyle::Rounded),
            _ => Err(QrError::InvalidCornerStyle(s.to_string())),
        }
    }
}

/// Everything needed to render one QR code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QrParams {
    pub value: String,
    pub foreground: Color,
    pub background: Color,
    pub size: u32,
    pub corner: CornerStyle,
}

impl QrParams {
    /// Parameters for `value` with black-on-white, 256px, square corners.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            foreground: Color::BLACK,
            background: Color::WHITE,
            size: DEFAULT_SIZE,
            corner: CornerStyle::Square,
        }
    }

    pub fn with_foreground(mut self, color: Color) -> Self {
        self.foreground = color;
        self
    }

    pub fn with_background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    pub fn with_size(mut self, size: u32) -> Self {
        self.size = size;
        self
    }

    pub fn with_corner(mut self, corner: CornerStyle) -> Self {
        self.corner = corner;
        self
    }

    /// Reject blank payloads and sizes outside `MIN_SIZE..=MAX_SIZE`.
    pub fn validate(&self) -> Result<(), QrError> {
        if self.value.trim().is_empty() {
            return Err(QrError::EmptyValue);
        }
        validate_size(self.size)
    }
}

pub fn validate_size(size: u32) -> Result<(), QrError> {
    if !(MIN_SIZE..=MAX_SIZE).contains(&size) {
        return Err(QrError::InvalidSize(size));
    }
    Ok(())
}
