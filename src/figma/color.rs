//! Paint-to-CSS color conversion.

use std::str::FromStr;

use palette::Srgb;

use super::api_types::{Color, Paint};

/// Fallback for element colors in generated components.
pub const TRANSPARENT: &str = "transparent";
/// Fallback for frame and page backgrounds.
pub const WHITE_HEX: &str = "#ffffff";

/// How a resolved color is written out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorEncoding {
    /// `rgb(r, g, b)`
    Rgb,
    /// `#rrggbb`, lowercase
    Hex,
}

/// Map a normalized channel to 0..=255. Non-finite input reads as 0.
pub fn channel_to_u8(channel: f64) -> u8 {
    if !channel.is_finite() {
        return 0;
    }
    (channel * 255.0).round().clamp(0.0, 255.0) as u8
}

pub fn to_srgb(color: &Color) -> Srgb<u8> {
    Srgb::new(
        channel_to_u8(color.r),
        channel_to_u8(color.g),
        channel_to_u8(color.b),
    )
}

pub fn encode(color: &Color, encoding: ColorEncoding) -> String {
    let rgb = to_srgb(color);
    match encoding {
        ColorEncoding::Rgb => format!("rgb({}, {}, {})", rgb.red, rgb.green, rgb.blue),
        ColorEncoding::Hex => format!("#{:02x}{:02x}{:02x}", rgb.red, rgb.green, rgb.blue),
    }
}

/// First visible paint that carries a color.
pub fn first_solid(fills: &[Paint]) -> Option<&Color> {
    fills
        .iter()
        .filter(|p| p.visible.unwrap_or(true))
        .find_map(|p| p.color.as_ref())
}

pub fn paint_color(fills: &[Paint], encoding: ColorEncoding, fallback: &str) -> String {
    first_solid(fills)
        .map(|c| encode(c, encoding))
        .unwrap_or_else(|| fallback.to_string())
}

pub fn color_or(color: Option<&Color>, encoding: ColorEncoding, fallback: &str) -> String {
    color
        .map(|c| encode(c, encoding))
        .unwrap_or_else(|| fallback.to_string())
}

/// Parse `#rrggbb` (or `rrggbb`) into 8-bit channels.
pub fn parse_hex(value: &str) -> Option<Srgb<u8>> {
    Srgb::<u8>::from_str(value.trim()).ok()
}
