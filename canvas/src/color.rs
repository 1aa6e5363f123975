//! CSS color parsing for stroke colors and script fill/stroke styles.

#[cfg(test)]
#[path = "color_test.rs"]
mod color_test;

use tiny_skia::Color;

/// An sRGB color with straight (non-premultiplied) alpha in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba { r: 0, g: 0, b: 0, a: 1.0 };

    #[must_use]
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Convert to a paint color, multiplying the alpha by `opacity`.
    #[must_use]
    pub fn to_skia(self, opacity: f32) -> Color {
        let alpha = (self.a * opacity).clamp(0.0, 1.0);
        Color::from_rgba(
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
            alpha,
        )
        .unwrap_or(Color::BLACK)
    }
}

const NAMED: &[(&str, Rgba)] = &[
    ("black", Rgba::opaque(0, 0, 0)),
    ("white", Rgba::opaque(255, 255, 255)),
    ("red", Rgba::opaque(255, 0, 0)),
    ("green", Rgba::opaque(0, 128, 0)),
    ("lime", Rgba::opaque(0, 255, 0)),
    ("blue", Rgba::opaque(0, 0, 255)),
    ("yellow", Rgba::opaque(255, 255, 0)),
    ("orange", Rgba::opaque(255, 165, 0)),
    ("purple", Rgba::opaque(128, 0, 128)),
    ("pink", Rgba::opaque(255, 192, 203)),
    ("cyan", Rgba::opaque(0, 255, 255)),
    ("magenta", Rgba::opaque(255, 0, 255)),
    ("gray", Rgba::opaque(128, 128, 128)),
    ("grey", Rgba::opaque(128, 128, 128)),
    ("transparent", Rgba { r: 0, g: 0, b: 0, a: 0.0 }),
];

/// Parse `#rgb`, `#rrggbb`, `#rrggbbaa`, `rgb(r, g, b)`, `rgba(r, g, b, a)`
/// or a basic named color.
#[must_use]
pub fn parse_color(raw: &str) -> Option<Rgba> {
    let trimmed = raw.trim();
    if let Some(hex) = trimmed.strip_prefix('#') {
        return parse_hex(hex);
    }
    let lower = trimmed.to_ascii_lowercase();
    if let Some(args) = lower.strip_prefix("rgba(").or_else(|| lower.strip_prefix("rgb(")) {
        return parse_functional(args.strip_suffix(')')?);
    }
    NAMED
        .iter()
        .find(|(name, _)| *name == lower)
        .map(|(_, rgba)| *rgba)
}

/// Parse a color, falling back to opaque black when it is not understood.
#[must_use]
pub fn css_color(raw: &str) -> Rgba {
    parse_color(raw).unwrap_or(Rgba::BLACK)
}

fn parse_hex(hex: &str) -> Option<Rgba> {
    if !hex.is_ascii() {
        return None;
    }
    let bytes = hex.as_bytes();
    match bytes.len() {
        3 => {
            let r = hex_digit(bytes[0])?;
            let g = hex_digit(bytes[1])?;
            let b = hex_digit(bytes[2])?;
            Some(Rgba::opaque(r * 17, g * 17, b * 17))
        }
        6 | 8 => {
            let r = hex_pair(bytes[0], bytes[1])?;
            let g = hex_pair(bytes[2], bytes[3])?;
            let b = hex_pair(bytes[4], bytes[5])?;
            let a = if bytes.len() == 8 {
                f32::from(hex_pair(bytes[6], bytes[7])?) / 255.0
            } else {
                1.0
            };
            Some(Rgba { r, g, b, a })
        }
        _ => None,
    }
}

fn hex_digit(byte: u8) -> Option<u8> {
    char::from(byte).to_digit(16).map(|d| d as u8)
}

fn hex_pair(hi: u8, lo: u8) -> Option<u8> {
    Some(hex_digit(hi)? * 16 + hex_digit(lo)?)
}

fn parse_functional(args: &str) -> Option<Rgba> {
    let parts: Vec<&str> = args.split(',').map(str::trim).collect();
    if parts.len() != 3 && parts.len() != 4 {
        return None;
    }
    let r = channel(parts[0])?;
    let g = channel(parts[1])?;
    let b = channel(parts[2])?;
    let a = match parts.get(3) {
        Some(raw) => number(raw)?.clamp(0.0, 1.0) as f32,
        None => 1.0,
    };
    Some(Rgba { r, g, b, a })
}

fn channel(raw: &str) -> Option<u8> {
    let value = number(raw)?.round().clamp(0.0, 255.0);
    Some(value as u8)
}

fn number(raw: &str) -> Option<f64> {
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => Some(v),
        _ => None,
    }
}
