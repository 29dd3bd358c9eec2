//! Host color codec for richfind.
//!
//! The host stores character colors as a signed 32-bit integer. Non-negative
//! values are direct colors packed as `0x00BBGGRR`. Negative values are either
//! the "automatic" sentinel or a reference into the document theme palette
//! with an optional tint/shade, laid out most-significant byte first as
//! `theme, reserved, shade, tint`.

mod rgb;
mod theme;

pub use rgb::{Hsl, Rgb};
pub use theme::{THEME_COLOR_IDS, ThemeColor};

use std::fmt;

const DEFAULT_ADJUST_BYTE: u8 = 0xFF;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct NativeColor(i32);

impl NativeColor {
    /// `0xFF000000` reinterpreted as signed.
    pub const AUTOMATIC: NativeColor = NativeColor(-16_777_216);

    pub const fn from_raw(raw: i32) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> i32 {
        self.0
    }

    pub const fn from_rgb(rgb: Rgb) -> Self {
        Self(((rgb.b as i32) << 16) | ((rgb.g as i32) << 8) | rgb.r as i32)
    }

    pub fn is_automatic(self) -> bool {
        self == Self::AUTOMATIC
    }

    pub fn is_theme(self) -> bool {
        self.0 < 0 && !self.is_automatic()
    }
}

impl fmt::Display for NativeColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodedColor {
    /// Host default color; only the host can resolve it.
    Automatic,
    Rgb(Rgb),
}

impl DecodedColor {
    pub fn to_hex(self) -> Option<String> {
        match self {
            Self::Automatic => None,
            Self::Rgb(rgb) => Some(rgb.to_hex()),
        }
    }
}

impl fmt::Display for DecodedColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Automatic => f.write_str("automatic"),
            Self::Rgb(rgb) => f.write_str(&rgb.to_hex()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorError {
    InvalidHex(String),
    UnknownThemeSlot(u8),
    UnknownThemeName(String),
}

impl fmt::Display for ColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidHex(value) => write!(f, "invalid hex color '{value}'"),
            Self::UnknownThemeSlot(slot) => write!(f, "unknown theme color slot {slot:#x}"),
            Self::UnknownThemeName(name) => write!(f, "unknown theme color '{name}'"),
        }
    }
}

impl std::error::Error for ColorError {}

/// Encodes an `RRGGBB` string as a direct color.
pub fn encode_rgb(hex: &str) -> Result<NativeColor, ColorError> {
    Rgb::from_hex(hex).map(NativeColor::from_rgb)
}

/// Encodes a theme palette reference. `adjust` is clamped to `-1.0..=1.0`;
/// negative values darken (shade), positive values lighten (tint).
pub fn encode_theme(color: ThemeColor, adjust: f64) -> NativeColor {
    let adjust = adjust.clamp(-1.0, 1.0);
    let shade = if adjust < 0.0 {
        adjust_byte((adjust + 1.0) * 255.0)
    } else {
        DEFAULT_ADJUST_BYTE
    };
    let tint = if adjust > 0.0 {
        adjust_byte((1.0 - adjust) * 255.0)
    } else {
        DEFAULT_ADJUST_BYTE
    };

    let packed = ((color.theme_byte() as u32) << 24) | ((shade as u32) << 8) | tint as u32;
    NativeColor(packed as i32)
}

pub fn decode(color: NativeColor) -> Result<DecodedColor, ColorError> {
    if color.is_automatic() {
        return Ok(DecodedColor::Automatic);
    }

    let raw = color.raw();
    if raw >= 0 {
        return Ok(DecodedColor::Rgb(Rgb::new(
            (raw & 0xFF) as u8,
            ((raw >> 8) & 0xFF) as u8,
            ((raw >> 16) & 0xFF) as u8,
        )));
    }

    let [theme_byte, _reserved, shade, tint] = (raw as u32).to_be_bytes();
    let theme = ThemeColor::from_theme_byte(theme_byte)?;
    Ok(DecodedColor::Rgb(apply_adjustment(
        theme.reference(),
        theme_adjustment(shade, tint),
    )))
}

/// Lightness adjustment carried by the shade and tint bytes. When both are
/// set the tint wins.
pub fn theme_adjustment(shade: u8, tint: u8) -> f64 {
    let mut adjust = 0.0;
    if shade != DEFAULT_ADJUST_BYTE {
        adjust = round2(-1.0 + shade as f64 / 255.0);
    }
    if tint != DEFAULT_ADJUST_BYTE {
        adjust = round2(1.0 - tint as f64 / 255.0);
    }
    adjust
}

/// Applies a tint (positive) or shade (negative) in HSL space.
pub fn apply_adjustment(base: Rgb, adjust: f64) -> Rgb {
    if adjust == 0.0 {
        return base;
    }

    let mut hsl = base.to_hsl();
    let lighten = if adjust > 0.0 { 1.0 - adjust } else { 0.0 };
    hsl.l = (hsl.l * adjust.abs() + lighten).clamp(0.0, 1.0);
    Rgb::from_hsl(hsl)
}

fn adjust_byte(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
