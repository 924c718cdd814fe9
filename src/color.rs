//! Color decoding and the light/dark heuristic behind bar style selection.
//!
//! Colors travel through the crate as the strings authors wrote in
//! `config.toml` (`"#1a1a1a"`). They are only decoded here, when the
//! coordinator needs to decide whether the status bar should carry dark or
//! light content.
//!
//! ## Parsing Is Total
//!
//! [`parse_hex`] never fails. An optional leading `#` is dropped, then the
//! red, green and blue channels are read from fixed two-character windows.
//! A window that is missing or is not valid hex reads as `0`:
//!
//! ```text
//! "#ffffff"  → (255, 255, 255)
//! "#fff"     → (255,   0,   0)   short form is not expanded
//! "#zz8000"  → (  0, 128,   0)
//! "teal"     → (  0,   0,   0)
//! ```
//!
//! A malformed color therefore produces a wrong-but-stable style instead of
//! an error. [`is_well_formed`] exists so tooling can warn about such values.
//!
//! ## Luminance
//!
//! Perceptual luminance uses the Rec. 601 weights:
//!
//! ```text
//! L = (0.299·R + 0.587·G + 0.114·B) / 255
//! ```
//!
//! A color is "light" when `L > 0.5`.

use crate::types::BarStyle;

/// Fixed status-bar color used while night mode is active.
pub const NIGHT_COLOR: &str = "#000000";

/// Luminance above which a color counts as light.
pub const LIGHT_THRESHOLD: f64 = 0.5;

/// Decoded 8-bit RGB channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Decode a `#rrggbb` string. Never fails; unreadable channels are `0`.
pub fn parse_hex(color: &str) -> Rgb {
    let digits = color.strip_prefix('#').unwrap_or(color);
    Rgb {
        r: channel(digits, 0),
        g: channel(digits, 2),
        b: channel(digits, 4),
    }
}

fn channel(digits: &str, start: usize) -> u8 {
    // `get` returns None on short input and on non-char-boundary slices.
    // `from_str_radix` accepts a leading `+`, so digits are checked first.
    digits
        .get(start..start + 2)
        .filter(|pair| pair.bytes().all(|b| b.is_ascii_hexdigit()))
        .and_then(|pair| u8::from_str_radix(pair, 16).ok())
        .unwrap_or(0)
}

/// Perceptual luminance normalized to `0.0..=1.0`.
pub fn luminance(rgb: Rgb) -> f64 {
    (0.299 * f64::from(rgb.r) + 0.587 * f64::from(rgb.g) + 0.114 * f64::from(rgb.b)) / 255.0
}

/// Whether the color reads as light (dark content belongs on top of it).
pub fn is_light(color: &str) -> bool {
    luminance(parse_hex(color)) > LIGHT_THRESHOLD
}

/// Bar style for a color outside night mode.
pub fn style_for(color: &str) -> BarStyle {
    if is_light(color) {
        BarStyle::Default
    } else {
        BarStyle::Translucent
    }
}

/// `#` followed by exactly six hex digits.
///
/// Advisory only. Nothing in the coordinator rejects colors that fail this.
pub fn is_well_formed(color: &str) -> bool {
    color
        .strip_prefix('#')
        .is_some_and(|d| d.len() == 6 && d.chars().all(|c| c.is_ascii_hexdigit()))
}
