//! Hex color math for palette derivation.
//!
//! Every palette transform in the style overrides goes through this module:
//! parsing `#rgb` / `#rrggbb` strings, linear mixing in sRGB space, and
//! rendering CSS `rgba()` values.
//!
//! Two equivalent surfaces are provided:
//!
//! - free functions over strings ([`hex_to_rgb`], [`mix`], [`lighten`], …),
//!   convenient when working directly with palette values
//! - methods on [`Rgb`], used by the style functions once a palette entry has
//!   been parsed
//!
//! # Example
//!
//! ```rust
//! use invoice_render::color::{lighten, mix, Rgb};
//!
//! assert_eq!(mix("#000000", "#ffffff", 0.5).unwrap(), "#808080");
//! assert_eq!(lighten("#2244aa", 1.0).unwrap(), "#ffffff");
//!
//! let accent: Rgb = "#2244aa".parse().unwrap();
//! assert_eq!(accent.to_rgba(0.08), "rgba(34, 68, 170, 0.08)");
//! ```
//!
//! # Rounding
//!
//! Channels are computed as `f64` and rounded to the nearest integer with ties
//! going to the even neighbour, then clamped to `0..=255`. Clamping happens
//! after rounding so `255.4` and `-0.4` land on the boundaries instead of
//! wrapping.

use std::fmt;
use std::str::FromStr;

/// Error returned for color strings that are not 3- or 6-digit hex.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorError {
    /// Wrong length or a non-hex digit.
    #[error("invalid hex color '{value}' (expected #rgb or #rrggbb)")]
    InvalidHex { value: String },
}

// ─── RGB type ───────────────────────────────────────────────────────────────

/// An sRGB color triplet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Pure white, the `lighten` target.
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    /// Pure black, the `darken` target.
    pub const BLACK: Rgb = Rgb(0, 0, 0);

    /// Parses a hex color with or without a leading `#`.
    ///
    /// Three-digit shorthand is expanded by duplicating each digit, so
    /// `#2a4` is `#22aa44`.
    pub fn from_hex(color: &str) -> Result<Self, ColorError> {
        let hex = color.strip_prefix('#').unwrap_or(color);
        let invalid = || ColorError::InvalidHex {
            value: color.to_string(),
        };

        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());

        match hex.len() {
            // #rgb -> #rrggbb
            3 => Ok(Rgb(
                channel(&hex[0..1])? * 17,
                channel(&hex[1..2])? * 17,
                channel(&hex[2..3])? * 17,
            )),
            6 => Ok(Rgb(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            _ => Err(invalid()),
        }
    }

    /// Builds a color from floating point channels, rounding then clamping.
    pub fn from_channels(channels: [f64; 3]) -> Self {
        Rgb(
            quantize(channels[0]),
            quantize(channels[1]),
            quantize(channels[2]),
        )
    }

    /// Returns the channels as floats, ready for interpolation.
    pub fn channels(self) -> [f64; 3] {
        [self.0 as f64, self.1 as f64, self.2 as f64]
    }

    /// Formats as lowercase `#rrggbb`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }

    /// Linear interpolation toward `other`.
    ///
    /// `weight` is clamped to `0.0..=1.0`: `0.0` yields `self`, `1.0` yields
    /// `other`. Out-of-range weights are accepted and clamped, not rejected.
    pub fn mix(self, other: Rgb, weight: f64) -> Rgb {
        let w = clamp_weight(weight);
        let a = self.channels();
        let b = other.channels();
        Rgb::from_channels([
            a[0] * (1.0 - w) + b[0] * w,
            a[1] * (1.0 - w) + b[1] * w,
            a[2] * (1.0 - w) + b[2] * w,
        ])
    }

    /// Mixes toward white by `amount`.
    pub fn lighten(self, amount: f64) -> Rgb {
        self.mix(Rgb::WHITE, amount)
    }

    /// Mixes toward black by `amount`.
    pub fn darken(self, amount: f64) -> Rgb {
        self.mix(Rgb::BLACK, amount)
    }

    /// A pale tint of the color, `lighten(0.7)`.
    pub fn soften(self) -> Rgb {
        self.lighten(0.7)
    }

    /// Renders a CSS `rgba(r, g, b, a)` value. `alpha` is written as given.
    pub fn to_rgba(self, alpha: f64) -> String {
        format!("rgba({}, {}, {}, {})", self.0, self.1, self.2, alpha)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

impl FromStr for Rgb {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rgb::from_hex(s)
    }
}

/// Round half to even, then clamp into the channel range.
fn quantize(value: f64) -> u8 {
    value.round_ties_even().clamp(0.0, 255.0) as u8
}

fn clamp_weight(weight: f64) -> f64 {
    if weight.is_nan() {
        return 0.0;
    }
    weight.clamp(0.0, 1.0)
}

// ─── String API ─────────────────────────────────────────────────────────────

/// Parses a hex color into its `(r, g, b)` channels.
pub fn hex_to_rgb(color: &str) -> Result<Rgb, ColorError> {
    Rgb::from_hex(color)
}

/// Formats floating point channels as `#rrggbb`, rounding before clamping.
pub fn rgb_to_hex(rgb: [f64; 3]) -> String {
    Rgb::from_channels(rgb).to_hex()
}

/// Interpolates between two hex colors. See [`Rgb::mix`].
pub fn mix(color_a: &str, color_b: &str, weight: f64) -> Result<String, ColorError> {
    let a = Rgb::from_hex(color_a)?;
    let b = Rgb::from_hex(color_b)?;
    Ok(a.mix(b, weight).to_hex())
}

/// Mixes a hex color toward white.
pub fn lighten(color: &str, amount: f64) -> Result<String, ColorError> {
    mix(color, "#ffffff", amount)
}

/// Mixes a hex color toward black.
pub fn darken(color: &str, amount: f64) -> Result<String, ColorError> {
    mix(color, "#000000", amount)
}

/// Renders a hex color as CSS `rgba()` with the given alpha.
pub fn as_rgba(color: &str, alpha: f64) -> Result<String, ColorError> {
    Ok(Rgb::from_hex(color)?.to_rgba(alpha))
}

/// Shorthand for `lighten(color, 0.7)`.
pub fn soften(color: &str) -> Result<String, ColorError> {
    lighten(color, 0.7)
}

#[cfg(test)]
mod tests {
    use super::*;

    // =====================================================================
    // Parsing
    // =====================================================================

    #[test]
    fn test_parses_six_digit_hex() {
        assert_eq!(hex_to_rgb("#2244aa").unwrap(), Rgb(0x22, 0x44, 0xaa));
    }

    #[test]
    fn test_parses_without_hash() {
        assert_eq!(hex_to_rgb("ff6b35").unwrap(), Rgb(255, 107, 53));
    }

    #[test]
    fn test_expands_shorthand() {
        assert_eq!(hex_to_rgb("#fff").unwrap(), Rgb::WHITE);
        assert_eq!(hex_to_rgb("#2a4").unwrap(), Rgb(0x22, 0xaa, 0x44));
    }

    #[test]
    fn test_uppercase_digits_accepted() {
        assert_eq!(hex_to_rgb("#ABCDEF").unwrap(), Rgb(0xab, 0xcd, 0xef));
    }

    #[test]
    fn test_rejects_wrong_length() {
        for bad in ["", "#", "#ff", "#ffff", "#fffff", "#fffffff"] {
            assert!(hex_to_rgb(bad).is_err(), "{:?} should be rejected", bad);
        }
    }

    #[test]
    fn test_rejects_non_hex_digits() {
        assert!(hex_to_rgb("#ggg").is_err());
        assert!(hex_to_rgb("#12345z").is_err());
        assert!(hex_to_rgb("+12345").is_err());
    }

    #[test]
    fn test_rejects_non_ascii_without_panicking() {
        assert!(hex_to_rgb("#é12").is_err());
        assert!(hex_to_rgb("ééé").is_err());
    }

    #[test]
    fn test_rejects_css_expressions() {
        let err = hex_to_rgb("rgba(255, 255, 255, 0.9)").unwrap_err();
        assert!(err.to_string().contains("rgba(255, 255, 255, 0.9)"));
    }

    // =====================================================================
    // Formatting
    // =====================================================================

    #[test]
    fn test_formats_lowercase_pairs() {
        assert_eq!(rgb_to_hex([171.0, 205.0, 239.0]), "#abcdef");
        assert_eq!(rgb_to_hex([0.0, 5.0, 16.0]), "#000510");
    }

    #[test]
    fn test_clamps_after_rounding() {
        assert_eq!(rgb_to_hex([255.4, -0.4, 300.0]), "#ff0000");
        assert_eq!(rgb_to_hex([-20.0, 0.0, 0.0]), "#000000");
    }

    #[test]
    fn test_rounds_ties_to_even() {
        assert_eq!(rgb_to_hex([127.5, 128.5, 0.5]), "#808000");
    }

    #[test]
    fn test_display_matches_to_hex() {
        let c = Rgb(1, 2, 3);
        assert_eq!(c.to_string(), c.to_hex());
    }

    // =====================================================================
    // Mixing
    // =====================================================================

    #[test]
    fn test_mix_endpoints() {
        assert_eq!(mix("#2244aa", "#ff0000", 0.0).unwrap(), "#2244aa");
        assert_eq!(mix("#2244aa", "#ff0000", 1.0).unwrap(), "#ff0000");
    }

    #[test]
    fn test_mix_midpoint() {
        assert_eq!(mix("#000000", "#ffffff", 0.5).unwrap(), "#808080");
    }

    #[test]
    fn test_mix_clamps_weight() {
        assert_eq!(
            mix("#2244aa", "#ff0000", -5.0).unwrap(),
            mix("#2244aa", "#ff0000", 0.0).unwrap()
        );
        assert_eq!(
            mix("#2244aa", "#ff0000", 5.0).unwrap(),
            mix("#2244aa", "#ff0000", 1.0).unwrap()
        );
    }

    #[test]
    fn test_mix_propagates_parse_errors() {
        assert!(mix("#2244aa", "nope", 0.5).is_err());
        assert!(mix("nope", "#2244aa", 0.5).is_err());
    }

    #[test]
    fn test_lighten_and_darken_bounds() {
        assert_eq!(lighten("#2244aa", 0.0).unwrap(), "#2244aa");
        assert_eq!(lighten("#2244aa", 1.0).unwrap(), "#ffffff");
        assert_eq!(darken("#2244aa", 0.0).unwrap(), "#2244aa");
        assert_eq!(darken("#2244aa", 1.0).unwrap(), "#000000");
    }

    #[test]
    fn test_lighten_partial() {
        // 0x22 + (255 - 0x22) * 0.5 = 144.5 -> 144
        assert_eq!(lighten("#222222", 0.5).unwrap(), "#909090");
    }

    #[test]
    fn test_soften_is_lighten_seventy() {
        assert_eq!(soften("#2244aa").unwrap(), lighten("#2244aa", 0.7).unwrap());
        assert_eq!(
            Rgb::from_hex("#2244aa").unwrap().soften(),
            Rgb::from_hex("#2244aa").unwrap().lighten(0.7)
        );
    }

    // =====================================================================
    // rgba()
    // =====================================================================

    #[test]
    fn test_rgba_rendering() {
        assert_eq!(as_rgba("#2244aa", 0.08).unwrap(), "rgba(34, 68, 170, 0.08)");
        assert_eq!(as_rgba("#fff", 0.9).unwrap(), "rgba(255, 255, 255, 0.9)");
    }

    #[test]
    fn test_rgba_alpha_not_clamped() {
        assert_eq!(as_rgba("#000", 1.5).unwrap(), "rgba(0, 0, 0, 1.5)");
    }
}
