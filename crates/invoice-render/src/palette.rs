//! Design-token palettes.
//!
//! A [`Palette`] maps token keys (`accent`, `surface`, `radius`, …) to the
//! strings substituted into the base stylesheet. Values are hex colors, CSS
//! lengths, border shorthands, gradients or font stacks; the palette does not
//! care which until a style function asks for a [`color`](Palette::color).
//!
//! # Construction
//!
//! Theme palettes are layered:
//!
//! 1. [`Palette::document_defaults`]: complete token set for a [`ColorScheme`]
//! 2. [`Palette::derive`]: accent-dependent tokens recomputed from the seed
//! 3. theme overrides, applied by the theme module
//!
//! ```rust
//! use invoice_render::{ColorScheme, Palette};
//!
//! let palette = Palette::derive(ColorScheme::Light, "#2244aa").unwrap();
//! assert_eq!(palette.get("accent"), Some("#2244aa"));
//! assert!(palette.missing_tokens().is_empty());
//! ```

use std::collections::BTreeMap;
use std::fmt;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::error::ThemeError;

/// Every token referenced by the base stylesheet.
pub const TOKEN_KEYS: &[&str] = &[
    "accent",
    "surface",
    "surface_alt",
    "body_bg",
    "text_primary",
    "text_muted",
    "line",
    "radius",
    "shadow",
    "page_border",
    "hero_border",
    "hero_bg",
    "hero_text",
    "hero_flag",
    "table_border",
    "table_header_bg",
    "table_header_text",
    "table_row_alt",
    "pill_bg",
    "pill_text",
    "stat_bg",
    "stat_border",
    "stat_text",
    "stat_accent",
    "chip_bg",
    "logo_bg",
    "logo_text",
    "logo_border",
    "font_sans",
    "font_mono",
    "color_scheme",
];

/// Tokens that style functions feed into color math.
///
/// These must hold `#rgb` / `#rrggbb` values; anything else is rejected when
/// a theme is validated rather than halfway through rendering.
pub const COLOR_MATH_KEYS: &[&str] = &["accent", "surface", "surface_alt"];

/// Light or dark document base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    #[default]
    Light,
    Dark,
}

impl ColorScheme {
    /// The CSS `color-scheme` value.
    pub fn as_str(self) -> &'static str {
        match self {
            ColorScheme::Light => "light",
            ColorScheme::Dark => "dark",
        }
    }
}

impl fmt::Display for ColorScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const FONT_SANS: &str =
    "\"Inter\", \"Segoe UI\", system-ui, -apple-system, \"Helvetica Neue\", Arial, sans-serif";
const FONT_MONO: &str =
    "\"JetBrains Mono\", \"SFMono-Regular\", Menlo, Consolas, \"Liberation Mono\", monospace";

static LIGHT_DEFAULTS: Lazy<Palette> = Lazy::new(|| {
    Palette::from_pairs(&[
        ("accent", "#2563eb"),
        ("surface", "#ffffff"),
        ("surface_alt", "#f8fafc"),
        ("body_bg", "#eef2f7"),
        ("text_primary", "#0f172a"),
        ("text_muted", "#64748b"),
        ("line", "#e2e8f0"),
        ("radius", "18px"),
        ("shadow", "0 24px 60px rgba(15, 23, 42, 0.12)"),
        ("page_border", "1px solid #e2e8f0"),
        ("hero_border", "1px solid #e2e8f0"),
        ("hero_bg", "#f8fafc"),
        ("hero_text", "#0f172a"),
        ("hero_flag", "#2563eb"),
        ("table_border", "1px solid #e2e8f0"),
        ("table_header_bg", "#f1f5f9"),
        ("table_header_text", "#334155"),
        ("table_row_alt", "#f8fafc"),
        ("pill_bg", "#dbeafe"),
        ("pill_text", "#1d4ed8"),
        ("stat_bg", "#2563eb"),
        ("stat_border", "1px solid #1d4ed8"),
        ("stat_text", "#dbeafe"),
        ("stat_accent", "#ffffff"),
        ("chip_bg", "#eff6ff"),
        ("logo_bg", "#2563eb"),
        ("logo_text", "#ffffff"),
        ("logo_border", "1px solid #1d4ed8"),
        ("font_sans", FONT_SANS),
        ("font_mono", FONT_MONO),
        ("color_scheme", "light"),
    ])
});

static DARK_DEFAULTS: Lazy<Palette> = Lazy::new(|| {
    Palette::from_pairs(&[
        ("accent", "#38bdf8"),
        ("surface", "#111827"),
        ("surface_alt", "#1f2937"),
        ("body_bg", "#0b1120"),
        ("text_primary", "#e5e7eb"),
        ("text_muted", "#9ca3af"),
        ("line", "#374151"),
        ("radius", "18px"),
        ("shadow", "0 30px 80px rgba(0, 0, 0, 0.45)"),
        ("page_border", "1px solid #1f2937"),
        ("hero_border", "1px solid #374151"),
        ("hero_bg", "#0f172a"),
        ("hero_text", "#f9fafb"),
        ("hero_flag", "#7dd3fc"),
        ("table_border", "1px solid #374151"),
        ("table_header_bg", "#0f172a"),
        ("table_header_text", "#e0f2fe"),
        ("table_row_alt", "#162032"),
        ("pill_bg", "rgba(56, 189, 248, 0.18)"),
        ("pill_text", "#bae6fd"),
        ("stat_bg", "#0c4a6e"),
        ("stat_border", "1px solid rgba(56, 189, 248, 0.45)"),
        ("stat_text", "#e0f2fe"),
        ("stat_accent", "#ffffff"),
        ("chip_bg", "rgba(56, 189, 248, 0.12)"),
        ("logo_bg", "#0c4a6e"),
        ("logo_text", "#e0f2fe"),
        ("logo_border", "1px solid rgba(56, 189, 248, 0.5)"),
        ("font_sans", FONT_SANS),
        ("font_mono", FONT_MONO),
        ("color_scheme", "dark"),
    ])
});

/// A named set of design-token values driving one theme.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Palette {
    tokens: BTreeMap<String, String>,
}

impl Palette {
    /// Creates an empty palette.
    pub fn new() -> Self {
        Self {
            tokens: BTreeMap::new(),
        }
    }

    fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        pairs.iter().map(|(k, v)| (*k, *v)).collect()
    }

    /// The complete document-wide token set for `scheme`.
    pub fn document_defaults(scheme: ColorScheme) -> Self {
        match scheme {
            ColorScheme::Light => LIGHT_DEFAULTS.clone(),
            ColorScheme::Dark => DARK_DEFAULTS.clone(),
        }
    }

    /// Document defaults with every accent-dependent token recomputed from `accent`.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError::InvalidColor`] naming `accent` if the seed is not
    /// a hex color.
    pub fn derive(scheme: ColorScheme, accent: &str) -> Result<Self, ThemeError> {
        let a = Rgb::from_hex(accent).map_err(|e| ThemeError::invalid_color("accent", e))?;
        let mut palette = Self::document_defaults(scheme);
        palette.set("accent", a.to_hex());

        match scheme {
            ColorScheme::Light => {
                palette.set("hero_flag", a.to_hex());
                palette.set("hero_bg", a.lighten(0.94).to_hex());
                palette.set("pill_bg", a.lighten(0.85).to_hex());
                palette.set("pill_text", a.darken(0.35).to_hex());
                palette.set("stat_bg", a.to_hex());
                palette.set("stat_border", format!("1px solid {}", a.darken(0.2)));
                palette.set("stat_text", a.lighten(0.85).to_hex());
                palette.set("chip_bg", a.lighten(0.9).to_hex());
                palette.set("table_header_bg", a.lighten(0.88).to_hex());
                palette.set("table_header_text", a.darken(0.45).to_hex());
                palette.set("logo_bg", a.to_hex());
                palette.set("logo_border", format!("1px solid {}", a.darken(0.15)));
            }
            ColorScheme::Dark => {
                palette.set("hero_flag", a.lighten(0.25).to_hex());
                palette.set("hero_bg", a.darken(0.78).to_hex());
                palette.set("pill_bg", a.to_rgba(0.18));
                palette.set("pill_text", a.lighten(0.55).to_hex());
                palette.set("stat_bg", a.darken(0.55).to_hex());
                palette.set("stat_border", format!("1px solid {}", a.to_rgba(0.45)));
                palette.set("stat_text", a.lighten(0.7).to_hex());
                palette.set("chip_bg", a.to_rgba(0.12));
                palette.set("table_header_bg", a.darken(0.65).to_hex());
                palette.set("table_header_text", a.lighten(0.7).to_hex());
                palette.set("logo_bg", a.darken(0.6).to_hex());
                palette.set("logo_text", a.lighten(0.8).to_hex());
                palette.set("logo_border", format!("1px solid {}", a.to_rgba(0.5)));
            }
        }

        Ok(palette)
    }

    /// Returns the value for `key`, if set.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.tokens.get(key).map(String::as_str)
    }

    /// Returns the value for `key` or a [`ThemeError::MissingToken`].
    pub fn require(&self, key: &str) -> Result<&str, ThemeError> {
        self.get(key).ok_or_else(|| ThemeError::MissingToken {
            key: key.to_string(),
        })
    }

    /// Parses the value for `key` as a hex color.
    ///
    /// # Errors
    ///
    /// [`ThemeError::MissingToken`] if unset, [`ThemeError::InvalidColor`]
    /// naming the key if the value is not `#rgb` / `#rrggbb`.
    pub fn color(&self, key: &str) -> Result<Rgb, ThemeError> {
        let value = self.require(key)?;
        Rgb::from_hex(value).map_err(|e| ThemeError::invalid_color(key, e))
    }

    /// Sets `key`, returning the previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.tokens.insert(key.into(), value.into())
    }

    /// Sets `key`, returning `self` for chaining.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Removes `key`, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.tokens.remove(key)
    }

    /// Whether `key` is set.
    pub fn contains(&self, key: &str) -> bool {
        self.tokens.contains_key(key)
    }

    /// Overwrites entries with every pair in `overrides`.
    pub fn merge<'a, I>(&mut self, overrides: I)
    where
        I: IntoIterator<Item = (&'a String, &'a String)>,
    {
        for (key, value) in overrides {
            self.tokens.insert(key.clone(), value.clone());
        }
    }

    /// Token keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.tokens.keys().map(String::as_str)
    }

    /// `(key, value)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.tokens.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of tokens set.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether no token is set.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Entries of [`TOKEN_KEYS`] that are not set.
    pub fn missing_tokens(&self) -> Vec<&'static str> {
        TOKEN_KEYS
            .iter()
            .copied()
            .filter(|key| !self.contains(key))
            .collect()
    }

    /// The palette as a JSON object, the data shape the slot engine renders.
    pub fn to_slots(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.tokens
                .iter()
                .map(|(k, v)| (k.clone(), serde_json::Value::String(v.clone())))
                .collect(),
        )
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Palette {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            tokens: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Whether `key` is a token the base stylesheet knows.
pub fn is_token_key(key: &str) -> bool {
    TOKEN_KEYS.contains(&key)
}
