//! Named style overrides.
//!
//! A style turns a theme's base palette into the palette that is actually
//! rendered, and may add CSS rules after the base stylesheet. Styles are plain
//! functions ([`StyleFn`]) collected in a [`StyleRegistry`].
//!
//! The twelve built-ins are listed in [`BUILTIN_STYLES`] and loaded by
//! [`StyleRegistry::builtin`].
//!
//! ```rust
//! use invoice_render::style::StyleRegistry;
//! use invoice_render::{ColorScheme, Palette};
//!
//! let registry = StyleRegistry::builtin();
//! let base = Palette::derive(ColorScheme::Light, "#2244aa").unwrap();
//! let out = registry.apply("acme", "double-frame", &base).unwrap();
//!
//! assert_eq!(out.palette.get("radius"), Some("0px"));
//! assert!(out.extra_css.starts_with("body.theme-acme "));
//! ```

mod builtin;
mod registry;

pub use builtin::BUILTIN_STYLES;
pub use registry::{StyleFn, StyleOutput, StyleRegistry};
