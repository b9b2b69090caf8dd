//! Name → override function table.
//!
//! [`StyleRegistry`] is built once, before any theme is processed, and then
//! only read. It is an ordinary value: the materializer owns one and hands out
//! shared references, so there is no process-global table to initialize.
//!
//! # Registration policy
//!
//! Names are unique. Registering a name twice is a [`RegistryError`] rather
//! than a silent replacement, so a typo in a theme pack cannot shadow a
//! built-in style unnoticed.
//!
//! # Example
//!
//! ```rust
//! use invoice_render::style::{StyleOutput, StyleRegistry};
//! use invoice_render::{Palette, ThemeError};
//!
//! fn plain(_slug: &str, base: &Palette) -> Result<StyleOutput, ThemeError> {
//!     Ok(StyleOutput::unchanged(base))
//! }
//!
//! let mut registry = StyleRegistry::builtin();
//! registry.register("plain", plain).unwrap();
//! assert!(registry.register("plain", plain).is_err());
//! assert!(registry.contains("print"));
//! ```

use std::collections::BTreeMap;

use crate::error::{RegistryError, ThemeError};
use crate::palette::Palette;

use super::builtin::BUILTIN_STYLES;

/// What a style override produces: the palette to render with and the rules
/// appended after the base stylesheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleOutput {
    /// Palette after the style's adjustments.
    pub palette: Palette,
    /// Extra CSS scoped under `body.theme-{slug}`. May be empty.
    pub extra_css: String,
}

impl StyleOutput {
    /// A copy of `base` with no extra CSS.
    pub fn unchanged(base: &Palette) -> Self {
        Self {
            palette: base.clone(),
            extra_css: String::new(),
        }
    }

    /// A copy of `base` plus `extra_css`.
    pub fn with_css(base: &Palette, extra_css: impl Into<String>) -> Self {
        Self {
            palette: base.clone(),
            extra_css: extra_css.into(),
        }
    }
}

/// A style override.
///
/// Receives the theme slug and the theme's base palette, returns a new
/// palette and extra CSS. The base palette is borrowed immutably; any changes
/// land in the returned copy.
pub type StyleFn = fn(slug: &str, base: &Palette) -> Result<StyleOutput, ThemeError>;

/// Registry of named style overrides.
#[derive(Debug, Clone, Default)]
pub struct StyleRegistry {
    styles: BTreeMap<String, StyleFn>,
}

impl StyleRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            styles: BTreeMap::new(),
        }
    }

    /// A registry holding the twelve built-in styles.
    pub fn builtin() -> Self {
        Self {
            styles: BUILTIN_STYLES
                .iter()
                .map(|(name, style)| (name.to_string(), *style))
                .collect(),
        }
    }

    /// Registers `style` under `name`.
    ///
    /// # Errors
    ///
    /// [`RegistryError::DuplicateStyle`] if the name is taken.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        style: StyleFn,
    ) -> Result<(), RegistryError> {
        let name = name.into();
        if self.styles.contains_key(&name) {
            return Err(RegistryError::DuplicateStyle { name });
        }
        self.styles.insert(name, style);
        Ok(())
    }

    /// Registers `style`, returning `self` for chaining.
    pub fn with_style(
        mut self,
        name: impl Into<String>,
        style: StyleFn,
    ) -> Result<Self, RegistryError> {
        self.register(name, style)?;
        Ok(self)
    }

    /// Looks up a style by name.
    pub fn get(&self, name: &str) -> Option<StyleFn> {
        self.styles.get(name).copied()
    }

    /// Whether a style is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.styles.contains_key(name)
    }

    /// Looks up the style a theme asks for.
    ///
    /// # Errors
    ///
    /// [`ThemeError::UnknownStyle`] carrying both the slug and the style name.
    pub fn resolve(&self, slug: &str, name: &str) -> Result<StyleFn, ThemeError> {
        self.get(name).ok_or_else(|| ThemeError::UnknownStyle {
            slug: slug.to_string(),
            style: name.to_string(),
        })
    }

    /// Resolves `name` and runs it against `base`.
    pub fn apply(&self, slug: &str, name: &str, base: &Palette) -> Result<StyleOutput, ThemeError> {
        let style = self.resolve(slug, name)?;
        style(slug, base)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.styles.keys().map(String::as_str)
    }

    /// Number of registered styles.
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    /// Whether no style is registered.
    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }
}
