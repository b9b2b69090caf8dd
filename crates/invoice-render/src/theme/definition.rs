//! Declarative theme definitions.

use std::borrow::Cow;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ThemeError;
use crate::palette::ColorScheme;

/// One theme as written in a catalog.
///
/// Only `name` and `style` are required. Without `slug` the slug is derived
/// from `name`; without `accent` the scheme's document defaults are used
/// unchanged. `tokens` override individual palette entries last.
///
/// ```yaml
/// - name: Acme Consulting
///   style: double-frame
///   accent: "#2244aa"
///   tokens:
///     radius: 4px
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThemeDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    pub name: String,
    pub style: String,
    #[serde(default)]
    pub scheme: ColorScheme,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accent: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tokens: BTreeMap<String, String>,
}

impl ThemeDef {
    /// A light theme with no accent or token overrides.
    pub fn new(name: impl Into<String>, style: impl Into<String>) -> Self {
        Self {
            slug: None,
            name: name.into(),
            style: style.into(),
            scheme: ColorScheme::Light,
            accent: None,
            tokens: BTreeMap::new(),
        }
    }

    /// Sets an explicit slug instead of deriving one from the name.
    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    /// Sets the color scheme.
    pub fn with_scheme(mut self, scheme: ColorScheme) -> Self {
        self.scheme = scheme;
        self
    }

    /// Sets the accent seed for palette derivation.
    pub fn with_accent(mut self, accent: impl Into<String>) -> Self {
        self.accent = Some(accent.into());
        self
    }

    /// Adds a palette override.
    pub fn with_token(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tokens.insert(key.into(), value.into());
        self
    }

    /// The explicit slug, or one derived from the display name.
    pub fn slug(&self) -> Cow<'_, str> {
        match &self.slug {
            Some(slug) => Cow::Borrowed(slug.as_str()),
            None => Cow::Owned(slugify(&self.name)),
        }
    }
}

/// Turns a display name into a slug.
///
/// Non-ASCII text is transliterated first, then every run of characters other
/// than ASCII letters and digits becomes a single `-`.
///
/// ```rust
/// use invoice_render::theme::slugify;
///
/// assert_eq!(slugify("Café Crème"), "cafe-creme");
/// assert_eq!(slugify("  Dark / Glow!  "), "dark-glow");
/// ```
pub fn slugify(name: &str) -> String {
    let ascii = deunicode::deunicode(name);
    let mut slug = String::with_capacity(ascii.len());
    let mut pending_dash = false;
    for c in ascii.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug
}

/// Checks that `slug` is usable as a CSS class suffix and a file stem.
///
/// # Errors
///
/// [`ThemeError::InvalidSlug`] if the slug is empty, contains anything other
/// than `a-z`, `0-9` and `-`, or starts with `-`.
pub fn check_slug(slug: &str) -> Result<(), ThemeError> {
    let invalid = |reason: &str| ThemeError::InvalidSlug {
        slug: slug.to_string(),
        reason: reason.to_string(),
    };

    let first = slug.chars().next().ok_or_else(|| invalid("slug is empty"))?;
    if let Some(bad) = slug
        .chars()
        .find(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-'))
    {
        return Err(invalid(&format!("character '{bad}' is not allowed")));
    }
    if first == '-' {
        return Err(invalid("must start with a letter or digit"));
    }
    Ok(())
}
