//! Theme catalogs loaded from YAML.
//!
//! A catalog is a YAML document with a single `themes` list of
//! [`ThemeDef`] entries. The built-in catalog is embedded from
//! `templates/themes.yaml`; a user file with the same shape replaces it.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ThemeError;

use super::definition::ThemeDef;

const BUILTIN_CATALOG: &str = include_str!("../../templates/themes.yaml");

/// An ordered list of theme definitions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThemeCatalog {
    themes: Vec<ThemeDef>,
}

impl ThemeCatalog {
    /// A catalog of the given themes, in order.
    pub fn new(themes: Vec<ThemeDef>) -> Self {
        Self { themes }
    }

    /// The twelve themes shipped with the crate.
    pub fn builtin() -> Result<Self, ThemeError> {
        Self::from_yaml(BUILTIN_CATALOG)
    }

    /// Parses a catalog document.
    pub fn from_yaml(source: &str) -> Result<Self, ThemeError> {
        Ok(serde_yaml::from_str(source)?)
    }

    /// Reads and parses a catalog file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ThemeError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| ThemeError::Catalog {
            message: format!("failed to read {}: {e}", path.display()),
        })?;
        serde_yaml::from_str(&source).map_err(|e| ThemeError::Catalog {
            message: format!("{}: {e}", path.display()),
        })
    }

    /// Keeps only the themes whose slug is listed, in catalog order.
    ///
    /// # Errors
    ///
    /// [`ThemeError::Catalog`] if a requested slug matches no theme.
    pub fn filter<S: AsRef<str>>(&self, slugs: &[S]) -> Result<Self, ThemeError> {
        let wanted: Vec<&str> = slugs.iter().map(|s| s.as_ref()).collect();
        if let Some(unknown) = wanted.iter().find(|slug| self.get(slug).is_none()) {
            return Err(ThemeError::Catalog {
                message: format!("no theme with slug '{unknown}'"),
            });
        }
        let themes = self
            .themes
            .iter()
            .filter(|def| wanted.contains(&&*def.slug()))
            .cloned()
            .collect();
        Ok(Self { themes })
    }

    /// First theme with the given slug.
    pub fn get(&self, slug: &str) -> Option<&ThemeDef> {
        self.themes.iter().find(|def| def.slug() == slug)
    }

    /// The themes in catalog order.
    pub fn themes(&self) -> &[ThemeDef] {
        &self.themes
    }

    /// Consumes the catalog, returning its themes.
    pub fn into_themes(self) -> Vec<ThemeDef> {
        self.themes
    }

    /// Iterates over the themes in catalog order.
    pub fn iter(&self) -> std::slice::Iter<'_, ThemeDef> {
        self.themes.iter()
    }

    /// Number of themes.
    pub fn len(&self) -> usize {
        self.themes.len()
    }

    /// Whether the catalog holds no themes.
    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }
}

impl<'a> IntoIterator for &'a ThemeCatalog {
    type Item = &'a ThemeDef;
    type IntoIter = std::slice::Iter<'a, ThemeDef>;

    fn into_iter(self) -> Self::IntoIter {
        self.themes.iter()
    }
}
