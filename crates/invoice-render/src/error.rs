//! Error types for template rendering and theme materialization.
//!
//! - [`TemplateError`]: slot templates that fail to compile or render
//! - [`RegistryError`]: style registration conflicts
//! - [`ThemeError`]: everything that can stop a single theme from being
//!   generated, from configuration problems to I/O failures
//!
//! [`ColorError`] lives in [`crate::color`] next to the parser that raises it.

use std::path::PathBuf;

use crate::color::ColorError;

/// Error type for slot template compilation and rendering.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TemplateError {
    /// A `$slot` in the template has no value in the render data.
    #[error("template slot '${slot}' has no value")]
    MissingSlot { slot: String },

    /// A `$` that is neither `$$`, `$name` nor `${name}`.
    #[error("invalid placeholder at line {line}, column {column}")]
    InvalidPlaceholder { line: usize, column: usize },

    /// Named template was never added to the engine.
    #[error("template not found: {name}")]
    NotFound { name: String },
}

/// Error returned when building a [`StyleRegistry`](crate::style::StyleRegistry).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// A style with this name is already registered.
    #[error("style '{name}' is already registered")]
    DuplicateStyle { name: String },
}

/// Error type for everything that can fail while materializing a theme.
#[derive(Debug, thiserror::Error)]
pub enum ThemeError {
    /// The theme names a style absent from the registry.
    #[error("theme '{slug}' references unknown style '{style}'")]
    UnknownStyle { slug: String, style: String },

    /// A palette entry that must be a hex color is not one.
    #[error("palette key '{key}' holds malformed color '{value}'")]
    InvalidColor {
        key: String,
        value: String,
        #[source]
        source: ColorError,
    },

    /// A style function read a palette key that is not defined.
    #[error("palette has no value for '{key}'")]
    MissingToken { key: String },

    /// A theme overrides a token the skeleton does not know.
    #[error("theme '{slug}' overrides unknown palette key '{key}'")]
    UnknownToken { slug: String, key: String },

    /// Slug is empty or not usable as a CSS class and file name.
    #[error("invalid slug '{slug}': {reason}")]
    InvalidSlug { slug: String, reason: String },

    /// Several themes in one batch share a slug.
    #[error("slug '{slug}' is used by {count} themes")]
    DuplicateSlug { slug: String, count: usize },

    /// Rendering the stylesheet or document failed.
    #[error(transparent)]
    Template(#[from] TemplateError),

    /// The theme catalog could not be read or parsed.
    #[error("theme catalog error: {message}")]
    Catalog { message: String },

    /// Writing the generated document failed.
    #[error("failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ThemeError {
    /// Wraps a color parse failure with the palette key that held the value.
    pub fn invalid_color(key: impl Into<String>, source: ColorError) -> Self {
        let value = match &source {
            ColorError::InvalidHex { value } => value.clone(),
        };
        ThemeError::InvalidColor {
            key: key.into(),
            value,
            source,
        }
    }

    /// Creates an I/O error for `path`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ThemeError::Io {
            path: path.into(),
            source,
        }
    }

    /// True for errors caused by the theme definition rather than the environment.
    pub fn is_configuration(&self) -> bool {
        !matches!(self, ThemeError::Io { .. })
    }
}

impl From<serde_yaml::Error> for ThemeError {
    fn from(err: serde_yaml::Error) -> Self {
        ThemeError::Catalog {
            message: err.to_string(),
        }
    }
}
