//! Themes: what to render, and the machinery that renders it.
//!
//! A [`ThemeDef`] names a style, a color scheme, an accent seed and optional
//! palette overrides. [`ThemeCatalog`] holds a list of them, either the
//! built-in twelve or a user YAML file. [`Materializer`] turns one definition
//! into a [`RenderedTheme`]:
//!
//! 1. scheme defaults, accent derivation, token overrides ([`Materializer::build_palette`])
//! 2. the style override, producing a new palette and extra CSS
//! 3. stylesheet substitution, then document substitution
//!
//! ```rust
//! use invoice_render::style::StyleRegistry;
//! use invoice_render::theme::{Materializer, ThemeCatalog};
//!
//! let catalog = ThemeCatalog::builtin().unwrap();
//! let materializer = Materializer::new(StyleRegistry::builtin()).unwrap();
//!
//! for def in &catalog {
//!     let theme = materializer.materialize(def).unwrap();
//!     assert!(theme.html.contains(&format!("theme-{}", theme.slug)));
//! }
//! ```

mod catalog;
mod definition;
mod materializer;

pub use catalog::ThemeCatalog;
pub use definition::{check_slug, slugify, ThemeDef};
pub use materializer::{Materializer, RenderedTheme};
