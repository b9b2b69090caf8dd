//! # Invoice Render - Themed Invoice Template Generation
//!
//! `invoice-render` turns a compact palette and a named visual style into a
//! complete, self-contained HTML invoice template. Every theme shares one HTML
//! skeleton and one base stylesheet; what differs is the palette substituted
//! into the stylesheet and the extra CSS a style appends after it.
//!
//! The invoice fields themselves (`{{InvoiceNumber}}`, `{{ExtrasRows}}`, ...)
//! are never filled. They pass through untouched for a downstream mail-merge.
//!
//! ## Core Concepts
//!
//! - [`color`]: hex parsing and color math (mix, lighten, darken, rgba)
//! - [`Palette`]: design-token map with per-[`ColorScheme`] defaults and
//!   accent derivation
//! - [`StyleRegistry`]: named override functions, twelve built in
//! - [`ThemeDef`] / [`ThemeCatalog`]: declarative theme lists (YAML)
//! - [`Materializer`]: palette → style → stylesheet → document
//! - [`generate`]: batch validation and atomic file output
//!
//! ## Quick Start
//!
//! ```rust
//! use invoice_render::{Materializer, StyleRegistry, ThemeDef};
//!
//! let materializer = Materializer::new(StyleRegistry::builtin()).unwrap();
//! let theme = materializer
//!     .materialize(&ThemeDef::new("Acme", "double-frame").with_accent("#2244aa"))
//!     .unwrap();
//!
//! assert_eq!(theme.palette.get("radius"), Some("0px"));
//! assert!(theme.html.contains(r#"<body class="theme-acme">"#));
//! assert!(theme.html.contains("{{InvoiceNumber}}"));
//! ```
//!
//! ## Writing a batch
//!
//! ```rust,no_run
//! use invoice_render::{generate, GenerateOptions, Materializer, StyleRegistry, ThemeCatalog};
//!
//! let catalog = ThemeCatalog::builtin()?;
//! let materializer = Materializer::new(StyleRegistry::builtin())?;
//! let report = generate(&materializer, catalog.themes(), &GenerateOptions::default())?;
//!
//! for outcome in report.failed() {
//!     eprintln!("{outcome:?}");
//! }
//! # Ok::<(), invoice_render::ThemeError>(())
//! ```
//!
//! ## Failure semantics
//!
//! Nothing is ever filled with a blank. A stylesheet slot without a palette
//! value, an accent that is not `#rgb`/`#rrggbb`, a style name nobody
//! registered, or two themes claiming the same slug are all errors, reported
//! per theme (see [`output::FailurePolicy`]).

pub mod color;
mod error;
pub mod output;
pub mod palette;
pub mod style;
pub mod template;
pub mod theme;

pub use color::{ColorError, Rgb};
pub use error::{RegistryError, TemplateError, ThemeError};
pub use output::{generate, FailurePolicy, GenerateOptions, GenerationReport, ThemeOutcome};
pub use palette::{ColorScheme, Palette, TOKEN_KEYS};
pub use style::{StyleFn, StyleOutput, StyleRegistry};
pub use theme::{Materializer, RenderedTheme, ThemeCatalog, ThemeDef};
