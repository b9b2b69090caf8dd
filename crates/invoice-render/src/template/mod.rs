//! Template compilation and rendering for the invoice skeleton.
//!
//! Rendering a theme is two substitutions with the same engine:
//!
//! **Pass 1 - stylesheet**: palette tokens and the style's extra rules fill
//! the base CSS.
//! ```text
//! Template: .page { background: $surface; border: $page_border; }
//! After:    .page { background: #ffffff; border: 6px double #2244aa; }
//! ```
//!
//! **Pass 2 - document**: the stylesheet, slug and display name fill the
//! HTML skeleton.
//! ```text
//! Template: <body class="theme-$SLUG">
//! After:    <body class="theme-print">
//! ```
//!
//! Invoice fields (`{{InvoiceNumber}}`, …) are not slots and survive both
//! passes unchanged.
//!
//! ## Key Types
//!
//! - [`SlotEngine`]: named, pre-compiled templates
//! - [`CompiledTemplate`]: a parsed template, exposing its slot names
//! - [`skeleton`]: the embedded HTML and CSS templates

mod engine;
pub mod skeleton;

pub use engine::{CompiledTemplate, SlotEngine};
