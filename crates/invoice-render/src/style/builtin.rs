//! The twelve built-in styles.
//!
//! Each function reads what it needs from the base palette, returns a
//! modified copy and, usually, a few rules scoped to `body.theme-{slug}`.
//!
//! | Style | Palette changes | Extra rules |
//! |---|---|---|
//! | `minimal-border` | | accent stripe on the page's left edge |
//! | `double-frame` | square corners, double page/hero borders | thicker table card border |
//! | `gradient-panel` | diagonal accent gradient in the hero | dashed inset outline on the hero |
//! | `ledger-pillars` | | accent borders left and right of the hero |
//! | `ribbon-top` | | accent stripe on top of the page |
//! | `dark-glow` | | backdrop blur, accent row hover |
//! | `dashed-ledger` | dashed/dotted borders | |
//! | `print` | white surfaces, black lines, no shadow | all shadows off |
//! | `blueprint` | | 28px accent grid behind the page |
//! | `glass` | translucent surfaces and border | backdrop blur |
//! | `accent-bottom` | | accent stripe under the page |
//! | `banded-hero` | | diagonal tint bands in the hero |

use crate::color::Rgb;
use crate::error::ThemeError;
use crate::palette::Palette;

use super::registry::{StyleFn, StyleOutput};

/// Built-in styles in registration order.
pub const BUILTIN_STYLES: &[(&str, StyleFn)] = &[
    ("minimal-border", minimal_border),
    ("double-frame", double_frame),
    ("gradient-panel", gradient_panel),
    ("ledger-pillars", ledger_pillars),
    ("ribbon-top", ribbon_top),
    ("dark-glow", dark_glow),
    ("dashed-ledger", dashed_ledger),
    ("print", print),
    ("blueprint", blueprint),
    ("glass", glass),
    ("accent-bottom", accent_bottom),
    ("banded-hero", banded_hero),
];

/// Accumulates rules scoped to one theme's body class.
struct ScopedCss<'a> {
    slug: &'a str,
    out: String,
}

impl<'a> ScopedCss<'a> {
    fn new(slug: &'a str) -> Self {
        Self {
            slug,
            out: String::new(),
        }
    }

    fn rule<S: AsRef<str>>(mut self, selector: &str, declarations: &[S]) -> Self {
        self.out
            .push_str(&format!("body.theme-{} {} {{\n", self.slug, selector));
        for declaration in declarations {
            self.out.push_str(&format!("  {};\n", declaration.as_ref()));
        }
        self.out.push_str("}\n");
        self
    }

    fn finish(self) -> String {
        self.out
    }
}

fn minimal_border(slug: &str, base: &Palette) -> Result<StyleOutput, ThemeError> {
    let accent = base.color("accent")?;
    let css = ScopedCss::new(slug)
        .rule(".page", &[format!("border-left: 8px solid {accent}")])
        .rule(".hero__flag", &["letter-spacing: 0.3em"])
        .finish();
    Ok(StyleOutput::with_css(base, css))
}

fn double_frame(slug: &str, base: &Palette) -> Result<StyleOutput, ThemeError> {
    let accent = base.color("accent")?;
    let palette = base
        .clone()
        .with("radius", "0px")
        .with("page_border", format!("6px double {accent}"))
        .with("hero_border", format!("3px double {accent}"));
    let css = ScopedCss::new(slug)
        .rule(".table-card", &["border-width: 2px"])
        .finish();
    Ok(StyleOutput {
        palette,
        extra_css: css,
    })
}

fn gradient_panel(slug: &str, base: &Palette) -> Result<StyleOutput, ThemeError> {
    let accent = base.color("accent")?;
    let radius = base.require("radius")?;
    let palette = base.clone().with(
        "hero_bg",
        format!(
            "linear-gradient(135deg, {}, {})",
            accent.lighten(0.85),
            accent.lighten(0.65)
        ),
    );
    let css = ScopedCss::new(slug)
        .rule(
            "header.hero::after",
            &[
                "content: \"\"".to_string(),
                "position: absolute".to_string(),
                "inset: 12px".to_string(),
                format!("border: 1px dashed {}", accent.soften()),
                format!("border-radius: calc({radius} / 1.4)"),
                "pointer-events: none".to_string(),
            ],
        )
        .finish();
    Ok(StyleOutput {
        palette,
        extra_css: css,
    })
}

fn ledger_pillars(slug: &str, base: &Palette) -> Result<StyleOutput, ThemeError> {
    let accent = base.color("accent")?;
    let css = ScopedCss::new(slug)
        .rule(
            "header.hero",
            &[
                format!("border-left: 10px solid {accent}"),
                format!("border-right: 10px solid {accent}"),
            ],
        )
        .finish();
    Ok(StyleOutput::with_css(base, css))
}

fn ribbon_top(slug: &str, base: &Palette) -> Result<StyleOutput, ThemeError> {
    let accent = base.color("accent")?;
    let css = ScopedCss::new(slug)
        .rule(".page", &[format!("border-top: 12px solid {accent}")])
        .finish();
    Ok(StyleOutput::with_css(base, css))
}

fn dark_glow(slug: &str, base: &Palette) -> Result<StyleOutput, ThemeError> {
    let accent = base.color("accent")?;
    let css = ScopedCss::new(slug)
        .rule(".page", &["backdrop-filter: blur(14px)"])
        .rule(
            "table tbody tr:hover",
            &[format!("background: {}", accent.to_rgba(0.08))],
        )
        .finish();
    Ok(StyleOutput::with_css(base, css))
}

fn dashed_ledger(_slug: &str, base: &Palette) -> Result<StyleOutput, ThemeError> {
    let accent = base.color("accent")?;
    let palette = base
        .clone()
        .with("page_border", format!("4px dashed {accent}"))
        .with("hero_border", format!("3px dotted {accent}"))
        .with("table_border", format!("2px dotted {}", accent.soften()));
    Ok(StyleOutput {
        palette,
        extra_css: String::new(),
    })
}

fn print(slug: &str, base: &Palette) -> Result<StyleOutput, ThemeError> {
    let palette = base
        .clone()
        .with("shadow", "none")
        .with("body_bg", "#ffffff")
        .with("surface", "#ffffff")
        .with("surface_alt", "#ffffff")
        .with("page_border", "2px solid #000000")
        .with("hero_border", "1px solid #000000")
        .with("line", "#000000")
        .with("table_border", "1px solid #000000");
    let css = ScopedCss::new(slug)
        .rule("*", &["box-shadow: none !important"])
        .finish();
    Ok(StyleOutput {
        palette,
        extra_css: css,
    })
}

fn blueprint(slug: &str, base: &Palette) -> Result<StyleOutput, ThemeError> {
    let grid = base.color("accent")?.to_rgba(0.08);
    let css = ScopedCss::new(slug)
        .rule(
            ".page",
            &[
                format!(
                    "background-image: linear-gradient({grid} 1px, transparent 1px), \
                     linear-gradient(90deg, {grid} 1px, transparent 1px)"
                ),
                "background-size: 28px 28px".to_string(),
            ],
        )
        .finish();
    Ok(StyleOutput::with_css(base, css))
}

fn glass(slug: &str, base: &Palette) -> Result<StyleOutput, ThemeError> {
    let surface = base.color("surface")?;
    let surface_alt = base.color("surface_alt")?;
    let palette = base
        .clone()
        .with("surface", surface.to_rgba(0.9))
        .with("surface_alt", surface_alt.to_rgba(0.85))
        .with(
            "page_border",
            format!("1px solid {}", Rgb::WHITE.to_rgba(0.08)),
        );
    let css = ScopedCss::new(slug)
        .rule(".page", &["backdrop-filter: blur(20px)"])
        .finish();
    Ok(StyleOutput {
        palette,
        extra_css: css,
    })
}

fn accent_bottom(slug: &str, base: &Palette) -> Result<StyleOutput, ThemeError> {
    let accent = base.color("accent")?;
    let css = ScopedCss::new(slug)
        .rule(".page", &[format!("border-bottom: 10px solid {accent}")])
        .finish();
    Ok(StyleOutput::with_css(base, css))
}

fn banded_hero(slug: &str, base: &Palette) -> Result<StyleOutput, ThemeError> {
    let band = base.color("accent")?.to_rgba(0.08);
    let css = ScopedCss::new(slug)
        .rule(
            "header.hero",
            &[format!(
                "background-image: repeating-linear-gradient(135deg, {band} 0, {band} 10px, \
                 transparent 10px, transparent 20px)"
            )],
        )
        .finish();
    Ok(StyleOutput::with_css(base, css))
}
