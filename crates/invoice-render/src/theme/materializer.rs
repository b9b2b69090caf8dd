//! Turns theme definitions into finished documents.

use std::collections::HashMap;

use serde::Serialize;

use crate::color::Rgb;
use crate::error::ThemeError;
use crate::palette::{is_token_key, Palette, COLOR_MATH_KEYS};
use crate::style::StyleRegistry;
use crate::template::skeleton::{
    DOCUMENT, DOCUMENT_TEMPLATE, EXTRA_CSS_SLOT, SLUG_SLOT, STYLESHEET, STYLESHEET_TEMPLATE,
    STYLE_CSS_SLOT, STYLE_NAME_SLOT,
};
use crate::template::SlotEngine;

use super::definition::{check_slug, ThemeDef};

/// One fully rendered theme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedTheme {
    pub slug: String,
    pub name: String,
    pub style: String,
    /// Palette after the style override, as substituted into the stylesheet.
    pub palette: Palette,
    pub stylesheet: String,
    pub html: String,
}

/// Renders themes against a skeleton using a fixed set of styles.
///
/// Holds no per-theme state: every call to [`materialize`](Self::materialize)
/// starts from a fresh palette.
///
/// ```rust
/// use invoice_render::style::StyleRegistry;
/// use invoice_render::theme::{Materializer, ThemeDef};
///
/// let materializer = Materializer::new(StyleRegistry::builtin()).unwrap();
/// let theme = materializer
///     .materialize(&ThemeDef::new("Print", "print"))
///     .unwrap();
///
/// assert!(theme.html.contains(r#"<body class="theme-print">"#));
/// assert!(theme.html.contains("{{InvoiceNumber}}"));
/// ```
#[derive(Debug, Clone)]
pub struct Materializer {
    registry: StyleRegistry,
    engine: SlotEngine,
}

impl Materializer {
    /// A materializer using the built-in invoice skeleton.
    pub fn new(registry: StyleRegistry) -> Result<Self, ThemeError> {
        Self::with_skeleton(registry, DOCUMENT_TEMPLATE, STYLESHEET_TEMPLATE)
    }

    /// A materializer using a custom document and stylesheet.
    ///
    /// The document receives `$STYLE_NAME`, `$STYLE_CSS` and `$SLUG`; the
    /// stylesheet receives palette tokens and `$extra_css`.
    pub fn with_skeleton(
        registry: StyleRegistry,
        document: &str,
        stylesheet: &str,
    ) -> Result<Self, ThemeError> {
        let mut engine = SlotEngine::new();
        engine.add_template(DOCUMENT, document)?;
        engine.add_template(STYLESHEET, stylesheet)?;
        Ok(Self { registry, engine })
    }

    pub fn registry(&self) -> &StyleRegistry {
        &self.registry
    }

    /// Checks a definition without rendering anything.
    ///
    /// Returns the slug the theme will be written under.
    ///
    /// # Errors
    ///
    /// - [`ThemeError::InvalidSlug`] for an unusable slug
    /// - [`ThemeError::UnknownStyle`] if the style is not registered
    /// - [`ThemeError::UnknownToken`] for an override the skeleton does not use
    /// - [`ThemeError::InvalidColor`] for a malformed accent, or a malformed
    ///   override of a token styles do color math on
    pub fn validate(&self, def: &ThemeDef) -> Result<String, ThemeError> {
        let slug = def.slug().into_owned();
        check_slug(&slug)?;
        self.registry.resolve(&slug, &def.style)?;

        if let Some(key) = def.tokens.keys().find(|key| !is_token_key(key)) {
            return Err(ThemeError::UnknownToken {
                slug,
                key: key.clone(),
            });
        }
        if let Some(accent) = &def.accent {
            Rgb::from_hex(accent).map_err(|e| ThemeError::invalid_color("accent", e))?;
        }
        for key in COLOR_MATH_KEYS {
            if let Some(value) = def.tokens.get(*key) {
                Rgb::from_hex(value).map_err(|e| ThemeError::invalid_color(*key, e))?;
            }
        }
        Ok(slug)
    }

    /// Scheme defaults, then accent derivation, then token overrides.
    ///
    /// An `accent` entry in the token overrides takes precedence over the
    /// definition's `accent` field as the derivation seed. Overrides of the
    /// color-math tokens are stored as canonical `#rrggbb`.
    pub fn build_palette(&self, def: &ThemeDef) -> Result<Palette, ThemeError> {
        let seed = def.tokens.get("accent").or(def.accent.as_ref());
        let mut palette = match seed {
            Some(accent) => Palette::derive(def.scheme, accent)?,
            None => Palette::document_defaults(def.scheme),
        };
        palette.merge(&def.tokens);
        for key in COLOR_MATH_KEYS {
            if let Some(value) = def.tokens.get(*key) {
                let color =
                    Rgb::from_hex(value).map_err(|e| ThemeError::invalid_color(*key, e))?;
                palette.set(*key, color.to_hex());
            }
        }
        Ok(palette)
    }

    /// Validates and renders one theme.
    pub fn materialize(&self, def: &ThemeDef) -> Result<RenderedTheme, ThemeError> {
        let slug = self.validate(def)?;
        let base = self.build_palette(def)?;
        tracing::debug!(slug = %slug, style = %def.style, scheme = %def.scheme, "palette built");

        let styled = self.registry.apply(&slug, &def.style, &base)?;
        tracing::debug!(
            slug = %slug,
            style = %def.style,
            extra_css_bytes = styled.extra_css.len(),
            "style applied"
        );

        let mut extra = HashMap::new();
        extra.insert(
            EXTRA_CSS_SLOT.to_string(),
            serde_json::Value::String(styled.extra_css),
        );
        let stylesheet =
            self.engine
                .render_named_with_context(STYLESHEET, &styled.palette.to_slots(), &extra)?;

        let html = self.engine.render_named(
            DOCUMENT,
            &serde_json::json!({
                STYLE_NAME_SLOT: html_escape(&def.name),
                STYLE_CSS_SLOT: stylesheet,
                SLUG_SLOT: slug,
            }),
        )?;
        tracing::debug!(slug = %slug, bytes = html.len(), "document rendered");

        Ok(RenderedTheme {
            slug,
            name: def.name.clone(),
            style: def.style.clone(),
            palette: styled.palette,
            stylesheet,
            html,
        })
    }
}

/// Escapes text for use in element content and quoted attributes.
fn html_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::ColorScheme;
    use crate::style::StyleOutput;
    use crate::template::skeleton::INVOICE_PLACEHOLDERS;

    fn materializer() -> Materializer {
        Materializer::new(StyleRegistry::builtin()).unwrap()
    }

    #[test]
    fn test_build_palette_order() {
        let def = ThemeDef::new("Acme", "print")
            .with_accent("#2244aa")
            .with_token("hero_flag", "#000000");
        let palette = materializer().build_palette(&def).unwrap();
        assert_eq!(palette.get("accent"), Some("#2244aa"));
        // Override beats derivation.
        assert_eq!(palette.get("hero_flag"), Some("#000000"));
        assert_eq!(palette.get("pill_bg"), Some(Rgb(0x22, 0x44, 0xaa).lighten(0.85).to_hex().as_str()));
    }

    #[test]
    fn test_build_palette_canonicalizes_colors() {
        let def = ThemeDef::new("Acme", "minimal-border")
            .with_accent("2244AA")
            .with_token("surface", "fff")
            .with_token("surface_alt", "#F8FAFC");
        let palette = materializer().build_palette(&def).unwrap();
        assert_eq!(palette.get("accent"), Some("#2244aa"));
        assert_eq!(palette.get("surface"), Some("#ffffff"));
        assert_eq!(palette.get("surface_alt"), Some("#f8fafc"));
    }

    #[test]
    fn test_build_palette_accent_token_reseeds() {
        let m = materializer();
        let via_token = ThemeDef::new("Acme", "print")
            .with_accent("#2244aa")
            .with_token("accent", "#aa4422");
        let via_field = ThemeDef::new("Acme", "print").with_accent("#aa4422");
        assert_eq!(
            m.build_palette(&via_token).unwrap(),
            m.build_palette(&via_field).unwrap()
        );

        let dark = ThemeDef::new("Night", "dark-glow")
            .with_scheme(ColorScheme::Dark)
            .with_token("accent", "#aa4422");
        let palette = m.build_palette(&dark).unwrap();
        assert_eq!(palette.get("pill_bg"), Some("rgba(170, 68, 34, 0.18)"));
    }

    #[test]
    fn test_build_palette_without_accent() {
        let def = ThemeDef::new("Acme", "print").with_scheme(ColorScheme::Dark);
        let palette = materializer().build_palette(&def).unwrap();
        assert_eq!(palette, Palette::document_defaults(ColorScheme::Dark));
    }

    #[test]
    fn test_validate_rejects_unknown_token() {
        let def = ThemeDef::new("Acme", "print").with_token("hero_glow", "red");
        match materializer().validate(&def) {
            Err(ThemeError::UnknownToken { slug, key }) => {
                assert_eq!(slug, "acme");
                assert_eq!(key, "hero_glow");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_validate_rejects_bad_accent() {
        let def = ThemeDef::new("Acme", "print").with_accent("#12345");
        assert!(matches!(
            materializer().validate(&def),
            Err(ThemeError::InvalidColor { ref key, .. }) if key == "accent"
        ));
    }

    #[test]
    fn test_validate_rejects_non_hex_surface_override() {
        let def = ThemeDef::new("Acme", "glass").with_token("surface", "transparent");
        assert!(matches!(
            materializer().validate(&def),
            Err(ThemeError::InvalidColor { ref key, .. }) if key == "surface"
        ));
    }

    #[test]
    fn test_validate_rejects_bad_slug() {
        let def = ThemeDef::new("Acme", "print").with_slug("Acme");
        assert!(matches!(
            materializer().validate(&def),
            Err(ThemeError::InvalidSlug { .. })
        ));
    }

    #[test]
    fn test_materialize_scopes_extra_css() {
        let def = ThemeDef::new("Acme", "ribbon-top").with_accent("#2244aa");
        let theme = materializer().materialize(&def).unwrap();
        assert_eq!(theme.slug, "acme");
        assert!(theme
            .stylesheet
            .contains("body.theme-acme .page {\n  border-top: 12px solid #2244aa;"));
        assert!(theme.html.contains(&theme.stylesheet));
        assert!(theme.html.contains("<title>Acme"));
    }

    #[test]
    fn test_materialize_writes_hex_without_hash_as_css_color() {
        let def = ThemeDef::new("Acme", "minimal-border")
            .with_accent("2244aa")
            .with_token("surface", "fff");
        let theme = materializer().materialize(&def).unwrap();
        assert!(theme.stylesheet.contains("color: #2244aa;"));
        assert!(theme.stylesheet.contains("background: #ffffff;"));
        assert!(!theme.stylesheet.contains("color: 2244aa"));
        assert!(!theme.stylesheet.contains("background: fff;"));
    }

    #[test]
    fn test_materialize_escapes_display_name() {
        let name = r#"Smith "Q" & <Co>"#;
        let theme = materializer()
            .materialize(&ThemeDef::new(name, "print").with_slug("smith"))
            .unwrap();
        assert!(theme
            .html
            .contains(r#"aria-label="Smith &quot;Q&quot; &amp; &lt;Co&gt; invoice""#));
        assert!(theme.html.contains("<title>Smith &quot;Q&quot; &amp; &lt;Co&gt; "));
        assert!(!theme.html.contains("<Co>"));
        assert_eq!(theme.name, name);
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape("Acme Consulting"), "Acme Consulting");
        assert_eq!(html_escape("a<b>&\"c\"'"), "a&lt;b&gt;&amp;&quot;c&quot;&#39;");
    }

    #[test]
    fn test_materialize_keeps_placeholders() {
        let theme = materializer()
            .materialize(&ThemeDef::new("Glass", "glass").with_scheme(ColorScheme::Dark))
            .unwrap();
        for placeholder in INVOICE_PLACEHOLDERS {
            assert!(theme.html.contains(placeholder), "missing {placeholder}");
        }
    }

    #[test]
    fn test_materialize_is_repeatable() {
        let m = materializer();
        let def = ThemeDef::new("Blueprint", "blueprint").with_accent("#1d4ed8");
        assert_eq!(m.materialize(&def).unwrap(), m.materialize(&def).unwrap());
    }

    fn drops_line(_slug: &str, base: &Palette) -> Result<StyleOutput, ThemeError> {
        let mut palette = base.clone();
        palette.remove("line");
        Ok(StyleOutput {
            palette,
            extra_css: String::new(),
        })
    }

    #[test]
    fn test_missing_token_fails_render() {
        let registry = StyleRegistry::new().with_style("lossy", drops_line).unwrap();
        let m = Materializer::new(registry).unwrap();
        let err = m.materialize(&ThemeDef::new("Acme", "lossy")).unwrap_err();
        assert_eq!(err.to_string(), "template slot '$line' has no value");
    }

    #[test]
    fn test_custom_skeleton() {
        let m = Materializer::with_skeleton(
            StyleRegistry::builtin(),
            "<style>$STYLE_CSS</style><h1>$STYLE_NAME</h1><i>$SLUG</i>",
            "a{color:$accent}\n$extra_css",
        )
        .unwrap();
        let theme = m
            .materialize(&ThemeDef::new("Print", "print").with_accent("#2244aa"))
            .unwrap();
        assert!(theme.html.starts_with("<style>a{color:#2244aa}\nbody.theme-print *"));
        assert!(theme.html.ends_with("<h1>Print</h1><i>print</i>"));
    }

    #[test]
    fn test_custom_skeleton_syntax_error() {
        let result = Materializer::with_skeleton(StyleRegistry::new(), "$", "");
        assert!(matches!(result, Err(ThemeError::Template(_))));
    }
}
