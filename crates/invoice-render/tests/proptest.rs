//! Property-based tests for color math and style overrides.

use invoice_render::color::{darken, hex_to_rgb, lighten, mix, Rgb};
use invoice_render::{ColorScheme, Palette, StyleRegistry, TOKEN_KEYS};
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

fn hex6() -> impl Strategy<Value = String> {
    "#?[0-9a-fA-F]{6}".prop_map(String::from)
}

fn hex_any() -> impl Strategy<Value = String> {
    prop_oneof!["#?[0-9a-fA-F]{6}", "#?[0-9a-fA-F]{3}"].prop_map(String::from)
}

fn slug() -> impl Strategy<Value = String> {
    "[a-z0-9][a-z0-9-]{0,24}".prop_map(String::from)
}

fn scheme() -> impl Strategy<Value = ColorScheme> {
    prop_oneof![Just(ColorScheme::Light), Just(ColorScheme::Dark)]
}

fn canonical(color: &str) -> String {
    Rgb::from_hex(color).unwrap().to_hex()
}

// ============================================================================
// Color math
// ============================================================================

proptest! {
    /// Parsing, formatting and parsing again gives the same channels.
    #[test]
    fn hex_round_trip_is_stable(c in hex6()) {
        let rgb = hex_to_rgb(&c).unwrap();
        let again = hex_to_rgb(&rgb.to_hex()).unwrap();
        prop_assert_eq!(rgb, again);
    }

    /// Formatting always yields lowercase `#rrggbb`.
    #[test]
    fn to_hex_is_canonical(c in hex_any()) {
        let hex = canonical(&c);
        prop_assert_eq!(hex.len(), 7);
        prop_assert!(hex.starts_with('#'));
        prop_assert!(hex[1..].chars().all(|ch| ch.is_ascii_digit() || ch.is_ascii_lowercase()));
    }

    /// Mixing a color with itself returns the color.
    #[test]
    fn mix_with_self_is_identity(c in hex_any(), w in 0.0f64..=1.0) {
        prop_assert_eq!(mix(&c, &c, w).unwrap(), canonical(&c));
    }

    /// Weights 0 and 1 return the endpoints exactly.
    #[test]
    fn mix_endpoints(a in hex_any(), b in hex_any()) {
        prop_assert_eq!(mix(&a, &b, 0.0).unwrap(), canonical(&a));
        prop_assert_eq!(mix(&a, &b, 1.0).unwrap(), canonical(&b));
    }

    /// Out-of-range weights clamp to the nearest endpoint.
    #[test]
    fn mix_clamps_weight(a in hex_any(), b in hex_any(), over in 1.0f64..100.0) {
        prop_assert_eq!(mix(&a, &b, -over).unwrap(), mix(&a, &b, 0.0).unwrap());
        prop_assert_eq!(mix(&a, &b, over).unwrap(), mix(&a, &b, 1.0).unwrap());
    }

    /// Lighten/darken reach white/black at full strength and do nothing at zero.
    #[test]
    fn lighten_darken_endpoints(c in hex_any()) {
        prop_assert_eq!(lighten(&c, 0.0).unwrap(), canonical(&c));
        prop_assert_eq!(darken(&c, 0.0).unwrap(), canonical(&c));
        prop_assert_eq!(lighten(&c, 1.0).unwrap(), "#ffffff");
        prop_assert_eq!(darken(&c, 1.0).unwrap(), "#000000");
    }

    /// Lightening never makes any channel darker.
    #[test]
    fn lighten_is_monotonic(c in hex_any(), amount in 0.0f64..=1.0) {
        let before = Rgb::from_hex(&c).unwrap();
        let after = before.lighten(amount);
        prop_assert!(after.0 >= before.0 && after.1 >= before.1 && after.2 >= before.2);
    }

    /// Anything that is not 3 or 6 hex digits is rejected.
    #[test]
    fn wrong_length_is_rejected(digits in "[0-9a-f]{1,9}") {
        prop_assume!(digits.len() != 3 && digits.len() != 6);
        prop_assert!(hex_to_rgb(&digits).is_err());
    }
}

// ============================================================================
// Style contract
// ============================================================================

proptest! {
    /// Every registered style accepts any valid slug and accent, keeps the
    /// palette within the known token keys, leaves the base untouched, and
    /// scopes its rules to the theme.
    #[test]
    fn every_style_honours_the_contract(slug in slug(), accent in hex6(), scheme in scheme()) {
        let registry = StyleRegistry::builtin();
        let base = Palette::derive(scheme, &accent).unwrap();
        let snapshot = base.clone();

        for name in registry.names() {
            let out = registry.apply(&slug, name, &base).unwrap();

            prop_assert_eq!(&base, &snapshot, "{} mutated its input", name);
            for key in out.palette.keys() {
                prop_assert!(TOKEN_KEYS.contains(&key), "{} added unknown key {}", name, key);
            }
            prop_assert!(out.palette.missing_tokens().is_empty(), "{} dropped a token", name);

            let prefix = format!("body.theme-{slug} ");
            for line in out.extra_css.lines() {
                if line.ends_with('{') {
                    prop_assert!(line.starts_with(&prefix), "{}: unscoped rule {:?}", name, line);
                }
            }
        }
    }
}
