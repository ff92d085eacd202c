//! The default token system and the small builders presets share.

use crate::model::{
    AnimationTokens, ColorToken, ColorTokens, ColorValue, DurationToken, EasingToken, FontFamily,
    FontWeight, NeutralRamp, RadiusTokens, ShadowToken, SpacingTokens, SurfaceColors, TokenSystem,
    TypographyTokens,
};
use crate::scale::{
    generate_color_scale, generate_radius_scale, generate_spacing_scale, generate_typography_scale,
};

pub const DEFAULT_NAME: &str = "My Design System";
pub const DEFAULT_NEUTRAL: &str = "#737373";
pub const DEFAULT_SPACING_UNIT: u32 = 4;
pub const DEFAULT_RADIUS: u32 = 8;
pub const DEFAULT_FONT_SIZE: u32 = 16;

/// A color token whose id is `<group>-<name>`.
pub(crate) fn color(group: &str, name: &str, light: &str, dark: &str) -> ColorToken {
    ColorToken::new(format!("{group}-{name}"), name, ColorValue::new(light, dark))
}

pub(crate) fn neutral(base: &str) -> NeutralRamp {
    NeutralRamp {
        base_color: base.to_string(),
        scale: generate_color_scale(base),
    }
}

pub(crate) fn fonts(sans: &str, serif: &str, mono: &str) -> Vec<FontFamily> {
    [("sans", sans), ("serif", serif), ("mono", mono)]
        .into_iter()
        .map(|(name, value)| FontFamily {
            id: format!("font-{name}"),
            name: name.to_string(),
            value: value.to_string(),
        })
        .collect()
}

pub(crate) fn typography(families: Vec<FontFamily>, base_size: u32) -> TypographyTokens {
    TypographyTokens {
        font_families: families,
        sizes: generate_typography_scale(base_size),
        weights: default_weights(),
        base_size,
    }
}

pub(crate) fn default_weights() -> Vec<FontWeight> {
    [
        ("light", 300),
        ("normal", 400),
        ("medium", 500),
        ("semibold", 600),
        ("bold", 700),
    ]
    .into_iter()
    .map(|(name, value)| FontWeight {
        name: name.to_string(),
        value,
    })
    .collect()
}

pub(crate) fn spacing(base_unit: u32) -> SpacingTokens {
    SpacingTokens {
        base_unit,
        scale: generate_spacing_scale(base_unit),
    }
}

pub(crate) fn radius(base: u32) -> RadiusTokens {
    RadiusTokens {
        base,
        scale: generate_radius_scale(base),
    }
}

pub(crate) fn shadows(values: [&str; 4]) -> Vec<ShadowToken> {
    ["sm", "md", "lg", "xl"]
        .into_iter()
        .zip(values)
        .map(|(name, value)| ShadowToken {
            name: name.to_string(),
            value: value.to_string(),
        })
        .collect()
}

pub(crate) fn animations(durations: [u32; 3]) -> AnimationTokens {
    AnimationTokens {
        durations: ["fast", "normal", "slow"]
            .into_iter()
            .zip(durations)
            .map(|(name, value)| DurationToken {
                name: name.to_string(),
                value,
            })
            .collect(),
        easings: [
            ("default", "cubic-bezier(0.4, 0, 0.2, 1)"),
            ("in", "cubic-bezier(0.4, 0, 1, 1)"),
            ("out", "cubic-bezier(0, 0, 0.2, 1)"),
            ("in-out", "cubic-bezier(0.4, 0, 0.2, 1)"),
            ("linear", "linear"),
        ]
        .into_iter()
        .map(|(name, value)| EasingToken {
            name: name.to_string(),
            value: value.to_string(),
        })
        .collect(),
    }
}

/// The system a fresh session starts from.
///
/// Brand colors clear 4.5:1 and semantic colors clear 3:1 against the
/// background in both modes.
#[must_use]
pub fn default_tokens() -> TokenSystem {
    TokenSystem {
        name: DEFAULT_NAME.to_string(),
        colors: ColorTokens {
            brand: vec![
                color("brand", "primary", "#2563eb", "#60a5fa"),
                color("brand", "secondary", "#7c3aed", "#a78bfa"),
                color("brand", "accent", "#db2777", "#f472b6"),
            ],
            semantic: vec![
                color("semantic", "success", "#15803d", "#4ade80"),
                color("semantic", "warning", "#b45309", "#fbbf24"),
                color("semantic", "error", "#dc2626", "#f87171"),
                color("semantic", "info", "#0e7490", "#22d3ee"),
            ],
            neutral: neutral(DEFAULT_NEUTRAL),
            surface: SurfaceColors {
                background: ColorValue::new("#ffffff", "#0a0a0a"),
                foreground: ColorValue::new("#0a0a0a", "#fafafa"),
                card: ColorValue::new("#ffffff", "#171717"),
                muted: ColorValue::new("#f5f5f5", "#262626"),
                muted_foreground: ColorValue::new("#525252", "#a3a3a3"),
                border: ColorValue::new("#e5e5e5", "#262626"),
            },
        },
        typography: typography(
            fonts(
                "Inter, ui-sans-serif, system-ui, sans-serif",
                "Georgia, ui-serif, serif",
                "JetBrains Mono, ui-monospace, monospace",
            ),
            DEFAULT_FONT_SIZE,
        ),
        spacing: spacing(DEFAULT_SPACING_UNIT),
        radius: radius(DEFAULT_RADIUS),
        shadows: shadows([
            "0 1px 2px 0 rgb(0 0 0 / 0.05)",
            "0 4px 6px -1px rgb(0 0 0 / 0.1), 0 2px 4px -2px rgb(0 0 0 / 0.1)",
            "0 10px 15px -3px rgb(0 0 0 / 0.1), 0 4px 6px -4px rgb(0 0 0 / 0.1)",
            "0 20px 25px -5px rgb(0 0 0 / 0.1), 0 8px 10px -6px rgb(0 0 0 / 0.1)",
        ]),
        animations: animations([150, 250, 400]),
    }
}

impl Default for TokenSystem {
    fn default() -> Self {
        default_tokens()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_self_consistent() {
        let t = default_tokens();
        assert_eq!(t.colors.neutral.scale.get(500), Some(DEFAULT_NEUTRAL));
        assert_eq!(t.spacing.scale, generate_spacing_scale(t.spacing.base_unit));
        assert_eq!(t.radius.scale, generate_radius_scale(t.radius.base));
        assert_eq!(t.typography.sizes.len(), 9);
    }

    #[test]
    fn default_ids_are_unique() {
        let t = default_tokens();
        let mut ids: Vec<&str> = t
            .colors
            .brand
            .iter()
            .chain(&t.colors.semantic)
            .map(|c| c.id.as_str())
            .collect();
        let before = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), before);
    }
}
