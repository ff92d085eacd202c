//! Named preset systems: complete, ready-to-edit starting points.
//!
//! Presets are read-only seeds: every lookup builds a fresh
//! [`TokenSystem`], so editing a loaded preset never touches the original.

use crate::defaults::{
    animations, color, default_tokens, fonts, neutral, radius, shadows, spacing, typography,
};
use crate::model::{ColorTokens, ColorValue, SurfaceColors, TokenSystem};

/// A built-in system plus the metadata a picker shows.
#[derive(Debug, Clone, PartialEq)]
pub struct Preset {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub tokens: TokenSystem,
}

/// Look up a preset by id.
///
/// Returns `None` if the id is not recognized.
#[must_use]
pub fn preset(id: &str) -> Option<Preset> {
    let (id, name, description, tokens) = match id {
        "default" => (
            "default",
            "Default",
            "Balanced blue brand on neutral grays.",
            default_tokens(),
        ),
        "minimal-dark" => (
            "minimal-dark",
            "Minimal Dark",
            "Near-monochrome surfaces with a single cool accent.",
            minimal_dark(),
        ),
        "brutalist" => (
            "brutalist",
            "Brutalist",
            "Pure black and white, hard shadows, square corners.",
            brutalist(),
        ),
        "editorial" => (
            "editorial",
            "Editorial",
            "Serif typography and warm paper tones.",
            editorial(),
        ),
        "ocean" => (
            "ocean",
            "Ocean",
            "Teal and deep-blue brand over cool slate.",
            ocean(),
        ),
        _ => return None,
    };
    Some(Preset {
        id,
        name,
        description,
        tokens: TokenSystem {
            name: name.to_string(),
            ..tokens
        },
    })
}

/// Every preset id, in picker order.
#[must_use]
pub const fn preset_ids() -> &'static [&'static str] {
    &["default", "minimal-dark", "brutalist", "editorial", "ocean"]
}

/// All presets, in picker order.
#[must_use]
pub fn all_presets() -> Vec<Preset> {
    preset_ids().iter().filter_map(|id| preset(id)).collect()
}

fn minimal_dark() -> TokenSystem {
    TokenSystem {
        colors: ColorTokens {
            brand: vec![color("brand", "primary", "#4f46e5", "#818cf8")],
            semantic: vec![
                color("semantic", "success", "#15803d", "#4ade80"),
                color("semantic", "warning", "#b45309", "#fcd34d"),
                color("semantic", "error", "#b91c1c", "#fca5a5"),
            ],
            neutral: neutral("#71717a"),
            surface: SurfaceColors {
                background: ColorValue::new("#fafafa", "#09090b"),
                foreground: ColorValue::new("#18181b", "#f4f4f5"),
                card: ColorValue::new("#ffffff", "#18181b"),
                muted: ColorValue::new("#f4f4f5", "#27272a"),
                muted_foreground: ColorValue::new("#52525b", "#a1a1aa"),
                border: ColorValue::new("#e4e4e7", "#27272a"),
            },
        },
        radius: radius(6),
        animations: animations([120, 200, 320]),
        ..default_tokens()
    }
}

fn brutalist() -> TokenSystem {
    TokenSystem {
        colors: ColorTokens {
            brand: vec![
                color("brand", "primary", "#000000", "#ffffff"),
                color("brand", "highlight", "#1d4ed8", "#facc15"),
            ],
            semantic: vec![
                color("semantic", "success", "#166534", "#4ade80"),
                color("semantic", "error", "#b91c1c", "#f87171"),
            ],
            neutral: neutral("#808080"),
            surface: SurfaceColors {
                background: ColorValue::new("#ffffff", "#000000"),
                foreground: ColorValue::new("#000000", "#ffffff"),
                card: ColorValue::new("#ffffff", "#000000"),
                muted: ColorValue::new("#eeeeee", "#1a1a1a"),
                muted_foreground: ColorValue::new("#333333", "#cccccc"),
                border: ColorValue::new("#000000", "#ffffff"),
            },
        },
        typography: typography(
            fonts(
                "Space Grotesk, Arial, sans-serif",
                "Times New Roman, serif",
                "Courier New, monospace",
            ),
            16,
        ),
        spacing: spacing(8),
        radius: radius(0),
        shadows: shadows([
            "2px 2px 0 0 #000000",
            "4px 4px 0 0 #000000",
            "6px 6px 0 0 #000000",
            "8px 8px 0 0 #000000",
        ]),
        animations: animations([0, 100, 200]),
        ..default_tokens()
    }
}

fn editorial() -> TokenSystem {
    TokenSystem {
        colors: ColorTokens {
            brand: vec![
                color("brand", "primary", "#9f1239", "#fda4af"),
                color("brand", "ink", "#292524", "#e7e5e4"),
            ],
            semantic: vec![
                color("semantic", "success", "#3f6212", "#a3e635"),
                color("semantic", "warning", "#a16207", "#fde047"),
                color("semantic", "error", "#dc2626", "#fca5a5"),
            ],
            neutral: neutral("#78716c"),
            surface: SurfaceColors {
                background: ColorValue::new("#fdfbf7", "#1c1917"),
                foreground: ColorValue::new("#1c1917", "#f5f5f4"),
                card: ColorValue::new("#ffffff", "#292524"),
                muted: ColorValue::new("#f5f0e8", "#292524"),
                muted_foreground: ColorValue::new("#57534e", "#a8a29e"),
                border: ColorValue::new("#e7e0d4", "#44403c"),
            },
        },
        typography: typography(
            fonts(
                "Source Sans 3, system-ui, sans-serif",
                "Playfair Display, Georgia, serif",
                "IBM Plex Mono, monospace",
            ),
            18,
        ),
        spacing: spacing(6),
        radius: radius(2),
        animations: animations([200, 350, 600]),
        ..default_tokens()
    }
}

fn ocean() -> TokenSystem {
    TokenSystem {
        colors: ColorTokens {
            brand: vec![
                color("brand", "primary", "#0f766e", "#2dd4bf"),
                color("brand", "secondary", "#1e40af", "#93c5fd"),
            ],
            semantic: vec![
                color("semantic", "success", "#4d7c0f", "#86efac"),
                color("semantic", "warning", "#b45309", "#fcd34d"),
                color("semantic", "error", "#be123c", "#fda4af"),
            ],
            neutral: neutral("#64748b"),
            surface: SurfaceColors {
                background: ColorValue::new("#f8fafc", "#020617"),
                foreground: ColorValue::new("#0f172a", "#f1f5f9"),
                card: ColorValue::new("#ffffff", "#0f172a"),
                muted: ColorValue::new("#f1f5f9", "#1e293b"),
                muted_foreground: ColorValue::new("#475569", "#94a3b8"),
                border: ColorValue::new("#e2e8f0", "#1e293b"),
            },
        },
        radius: radius(12),
        ..default_tokens()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
