//! Scale generators: one seed value in, a full ramp out.
//!
//! All four generators are pure and cheap: the editing UI calls them on
//! every keystroke of a base value.
//!
//! # Neutral color ramp
//!
//! ```text
//!   50    100   200   300   400 │ 500 │ 600   700   800   900   950
//!   ◀──── brighten + desaturate ─┤ base├── darken ──────────────────▶
//!   (desaturation eases toward 500)       (950 gets +0.5 saturation)
//! ```
//!
//! Amounts are in the OKLCH step units of [`tint_color::color`]
//! (0.10 lightness, 0.04 chroma per unit). Lightness only ever moves away
//! from the base, and gamut mapping holds lightness fixed, so the ramp is
//! monotonic from 50 down to 950.

use tint_color::{Color, hex};

use crate::model::{ColorScale, FontSize, RadiusStep};

/// Returned for any base color that doesn't parse.
pub const FALLBACK_SCALE: [&str; 11] = [
    "#fafafa", "#f5f5f5", "#e5e5e5", "#d4d4d4", "#a3a3a3", "#737373", "#525252", "#404040",
    "#262626", "#171717", "#0a0a0a",
];

/// `(brighten, desaturate)` for stops 50, 100, 200, 300, 400.
const LIGHT_STOPS: [(f32, f32); 5] = [(3.6, 1.5), (3.0, 1.2), (2.2, 0.9), (1.4, 0.6), (0.7, 0.3)];

/// `darken` for stops 600, 700, 800, 900, 950.
const DARK_STOPS: [f32; 5] = [0.6, 1.3, 2.0, 2.7, 3.3];

/// Extra saturation applied to 950 so it doesn't go muddy.
const DEEPEST_SATURATE: f32 = 0.5;

/// Multipliers applied to the spacing base unit.
pub const SPACING_MULTIPLIERS: [u32; 13] = [0, 1, 2, 3, 4, 5, 6, 8, 10, 12, 16, 20, 24];

/// Radius value for the `full` step.
pub const RADIUS_FULL: u32 = 9999;

/// Radius step names in order.
pub const RADIUS_NAMES: [&str; 7] = ["none", "sm", "md", "lg", "xl", "2xl", "full"];

/// Minor-third modular scale ratio.
pub const TYPE_RATIO: f64 = 1.2;

/// `(name, exponent, line-height)` for each type step.
const TYPE_STEPS: [(&str, i32, f64); 9] = [
    ("xs", -2, 1.6),
    ("sm", -1, 1.6),
    ("base", 0, 1.5),
    ("lg", 1, 1.5),
    ("xl", 2, 1.4),
    ("2xl", 3, 1.3),
    ("3xl", 4, 1.25),
    ("4xl", 5, 1.2),
    ("5xl", 6, 1.1),
];

/// The fixed neutral ramp used when a base color is malformed.
#[must_use]
pub fn fallback_scale() -> ColorScale {
    ColorScale::from_stops(FALLBACK_SCALE.map(String::from))
}

/// Derive an 11-stop ramp from `base`.
///
/// Stop 500 is the normalized base itself. A malformed base yields
/// [`FALLBACK_SCALE`].
#[must_use]
pub fn generate_color_scale(base: &str) -> ColorScale {
    let (Some(color), Some(normalized)) = (Color::hex(base), hex::normalize(base)) else {
        return fallback_scale();
    };

    let mut stops: [String; 11] = Default::default();
    for (slot, (up, desat)) in stops.iter_mut().zip(LIGHT_STOPS) {
        *slot = color.brighten(up).desaturate(desat).to_hex();
    }
    stops[5] = normalized;
    for (i, down) in DARK_STOPS.into_iter().enumerate() {
        let mut shade = color.darken(down);
        if i == DARK_STOPS.len() - 1 {
            shade = shade.saturate(DEEPEST_SATURATE);
        }
        stops[6 + i] = shade.to_hex();
    }

    ColorScale::from_stops(stops)
}

/// `none, sm, md, lg, xl, 2xl, full` from a base radius in px.
///
/// `sm` and `lg` round half up, like the rest of the px math.
#[must_use]
pub fn generate_radius_scale(base: u32) -> Vec<RadiusStep> {
    let values = [
        0,
        base.div_ceil(2),
        base,
        base.saturating_mul(3).div_ceil(2),
        base.saturating_mul(2),
        base.saturating_mul(3),
        RADIUS_FULL,
    ];
    RADIUS_NAMES
        .into_iter()
        .zip(values)
        .map(|(name, value)| RadiusStep::new(name, value))
        .collect()
}

/// `SPACING_MULTIPLIERS × base_unit`.
#[must_use]
pub fn generate_spacing_scale(base_unit: u32) -> Vec<u32> {
    SPACING_MULTIPLIERS
        .iter()
        .map(|m| m.saturating_mul(base_unit))
        .collect()
}

/// Nine-step type scale, `xs` through `5xl`, anchored at `base_size` px.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn generate_typography_scale(base_size: u32) -> Vec<FontSize> {
    TYPE_STEPS
        .iter()
        .map(|&(name, exp, line_height)| {
            let px = (f64::from(base_size) * TYPE_RATIO.powi(exp)).round();
            FontSize {
                name: name.to_string(),
                // Non-negative and far below u32::MAX for any sane base.
                size: px.clamp(0.0, f64::from(u32::MAX)) as u32,
                line_height,
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
