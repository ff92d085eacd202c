// SPDX-License-Identifier: MIT
//
// String-level color API: total functions over user-typed hex values.
//
// Token editors call these on every keystroke, so a half-typed value
// like "#3b8" → "#3b82" must never panic or bubble an error. Policy:
//
//   transform (brighten, mix, …)   → input returned unchanged
//   luminance                      → 0.0
//   contrast_ratio                 → 1.0 (the worst possible ratio)
//   rgba floats                    → neutral gray FALLBACK_HEX
//
// Valid results are always lowercase `#rrggbb`.

use crate::color::{Color, parse_rgb8};
use crate::contrast::{contrast_ratio_hex, luminance_rgb8};

/// Neutral gray substituted wherever a concrete color is required.
pub const FALLBACK_HEX: &str = "#808080";

/// Whether `s` is a `#RGB` / `#RRGGBB` color.
#[must_use]
pub fn is_valid(s: &str) -> bool {
    parse_rgb8(s).is_some()
}

/// Canonical lowercase `#rrggbb`, or `None` when malformed.
#[must_use]
pub fn normalize(s: &str) -> Option<String> {
    parse_rgb8(s).map(|(r, g, b)| format!("#{r:02x}{g:02x}{b:02x}"))
}

/// Canonical form, or [`FALLBACK_HEX`] when malformed.
#[must_use]
pub fn normalize_or_fallback(s: &str) -> String {
    normalize(s).unwrap_or_else(|| FALLBACK_HEX.to_string())
}

fn transform(s: &str, f: impl FnOnce(Color) -> Color) -> String {
    Color::hex(s).map_or_else(|| s.to_string(), |c| f(c).to_hex())
}

/// Brighten by `amount` OKLCH lightness steps.
#[must_use]
pub fn brighten(s: &str, amount: f32) -> String {
    transform(s, |c| c.brighten(amount))
}

/// Darken by `amount` OKLCH lightness steps.
#[must_use]
pub fn darken(s: &str, amount: f32) -> String {
    transform(s, |c| c.darken(amount))
}

/// Increase chroma by `amount` steps.
#[must_use]
pub fn saturate(s: &str, amount: f32) -> String {
    transform(s, |c| c.saturate(amount))
}

/// Decrease chroma by `amount` steps.
#[must_use]
pub fn desaturate(s: &str, amount: f32) -> String {
    transform(s, |c| c.desaturate(amount))
}

/// Mix `s` toward `other` by `ratio` (0.0 = `s`, 1.0 = `other`).
///
/// A malformed `other` returns `s` unchanged.
#[must_use]
pub fn mix(s: &str, other: &str, ratio: f32) -> String {
    match Color::hex(other) {
        Some(o) => transform(s, |c| c.mix(&o, ratio)),
        None => s.to_string(),
    }
}

/// WCAG relative luminance, `0.0` when malformed.
#[must_use]
pub fn luminance(s: &str) -> f64 {
    parse_rgb8(s).map_or(0.0, |(r, g, b)| luminance_rgb8(r, g, b))
}

/// WCAG contrast ratio, `1.0` when either side is malformed.
#[must_use]
pub fn contrast_ratio(a: &str, b: &str) -> f64 {
    contrast_ratio_hex(a, b).unwrap_or(1.0)
}

/// Perceptual distance between two hex colors, `None` when either is malformed.
#[must_use]
pub fn distance(a: &str, b: &str) -> Option<f32> {
    Some(Color::hex(a)?.distance(&Color::hex(b)?))
}

/// OKLCH lightness of `s`, `None` when malformed.
#[must_use]
pub fn lightness(s: &str) -> Option<f32> {
    Color::hex(s).map(|c| c.l)
}

/// Channels as floats in [0, 1] plus alpha 1.0, for design-tool exports.
///
/// Falls back to [`FALLBACK_HEX`].
#[must_use]
pub fn to_rgba_floats(s: &str) -> [f64; 4] {
    let (r, g, b) = parse_rgb8(s).unwrap_or((128, 128, 128));
    [
        f64::from(r) / 255.0,
        f64::from(g) / 255.0,
        f64::from(b) / 255.0,
        1.0,
    ]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn normalize_expands_and_lowercases() {
        assert_eq!(normalize("#ABC").as_deref(), Some("#aabbcc"));
        assert_eq!(normalize(" #3B82F6 ").as_deref(), Some("#3b82f6"));
        assert_eq!(normalize("3b82f6"), None);
        assert_eq!(normalize("#3b82f"), None);
    }

    #[test]
    fn transforms_return_input_on_garbage() {
        assert_eq!(brighten("not-a-color", 1.0), "not-a-color");
        assert_eq!(darken("", 1.0), "");
        assert_eq!(desaturate("#zz", 1.0), "#zz");
        assert_eq!(saturate("#12", 1.0), "#12");
        assert_eq!(mix("#fff", "garbage", 0.5), "#fff");
        assert_eq!(mix("garbage", "#fff", 0.5), "garbage");
    }

    #[test]
    fn brighten_makes_lighter() {
        let base = "#3b82f6";
        let lighter = brighten(base, 1.0);
        assert!(lightness(&lighter).unwrap() > lightness(base).unwrap());
        let darker = darken(base, 1.0);
        assert!(lightness(&darker).unwrap() < lightness(base).unwrap());
    }

    #[test]
    fn mix_endpoints_are_inputs() {
        assert_eq!(mix("#000000", "#ffffff", 0.0), "#000000");
        assert_eq!(mix("#000000", "#ffffff", 1.0), "#ffffff");
    }

    #[test]
    fn luminance_and_contrast_fallbacks() {
        assert!(luminance("nope").abs() < f64::EPSILON);
        assert!((contrast_ratio("nope", "#fff") - 1.0).abs() < f64::EPSILON);
        assert!((contrast_ratio("#000", "#fff") - 21.0).abs() < 1e-9);
    }

    #[test]
    fn bare_hex_digits_are_not_colors() {
        assert!(!is_valid("bad"));
        assert_eq!(normalize_or_fallback("bad"), FALLBACK_HEX);
        assert_eq!(to_rgba_floats("bad"), to_rgba_floats(FALLBACK_HEX));
    }

    #[test]
    fn rgba_floats() {
        assert_eq!(to_rgba_floats("#ff0000"), [1.0, 0.0, 0.0, 1.0]);
        let gray = to_rgba_floats("#zz");
        assert!((gray[0] - 128.0 / 255.0).abs() < 1e-12);
        assert!((gray[3] - 1.0).abs() < f64::EPSILON);
    }
}
