// SPDX-License-Identifier: MIT
//
// WCAG 2.x contrast: measured in sRGB, corrected in OKLCH.
//
// The ratio itself must follow the WCAG definition exactly (relative
// luminance of the 8-bit sRGB channels), because that is the number
// designers compare against 4.5:1 and 3:1. When a pair fails, the fix is
// searched in OKLCH lightness, which moves the color without drifting
// its hue.

use crate::color::{Color, parse_rgb8};

/// WCAG relative luminance of 8-bit sRGB channels.
///
///   L = 0.2126·R + 0.7152·G + 0.0722·B   (linearized channels)
#[must_use]
pub fn luminance_rgb8(r: u8, g: u8, b: u8) -> f64 {
    let lin = |v: u8| {
        let c = f64::from(v) / 255.0;
        if c <= 0.040_45 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    };
    0.2126f64.mul_add(lin(r), 0.7152f64.mul_add(lin(g), 0.0722 * lin(b)))
}

/// Relative luminance of a color, in [0.0, 1.0].
///
/// The color is quantized to 8-bit sRGB first, the same way it will be
/// written to a token file.
#[must_use]
pub fn relative_luminance(color: Color) -> f64 {
    let (r, g, b) = color.to_rgb8();
    luminance_rgb8(r, g, b)
}

/// WCAG contrast ratio between two colors, in [1.0, 21.0].
///
///   (`L_lighter` + 0.05) / (`L_darker` + 0.05)
///
/// Symmetric in its arguments.
#[must_use]
pub fn contrast_ratio(a: Color, b: Color) -> f64 {
    ratio_from_luminance(relative_luminance(a), relative_luminance(b))
}

/// Contrast ratio between two hex strings, or `None` if either is malformed.
///
/// Works straight from the parsed bytes so `#777` vs `#808080` never picks
/// up conversion noise.
#[must_use]
pub fn contrast_ratio_hex(a: &str, b: &str) -> Option<f64> {
    let (ar, ag, ab) = parse_rgb8(a)?;
    let (br, bg, bb) = parse_rgb8(b)?;
    Some(ratio_from_luminance(
        luminance_rgb8(ar, ag, ab),
        luminance_rgb8(br, bg, bb),
    ))
}

fn ratio_from_luminance(la: f64, lb: f64) -> f64 {
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    (lighter + 0.05) / (darker + 0.05)
}

/// Move `fg` along OKLCH lightness until it reaches `min_ratio` against `bg`.
///
/// `lighten = true` searches upward (text on a dark surface), otherwise
/// downward. The search keeps the closest passing lightness to the
/// original. If even the extreme fails, the extreme is returned.
#[must_use]
pub fn ensure_readability(fg: Color, bg: Color, min_ratio: f64, lighten: bool) -> Color {
    if contrast_ratio(fg, bg) >= min_ratio {
        return fg.to_gamut();
    }

    let (mut lo, mut hi) = if lighten { (fg.l, 1.0) } else { (0.0, fg.l) };
    let mut best = if lighten {
        fg.with_lightness(1.0).to_gamut()
    } else {
        fg.with_lightness(0.0).to_gamut()
    };

    for _ in 0..32 {
        let mid = (lo + hi) * 0.5;
        let candidate = fg.with_lightness(mid).to_gamut();
        if contrast_ratio(candidate, bg) >= min_ratio {
            best = candidate;
            if lighten {
                hi = mid;
            } else {
                lo = mid;
            }
        } else if lighten {
            lo = mid;
        } else {
            hi = mid;
        }
    }

    best
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
