// SPDX-License-Identifier: MIT
//
// Color core: OKLCH storage with perceptual operations.
//
// Token ramps need "the same visual step" between stops. Raw RGB scaling
// can't deliver that: a +20 step in sRGB is huge near black and invisible
// near white. Every operation here therefore moves through OKLCH, and
// only the final hex string goes back to sRGB.
//
//   "#rrggbb" ─▶ 8-bit sRGB ─▶ gamma decode ─▶ LMS ─▶ Oklab ─▶ OKLCH
//
// Step laws (the "amount" unit used by the ramp generator):
//
//   brighten(n)  : L' = clamp(L + 0.10·n, 0, 1)
//   saturate(n)  : C' = max(C + 0.04·n, 0)
//
// `darken` and `desaturate` are the negated forms. Results leave the
// sRGB gamut easily (high chroma + high lightness), so `to_hex` always
// gamut-maps by reducing chroma while holding lightness and hue fixed.

#![allow(clippy::many_single_char_names)]

use std::fmt;

/// Lightness change per unit of `brighten`/`darken` amount.
pub const BRIGHTEN_STEP: f32 = 0.10;

/// Chroma change per unit of `saturate`/`desaturate` amount.
pub const SATURATE_STEP: f32 = 0.04;

// ─── Color ───────────────────────────────────────────────────────────────────

/// An opaque perceptual color stored in OKLCH space.
///
/// OKLCH is the cylindrical form of Björn Ottosson's Oklab. Lightness is
/// perceptually uniform, so a ramp built from equal lightness steps reads
/// as evenly spaced.
///
/// # Examples
///
/// ```
/// use tint_color::Color;
///
/// let blue = Color::hex("#3b82f6").unwrap();
/// let lighter = blue.brighten(1.0);
/// assert!(lighter.l > blue.l);
/// assert_eq!(Color::hex("#fff").unwrap().to_hex(), "#ffffff");
/// ```
#[derive(Clone, Copy)]
pub struct Color {
    /// 0.0 is black, 1.0 is white.
    pub l: f32,
    /// 0.0 is gray; the most vivid sRGB colors sit around 0.37.
    pub c: f32,
    /// Degrees in [0, 360).
    pub h: f32,
}

impl Color {
    pub const BLACK: Self = Self::oklch(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::oklch(1.0, 0.0, 0.0);

    #[inline]
    #[must_use]
    pub const fn oklch(l: f32, c: f32, h: f32) -> Self {
        Self { l, c, h }
    }

    /// From gamma-encoded sRGB channels in [0, 1].
    #[must_use]
    pub fn srgb(r: f32, g: f32, b: f32) -> Self {
        let [l, c, h] = lch_from_lab(lab_from_srgb([r, g, b]));
        Self { l, c, h }
    }

    #[must_use]
    pub fn rgb8(r: u8, g: u8, b: u8) -> Self {
        let unit = |v: u8| f32::from(v) / 255.0;
        Self::srgb(unit(r), unit(g), unit(b))
    }

    /// Parse a `#RGB` or `#RRGGBB` hex string (the `#` is optional).
    ///
    /// Returns `None` for anything else, including alpha forms.
    #[must_use]
    pub fn hex(s: &str) -> Option<Self> {
        parse_rgb8(s).map(|(r, g, b)| Self::rgb8(r, g, b))
    }

    #[inline]
    #[must_use]
    pub fn is_achromatic(self) -> bool {
        self.c.abs() < 1e-5
    }

    #[inline]
    const fn lch(self) -> Vec3 {
        [self.l, self.c, self.h]
    }

    // ─── Steps ───────────────────────────────────────────────────────────

    /// Raise lightness by `amount` steps of [`BRIGHTEN_STEP`].
    ///
    /// Negative amounts darken. Lightness is clamped to 0.0–1.0.
    #[inline]
    #[must_use]
    pub fn brighten(self, amount: f32) -> Self {
        Self {
            l: BRIGHTEN_STEP.mul_add(amount, self.l).clamp(0.0, 1.0),
            ..self
        }
    }

    #[inline]
    #[must_use]
    pub fn darken(self, amount: f32) -> Self {
        self.brighten(-amount)
    }

    /// Raise chroma by `amount` steps of [`SATURATE_STEP`] (floored at 0).
    #[inline]
    #[must_use]
    pub fn saturate(self, amount: f32) -> Self {
        Self {
            c: SATURATE_STEP.mul_add(amount, self.c).max(0.0),
            ..self
        }
    }

    #[inline]
    #[must_use]
    pub fn desaturate(self, amount: f32) -> Self {
        self.saturate(-amount)
    }

    /// Same hue and chroma at an absolute lightness.
    #[inline]
    #[must_use]
    pub const fn with_lightness(self, l: f32) -> Self {
        Self {
            l: l.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Linear blend in OKLCH; `ratio` 0.0 is `self`, 1.0 is `other`.
    ///
    /// Hue takes the shorter way round. A gray endpoint has no meaningful
    /// hue, so the blend borrows the other side's.
    #[must_use]
    pub fn mix(self, other: &Self, ratio: f32) -> Self {
        let t = ratio.clamp(0.0, 1.0);
        let h = match (self.is_achromatic(), other.is_achromatic()) {
            (true, _) => other.h,
            (false, true) => self.h,
            (false, false) => lerp_hue(self.h, other.h, t),
        };
        Self {
            l: (other.l - self.l).mul_add(t, self.l),
            c: (other.c - self.c).mul_add(t, self.c),
            h,
        }
    }

    /// Euclidean ΔE in Oklab.
    ///
    /// Under ~0.02 is invisible; two token colors under ~0.08 read as
    /// "the same color" in a UI.
    #[must_use]
    pub fn distance(self, other: &Self) -> f32 {
        let p = lab_from_lch(self.lch());
        let q = lab_from_lch(other.lch());
        p.iter()
            .zip(q)
            .map(|(a, b)| (a - b) * (a - b))
            .sum::<f32>()
            .sqrt()
    }

    // ─── Gamut ───────────────────────────────────────────────────────────

    #[must_use]
    pub fn in_srgb_gamut(self) -> bool {
        srgb_from_lab(lab_from_lch(self.lch()))
            .iter()
            .all(|v| (-1e-4..=1.0 + 1e-4).contains(v))
    }

    /// Bisect chroma down to the sRGB boundary.
    ///
    /// Lightness and hue are held fixed, so ramp ordering survives mapping.
    #[must_use]
    pub fn to_gamut(self) -> Self {
        if self.in_srgb_gamut() {
            return self;
        }
        let (mut inside, mut outside) = (0.0_f32, self.c);
        for _ in 0..20 {
            let c = (inside + outside) / 2.0;
            if (Self { c, ..self }).in_srgb_gamut() {
                inside = c;
            } else {
                outside = c;
            }
        }
        Self { c: inside, ..self }
    }

    // ─── Output ──────────────────────────────────────────────────────────

    /// sRGB channels in [0, 1]. Out-of-gamut channels are clipped, not mapped.
    #[must_use]
    pub fn to_srgb(self) -> (f32, f32, f32) {
        let [r, g, b] = srgb_from_lab(lab_from_lch(self.lch())).map(|v| v.clamp(0.0, 1.0));
        (r, g, b)
    }

    /// 8-bit channels after gamut mapping.
    #[must_use]
    pub fn to_rgb8(self) -> (u8, u8, u8) {
        let (r, g, b) = self.to_gamut().to_srgb();
        (quantize(r), quantize(g), quantize(b))
    }

    /// Lowercase `#rrggbb`, gamut-mapped.
    #[must_use]
    pub fn to_hex(self) -> String {
        let (r, g, b) = self.to_rgb8();
        format!("#{r:02x}{g:02x}{b:02x}")
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "oklch({:.4} {:.4} {:.1})", self.l, self.c, self.h)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Approximate: components within 1e-5, hue ignored when either side is gray.
impl PartialEq for Color {
    fn eq(&self, other: &Self) -> bool {
        const EPS: f32 = 1e-5;
        let close = |a: f32, b: f32| (a - b).abs() < EPS;
        close(self.l, other.l)
            && close(self.c, other.c)
            && (self.is_achromatic() || other.is_achromatic() || hue_distance(self.h, other.h) < EPS)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

// ─── Hue ─────────────────────────────────────────────────────────────────────

fn wrap_hue(h: f32) -> f32 {
    h.rem_euclid(360.0)
}

/// Shortest angular distance, in [0, 180].
fn hue_distance(a: f32, b: f32) -> f32 {
    let d = (a - b).rem_euclid(360.0);
    d.min(360.0 - d)
}

fn lerp_hue(from: f32, to: f32, t: f32) -> f32 {
    // Signed delta folded into (-180, 180].
    let delta = (to - from + 540.0) % 360.0 - 180.0;
    wrap_hue(delta.mul_add(t, from))
}

// ─── Color spaces ────────────────────────────────────────────────────────────
//
// Oklab and linear sRGB meet in LMS cone space. Matrices are Ottosson's.

type Vec3 = [f32; 3];
type Mat3 = [Vec3; 3];

const LMS_FROM_LINEAR: Mat3 = [
    [0.412_221_47, 0.536_332_55, 0.051_445_995],
    [0.211_903_5, 0.680_699_5, 0.107_396_96],
    [0.088_302_46, 0.281_718_84, 0.629_978_7],
];

const OKLAB_FROM_LMS: Mat3 = [
    [0.210_454_26, 0.793_617_8, -0.004_072_047],
    [1.977_998_5, -2.428_592_2, 0.450_593_7],
    [0.025_904_037, 0.782_771_77, -0.808_675_77],
];

const LMS_FROM_OKLAB: Mat3 = [
    [1.0, 0.396_337_78, 0.215_803_76],
    [1.0, -0.105_561_346, -0.063_854_17],
    [1.0, -0.089_484_18, -1.291_485_5],
];

const LINEAR_FROM_LMS: Mat3 = [
    [4.076_741_7, -3.307_711_6, 0.230_969_94],
    [-1.268_438, 2.609_757_4, -0.341_319_38],
    [-0.004_196_086_3, -0.703_418_6, 1.707_614_7],
];

fn mul(m: &Mat3, v: Vec3) -> Vec3 {
    m.map(|row| row[0].mul_add(v[0], row[1].mul_add(v[1], row[2] * v[2])))
}

fn lab_from_lch([l, c, h]: Vec3) -> Vec3 {
    let (sin, cos) = h.to_radians().sin_cos();
    [l, c * cos, c * sin]
}

fn lch_from_lab([l, a, b]: Vec3) -> Vec3 {
    let c = a.hypot(b);
    let h = if c < 1e-8 { 0.0 } else { wrap_hue(b.atan2(a).to_degrees()) };
    [l, c, h]
}

fn lab_from_srgb(rgb: Vec3) -> Vec3 {
    let lms = mul(&LMS_FROM_LINEAR, rgb.map(srgb_to_linear));
    mul(&OKLAB_FROM_LMS, lms.map(f32::cbrt))
}

/// Unclamped: channels outside [0, 1] mean out of gamut.
fn srgb_from_lab(lab: Vec3) -> Vec3 {
    let lms = mul(&LMS_FROM_OKLAB, lab).map(|v| v * v * v);
    mul(&LINEAR_FROM_LMS, lms).map(linear_to_srgb)
}

/// sRGB transfer curve, linear light to encoded.
#[must_use]
pub fn linear_to_srgb(v: f32) -> f32 {
    if v > 0.003_130_8 {
        1.055f32.mul_add(v.powf(1.0 / 2.4), -0.055)
    } else {
        12.92 * v
    }
}

/// Inverse of [`linear_to_srgb`].
#[must_use]
pub fn srgb_to_linear(v: f32) -> f32 {
    if v > 0.040_45 {
        ((v + 0.055) / 1.055).powf(2.4)
    } else {
        v / 12.92
    }
}

// ─── Hex ─────────────────────────────────────────────────────────────────────

/// Parse `#RGB` / `#RRGGBB` (surrounding whitespace ignored) into 8-bit
/// channels without any color-space round trip. The `#` is required.
#[must_use]
pub fn parse_rgb8(s: &str) -> Option<(u8, u8, u8)> {
    let digits = s.trim().strip_prefix('#')?;
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let width = match digits.len() {
        3 => 1,
        6 => 2,
        _ => return None,
    };
    let channel = |i: usize| {
        let v = u8::from_str_radix(&digits[i * width..(i + 1) * width], 16).ok()?;
        Some(if width == 1 { v * 17 } else { v })
    };
    Some((channel(0)?, channel(1)?, channel(2)?))
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn quantize(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f32, b: f32, epsilon: f32) -> bool {
        (a - b).abs() < epsilon
    }

    // ── Roundtrip ────────────────────────────────────────────────────────

    #[test]
    fn hex_roundtrip_is_exact_for_common_colors() {
        for hex in ["#c86432", "#3b82f6", "#000000", "#ffffff", "#ef4444", "#22c55e"] {
            let color = Color::hex(hex).unwrap();
            assert_eq!(color.to_hex(), hex);
        }
    }

    #[test]
    fn srgb_primaries_roundtrip() {
        for (r, g, b) in [(1.0, 0.0, 0.0), (0.0, 1.0, 0.0), (0.0, 0.0, 1.0), (1.0, 1.0, 0.0)] {
            let (rr, rg, rb) = Color::srgb(r, g, b).to_srgb();
            assert!(
                approx_eq(r, rr, 0.005) && approx_eq(g, rg, 0.005) && approx_eq(b, rb, 0.005),
                "roundtrip failed for ({r}, {g}, {b}): ({rr}, {rg}, {rb})"
            );
        }
    }

    // ── Hex Parsing ──────────────────────────────────────────────────────

    #[test]
    fn parses_short_form() {
        assert_eq!(parse_rgb8("#f80"), Some((255, 136, 0)));
    }

    #[test]
    fn parses_with_surrounding_whitespace() {
        assert_eq!(parse_rgb8(" #00ff00 "), Some((0, 255, 0)));
    }

    #[test]
    fn requires_leading_hash() {
        assert!(parse_rgb8("00ff00").is_none());
        assert!(parse_rgb8("bad").is_none());
        assert!(parse_rgb8("##fff").is_none());
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(parse_rgb8("").is_none());
        assert!(parse_rgb8("not-a-color").is_none());
        assert!(parse_rgb8("#12345").is_none());
        assert!(parse_rgb8("#ff000080").is_none());
        assert!(parse_rgb8("#gggggg").is_none());
        assert!(Color::hex("#é1").is_none());
    }

    // ── Known Values ─────────────────────────────────────────────────────

    #[test]
    fn black_and_white_lightness() {
        assert!(approx_eq(Color::hex("#000").unwrap().l, 0.0, 0.001));
        assert!(approx_eq(Color::hex("#fff").unwrap().l, 1.0, 0.001));
    }

    #[test]
    fn grays_are_achromatic() {
        let gray = Color::hex("#808080").unwrap();
        assert!(gray.c < 1e-3, "gray chroma: {}", gray.c);
    }

    // ── Perceptual Operations ────────────────────────────────────────────

    #[test]
    fn brighten_uses_fixed_step() {
        let gray = Color::oklch(0.5, 0.0, 0.0);
        assert!(approx_eq(gray.brighten(1.0).l, 0.6, 1e-5));
        assert!(approx_eq(gray.darken(2.0).l, 0.3, 1e-5));
    }

    #[test]
    fn brighten_clamps() {
        assert!(approx_eq(Color::WHITE.brighten(3.0).l, 1.0, 1e-6));
        assert!(approx_eq(Color::BLACK.darken(3.0).l, 0.0, 1e-6));
    }

    #[test]
    fn desaturate_floors_at_zero() {
        let c = Color::oklch(0.6, 0.05, 200.0).desaturate(10.0);
        assert!(approx_eq(c.c, 0.0, 1e-6));
        let c = Color::oklch(0.6, 0.05, 200.0).saturate(1.0);
        assert!(approx_eq(c.c, 0.09, 1e-5));
    }

    #[test]
    fn mix_endpoints() {
        let a = Color::oklch(0.3, 0.1, 30.0);
        let b = Color::oklch(0.8, 0.05, 90.0);
        assert_eq!(a.mix(&b, 0.0), a);
        assert_eq!(a.mix(&b, 1.0), b);
        let mid = a.mix(&b, 0.5);
        assert!(approx_eq(mid.l, 0.55, 1e-5));
        assert!(approx_eq(mid.h, 60.0, 1e-3));
    }

    #[test]
    fn mix_takes_shortest_hue_arc() {
        let a = Color::oklch(0.5, 0.1, 350.0);
        let b = Color::oklch(0.5, 0.1, 10.0);
        let mid = a.mix(&b, 0.5);
        assert!(hue_distance(mid.h, 0.0) < 0.01, "hue went the long way: {}", mid.h);
    }

    #[test]
    fn distance_to_self_is_zero() {
        let c = Color::hex("#3b82f6").unwrap();
        assert!(c.distance(&c) < 1e-6);
        assert!(Color::BLACK.distance(&Color::WHITE) > 0.9);
    }

    // ── Gamut ────────────────────────────────────────────────────────────

    #[test]
    fn to_gamut_preserves_lightness() {
        let wild = Color::oklch(0.9, 0.35, 260.0);
        assert!(!wild.in_srgb_gamut());
        let mapped = wild.to_gamut();
        assert!(mapped.in_srgb_gamut());
        assert!(approx_eq(mapped.l, 0.9, 1e-6));
        assert!(mapped.c < wild.c);
    }

    #[test]
    fn display_is_hex() {
        assert_eq!(Color::WHITE.to_string(), "#ffffff");
    }
}
