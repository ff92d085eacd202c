//! The token data model: one [`TokenSystem`] per design system.
//!
//! Every color is dual-valued ([`ColorValue`]) so a single system carries
//! both its light and dark appearance. Everything else (spacing, radius,
//! typography, shadows, motion) is mode-invariant.
//!
//! Field names serialize in camelCase so persisted and shared JSON keeps
//! the shape external tools already read (`mutedForeground`, `baseUnit`).

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{self, Deserializer};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Mode
// ---------------------------------------------------------------------------

/// Which half of a [`ColorValue`] is in effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Light,
    Dark,
}

impl Mode {
    pub const ALL: [Self; 2] = [Self::Light, Self::Dark];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Colors
// ---------------------------------------------------------------------------

/// A color with independent light-mode and dark-mode hex values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorValue {
    pub light: String,
    pub dark: String,
}

impl ColorValue {
    #[must_use]
    pub fn new(light: impl Into<String>, dark: impl Into<String>) -> Self {
        Self {
            light: light.into(),
            dark: dark.into(),
        }
    }

    /// Same value in both modes.
    #[must_use]
    pub fn uniform(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            light: value.clone(),
            dark: value,
        }
    }

    #[must_use]
    pub fn get(&self, mode: Mode) -> &str {
        match mode {
            Mode::Light => &self.light,
            Mode::Dark => &self.dark,
        }
    }

    pub fn set(&mut self, mode: Mode, value: impl Into<String>) {
        match mode {
            Mode::Light => self.light = value.into(),
            Mode::Dark => self.dark = value.into(),
        }
    }
}

/// A named, user-editable color (brand or semantic).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorToken {
    pub id: String,
    pub name: String,
    pub value: ColorValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ColorToken {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, value: ColorValue) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            value,
            description: None,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// The two user-extensible color lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorGroup {
    Brand,
    Semantic,
}

impl ColorGroup {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Brand => "brand",
            Self::Semantic => "semantic",
        }
    }
}

// ---------------------------------------------------------------------------
// ColorScale
// ---------------------------------------------------------------------------

/// Stop names of every neutral ramp, lightest first.
pub const SCALE_STOPS: [u16; 11] = [50, 100, 200, 300, 400, 500, 600, 700, 800, 900, 950];

/// An 11-step ramp keyed by [`SCALE_STOPS`].
///
/// Serializes as `{"50": "#…", …, "950": "#…"}`; every stop is required
/// on the way back in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorScale {
    stops: [String; 11],
}

impl ColorScale {
    #[must_use]
    pub const fn from_stops(stops: [String; 11]) -> Self {
        Self { stops }
    }

    /// Hex value at a stop name (`50`, `100`, … `950`).
    #[must_use]
    pub fn get(&self, stop: u16) -> Option<&str> {
        SCALE_STOPS
            .iter()
            .position(|&s| s == stop)
            .map(|i| self.stops[i].as_str())
    }

    /// `(stop, hex)` pairs, lightest first.
    pub fn iter(&self) -> impl Iterator<Item = (u16, &str)> {
        SCALE_STOPS
            .iter()
            .zip(self.stops.iter())
            .map(|(&stop, hex)| (stop, hex.as_str()))
    }

    #[must_use]
    pub const fn stops(&self) -> &[String; 11] {
        &self.stops
    }
}

impl Serialize for ColorScale {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(SCALE_STOPS.len()))?;
        for (stop, hex) in self.iter() {
            map.serialize_entry(&stop.to_string(), hex)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ColorScale {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut raw = BTreeMap::<String, String>::deserialize(deserializer)?;
        let mut stops: [String; 11] = Default::default();
        for (slot, stop) in stops.iter_mut().zip(SCALE_STOPS) {
            *slot = raw
                .remove(&stop.to_string())
                .ok_or_else(|| de::Error::custom(format!("color scale is missing stop {stop}")))?;
        }
        Ok(Self { stops })
    }
}

/// The neutral ramp and the seed it was derived from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NeutralRamp {
    pub base_color: String,
    pub scale: ColorScale,
}

// ---------------------------------------------------------------------------
// Surfaces
// ---------------------------------------------------------------------------

/// The fixed structural surface roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceRole {
    Background,
    Foreground,
    Card,
    Muted,
    MutedForeground,
    Border,
}

impl SurfaceRole {
    pub const ALL: [Self; 6] = [
        Self::Background,
        Self::Foreground,
        Self::Card,
        Self::Muted,
        Self::MutedForeground,
        Self::Border,
    ];

    /// JSON key (camelCase).
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Background => "background",
            Self::Foreground => "foreground",
            Self::Card => "card",
            Self::Muted => "muted",
            Self::MutedForeground => "mutedForeground",
            Self::Border => "border",
        }
    }

    /// Kebab-case name used in CSS variables and exported token paths.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::MutedForeground => "muted-foreground",
            other => other.key(),
        }
    }

    /// Parse either the camelCase key or the kebab slug.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|role| role.key() == s || role.slug() == s)
    }
}

/// Structural surface colors; authored independently of the neutral ramp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurfaceColors {
    pub background: ColorValue,
    pub foreground: ColorValue,
    pub card: ColorValue,
    pub muted: ColorValue,
    pub muted_foreground: ColorValue,
    pub border: ColorValue,
}

impl SurfaceColors {
    #[must_use]
    pub const fn get(&self, role: SurfaceRole) -> &ColorValue {
        match role {
            SurfaceRole::Background => &self.background,
            SurfaceRole::Foreground => &self.foreground,
            SurfaceRole::Card => &self.card,
            SurfaceRole::Muted => &self.muted,
            SurfaceRole::MutedForeground => &self.muted_foreground,
            SurfaceRole::Border => &self.border,
        }
    }

    pub const fn get_mut(&mut self, role: SurfaceRole) -> &mut ColorValue {
        match role {
            SurfaceRole::Background => &mut self.background,
            SurfaceRole::Foreground => &mut self.foreground,
            SurfaceRole::Card => &mut self.card,
            SurfaceRole::Muted => &mut self.muted,
            SurfaceRole::MutedForeground => &mut self.muted_foreground,
            SurfaceRole::Border => &mut self.border,
        }
    }

    /// `(role, value)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (SurfaceRole, &ColorValue)> {
        SurfaceRole::ALL.into_iter().map(|role| (role, self.get(role)))
    }
}

/// Every color in a system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorTokens {
    pub brand: Vec<ColorToken>,
    pub semantic: Vec<ColorToken>,
    pub neutral: NeutralRamp,
    pub surface: SurfaceColors,
}

impl ColorTokens {
    #[must_use]
    pub fn group(&self, group: ColorGroup) -> &[ColorToken] {
        match group {
            ColorGroup::Brand => &self.brand,
            ColorGroup::Semantic => &self.semantic,
        }
    }

    pub const fn group_mut(&mut self, group: ColorGroup) -> &mut Vec<ColorToken> {
        match group {
            ColorGroup::Brand => &mut self.brand,
            ColorGroup::Semantic => &mut self.semantic,
        }
    }
}

// ---------------------------------------------------------------------------
// Typography, spacing, radius, shadows, motion
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontFamily {
    pub id: String,
    pub name: String,
    /// A CSS `font-family` value (comma-separated stack).
    pub value: String,
}

/// One step of the type scale. `size` is in px.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontSize {
    pub name: String,
    pub size: u32,
    pub line_height: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontWeight {
    pub name: String,
    /// 100–900.
    pub value: u16,
}

const fn default_base_size() -> u32 {
    16
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypographyTokens {
    pub font_families: Vec<FontFamily>,
    /// Ordered by strictly increasing `size`.
    pub sizes: Vec<FontSize>,
    pub weights: Vec<FontWeight>,
    /// Body size the modular scale is anchored to.
    #[serde(default = "default_base_size")]
    pub base_size: u32,
}

/// Spacing steps in px, `multiplier × base_unit` until overridden.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpacingTokens {
    pub base_unit: u32,
    pub scale: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RadiusStep {
    pub name: String,
    pub value: u32,
}

impl RadiusStep {
    #[must_use]
    pub fn new(name: impl Into<String>, value: u32) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RadiusTokens {
    pub base: u32,
    pub scale: Vec<RadiusStep>,
}

/// A named CSS `box-shadow` value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShadowToken {
    pub name: String,
    pub value: String,
}

/// A named duration in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationToken {
    pub name: String,
    pub value: u32,
}

/// A named CSS easing (`cubic-bezier(…)` or a keyword).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EasingToken {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimationTokens {
    pub durations: Vec<DurationToken>,
    pub easings: Vec<EasingToken>,
}

// ---------------------------------------------------------------------------
// TokenSystem
// ---------------------------------------------------------------------------

/// A complete design system: the unit of validation, export, persistence
/// and sharing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenSystem {
    pub name: String,
    pub colors: ColorTokens,
    pub typography: TypographyTokens,
    pub spacing: SpacingTokens,
    pub radius: RadiusTokens,
    pub shadows: Vec<ShadowToken>,
    pub animations: AnimationTokens,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
