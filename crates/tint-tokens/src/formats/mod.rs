//! Exporters: one pure `&TokenSystem -> String` function per target.
//!
//! | Format     | Output                                   | File               |
//! |------------|------------------------------------------|--------------------|
//! | `Css`      | `:root` + `.dark` custom properties      | `tokens.css`       |
//! | `Tailwind` | `module.exports` config, `theme.extend`  | `tailwind.config.js` |
//! | `Theme`    | resolved light/dark TS theme object      | `theme.ts`         |
//! | `W3c`      | design-tokens community group JSON       | `tokens.json`      |
//! | `Figma`    | Figma variables collections JSON         | `figma-variables.json` |
//!
//! Output is byte-stable for a given input: no timestamps, no generated
//! ids, map keys in insertion order.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use tint_color::hex;

use crate::model::TokenSystem;

pub mod css;
pub mod figma;
pub mod tailwind;
pub mod theme;
pub mod w3c;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    Css,
    Tailwind,
    Theme,
    W3c,
    Figma,
}

type Generator = fn(&TokenSystem) -> String;

/// Indexed by `ExportFormat as usize`.
const GENERATORS: [Generator; 5] = [
    css::generate,
    tailwind::generate,
    theme::generate,
    w3c::generate,
    figma::generate,
];

impl ExportFormat {
    pub const ALL: [Self; 5] = [Self::Css, Self::Tailwind, Self::Theme, Self::W3c, Self::Figma];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Css => "css",
            Self::Tailwind => "tailwind",
            Self::Theme => "theme",
            Self::W3c => "json",
            Self::Figma => "figma",
        }
    }

    /// Conventional file name for the artifact.
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Css => "tokens.css",
            Self::Tailwind => "tailwind.config.js",
            Self::Theme => "theme.ts",
            Self::W3c => "tokens.json",
            Self::Figma => "figma-variables.json",
        }
    }

    #[must_use]
    pub fn generate(self, tokens: &TokenSystem) -> String {
        GENERATORS[self as usize](tokens)
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown export format \"{0}\" (expected css, tailwind, theme, json or figma)")]
pub struct UnknownFormat(pub String);

impl FromStr for ExportFormat {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "css" => Ok(Self::Css),
            "tailwind" => Ok(Self::Tailwind),
            "theme" | "ts" => Ok(Self::Theme),
            "json" | "w3c" => Ok(Self::W3c),
            "figma" => Ok(Self::Figma),
            _ => Err(UnknownFormat(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Lowercase kebab-case identifier for CSS variables and token paths.
///
/// Runs of anything outside `[a-z0-9]` collapse to one `-`; an empty
/// result becomes `"unnamed"`.
#[must_use]
pub fn slug(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for ch in name.trim().chars() {
        if ch.is_ascii_alphanumeric() {
            out.push(ch.to_ascii_lowercase());
        } else if !out.is_empty() && !out.ends_with('-') {
            out.push('-');
        }
    }
    while out.ends_with('-') {
        out.pop();
    }
    if out.is_empty() {
        out.push_str("unnamed");
    }
    out
}

/// Canonical `#rrggbb` for an exported color. Malformed values become
/// [`hex::FALLBACK_HEX`] so no output ever carries a broken color.
pub(crate) fn hex_value(value: &str) -> String {
    hex::normalize_or_fallback(value)
}

/// Split a CSS `font-family` stack into its members.
pub(crate) fn font_stack(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|f| f.trim().trim_matches(['"', '\'']).to_string())
        .filter(|f| !f.is_empty())
        .collect()
}

/// Pretty JSON. Serializing a `serde_json::Value` cannot fail.
pub(crate) fn pretty(value: &serde_json::Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
