//! WCAG contrast checks over a [`TokenSystem`].
//!
//! Four independent passes, always run in this order:
//!
//! ```text
//! 1. foreground / background        light, dark   < 3.0 error, < 4.5 warning
//! 2. mutedForeground / muted        light, dark   < 3.0 error, < 4.5 warning
//! 3. each brand color / background  light, dark   < 4.5 warning
//! 4. each semantic color / bg       light, dark   < 3.0 warning
//! ```
//!
//! Pairs with a malformed hex on either side are skipped here; the
//! structural review reports those instead.

use std::fmt;

use serde::{Deserialize, Serialize};
use tint_color::{Color, ensure_readability, hex};

use crate::model::{ColorToken, ColorValue, Mode, TokenSystem};

/// WCAG AA threshold for body text.
pub const AA_NORMAL: f64 = 4.5;

/// WCAG AA threshold for large text and UI indicators.
pub const AA_LARGE: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl Severity {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueCategory {
    Contrast,
    Structure,
    Naming,
    Similarity,
    Scale,
}

/// One advisory finding. Recomputed on demand, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    #[serde(rename = "type")]
    pub severity: Severity,
    pub category: IssueCategory,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl ValidationIssue {
    #[must_use]
    pub fn new(severity: Severity, category: IssueCategory, message: impl Into<String>) -> Self {
        Self {
            severity,
            category,
            message: message.into(),
            suggestion: None,
        }
    }

    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)?;
        if let Some(s) = &self.suggestion {
            write!(f, " ({s})")?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Checks
// ---------------------------------------------------------------------------

/// Run every contrast check. Never short-circuits.
#[must_use]
pub fn validate_all_contrasts(tokens: &TokenSystem) -> Vec<ValidationIssue> {
    let surface = &tokens.colors.surface;
    let mut issues = Vec::new();

    for mode in Mode::ALL {
        check_text_pair(
            &mut issues,
            "Foreground",
            "background",
            &surface.foreground,
            &surface.background,
            mode,
        );
    }
    for mode in Mode::ALL {
        check_text_pair(
            &mut issues,
            "Muted foreground",
            "muted",
            &surface.muted_foreground,
            &surface.muted,
            mode,
        );
    }
    for token in &tokens.colors.brand {
        for mode in Mode::ALL {
            check_against_background(
                &mut issues,
                "Brand",
                token,
                &surface.background,
                mode,
                AA_NORMAL,
            );
        }
    }
    for token in &tokens.colors.semantic {
        for mode in Mode::ALL {
            check_against_background(
                &mut issues,
                "Semantic",
                token,
                &surface.background,
                mode,
                AA_LARGE,
            );
        }
    }

    issues
}

fn check_text_pair(
    issues: &mut Vec<ValidationIssue>,
    fg_label: &str,
    bg_label: &str,
    fg: &ColorValue,
    bg: &ColorValue,
    mode: Mode,
) {
    let (fg, bg) = (fg.get(mode), bg.get(mode));
    let Some(ratio) = tint_color::contrast::contrast_ratio_hex(fg, bg) else {
        return;
    };
    let severity = if ratio < AA_LARGE {
        Severity::Error
    } else if ratio < AA_NORMAL {
        Severity::Warning
    } else {
        return;
    };

    let mut issue = ValidationIssue::new(
        severity,
        IssueCategory::Contrast,
        format!(
            "{fg_label} on {bg_label} is {ratio:.2}:1 in {mode} mode (needs {AA_NORMAL}:1)"
        ),
    );
    if let Some(fix) = suggest(fg, bg, AA_NORMAL, mode) {
        issue = issue.with_suggestion(format!("Try {fix}"));
    }
    issues.push(issue);
}

fn check_against_background(
    issues: &mut Vec<ValidationIssue>,
    group: &str,
    token: &ColorToken,
    background: &ColorValue,
    mode: Mode,
    min_ratio: f64,
) {
    let (fg, bg) = (token.value.get(mode), background.get(mode));
    let Some(ratio) = tint_color::contrast::contrast_ratio_hex(fg, bg) else {
        return;
    };
    if ratio >= min_ratio {
        return;
    }

    let direction = match mode {
        Mode::Light => "darkening",
        Mode::Dark => "lightening",
    };
    let mut issue = ValidationIssue::new(
        Severity::Warning,
        IssueCategory::Contrast,
        format!(
            "{group} color \"{}\" is {ratio:.2}:1 against the background in {mode} mode; consider {direction} it",
            token.name
        ),
    );
    if let Some(fix) = suggest(fg, bg, min_ratio, mode) {
        issue = issue.with_suggestion(format!("Try {fix} for {min_ratio}:1"));
    }
    issues.push(issue);
}

/// Nearest hex reaching `min_ratio`, moving away from the background.
fn suggest(fg: &str, bg: &str, min_ratio: f64, mode: Mode) -> Option<String> {
    let (fg, bg) = (Color::hex(fg)?, Color::hex(bg)?);
    let fixed = ensure_readability(fg, bg, min_ratio, mode == Mode::Dark).to_hex();
    (hex::contrast_ratio(&fixed, &bg.to_hex()) >= min_ratio).then_some(fixed)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
