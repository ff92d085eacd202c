//! Theme review: contrast issues plus structural sanity checks, folded
//! into one 0–100 score.
//!
//! Deductions: 20 per error, 10 per warning, 2 per info, floored at 0.
//! Advisory only. Nothing here gates export or persistence.

use std::collections::HashMap;

use serde::Serialize;
use tint_color::hex;

use crate::formats::slug;
use crate::model::{ColorGroup, Mode, SCALE_STOPS, SurfaceRole, TokenSystem};
use crate::validate::{IssueCategory, Severity, ValidationIssue, validate_all_contrasts};

/// Oklab ΔE below which a semantic color reads as a copy of a brand color.
pub const SIMILARITY_THRESHOLD: f32 = 0.08;

/// Spacing base units above this are flagged as unusual.
pub const MAX_SPACING_BASE: u32 = 16;

const ERROR_PENALTY: u32 = 20;
const WARNING_PENALTY: u32 = 10;
const INFO_PENALTY: u32 = 2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThemeReview {
    pub score: u8,
    pub issues: Vec<ValidationIssue>,
}

impl ThemeReview {
    #[must_use]
    pub fn count(&self, severity: Severity) -> usize {
        self.issues.iter().filter(|i| i.severity == severity).count()
    }
}

/// Score a list of issues.
#[must_use]
pub fn score(issues: &[ValidationIssue]) -> u8 {
    let penalty: u32 = issues
        .iter()
        .map(|i| match i.severity {
            Severity::Error => ERROR_PENALTY,
            Severity::Warning => WARNING_PENALTY,
            Severity::Info => INFO_PENALTY,
        })
        .sum();
    u8::try_from(100_u32.saturating_sub(penalty)).unwrap_or(0)
}

/// Contrast checks plus structural checks, scored.
#[must_use]
pub fn review_theme(tokens: &TokenSystem) -> ThemeReview {
    let mut issues = validate_all_contrasts(tokens);
    check_conventional_colors(tokens, &mut issues);
    check_malformed(tokens, &mut issues);
    check_similarity(tokens, &mut issues);
    check_duplicate_names(tokens, &mut issues);
    check_scales(tokens, &mut issues);
    ThemeReview {
        score: score(&issues),
        issues,
    }
}

// ---------------------------------------------------------------------------
// Structural checks
// ---------------------------------------------------------------------------

fn check_conventional_colors(tokens: &TokenSystem, issues: &mut Vec<ValidationIssue>) {
    if tokens.colors.brand.is_empty() {
        issues.push(
            ValidationIssue::new(
                Severity::Warning,
                IssueCategory::Structure,
                "No brand colors defined",
            )
            .with_suggestion("Add at least a primary brand color"),
        );
    }

    let surface = &tokens.colors.surface;
    for role in [SurfaceRole::Background, SurfaceRole::Foreground] {
        for mode in Mode::ALL {
            let value = surface.get(role).get(mode);
            if !hex::is_valid(value) {
                issues.push(ValidationIssue::new(
                    Severity::Error,
                    IssueCategory::Structure,
                    format!(
                        "Missing {} color in {mode} mode (got \"{value}\")",
                        role.slug()
                    ),
                ));
            }
        }
    }
}

fn check_malformed(tokens: &TokenSystem, issues: &mut Vec<ValidationIssue>) {
    let mut flag = |label: String, value: &str| {
        if !hex::is_valid(value) {
            issues.push(
                ValidationIssue::new(
                    Severity::Warning,
                    IssueCategory::Structure,
                    format!("{label} is not a valid hex color: \"{value}\""),
                )
                .with_suggestion("Use #RGB or #RRGGBB"),
            );
        }
    };

    for group in [ColorGroup::Brand, ColorGroup::Semantic] {
        for token in tokens.colors.group(group) {
            for mode in Mode::ALL {
                flag(
                    format!("{} color \"{}\" ({mode})", group.as_str(), token.name),
                    token.value.get(mode),
                );
            }
        }
    }
    for (role, value) in tokens.colors.surface.iter() {
        // Background and foreground are reported as missing instead.
        if matches!(role, SurfaceRole::Background | SurfaceRole::Foreground) {
            continue;
        }
        for mode in Mode::ALL {
            flag(format!("Surface {} ({mode})", role.slug()), value.get(mode));
        }
    }
    flag(
        "Neutral base color".to_string(),
        &tokens.colors.neutral.base_color,
    );
}

fn check_similarity(tokens: &TokenSystem, issues: &mut Vec<ValidationIssue>) {
    for semantic in &tokens.colors.semantic {
        for brand in &tokens.colors.brand {
            let Some(d) = hex::distance(&semantic.value.light, &brand.value.light) else {
                continue;
            };
            if d < SIMILARITY_THRESHOLD {
                issues.push(
                    ValidationIssue::new(
                        Severity::Warning,
                        IssueCategory::Similarity,
                        format!(
                            "Semantic color \"{}\" is too similar to brand color \"{}\" (ΔE {d:.3})",
                            semantic.name, brand.name
                        ),
                    )
                    .with_suggestion("Shift its hue so status colors stand apart from the brand"),
                );
            }
        }
    }
}

/// Brand and semantic names share the `color-<slug>` namespace with the
/// surface roles and the neutral ramp, so two names that slug alike clash
/// in every export and are an error.
fn check_duplicate_names(tokens: &TokenSystem, issues: &mut Vec<ValidationIssue>) {
    let surface = SurfaceRole::ALL
        .into_iter()
        .map(|role| (role.slug().to_string(), "surface"));
    let neutral = SCALE_STOPS
        .into_iter()
        .map(|stop| (format!("neutral-{stop}"), "neutral"));
    let mut seen: HashMap<String, &'static str> = surface.chain(neutral).collect();

    for group in [ColorGroup::Brand, ColorGroup::Semantic] {
        for token in tokens.colors.group(group) {
            let key = slug(&token.name);
            if let Some(first) = seen.get(&key) {
                issues.push(
                    ValidationIssue::new(
                        Severity::Error,
                        IssueCategory::Naming,
                        format!(
                            "Duplicate color name \"{}\" in {} (already used in {first})",
                            token.name,
                            group.as_str()
                        ),
                    )
                    .with_suggestion("Rename one of them"),
                );
            } else {
                seen.insert(key, group.as_str());
            }
        }
    }
}

fn check_scales(tokens: &TokenSystem, issues: &mut Vec<ValidationIssue>) {
    if tokens.radius.base == 0 {
        issues.push(ValidationIssue::new(
            Severity::Info,
            IssueCategory::Scale,
            "Radius base is 0; every corner will be square",
        ));
    }

    let unit = tokens.spacing.base_unit;
    if unit == 0 {
        issues.push(ValidationIssue::new(
            Severity::Info,
            IssueCategory::Scale,
            "Spacing base unit is 0; every spacing step collapses to 0",
        ));
    } else if unit > MAX_SPACING_BASE {
        issues.push(
            ValidationIssue::new(
                Severity::Info,
                IssueCategory::Scale,
                format!("Spacing base unit {unit}px is unusually large"),
            )
            .with_suggestion("Most systems use 4px or 8px"),
        );
    }

    let sizes = &tokens.typography.sizes;
    if let Some(pair) = sizes.windows(2).find(|w| w[0].size >= w[1].size) {
        issues.push(ValidationIssue::new(
            Severity::Warning,
            IssueCategory::Scale,
            format!(
                "Font size \"{}\" ({}px) is not smaller than \"{}\" ({}px)",
                pair[0].name, pair[0].size, pair[1].name, pair[1].size
            ),
        ));
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
