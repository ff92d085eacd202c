//! An editing session over one [`TokenSystem`].
//!
//! All edits go through [`TokenEditor`] methods. Each successful edit bumps
//! [`TokenEditor::revision`] and drops the cached validation results, so
//! [`issues`](TokenEditor::issues) and [`review`](TokenEditor::review) are
//! recomputed lazily at most once per revision.
//!
//! Edits addressed by id or name return `false` when nothing matched and
//! leave the revision untouched.

use std::cell::OnceCell;

use tracing::debug;

use crate::defaults::default_tokens;
use crate::formats::ExportFormat;
use crate::model::{ColorGroup, ColorToken, ColorValue, Mode, SurfaceRole, TokenSystem};
use crate::presets::preset;
use crate::review::{ThemeReview, review_theme};
use crate::scale::{
    generate_color_scale, generate_radius_scale, generate_spacing_scale, generate_typography_scale,
};
use crate::validate::{ValidationIssue, validate_all_contrasts};

/// Partial update for a brand or semantic color. `None` fields are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorPatch {
    pub name: Option<String>,
    pub light: Option<String>,
    pub dark: Option<String>,
    pub description: Option<Option<String>>,
}

impl ColorPatch {
    #[must_use]
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn value(value: ColorValue) -> Self {
        Self {
            light: Some(value.light),
            dark: Some(value.dark),
            ..Self::default()
        }
    }

    /// Set one mode only.
    #[must_use]
    pub fn mode(mode: Mode, hex: impl Into<String>) -> Self {
        let hex = Some(hex.into());
        match mode {
            Mode::Light => Self {
                light: hex,
                ..Self::default()
            },
            Mode::Dark => Self {
                dark: hex,
                ..Self::default()
            },
        }
    }

    fn apply(self, token: &mut ColorToken) {
        if let Some(name) = self.name {
            token.name = name;
        }
        if let Some(light) = self.light {
            token.value.light = light;
        }
        if let Some(dark) = self.dark {
            token.value.dark = dark;
        }
        if let Some(description) = self.description {
            token.description = description;
        }
    }
}

#[derive(Debug, Clone)]
pub struct TokenEditor {
    tokens: TokenSystem,
    preset_id: Option<String>,
    revision: u64,
    next_color: u64,
    issues: OnceCell<Vec<ValidationIssue>>,
    review: OnceCell<ThemeReview>,
}

impl Default for TokenEditor {
    fn default() -> Self {
        Self::new(default_tokens())
    }
}

impl TokenEditor {
    #[must_use]
    pub fn new(tokens: TokenSystem) -> Self {
        Self {
            tokens,
            preset_id: None,
            revision: 0,
            next_color: 1,
            issues: OnceCell::new(),
            review: OnceCell::new(),
        }
    }

    /// Start from a built-in preset.
    #[must_use]
    pub fn from_preset(id: &str) -> Option<Self> {
        let p = preset(id)?;
        let mut editor = Self::new(p.tokens);
        editor.preset_id = Some(p.id.to_string());
        Some(editor)
    }

    #[must_use]
    pub const fn tokens(&self) -> &TokenSystem {
        &self.tokens
    }

    #[must_use]
    pub fn into_tokens(self) -> TokenSystem {
        self.tokens
    }

    /// Preset the current system was loaded from, if any.
    #[must_use]
    pub fn preset_id(&self) -> Option<&str> {
        self.preset_id.as_deref()
    }

    /// Increases by one on every applied edit.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    fn touch(&mut self) {
        self.revision += 1;
        self.issues.take();
        self.review.take();
    }

    // ─── Derived state ───────────────────────────────────────────────────

    /// Contrast issues for the current revision.
    pub fn issues(&self) -> &[ValidationIssue] {
        self.issues.get_or_init(|| validate_all_contrasts(&self.tokens))
    }

    /// Full review for the current revision.
    pub fn review(&self) -> &ThemeReview {
        self.review.get_or_init(|| review_theme(&self.tokens))
    }

    #[must_use]
    pub fn export(&self, format: ExportFormat) -> String {
        format.generate(&self.tokens)
    }

    // ─── Whole-system edits ──────────────────────────────────────────────

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.tokens.name = name.into();
        self.touch();
    }

    /// Replace the working system, e.g. after switching saved systems.
    pub fn load_tokens(&mut self, tokens: TokenSystem, preset_id: Option<String>) {
        self.tokens = tokens;
        self.preset_id = preset_id;
        self.touch();
    }

    /// Load a preset by id. Unknown ids leave the session unchanged.
    pub fn load_preset(&mut self, id: &str) -> bool {
        let Some(p) = preset(id) else {
            debug!(preset = id, "unknown preset");
            return false;
        };
        debug!(preset = p.id, "loading preset");
        self.load_tokens(p.tokens, Some(p.id.to_string()));
        true
    }

    /// Back to the default system.
    pub fn reset(&mut self) {
        self.load_tokens(default_tokens(), None);
    }

    // ─── Brand and semantic colors ───────────────────────────────────────

    /// Append a color and return its generated id.
    pub fn add_brand_color(&mut self, name: impl Into<String>, value: ColorValue) -> String {
        self.add_color(ColorGroup::Brand, name.into(), value)
    }

    pub fn update_brand_color(&mut self, id: &str, patch: ColorPatch) -> bool {
        self.update_color(ColorGroup::Brand, id, patch)
    }

    pub fn remove_brand_color(&mut self, id: &str) -> bool {
        self.remove_color(ColorGroup::Brand, id)
    }

    /// Append a color and return its generated id.
    pub fn add_semantic_color(&mut self, name: impl Into<String>, value: ColorValue) -> String {
        self.add_color(ColorGroup::Semantic, name.into(), value)
    }

    pub fn update_semantic_color(&mut self, id: &str, patch: ColorPatch) -> bool {
        self.update_color(ColorGroup::Semantic, id, patch)
    }

    pub fn remove_semantic_color(&mut self, id: &str) -> bool {
        self.remove_color(ColorGroup::Semantic, id)
    }

    /// `<group>-<n>`, skipping ids already present in either group.
    fn next_color_id(&mut self, group: ColorGroup) -> String {
        loop {
            let id = format!("{}-{}", group.as_str(), self.next_color);
            self.next_color += 1;
            let colors = &self.tokens.colors;
            if !colors.brand.iter().chain(&colors.semantic).any(|c| c.id == id) {
                return id;
            }
        }
    }

    fn add_color(&mut self, group: ColorGroup, name: String, value: ColorValue) -> String {
        let id = self.next_color_id(group);
        self.tokens
            .colors
            .group_mut(group)
            .push(ColorToken::new(id.clone(), name, value));
        self.touch();
        id
    }

    fn update_color(&mut self, group: ColorGroup, id: &str, patch: ColorPatch) -> bool {
        let Some(token) = self
            .tokens
            .colors
            .group_mut(group)
            .iter_mut()
            .find(|c| c.id == id)
        else {
            return false;
        };
        patch.apply(token);
        self.touch();
        true
    }

    fn remove_color(&mut self, group: ColorGroup, id: &str) -> bool {
        let list = self.tokens.colors.group_mut(group);
        let before = list.len();
        list.retain(|c| c.id != id);
        if list.len() == before {
            return false;
        }
        self.touch();
        true
    }

    // ─── Neutral and surface ─────────────────────────────────────────────

    /// Set the neutral seed and regenerate the ramp.
    pub fn set_neutral_base(&mut self, base: impl Into<String>) {
        let base = base.into();
        self.tokens.colors.neutral.scale = generate_color_scale(&base);
        self.tokens.colors.neutral.base_color = base;
        self.touch();
    }

    pub fn set_surface_color(&mut self, role: SurfaceRole, mode: Mode, hex: impl Into<String>) {
        self.tokens.colors.surface.get_mut(role).set(mode, hex);
        self.touch();
    }

    // ─── Spacing and radius ──────────────────────────────────────────────

    /// Set the base unit and regenerate every spacing step.
    pub fn set_spacing_base(&mut self, base_unit: u32) {
        self.tokens.spacing.base_unit = base_unit;
        self.tokens.spacing.scale = generate_spacing_scale(base_unit);
        self.touch();
    }

    /// Override one spacing step until the base changes again.
    pub fn set_spacing_value(&mut self, index: usize, px: u32) -> bool {
        let Some(slot) = self.tokens.spacing.scale.get_mut(index) else {
            return false;
        };
        *slot = px;
        self.touch();
        true
    }

    /// Set the base radius and regenerate every step.
    pub fn set_radius_base(&mut self, base: u32) {
        self.tokens.radius.base = base;
        self.tokens.radius.scale = generate_radius_scale(base);
        self.touch();
    }

    /// Override one named radius step.
    pub fn set_radius_value(&mut self, name: &str, px: u32) -> bool {
        let Some(step) = self.tokens.radius.scale.iter_mut().find(|s| s.name == name) else {
            return false;
        };
        step.value = px;
        self.touch();
        true
    }

    // ─── Typography ──────────────────────────────────────────────────────

    /// Set a font stack by family id (`font-sans`) or name (`sans`).
    pub fn set_font_family(&mut self, id_or_name: &str, value: impl Into<String>) -> bool {
        let Some(family) = self
            .tokens
            .typography
            .font_families
            .iter_mut()
            .find(|f| f.id == id_or_name || f.name == id_or_name)
        else {
            return false;
        };
        family.value = value.into();
        self.touch();
        true
    }

    /// Override one size step. `line_height` is kept when `None`.
    pub fn set_font_size(&mut self, name: &str, size: u32, line_height: Option<f64>) -> bool {
        let Some(step) = self.tokens.typography.sizes.iter_mut().find(|s| s.name == name) else {
            return false;
        };
        step.size = size;
        if let Some(lh) = line_height {
            step.line_height = lh;
        }
        self.touch();
        true
    }

    /// Re-anchor the type scale and regenerate every size.
    pub fn set_typography_base(&mut self, base_size: u32) {
        self.tokens.typography.base_size = base_size;
        self.tokens.typography.sizes = generate_typography_scale(base_size);
        self.touch();
    }

    // ─── Shadows and motion ──────────────────────────────────────────────

    pub fn set_shadow(&mut self, name: &str, value: impl Into<String>) -> bool {
        let Some(shadow) = self.tokens.shadows.iter_mut().find(|s| s.name == name) else {
            return false;
        };
        shadow.value = value.into();
        self.touch();
        true
    }

    pub fn set_duration(&mut self, name: &str, ms: u32) -> bool {
        let Some(d) = self
            .tokens
            .animations
            .durations
            .iter_mut()
            .find(|d| d.name == name)
        else {
            return false;
        };
        d.value = ms;
        self.touch();
        true
    }

    pub fn set_easing(&mut self, name: &str, value: impl Into<String>) -> bool {
        let Some(e) = self
            .tokens
            .animations
            .easings
            .iter_mut()
            .find(|e| e.name == name)
        else {
            return false;
        };
        e.value = value.into();
        self.touch();
        true
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::Severity;
    use pretty_assertions::assert_eq;

    // ── Colors ─────────────────────────────────────────────────────

    #[test]
    fn added_colors_get_group_ids() {
        let mut ed = TokenEditor::default();
        let a = ed.add_brand_color("tertiary", ColorValue::new("#0f766e", "#2dd4bf"));
        let b = ed.add_semantic_color("neutral-info", ColorValue::uniform("#0369a1"));
        assert_eq!(a, "brand-1");
        assert_eq!(b, "semantic-2");
        assert_eq!(ed.tokens().colors.brand.last().map(|c| c.id.as_str()), Some("brand-1"));
        assert_eq!(ed.revision(), 2);
    }

    #[test]
    fn generated_ids_skip_existing() {
        let mut t = default_tokens();
        t.colors.brand[0].id = "brand-1".into();
        let mut ed = TokenEditor::new(t);
        assert_eq!(ed.add_brand_color("x", ColorValue::uniform("#000")), "brand-2");
    }

    #[test]
    fn update_patches_only_given_fields() {
        let mut ed = TokenEditor::default();
        assert!(ed.update_brand_color("brand-primary", ColorPatch::mode(Mode::Dark, "#93c5fd")));
        let primary = &ed.tokens().colors.brand[0];
        assert_eq!(primary.value, ColorValue::new("#2563eb", "#93c5fd"));
        assert_eq!(primary.name, "primary");

        assert!(ed.update_semantic_color("semantic-info", ColorPatch::name("notice")));
        assert_eq!(ed.tokens().colors.semantic[3].name, "notice");
    }

    #[test]
    fn unknown_ids_are_noops() {
        let mut ed = TokenEditor::default();
        assert!(!ed.update_brand_color("nope", ColorPatch::name("x")));
        assert!(!ed.remove_semantic_color("nope"));
        assert!(!ed.remove_brand_color("semantic-error"));
        assert!(!ed.set_radius_value("huge", 4));
        assert!(!ed.set_spacing_value(99, 4));
        assert!(!ed.set_font_family("display", "Impact"));
        assert!(!ed.set_shadow("2xl", "none"));
        assert_eq!(ed.revision(), 0);
    }

    #[test]
    fn remove_color() {
        let mut ed = TokenEditor::default();
        assert!(ed.remove_brand_color("brand-accent"));
        assert_eq!(ed.tokens().colors.brand.len(), 2);
    }

    // ── Scales ─────────────────────────────────────────────────────

    #[test]
    fn base_changes_regenerate_scales() {
        let mut ed = TokenEditor::default();
        ed.set_spacing_value(1, 5);
        ed.set_spacing_base(8);
        assert_eq!(ed.tokens().spacing.scale[1], 8);

        ed.set_radius_base(4);
        assert_eq!(ed.tokens().radius.scale[2].value, 4);
        assert!(ed.set_radius_value("md", 6));
        assert_eq!(ed.tokens().radius.scale[2].value, 6);

        ed.set_typography_base(18);
        assert_eq!(ed.tokens().typography.base_size, 18);
        assert_eq!(ed.tokens().typography.sizes[2].size, 18);

        ed.set_neutral_base("#64748b");
        assert_eq!(ed.tokens().colors.neutral.scale.get(500), Some("#64748b"));
    }

    #[test]
    fn font_size_override_keeps_line_height() {
        let mut ed = TokenEditor::default();
        assert!(ed.set_font_size("base", 17, None));
        let base = &ed.tokens().typography.sizes[2];
        assert_eq!((base.size, base.line_height), (17, 1.5));
    }

    // ── Cached validation ──────────────────────────────────────────

    #[test]
    fn issues_follow_edits() {
        let mut ed = TokenEditor::default();
        assert!(ed.issues().is_empty());
        ed.set_surface_color(SurfaceRole::Foreground, Mode::Light, "#777777");
        ed.set_surface_color(SurfaceRole::Background, Mode::Light, "#808080");
        assert!(ed.issues().iter().any(|i| i.severity == Severity::Error));
        assert!(ed.review().score < 100);

        ed.reset();
        assert!(ed.issues().is_empty());
        assert_eq!(ed.review().score, 100);
    }

    #[test]
    fn cache_is_reused_within_a_revision() {
        let ed = TokenEditor::default();
        let first: *const ValidationIssue = ed.issues().as_ptr();
        let second: *const ValidationIssue = ed.issues().as_ptr();
        assert_eq!(first, second);
    }

    // ── Loading ────────────────────────────────────────────────────

    #[test]
    fn load_preset_tracks_id() {
        let mut ed = TokenEditor::default();
        assert!(ed.load_preset("brutalist"));
        assert_eq!(ed.preset_id(), Some("brutalist"));
        assert_eq!(ed.tokens().radius.base, 0);
        assert!(!ed.load_preset("vaporwave"));
        assert_eq!(ed.preset_id(), Some("brutalist"));

        ed.reset();
        assert_eq!(ed.preset_id(), None);
        assert_eq!(ed.tokens(), &default_tokens());
    }

    #[test]
    fn from_preset() {
        let ed = TokenEditor::from_preset("ocean").unwrap();
        assert_eq!(ed.tokens().name, "Ocean");
        assert!(TokenEditor::from_preset("nope").is_none());
    }

    #[test]
    fn motion_edits() {
        let mut ed = TokenEditor::default();
        assert!(ed.set_duration("fast", 100));
        assert!(ed.set_easing("out", "ease-out"));
        assert!(ed.set_shadow("sm", "none"));
        assert!(ed.set_font_family("font-mono", "Fira Code, monospace"));
        assert_eq!(ed.tokens().animations.durations[0].value, 100);
        assert_eq!(ed.revision(), 4);
    }
}
