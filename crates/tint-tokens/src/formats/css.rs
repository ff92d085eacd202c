//! CSS custom properties.
//!
//! `:root` carries every token with light-mode colors. `.dark` overrides
//! only the brand, semantic and surface colors whose dark value differs.
//! Everything else is mode-invariant and appears once.

use std::fmt::Write;

use crate::model::{Mode, TokenSystem};

use super::{hex_value, slug};

#[must_use]
pub fn generate(tokens: &TokenSystem) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "/* {} */", tokens.name.replace("*/", "* /"));
    out.push_str(":root {\n");
    write_colors(&mut out, tokens, Mode::Light);
    write_invariant(&mut out, tokens);
    out.push_str("}\n");

    let mut dark = String::new();
    write_dark_overrides(&mut dark, tokens);
    if !dark.is_empty() {
        out.push_str("\n.dark {\n");
        out.push_str(&dark);
        out.push_str("}\n");
    }
    out
}

fn var(out: &mut String, name: &str, value: impl std::fmt::Display) {
    let _ = writeln!(out, "  --{name}: {value};");
}

fn section(out: &mut String, title: &str) {
    let _ = writeln!(out, "\n  /* {title} */");
}

fn write_colors(out: &mut String, tokens: &TokenSystem, mode: Mode) {
    let colors = &tokens.colors;
    section(out, "Brand");
    for token in &colors.brand {
        var(out, &format!("color-{}", slug(&token.name)), hex_value(token.value.get(mode)));
    }
    section(out, "Semantic");
    for token in &colors.semantic {
        var(out, &format!("color-{}", slug(&token.name)), hex_value(token.value.get(mode)));
    }
    section(out, "Surface");
    for (role, value) in colors.surface.iter() {
        var(out, &format!("color-{}", role.slug()), hex_value(value.get(mode)));
    }
    section(out, "Neutral");
    for (stop, hex) in colors.neutral.scale.iter() {
        var(out, &format!("color-neutral-{stop}"), hex_value(hex));
    }
}

fn write_invariant(out: &mut String, tokens: &TokenSystem) {
    let typo = &tokens.typography;
    section(out, "Typography");
    for family in &typo.font_families {
        var(out, &format!("font-{}", slug(&family.name)), &family.value);
    }
    for size in &typo.sizes {
        let name = slug(&size.name);
        var(out, &format!("font-size-{name}"), format!("{}px", size.size));
        var(out, &format!("line-height-{name}"), size.line_height);
    }
    for weight in &typo.weights {
        var(out, &format!("font-weight-{}", slug(&weight.name)), weight.value);
    }

    section(out, "Spacing");
    for (i, px) in tokens.spacing.scale.iter().enumerate() {
        var(out, &format!("spacing-{i}"), format!("{px}px"));
    }

    section(out, "Radius");
    for step in &tokens.radius.scale {
        var(out, &format!("radius-{}", slug(&step.name)), format!("{}px", step.value));
    }

    section(out, "Shadows");
    for shadow in &tokens.shadows {
        var(out, &format!("shadow-{}", slug(&shadow.name)), &shadow.value);
    }

    section(out, "Animation");
    for duration in &tokens.animations.durations {
        var(out, &format!("duration-{}", slug(&duration.name)), format!("{}ms", duration.value));
    }
    for easing in &tokens.animations.easings {
        var(out, &format!("easing-{}", slug(&easing.name)), &easing.value);
    }
}

fn write_dark_overrides(out: &mut String, tokens: &TokenSystem) {
    let colors = &tokens.colors;
    let named = colors
        .brand
        .iter()
        .chain(&colors.semantic)
        .map(|t| (slug(&t.name), &t.value));
    let surface = colors
        .surface
        .iter()
        .map(|(role, value)| (role.slug().to_string(), value));

    for (name, value) in named.chain(surface) {
        let (light, dark) = (hex_value(&value.light), hex_value(&value.dark));
        if dark != light {
            var(out, &format!("color-{name}"), dark);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
