//! Runtime theme module (`theme.ts`).
//!
//! Unlike the CSS export, every color is resolved to a hex value: one
//! complete map per mode, so a component library can read
//! `theme.colors.dark.primary` without a stylesheet.

use serde_json::{Map, Value, json};

use crate::model::{Mode, TokenSystem};

use super::{hex_value, pretty, slug};

#[must_use]
pub fn generate(tokens: &TokenSystem) -> String {
    let typo = &tokens.typography;
    let theme = json!({
        "name": tokens.name,
        "colors": {
            "light": palette(tokens, Mode::Light),
            "dark": palette(tokens, Mode::Dark),
        },
        "fonts": entries(typo.font_families.iter().map(|f| (slug(&f.name), json!(f.value)))),
        "fontSizes": entries(typo.sizes.iter().map(|s| {
            (slug(&s.name), json!({ "size": s.size, "lineHeight": s.line_height }))
        })),
        "fontWeights": entries(typo.weights.iter().map(|w| (slug(&w.name), json!(w.value)))),
        "spacing": entries(
            tokens.spacing.scale.iter().enumerate().map(|(i, px)| (i.to_string(), json!(px)))
        ),
        "radius": entries(tokens.radius.scale.iter().map(|r| (slug(&r.name), json!(r.value)))),
        "shadows": entries(tokens.shadows.iter().map(|s| (slug(&s.name), json!(s.value)))),
        "animation": {
            "durations": entries(
                tokens.animations.durations.iter().map(|d| (slug(&d.name), json!(d.value)))
            ),
            "easings": entries(
                tokens.animations.easings.iter().map(|e| (slug(&e.name), json!(e.value)))
            ),
        },
    });

    format!(
        "export const theme = {} as const;\n\nexport type Theme = typeof theme;\n",
        pretty(&theme)
    )
}

fn entries(iter: impl Iterator<Item = (String, Value)>) -> Value {
    Value::Object(iter.collect())
}

/// Every color for one mode. Surface roles use their camelCase keys.
fn palette(tokens: &TokenSystem, mode: Mode) -> Map<String, Value> {
    let colors = &tokens.colors;
    let mut map = Map::new();
    for token in colors.brand.iter().chain(&colors.semantic) {
        map.insert(slug(&token.name), json!(hex_value(token.value.get(mode))));
    }
    for (role, value) in colors.surface.iter() {
        map.insert(role.key().to_string(), json!(hex_value(value.get(mode))));
    }
    map.insert(
        "neutral".to_string(),
        entries(
            colors
                .neutral
                .scale
                .iter()
                .map(|(stop, hex)| (stop.to_string(), json!(hex_value(hex)))),
        ),
    );
    map
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::default_tokens;

    fn object(out: &str) -> Value {
        let body = out
            .strip_prefix("export const theme = ")
            .and_then(|rest| rest.split_once(" as const;"))
            .map(|(json, _)| json)
            .expect("theme declaration");
        serde_json::from_str(body).expect("theme body is JSON")
    }

    #[test]
    fn declares_theme_and_type() {
        let out = generate(&default_tokens());
        assert!(out.starts_with("export const theme = {"));
        assert!(out.ends_with("export type Theme = typeof theme;\n"));
    }

    #[test]
    fn colors_are_resolved_per_mode() {
        let theme = object(&generate(&default_tokens()));
        assert_eq!(theme["colors"]["light"]["primary"], "#2563eb");
        assert_eq!(theme["colors"]["dark"]["primary"], "#60a5fa");
        assert_eq!(theme["colors"]["dark"]["mutedForeground"], "#a3a3a3");
        assert_eq!(theme["colors"]["light"]["neutral"]["500"], "#737373");
        assert!(!generate(&default_tokens()).contains("var(--"));
    }

    #[test]
    fn scalars_are_numbers() {
        let theme = object(&generate(&default_tokens()));
        assert_eq!(theme["spacing"]["4"], 16);
        assert_eq!(theme["radius"]["full"], 9999);
        assert_eq!(theme["fontSizes"]["base"]["size"], 16);
        assert_eq!(theme["fontWeights"]["semibold"], 600);
        assert_eq!(theme["animation"]["durations"]["slow"], 400);
    }
}
