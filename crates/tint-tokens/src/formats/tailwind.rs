//! Tailwind config (`tailwind.config.js`).
//!
//! Brand and semantic colors become `{ DEFAULT, light, dark }` where
//! `DEFAULT` defers to the CSS variable, so the config pairs with the CSS
//! export and `darkMode: 'class'`. Other maps reuse the CSS key names.

use serde_json::{Map, Value, json};

use crate::model::{ColorToken, TokenSystem};

use super::{font_stack, hex_value, pretty, slug};

#[must_use]
pub fn generate(tokens: &TokenSystem) -> String {
    let typo = &tokens.typography;
    let motion = &tokens.animations;
    let config = json!({
        "darkMode": "class",
        "theme": {
            "extend": {
                "colors": colors(tokens),
                "fontFamily": object(&typo.font_families, |f| {
                    (slug(&f.name), json!(font_stack(&f.value)))
                }),
                "fontSize": object(&typo.sizes, |s| {
                    let line_height = s.line_height.to_string();
                    (
                        slug(&s.name),
                        json!([format!("{}px", s.size), { "lineHeight": line_height }]),
                    )
                }),
                "fontWeight": object(&typo.weights, |w| (slug(&w.name), json!(w.value.to_string()))),
                "spacing": spacing(tokens),
                "borderRadius": object(&tokens.radius.scale, |r| {
                    (slug(&r.name), json!(format!("{}px", r.value)))
                }),
                "boxShadow": object(&tokens.shadows, |s| (slug(&s.name), json!(s.value))),
                "transitionDuration": object(&motion.durations, |d| {
                    (slug(&d.name), json!(format!("{}ms", d.value)))
                }),
                "transitionTimingFunction": object(&motion.easings, |e| (slug(&e.name), json!(e.value))),
            }
        }
    });

    format!(
        "/** @type {{import('tailwindcss').Config}} */\nmodule.exports = {};\n",
        pretty(&config)
    )
}

/// A JSON object with one entry per item, in item order.
fn object<T>(items: &[T], entry: impl Fn(&T) -> (String, Value)) -> Value {
    Value::Object(items.iter().map(entry).collect())
}

fn spacing(tokens: &TokenSystem) -> Value {
    Value::Object(
        tokens
            .spacing
            .scale
            .iter()
            .enumerate()
            .map(|(i, px)| (i.to_string(), json!(format!("{px}px"))))
            .collect(),
    )
}

fn colors(tokens: &TokenSystem) -> Map<String, Value> {
    let colors = &tokens.colors;
    let mut map = Map::new();
    for token in colors.brand.iter().chain(&colors.semantic) {
        map.insert(slug(&token.name), triple(token));
    }
    for (role, _) in colors.surface.iter() {
        map.insert(
            role.slug().to_string(),
            json!(format!("var(--color-{})", role.slug())),
        );
    }
    map.insert(
        "neutral".to_string(),
        colors
            .neutral
            .scale
            .iter()
            .map(|(stop, hex)| (stop.to_string(), json!(hex_value(hex))))
            .collect::<Map<String, Value>>()
            .into(),
    );
    map
}

fn triple(token: &ColorToken) -> Value {
    let name = slug(&token.name);
    json!({
        "DEFAULT": format!("var(--color-{name})"),
        "light": hex_value(&token.value.light),
        "dark": hex_value(&token.value.dark),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::default_tokens;

    fn config(out: &str) -> Value {
        let body = out
            .split_once("module.exports = ")
            .map(|(_, rest)| rest.trim_end().trim_end_matches(';'))
            .expect("module.exports present");
        serde_json::from_str(body).expect("config body is JSON")
    }

    #[test]
    fn wraps_config_in_module_exports() {
        let out = generate(&default_tokens());
        assert!(out.starts_with("/** @type {import('tailwindcss').Config} */\n"));
        assert!(out.trim_end().ends_with("};"));
        assert_eq!(config(&out)["darkMode"], "class");
    }

    #[test]
    fn brand_colors_are_triples() {
        let cfg = config(&generate(&default_tokens()));
        let primary = &cfg["theme"]["extend"]["colors"]["primary"];
        assert_eq!(primary["DEFAULT"], "var(--color-primary)");
        assert_eq!(primary["light"], "#2563eb");
        assert_eq!(primary["dark"], "#60a5fa");
    }

    #[test]
    fn neutral_ramp_is_verbatim() {
        let t = default_tokens();
        let cfg = config(&generate(&t));
        let neutral = &cfg["theme"]["extend"]["colors"]["neutral"];
        for (stop, hex) in t.colors.neutral.scale.iter() {
            assert_eq!(neutral[stop.to_string()], hex);
        }
    }

    #[test]
    fn flat_maps_use_css_keys() {
        let cfg = config(&generate(&default_tokens()));
        let ext = &cfg["theme"]["extend"];
        assert_eq!(ext["spacing"]["7"], "32px");
        assert_eq!(ext["spacing"]["12"], "96px");
        assert_eq!(ext["borderRadius"]["full"], "9999px");
        assert_eq!(ext["transitionDuration"]["normal"], "250ms");
        assert_eq!(ext["fontSize"]["base"][0], "16px");
        assert_eq!(ext["fontSize"]["base"][1]["lineHeight"], "1.5");
        assert_eq!(ext["fontFamily"]["mono"][0], "JetBrains Mono");
    }
}
