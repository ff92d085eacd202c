//! Figma Variables JSON, shaped like the plugin API's
//! `VariableCollection` / `Variable` objects.
//!
//! ```text
//! Colors      modes [light, dark]   COLOR   brand/*, semantic/*, surface/*, neutral/*
//! Spacing     modes [default]       FLOAT   spacing/*
//! Radius      modes [default]       FLOAT   radius/*
//! Typography  modes [default]       STRING  font/family/*
//!                                   FLOAT   font/size/*, font/line-height/*, font/weight/*
//! Animation   modes [default]       FLOAT   duration/*   STRING easing/*
//! Shadows     modes [default]       STRING  shadow/*
//! ```
//!
//! Colors are `{r, g, b, a}` floats in [0, 1], rounded to 4 places so
//! output stays byte-stable.

use serde_json::{Value, json};
use tint_color::hex;

use crate::model::{ColorValue, TokenSystem};

use super::{pretty, slug};

const DEFAULT_MODE: &str = "default";

#[must_use]
pub fn generate(tokens: &TokenSystem) -> String {
    let doc = json!({
        "version": "1.0",
        "collections": [
            colors(tokens),
            spacing(tokens),
            radius(tokens),
            typography(tokens),
            animation(tokens),
            shadows(tokens),
        ],
    });
    let mut out = pretty(&doc);
    out.push('\n');
    out
}

fn round4(x: f64) -> f64 {
    (x * 10_000.0).round() / 10_000.0
}

/// `{r, g, b, a}` for a hex value. Malformed input becomes mid gray.
fn rgba(value: &str) -> Value {
    let [r, g, b, a] = hex::to_rgba_floats(value).map(round4);
    json!({ "r": r, "g": g, "b": b, "a": a })
}

fn collection(name: &str, modes: &[&str], variables: Vec<Value>) -> Value {
    json!({ "name": name, "modes": modes, "variables": variables })
}

fn variable(name: String, kind: &str, values_by_mode: Value) -> Value {
    json!({ "name": name, "resolvedType": kind, "valuesByMode": values_by_mode })
}

fn invariant(name: String, kind: &str, value: Value) -> Value {
    variable(name, kind, json!({ DEFAULT_MODE: value }))
}

fn color_variable(name: String, value: &ColorValue) -> Value {
    variable(
        name,
        "COLOR",
        json!({ "light": rgba(&value.light), "dark": rgba(&value.dark) }),
    )
}

fn colors(tokens: &TokenSystem) -> Value {
    let colors = &tokens.colors;
    let mut vars = Vec::new();
    for t in &colors.brand {
        vars.push(color_variable(format!("brand/{}", slug(&t.name)), &t.value));
    }
    for t in &colors.semantic {
        vars.push(color_variable(format!("semantic/{}", slug(&t.name)), &t.value));
    }
    for (role, value) in colors.surface.iter() {
        vars.push(color_variable(format!("surface/{}", role.slug()), value));
    }
    for (stop, hex) in colors.neutral.scale.iter() {
        vars.push(color_variable(
            format!("neutral/{stop}"),
            &ColorValue::uniform(hex),
        ));
    }
    collection("Colors", &["light", "dark"], vars)
}

fn spacing(tokens: &TokenSystem) -> Value {
    let vars = tokens
        .spacing
        .scale
        .iter()
        .enumerate()
        .map(|(i, px)| invariant(format!("spacing/{i}"), "FLOAT", json!(px)))
        .collect();
    collection("Spacing", &[DEFAULT_MODE], vars)
}

fn radius(tokens: &TokenSystem) -> Value {
    let vars = tokens
        .radius
        .scale
        .iter()
        .map(|r| invariant(format!("radius/{}", slug(&r.name)), "FLOAT", json!(r.value)))
        .collect();
    collection("Radius", &[DEFAULT_MODE], vars)
}

fn typography(tokens: &TokenSystem) -> Value {
    let typo = &tokens.typography;
    let mut vars = Vec::new();
    for f in &typo.font_families {
        vars.push(invariant(
            format!("font/family/{}", slug(&f.name)),
            "STRING",
            json!(f.value),
        ));
    }
    for s in &typo.sizes {
        let name = slug(&s.name);
        vars.push(invariant(format!("font/size/{name}"), "FLOAT", json!(s.size)));
        vars.push(invariant(
            format!("font/line-height/{name}"),
            "FLOAT",
            json!(round4(s.line_height)),
        ));
    }
    for w in &typo.weights {
        vars.push(invariant(
            format!("font/weight/{}", slug(&w.name)),
            "FLOAT",
            json!(w.value),
        ));
    }
    collection("Typography", &[DEFAULT_MODE], vars)
}

fn animation(tokens: &TokenSystem) -> Value {
    let motion = &tokens.animations;
    let durations = motion
        .durations
        .iter()
        .map(|d| invariant(format!("duration/{}", slug(&d.name)), "FLOAT", json!(d.value)));
    let easings = motion
        .easings
        .iter()
        .map(|e| invariant(format!("easing/{}", slug(&e.name)), "STRING", json!(e.value)));
    collection("Animation", &[DEFAULT_MODE], durations.chain(easings).collect())
}

fn shadows(tokens: &TokenSystem) -> Value {
    let vars = tokens
        .shadows
        .iter()
        .map(|s| invariant(format!("shadow/{}", slug(&s.name)), "STRING", json!(s.value)))
        .collect();
    collection("Shadows", &[DEFAULT_MODE], vars)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::default_tokens;

    fn doc() -> Value {
        serde_json::from_str(&generate(&default_tokens())).expect("valid JSON")
    }

    fn find<'a>(collection: &'a Value, name: &str) -> &'a Value {
        collection["variables"]
            .as_array()
            .and_then(|vars| vars.iter().find(|v| v["name"] == name))
            .unwrap_or_else(|| panic!("no variable {name}"))
    }

    #[test]
    fn collections_in_order() {
        let d = doc();
        let names: Vec<&str> = d["collections"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["name"].as_str().unwrap())
            .collect();
        assert_eq!(
            names,
            ["Colors", "Spacing", "Radius", "Typography", "Animation", "Shadows"]
        );
    }

    #[test]
    fn colors_have_two_modes_and_float_channels() {
        let d = doc();
        let colors = &d["collections"][0];
        assert_eq!(colors["modes"], json!(["light", "dark"]));
        let bg = find(colors, "surface/background");
        assert_eq!(bg["resolvedType"], "COLOR");
        assert_eq!(bg["valuesByMode"]["light"], json!({"r": 1.0, "g": 1.0, "b": 1.0, "a": 1.0}));
        let dark = &bg["valuesByMode"]["dark"];
        assert_eq!(dark["r"], json!(0.0392));
    }

    #[test]
    fn channels_stay_in_unit_range() {
        let d = doc();
        for var in d["collections"][0]["variables"].as_array().unwrap() {
            for mode in ["light", "dark"] {
                for ch in ["r", "g", "b", "a"] {
                    let x = var["valuesByMode"][mode][ch].as_f64().unwrap();
                    assert!((0.0..=1.0).contains(&x), "{}: {x}", var["name"]);
                }
            }
        }
    }

    #[test]
    fn invariant_collections_use_default_mode() {
        let d = doc();
        let spacing = &d["collections"][1];
        assert_eq!(spacing["modes"], json!(["default"]));
        let four = find(spacing, "spacing/4");
        assert_eq!(four["resolvedType"], "FLOAT");
        assert_eq!(four["valuesByMode"]["default"], 16);

        let typo = &d["collections"][3];
        assert_eq!(find(typo, "font/family/sans")["resolvedType"], "STRING");
        assert_eq!(find(typo, "font/line-height/base")["valuesByMode"]["default"], json!(1.5));
    }

    #[test]
    fn malformed_colors_export_as_gray() {
        let mut t = default_tokens();
        t.colors.brand[0].value.light = "oops".into();
        let d: Value = serde_json::from_str(&generate(&t)).unwrap();
        let primary = find(&d["collections"][0], "brand/primary");
        assert_eq!(primary["valuesByMode"]["light"]["r"], json!(0.502));
    }
}
