//! Design Tokens Community Group JSON.
//!
//! Each token is `{ "$type", "$value" }`. Dual-mode colors add a `dark`
//! sibling holding the dark-mode token, so tools that ignore it still get
//! a valid light theme.

use serde_json::{Map, Value, json};

use crate::model::{ColorToken, ColorValue, TokenSystem};

use super::{font_stack, hex_value, pretty, slug};

#[must_use]
pub fn generate(tokens: &TokenSystem) -> String {
    let typo = &tokens.typography;
    let doc = json!({
        "$description": format!("{} design tokens", tokens.name),
        "color": {
            "brand": named_colors(&tokens.colors.brand),
            "semantic": named_colors(&tokens.colors.semantic),
            "surface": Value::Object(
                tokens.colors.surface.iter()
                    .map(|(role, value)| (role.slug().to_string(), dual(value)))
                    .collect()
            ),
            "neutral": Value::Object(
                tokens.colors.neutral.scale.iter()
                    .map(|(stop, hex)| (stop.to_string(), token("color", json!(hex_value(hex)))))
                    .collect()
            ),
        },
        "font": {
            "family": group(typo.font_families.iter().map(|f| {
                (slug(&f.name), token("fontFamily", json!(font_stack(&f.value))))
            })),
            "size": group(typo.sizes.iter().map(|s| {
                (slug(&s.name), token("dimension", json!(format!("{}px", s.size))))
            })),
            "lineHeight": group(typo.sizes.iter().map(|s| {
                (slug(&s.name), token("number", json!(s.line_height)))
            })),
            "weight": group(typo.weights.iter().map(|w| {
                (slug(&w.name), token("fontWeight", json!(w.value)))
            })),
        },
        "spacing": group(tokens.spacing.scale.iter().enumerate().map(|(i, px)| {
            (i.to_string(), token("dimension", json!(format!("{px}px"))))
        })),
        "radius": group(tokens.radius.scale.iter().map(|r| {
            (slug(&r.name), token("dimension", json!(format!("{}px", r.value))))
        })),
        "shadow": group(tokens.shadows.iter().map(|s| {
            (slug(&s.name), token("shadow", json!(s.value)))
        })),
        "duration": group(tokens.animations.durations.iter().map(|d| {
            (slug(&d.name), token("duration", json!(format!("{}ms", d.value))))
        })),
        "easing": group(tokens.animations.easings.iter().map(|e| {
            let value = bezier(&e.value).map_or_else(|| json!(e.value), |p| json!(p));
            (slug(&e.name), token("cubicBezier", value))
        })),
    });
    let mut out = pretty(&doc);
    out.push('\n');
    out
}

/// Control points of a CSS easing, keywords included.
fn bezier(easing: &str) -> Option<[f64; 4]> {
    let easing = easing.trim();
    let keyword = match easing {
        "linear" => Some([0.0, 0.0, 1.0, 1.0]),
        "ease" => Some([0.25, 0.1, 0.25, 1.0]),
        "ease-in" => Some([0.42, 0.0, 1.0, 1.0]),
        "ease-out" => Some([0.0, 0.0, 0.58, 1.0]),
        "ease-in-out" => Some([0.42, 0.0, 0.58, 1.0]),
        _ => None,
    };
    if keyword.is_some() {
        return keyword;
    }

    let args = easing.strip_prefix("cubic-bezier(")?.strip_suffix(')')?;
    let mut points = [0.0; 4];
    let mut parts = args.split(',');
    for slot in &mut points {
        *slot = parts.next()?.trim().parse().ok()?;
    }
    parts.next().is_none().then_some(points)
}

fn token(kind: &str, value: Value) -> Value {
    json!({ "$type": kind, "$value": value })
}

fn group(iter: impl Iterator<Item = (String, Value)>) -> Value {
    Value::Object(iter.collect())
}

fn dual(value: &ColorValue) -> Value {
    let mut light = token("color", json!(hex_value(&value.light)));
    if let Value::Object(map) = &mut light {
        map.insert("dark".to_string(), token("color", json!(hex_value(&value.dark))));
    }
    light
}

fn named_colors(list: &[ColorToken]) -> Value {
    let mut map = Map::new();
    for t in list {
        let mut entry = dual(&t.value);
        if let (Some(desc), Value::Object(obj)) = (&t.description, &mut entry) {
            obj.insert("$description".to_string(), json!(desc));
        }
        map.insert(slug(&t.name), entry);
    }
    Value::Object(map)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
