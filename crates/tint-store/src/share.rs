//! Share links: a token system packed into one URL query parameter.
//!
//! ```text
//! SharePayload ─▶ JSON value ─▶ drop derived scales ─▶ lz-string (URI-safe) ─▶ ?t=…
//! ```
//!
//! Scales that are exactly what their base would regenerate are left out
//! of the payload and rebuilt on decode, which keeps a typical system well
//! under the length cap. Overridden scales travel verbatim.
//!
//! Decoding runs on untrusted input, so every failure is logged and turned
//! into `None`.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tint_tokens::TokenSystem;
use tint_tokens::scale::{
    generate_color_scale, generate_radius_scale, generate_spacing_scale,
    generate_typography_scale,
};
use tracing::{debug, warn};
use url::form_urlencoded;

use crate::config::ShareConfig;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SharePayload {
    pub tokens: TokenSystem,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preset_id: Option<String>,
}

impl SharePayload {
    #[must_use]
    pub const fn new(tokens: TokenSystem, preset_id: Option<String>) -> Self {
        Self { tokens, preset_id }
    }
}

// ─── Encode ─────────────────────────────────────────────────────

/// Encodes with the default length cap. `None` means the link would be
/// too long and the caller should fall back to a file export.
#[must_use]
pub fn encode(payload: &SharePayload) -> Option<String> {
    encode_with(payload, &ShareConfig::default())
}

#[must_use]
pub fn encode_with(payload: &SharePayload, config: &ShareConfig) -> Option<String> {
    let mut value = match serde_json::to_value(payload) {
        Ok(v) => v,
        Err(e) => {
            warn!(error = %e, "could not serialize share payload");
            return None;
        }
    };
    if let Some(tokens) = value.get_mut("tokens") {
        strip_derived(tokens, &payload.tokens);
    }

    let json = value.to_string();
    let encoded = lz_str::compress_to_encoded_uri_component(json.as_str());
    if encoded.len() > config.max_length {
        debug!(
            json = json.len(),
            encoded = encoded.len(),
            max = config.max_length,
            "share payload too long for a URL"
        );
        return None;
    }
    Some(encoded)
}

/// Full link: `base` plus the share parameter.
#[must_use]
pub fn share_url(base: &str, payload: &SharePayload, config: &ShareConfig) -> Option<String> {
    let encoded = encode_with(payload, config)?;
    let base = base.split('#').next().unwrap_or(base);
    let sep = if base.contains('?') { '&' } else { '?' };
    Some(format!("{base}{sep}{}={encoded}", config.param))
}

fn strip_derived(value: &mut Value, tokens: &TokenSystem) {
    let neutral = &tokens.colors.neutral;
    if neutral.scale == generate_color_scale(&neutral.base_color) {
        remove(value, "/colors/neutral", "scale");
    }
    if tokens.spacing.scale == generate_spacing_scale(tokens.spacing.base_unit) {
        remove(value, "/spacing", "scale");
    }
    if tokens.radius.scale == generate_radius_scale(tokens.radius.base) {
        remove(value, "/radius", "scale");
    }
    if tokens.typography.sizes == generate_typography_scale(tokens.typography.base_size) {
        remove(value, "/typography", "sizes");
    }
}

fn remove(value: &mut Value, pointer: &str, key: &str) {
    if let Some(map) = value.pointer_mut(pointer).and_then(Value::as_object_mut) {
        map.remove(key);
    }
}

// ─── Decode ─────────────────────────────────────────────────────

/// [`decode_with`] under the default [`ShareConfig`].
#[must_use]
pub fn decode(param: &str) -> Option<SharePayload> {
    decode_with(param, &ShareConfig::default())
}

/// Parameters longer than `config.max_length` are rejected before
/// decompression; [`encode_with`] never produces one.
#[must_use]
pub fn decode_with(param: &str, config: &ShareConfig) -> Option<SharePayload> {
    let param = param.trim();
    if param.len() > config.max_length {
        warn!(len = param.len(), max = config.max_length, "share parameter is too long");
        return None;
    }
    let Some(units) = lz_str::decompress_from_encoded_uri_component(param) else {
        warn!(len = param.len(), "share parameter does not decompress");
        return None;
    };
    let json = String::from_utf16(&units)
        .inspect_err(|e| warn!(error = %e, "share parameter is not valid UTF-16"))
        .ok()?;
    let mut value: Value = serde_json::from_str(&json)
        .inspect_err(|e| warn!(error = %e, "share parameter is not JSON"))
        .ok()?;
    if let Some(tokens) = value.get_mut("tokens") {
        restore_derived(tokens);
    }
    serde_json::from_value(value)
        .inspect_err(|e| warn!(error = %e, "share parameter is not a token system"))
        .ok()
}

fn restore_derived(value: &mut Value) {
    let base_color = value
        .pointer("/colors/neutral/baseColor")
        .and_then(Value::as_str)
        .map(generate_color_scale);
    if let Some(scale) = base_color {
        fill(value, "/colors/neutral", "scale", &scale);
    }

    if let Some(base) = uint(value, "/spacing/baseUnit") {
        fill(value, "/spacing", "scale", &generate_spacing_scale(base));
    }
    if let Some(base) = uint(value, "/radius/base") {
        fill(value, "/radius", "scale", &generate_radius_scale(base));
    }
    let base_size = uint(value, "/typography/baseSize").unwrap_or(16);
    fill(value, "/typography", "sizes", &generate_typography_scale(base_size));
}

fn uint(value: &Value, pointer: &str) -> Option<u32> {
    value
        .pointer(pointer)
        .and_then(Value::as_u64)
        .and_then(|n| u32::try_from(n).ok())
}

/// Inserts `key` under `pointer` unless it is already present.
fn fill<T: Serialize>(value: &mut Value, pointer: &str, key: &str, derived: &T) {
    let Some(map) = value.pointer_mut(pointer).and_then(Value::as_object_mut) else {
        return;
    };
    if map.contains_key(key) {
        return;
    }
    if let Ok(v) = serde_json::to_value(derived) {
        map.insert(key.to_string(), v);
    }
}

// ─── URL parsing ────────────────────────────────────────────────

/// Value of query parameter `param` in `url`, percent-decoded.
///
/// Relative links (`?t=…`) work too. The lz-string alphabet contains `+`,
/// which form decoding turns into a space, so spaces are mapped back.
#[must_use]
pub fn param_from_url(url: &str, param: &str) -> Option<String> {
    let (_, query) = url.split_once('?')?;
    let query = query.split_once('#').map_or(query, |(q, _)| q);
    form_urlencoded::parse(query.as_bytes())
        .find(|(k, _)| k == param)
        .map(|(_, v)| v.replace(' ', "+"))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tint_tokens::{ColorValue, TokenEditor, default_tokens, preset, preset_ids};

    use super::*;

    fn payload(tokens: TokenSystem, preset_id: Option<&str>) -> SharePayload {
        SharePayload::new(tokens, preset_id.map(str::to_string))
    }

    #[test]
    fn default_system_round_trips() {
        let p = payload(default_tokens(), Some("default"));
        let encoded = encode(&p).expect("default system fits in a URL");
        assert!(encoded.len() <= 2000);
        assert_eq!(decode(&encoded), Some(p));
    }

    #[test]
    fn presets_round_trip_when_they_fit() {
        for id in preset_ids() {
            let p = payload(preset(id).unwrap().tokens, Some(*id));
            if let Some(encoded) = encode(&p) {
                assert_eq!(decode(&encoded).as_ref(), Some(&p), "{id}");
            }
        }
    }

    #[test]
    fn derived_scales_are_left_out() {
        let mut value = serde_json::to_value(default_tokens()).unwrap();
        strip_derived(&mut value, &default_tokens());
        assert!(value.pointer("/colors/neutral/scale").is_none());
        assert!(value.pointer("/spacing/scale").is_none());
        assert!(value.pointer("/radius/scale").is_none());
        assert!(value.pointer("/typography/sizes").is_none());
        assert!(value.pointer("/colors/neutral/baseColor").is_some());
    }

    #[test]
    fn overridden_scales_survive() {
        let mut editor = TokenEditor::default();
        assert!(editor.set_spacing_value(3, 13));
        assert!(editor.set_radius_value("md", 7));
        let p = payload(editor.into_tokens(), None);
        let decoded = decode(&encode(&p).unwrap()).unwrap();
        assert_eq!(decoded.tokens.spacing.scale[3], 13);
        assert_eq!(decoded, p);
    }

    #[test]
    fn missing_preset_id_is_omitted() {
        let p = payload(default_tokens(), None);
        let json = String::from_utf16(
            &lz_str::decompress_from_encoded_uri_component(encode(&p).unwrap().as_str()).unwrap(),
        )
        .unwrap();
        assert!(!json.contains("presetId"));
        assert_eq!(decode(&encode(&p).unwrap()).unwrap().preset_id, None);
    }

    #[test]
    fn oversized_payload_is_none() {
        let mut editor = TokenEditor::default();
        for i in 0..300u32 {
            let hex = format!("#{:06x}", i.wrapping_mul(2_654_435_761) & 0x00ff_ffff);
            editor.add_brand_color(format!("Swatch {i}"), ColorValue::new(hex.clone(), hex));
        }
        assert_eq!(encode(&payload(editor.into_tokens(), None)), None);
    }

    #[test]
    fn overlong_parameter_is_rejected_before_decompressing() {
        let mut editor = TokenEditor::default();
        for i in 0..300u32 {
            let hex = format!("#{:06x}", i.wrapping_mul(2_654_435_761) & 0x00ff_ffff);
            editor.add_brand_color(format!("Swatch {i}"), ColorValue::new(hex.clone(), hex));
        }
        let roomy = ShareConfig {
            max_length: usize::MAX,
            ..ShareConfig::default()
        };
        let p = payload(editor.into_tokens(), None);
        let encoded = encode_with(&p, &roomy).unwrap();
        assert!(encoded.len() > ShareConfig::default().max_length);

        assert_eq!(decode(&encoded), None);
        assert_eq!(decode_with(&encoded, &roomy), Some(p));
    }

    #[test]
    fn tight_cap_rejects_default() {
        let config = ShareConfig {
            max_length: 100,
            ..ShareConfig::default()
        };
        assert_eq!(encode_with(&payload(default_tokens(), None), &config), None);
    }

    #[test]
    fn garbage_decodes_to_none() {
        for bad in ["", "!!!", "N4XyA", "not a share link at all"] {
            assert_eq!(decode(bad), None, "{bad}");
        }
        let not_tokens = lz_str::compress_to_encoded_uri_component("{\"tokens\": 1}");
        assert_eq!(decode(&not_tokens), None);
    }

    #[test]
    fn share_url_and_back() {
        let p = payload(default_tokens(), Some("default"));
        let config = ShareConfig::default();
        let url = share_url("https://tint.example/editor#top", &p, &config).unwrap();
        assert!(url.starts_with("https://tint.example/editor?t="));

        let param = param_from_url(&url, "t").unwrap();
        assert_eq!(decode(&param), Some(p));

        let plain = payload(default_tokens(), None);
        let with_query = share_url("https://tint.example/?lang=en", &plain, &config).unwrap();
        assert!(with_query.starts_with("https://tint.example/?lang=en&t="));
    }

    #[test]
    fn param_lookup() {
        assert_eq!(param_from_url("https://x/?a=1&t=abc#frag", "t").as_deref(), Some("abc"));
        assert_eq!(param_from_url("https://x/?t=a%24b", "t").as_deref(), Some("a$b"));
        assert_eq!(param_from_url("https://x/?t=a b", "t").as_deref(), Some("a+b"));
        assert_eq!(param_from_url("https://x/?t=a+b", "t").as_deref(), Some("a+b"));
        assert_eq!(param_from_url("?t=abc", "t").as_deref(), Some("abc"));
        assert_eq!(param_from_url("https://x/?a=1", "t"), None);
        assert_eq!(param_from_url("https://x/", "t"), None);
    }
}
