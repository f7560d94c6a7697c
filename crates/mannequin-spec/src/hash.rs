//! Canonical hashing of hierarchies and parameter sets.
//!
//! Fingerprints are computed as `hex(BLAKE3(JCS(json)))` where JCS is the
//! JSON Canonicalization Scheme (RFC 8785). Two hierarchies with the same
//! fingerprint have identical parts, transforms, materials and visibility.

use crate::error::ParamsError;
use crate::params::CustomizationParams;
use crate::scene::PartHierarchy;

/// Computes the canonical BLAKE3 fingerprint of a part hierarchy.
///
/// # Arguments
/// * `hierarchy` - The hierarchy to fingerprint
///
/// # Returns
/// * A 64-character lowercase hexadecimal string
///
/// # Example
/// ```
/// use mannequin_spec::hash::hierarchy_fingerprint;
/// use mannequin_spec::scene::{Part, PartHierarchy};
///
/// let h = PartHierarchy::new(Part::group("avatar"));
/// assert_eq!(hierarchy_fingerprint(&h).unwrap().len(), 64);
/// ```
pub fn hierarchy_fingerprint(hierarchy: &PartHierarchy) -> Result<String, ParamsError> {
    let value = serde_json::to_value(hierarchy)?;
    Ok(canonical_value_hash(&value))
}

/// Computes the canonical BLAKE3 hash of a parameter set.
pub fn params_hash(params: &CustomizationParams) -> Result<String, ParamsError> {
    let value = serde_json::to_value(params)?;
    Ok(canonical_value_hash(&value))
}

/// Computes the canonical BLAKE3 hash of a JSON value.
pub fn canonical_value_hash(value: &serde_json::Value) -> String {
    let canonical = canonicalize_json(value);
    blake3::hash(canonical.as_bytes()).to_hex().to_string()
}

/// Canonicalizes a JSON value according to RFC 8785 (JCS).
///
/// Object keys are sorted, no whitespace is emitted, and numbers use the
/// shortest round-trip representation.
pub fn canonicalize_json(value: &serde_json::Value) -> String {
    let mut out = String::new();
    write_canonical(value, &mut out);
    out
}

fn write_canonical(value: &serde_json::Value, out: &mut String) {
    match value {
        serde_json::Value::Null => out.push_str("null"),
        serde_json::Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        serde_json::Value::Number(n) => out.push_str(&format_jcs_number(n)),
        serde_json::Value::String(s) => write_jcs_string(s, out),
        serde_json::Value::Array(arr) => {
            out.push('[');
            for (i, item) in arr.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(item, out);
            }
            out.push(']');
        }
        serde_json::Value::Object(obj) => {
            let mut entries: Vec<(&String, &serde_json::Value)> = obj.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            out.push('{');
            for (i, (key, v)) in entries.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_jcs_string(key, out);
                out.push(':');
                write_canonical(v, out);
            }
            out.push('}');
        }
    }
}

fn format_jcs_number(n: &serde_json::Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    match n.as_f64() {
        Some(f) if f.is_finite() => {
            if f == 0.0 {
                "0".to_string()
            } else if f.fract() == 0.0 && f.abs() < 1e15 {
                format!("{}", f as i64)
            } else {
                format!("{}", f)
            }
        }
        _ => "null".to_string(),
    }
}

fn write_jcs_string(s: &str, out: &mut String) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0c}' => out.push_str("\\f"),
            c if c < '\x20' => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
}
