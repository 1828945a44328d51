//! Deterministic entity fingerprinting.
//!
//! The fingerprint is a canonical serialization of an entity's fields:
//! mapping keys sorted lexicographically, sequence order preserved.
//! Equal fingerprints must imply a field-by-field comparison would find
//! zero differences, so the diff engine can skip the deep walk.

use serde_json::{Map, Value};

/// Compute the canonical fingerprint for a normalized field map
///
/// **Public** - called by the normalizer after canonical fields are built
pub fn fingerprint(fields: &Map<String, Value>) -> String {
    let mut out = String::new();
    write_canonical_map(fields, &mut out);
    out
}

fn write_canonical_map(map: &Map<String, Value>, out: &mut String) {
    let mut keys: Vec<&String> = map.keys().collect();
    keys.sort();

    out.push('{');
    for (i, key) in keys.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        write_scalar(&Value::String((*key).clone()), out);
        out.push(':');
        write_canonical_value(&map[*key], out);
    }
    out.push('}');
}

fn write_canonical_value(value: &Value, out: &mut String) {
    match value {
        Value::Object(map) => write_canonical_map(map, out),
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical_value(item, out);
            }
            out.push(']');
        }
        scalar => write_scalar(scalar, out),
    }
}

/// Serialize a scalar through serde_json for stable escaping and
/// number formatting
fn write_scalar(value: &Value, out: &mut String) {
    // Scalar serialization is infallible
    out.push_str(&value.to_string());
}
