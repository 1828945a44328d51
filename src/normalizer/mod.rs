//! Raw record normalization.
//!
//! This module converts raw GTM API records (nested JSON) into canonical
//! [`Entity`] values:
//! - extracts a stable identity key (persistent ID, never display name)
//! - maps recognized API fields to a fixed canonical schema per category
//! - preserves unrecognized fields under an `extra` bucket (no silent loss)
//! - strips noisy meta fields recursively
//! - computes a deterministic content fingerprint

pub mod fingerprint;
pub mod schema;

pub use fingerprint::fingerprint;
pub use schema::{Category, Entity};

use crate::utils::config::{EXTRA_FIELD, META_FIELD_NAMES, NAME_FIELD};
use crate::utils::error::NormalizeError;
use log::{debug, warn};
use serde_json::{Map, Value};

/// Normalize one raw record into a canonical entity
///
/// **Public** - main entry point for normalization
///
/// # Arguments
/// * `raw` - Raw record as returned by the configuration source
/// * `category` - Which collection the record belongs to
///
/// # Returns
/// Canonical entity with stable identity and fingerprint
///
/// # Errors
/// * `NormalizeError::NotAnObject` - Record is not a JSON object
/// * `NormalizeError::MissingIdentity` - Record lacks the identity field
///   the category relies on
pub fn normalize(raw: &Value, category: Category) -> Result<Entity, NormalizeError> {
    let obj = raw
        .as_object()
        .ok_or(NormalizeError::NotAnObject(category))?;

    let identity_key = extract_identity(obj, category)?;
    let display_name = extract_display_name(obj, &identity_key);

    debug!(
        "Normalizing {} '{}' (id {})",
        category, display_name, identity_key
    );

    let fields = canonical_fields(obj, category);
    let fingerprint = fingerprint(&fields);

    Ok(Entity {
        category,
        identity_key,
        display_name,
        fields,
        fingerprint,
    })
}

/// Extract the stable identity key for a record
///
/// **Private** - internal helper for normalize
fn extract_identity(
    obj: &Map<String, Value>,
    category: Category,
) -> Result<String, NormalizeError> {
    let looked_for = category.identity_fields();

    looked_for
        .iter()
        .find_map(|field| obj.get(*field).and_then(value_as_key))
        .ok_or(NormalizeError::MissingIdentity {
            category,
            looked_for,
        })
}

/// Display name falls back to the identity key for unnamed records
fn extract_display_name(obj: &Map<String, Value>, identity_key: &str) -> String {
    obj.get(NAME_FIELD)
        .and_then(value_as_key)
        .unwrap_or_else(|| identity_key.to_string())
}

/// Accept string or numeric identity values; the GTM API serves IDs as
/// strings but exported JSON sometimes carries them as numbers
fn value_as_key(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Map recognized raw fields onto the canonical schema, collecting the rest
/// under the `extra` bucket
///
/// **Private** - internal helper for normalize
fn canonical_fields(obj: &Map<String, Value>, category: Category) -> Map<String, Value> {
    let mut fields = Map::new();
    let recognized = category.recognized_fields();

    for (api_name, canonical_name) in recognized {
        if let Some(value) = obj.get(*api_name) {
            fields.insert((*canonical_name).to_string(), strip_meta(value));
        }
    }

    let mut extra = Map::new();
    for (key, value) in obj {
        if is_meta_field(key)
            || is_identity_field(key, category)
            || recognized.iter().any(|(api, _)| api == key)
        {
            continue;
        }
        warn!(
            "Unrecognized {} field '{}' preserved under '{}'",
            category, key, EXTRA_FIELD
        );
        extra.insert(key.clone(), strip_meta(value));
    }

    if !extra.is_empty() {
        fields.insert(EXTRA_FIELD.to_string(), Value::Object(extra));
    }

    fields
}

fn is_meta_field(key: &str) -> bool {
    META_FIELD_NAMES.contains(&key)
}

fn is_identity_field(key: &str, category: Category) -> bool {
    category.identity_fields().contains(&key)
}

/// Recursively drop meta fields from nested values.
///
/// Nested resources (e.g. parameter lists with embedded maps) repeat the
/// same server-managed fields as the top level.
fn strip_meta(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .filter(|(k, _)| !is_meta_field(k))
                .map(|(k, v)| (k.clone(), strip_meta(v)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(strip_meta).collect()),
        scalar => scalar.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_tag_basic() {
        let raw = json!({
            "tagId": "12",
            "name": "GA4 Pageview",
            "type": "gaawe",
            "firingTriggerId": ["5"],
            "fingerprint": "1699999999",
            "accountId": "100",
        });

        let entity = normalize(&raw, Category::Tag).unwrap();
        assert_eq!(entity.identity_key, "12");
        assert_eq!(entity.display_name, "GA4 Pageview");
        assert_eq!(entity.fields["type"], json!("gaawe"));
        assert_eq!(entity.fields["firing_trigger_ids"], json!(["5"]));
        // meta fields never survive normalization
        assert!(!entity.fields.contains_key("fingerprint"));
        assert!(!entity.fields.contains_key("accountId"));
    }

    #[test]
    fn test_missing_identity_fails() {
        let raw = json!({"name": "orphan", "type": "html"});
        let err = normalize(&raw, Category::Tag).unwrap_err();
        assert!(matches!(err, NormalizeError::MissingIdentity { .. }));
    }

    #[test]
    fn test_non_object_fails() {
        let err = normalize(&json!(["not", "a", "record"]), Category::Trigger).unwrap_err();
        assert!(matches!(err, NormalizeError::NotAnObject(Category::Trigger)));
    }

    #[test]
    fn test_numeric_identity_accepted() {
        let raw = json!({"triggerId": 7, "name": "All Pages", "type": "pageview"});
        let entity = normalize(&raw, Category::Trigger).unwrap();
        assert_eq!(entity.identity_key, "7");
    }

    #[test]
    fn test_unrecognized_field_lands_in_extra() {
        let raw = json!({
            "variableId": "3",
            "name": "dl - user id",
            "type": "v",
            "someFutureField": {"nested": true, "path": "dropped"},
        });

        let entity = normalize(&raw, Category::Variable).unwrap();
        let extra = entity.fields["extra"].as_object().unwrap();
        // preserved, with nested meta stripped
        assert_eq!(extra["someFutureField"], json!({"nested": true}));
    }

    #[test]
    fn test_built_in_identity_is_type() {
        let raw = json!({"type": "PAGE_URL", "name": "Page URL"});
        let entity = normalize(&raw, Category::BuiltInVariable).unwrap();
        assert_eq!(entity.identity_key, "PAGE_URL");
        assert_eq!(entity.display_name, "Page URL");
    }

    #[test]
    fn test_fingerprint_ignores_meta_noise() {
        let a = json!({"tagId": "1", "name": "t", "type": "html", "fingerprint": "111"});
        let b = json!({"tagId": "1", "name": "t", "type": "html", "fingerprint": "222"});
        let ea = normalize(&a, Category::Tag).unwrap();
        let eb = normalize(&b, Category::Tag).unwrap();
        assert_eq!(ea.fingerprint, eb.fingerprint);
    }
}
