//! Recursive field-by-field comparison.
//!
//! Walks two canonical field maps in parallel and reports every divergence
//! at a dotted/indexed path (`parameters[0].value`). Mappings recurse over
//! the union of their keys; sequences compare element-wise up to the
//! shorter length and flag a length mismatch as its own change, since
//! element-wise comparison past the shorter length is meaningless.

use serde_json::{json, Map, Value};

use super::schema::{ChangeKind, FieldChange};

/// Compare two canonical field maps, producing sorted field changes
///
/// **Public** - called by the diff engine for matched entities whose
/// fingerprints differ
pub fn diff_fields(old: &Map<String, Value>, new: &Map<String, Value>) -> Vec<FieldChange> {
    let mut changes = Vec::new();
    walk_maps("", old, new, &mut changes);
    changes.sort_by(|a, b| a.path.cmp(&b.path));
    changes
}

fn walk_maps(
    prefix: &str,
    old: &Map<String, Value>,
    new: &Map<String, Value>,
    out: &mut Vec<FieldChange>,
) {
    let mut keys: Vec<&String> = old.keys().chain(new.keys()).collect();
    keys.sort();
    keys.dedup();

    for key in keys {
        let path = join_key(prefix, key);
        walk_values(&path, old.get(key.as_str()), new.get(key.as_str()), out);
    }
}

fn walk_values(path: &str, old: Option<&Value>, new: Option<&Value>, out: &mut Vec<FieldChange>) {
    match (old, new) {
        (None, None) => {}

        (None, Some(value)) => out.push(FieldChange {
            path: path.to_string(),
            kind: ChangeKind::Added,
            old: None,
            new: Some(value.clone()),
        }),

        (Some(value), None) => out.push(FieldChange {
            path: path.to_string(),
            kind: ChangeKind::Removed,
            old: Some(value.clone()),
            new: None,
        }),

        (Some(a), Some(b)) if a == b => {}

        (Some(Value::Object(a)), Some(Value::Object(b))) => walk_maps(path, a, b, out),

        (Some(Value::Array(a)), Some(Value::Array(b))) => walk_sequences(path, a, b, out),

        // Scalar mismatch, or a type change (e.g. string became a list).
        // Deep value equality only; never recurse across types.
        (Some(a), Some(b)) => out.push(FieldChange {
            path: path.to_string(),
            kind: ChangeKind::Modified,
            old: Some(a.clone()),
            new: Some(b.clone()),
        }),
    }
}

fn walk_sequences(path: &str, old: &[Value], new: &[Value], out: &mut Vec<FieldChange>) {
    let shared = old.len().min(new.len());

    for idx in 0..shared {
        let elem_path = format!("{}[{}]", path, idx);
        walk_values(&elem_path, Some(&old[idx]), Some(&new[idx]), out);
    }

    if old.len() != new.len() {
        out.push(FieldChange {
            path: path.to_string(),
            kind: ChangeKind::LengthMismatch,
            old: Some(json!(old.len())),
            new: Some(json!(new.len())),
        });
    }
}

fn join_key(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", prefix, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(m) => m,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_identical_maps_no_changes() {
        let a = map(json!({"type": "html", "parameters": [{"key": "x"}]}));
        assert!(diff_fields(&a, &a.clone()).is_empty());
    }

    #[test]
    fn test_scalar_mismatch_at_nested_path() {
        let a = map(json!({"consent_settings": {"consentStatus": "needed"}}));
        let b = map(json!({"consent_settings": {"consentStatus": "notSet"}}));

        let changes = diff_fields(&a, &b);
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].path, "consent_settings.consentStatus");
        assert_eq!(changes[0].kind, ChangeKind::Modified);
        assert_eq!(changes[0].old, Some(json!("needed")));
        assert_eq!(changes[0].new, Some(json!("notSet")));
    }

    #[test]
    fn test_one_sided_field_reported_at_path() {
        let a = map(json!({"notes": "check me"}));
        let b = map(json!({}));

        let changes = diff_fields(&a, &b);
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].kind, ChangeKind::Removed);
        assert_eq!(changes[0].old, Some(json!("check me")));
        assert_eq!(changes[0].new, None);
    }

    #[test]
    fn test_sequence_element_and_length_mismatch() {
        let a = map(json!({"firing_trigger_ids": ["5", "6", "7"]}));
        let b = map(json!({"firing_trigger_ids": ["5", "9"]}));

        let changes = diff_fields(&a, &b);
        // Indexed element change plus a distinct length mismatch
        assert_eq!(changes.len(), 2);
        assert_eq!(changes[0].path, "firing_trigger_ids");
        assert_eq!(changes[0].kind, ChangeKind::LengthMismatch);
        assert_eq!(changes[0].old, Some(json!(3)));
        assert_eq!(changes[0].new, Some(json!(2)));
        assert_eq!(changes[1].path, "firing_trigger_ids[1]");
        assert_eq!(changes[1].kind, ChangeKind::Modified);
    }

    #[test]
    fn test_type_change_is_single_modified() {
        let a = map(json!({"priority": {"type": "integer", "value": "5"}}));
        let b = map(json!({"priority": "5"}));

        let changes = diff_fields(&a, &b);
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].kind, ChangeKind::Modified);
    }

    #[test]
    fn test_changes_sorted_by_path() {
        let a = map(json!({"zeta": 1, "alpha": {"b": 1, "a": 2}}));
        let b = map(json!({"zeta": 2, "alpha": {"b": 3, "a": 2}}));

        let changes = diff_fields(&a, &b);
        let paths: Vec<&str> = changes.iter().map(|c| c.path.as_str()).collect();
        assert_eq!(paths, vec!["alpha.b", "zeta"]);
    }
}
