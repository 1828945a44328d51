//! Semantic checks over container snapshots.
//!
//! Each check is a pure predicate producing [`Finding`] values. Findings
//! are the non-fatal channel: they are always reported, never thrown, and
//! no check mutates entities or indexes. Current rule set:
//! - consent-settings-present: a tag without consent settings gets a
//!   warning
//! - broken-reference: a trigger ID or `{{variable}}` template reference
//!   that does not resolve in the same snapshot gets an error

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;

use crate::normalizer::schema::{Category, Entity};
use crate::snapshot::ContainerSnapshot;
use crate::utils::config::{
    CONSENT_SETTINGS_FIELD, TAG_TRIGGER_REF_FIELDS, VARIABLE_TRIGGER_REF_FIELDS,
};

/// Severity of a semantic finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Misconfiguration that will break behavior
    Error,
    /// Suspicious but not necessarily broken
    Warning,
    /// Purely informational
    Info,
}

impl Severity {
    /// Ordering rank: error > warning > info
    pub fn rank(&self) -> u8 {
        match self {
            Severity::Error => 0,
            Severity::Warning => 1,
            Severity::Info => 2,
        }
    }
}

/// A semantic-check result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    pub severity: Severity,

    pub category: Category,

    pub identity_key: String,

    pub message: String,

    /// Field path the finding points at, when it has one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_path: Option<String>,
}

/// Run every check over both snapshots
///
/// **Public** - called by the diff engine; usable standalone
pub fn run_checks(baseline: &ContainerSnapshot, target: &ContainerSnapshot) -> Vec<Finding> {
    let mut findings = Vec::new();

    for snapshot in [baseline, target] {
        check_consent_settings(snapshot, &mut findings);
        check_broken_references(snapshot, &mut findings);
    }

    findings
}

/// Warn on tags without consent settings.
///
/// Applies per entity, match or no match: a tag missing consent settings
/// in either version is worth flagging.
fn check_consent_settings(snapshot: &ContainerSnapshot, findings: &mut Vec<Finding>) {
    for tag in snapshot.tags.entities() {
        if !tag.fields.contains_key(CONSENT_SETTINGS_FIELD) {
            findings.push(Finding {
                severity: Severity::Warning,
                category: Category::Tag,
                identity_key: tag.identity_key.clone(),
                message: format!(
                    "tag '{}' has no consent settings in {}",
                    tag.display_name, snapshot.label
                ),
                field_path: Some(CONSENT_SETTINGS_FIELD.to_string()),
            });
        }
    }
}

/// Error on references that do not resolve within the same snapshot.
///
/// Trigger references are ID lists on tags and variables. Variable
/// references are `{{Display Name}}` tokens inside tag parameter values,
/// resolved against user variable names and built-in variable names.
fn check_broken_references(snapshot: &ContainerSnapshot, findings: &mut Vec<Finding>) {
    let variable_names: BTreeSet<&str> = snapshot
        .variables
        .entities()
        .map(|v| v.display_name.as_str())
        .chain(
            snapshot
                .built_in_variables
                .entities()
                .map(|b| b.display_name.as_str()),
        )
        .collect();

    for tag in snapshot.tags.entities() {
        check_trigger_refs(snapshot, tag, TAG_TRIGGER_REF_FIELDS, findings);
        check_variable_refs(snapshot, tag, &variable_names, findings);
    }

    for variable in snapshot.variables.entities() {
        check_trigger_refs(snapshot, variable, VARIABLE_TRIGGER_REF_FIELDS, findings);
    }
}

fn check_trigger_refs(
    snapshot: &ContainerSnapshot,
    entity: &Entity,
    ref_fields: &[&str],
    findings: &mut Vec<Finding>,
) {
    for field in ref_fields {
        let Some(Value::Array(ids)) = entity.fields.get(*field) else {
            continue;
        };

        for (idx, id_value) in ids.iter().enumerate() {
            let trigger_id = match id_value {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                _ => continue,
            };

            if !snapshot.triggers.contains_key(&trigger_id) {
                findings.push(Finding {
                    severity: Severity::Error,
                    category: entity.category,
                    identity_key: entity.identity_key.clone(),
                    message: format!(
                        "{} '{}' references trigger '{}' which does not exist in {}",
                        entity.category, entity.display_name, trigger_id, snapshot.label
                    ),
                    field_path: Some(format!("{}[{}]", field, idx)),
                });
            }
        }
    }
}

fn check_variable_refs(
    snapshot: &ContainerSnapshot,
    tag: &Entity,
    variable_names: &BTreeSet<&str>,
    findings: &mut Vec<Finding>,
) {
    let mut refs = BTreeSet::new();
    for value in tag.fields.values() {
        collect_refs_inner(value, &mut refs);
    }

    for token in refs {
        if !variable_names.contains(token.as_str()) {
            findings.push(Finding {
                severity: Severity::Error,
                category: Category::Tag,
                identity_key: tag.identity_key.clone(),
                message: format!(
                    "tag '{}' references variable '{{{{{}}}}}' which does not exist in {}",
                    tag.display_name, token, snapshot.label
                ),
                field_path: None,
            });
        }
    }
}

/// Collect `{{...}}` tokens from every string in a value tree.
///
/// The set is deduplicated so one missing variable used in five
/// parameters yields one finding.
fn collect_refs_inner(value: &Value, refs: &mut BTreeSet<String>) {
    match value {
        Value::String(s) => {
            let mut rest = s.as_str();
            while let Some(start) = rest.find("{{") {
                let after = &rest[start + 2..];
                let Some(end) = after.find("}}") else {
                    break;
                };
                let token = after[..end].trim();
                if !token.is_empty() {
                    refs.insert(token.to_string());
                }
                rest = &after[end + 2..];
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_refs_inner(item, refs);
            }
        }
        Value::Object(map) => {
            for item in map.values() {
                collect_refs_inner(item, refs);
            }
        }
        _ => {}
    }
}
