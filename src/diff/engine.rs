//! Core diff engine implementation.
//! Compares entity indexes pairwise and assembles complete reports.

use log::debug;

use super::fields::diff_fields;
use super::schema::{CategoryDiff, ModifiedEntity, Report};
use super::DiffError;
use crate::checks::run_checks;
use crate::index::EntityIndex;
use crate::normalizer::schema::Category;
use crate::report::assemble;
use crate::snapshot::ContainerSnapshot;

/// Diff one category between two indexes
///
/// **Public** - building block for diff_snapshots, usable standalone
///
/// # Arguments
/// * `baseline` - Index for the baseline version (conventionally live)
/// * `target` - Index for the target version (conventionally workspace)
///
/// # Returns
/// CategoryDiff with sorted added/removed/modified sets
///
/// # Errors
/// * `DiffError::CategoryMismatch` - The two indexes cover different
///   categories (programmer error)
pub fn diff_category(
    baseline: &EntityIndex,
    target: &EntityIndex,
) -> Result<CategoryDiff, DiffError> {
    if baseline.category() != target.category() {
        return Err(DiffError::CategoryMismatch {
            baseline: baseline.category(),
            target: target.category(),
        });
    }
    let category = baseline.category();

    // Step 1: membership partition. BTreeMap iteration keeps these sorted.
    let removed = baseline.keys_only_in_self(target);
    let added = target.keys_only_in_self(baseline);

    // Step 2: matched keys. Fingerprint equality short-circuits the deep
    // walk; identical fingerprints are never reported anywhere.
    let mut modified = Vec::new();
    for key in baseline.keys_in_both(target) {
        let old = baseline
            .get(&key)
            .ok_or_else(|| DiffError::MissingEntity(key.clone()))?;
        let new = target
            .get(&key)
            .ok_or_else(|| DiffError::MissingEntity(key.clone()))?;

        if old.fingerprint == new.fingerprint {
            continue;
        }

        let field_diff = diff_fields(&old.fields, &new.fields);
        if !field_diff.is_empty() {
            modified.push(ModifiedEntity {
                identity_key: key,
                display_name: new.display_name.clone(),
                field_diff,
            });
        }
    }

    debug!(
        "Diffed {}: {} added, {} removed, {} modified",
        category,
        added.len(),
        removed.len(),
        modified.len()
    );

    Ok(CategoryDiff {
        category,
        added,
        removed,
        modified,
    })
}

/// Generate a complete report comparing two container snapshots
///
/// **Public** - main entry point for diffing
///
/// Categories are diffed in the declared order, semantic checks run over
/// both snapshots, and the assembler enforces the report's total ordering.
///
/// # Arguments
/// * `baseline` - The baseline snapshot (conventionally live)
/// * `target` - The target snapshot (conventionally workspace)
///
/// # Errors
/// * `DiffError::CategoryMismatch` - Internal index misuse
///
/// # Example
/// ```ignore
/// use gtm_container_diff::diff::diff_snapshots;
/// use gtm_container_diff::snapshot::ContainerSnapshot;
///
/// let live = ContainerSnapshot::from_raw("live", &tags, &triggers, &vars, &built_ins)?;
/// let workspace = ContainerSnapshot::from_raw("workspace", &w_tags, &w_triggers, &w_vars, &w_built_ins)?;
/// let report = diff_snapshots(&live, &workspace)?;
/// ```
pub fn diff_snapshots(
    baseline: &ContainerSnapshot,
    target: &ContainerSnapshot,
) -> Result<Report, DiffError> {
    debug!(
        "Diffing snapshots: baseline '{}' vs target '{}'",
        baseline.label, target.label
    );

    let mut category_diffs = Vec::with_capacity(Category::ALL.len());
    for category in Category::ALL {
        category_diffs.push(diff_category(
            baseline.index(category),
            target.index(category),
        )?);
    }

    let findings = run_checks(baseline, target);

    Ok(assemble(
        &baseline.label,
        &target.label,
        category_diffs,
        findings,
    ))
}
