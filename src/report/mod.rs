//! Report assembly with total ordering.
//!
//! Merges per-category diff results and semantic findings into one
//! [`Report`]. Ordering is fully determined: categories in declared order,
//! keys lexicographic within added/removed/modified, field changes by
//! path, findings by (category, identity key, severity rank). Identical
//! inputs therefore always serialize byte-identically, which keeps report
//! files diffable under version control.

use crate::checks::Finding;
use crate::diff::{CategoryDiff, Report, ReportSummary};
use crate::normalizer::schema::Category;
use crate::utils::config::REPORT_VERSION;

/// Assemble the final report from per-category diffs and findings
///
/// **Public** - called by the diff engine; usable standalone on
/// precomputed parts
pub fn assemble(
    baseline_label: &str,
    target_label: &str,
    mut category_diffs: Vec<CategoryDiff>,
    mut findings: Vec<Finding>,
) -> Report {
    category_diffs.sort_by_key(|diff| category_rank(diff.category));
    for diff in &mut category_diffs {
        diff.added.sort();
        diff.removed.sort();
        diff.modified.sort_by(|a, b| a.identity_key.cmp(&b.identity_key));
        for modified in &mut diff.modified {
            modified.field_diff.sort_by(|a, b| a.path.cmp(&b.path));
        }
    }

    findings.sort_by(|a, b| {
        category_rank(a.category)
            .cmp(&category_rank(b.category))
            .then_with(|| a.identity_key.cmp(&b.identity_key))
            .then_with(|| a.severity.rank().cmp(&b.severity.rank()))
            .then_with(|| a.message.cmp(&b.message))
    });

    let summary = summarize(&category_diffs, &findings);

    Report {
        report_version: REPORT_VERSION.to_string(),
        baseline: baseline_label.to_string(),
        target: target_label.to_string(),
        categories: category_diffs,
        findings,
        summary,
    }
}

fn summarize(category_diffs: &[CategoryDiff], findings: &[Finding]) -> ReportSummary {
    let total_added = category_diffs.iter().map(|d| d.added.len()).sum();
    let total_removed = category_diffs.iter().map(|d| d.removed.len()).sum();
    let total_modified = category_diffs.iter().map(|d| d.modified.len()).sum();

    ReportSummary {
        total_added,
        total_removed,
        total_modified,
        finding_count: findings.len(),
        has_changes: !category_diffs.iter().all(CategoryDiff::is_empty),
    }
}

fn category_rank(category: Category) -> usize {
    // Position in the declared order; ALL is exhaustive
    Category::ALL
        .iter()
        .position(|c| *c == category)
        .unwrap_or(Category::ALL.len())
}
