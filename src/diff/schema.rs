//! Schema definitions for diff reports.
//!
//! Defines the structures that represent differences between two container
//! versions. Direction convention, stated once for the whole report:
//! `baseline` is the live version, `target` is the workspace; `added` means
//! present in the target only, `removed` present in the baseline only, and
//! `FieldChange.old`/`new` are the baseline/target values respectively.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::checks::Finding;
use crate::normalizer::schema::Category;

/// Complete diff report comparing two container snapshots
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Schema version for the report format
    pub report_version: String,

    /// Label of the baseline snapshot (conventionally "live")
    pub baseline: String,

    /// Label of the target snapshot (conventionally "workspace")
    pub target: String,

    /// Per-category results, in declared category order
    pub categories: Vec<CategoryDiff>,

    /// Semantic findings, sorted by (category, identity key, severity)
    pub findings: Vec<Finding>,

    /// Summary of diff results
    pub summary: ReportSummary,
}

/// Diff result for one entity category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryDiff {
    pub category: Category,

    /// Identity keys present in the target only, sorted
    pub added: Vec<String>,

    /// Identity keys present in the baseline only, sorted
    pub removed: Vec<String>,

    /// Entities present in both versions with field-level changes, sorted
    /// by identity key
    pub modified: Vec<ModifiedEntity>,
}

impl CategoryDiff {
    pub fn empty(category: Category) -> Self {
        CategoryDiff {
            category,
            added: Vec::new(),
            removed: Vec::new(),
            modified: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.modified.is_empty()
    }
}

/// One matched entity whose fields differ between versions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModifiedEntity {
    pub identity_key: String,

    /// Display name on the target side (falls back to baseline when the
    /// entity was renamed away)
    pub display_name: String,

    /// Field-level changes, sorted by path
    pub field_diff: Vec<FieldChange>,
}

/// One field-level difference at a dotted/indexed path
/// (e.g. `parameters[0].value`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldChange {
    pub path: String,

    pub kind: ChangeKind,

    /// Baseline-side value; absent when the field only exists in the target
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old: Option<Value>,

    /// Target-side value; absent when the field only exists in the baseline
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new: Option<Value>,
}

/// What happened to a field between the two versions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    /// Field present in the target only
    Added,
    /// Field present in the baseline only
    Removed,
    /// Scalar or type mismatch at this path
    Modified,
    /// Sequences differ in length; element-wise entries stop at the
    /// shorter length
    LengthMismatch,
}

/// Summary of diff results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total_added: usize,
    pub total_removed: usize,
    pub total_modified: usize,
    pub finding_count: usize,

    /// Whether any category reported a structural change
    pub has_changes: bool,
}
