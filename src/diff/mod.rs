//! Structural diff generation.
//!
//! This module compares two container snapshots (baseline vs target) and
//! produces per-category added/removed/modified sets with field-level
//! change paths.
//!
//! # Example
//! ```ignore
//! use gtm_container_diff::diff::diff_snapshots;
//! use gtm_container_diff::snapshot::ContainerSnapshot;
//!
//! let live = ContainerSnapshot::from_raw("live", &tags, &triggers, &vars, &built_ins)?;
//! let ws = ContainerSnapshot::from_raw("workspace", &t2, &tr2, &v2, &b2)?;
//! let report = diff_snapshots(&live, &ws)?;
//! ```

mod engine;
mod fields;
mod schema;

// Public API exports
pub use engine::{diff_category, diff_snapshots};
pub use fields::diff_fields;
pub use schema::{
    CategoryDiff, ChangeKind, FieldChange, ModifiedEntity, Report, ReportSummary,
};

use crate::normalizer::schema::Category;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DiffError {
    #[error("category mismatch: baseline index is {baseline}, target index is {target}")]
    CategoryMismatch { baseline: Category, target: Category },

    #[error("matched key '{0}' vanished from its index during comparison")]
    MissingEntity(String),
}
