//! Output writers for diff reports.
//!
//! This module handles writing reports to disk in the supported formats:
//! - JSON reports (pretty-printed, byte-deterministic for equal inputs)
//! - Flat field-level CSV rows

pub mod csv;
pub mod json;

// Re-export main functions
pub use csv::{report_to_rows, write_csv, DiffRow};
pub use json::{read_report, write_report};

use crate::utils::error::OutputError;
use std::path::Path;

/// Reject paths that cannot name a file
pub(crate) fn validate_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("empty path".to_string()));
    }
    if path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "{} is a directory",
            path.display()
        )));
    }
    Ok(())
}
