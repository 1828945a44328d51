//! Flat CSV export of a diff report.
//!
//! Flattens a report into one row per changed entity or field, matching
//! the shape spreadsheet users expect:
//! `entity_type, entity_key, entity_name, field_path, change_type,
//! value_baseline, value_target`. Entity-level additions and removals use
//! the pseudo path `__entity__`.

use crate::diff::{ChangeKind, Report};
use crate::utils::error::OutputError;
use log::info;
use serde_json::Value;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Pseudo field path for whole-entity rows
const ENTITY_PATH: &str = "__entity__";

const HEADER: &[&str] = &[
    "entity_type",
    "entity_key",
    "entity_name",
    "field_path",
    "change_type",
    "value_baseline",
    "value_target",
];

/// One CSV row of the flattened report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffRow {
    pub entity_type: String,
    pub entity_key: String,
    pub entity_name: String,
    pub field_path: String,
    pub change_type: String,
    pub value_baseline: String,
    pub value_target: String,
}

/// Flatten a report into CSV rows, preserving report order
///
/// **Public** - row shape is also handy for table UIs
pub fn report_to_rows(report: &Report) -> Vec<DiffRow> {
    let mut rows = Vec::new();

    for category in &report.categories {
        let entity_type = category.category.to_string();

        for key in &category.removed {
            rows.push(DiffRow {
                entity_type: entity_type.clone(),
                entity_key: key.clone(),
                entity_name: String::new(),
                field_path: ENTITY_PATH.to_string(),
                change_type: "only_in_baseline".to_string(),
                value_baseline: "present".to_string(),
                value_target: String::new(),
            });
        }

        for key in &category.added {
            rows.push(DiffRow {
                entity_type: entity_type.clone(),
                entity_key: key.clone(),
                entity_name: String::new(),
                field_path: ENTITY_PATH.to_string(),
                change_type: "only_in_target".to_string(),
                value_baseline: String::new(),
                value_target: "present".to_string(),
            });
        }

        for modified in &category.modified {
            for change in &modified.field_diff {
                rows.push(DiffRow {
                    entity_type: entity_type.clone(),
                    entity_key: modified.identity_key.clone(),
                    entity_name: modified.display_name.clone(),
                    field_path: change.path.clone(),
                    change_type: change_type_label(change.kind).to_string(),
                    value_baseline: render_value(change.old.as_ref()),
                    value_target: render_value(change.new.as_ref()),
                });
            }
        }
    }

    rows
}

/// Write a report to a CSV file
///
/// **Public** - main entry point for CSV output
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
pub fn write_csv(report: &Report, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing CSV diff to: {}", output_path.display());

    super::validate_path(output_path)?;
    super::json::create_parent_dirs(output_path)?;

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let mut writer = BufWriter::new(file);

    write_record(&mut writer, HEADER.iter().copied())?;
    for row in report_to_rows(report) {
        write_record(
            &mut writer,
            [
                row.entity_type.as_str(),
                row.entity_key.as_str(),
                row.entity_name.as_str(),
                row.field_path.as_str(),
                row.change_type.as_str(),
                row.value_baseline.as_str(),
                row.value_target.as_str(),
            ]
            .into_iter(),
        )?;
    }

    writer.flush()?;
    Ok(())
}

fn change_type_label(kind: ChangeKind) -> &'static str {
    match kind {
        ChangeKind::Added => "field_added",
        ChangeKind::Removed => "field_removed",
        ChangeKind::Modified => "modified",
        ChangeKind::LengthMismatch => "length_mismatch",
    }
}

/// Scalars render bare, structures as compact JSON, absence as empty
fn render_value(value: Option<&Value>) -> String {
    match value {
        None => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn write_record<'a>(
    writer: &mut impl Write,
    fields: impl Iterator<Item = &'a str>,
) -> Result<(), OutputError> {
    let escaped: Vec<String> = fields.map(escape_field).collect();
    writeln!(writer, "{}", escaped.join(","))?;
    Ok(())
}

/// RFC 4180 quoting: wrap when a field contains a comma, quote, or newline
fn escape_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
